/// Values of one channel over a horizon: index 0 is the initial state,
/// index `t + 1` the state after step `t`.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    values: Vec<f64>,
}

impl Trajectory {
    pub fn with_horizon(initial: f64, horizon: usize) -> Self {
        let mut values = Vec::with_capacity(horizon + 1);
        values.push(initial);
        Self { values }
    }

    pub(crate) fn push(&mut self, value: f64) {
        self.values.push(value);
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of steps taken (`len - 1`).
    pub fn horizon(&self) -> usize {
        self.values.len().saturating_sub(1)
    }

    pub fn last(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    /// Latest value, i.e. the state the next step starts from.
    pub(crate) fn current(&self) -> f64 {
        self.last()
    }

    /// The last `n` values (all of them when `n` exceeds the length).
    pub fn tail(&self, n: usize) -> &[f64] {
        let start = self.values.len().saturating_sub(n);
        &self.values[start..]
    }

    /// Plain mean of [`Self::tail`].
    pub fn tail_mean(&self, n: usize) -> f64 {
        let tail = self.tail(n);
        tail.iter().sum::<f64>() / tail.len().max(1) as f64
    }
}

/// `(t, value)` pairs for plotting a series indexed by time step.
pub fn time_points(values: &[f64]) -> impl Iterator<Item = (f64, f64)> + '_ {
    values.iter().enumerate().map(|(t, &v)| (t as f64, v))
}
