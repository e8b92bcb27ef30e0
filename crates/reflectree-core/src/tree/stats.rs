/// Stores the numbers backpropagation updates constantly
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NodeStats {
    visits: u64,
    value: f64,
}

impl NodeStats {
    pub fn new() -> Self {
        NodeStats {
            visits: 0,
            value: 0.0,
        }
    }

    /// Retrieve the amount of backpropagation events that touched this node
    pub fn visits(&self) -> u64 {
        self.visits
    }

    /// Running mean of every reward recorded so far
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Function to be used for backpropagation.
    /// Increments the visits and folds the reward into the running mean.
    pub fn record(&mut self, reward: f64) {
        self.visits += 1;
        let n = self.visits as f64;
        self.value = (self.value * (n - 1.0) + reward) / n;
    }
}
