//! Configuration and diagnostics for repeated simplification passes.

/// Controls how many bottom-up `calc` passes a simplification may run.
#[derive(Clone, Debug)]
pub struct CalcOptions {
    /// Upper bound on passes; a single pass is the plain `calc` behaviour.
    pub max_passes: usize,
}

impl Default for CalcOptions {
    fn default() -> Self {
        Self { max_passes: 1 }
    }
}

impl CalcOptions {
    /// Set the maximum number of passes (at least one is always run).
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes.max(1);
        self
    }
}

/// Diagnostics returned alongside a simplified element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalcSummary {
    /// Number of passes performed.
    pub passes: usize,
    /// Whether the last pass left the tree structurally unchanged.
    pub converged: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_passes_is_clamped() {
        assert_eq!(CalcOptions::default().max_passes, 1);
        assert_eq!(CalcOptions::default().with_max_passes(0).max_passes, 1);
        assert_eq!(CalcOptions::default().with_max_passes(8).max_passes, 8);
    }
}
