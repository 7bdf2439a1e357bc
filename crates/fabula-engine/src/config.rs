/// Configuration for an exploration run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExploreConfig {
    /// Stop expanding new states once this many have been visited. 0 = unlimited.
    pub max_states: usize,
    /// Keep every resolve call made during exploration.
    pub record_transitions: bool,
}

impl ExploreConfig {
    /// Set the visited-state cap (0 = unlimited).
    pub fn with_max_states(mut self, max: usize) -> Self {
        self.max_states = max;
        self
    }

    /// Record each transition in the exploration result.
    pub fn with_transitions(mut self, record: bool) -> Self {
        self.record_transitions = record;
        self
    }

    /// True if the state cap has been reached.
    pub(crate) fn is_full(&self, visited: usize) -> bool {
        self.max_states != 0 && visited >= self.max_states
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let config = ExploreConfig::default();
        assert_eq!(config.max_states, 0);
        assert!(!config.record_transitions);
        assert!(!config.is_full(usize::MAX));
    }

    #[test]
    fn config_builder_chain() {
        let config = ExploreConfig::default()
            .with_max_states(10)
            .with_transitions(true);
        assert_eq!(config.max_states, 10);
        assert!(config.record_transitions);
        assert!(!config.is_full(9));
        assert!(config.is_full(10));
    }
}
