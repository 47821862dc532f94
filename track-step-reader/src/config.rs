//! Reader configuration types
//!
//! The reader needs very little configuration - the column set is fixed by
//! the simulation's ntuple layout, so only the tree name can vary between
//! productions.

use serde::{Deserialize, Serialize};

/// Configuration for the track-step reader
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// Name of the tree holding the step records (default: "event")
    #[serde(default = "default_tree_name")]
    pub tree_name: String,
}

fn default_tree_name() -> String {
    "event".to_string()
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            tree_name: default_tree_name(),
        }
    }
}

impl ReaderConfig {
    /// Create a new reader configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the tree name to look for in each file
    pub fn with_tree_name(mut self, name: impl Into<String>) -> Self {
        self.tree_name = name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_config_defaults() {
        let config = ReaderConfig::new();
        assert_eq!(config.tree_name, "event");
    }

    #[test]
    fn test_reader_config_builder() {
        let config = ReaderConfig::new().with_tree_name("calib");
        assert_eq!(config.tree_name, "calib");
    }
}
