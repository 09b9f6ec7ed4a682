//! Gatekeeper configuration

use serde::{Deserialize, Serialize};

/// Configuration for the native shape evaluator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Treat instances of a subclass as instances of the superclass
    #[serde(default = "default_true")]
    pub class_inference: bool,

    /// Reject literals whose lexical form is invalid for their datatype
    #[serde(default = "default_true")]
    pub check_lexical_forms: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            class_inference: true,
            check_lexical_forms: true,
        }
    }
}

impl ValidationConfig {
    /// Datatype IRIs only, no class hierarchy
    pub fn permissive() -> Self {
        Self {
            class_inference: false,
            check_lexical_forms: false,
        }
    }

    /// Default configuration with class inference turned off
    pub fn without_inference() -> Self {
        Self {
            class_inference: false,
            ..Self::default()
        }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ValidationConfig::default();
        assert!(config.class_inference);
        assert!(config.check_lexical_forms);
    }

    #[test]
    fn test_permissive_config() {
        let config = ValidationConfig::permissive();
        assert!(!config.class_inference);
        assert!(!config.check_lexical_forms);
    }

    #[test]
    fn test_without_inference_keeps_lexical_checks() {
        let config = ValidationConfig::without_inference();
        assert!(!config.class_inference);
        assert!(config.check_lexical_forms);
    }
}
