//! Script runtime configuration.

use std::path::Path;

use rhai::Engine;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ScriptError;

/// The environment variable used to override [`ScriptConfig::max_operations`].
pub const MAX_OPERATIONS_ENV: &str = "ENGINE_SCRIPT_MAX_OPERATIONS";

/// Limits and language options applied to a script engine.
///
/// Missing JSON fields fall back to [`ScriptConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptConfig {
    /// Maximum operations per evaluation (0 = unlimited).
    pub max_operations: u64,
    /// Maximum function call nesting depth.
    pub max_call_levels: usize,
    /// Maximum length of a script string in bytes (0 = unlimited).
    pub max_string_size: usize,
    /// Reject scripts that reference undefined variables at compile time.
    pub strict_variables: bool,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            max_operations: 0,
            max_call_levels: 64,
            max_string_size: 0,
            strict_variables: false,
        }
    }
}

impl ScriptConfig {
    /// Create a config with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Json`] if the text is not a valid config.
    pub fn from_json_str(json: &str) -> Result<Self, ScriptError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Io`] if the file cannot be read, or
    /// [`ScriptError::Json`] if it is not a valid config.
    pub fn from_json_file(path: &Path) -> Result<Self, ScriptError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Apply overrides from the environment (see [`MAX_OPERATIONS_ENV`]).
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        let raw = std::env::var(MAX_OPERATIONS_ENV).ok();
        self.with_max_operations_override(raw.as_deref())
    }

    fn with_max_operations_override(self, raw: Option<&str>) -> Self {
        match raw.map(str::parse::<u64>) {
            Some(Ok(max)) => self.with_max_operations(max),
            Some(Err(e)) => {
                warn!(var = MAX_OPERATIONS_ENV, %e, "ignoring invalid override");
                self
            }
            None => self,
        }
    }

    /// Set the operation limit (0 = unlimited).
    #[must_use]
    pub fn with_max_operations(mut self, max: u64) -> Self {
        self.max_operations = max;
        self
    }

    /// Set the call nesting limit.
    #[must_use]
    pub fn with_max_call_levels(mut self, levels: usize) -> Self {
        self.max_call_levels = levels;
        self
    }

    /// Set the string size limit (0 = unlimited).
    #[must_use]
    pub fn with_max_string_size(mut self, size: usize) -> Self {
        self.max_string_size = size;
        self
    }

    /// Enable or disable strict variable checking.
    #[must_use]
    pub fn with_strict_variables(mut self, strict: bool) -> Self {
        self.strict_variables = strict;
        self
    }

    /// Apply these settings to `engine`.
    pub fn apply(&self, engine: &mut Engine) {
        engine
            .set_max_operations(self.max_operations)
            .set_max_call_levels(self.max_call_levels)
            .set_max_string_size(self.max_string_size)
            .set_strict_variables(self.strict_variables);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScriptConfig::new();
        assert_eq!(config.max_operations, 0);
        assert_eq!(config.max_call_levels, 64);
        assert!(!config.strict_variables);
    }

    #[test]
    fn test_builder() {
        let config = ScriptConfig::new()
            .with_max_operations(500)
            .with_max_call_levels(8)
            .with_max_string_size(1024)
            .with_strict_variables(true);
        assert_eq!(config.max_operations, 500);
        assert_eq!(config.max_call_levels, 8);
        assert_eq!(config.max_string_size, 1024);
        assert!(config.strict_variables);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = ScriptConfig::from_json_str(r#"{ "max_operations": 10000 }"#).unwrap();
        assert_eq!(config.max_operations, 10_000);
        assert_eq!(config.max_call_levels, 64);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let err = ScriptConfig::from_json_str(r#"{ "max_operations": "lots" }"#).unwrap_err();
        assert!(matches!(err, ScriptError::Json(_)));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = ScriptConfig::from_json_file(Path::new("/nonexistent/engine_script.json"))
            .unwrap_err();
        assert!(matches!(err, ScriptError::Io(_)));
    }

    #[test]
    fn test_max_operations_override() {
        let base = ScriptConfig::new();
        assert_eq!(
            base.clone().with_max_operations_override(Some("250")).max_operations,
            250
        );
        assert_eq!(
            base.clone().with_max_operations_override(Some("many")),
            base
        );
        assert_eq!(base.clone().with_max_operations_override(None), base);
    }

    #[test]
    fn test_operation_limit_applies_to_engine() {
        let mut engine = Engine::new();
        ScriptConfig::new().with_max_operations(100).apply(&mut engine);
        let result = engine.run("let x = 0; loop { x += 1; }");
        assert!(result.is_err());
    }
}
