//! Scripting error types.

use rhai::EvalAltResult;

/// Errors that can occur while setting up or running scripts.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// The same declaration was registered twice for one type.
    #[error("duplicate script binding on {type_name}: {declaration}")]
    DuplicateBinding {
        type_name: &'static str,
        declaration: &'static str,
    },

    /// A script failed to parse or evaluate.
    #[error("script error: {0}")]
    Eval(String),

    /// A script or configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration JSON was malformed, or bindings could not be serialised.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<Box<EvalAltResult>> for ScriptError {
    fn from(err: Box<EvalAltResult>) -> Self {
        Self::Eval(err.to_string())
    }
}
