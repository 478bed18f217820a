//! # engine_script
//!
//! Exposes engine value types to embedded [Rhai](rhai) scripts.
//!
//! Each type is bound through a [`TypeBinder`], which records the
//! script-facing declaration of every constructor and method in a
//! [`ScriptBindings`] table before handing the registration to Rhai. A
//! declaration registered twice is an initialisation error.
//!
//! [`ScriptRuntime`] owns a configured engine with all bindings installed:
//!
//! ```rust
//! use engine_script::{ScriptConfig, ScriptRuntime};
//!
//! let runtime = ScriptRuntime::new(ScriptConfig::default()).unwrap();
//! let text: String = runtime.eval("let t = Timer(90.0); t.format()").unwrap();
//! assert_eq!(text, "0:01:30.00");
//! ```

pub mod bindings;
pub mod config;
pub mod duration;
pub mod error;
pub mod runtime;
pub mod timer;

pub use bindings::{Binding, BindingKind, ScriptBindings, TypeBinder};
pub use config::ScriptConfig;
pub use error::ScriptError;
pub use runtime::ScriptRuntime;

// Re-export the Rhai types callers need to drive a runtime.
pub use rhai::{Dynamic, Engine, Scope};
