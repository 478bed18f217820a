//! Binding bookkeeping.
//!
//! Rhai accepts any number of registrations under the same name and resolves
//! calls by argument types. The engine keeps its own table of script-facing
//! declarations on top of that, so that accidental double registration is
//! caught at start-up and the bound surface can be listed.

use std::collections::HashSet;

use rhai::Engine;
use serde::Serialize;
use tracing::debug;

use crate::error::ScriptError;

/// What a binding creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingKind {
    /// A function named after the type that returns a new value.
    Constructor,
    /// A function whose first argument is the value, callable as `v.name()`.
    Method,
}

/// One registered script-facing declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Binding {
    /// The script type the binding belongs to (e.g. `"Timer"`).
    pub type_name: &'static str,
    pub kind: BindingKind,
    /// Script-side signature, e.g. `"int d()"`.
    pub declaration: &'static str,
}

/// Every declaration registered with a runtime, in registration order.
#[derive(Debug, Clone, Default)]
pub struct ScriptBindings {
    entries: Vec<Binding>,
    seen: HashSet<(&'static str, &'static str)>,
}

impl ScriptBindings {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a binding.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::DuplicateBinding`] if the same declaration is
    /// already recorded for the type.
    pub fn record(&mut self, binding: Binding) -> Result<(), ScriptError> {
        if !self.seen.insert((binding.type_name, binding.declaration)) {
            return Err(ScriptError::DuplicateBinding {
                type_name: binding.type_name,
                declaration: binding.declaration,
            });
        }
        self.entries.push(binding);
        Ok(())
    }

    /// Returns `true` if `declaration` is bound on `type_name`.
    #[must_use]
    pub fn contains(&self, type_name: &str, declaration: &str) -> bool {
        self.entries
            .iter()
            .any(|b| b.type_name == type_name && b.declaration == declaration)
    }

    /// Returns an iterator over all bindings.
    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.entries.iter()
    }

    /// Returns an iterator over the bindings of one type.
    pub fn for_type<'a>(&'a self, type_name: &'a str) -> impl Iterator<Item = &'a Binding> {
        self.entries.iter().filter(move |b| b.type_name == type_name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialise the table as a pretty-printed JSON array.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Json`] if serialisation fails.
    pub fn to_json(&self) -> Result<String, ScriptError> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }
}

/// Registers the constructors and methods of one script type.
///
/// Each call records the declaration and then yields the engine so the
/// native function can be registered on the same line:
///
/// ```rust
/// use engine_script::{Engine, ScriptBindings, TypeBinder};
///
/// #[derive(Debug, Clone)]
/// struct Counter(i64);
///
/// let mut engine = Engine::new();
/// let mut bindings = ScriptBindings::new();
/// engine.register_type_with_name::<Counter>("Counter");
///
/// let mut binder = TypeBinder::new(&mut engine, &mut bindings, "Counter");
/// binder.constructor("Counter()").unwrap().register_fn("Counter", || Counter(0));
/// binder.method("int get()").unwrap().register_fn("get", |c: &mut Counter| c.0);
///
/// assert_eq!(engine.eval::<i64>("let c = Counter(); c.get()").unwrap(), 0);
/// assert_eq!(bindings.len(), 2);
/// ```
pub struct TypeBinder<'a> {
    engine: &'a mut Engine,
    bindings: &'a mut ScriptBindings,
    type_name: &'static str,
}

impl<'a> TypeBinder<'a> {
    /// Create a binder for `type_name`. The Rust type must already be
    /// registered with the engine under that name.
    pub fn new(
        engine: &'a mut Engine,
        bindings: &'a mut ScriptBindings,
        type_name: &'static str,
    ) -> Self {
        Self {
            engine,
            bindings,
            type_name,
        }
    }

    /// Declare a constructor and return the engine to register it on.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::DuplicateBinding`] if already declared.
    pub fn constructor(&mut self, declaration: &'static str) -> Result<&mut Engine, ScriptError> {
        self.declare(BindingKind::Constructor, declaration)
    }

    /// Declare a method and return the engine to register it on.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::DuplicateBinding`] if already declared.
    pub fn method(&mut self, declaration: &'static str) -> Result<&mut Engine, ScriptError> {
        self.declare(BindingKind::Method, declaration)
    }

    fn declare(
        &mut self,
        kind: BindingKind,
        declaration: &'static str,
    ) -> Result<&mut Engine, ScriptError> {
        self.bindings.record(Binding {
            type_name: self.type_name,
            kind,
            declaration,
        })?;
        debug!(
            type_name = self.type_name,
            ?kind,
            declaration,
            "registered script binding"
        );
        Ok(&mut *self.engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binding(type_name: &'static str, declaration: &'static str) -> Binding {
        Binding {
            type_name,
            kind: BindingKind::Method,
            declaration,
        }
    }

    #[test]
    fn test_record_and_lookup() {
        let mut bindings = ScriptBindings::new();
        bindings.record(binding("Timer", "int s()")).unwrap();
        bindings.record(binding("Duration", "float count()")).unwrap();
        assert_eq!(bindings.len(), 2);
        assert!(bindings.contains("Timer", "int s()"));
        assert!(!bindings.contains("Duration", "int s()"));
        assert_eq!(bindings.for_type("Timer").count(), 1);
    }

    #[test]
    fn test_duplicate_declaration_rejected() {
        let mut bindings = ScriptBindings::new();
        bindings.record(binding("Timer", "void start()")).unwrap();
        let err = bindings.record(binding("Timer", "void start()")).unwrap_err();
        assert!(matches!(
            err,
            ScriptError::DuplicateBinding {
                type_name: "Timer",
                declaration: "void start()"
            }
        ));
        assert_eq!(bindings.len(), 1);
    }

    #[test]
    fn test_same_declaration_on_different_types() {
        let mut bindings = ScriptBindings::new();
        bindings.record(binding("Timer", "String to_string()")).unwrap();
        bindings.record(binding("Duration", "String to_string()")).unwrap();
        assert_eq!(bindings.len(), 2);
    }

    #[test]
    fn test_to_json_lists_entries() {
        let mut bindings = ScriptBindings::new();
        bindings.record(binding("Timer", "int s()")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&bindings.to_json().unwrap()).unwrap();
        assert_eq!(json[0]["type_name"], "Timer");
        assert_eq!(json[0]["kind"], "method");
        assert_eq!(json[0]["declaration"], "int s()");
    }

    #[test]
    fn test_binder_registers_with_engine() {
        let mut engine = Engine::new();
        let mut bindings = ScriptBindings::new();
        let mut binder = TypeBinder::new(&mut engine, &mut bindings, "Answer");
        binder
            .constructor("int answer()")
            .unwrap()
            .register_fn("answer", || 42_i64);
        assert!(binder.constructor("int answer()").is_err());

        assert_eq!(engine.eval::<i64>("answer()").unwrap(), 42);
        assert_eq!(bindings.len(), 1);
    }
}
