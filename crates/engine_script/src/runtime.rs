//! Script runtime — a configured Rhai engine with every binding installed.

use std::path::Path;
use std::sync::Arc;

use engine_time::{SteadyClock, SystemClock};
use rhai::{Dynamic, Engine, Scope};
use tracing::info;

use crate::bindings::ScriptBindings;
use crate::config::ScriptConfig;
use crate::duration::register_duration;
use crate::error::ScriptError;
use crate::timer::register_timer;

/// An embedded script engine with the engine's value types registered.
pub struct ScriptRuntime {
    engine: Engine,
    bindings: ScriptBindings,
    config: ScriptConfig,
}

impl ScriptRuntime {
    /// Create a runtime whose timers read the shared system clock.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::DuplicateBinding`] if registration fails.
    pub fn new(config: ScriptConfig) -> Result<Self, ScriptError> {
        Self::with_clock(config, SystemClock::shared())
    }

    /// Create a runtime whose timers read `clock`.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::DuplicateBinding`] if registration fails.
    pub fn with_clock(
        config: ScriptConfig,
        clock: Arc<dyn SteadyClock>,
    ) -> Result<Self, ScriptError> {
        let mut engine = Engine::new();
        config.apply(&mut engine);

        let mut bindings = ScriptBindings::new();
        register_duration(&mut engine, &mut bindings)?;
        register_timer(&mut engine, &mut bindings, clock)?;

        info!(
            bindings = bindings.len(),
            max_operations = config.max_operations,
            "script runtime ready"
        );

        Ok(Self {
            engine,
            bindings,
            config,
        })
    }

    /// Returns the registered bindings.
    #[must_use]
    pub fn bindings(&self) -> &ScriptBindings {
        &self.bindings
    }

    /// Returns the configuration the runtime was built with.
    #[must_use]
    pub fn config(&self) -> &ScriptConfig {
        &self.config
    }

    /// Returns the underlying engine.
    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Returns the underlying engine for further registration (e.g. an
    /// `on_print` handler).
    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    /// Evaluate `script` and return its value.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Eval`] if the script fails to parse or run, or
    /// its result is not a `T`.
    pub fn eval<T: Clone + 'static>(&self, script: &str) -> Result<T, ScriptError> {
        Ok(self.engine.eval::<T>(script)?)
    }

    /// Evaluate `script` against `scope`. Variables the script defines at
    /// top level remain in the scope.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Eval`] on failure.
    pub fn eval_with_scope<T: Clone + 'static>(
        &self,
        scope: &mut Scope,
        script: &str,
    ) -> Result<T, ScriptError> {
        Ok(self.engine.eval_with_scope::<T>(scope, script)?)
    }

    /// Run `script` for its side effects.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Eval`] on failure.
    pub fn run(&self, script: &str) -> Result<(), ScriptError> {
        Ok(self.engine.run(script)?)
    }

    /// Read and evaluate a script file.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Io`] if the file cannot be read, or
    /// [`ScriptError::Eval`] if the script fails.
    pub fn run_file(&self, path: &Path) -> Result<Dynamic, ScriptError> {
        let source = std::fs::read_to_string(path)?;
        info!(path = %path.display(), bytes = source.len(), "running script");
        self.eval::<Dynamic>(&source)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use engine_time::{ManualClock, Timer};

    use super::*;

    fn manual_runtime() -> (Arc<ManualClock>, ScriptRuntime) {
        let clock = Arc::new(ManualClock::new());
        let runtime = ScriptRuntime::with_clock(ScriptConfig::default(), clock.clone()).unwrap();
        (clock, runtime)
    }

    #[test]
    fn test_runtime_registers_all_types() {
        let runtime = ScriptRuntime::new(ScriptConfig::default()).unwrap();
        assert!(runtime.bindings().for_type("Timer").count() > 30);
        assert!(runtime.bindings().for_type("Duration").count() > 0);
        assert_eq!(runtime.eval::<String>("type_of(Timer())").unwrap(), "Timer");
    }

    #[test]
    fn test_timer_returned_to_host() {
        let (clock, runtime) = manual_runtime();
        let mut timer: Timer = runtime.eval("let t = Timer(4.0); t.start(); t").unwrap();
        clock.advance(Duration::from_secs(1));
        assert_eq!(timer.seconds(), 3);
        timer.pause();
        assert!(timer.is_paused());
    }

    #[test]
    fn test_scope_persists_between_calls() {
        let (clock, runtime) = manual_runtime();
        let mut scope = Scope::new();
        runtime
            .eval_with_scope::<()>(&mut scope, "let t = Timer(60.0, true);")
            .unwrap();
        clock.advance(Duration::from_secs(15));
        let text: String = runtime.eval_with_scope(&mut scope, "t.format(\"m:ss\")").unwrap();
        assert_eq!(text, "0:45");
    }

    #[test]
    fn test_script_errors_are_reported() {
        let (_, runtime) = manual_runtime();
        assert!(matches!(
            runtime.run("let t = Timer(\"soon\");"),
            Err(ScriptError::Eval(_))
        ));
        assert!(matches!(runtime.run("let = ;"), Err(ScriptError::Eval(_))));
    }

    #[test]
    fn test_config_limits_are_applied() {
        let runtime = ScriptRuntime::with_clock(
            ScriptConfig::new().with_max_operations(50),
            Arc::new(ManualClock::new()),
        )
        .unwrap();
        assert_eq!(runtime.config().max_operations, 50);
        assert!(runtime.run("for i in 0..1000 { let t = Timer(); }").is_err());
    }

    #[test]
    fn test_run_file_missing() {
        let (_, runtime) = manual_runtime();
        let err = runtime
            .run_file(Path::new("/nonexistent/script.rhai"))
            .unwrap_err();
        assert!(matches!(err, ScriptError::Io(_)));
    }
}
