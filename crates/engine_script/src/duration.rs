//! `Duration` script type.

use std::time::Duration;

use engine_time::{duration_from_secs_f64, duration_from_secs_i64, format_duration};
use rhai::{Engine, ImmutableString};

use crate::bindings::{ScriptBindings, TypeBinder};
use crate::error::ScriptError;

/// Script-side name of [`std::time::Duration`].
pub const TYPE_NAME: &str = "Duration";

/// Register the `Duration` type.
///
/// # Errors
///
/// Returns [`ScriptError::DuplicateBinding`] if `Duration` is already bound
/// in `bindings`.
pub fn register_duration(
    engine: &mut Engine,
    bindings: &mut ScriptBindings,
) -> Result<(), ScriptError> {
    engine.register_type_with_name::<Duration>(TYPE_NAME);
    let mut binder = TypeBinder::new(engine, bindings, TYPE_NAME);

    binder
        .constructor("Duration(float seconds)")?
        .register_fn("Duration", duration_from_secs_f64);
    binder
        .constructor("Duration(int seconds)")?
        .register_fn("Duration", duration_from_secs_i64);

    binder
        .method("float count()")?
        .register_fn("count", |d: &mut Duration| d.as_secs_f64());
    binder
        .method("String format(String pattern)")?
        .register_fn("format", |d: &mut Duration, pattern: ImmutableString| {
            format_duration(*d, pattern.as_str())
        });
    binder
        .method("String to_string()")?
        .register_fn("to_string", |d: &mut Duration| format!("{}s", d.as_secs_f64()));

    Ok(())
}
