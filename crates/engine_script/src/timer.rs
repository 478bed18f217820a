//! `Timer` script type.
//!
//! Default arguments of the native constructors become overloads: `Timer()`,
//! `Timer(2.5)`, and `Timer(2.5, true)` all resolve. Script values are
//! dropped by the runtime, so no destructor is registered.

use std::sync::Arc;
use std::time::Duration;

use engine_time::{
    DEFAULT_TIMER_FORMAT, SteadyClock, Timer, duration_from_secs_f64, duration_from_secs_i64,
};
use rhai::{Engine, ImmutableString};

use crate::bindings::{ScriptBindings, TypeBinder};
use crate::error::ScriptError;

/// Script-side name of [`Timer`].
pub const TYPE_NAME: &str = "Timer";

/// Builds timers on the clock the runtime was configured with.
#[derive(Debug, Clone)]
struct TimerFactory {
    clock: Arc<dyn SteadyClock>,
}

impl TimerFactory {
    fn create(&self, duration: Duration, start_immediately: bool) -> Timer {
        Timer::with_clock(duration, start_immediately, Arc::clone(&self.clock))
    }
}

/// Register the `Timer` type. Timers created by scripts read `clock`.
///
/// `Duration` should be registered first so that `duration()` and
/// `remaining()` results carry a readable type name.
///
/// # Errors
///
/// Returns [`ScriptError::DuplicateBinding`] if `Timer` is already bound in
/// `bindings`.
pub fn register_timer(
    engine: &mut Engine,
    bindings: &mut ScriptBindings,
    clock: Arc<dyn SteadyClock>,
) -> Result<(), ScriptError> {
    engine.register_type_with_name::<Timer>(TYPE_NAME);
    let mut b = TypeBinder::new(engine, bindings, TYPE_NAME);
    let factory = TimerFactory { clock };

    let f = factory.clone();
    b.constructor("Timer()")?
        .register_fn("Timer", move || f.create(Duration::ZERO, false));
    let f = factory.clone();
    b.constructor("Timer(float timeSec)")?
        .register_fn("Timer", move |sec: f64| f.create(duration_from_secs_f64(sec), false));
    let f = factory.clone();
    b.constructor("Timer(float timeSec, bool startImmediately)")?
        .register_fn("Timer", move |sec: f64, start: bool| {
            f.create(duration_from_secs_f64(sec), start)
        });
    let f = factory.clone();
    b.constructor("Timer(int timeSec)")?
        .register_fn("Timer", move |sec: i64| f.create(duration_from_secs_i64(sec), false));
    let f = factory.clone();
    b.constructor("Timer(int timeSec, bool startImmediately)")?
        .register_fn("Timer", move |sec: i64, start: bool| {
            f.create(duration_from_secs_i64(sec), start)
        });
    let f = factory.clone();
    b.constructor("Timer(Duration)")?
        .register_fn("Timer", move |d: Duration| f.create(d, false));
    let f = factory;
    b.constructor("Timer(Duration, bool startImmediately)")?
        .register_fn("Timer", move |d: Duration, start: bool| f.create(d, start));

    b.method("void start()")?.register_fn("start", |t: &mut Timer| t.start());

    b.method("int d()")?.register_fn("d", |t: &mut Timer| i64::from(t.days()));
    b.method("int d64()")?.register_fn("d64", |t: &mut Timer| t.days64());
    b.method("float dF()")?.register_fn("dF", |t: &mut Timer| t.days_f());

    b.method("int h()")?.register_fn("h", |t: &mut Timer| i64::from(t.hours()));
    b.method("int h64()")?.register_fn("h64", |t: &mut Timer| t.hours64());
    b.method("float hF()")?.register_fn("hF", |t: &mut Timer| t.hours_f());

    b.method("int min()")?.register_fn("min", |t: &mut Timer| i64::from(t.minutes()));
    b.method("int min64()")?.register_fn("min64", |t: &mut Timer| t.minutes64());
    b.method("float minF()")?.register_fn("minF", |t: &mut Timer| t.minutes_f());

    b.method("int s()")?.register_fn("s", |t: &mut Timer| i64::from(t.seconds()));
    b.method("int s64()")?.register_fn("s64", |t: &mut Timer| t.seconds64());
    b.method("float sF()")?.register_fn("sF", |t: &mut Timer| t.seconds_f());

    b.method("int ms()")?.register_fn("ms", |t: &mut Timer| i64::from(t.millis()));
    b.method("int ms64()")?.register_fn("ms64", |t: &mut Timer| t.millis64());
    b.method("float msF()")?.register_fn("msF", |t: &mut Timer| t.millis_f());

    b.method("int us()")?.register_fn("us", |t: &mut Timer| t.micros());
    b.method("int us64()")?.register_fn("us64", |t: &mut Timer| t.micros());
    b.method("float usF()")?.register_fn("usF", |t: &mut Timer| t.micros_f());

    b.method("Duration duration()")?
        .register_fn("duration", |t: &mut Timer| t.duration());
    b.method("Duration remaining()")?
        .register_fn("remaining", |t: &mut Timer| t.remaining());

    b.method("float progress1_0()")?
        .register_fn("progress1_0", |t: &mut Timer| t.progress1_0());
    b.method("float progress0_1()")?
        .register_fn("progress0_1", |t: &mut Timer| t.progress0_1());
    b.method("bool reachedZero()")?
        .register_fn("reachedZero", |t: &mut Timer| t.reached_zero());

    b.method("bool isStarted()")?
        .register_fn("isStarted", |t: &mut Timer| t.is_started());
    b.method("bool isPaused()")?
        .register_fn("isPaused", |t: &mut Timer| t.is_paused());
    b.method("bool isRunning()")?
        .register_fn("isRunning", |t: &mut Timer| t.is_running());

    b.method("void pause()")?.register_fn("pause", |t: &mut Timer| t.pause());
    b.method("void resume()")?.register_fn("resume", |t: &mut Timer| t.resume());
    b.method("void restart()")?.register_fn("restart", |t: &mut Timer| t.restart());
    b.method("void restart(Duration)")?
        .register_fn("restart", |t: &mut Timer, d: Duration| t.restart_with(d));

    b.method("void set(Duration)")?
        .register_fn("set", |t: &mut Timer, d: Duration| t.set(d));
    b.method("String format()")?
        .register_fn("format", |t: &mut Timer| t.format(DEFAULT_TIMER_FORMAT));
    b.method("String format(String pattern)")?
        .register_fn("format", |t: &mut Timer, pattern: ImmutableString| {
            t.format(pattern.as_str())
        });
    b.method("String to_string()")?
        .register_fn("to_string", |t: &mut Timer| t.to_string());

    Ok(())
}
