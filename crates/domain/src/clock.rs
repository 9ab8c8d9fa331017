use chrono::{DateTime, Utc};

/// Interval of the display refresh while a session is active.
pub const TICK_PERIOD: std::time::Duration = std::time::Duration::from_secs(1);

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Source of the recurring refresh tick.
///
/// The tick runs until the returned handle is dropped. It only signals that the view should be
/// refreshed and carries no timing information.
pub trait Ticker {
    type Handle;

    fn start(&self, period: std::time::Duration) -> Self::Handle;
}

impl Ticker for () {
    type Handle = ();

    fn start(&self, _period: std::time::Duration) -> Self::Handle {}
}
