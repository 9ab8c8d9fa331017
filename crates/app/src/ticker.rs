use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
    time::Duration,
};

use fitlog_domain::Ticker;
use log::debug;

/// Calls a refresh callback from a background thread until the returned handle is dropped.
#[derive(Clone)]
pub struct ThreadTicker {
    on_tick: Arc<dyn Fn() + Send + Sync>,
}

impl ThreadTicker {
    pub fn new(on_tick: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            on_tick: Arc::new(on_tick),
        }
    }
}

impl Ticker for ThreadTicker {
    type Handle = TickHandle;

    fn start(&self, period: Duration) -> TickHandle {
        let running = Arc::new(AtomicBool::new(true));
        let on_tick = self.on_tick.clone();
        let thread_running = running.clone();
        thread::spawn(move || {
            loop {
                thread::sleep(period);
                if !thread_running.load(Ordering::Acquire) {
                    break;
                }
                on_tick();
            }
            debug!("tick stopped");
        });
        TickHandle { running }
    }
}

pub struct TickHandle {
    running: Arc<AtomicBool>,
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
    }
}
