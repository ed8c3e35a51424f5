//! `TimerDriver` over `gloo-timers` callbacks.

use std::time::Duration;

use gloo_timers::callback::{Interval, Timeout};

use crate::controller::env::{TimerDriver, TimerHandle};

pub struct WebTimers;

impl TimerDriver for WebTimers {
    fn interval(&self, period: Duration, tick: Box<dyn FnMut()>) -> TimerHandle {
        let interval = Interval::new(period.as_millis() as u32, tick);
        TimerHandle::new(move || interval.cancel())
    }

    fn timeout(&self, delay: Duration, fire: Box<dyn FnOnce()>) -> TimerHandle {
        let timeout = Timeout::new(delay.as_millis() as u32, fire);
        TimerHandle::new(move || timeout.cancel())
    }
}
