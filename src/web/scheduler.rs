//! `requestAnimationFrame` / `setTimeout` scheduler.

use std::time::Duration;

use wasm_bindgen::prelude::*;
use web_sys::Window;

use crate::host::{Callback, Scheduler};

/// Frames and timers from the browser event loop.
pub struct BrowserScheduler {
    window: Window,
}

impl BrowserScheduler {
    /// Scheduler bound to `window`.
    #[must_use]
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Scheduler for BrowserScheduler {
    fn request_frame(&self, callback: Callback) {
        let f = Closure::once_into_js(move || callback());
        if let Err(e) = self.window.request_animation_frame(f.unchecked_ref()) {
            log::debug!("requestAnimationFrame failed: {e:?}");
        }
    }

    fn set_timeout(&self, delay: Duration, callback: Callback) {
        let f = Closure::once_into_js(move || callback());
        let ms = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        if let Err(e) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(f.unchecked_ref(), ms)
        {
            log::debug!("setTimeout failed: {e:?}");
        }
    }
}
