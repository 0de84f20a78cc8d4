//! Browser bindings and the wasm entry point.
//!
//! `start` runs when the module is instantiated: it installs the panic hook
//! and console logger, detects GSAP and ScrollTrigger on `window`, and
//! installs the coordinator with default options. Pages shipping a preset
//! call `configure(toml)` afterwards to reinstall with their options.

mod gsap;
mod page;
mod scheduler;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::Element;

pub use gsap::{GsapEngine, GsapScrollTriggers};
pub use page::DomPage;
pub use scheduler::BrowserScheduler;

use crate::error::MotionError;
use crate::host::{AnimationEngine, Scheduler, ScrollTriggers};
use crate::lifecycle::{Host, LifecycleCoordinator};
use crate::options::MotionOptions;

thread_local! {
    static COORDINATOR: RefCell<Option<LifecycleCoordinator<DomPage>>> =
        const { RefCell::new(None) };
}

fn to_js(e: &MotionError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn host() -> Result<Host<DomPage>, MotionError> {
    let page = DomPage::from_window()?;
    let window = page.window().clone();
    let gsap = GsapEngine::detect(&window);
    let scroll_triggers = gsap
        .as_ref()
        .and_then(|engine| GsapScrollTriggers::detect(&window, engine))
        .map(|t| -> Rc<dyn ScrollTriggers<Element>> { Rc::new(t) });
    let engine = gsap.map(|e| -> Rc<dyn AnimationEngine<Element>> { Rc::new(e) });
    let scheduler: Rc<dyn Scheduler> = Rc::new(BrowserScheduler::new(window));
    Ok(Host {
        page: Rc::new(page),
        scheduler,
        engine,
        scroll_triggers,
    })
}

fn install(options: &MotionOptions) -> Result<(), MotionError> {
    let host = host()?;
    // Tear down any previous install first: listeners, cursor loop, triggers
    // and background loops.
    COORDINATOR.with(|slot| drop(slot.borrow_mut().take()));
    let coordinator = LifecycleCoordinator::install(&host, options);
    COORDINATOR.with(|slot| *slot.borrow_mut() = Some(coordinator));
    Ok(())
}

/// Module entry point.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("logger already initialized");
    }
    install(&MotionOptions::default()).map_err(|e| to_js(&e))
}

/// Reinstall with options parsed from a TOML preset.
#[wasm_bindgen]
pub fn configure(options_toml: &str) -> Result<(), JsValue> {
    let options = MotionOptions::from_toml_str(options_toml).map_err(|e| to_js(&e))?;
    install(&options).map_err(|e| to_js(&e))
}

/// JSON schema of the options, for preset editors.
#[wasm_bindgen(js_name = optionsSchema)]
#[must_use]
pub fn options_schema() -> String {
    serde_json::to_string(&MotionOptions::json_schema()).unwrap_or_default()
}
