//! GSAP engine and ScrollTrigger bridge.
//!
//! Tween vars cross into JS as JSON: `TweenVars` serializes to the flat
//! object GSAP expects and `JSON.parse` turns it into a plain JS object.

use js_sys::{Array, Function, Reflect, JSON};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Window};

use crate::error::MotionError;
use crate::host::{
    AnimationEngine, ScrollTriggerSpec, ScrollTriggers, Subscription, Targets, TweenVars,
};

fn js_error(e: &JsValue) -> MotionError {
    MotionError::Js(format!("{e:?}"))
}

fn global(window: &Window, name: &str) -> Option<JsValue> {
    Reflect::get(window, &JsValue::from_str(name))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, MotionError> {
    let json = serde_json::to_string(value).map_err(|e| MotionError::Js(e.to_string()))?;
    JSON::parse(&json).map_err(|e| js_error(&e))
}

fn method(object: &JsValue, name: &str) -> Result<Function, MotionError> {
    Reflect::get(object, &JsValue::from_str(name))
        .map_err(|e| js_error(&e))?
        .dyn_into::<Function>()
        .map_err(|_| MotionError::Js(format!("{name} is not a function")))
}

fn targets_to_js(targets: &Targets<Element>) -> JsValue {
    match targets {
        Targets::Selector(s) => JsValue::from_str(s),
        Targets::Nodes(nodes) => nodes.iter().collect::<Array>().into(),
    }
}

/// The page's `window.gsap`.
pub struct GsapEngine {
    gsap: JsValue,
}

impl GsapEngine {
    /// Engine for `window.gsap`, when the page loaded it.
    #[must_use]
    pub fn detect(window: &Window) -> Option<Self> {
        global(window, "gsap").map(|gsap| Self { gsap })
    }

    fn call(&self, name: &str, args: &[&JsValue]) -> Result<(), MotionError> {
        let f = method(&self.gsap, name)?;
        let args: Array = args.iter().copied().collect();
        let _ = f.apply(&self.gsap, &args).map_err(|e| js_error(&e))?;
        Ok(())
    }

    fn global_timeline(&self, action: &str) -> Result<(), MotionError> {
        let timeline = Reflect::get(&self.gsap, &JsValue::from_str("globalTimeline"))
            .map_err(|e| js_error(&e))?;
        let _ = method(&timeline, action)?
            .call0(&timeline)
            .map_err(|e| js_error(&e))?;
        Ok(())
    }

    fn report(what: &str, result: Result<(), MotionError>) {
        if let Err(e) = result {
            log::debug!("gsap.{what} failed: {e}");
        }
    }
}

impl AnimationEngine<Element> for GsapEngine {
    fn set(&self, targets: &Targets<Element>, vars: &TweenVars) {
        let result = to_js(vars).and_then(|v| self.call("set", &[&targets_to_js(targets), &v]));
        Self::report("set", result);
    }

    fn animate_to(&self, targets: &Targets<Element>, vars: &TweenVars) {
        let result = to_js(vars).and_then(|v| self.call("to", &[&targets_to_js(targets), &v]));
        Self::report("to", result);
    }

    fn animate_from_to(&self, targets: &Targets<Element>, from: &TweenVars, to: &TweenVars) {
        let result = to_js(from).and_then(|from| {
            let to = to_js(to)?;
            self.call("fromTo", &[&targets_to_js(targets), &from, &to])
        });
        Self::report("fromTo", result);
    }

    fn pause_all(&self) {
        Self::report("globalTimeline.pause", self.global_timeline("pause"));
    }

    fn resume_all(&self) {
        Self::report("globalTimeline.play", self.global_timeline("play"));
    }

    fn kill_tweens_of(&self, targets: &Targets<Element>) {
        let result = self.call("killTweensOf", &[&targets_to_js(targets)]);
        Self::report("killTweensOf", result);
    }
}

/// The page's `window.ScrollTrigger`, registered as a GSAP plugin.
pub struct GsapScrollTriggers {
    plugin: JsValue,
}

impl GsapScrollTriggers {
    /// Register `window.ScrollTrigger` with `engine`, when the page loaded it.
    pub fn detect(window: &Window, engine: &GsapEngine) -> Option<Self> {
        let plugin = global(window, "ScrollTrigger")?;
        if let Err(e) = engine.call("registerPlugin", &[&plugin]) {
            log::debug!("ScrollTrigger registration failed: {e}");
            return None;
        }
        Some(Self { plugin })
    }

    fn create(
        &self,
        trigger: &Element,
        spec: &ScrollTriggerSpec,
        on_update: Box<dyn FnMut(f32)>,
    ) -> Result<Subscription, MotionError> {
        let config = to_js(&serde_json::json!({
            "start": spec.start,
            "end": spec.end,
            "scrub": spec.scrub,
            "invalidateOnRefresh": true,
        }))?;
        let _ = Reflect::set(&config, &"trigger".into(), trigger).map_err(|e| js_error(&e))?;

        let mut on_update = on_update;
        let callback = Closure::<dyn FnMut(JsValue)>::new(move |instance: JsValue| {
            let progress = Reflect::get(&instance, &"progress".into())
                .ok()
                .and_then(|p| p.as_f64())
                .unwrap_or(0.0);
            on_update(progress as f32);
        });
        let _ = Reflect::set(&config, &"onUpdate".into(), callback.as_ref())
            .map_err(|e| js_error(&e))?;

        let instance = method(&self.plugin, "create")?
            .call1(&self.plugin, &config)
            .map_err(|e| js_error(&e))?;
        // The closure lives until the trigger is killed.
        Ok(Subscription::new(move || {
            let killed = method(&instance, "kill")
                .and_then(|kill| kill.call0(&instance).map_err(|e| js_error(&e)));
            if let Err(e) = killed {
                log::debug!("ScrollTrigger.kill failed: {e}");
            }
            drop(callback);
        }))
    }
}

impl ScrollTriggers<Element> for GsapScrollTriggers {
    fn register(
        &self,
        trigger: &Element,
        spec: &ScrollTriggerSpec,
        on_update: Box<dyn FnMut(f32)>,
    ) -> Subscription {
        self.create(trigger, spec, on_update).unwrap_or_else(|e| {
            log::debug!("ScrollTrigger.create failed: {e}");
            Subscription::inert()
        })
    }
}
