//! Environment capability flags, computed once at startup.

use std::rc::Rc;

use crate::error::MotionError;
use crate::host::{AnimationEngine, ScrollTriggers};

/// Process-wide motion capabilities. Read-only after construction and
/// passed by reference into every component constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct MotionFlags {
    /// The user asked for reduced motion.
    pub reduced_motion: bool,
    /// A tweening engine is present.
    pub engine_available: bool,
    /// Scroll-trigger registration is present.
    pub scroll_triggers_available: bool,
}

impl MotionFlags {
    /// Flags from the three capability checks.
    #[must_use]
    pub fn detect(
        reduced_motion: bool,
        engine_available: bool,
        scroll_triggers_available: bool,
    ) -> Self {
        Self {
            reduced_motion,
            engine_available,
            scroll_triggers_available,
        }
    }

    /// Whether engine-driven effects may run at all.
    #[must_use]
    pub fn animations_enabled(&self) -> bool {
        self.engine_available && !self.reduced_motion
    }

    /// Whether scroll-scrubbed effects may run.
    #[must_use]
    pub fn scroll_effects_enabled(&self) -> bool {
        self.animations_enabled() && self.scroll_triggers_available
    }

    /// `Ok` when engine-driven effects may run.
    pub fn require_animation(&self) -> Result<(), MotionError> {
        if self.reduced_motion {
            Err(MotionError::UnsupportedEnvironment("reduced motion requested"))
        } else if !self.engine_available {
            Err(MotionError::UnsupportedEnvironment("no animation engine"))
        } else {
            Ok(())
        }
    }
}

/// Engine handle that only exists when the flags allow animation.
///
/// Components hold a `Motion` rather than the engine itself, so under
/// reduced motion there is no engine to call.
pub struct Motion<N> {
    engine: Option<Rc<dyn AnimationEngine<N>>>,
    scroll: Option<Rc<dyn ScrollTriggers<N>>>,
}

impl<N> Clone for Motion<N> {
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
            scroll: self.scroll.clone(),
        }
    }
}

impl<N> Motion<N> {
    /// Gate `engine` and `scroll` behind `flags`.
    #[must_use]
    pub fn new(
        flags: &MotionFlags,
        engine: Option<Rc<dyn AnimationEngine<N>>>,
        scroll: Option<Rc<dyn ScrollTriggers<N>>>,
    ) -> Self {
        let engine = engine.filter(|_| flags.animations_enabled());
        let scroll = scroll.filter(|_| flags.scroll_effects_enabled());
        Self { engine, scroll }
    }

    /// The engine, when animation is enabled.
    pub fn engine(&self) -> Result<&Rc<dyn AnimationEngine<N>>, MotionError> {
        self.engine
            .as_ref()
            .ok_or(MotionError::UnsupportedEnvironment("animation disabled"))
    }

    /// Engine plus scroll triggers, when scroll effects are enabled.
    pub fn scrubbed(
        &self,
    ) -> Result<(&Rc<dyn AnimationEngine<N>>, &Rc<dyn ScrollTriggers<N>>), MotionError>
    {
        let engine = self.engine()?;
        let scroll = self
            .scroll
            .as_ref()
            .ok_or(MotionError::UnsupportedEnvironment("no scroll triggers"))?;
        Ok((engine, scroll))
    }
}
