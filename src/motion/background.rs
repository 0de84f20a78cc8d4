//! Ambient background loops.

use std::rc::Rc;

use crate::error::MotionError;
use crate::flags::Motion;
use crate::host::{AnimationEngine, Targets, TweenVars};
use crate::options::{AmbientTween, BackgroundOptions};

fn vars(tween: &AmbientTween) -> TweenVars {
    TweenVars::props(tween.to.clone())
        .duration(tween.duration)
        .ease(tween.ease)
        .forever(tween.yoyo)
}

/// The running background loops. Dropping it kills their tweens.
pub struct BackgroundLoops<N> {
    engine: Rc<dyn AnimationEngine<N>>,
    targets: Vec<Targets<N>>,
}

impl<N> BackgroundLoops<N> {
    /// Number of loops started.
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether no loop was configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl<N> Drop for BackgroundLoops<N> {
    fn drop(&mut self) {
        for targets in &self.targets {
            self.engine.kill_tweens_of(targets);
        }
        log::debug!("stopped {} background loop(s)", self.targets.len());
    }
}

/// Start every configured background loop.
pub fn start_background<N>(
    motion: &Motion<N>,
    options: &BackgroundOptions,
) -> Result<BackgroundLoops<N>, MotionError> {
    let engine = motion.engine()?;
    let mut targets = Vec::with_capacity(options.tweens.len());
    for tween in &options.tweens {
        let target = Targets::Selector(tween.selector.clone());
        let to = vars(tween);
        match &tween.from {
            Some(from) => {
                engine.animate_from_to(&target, &TweenVars::props(from.clone()), &to);
            }
            None => engine.animate_to(&target, &to),
        }
        targets.push(target);
    }
    log::debug!("started {} background loop(s)", targets.len());
    Ok(BackgroundLoops {
        engine: Rc::clone(engine),
        targets,
    })
}
