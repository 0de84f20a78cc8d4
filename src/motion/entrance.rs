//! One-shot staggered entrance of the viewer hotspots.

use std::cell::Cell;
use std::rc::Rc;

use crate::flags::Motion;
use crate::host::{Page, Targets, TweenVars};
use crate::options::EntranceOptions;

struct EntranceInner<P: Page> {
    page: Rc<P>,
    motion: Motion<P::Node>,
    viewer: P::Node,
    hotspot_selector: String,
    options: EntranceOptions,
    played: Cell<bool>,
}

/// Scales and fades in every hotspot inside one viewer, the first time the
/// viewer reports its asset loaded.
pub struct EntranceAnimator<P: Page> {
    inner: Rc<EntranceInner<P>>,
}

impl<P: Page> Clone for EntranceAnimator<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<P: Page> EntranceAnimator<P> {
    /// Entrance for hotspots matching `hotspot_selector` inside `viewer`.
    pub fn new(
        page: &Rc<P>,
        motion: &Motion<P::Node>,
        viewer: P::Node,
        hotspot_selector: &str,
        options: &EntranceOptions,
    ) -> Self {
        Self {
            inner: Rc::new(EntranceInner {
                page: Rc::clone(page),
                motion: motion.clone(),
                viewer,
                hotspot_selector: hotspot_selector.to_owned(),
                options: options.clone(),
                played: Cell::new(false),
            }),
        }
    }

    /// The viewer whose load event starts the entrance.
    #[must_use]
    pub fn viewer(&self) -> &P::Node {
        &self.inner.viewer
    }

    /// Run the entrance. Only the first call does anything.
    pub fn play(&self) {
        let inner = &self.inner;
        if inner.played.replace(true) {
            log::trace!("hotspot entrance already played");
            return;
        }
        let Ok(engine) = inner.motion.engine() else {
            return;
        };

        let opts = &inner.options;
        let hotspots = inner.page.query_all_in(&inner.viewer, &inner.hotspot_selector);
        if hotspots.is_empty() {
            log::debug!("no hotspots in the viewer");
            return;
        }
        let count = hotspots.len();
        let from = TweenVars::default()
            .with("scale", opts.from_scale)
            .with("opacity", opts.from_opacity);
        let to = TweenVars::default()
            .with("scale", 1.0)
            .with("opacity", 1.0)
            .duration(opts.duration)
            .ease(opts.ease)
            .stagger(opts.stagger);
        engine.animate_from_to(&Targets::Nodes(hotspots), &from, &to);
        log::debug!("hotspot entrance started for {count} hotspot(s)");
    }

    /// Whether [`play`](Self::play) has already run.
    #[must_use]
    pub fn has_played(&self) -> bool {
        self.inner.played.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::MotionFlags;
    use crate::host::headless::{EngineCall, MemoryPage, NodeId, RecordingEngine};
    use crate::host::{AnimationEngine, Stagger};

    type Setup = (
        Rc<MemoryPage>,
        Rc<RecordingEngine<NodeId>>,
        EntranceAnimator<MemoryPage>,
    );

    fn setup(flags: &MotionFlags) -> Setup {
        let page = Rc::new(MemoryPage::new());
        let viewer = page.append(None, "model-viewer#buds");
        for slot in ["anc", "mics", "driver"] {
            let hotspot = page.append(Some(viewer), "button.Hotspot");
            page.set_attribute(&hotspot, "data-hotspot", slot);
        }
        // Outside the viewer: never animated.
        let _ = page.append(None, "button.Hotspot");
        let engine = Rc::new(RecordingEngine::new());
        let dyn_engine: Rc<dyn AnimationEngine<NodeId>> = engine.clone();
        let motion = Motion::new(flags, Some(dyn_engine), None);
        let entrance = EntranceAnimator::new(
            &page,
            &motion,
            viewer,
            ".Hotspot",
            &EntranceOptions::default(),
        );
        (page, engine, entrance)
    }

    #[test]
    fn staggers_hotspots_in_document_order() {
        let (page, engine, entrance) = setup(&MotionFlags::detect(false, true, false));
        entrance.play();
        let calls = engine.take_calls();
        assert_eq!(calls.len(), 1);
        let EngineCall::FromTo(Targets::Nodes(nodes), from, to) = &calls[0] else {
            panic!("unexpected call {:?}", calls[0]);
        };
        let expected = page.query_all_in(entrance.viewer(), ".Hotspot");
        assert_eq!(nodes, &expected);
        assert_eq!(nodes.len(), 3);
        assert_eq!(from.number("opacity"), Some(0.0));
        assert!((from.number("scale").unwrap() - 0.6).abs() < 1e-6);
        assert_eq!(to.number("scale"), Some(1.0));
        assert_eq!(to.duration, Some(0.5));
        assert_eq!(to.stagger, Some(Stagger { each: 0.12 }));
    }

    #[test]
    fn plays_at_most_once() {
        let (_page, engine, entrance) = setup(&MotionFlags::detect(false, true, true));
        entrance.play();
        entrance.play();
        entrance.clone().play();
        assert!(entrance.has_played());
        assert_eq!(engine.call_count(), 1);
    }

    #[test]
    fn no_engine_calls_under_reduced_motion() {
        let (_page, engine, entrance) = setup(&MotionFlags::detect(true, true, true));
        entrance.play();
        assert_eq!(engine.call_count(), 0);
    }
}
