//! Scroll-scrubbed word reveal.
//!
//! Each text block is split into units (runs of non-whitespace and runs of
//! whitespace), the original text is kept as the block's `aria-label`, and
//! a scroll trigger maps the block's scroll range onto a staggered timeline:
//! unit `i` starts at `i * stagger_each`, takes `duration`, and the timeline
//! coasts for `coast_delay + duration` after the last unit settles.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::MotionError;
use crate::flags::Motion;
use crate::host::{
    AnimationEngine, Page, ScrollTriggerSpec, Subscription, Targets, TweenVars,
};
use crate::options::RevealOptions;
use crate::util::color::Rgb;
use crate::util::easing::EasingFunction;

/// Attribute marking a block whose content has already been split.
pub const SPLIT_MARKER: &str = "data-reveal-split";

/// Split `text` into alternating non-whitespace and whitespace runs.
/// Concatenating the result gives back `text` exactly.
#[must_use]
pub fn split_units(text: &str) -> Vec<&str> {
    let mut units = Vec::new();
    let mut start = 0;
    let mut in_space: Option<bool> = None;
    for (i, c) in text.char_indices() {
        let space = c.is_whitespace();
        if in_space.is_some_and(|s| s != space) {
            units.push(&text[start..i]);
            start = i;
        }
        in_space = Some(space);
    }
    if start < text.len() {
        units.push(&text[start..]);
    }
    units
}

/// One split fragment and the element rendering it.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealUnit<N> {
    /// Fragment text.
    pub text: String,
    /// Inline element holding the fragment.
    pub element: N,
}

/// Split `block` into unit elements, once.
///
/// The first call records the original text as `aria-label`, replaces the
/// content with one element per unit and marks the block. Later calls
/// return the existing units unchanged.
pub fn prepare_block<P: Page>(
    page: &P,
    block: &P::Node,
    unit_class: &str,
) -> Vec<RevealUnit<P::Node>> {
    if page.attribute(block, SPLIT_MARKER).is_some() {
        let selector = format!(".{unit_class}");
        return page
            .query_all_in(block, &selector)
            .into_iter()
            .map(|element| RevealUnit {
                text: page.text_content(&element),
                element,
            })
            .collect();
    }

    let text = page.text_content(block);
    page.set_attribute(block, "aria-label", &text);
    let fragments = split_units(&text);
    let elements = page.replace_with_units(block, unit_class, &fragments);
    page.set_attribute(block, SPLIT_MARKER, "");
    fragments
        .into_iter()
        .zip(elements)
        .map(|(text, element)| RevealUnit {
            text: text.to_owned(),
            element,
        })
        .collect()
}

/// Timeline geometry of one block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealSchedule {
    count: usize,
    duration: f32,
    each: f32,
    coast: f32,
    ease: EasingFunction,
}

impl RevealSchedule {
    /// Schedule for `count` units.
    #[must_use]
    pub fn new(count: usize, options: &RevealOptions) -> Self {
        let duration = options.duration.max(f32::EPSILON);
        Self {
            count,
            duration,
            each: options.stagger_each.max(0.0),
            coast: options.coast_delay.max(0.0) + duration,
            ease: options.ease,
        }
    }

    /// Timeline length in seconds-equivalent units.
    #[must_use]
    pub fn total(&self) -> f32 {
        if self.count == 0 {
            return 0.0;
        }
        self.duration + self.each * (self.count - 1) as f32 + self.coast
    }

    /// Eased progress (0..=1) of unit `index` at scrub value `scrub`.
    #[must_use]
    pub fn unit_progress(&self, index: usize, scrub: f32) -> f32 {
        let t = scrub.clamp(0.0, 1.0) * self.total();
        let local = (t - index as f32 * self.each) / self.duration;
        self.ease.evaluate(local)
    }
}

/// Presentation of one unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitStyle {
    /// Text color.
    pub color: Rgb,
    /// Opacity.
    pub opacity: f32,
    /// Vertical offset as a percentage of the unit's height.
    pub y_percent: f32,
    /// Uniform scale.
    pub scale: f32,
}

impl UnitStyle {
    /// Blend toward `other`.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        let mix = |a: f32, b: f32| a * (1.0 - t) + b * t;
        Self {
            color: self.color.lerp(other.color, t),
            opacity: mix(self.opacity, other.opacity),
            y_percent: mix(self.y_percent, other.y_percent),
            scale: mix(self.scale, other.scale),
        }
    }

    /// Engine vars applying this style.
    #[must_use]
    pub fn to_vars(&self) -> TweenVars {
        TweenVars::default()
            .with("color", self.color.to_string())
            .with("opacity", self.opacity)
            .with("yPercent", self.y_percent)
            .with("scale", self.scale)
    }
}

/// Start and end styles of the reveal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealStyle {
    /// Muted, offset, slightly shrunk.
    pub hidden: UnitStyle,
    /// Full contrast, in place.
    pub revealed: UnitStyle,
}

impl RevealStyle {
    /// Styles from options; unparseable colors fall back to gray/white.
    #[must_use]
    pub fn from_options(options: &RevealOptions) -> Self {
        let muted = Rgb::parse_hex(&options.muted_color).unwrap_or_else(|| {
            log::warn!("invalid muted color {:?}", options.muted_color);
            Rgb([0x9a, 0xa0, 0xa6])
        });
        let revealed = Rgb::parse_hex(&options.revealed_color).unwrap_or_else(|| {
            log::warn!("invalid revealed color {:?}", options.revealed_color);
            Rgb::WHITE
        });
        Self {
            hidden: UnitStyle {
                color: muted,
                opacity: options.initial_opacity,
                y_percent: options.initial_y_percent,
                scale: options.initial_scale,
            },
            revealed: UnitStyle {
                color: revealed,
                opacity: 1.0,
                y_percent: 0.0,
                scale: 1.0,
            },
        }
    }

    /// Style at eased progress `t`.
    #[must_use]
    pub fn at(&self, t: f32) -> UnitStyle {
        self.hidden.lerp(&self.revealed, t)
    }
}

/// Units of one block plus the last progress applied to each.
pub struct RevealBlock<N> {
    units: Vec<RevealUnit<N>>,
    schedule: RevealSchedule,
    style: RevealStyle,
    applied: Vec<f32>,
}

impl<N: Clone> RevealBlock<N> {
    fn new(units: Vec<RevealUnit<N>>, options: &RevealOptions) -> Self {
        let schedule = RevealSchedule::new(units.len(), options);
        let applied = vec![0.0; units.len()];
        Self {
            units,
            schedule,
            style: RevealStyle::from_options(options),
            applied,
        }
    }

    /// Put every unit in its hidden style with one engine call.
    fn reset(&mut self, engine: &dyn AnimationEngine<N>) {
        if self.units.is_empty() {
            return;
        }
        let nodes = self.units.iter().map(|u| u.element.clone()).collect();
        engine.set(&Targets::Nodes(nodes), &self.style.at(0.0).to_vars());
        self.applied.iter_mut().for_each(|t| *t = 0.0);
    }

    /// Apply scrub value `scrub`, touching only units whose progress changed.
    fn apply(&mut self, scrub: f32, engine: &dyn AnimationEngine<N>) {
        for (i, unit) in self.units.iter().enumerate() {
            let t = self.schedule.unit_progress(i, scrub);
            if self.applied[i] == t {
                continue;
            }
            self.applied[i] = t;
            engine.set(&Targets::node(unit.element.clone()), &self.style.at(t).to_vars());
        }
    }

    /// The block's units, in source order.
    #[must_use]
    pub fn units(&self) -> &[RevealUnit<N>] {
        &self.units
    }
}

/// Owns every revealed block and its scroll trigger. Dropping it kills the
/// triggers.
pub struct RevealAnimator<P: Page> {
    blocks: Vec<Rc<RefCell<RevealBlock<P::Node>>>>,
    triggers: Vec<Subscription>,
}

impl<P: Page + 'static> RevealAnimator<P> {
    /// Split every block matching `selector` and bind its scroll trigger.
    ///
    /// Fails without touching the page when scroll effects are disabled, so
    /// the blocks keep their static, fully visible text.
    pub fn install(
        page: &P,
        motion: &Motion<P::Node>,
        selector: &str,
        options: &RevealOptions,
    ) -> Result<Self, MotionError> {
        let (engine, triggers) = motion.scrubbed()?;
        let spec = ScrollTriggerSpec {
            start: options.start.clone(),
            end: options.end.clone(),
            scrub: true,
        };

        let mut blocks = Vec::new();
        let mut handles = Vec::new();
        for node in page.query_all(selector) {
            let units = prepare_block(page, &node, &options.unit_class);
            let block = Rc::new(RefCell::new(RevealBlock::new(units, options)));
            block.borrow_mut().reset(&**engine);

            let target = Rc::clone(&block);
            let engine = Rc::clone(engine);
            handles.push(triggers.register(
                &node,
                &spec,
                Box::new(move |progress| {
                    target.borrow_mut().apply(progress, &*engine);
                }),
            ));
            blocks.push(block);
        }
        log::debug!("word reveal bound to {} block(s)", blocks.len());
        Ok(Self {
            blocks,
            triggers: handles,
        })
    }

    /// Number of bound blocks.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Number of scroll triggers held.
    #[must_use]
    pub fn trigger_count(&self) -> usize {
        self.triggers.len()
    }

    /// Unit texts of block `index`, in order.
    #[must_use]
    pub fn unit_texts(&self, index: usize) -> Vec<String> {
        self.blocks
            .get(index)
            .map(|b| b.borrow().units().iter().map(|u| u.text.clone()).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::MotionFlags;
    use crate::host::headless::{
        EngineCall, MemoryPage, NodeId, RecordingEngine, RecordingScrollTriggers,
    };
    use crate::host::ScrollTriggers;

    #[test]
    fn split_preserves_interior_whitespace() {
        let units = split_units("Hello   world");
        assert_eq!(units, vec!["Hello", "   ", "world"]);
        assert_eq!(units.concat(), "Hello   world");
    }

    #[test]
    fn split_handles_edges_and_unicode() {
        for text in ["", " ", "  lead", "trail \n", "a\tb  c", "héllo wörld ", "x"] {
            assert_eq!(split_units(text).concat(), text, "{text:?}");
        }
        assert_eq!(split_units("  lead"), vec!["  ", "lead"]);
        assert!(split_units("").is_empty());
    }

    #[test]
    fn prepare_block_sets_label_and_units() {
        let page = MemoryPage::new();
        let block = page.append(None, "p.reveal-words");
        page.set_text(block, "Hello   world");

        let units = prepare_block(&page, &block, "word");
        let texts: Vec<_> = units.iter().map(|u| u.text.as_str()).collect();
        assert_eq!(texts, vec!["Hello", "   ", "world"]);
        assert_eq!(page.attribute(&block, "aria-label").as_deref(), Some("Hello   world"));
        assert_eq!(page.text_content(&block), "Hello   world");
        assert_eq!(page.children(block).len(), 3);
    }

    #[test]
    fn prepare_block_is_idempotent() {
        let page = MemoryPage::new();
        let block = page.append(None, "p.reveal-words");
        page.set_text(block, "one two");
        let first = prepare_block(&page, &block, "word");
        let second = prepare_block(&page, &block, "word");
        assert_eq!(first, second);
        assert_eq!(page.children(block).len(), 3);
    }

    #[test]
    fn schedule_total_and_endpoints() {
        let opts = RevealOptions::default();
        let schedule = RevealSchedule::new(11, &opts);
        // 0.35 + 10 * 0.01 + 0.15 + 0.35
        assert!((schedule.total() - 0.95).abs() < 1e-6);
        for i in 0..11 {
            assert_eq!(schedule.unit_progress(i, 0.0), 0.0);
            assert!((schedule.unit_progress(i, 1.0) - 1.0).abs() < 1e-6);
        }
        assert_eq!(RevealSchedule::new(0, &opts).total(), 0.0);
    }

    #[test]
    fn schedule_staggers_in_source_order() {
        let schedule = RevealSchedule::new(20, &RevealOptions::default());
        let progress: Vec<f32> =
            (0..20).map(|i| schedule.unit_progress(i, 0.2)).collect();
        assert!(progress[0] > 0.0);
        for pair in progress.windows(2) {
            assert!(pair[0] >= pair[1], "{pair:?}");
        }
        assert!(progress[0] > progress[19]);
    }

    #[test]
    fn schedule_holds_revealed_state_during_coast() {
        let schedule = RevealSchedule::new(3, &RevealOptions::default());
        // Last unit settles at 0.35 + 0.02 = 0.37 of 0.87.
        let settled = 0.37 / schedule.total();
        assert!((schedule.unit_progress(2, settled + 0.01) - 1.0).abs() < 1e-6);
        assert!((schedule.unit_progress(2, 0.9) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn style_endpoints_match_options() {
        let style = RevealStyle::from_options(&RevealOptions::default());
        let start = style.at(0.0);
        assert_eq!(start.color.to_string(), "#9aa0a6");
        assert_eq!(start.opacity, 0.35);
        assert_eq!(start.y_percent, 25.0);
        assert_eq!(start.scale, 0.98);
        let end = style.at(1.0);
        assert_eq!(end.color, Rgb::WHITE);
        assert_eq!(end.opacity, 1.0);
        assert_eq!(end.y_percent, 0.0);
        assert_eq!(end.scale, 1.0);
    }

    struct Fixture {
        page: MemoryPage,
        engine: Rc<RecordingEngine<NodeId>>,
        triggers: Rc<RecordingScrollTriggers<NodeId>>,
        block: NodeId,
    }

    fn fixture() -> Fixture {
        let page = MemoryPage::new();
        let block = page.append(None, "p.reveal-words");
        page.set_text(block, "Hello   world");
        Fixture {
            page,
            engine: Rc::new(RecordingEngine::new()),
            triggers: Rc::new(RecordingScrollTriggers::new()),
            block,
        }
    }

    fn motion(f: &Fixture, flags: &MotionFlags) -> Motion<NodeId> {
        let engine: Rc<dyn AnimationEngine<NodeId>> = f.engine.clone();
        let triggers: Rc<dyn ScrollTriggers<NodeId>> = f.triggers.clone();
        Motion::new(flags, Some(engine), Some(triggers))
    }

    #[test]
    fn install_binds_trigger_and_sets_initial_state() {
        let f = fixture();
        let flags = MotionFlags::detect(false, true, true);
        let reveal = RevealAnimator::install(
            &f.page,
            &motion(&f, &flags),
            ".reveal-words",
            &RevealOptions::default(),
        )
        .unwrap();

        assert_eq!(reveal.block_count(), 1);
        assert_eq!(reveal.unit_texts(0).concat(), "Hello   world");
        let (trigger, spec) = f.triggers.registration(0).unwrap();
        assert_eq!(trigger, f.block);
        assert_eq!(spec.start, "top 80%");
        assert_eq!(spec.end, "bottom top");
        assert!(spec.scrub);

        let calls = f.engine.take_calls();
        assert_eq!(calls.len(), 1);
        let EngineCall::Set(Targets::Nodes(nodes), vars) = &calls[0] else {
            panic!("expected a grouped set, got {calls:?}");
        };
        assert_eq!(nodes.len(), 3);
        assert_eq!(vars.text("color"), Some("#9aa0a6"));
    }

    #[test]
    fn scrub_updates_only_changed_units() {
        let f = fixture();
        let flags = MotionFlags::detect(false, true, true);
        let _reveal = RevealAnimator::install(
            &f.page,
            &motion(&f, &flags),
            ".reveal-words",
            &RevealOptions::default(),
        )
        .unwrap();
        let _ = f.engine.take_calls();

        assert!(f.triggers.scrub(0, 1.0));
        let calls = f.engine.take_calls();
        assert_eq!(calls.len(), 3);
        for call in &calls {
            let EngineCall::Set(_, vars) = call else {
                panic!("unexpected call {call:?}");
            };
            assert_eq!(vars.text("color"), Some("#ffffff"));
            assert_eq!(vars.number("opacity"), Some(1.0));
        }

        // Same scrub value again: nothing changed, nothing sent.
        assert!(f.triggers.scrub(0, 1.0));
        assert!(f.engine.take_calls().is_empty());

        // Scrolling back is fully reversible.
        assert!(f.triggers.scrub(0, 0.0));
        assert_eq!(f.engine.take_calls().len(), 3);
    }

    #[test]
    fn dropping_the_animator_kills_its_triggers() {
        let f = fixture();
        let flags = MotionFlags::detect(false, true, true);
        let reveal = RevealAnimator::install(
            &f.page,
            &motion(&f, &flags),
            ".reveal-words",
            &RevealOptions::default(),
        )
        .unwrap();
        assert_eq!(reveal.trigger_count(), 1);
        assert_eq!(f.triggers.live_count(), 1);
        let _ = f.engine.take_calls();

        drop(reveal);
        assert_eq!(f.triggers.live_count(), 0);
        assert!(!f.triggers.scrub(0, 1.0));
        assert_eq!(f.engine.call_count(), 0);
    }

    #[test]
    fn disabled_reveal_leaves_text_untouched() {
        for flags in [
            MotionFlags::detect(true, true, true),
            MotionFlags::detect(false, false, true),
            MotionFlags::detect(false, true, false),
        ] {
            let f = fixture();
            let result = RevealAnimator::install(
                &f.page,
                &motion(&f, &flags),
                ".reveal-words",
                &RevealOptions::default(),
            );
            assert!(result.is_err());
            assert!(f.page.children(f.block).is_empty());
            assert_eq!(f.page.attribute(&f.block, "aria-label"), None);
            assert_eq!(f.engine.call_count(), 0);
            assert!(f.triggers.is_empty());
        }
    }
}
