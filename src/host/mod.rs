//! Platform seams between the motion components and the page.
//!
//! The components never call a browser API directly. They talk to four
//! traits:
//!
//! - [`Page`] - DOM queries, geometry, styles, classes, attributes and
//!   listener registration
//! - [`Scheduler`] - "before next repaint" frames and fixed-delay timers
//! - [`AnimationEngine`] - the external tweening engine
//! - [`ScrollTriggers`] - scroll-position scrub registration
//!
//! The `headless` module (tests, or the `headless` feature) implements all
//! of them in memory; the `web` feature implements them over `web_sys`.

#[cfg(any(test, feature = "headless"))]
pub mod headless;
pub mod tween;

use std::fmt;
use std::time::Duration;

pub use tween::{PropValue, Props, Stagger, TweenVars, REPEAT_FOREVER};

// ── Geometry ─────────────────────────────────────────────────────────────

/// Axis-aligned client rectangle, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Right edge.
    pub right: f64,
    /// Bottom edge.
    pub bottom: f64,
}

impl Rect {
    /// Rectangle from origin and size.
    #[must_use]
    pub fn from_origin_size(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            right: left + width,
            bottom: top + height,
        }
    }
}

/// Size of the layout viewport, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    /// Inner width.
    pub width: f64,
    /// Inner height.
    pub height: f64,
}

// ── Events ───────────────────────────────────────────────────────────────

/// Which event stream a listener subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Pointer moved anywhere over the window.
    PointerMove,
    /// Window resized.
    Resize,
    /// Window scrolled.
    Scroll,
    /// Document visibility changed.
    VisibilityChange,
    /// Key pressed.
    KeyDown,
    /// Element clicked.
    Click,
    /// Asset viewer reported load progress.
    AssetProgress,
    /// Asset viewer finished loading.
    AssetLoad,
}

impl EventKind {
    /// DOM event type name.
    #[must_use]
    pub fn dom_name(self) -> &'static str {
        match self {
            Self::PointerMove => "mousemove",
            Self::Resize => "resize",
            Self::Scroll => "scroll",
            Self::VisibilityChange => "visibilitychange",
            Self::KeyDown => "keydown",
            Self::Click => "click",
            Self::AssetProgress => "progress",
            Self::AssetLoad => "load",
        }
    }
}

/// Platform-agnostic page events delivered to listeners.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// Pointer moved to a client position.
    PointerMoved {
        /// Horizontal client position in CSS pixels.
        x: f32,
        /// Vertical client position in CSS pixels.
        y: f32,
    },
    /// Window resized.
    Resized,
    /// Window scrolled.
    Scrolled,
    /// Document visibility changed.
    VisibilityChanged {
        /// `true` when the tab went to the background.
        hidden: bool,
    },
    /// Key pressed.
    KeyDown {
        /// `KeyboardEvent.key` value (`"Escape"`, `"a"`, ...).
        key: String,
    },
    /// Element clicked.
    Clicked,
    /// Asset viewer load progress.
    AssetProgress {
        /// Fraction loaded, in [0, 1].
        total_progress: f64,
    },
    /// Asset viewer finished loading.
    AssetLoaded,
}

/// What a listener is attached to.
#[derive(Debug, Clone, PartialEq)]
pub enum ListenTarget<N> {
    /// The window.
    Window,
    /// The document.
    Document,
    /// A specific element.
    Node(N),
}

/// Listener callback.
pub type Handler = Box<dyn FnMut(&PageEvent)>;

/// Detaches a listener when cancelled or dropped.
///
/// The coordinator owns every page-lifetime subscription; a handler that
/// should stop after some condition cancels its own handle.
#[must_use = "dropping a Subscription detaches its listener"]
pub struct Subscription {
    detach: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Subscription that runs `detach` exactly once on cancel or drop.
    pub fn new(detach: impl FnOnce() + 'static) -> Self {
        Self {
            detach: Some(Box::new(detach)),
        }
    }

    /// Subscription with nothing to detach.
    pub fn inert() -> Self {
        Self { detach: None }
    }

    /// Detach the listener now.
    pub fn cancel(mut self) {
        self.run_detach();
    }

    fn run_detach(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_detach();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("attached", &self.detach.is_some())
            .finish()
    }
}

// ── Page ─────────────────────────────────────────────────────────────────

/// DOM access needed by the motion components.
///
/// Query methods return `None`/empty when nothing matches; geometry returns
/// `None` for detached or undisplayed elements. Mutators never fail.
pub trait Page {
    /// Element handle. Cheap to clone; equality is element identity.
    type Node: Clone + PartialEq + fmt::Debug + 'static;

    /// First element matching `selector` in the document.
    fn query(&self, selector: &str) -> Option<Self::Node>;
    /// All elements matching `selector` in the document, in tree order.
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;
    /// First descendant of `root` matching `selector`.
    fn query_in(&self, root: &Self::Node, selector: &str) -> Option<Self::Node>;
    /// All descendants of `root` matching `selector`, in tree order.
    fn query_all_in(&self, root: &Self::Node, selector: &str) -> Vec<Self::Node>;

    /// Client rectangle, or `None` when the element has no layout box.
    fn bounding_rect(&self, node: &Self::Node) -> Option<Rect>;
    /// Current viewport size.
    fn viewport(&self) -> Viewport;
    /// Numeric value of a root style custom property (`--menu-gap`).
    fn style_token(&self, name: &str) -> Option<f64>;
    /// Whether the user asked for reduced motion.
    fn prefers_reduced_motion(&self) -> bool;

    /// Set an inline style property.
    fn set_style(&self, node: &Self::Node, property: &str, value: &str);
    /// Set or clear the `hidden` flag.
    fn set_hidden(&self, node: &Self::Node, hidden: bool);
    /// Read the `hidden` flag.
    fn is_hidden(&self, node: &Self::Node) -> bool;
    /// Add a class.
    fn add_class(&self, node: &Self::Node, class: &str);
    /// Remove a class.
    fn remove_class(&self, node: &Self::Node, class: &str);
    /// Whether the class is present.
    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    /// Set an attribute.
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);
    /// Read an attribute.
    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    /// Concatenated text content.
    fn text_content(&self, node: &Self::Node) -> String;
    /// Replace the children of `node` with one inline element per
    /// fragment, each carrying `class`, and return the new elements in
    /// order.
    fn replace_with_units(
        &self,
        node: &Self::Node,
        class: &str,
        fragments: &[&str],
    ) -> Vec<Self::Node>;

    /// Attach a listener. Detached when the returned handle is cancelled
    /// or dropped.
    fn listen(
        &self,
        target: &ListenTarget<Self::Node>,
        kind: EventKind,
        handler: Handler,
    ) -> Subscription;
}

// ── Scheduling ───────────────────────────────────────────────────────────

/// Deferred callback.
pub type Callback = Box<dyn FnOnce()>;

/// Frame and timer primitives of the single-threaded event loop.
pub trait Scheduler {
    /// Run `callback` right before the next repaint.
    fn request_frame(&self, callback: Callback);
    /// Run `callback` once after `delay`.
    fn set_timeout(&self, delay: Duration, callback: Callback);
}

// ── Animation engine ─────────────────────────────────────────────────────

/// Elements a tween applies to.
#[derive(Debug, Clone, PartialEq)]
pub enum Targets<N> {
    /// Everything matching a selector at call time.
    Selector(String),
    /// Explicit elements.
    Nodes(Vec<N>),
}

impl<N> Targets<N> {
    /// A single element.
    pub fn node(node: N) -> Self {
        Self::Nodes(vec![node])
    }
}

/// The external tweening engine.
pub trait AnimationEngine<N> {
    /// Apply values immediately, without tweening.
    fn set(&self, targets: &Targets<N>, vars: &TweenVars);
    /// Tween from the current values to `vars`.
    fn animate_to(&self, targets: &Targets<N>, vars: &TweenVars);
    /// Tween from `from` to `to`.
    fn animate_from_to(&self, targets: &Targets<N>, from: &TweenVars, to: &TweenVars);
    /// Pause every running timeline.
    fn pause_all(&self);
    /// Resume every paused timeline.
    fn resume_all(&self);
    /// Stop every tween running on `targets`.
    fn kill_tweens_of(&self, targets: &Targets<N>);
}

// ── Scroll triggers ──────────────────────────────────────────────────────

/// Scroll range of a scrub trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollTriggerSpec {
    /// Start position, `"<element edge> <viewport edge>"` (`"top 80%"`).
    pub start: String,
    /// End position (`"bottom top"`).
    pub end: String,
    /// Tie progress directly to the scroll offset.
    pub scrub: bool,
}

/// Scroll-position trigger registration.
pub trait ScrollTriggers<N> {
    /// Call `on_update` with the scrub progress (0..=1) of `trigger`
    /// whenever it changes. The trigger is killed when the returned handle
    /// is cancelled or dropped.
    fn register(
        &self,
        trigger: &N,
        spec: &ScrollTriggerSpec,
        on_update: Box<dyn FnMut(f32)>,
    ) -> Subscription;
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn subscription_detaches_once_on_cancel() {
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        let sub = Subscription::new(move || c.set(c.get() + 1));
        sub.cancel();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn subscription_detaches_on_drop() {
        let count = Rc::new(Cell::new(0));
        {
            let c = Rc::clone(&count);
            let _sub = Subscription::new(move || c.set(c.get() + 1));
        }
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn rect_from_origin_size() {
        let r = Rect::from_origin_size(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.right, 40.0);
        assert_eq!(r.bottom, 60.0);
    }
}
