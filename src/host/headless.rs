//! In-memory host for tests and headless previews.
//!
//! - [`MemoryPage`] - a small element tree with simple selector matching
//!   (`tag`, `#id`, `.class`, `[attr]` and compounds like `div#a.b`)
//! - [`ManualScheduler`] - frames and timers that only run when the caller
//!   steps them
//! - [`RecordingEngine`] / [`RecordingScrollTriggers`] - record every call
//!   so assertions can inspect what the components asked for

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};
use std::time::Duration;

use rustc_hash::FxHashMap;

use super::{
    AnimationEngine, Callback, EventKind, Handler, ListenTarget, Page,
    PageEvent, Rect, Scheduler, ScrollTriggerSpec, ScrollTriggers,
    Subscription, Targets, TweenVars, Viewport,
};

// ── MemoryPage ───────────────────────────────────────────────────────────

/// Handle to a [`MemoryPage`] element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

#[derive(Debug, Default)]
struct NodeData {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    hidden: bool,
    text: String,
    rect: Option<Rect>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Compound selector: optional tag, id, classes and attribute names.
#[derive(Debug, Default)]
struct Selector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<String>,
}

impl Selector {
    fn parse(s: &str) -> Self {
        let mut sel = Self::default();
        let mut rest = s.trim();
        let tag_end = rest.find(['#', '.', '[']).unwrap_or(rest.len());
        if tag_end > 0 {
            sel.tag = Some(rest[..tag_end].to_ascii_lowercase());
        }
        rest = &rest[tag_end..];
        while let Some(first) = rest.chars().next() {
            rest = &rest[1..];
            if first == '[' {
                let end = rest.find(']').unwrap_or(rest.len());
                sel.attributes.push(rest[..end].trim().to_owned());
                rest = rest.get(end + 1..).unwrap_or("");
                continue;
            }
            let end = rest.find(['#', '.', '[']).unwrap_or(rest.len());
            let name = rest[..end].to_owned();
            if first == '#' {
                sel.id = Some(name);
            } else {
                sel.classes.push(name);
            }
            rest = &rest[end..];
        }
        sel
    }

    fn matches(&self, node: &NodeData) -> bool {
        self.tag.as_ref().is_none_or(|t| *t == node.tag)
            && self.id.as_ref().is_none_or(|id| node.id.as_ref() == Some(id))
            && self.classes.iter().all(|c| node.classes.contains(c))
            && self
                .attributes
                .iter()
                .all(|a| node.attributes.contains_key(a))
    }
}

struct ListenerEntry {
    target: ListenTarget<NodeId>,
    kind: EventKind,
    handler: Rc<RefCell<Handler>>,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: BTreeMap<u64, ListenerEntry>,
}

/// In-memory [`Page`].
pub struct MemoryPage {
    nodes: RefCell<FxHashMap<NodeId, NodeData>>,
    roots: RefCell<Vec<NodeId>>,
    next_node: Cell<u32>,
    viewport: Cell<Viewport>,
    tokens: RefCell<FxHashMap<String, f64>>,
    reduced_motion: Cell<bool>,
    listeners: Rc<RefCell<Registry>>,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPage {
    /// Empty page with a 1280×800 viewport.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: RefCell::new(FxHashMap::default()),
            roots: RefCell::new(Vec::new()),
            next_node: Cell::new(0),
            viewport: Cell::new(Viewport {
                width: 1280.0,
                height: 800.0,
            }),
            tokens: RefCell::new(FxHashMap::default()),
            reduced_motion: Cell::new(false),
            listeners: Rc::new(RefCell::new(Registry::default())),
        }
    }

    /// Append an element described by a compound selector (`div#menu.open`)
    /// under `parent`, or at the document root.
    pub fn append(&self, parent: Option<NodeId>, spec: &str) -> NodeId {
        let sel = Selector::parse(spec);
        let data = NodeData {
            tag: sel.tag.unwrap_or_else(|| "div".to_owned()),
            id: sel.id,
            classes: sel.classes,
            attributes: sel
                .attributes
                .into_iter()
                .map(|a| (a, String::new()))
                .collect(),
            parent,
            ..NodeData::default()
        };
        let id = NodeId(self.next_node.get());
        self.next_node.set(id.0 + 1);
        let _ = self.nodes.borrow_mut().insert(id, data);
        match parent {
            Some(p) => {
                if let Some(parent) = self.nodes.borrow_mut().get_mut(&p) {
                    parent.children.push(id);
                }
            }
            None => self.roots.borrow_mut().push(id),
        }
        id
    }

    /// Give an element a layout box.
    pub fn set_rect(&self, node: NodeId, rect: Option<Rect>) {
        self.with_node(&node, |n| n.rect = rect);
    }

    /// Set an element's own text.
    pub fn set_text(&self, node: NodeId, text: &str) {
        self.with_node(&node, |n| text.clone_into(&mut n.text));
    }

    /// Set the viewport size.
    pub fn set_viewport(&self, width: f64, height: f64) {
        self.viewport.set(Viewport { width, height });
    }

    /// Set a root style token.
    pub fn set_token(&self, name: &str, value: f64) {
        let _ = self.tokens.borrow_mut().insert(name.to_owned(), value);
    }

    /// Set the reduced-motion preference.
    pub fn set_reduced_motion(&self, reduced: bool) {
        self.reduced_motion.set(reduced);
    }

    /// Read back an inline style.
    #[must_use]
    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.nodes
            .borrow()
            .get(&node)
            .and_then(|n| n.styles.get(property).cloned())
    }

    /// Direct children of an element.
    #[must_use]
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes
            .borrow()
            .get(&node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    /// Number of live listeners of `kind`.
    #[must_use]
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners
            .borrow()
            .entries
            .values()
            .filter(|e| e.kind == kind)
            .count()
    }

    /// Deliver `event` to every listener on `target` for `kind`. Returns the
    /// number of handlers invoked.
    pub fn emit(
        &self,
        target: &ListenTarget<NodeId>,
        kind: EventKind,
        event: &PageEvent,
    ) -> usize {
        // Snapshot first: handlers may cancel subscriptions while running.
        let handlers: Vec<_> = self
            .listeners
            .borrow()
            .entries
            .values()
            .filter(|e| e.kind == kind && e.target == *target)
            .map(|e| Rc::clone(&e.handler))
            .collect();
        for handler in &handlers {
            (*handler.borrow_mut())(event);
        }
        handlers.len()
    }

    /// Pointer moved.
    pub fn move_pointer(&self, x: f32, y: f32) {
        let _ = self.emit(
            &ListenTarget::Window,
            EventKind::PointerMove,
            &PageEvent::PointerMoved { x, y },
        );
    }

    /// Window resized to the given size.
    pub fn resize(&self, width: f64, height: f64) {
        self.set_viewport(width, height);
        let _ = self.emit(&ListenTarget::Window, EventKind::Resize, &PageEvent::Resized);
    }

    /// Window scrolled.
    pub fn scroll(&self) {
        let _ = self.emit(&ListenTarget::Window, EventKind::Scroll, &PageEvent::Scrolled);
    }

    /// Key pressed on the window.
    pub fn press_key(&self, key: &str) {
        let _ = self.emit(
            &ListenTarget::Window,
            EventKind::KeyDown,
            &PageEvent::KeyDown { key: key.to_owned() },
        );
    }

    /// Element clicked.
    pub fn click(&self, node: NodeId) {
        let _ = self.emit(&ListenTarget::Node(node), EventKind::Click, &PageEvent::Clicked);
    }

    /// Document visibility changed.
    pub fn set_visibility(&self, hidden: bool) {
        let _ = self.emit(
            &ListenTarget::Document,
            EventKind::VisibilityChange,
            &PageEvent::VisibilityChanged { hidden },
        );
    }

    /// Asset viewer reported progress.
    pub fn asset_progress(&self, viewer: NodeId, total_progress: f64) {
        let _ = self.emit(
            &ListenTarget::Node(viewer),
            EventKind::AssetProgress,
            &PageEvent::AssetProgress { total_progress },
        );
    }

    /// Asset viewer finished loading.
    pub fn asset_loaded(&self, viewer: NodeId) {
        let _ = self.emit(
            &ListenTarget::Node(viewer),
            EventKind::AssetLoad,
            &PageEvent::AssetLoaded,
        );
    }

    fn with_node(&self, node: &NodeId, f: impl FnOnce(&mut NodeData)) {
        if let Some(n) = self.nodes.borrow_mut().get_mut(node) {
            f(n);
        }
    }

    fn read_node<R>(&self, node: &NodeId, f: impl FnOnce(&NodeData) -> R) -> Option<R> {
        self.nodes.borrow().get(node).map(f)
    }

    /// Depth-first, document-order walk below `roots`.
    fn descendants(&self, roots: &[NodeId]) -> Vec<NodeId> {
        let nodes = self.nodes.borrow();
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(n) = nodes.get(&id) {
                stack.extend(n.children.iter().rev().copied());
            }
        }
        out
    }

    fn select(&self, candidates: &[NodeId], selector: &str) -> Vec<NodeId> {
        let sel = Selector::parse(selector);
        let nodes = self.nodes.borrow();
        candidates
            .iter()
            .copied()
            .filter(|id| nodes.get(id).is_some_and(|n| sel.matches(n)))
            .collect()
    }

    fn is_attached(&self, node: NodeId) -> bool {
        let nodes = self.nodes.borrow();
        let mut current = node;
        loop {
            match nodes.get(&current) {
                Some(n) => match n.parent {
                    Some(p) => current = p,
                    None => return self.roots.borrow().contains(&current),
                },
                None => return false,
            }
        }
    }
}

impl Page for MemoryPage {
    type Node = NodeId;

    fn query(&self, selector: &str) -> Option<NodeId> {
        self.query_all(selector).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        let roots = self.roots.borrow().clone();
        let all = self.descendants(&roots);
        self.select(&all, selector)
    }

    fn query_in(&self, root: &NodeId, selector: &str) -> Option<NodeId> {
        self.query_all_in(root, selector).into_iter().next()
    }

    fn query_all_in(&self, root: &NodeId, selector: &str) -> Vec<NodeId> {
        let below = self.descendants(&self.children(*root));
        self.select(&below, selector)
    }

    fn bounding_rect(&self, node: &NodeId) -> Option<Rect> {
        if !self.is_attached(*node) {
            return None;
        }
        self.read_node(node, |n| if n.hidden { None } else { n.rect })
            .flatten()
    }

    fn viewport(&self) -> Viewport {
        self.viewport.get()
    }

    fn style_token(&self, name: &str) -> Option<f64> {
        self.tokens.borrow().get(name).copied()
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion.get()
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) {
        self.with_node(node, |n| {
            let _ = n.styles.insert(property.to_owned(), value.to_owned());
        });
    }

    fn set_hidden(&self, node: &NodeId, hidden: bool) {
        self.with_node(node, |n| n.hidden = hidden);
    }

    fn is_hidden(&self, node: &NodeId) -> bool {
        self.read_node(node, |n| n.hidden).unwrap_or(false)
    }

    fn add_class(&self, node: &NodeId, class: &str) {
        self.with_node(node, |n| {
            if !n.classes.iter().any(|c| c == class) {
                n.classes.push(class.to_owned());
            }
        });
    }

    fn remove_class(&self, node: &NodeId, class: &str) {
        self.with_node(node, |n| n.classes.retain(|c| c != class));
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.read_node(node, |n| n.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        self.with_node(node, |n| {
            let _ = n.attributes.insert(name.to_owned(), value.to_owned());
        });
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.read_node(node, |n| n.attributes.get(name).cloned())
            .flatten()
    }

    fn text_content(&self, node: &NodeId) -> String {
        let nodes = self.nodes.borrow();
        let mut out = String::new();
        let mut stack = vec![*node];
        while let Some(id) = stack.pop() {
            if let Some(n) = nodes.get(&id) {
                out.push_str(&n.text);
                stack.extend(n.children.iter().rev().copied());
            }
        }
        out
    }

    fn replace_with_units(
        &self,
        node: &NodeId,
        class: &str,
        fragments: &[&str],
    ) -> Vec<NodeId> {
        {
            let mut nodes = self.nodes.borrow_mut();
            let old = nodes
                .get_mut(node)
                .map(|n| {
                    n.text.clear();
                    std::mem::take(&mut n.children)
                })
                .unwrap_or_default();
            for child in old {
                if let Some(c) = nodes.get_mut(&child) {
                    c.parent = None;
                }
            }
        }
        let spec = format!("span.{class}");
        fragments
            .iter()
            .map(|text| {
                let unit = self.append(Some(*node), &spec);
                self.set_text(unit, text);
                unit
            })
            .collect()
    }

    fn listen(
        &self,
        target: &ListenTarget<NodeId>,
        kind: EventKind,
        handler: Handler,
    ) -> Subscription {
        let id = {
            let mut registry = self.listeners.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            let _ = registry.entries.insert(
                id,
                ListenerEntry {
                    target: target.clone(),
                    kind,
                    handler: Rc::new(RefCell::new(handler)),
                },
            );
            id
        };
        let registry: Weak<RefCell<Registry>> = Rc::downgrade(&self.listeners);
        Subscription::new(move || {
            if let Some(registry) = registry.upgrade() {
                let _ = registry.borrow_mut().entries.remove(&id);
            }
        })
    }
}

// ── ManualScheduler ──────────────────────────────────────────────────────

struct Timer {
    due: Duration,
    seq: u64,
    callback: Callback,
}

/// [`Scheduler`] driven by explicit `run_frame`/`advance` calls.
#[derive(Default)]
pub struct ManualScheduler {
    frames: RefCell<Vec<Callback>>,
    timers: RefCell<Vec<Timer>>,
    now: Cell<Duration>,
    seq: Cell<u64>,
}

impl ManualScheduler {
    /// Scheduler at virtual time zero with nothing queued.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the callbacks queued for the next frame. Callbacks they queue
    /// wait for the following frame.
    pub fn run_frame(&self) {
        let batch = std::mem::take(&mut *self.frames.borrow_mut());
        for callback in batch {
            callback();
        }
    }

    /// Run `n` frames back to back.
    pub fn run_frames(&self, n: usize) {
        for _ in 0..n {
            self.run_frame();
        }
    }

    /// Move virtual time forward, firing due timers in due order.
    pub fn advance(&self, delta: Duration) {
        self.now.set(self.now.get() + delta);
        while let Some(timer) = self.pop_due() {
            (timer.callback)();
        }
    }

    /// Callbacks waiting for the next frame.
    #[must_use]
    pub fn pending_frames(&self) -> usize {
        self.frames.borrow().len()
    }

    /// Timers not yet fired.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().len()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now.get()
    }

    fn pop_due(&self) -> Option<Timer> {
        let mut timers = self.timers.borrow_mut();
        let now = self.now.get();
        let idx = timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= now)
            .min_by_key(|(_, t)| (t.due, t.seq))
            .map(|(i, _)| i)?;
        Some(timers.swap_remove(idx))
    }
}

impl Scheduler for ManualScheduler {
    fn request_frame(&self, callback: Callback) {
        self.frames.borrow_mut().push(callback);
    }

    fn set_timeout(&self, delay: Duration, callback: Callback) {
        let seq = self.seq.get();
        self.seq.set(seq + 1);
        self.timers.borrow_mut().push(Timer {
            due: self.now.get() + delay,
            seq,
            callback,
        });
    }
}

// ── RecordingEngine ──────────────────────────────────────────────────────

/// One recorded [`AnimationEngine`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall<N> {
    /// `set(targets, vars)`.
    Set(Targets<N>, TweenVars),
    /// `animate_to(targets, vars)`.
    To(Targets<N>, TweenVars),
    /// `animate_from_to(targets, from, to)`.
    FromTo(Targets<N>, TweenVars, TweenVars),
    /// `pause_all()`.
    PauseAll,
    /// `resume_all()`.
    ResumeAll,
    /// `kill_tweens_of(targets)`.
    Kill(Targets<N>),
}

/// [`AnimationEngine`] that records calls instead of animating.
pub struct RecordingEngine<N> {
    calls: RefCell<Vec<EngineCall<N>>>,
}

impl<N> Default for RecordingEngine<N> {
    fn default() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl<N: Clone> RecordingEngine<N> {
    /// Engine with no recorded calls.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<EngineCall<N>> {
        self.calls.borrow().clone()
    }

    /// Drain the recorded calls.
    pub fn take_calls(&self) -> Vec<EngineCall<N>> {
        std::mem::take(&mut *self.calls.borrow_mut())
    }

    /// Number of recorded calls.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl<N: Clone> AnimationEngine<N> for RecordingEngine<N> {
    fn set(&self, targets: &Targets<N>, vars: &TweenVars) {
        self.calls
            .borrow_mut()
            .push(EngineCall::Set(targets.clone(), vars.clone()));
    }

    fn animate_to(&self, targets: &Targets<N>, vars: &TweenVars) {
        self.calls
            .borrow_mut()
            .push(EngineCall::To(targets.clone(), vars.clone()));
    }

    fn animate_from_to(&self, targets: &Targets<N>, from: &TweenVars, to: &TweenVars) {
        self.calls.borrow_mut().push(EngineCall::FromTo(
            targets.clone(),
            from.clone(),
            to.clone(),
        ));
    }

    fn pause_all(&self) {
        self.calls.borrow_mut().push(EngineCall::PauseAll);
    }

    fn resume_all(&self) {
        self.calls.borrow_mut().push(EngineCall::ResumeAll);
    }

    fn kill_tweens_of(&self, targets: &Targets<N>) {
        self.calls
            .borrow_mut()
            .push(EngineCall::Kill(targets.clone()));
    }
}

// ── RecordingScrollTriggers ──────────────────────────────────────────────

type ScrubCallback = Rc<RefCell<Box<dyn FnMut(f32)>>>;

struct TriggerEntry<N> {
    trigger: N,
    spec: ScrollTriggerSpec,
    on_update: ScrubCallback,
    live: Rc<Cell<bool>>,
}

/// [`ScrollTriggers`] whose progress is pushed by the caller.
pub struct RecordingScrollTriggers<N> {
    entries: RefCell<Vec<TriggerEntry<N>>>,
}

impl<N> Default for RecordingScrollTriggers<N> {
    fn default() -> Self {
        Self {
            entries: RefCell::new(Vec::new()),
        }
    }
}

impl<N: Clone> RecordingScrollTriggers<N> {
    /// No registrations yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registrations ever made, killed ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Number of registrations whose handle is still held.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.entries.borrow().iter().filter(|e| e.live.get()).count()
    }

    /// Whether nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Trigger element and range of registration `index`.
    #[must_use]
    pub fn registration(&self, index: usize) -> Option<(N, ScrollTriggerSpec)> {
        self.entries
            .borrow()
            .get(index)
            .map(|e| (e.trigger.clone(), e.spec.clone()))
    }

    /// Report scrub `progress` to registration `index`. Returns whether it
    /// exists and is still live.
    pub fn scrub(&self, index: usize, progress: f32) -> bool {
        let callback = self
            .entries
            .borrow()
            .get(index)
            .filter(|e| e.live.get())
            .map(|e| Rc::clone(&e.on_update));
        match callback {
            Some(cb) => {
                (*cb.borrow_mut())(progress);
                true
            }
            None => false,
        }
    }
}

impl<N: Clone> ScrollTriggers<N> for RecordingScrollTriggers<N> {
    fn register(
        &self,
        trigger: &N,
        spec: &ScrollTriggerSpec,
        on_update: Box<dyn FnMut(f32)>,
    ) -> Subscription {
        let live = Rc::new(Cell::new(true));
        self.entries.borrow_mut().push(TriggerEntry {
            trigger: trigger.clone(),
            spec: spec.clone(),
            on_update: Rc::new(RefCell::new(on_update)),
            live: Rc::clone(&live),
        });
        Subscription::new(move || live.set(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_matching_covers_compounds() {
        let page = MemoryPage::new();
        let drawer = page.append(None, "div#menuDrawer.drawer");
        let scrim = page.append(Some(drawer), "div.menu-scrim");
        let close = page.append(Some(drawer), "button[data-close]");
        let _other = page.append(None, "button.menu-scrim");

        assert_eq!(page.query("#menuDrawer"), Some(drawer));
        assert_eq!(page.query("div.drawer"), Some(drawer));
        assert_eq!(page.query_in(&drawer, ".menu-scrim"), Some(scrim));
        assert_eq!(page.query_all(".menu-scrim").len(), 2);
        assert_eq!(page.query_all_in(&drawer, "[data-close]"), vec![close]);
        assert_eq!(page.query("section"), None);
    }

    #[test]
    fn query_all_is_document_order() {
        let page = MemoryPage::new();
        let a = page.append(None, "div.x");
        let b = page.append(Some(a), "p.x");
        let c = page.append(None, "div.x");
        let d = page.append(Some(a), "p.x");
        assert_eq!(page.query_all(".x"), vec![a, b, d, c]);
    }

    #[test]
    fn detached_or_hidden_nodes_have_no_rect() {
        let page = MemoryPage::new();
        let root = page.append(None, "div");
        let child = page.append(Some(root), "span");
        let rect = Rect::from_origin_size(0.0, 0.0, 10.0, 10.0);
        page.set_rect(child, Some(rect));
        assert_eq!(page.bounding_rect(&child), Some(rect));

        page.set_hidden(&child, true);
        assert_eq!(page.bounding_rect(&child), None);
        page.set_hidden(&child, false);

        let _ = page.replace_with_units(&root, "word", &["x"]);
        assert_eq!(page.bounding_rect(&child), None);
    }

    #[test]
    fn cancelled_listener_stops_receiving() {
        let page = MemoryPage::new();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let sub = page.listen(
            &ListenTarget::Window,
            EventKind::Scroll,
            Box::new(move |_| h.set(h.get() + 1)),
        );
        page.scroll();
        sub.cancel();
        page.scroll();
        assert_eq!(hits.get(), 1);
        assert_eq!(page.listener_count(EventKind::Scroll), 0);
    }

    #[test]
    fn dropped_trigger_stops_scrubbing() {
        let triggers = RecordingScrollTriggers::new();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let spec = ScrollTriggerSpec {
            start: "top 80%".into(),
            end: "bottom top".into(),
            scrub: true,
        };
        let handle = triggers.register(&1_u32, &spec, Box::new(move |_| h.set(h.get() + 1)));
        assert!(triggers.scrub(0, 0.5));
        drop(handle);
        assert!(!triggers.scrub(0, 0.7));
        assert_eq!(hits.get(), 1);
        assert_eq!(triggers.len(), 1);
        assert_eq!(triggers.live_count(), 0);
    }

    #[test]
    fn manual_scheduler_defers_nested_frames() {
        let sched = Rc::new(ManualScheduler::new());
        let log = Rc::new(RefCell::new(Vec::new()));
        let (s, l) = (Rc::clone(&sched), Rc::clone(&log));
        sched.request_frame(Box::new(move || {
            l.borrow_mut().push(1);
            let l2 = Rc::clone(&l);
            s.request_frame(Box::new(move || l2.borrow_mut().push(2)));
        }));
        sched.run_frame();
        assert_eq!(*log.borrow(), vec![1]);
        assert_eq!(sched.pending_frames(), 1);
        sched.run_frame();
        assert_eq!(*log.borrow(), vec![1, 2]);
        assert_eq!(sched.pending_frames(), 0);
    }

    #[test]
    fn manual_scheduler_fires_timers_in_due_order() {
        let sched = ManualScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for (ms, tag) in [(300, 'b'), (100, 'a'), (500, 'c')] {
            let l = Rc::clone(&log);
            sched.set_timeout(
                Duration::from_millis(ms),
                Box::new(move || l.borrow_mut().push(tag)),
            );
        }
        sched.advance(Duration::from_millis(300));
        assert_eq!(*log.borrow(), vec!['a', 'b']);
        assert_eq!(sched.pending_timers(), 1);
        sched.advance(Duration::from_millis(200));
        assert_eq!(*log.borrow(), vec!['a', 'b', 'c']);
    }
}
