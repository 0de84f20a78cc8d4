//! Navigation drawer: open/close state machine and panel placement.
//!
//! ```text
//! Closed --open()--> Opening --next frame--> Open
//!   ^                                          |
//!   +---- close delay ---- Closing <--close()--+
//! ```
//!
//! `Opening` and `Closing` only exist to sequence the visual transition:
//! the hidden flag is cleared one frame before the open class is added, and
//! set again only after the close transition has had time to play.

mod placement;

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

pub use placement::{
    compute_placement, LayoutTokens, PanelPlacement, ViewportPositioner,
};

use crate::error::MotionError;
use crate::host::{Page, Scheduler};
use crate::options::DrawerOptions;

/// Drawer lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawerState {
    /// Hidden, no open class.
    Closed,
    /// Visible, open class pending for the next frame.
    Opening,
    /// Visible with the open class.
    Open,
    /// Open class removed, hidden flag pending for the close delay.
    Closing,
}

struct DrawerInner<P: Page> {
    page: Rc<P>,
    scheduler: Rc<dyn Scheduler>,
    drawer: P::Node,
    trigger: P::Node,
    positioner: ViewportPositioner<P>,
    open_class: String,
    close_delay: Duration,
    dismiss_key: String,
    state: Cell<DrawerState>,
    /// Bumped on every open/close; deferred steps from an older
    /// transition are discarded.
    generation: Cell<u64>,
}

/// Controller for the single navigation drawer.
pub struct DrawerController<P: Page> {
    inner: Rc<DrawerInner<P>>,
}

impl<P: Page> Clone for DrawerController<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<P: Page + 'static> DrawerController<P> {
    /// Controller for `drawer`, toggled by `trigger`. The initial state is
    /// read from the page.
    pub fn new(
        page: &Rc<P>,
        scheduler: &Rc<dyn Scheduler>,
        drawer: Option<P::Node>,
        trigger: Option<P::Node>,
        positioner: ViewportPositioner<P>,
        options: &DrawerOptions,
    ) -> Result<Self, MotionError> {
        let drawer =
            drawer.ok_or_else(|| MotionError::MissingElement("drawer".into()))?;
        let trigger = trigger
            .ok_or_else(|| MotionError::MissingElement("drawer trigger".into()))?;
        let state = if page.has_class(&drawer, &options.open_class)
            && !page.is_hidden(&drawer)
        {
            DrawerState::Open
        } else {
            DrawerState::Closed
        };
        Ok(Self {
            inner: Rc::new(DrawerInner {
                page: Rc::clone(page),
                scheduler: Rc::clone(scheduler),
                drawer,
                trigger,
                positioner,
                open_class: options.open_class.clone(),
                close_delay: Duration::from_millis(options.close_delay_ms),
                dismiss_key: options.dismiss_key.clone(),
                state: Cell::new(state),
                generation: Cell::new(0),
            }),
        })
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> DrawerState {
        self.inner.state.get()
    }

    /// Whether the open class is present.
    #[must_use]
    pub fn is_open(&self) -> bool {
        let inner = &self.inner;
        inner.page.has_class(&inner.drawer, &inner.open_class)
    }

    /// Close when the open class is present, open otherwise.
    ///
    /// An `Opening` drawer has no open class yet, so toggling it opens it
    /// again; the repeated open is harmless.
    pub fn toggle(&self) {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    /// Show the drawer, mark the trigger expanded, place the panel, then
    /// add the open class on the next frame.
    pub fn open(&self) {
        let inner = &self.inner;
        let generation = self.bump();
        inner.page.set_hidden(&inner.drawer, false);
        inner
            .page
            .set_attribute(&inner.trigger, "aria-expanded", "true");
        let _ = inner.positioner.place();
        inner.state.set(DrawerState::Opening);
        log::debug!("drawer opening");

        let this = self.clone();
        inner.scheduler.request_frame(Box::new(move || {
            let inner = &this.inner;
            if inner.generation.get() != generation {
                return;
            }
            inner.page.add_class(&inner.drawer, &inner.open_class);
            inner.state.set(DrawerState::Open);
        }));
    }

    /// Remove the open class and collapse the trigger now; hide the drawer
    /// once the close transition has played. No-op when already closed and
    /// the open class is absent.
    pub fn close(&self) {
        let inner = &self.inner;
        if inner.state.get() == DrawerState::Closed && !self.is_open() {
            return;
        }
        let generation = self.bump();
        inner.page.remove_class(&inner.drawer, &inner.open_class);
        inner
            .page
            .set_attribute(&inner.trigger, "aria-expanded", "false");
        inner.state.set(DrawerState::Closing);
        log::debug!("drawer closing");

        let this = self.clone();
        inner.scheduler.set_timeout(
            inner.close_delay,
            Box::new(move || {
                let inner = &this.inner;
                if inner.generation.get() != generation {
                    return;
                }
                inner.page.set_hidden(&inner.drawer, true);
                inner.state.set(DrawerState::Closed);
            }),
        );
    }

    /// Close on the dismiss key (Escape by default).
    pub fn key_pressed(&self, key: &str) {
        if key == self.inner.dismiss_key {
            self.close();
        }
    }

    /// The panel positioner shared with the resize/scroll listeners.
    #[must_use]
    pub fn positioner(&self) -> &ViewportPositioner<P> {
        &self.inner.positioner
    }

    fn bump(&self) -> u64 {
        let next = self.inner.generation.get().wrapping_add(1);
        self.inner.generation.set(next);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::headless::{ManualScheduler, MemoryPage, NodeId};
    use crate::host::Rect;
    use crate::options::LayoutTokenNames;

    const CLOSE_DELAY: Duration = Duration::from_millis(380);

    struct Fixture {
        page: Rc<MemoryPage>,
        sched: Rc<ManualScheduler>,
        drawer_el: NodeId,
        trigger: NodeId,
        panel: NodeId,
        drawer: DrawerController<MemoryPage>,
    }

    fn fixture() -> Fixture {
        let page = Rc::new(MemoryPage::new());
        let trigger = page.append(None, "button#menuToggle");
        let drawer_el = page.append(None, "div#menuDrawer");
        let panel = page.append(Some(drawer_el), "nav.menu-panel");
        page.set_hidden(&drawer_el, true);
        page.set_rect(trigger, Some(Rect::from_origin_size(1200.0, 0.0, 40.0, 40.0)));
        let sched = Rc::new(ManualScheduler::new());
        let scheduler: Rc<dyn Scheduler> = sched.clone();
        let positioner = ViewportPositioner::new(
            &page,
            &scheduler,
            Some(trigger),
            Some(panel),
            LayoutTokenNames::default(),
        );
        let drawer = DrawerController::new(
            &page,
            &scheduler,
            Some(drawer_el),
            Some(trigger),
            positioner,
            &DrawerOptions::default(),
        )
        .unwrap();
        Fixture {
            page,
            sched,
            drawer_el,
            trigger,
            panel,
            drawer,
        }
    }

    #[test]
    fn starts_closed() {
        let f = fixture();
        assert_eq!(f.drawer.state(), DrawerState::Closed);
        assert!(!f.drawer.is_open());
    }

    #[test]
    fn open_is_two_phase() {
        let f = fixture();
        f.drawer.open();
        assert_eq!(f.drawer.state(), DrawerState::Opening);
        assert!(!f.page.is_hidden(&f.drawer_el));
        assert!(!f.page.has_class(&f.drawer_el, "open"));
        assert_eq!(
            f.page.attribute(&f.trigger, "aria-expanded").as_deref(),
            Some("true")
        );
        // Placed synchronously on open.
        assert_eq!(f.page.style(f.panel, "top").as_deref(), Some("40px"));

        f.sched.run_frame();
        assert_eq!(f.drawer.state(), DrawerState::Open);
        assert!(f.page.has_class(&f.drawer_el, "open"));
    }

    #[test]
    fn toggle_from_closed_reaches_open() {
        let f = fixture();
        f.drawer.toggle();
        f.sched.run_frame();
        assert_eq!(f.drawer.state(), DrawerState::Open);
        assert!(f.drawer.is_open());
    }

    #[test]
    fn toggle_from_open_closes() {
        let f = fixture();
        f.drawer.toggle();
        f.sched.run_frame();
        f.drawer.toggle();
        assert_eq!(f.drawer.state(), DrawerState::Closing);
        f.sched.advance(CLOSE_DELAY);
        assert_eq!(f.drawer.state(), DrawerState::Closed);
    }

    #[test]
    fn close_keeps_drawer_visible_until_delay() {
        let f = fixture();
        f.drawer.open();
        f.sched.run_frame();
        f.drawer.close();

        assert_eq!(f.drawer.state(), DrawerState::Closing);
        assert!(!f.page.has_class(&f.drawer_el, "open"));
        assert_eq!(
            f.page.attribute(&f.trigger, "aria-expanded").as_deref(),
            Some("false")
        );
        f.sched.advance(Duration::from_millis(379));
        assert!(!f.page.is_hidden(&f.drawer_el));
        f.sched.advance(Duration::from_millis(1));
        assert!(f.page.is_hidden(&f.drawer_el));
        assert_eq!(f.drawer.state(), DrawerState::Closed);
    }

    #[test]
    fn open_then_immediate_close_settles_closed() {
        let f = fixture();
        f.drawer.open();
        f.drawer.close();
        // The stale open frame must not re-add the class.
        f.sched.run_frame();
        assert!(!f.page.has_class(&f.drawer_el, "open"));
        f.sched.advance(CLOSE_DELAY);
        assert_eq!(f.drawer.state(), DrawerState::Closed);
        assert!(f.page.is_hidden(&f.drawer_el));
        assert_eq!(
            f.page.attribute(&f.trigger, "aria-expanded").as_deref(),
            Some("false")
        );
    }

    #[test]
    fn reopen_during_close_is_not_hidden_by_stale_timer() {
        let f = fixture();
        f.drawer.open();
        f.sched.run_frame();
        f.drawer.close();
        f.sched.advance(Duration::from_millis(100));
        f.drawer.open();
        f.sched.run_frame();
        f.sched.advance(CLOSE_DELAY);
        assert_eq!(f.drawer.state(), DrawerState::Open);
        assert!(!f.page.is_hidden(&f.drawer_el));
        assert!(f.page.has_class(&f.drawer_el, "open"));
    }

    #[test]
    fn toggle_while_opening_reopens() {
        let f = fixture();
        f.drawer.toggle();
        f.drawer.toggle();
        assert_eq!(f.drawer.state(), DrawerState::Opening);
        f.sched.run_frame();
        assert_eq!(f.drawer.state(), DrawerState::Open);
    }

    #[test]
    fn escape_closes_open_drawer() {
        let f = fixture();
        f.drawer.open();
        f.sched.run_frame();
        f.drawer.key_pressed("Enter");
        assert_eq!(f.drawer.state(), DrawerState::Open);
        f.drawer.key_pressed("Escape");
        assert_eq!(f.drawer.state(), DrawerState::Closing);
        f.sched.advance(CLOSE_DELAY);
        assert_eq!(f.drawer.state(), DrawerState::Closed);
    }

    #[test]
    fn close_when_closed_schedules_nothing() {
        let f = fixture();
        f.drawer.close();
        assert_eq!(f.sched.pending_timers(), 0);
        assert_eq!(f.drawer.state(), DrawerState::Closed);
    }

    #[test]
    fn stray_open_class_on_hidden_drawer_still_toggles() {
        let f = fixture();
        // Markup ships the open class on a hidden drawer.
        f.page.add_class(&f.drawer_el, "open");
        let scheduler: Rc<dyn Scheduler> = f.sched.clone();
        let drawer = DrawerController::new(
            &f.page,
            &scheduler,
            Some(f.drawer_el),
            Some(f.trigger),
            f.drawer.positioner().clone(),
            &DrawerOptions::default(),
        )
        .unwrap();
        assert_eq!(drawer.state(), DrawerState::Closed);
        assert!(drawer.is_open());

        drawer.toggle();
        assert!(!f.page.has_class(&f.drawer_el, "open"));
        assert_eq!(drawer.state(), DrawerState::Closing);
        f.sched.advance(CLOSE_DELAY);
        assert_eq!(drawer.state(), DrawerState::Closed);
        assert!(f.page.is_hidden(&f.drawer_el));

        drawer.toggle();
        f.sched.run_frame();
        assert_eq!(drawer.state(), DrawerState::Open);
        assert!(!f.page.is_hidden(&f.drawer_el));
        assert!(f.page.has_class(&f.drawer_el, "open"));
    }

    #[test]
    fn missing_hooks_are_reported() {
        let page = Rc::new(MemoryPage::new());
        let scheduler: Rc<dyn Scheduler> = Rc::new(ManualScheduler::new());
        let positioner = ViewportPositioner::new(
            &page,
            &scheduler,
            None,
            None,
            LayoutTokenNames::default(),
        );
        let result = DrawerController::new(
            &page,
            &scheduler,
            None,
            None,
            positioner,
            &DrawerOptions::default(),
        );
        assert!(matches!(result, Err(MotionError::MissingElement(_))));
    }
}
