//! Viewport-anchored placement of the drawer panel.
//!
//! The panel sits just below its trigger and flush with the viewport's
//! right edge, never closer to the edge than the gutter:
//!
//! ```text
//! top   = trigger.bottom + gap + top_offset
//! right = max(gutter, viewport.width - trigger.right) + right_offset
//! ```

use std::cell::Cell;
use std::rc::Rc;

use crate::host::{Page, Rect, Scheduler};
use crate::options::LayoutTokenNames;

/// Numeric layout offsets read from the page's style tokens.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutTokens {
    /// Vertical gap between trigger and panel.
    pub gap: f64,
    /// Minimum distance to the viewport edge.
    pub gutter: f64,
    /// Extra vertical nudge.
    pub top_offset: f64,
    /// Extra horizontal nudge.
    pub right_offset: f64,
}

impl LayoutTokens {
    /// Read the tokens named by `names`; missing or non-numeric tokens
    /// count as zero.
    pub fn read<P: Page>(page: &P, names: &LayoutTokenNames) -> Self {
        let token = |name: &str| page.style_token(name).filter(|v| v.is_finite()).unwrap_or(0.0);
        Self {
            gap: token(&names.gap),
            gutter: token(&names.gutter),
            top_offset: token(&names.top_offset),
            right_offset: token(&names.right_offset),
        }
    }
}

/// Panel offsets in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelPlacement {
    /// Distance from the viewport top.
    pub top: f64,
    /// Distance from the viewport right edge.
    pub right: f64,
}

/// Pure placement math.
#[must_use]
pub fn compute_placement(
    trigger: Rect,
    viewport_width: f64,
    tokens: &LayoutTokens,
) -> PanelPlacement {
    PanelPlacement {
        top: trigger.bottom + tokens.gap + tokens.top_offset,
        right: tokens.gutter.max(viewport_width - trigger.right)
            + tokens.right_offset,
    }
}

struct PositionerInner<P: Page> {
    page: Rc<P>,
    scheduler: Rc<dyn Scheduler>,
    trigger: Option<P::Node>,
    panel: Option<P::Node>,
    names: LayoutTokenNames,
    pending: Cell<bool>,
}

/// Positions the floating panel under its trigger, with frame-coalesced
/// recomputation for resize/scroll bursts.
pub struct ViewportPositioner<P: Page> {
    inner: Rc<PositionerInner<P>>,
}

impl<P: Page> Clone for ViewportPositioner<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<P: Page + 'static> ViewportPositioner<P> {
    /// Positioner for `panel` anchored to `trigger`. Either may be absent,
    /// in which case every pass is a no-op.
    pub fn new(
        page: &Rc<P>,
        scheduler: &Rc<dyn Scheduler>,
        trigger: Option<P::Node>,
        panel: Option<P::Node>,
        names: LayoutTokenNames,
    ) -> Self {
        Self {
            inner: Rc::new(PositionerInner {
                page: Rc::clone(page),
                scheduler: Rc::clone(scheduler),
                trigger,
                panel,
                names,
                pending: Cell::new(false),
            }),
        }
    }

    /// Placement for the current geometry, without touching the panel.
    /// `None` when an element is missing or the trigger has no layout box.
    #[must_use]
    pub fn compute(&self) -> Option<PanelPlacement> {
        let inner = &self.inner;
        let _panel = inner.panel.as_ref()?;
        let rect = inner.page.bounding_rect(inner.trigger.as_ref()?)?;
        let tokens = LayoutTokens::read(&*inner.page, &inner.names);
        Some(compute_placement(rect, inner.page.viewport().width, &tokens))
    }

    /// Recompute now and write `top`/`right` onto the panel.
    pub fn place(&self) -> Option<PanelPlacement> {
        let placement = self.compute()?;
        let panel = self.inner.panel.as_ref()?;
        let page = &self.inner.page;
        page.set_style(panel, "top", &format!("{}px", placement.top));
        page.set_style(panel, "right", &format!("{}px", placement.right));
        log::trace!("panel placed at top={} right={}", placement.top, placement.right);
        Some(placement)
    }

    /// Request a recomputation at the next frame. Requests arriving while
    /// one is pending are dropped.
    pub fn schedule(&self) {
        if self.inner.pending.replace(true) {
            return;
        }
        let this = self.clone();
        self.inner.scheduler.request_frame(Box::new(move || {
            this.inner.pending.set(false);
            let _ = this.place();
        }));
    }

    /// Whether a coalesced recomputation is waiting for the next frame.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.inner.pending.get()
    }
}
