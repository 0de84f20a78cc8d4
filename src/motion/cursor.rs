//! Cursor-follow: an element that eases toward the pointer every frame.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::Vec2;

use crate::error::MotionError;
use crate::flags::MotionFlags;
use crate::host::{Page, Scheduler};
use crate::options::CursorOptions;

/// Exponential-smoothing stepper.
///
/// Each [`step`](Self::step) closes `1/K` of the remaining distance to the
/// target, so the distance decays geometrically and never overshoots for
/// `K >= 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interpolator {
    position: Vec2,
    target: Vec2,
    smoothing: f32,
}

impl Interpolator {
    /// Stepper at the origin with smoothing constant `K` (clamped to >= 1).
    #[must_use]
    pub fn new(smoothing: f32) -> Self {
        let smoothing = if smoothing.is_finite() {
            smoothing.max(1.0)
        } else {
            1.0
        };
        Self {
            position: Vec2::ZERO,
            target: Vec2::ZERO,
            smoothing,
        }
    }

    /// Record the latest pointer position. Does not move the position.
    pub fn set_target(&mut self, x: f32, y: f32) {
        self.target = Vec2::new(x, y);
    }

    /// Advance one frame and return the new position.
    pub fn step(&mut self) -> Vec2 {
        self.position += (self.target - self.position) / self.smoothing;
        self.position
    }

    /// Current interpolated position.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Last recorded target.
    #[must_use]
    pub fn target(&self) -> Vec2 {
        self.target
    }

    /// Effective smoothing constant.
    #[must_use]
    pub fn smoothing(&self) -> f32 {
        self.smoothing
    }

    /// CSS transform for the current position, rounded to whole pixels.
    #[must_use]
    pub fn transform(&self) -> String {
        let x = round_half_up(self.position.x);
        let y = round_half_up(self.position.y);
        format!("translate({x}px, {y}px)")
    }
}

/// Round to the nearest integer, halves toward +infinity.
fn round_half_up(v: f32) -> i64 {
    (v + 0.5).floor() as i64
}

struct FollowerInner<P: Page> {
    page: Rc<P>,
    scheduler: Rc<dyn Scheduler>,
    element: P::Node,
    interpolator: RefCell<Interpolator>,
    running: Cell<bool>,
}

/// Drives an [`Interpolator`] from the frame loop and writes its transform
/// onto the followed element.
pub struct CursorFollower<P: Page> {
    inner: Rc<FollowerInner<P>>,
}

impl<P: Page> Clone for CursorFollower<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<P: Page> CursorFollower<P> {
    /// End the frame loop. The frame already queued runs as a no-op.
    pub fn stop(&self) {
        self.inner.running.set(false);
    }

    /// Whether the frame loop is still scheduling itself.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.inner.running.get()
    }
}

impl<P: Page + 'static> CursorFollower<P> {
    /// Start following with the element matching `selector`. The loop
    /// renders once immediately and then every frame until [`stop`](Self::stop).
    ///
    /// Like every animating component it stays inert under reduced motion or
    /// without an animation engine.
    pub fn start(
        page: &Rc<P>,
        scheduler: &Rc<dyn Scheduler>,
        selector: &str,
        options: &CursorOptions,
        flags: &MotionFlags,
    ) -> Result<Self, MotionError> {
        flags.require_animation()?;
        let element = page
            .query(selector)
            .ok_or_else(|| MotionError::MissingElement(selector.to_owned()))?;
        let inner = Rc::new(FollowerInner {
            page: Rc::clone(page),
            scheduler: Rc::clone(scheduler),
            element,
            interpolator: RefCell::new(Interpolator::new(options.smoothing)),
            running: Cell::new(true),
        });
        Self::tick(&inner);
        Ok(Self { inner })
    }

    /// Update the target from a pointer-move event.
    pub fn pointer_moved(&self, x: f32, y: f32) {
        self.inner.interpolator.borrow_mut().set_target(x, y);
    }

    /// Snapshot of the interpolator state.
    #[must_use]
    pub fn interpolator(&self) -> Interpolator {
        *self.inner.interpolator.borrow()
    }

    fn tick(inner: &Rc<FollowerInner<P>>) {
        if !inner.running.get() {
            return;
        }
        let transform = {
            let mut interp = inner.interpolator.borrow_mut();
            let _ = interp.step();
            interp.transform()
        };
        inner.page.set_style(&inner.element, "transform", &transform);

        let next = Rc::clone(inner);
        inner
            .scheduler
            .request_frame(Box::new(move || Self::tick(&next)));
    }
}
