//! Loader progress bar bound to the primary asset viewer.

use std::cell::RefCell;
use std::rc::Rc;

use crate::host::{EventKind, ListenTarget, Page, PageEvent, Subscription};
use crate::options::SelectorOptions;

/// CSS width for a progress fraction: `0.6` → `"60%"`.
#[must_use]
pub fn format_percent(progress: f64) -> String {
    let percent = (progress.clamp(0.0, 1.0) * 100_000.0).round() / 1000.0;
    format!("{percent}%")
}

struct Hooks {
    bar: String,
    fill: String,
    hidden_class: String,
}

/// Mirrors the viewer's load progress onto the bar, and detaches itself once
/// loading completes.
pub struct ProgressTracker {
    subscription: Rc<RefCell<Option<Subscription>>>,
}

impl ProgressTracker {
    /// Listen for progress on `viewer`. The bar and fill are looked up inside
    /// the viewer on every event, so late-rendered markup is picked up.
    pub fn attach<P: Page + 'static>(
        page: &Rc<P>,
        viewer: &P::Node,
        selectors: &SelectorOptions,
    ) -> Self {
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::default();
        let hooks = Hooks {
            bar: selectors.progress_bar.clone(),
            fill: selectors.progress_fill.clone(),
            hidden_class: selectors.progress_hidden_class.clone(),
        };

        let handler_page = Rc::clone(page);
        let handler_viewer = viewer.clone();
        let handler_slot = Rc::clone(&slot);
        let subscription = page.listen(
            &ListenTarget::Node(viewer.clone()),
            EventKind::AssetProgress,
            Box::new(move |event| {
                let PageEvent::AssetProgress { total_progress } = *event else {
                    return;
                };
                let done = report(&*handler_page, &handler_viewer, &hooks, total_progress);
                if done {
                    if let Some(sub) = handler_slot.borrow_mut().take() {
                        log::debug!("asset loaded; progress listener detached");
                        sub.cancel();
                    }
                }
            }),
        );
        *slot.borrow_mut() = Some(subscription);
        Self { subscription: slot }
    }

    /// Whether the tracker is still listening.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.subscription.borrow().is_some()
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        if let Some(sub) = self.subscription.borrow_mut().take() {
            sub.cancel();
        }
    }
}

/// Apply one progress report. Returns `true` once loading is complete.
fn report<P: Page>(page: &P, viewer: &P::Node, hooks: &Hooks, progress: f64) -> bool {
    log::trace!("asset progress {progress}");
    if let Some(fill) = page.query_in(viewer, &hooks.fill) {
        page.set_style(&fill, "width", &format_percent(progress));
    }
    let done = progress >= 1.0;
    if let Some(bar) = page.query_in(viewer, &hooks.bar) {
        if done {
            page.add_class(&bar, &hooks.hidden_class);
        } else {
            page.remove_class(&bar, &hooks.hidden_class);
        }
    }
    done
}
