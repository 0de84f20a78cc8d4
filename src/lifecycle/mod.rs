//! Startup wiring.
//!
//! [`LifecycleCoordinator::install`] detects the motion flags once, builds
//! every component, and registers each page listener exactly once. The
//! coordinator owns the resulting subscriptions; dropping it detaches them
//! all, stops the cursor loop, kills the reveal triggers and the background
//! loops, so a fresh install starts from a quiet page.

mod progress;

use std::rc::Rc;

pub use progress::{format_percent, ProgressTracker};

use crate::drawer::{DrawerController, ViewportPositioner};
use crate::flags::{Motion, MotionFlags};
use crate::host::{
    AnimationEngine, EventKind, Handler, ListenTarget, Page, PageEvent, Scheduler,
    ScrollTriggers, Subscription,
};
use crate::motion::{
    start_background, BackgroundLoops, CursorFollower, EntranceAnimator, RevealAnimator,
};
use crate::options::{MotionOptions, SelectorOptions};

/// Platform services the coordinator runs against.
pub struct Host<P: Page> {
    /// Document access.
    pub page: Rc<P>,
    /// Frame and timer source.
    pub scheduler: Rc<dyn Scheduler>,
    /// Tweening engine, when the page loaded one.
    pub engine: Option<Rc<dyn AnimationEngine<P::Node>>>,
    /// Scroll-trigger registration, when the page loaded it.
    pub scroll_triggers: Option<Rc<dyn ScrollTriggers<P::Node>>>,
}

impl<P: Page> Host<P> {
    /// Capability flags for this host.
    #[must_use]
    pub fn flags(&self) -> MotionFlags {
        MotionFlags::detect(
            self.page.prefers_reduced_motion(),
            self.engine.is_some(),
            self.scroll_triggers.is_some(),
        )
    }
}

/// Owns every component and page listener for the page lifetime.
pub struct LifecycleCoordinator<P: Page> {
    flags: MotionFlags,
    positioner: ViewportPositioner<P>,
    drawer: Option<DrawerController<P>>,
    cursor: Option<CursorFollower<P>>,
    reveal: Option<RevealAnimator<P>>,
    entrance: Option<EntranceAnimator<P>>,
    progress: Option<ProgressTracker>,
    background: Option<BackgroundLoops<P::Node>>,
    subscriptions: Vec<Subscription>,
}

impl<P: Page + 'static> LifecycleCoordinator<P> {
    /// Initialize every effect and register all listeners.
    ///
    /// Missing markup or a missing capability disables only the affected
    /// component; installation itself never fails.
    pub fn install(host: &Host<P>, options: &MotionOptions) -> Self {
        let flags = host.flags();
        let motion = Motion::new(
            &flags,
            host.engine.clone(),
            host.scroll_triggers.clone(),
        );
        let page = &host.page;
        let sel = &options.selectors;
        log::info!(
            "installing page motion (reduced_motion={}, engine={}, scroll_triggers={})",
            flags.reduced_motion,
            flags.engine_available,
            flags.scroll_triggers_available
        );

        let mut subs = Subscriptions::new(Rc::clone(page));

        let primary_viewer = page.query(&sel.primary_viewer);
        let progress = primary_viewer
            .as_ref()
            .map(|viewer| ProgressTracker::attach(page, viewer, sel));

        let background = match start_background(&motion, &options.background) {
            Ok(loops) => Some(loops),
            Err(e) => {
                log::debug!("background disabled: {e}");
                None
            }
        };

        let cursor = start_cursor(&mut subs, host, options, &flags);
        if let Ok(engine) = motion.engine() {
            watch_visibility(&mut subs, Rc::clone(engine));
        }

        let trigger = page.query(&sel.drawer_trigger);
        let drawer_el = page.query(&sel.drawer);
        let positioner = ViewportPositioner::new(
            page,
            &host.scheduler,
            trigger.clone(),
            page.query(&sel.drawer_panel),
            options.layout_tokens.clone(),
        );
        let _ = positioner.place();
        for kind in [EventKind::Resize, EventKind::Scroll] {
            let p = positioner.clone();
            subs.listen(&ListenTarget::Window, kind, Box::new(move |_| p.schedule()));
        }

        let drawer = match DrawerController::new(
            page,
            &host.scheduler,
            drawer_el.clone(),
            trigger.clone(),
            positioner.clone(),
            &options.drawer,
        ) {
            Ok(drawer) => {
                wire_drawer(&mut subs, &**page, &drawer, sel, trigger, drawer_el);
                Some(drawer)
            }
            Err(e) => {
                log::debug!("drawer disabled: {e}");
                None
            }
        };

        let reveal = match RevealAnimator::install(
            &**page,
            &motion,
            &sel.reveal_blocks,
            &options.reveal,
        ) {
            Ok(reveal) => Some(reveal),
            Err(e) => {
                log::debug!("word reveal disabled: {e}");
                None
            }
        };

        let entrance = page
            .query(&sel.hotspot_viewer)
            .or(primary_viewer)
            .map(|viewer| {
                let entrance = EntranceAnimator::new(
                    page,
                    &motion,
                    viewer.clone(),
                    &sel.hotspots,
                    &options.entrance,
                );
                let e = entrance.clone();
                subs.listen(
                    &ListenTarget::Node(viewer),
                    EventKind::AssetLoad,
                    Box::new(move |_| e.play()),
                );
                entrance
            });

        log::info!("page motion installed with {} listener(s)", subs.list.len());
        Self {
            flags,
            positioner,
            drawer,
            cursor,
            reveal,
            entrance,
            progress,
            background,
            subscriptions: subs.list,
        }
    }

    /// Flags detected at install.
    #[must_use]
    pub fn flags(&self) -> MotionFlags {
        self.flags
    }

    /// Panel positioner.
    #[must_use]
    pub fn positioner(&self) -> &ViewportPositioner<P> {
        &self.positioner
    }

    /// Drawer, when its markup is present.
    #[must_use]
    pub fn drawer(&self) -> Option<&DrawerController<P>> {
        self.drawer.as_ref()
    }

    /// Cursor follower, when enabled.
    #[must_use]
    pub fn cursor(&self) -> Option<&CursorFollower<P>> {
        self.cursor.as_ref()
    }

    /// Word reveal, when enabled.
    #[must_use]
    pub fn reveal(&self) -> Option<&RevealAnimator<P>> {
        self.reveal.as_ref()
    }

    /// Hotspot entrance, when a viewer exists.
    #[must_use]
    pub fn entrance(&self) -> Option<&EntranceAnimator<P>> {
        self.entrance.as_ref()
    }

    /// Loader progress tracker, when a viewer exists.
    #[must_use]
    pub fn progress(&self) -> Option<&ProgressTracker> {
        self.progress.as_ref()
    }

    /// Number of background loops started.
    #[must_use]
    pub fn background_loops(&self) -> usize {
        self.background.as_ref().map_or(0, BackgroundLoops::len)
    }

    /// Number of page-lifetime listeners held, excluding the progress tracker.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.subscriptions.len()
    }
}

impl<P: Page> Drop for LifecycleCoordinator<P> {
    fn drop(&mut self) {
        if let Some(cursor) = &self.cursor {
            cursor.stop();
        }
        log::debug!("page motion uninstalled");
    }
}

struct Subscriptions<P: Page> {
    page: Rc<P>,
    list: Vec<Subscription>,
}

impl<P: Page> Subscriptions<P> {
    fn new(page: Rc<P>) -> Self {
        Self {
            page,
            list: Vec::new(),
        }
    }

    fn listen(
        &mut self,
        target: &ListenTarget<P::Node>,
        kind: EventKind,
        handler: Handler,
    ) {
        self.list.push(self.page.listen(target, kind, handler));
    }
}

fn start_cursor<P: Page + 'static>(
    subs: &mut Subscriptions<P>,
    host: &Host<P>,
    options: &MotionOptions,
    flags: &MotionFlags,
) -> Option<CursorFollower<P>> {
    let follower = match CursorFollower::start(
        &host.page,
        &host.scheduler,
        &options.selectors.cursor_follower,
        &options.cursor,
        flags,
    ) {
        Ok(follower) => follower,
        Err(e) => {
            log::debug!("cursor follow disabled: {e}");
            return None;
        }
    };
    let f = follower.clone();
    subs.listen(
        &ListenTarget::Window,
        EventKind::PointerMove,
        Box::new(move |event| {
            if let PageEvent::PointerMoved { x, y } = *event {
                f.pointer_moved(x, y);
            }
        }),
    );
    Some(follower)
}

/// Pause every engine animation while the tab is hidden.
fn watch_visibility<P: Page>(
    subs: &mut Subscriptions<P>,
    engine: Rc<dyn AnimationEngine<P::Node>>,
) {
    subs.listen(
        &ListenTarget::Document,
        EventKind::VisibilityChange,
        Box::new(move |event| {
            if let PageEvent::VisibilityChanged { hidden } = *event {
                if hidden {
                    engine.pause_all();
                } else {
                    engine.resume_all();
                }
            }
        }),
    );
}

fn wire_drawer<P: Page + 'static>(
    subs: &mut Subscriptions<P>,
    page: &P,
    drawer: &DrawerController<P>,
    sel: &SelectorOptions,
    trigger: Option<P::Node>,
    drawer_el: Option<P::Node>,
) {
    if let Some(trigger) = trigger {
        let d = drawer.clone();
        subs.listen(
            &ListenTarget::Node(trigger),
            EventKind::Click,
            Box::new(move |_| d.toggle()),
        );
    }
    if let Some(root) = drawer_el {
        let closers = page
            .query_in(&root, &sel.drawer_scrim)
            .into_iter()
            .chain(page.query_all_in(&root, &sel.drawer_close));
        for node in closers {
            let d = drawer.clone();
            subs.listen(
                &ListenTarget::Node(node),
                EventKind::Click,
                Box::new(move |_| d.close()),
            );
        }
    }
    let d = drawer.clone();
    subs.listen(
        &ListenTarget::Window,
        EventKind::KeyDown,
        Box::new(move |event| {
            if let PageEvent::KeyDown { key } = event {
                d.key_pressed(key);
            }
        }),
    );
}
