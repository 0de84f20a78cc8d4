//! Engine- and frame-driven effects.

pub mod background;
pub mod cursor;
pub mod entrance;
pub mod reveal;

pub use background::{start_background, BackgroundLoops};
pub use cursor::{CursorFollower, Interpolator};
pub use entrance::EntranceAnimator;
pub use reveal::{split_units, RevealAnimator, RevealSchedule};
