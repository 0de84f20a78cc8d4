// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Motion and layout orchestration for an interactive product page.
//!
//! The crate drives five effects from page events: a cursor-following
//! element, a drawer panel anchored under its trigger, a scroll-scrubbed
//! word reveal, a one-shot hotspot entrance when the 3-D viewer loads, and
//! ambient background loops that pause while the tab is hidden.
//!
//! # Key entry points
//!
//! - [`lifecycle::LifecycleCoordinator`] - installs every effect and owns
//!   the page listeners
//! - [`options::MotionOptions`] - selectors, timings and styling, loadable
//!   from TOML presets
//! - [`host`] - the traits the core runs against, plus in-memory
//!   implementations for tests and the `headless` feature
//!
//! # Architecture
//!
//! The core never touches a browser API. It talks to the page through
//! [`host::Page`], [`host::Scheduler`], [`host::AnimationEngine`] and
//! [`host::ScrollTriggers`]. Capability checks happen once at install and
//! are carried in [`flags::MotionFlags`]; under reduced motion the engine is
//! withheld entirely. The `web` feature adds DOM, frame-loop and GSAP
//! implementations and a wasm entry point.

pub mod content;
pub mod drawer;
pub mod error;
pub mod flags;
pub mod host;
pub mod lifecycle;
pub mod motion;
pub mod options;
pub mod util;
#[cfg(feature = "web")]
pub mod web;
