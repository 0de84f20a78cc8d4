//! Crate-level error types.

use std::fmt;

/// Errors produced by the page-motion crate.
///
/// None of these are fatal to the page: components that hit one degrade to
/// a static presentation and the coordinator carries on without them.
#[derive(Debug)]
pub enum MotionError {
    /// A required page hook (selector or role) matched nothing.
    MissingElement(String),
    /// The environment cannot run an effect (no engine, reduced motion,
    /// no scroll triggers).
    UnsupportedEnvironment(&'static str),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// A browser/JS call failed.
    Js(String),
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingElement(hook) => {
                write!(f, "missing page element: {hook}")
            }
            Self::UnsupportedEnvironment(reason) => {
                write!(f, "unsupported environment: {reason}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Js(msg) => write!(f, "JS error: {msg}"),
        }
    }
}

impl std::error::Error for MotionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MotionError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
