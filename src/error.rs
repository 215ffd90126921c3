use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A comparison met a pair of key shapes its implementation does not
    /// support.
    #[error("unsupported comparison: {probe} against stored {stored}")]
    UnsupportedComparisonKind {
        probe: &'static str,
        stored: &'static str,
    },
    /// None of `less`, `greater` or `equal` held for a pair of keys.
    #[error("keys are incomparable: {probe} against stored {stored}")]
    Incomparable {
        probe: &'static str,
        stored: &'static str,
    },
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    #[error("invalid range [{start}, {end}]")]
    InvalidRange { start: f32, end: f32 },
}

impl Error {
    pub fn unsupported(probe: &'static str, stored: &'static str) -> Self {
        Self::UnsupportedComparisonKind { probe, stored }
    }
}
