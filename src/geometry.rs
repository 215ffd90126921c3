//! One-dimensional shapes for interval lookups.
//!
//! [`Geometric`] is the closed set of key shapes understood by this module:
//! points and closed ranges on the `f32` line. Ranges stored in an
//! [`UnrestrictedAvlTree`](crate::UnrestrictedAvlTree) can be searched with a
//! point probe, which finds the range containing it.
//!
//! Relations, for a probe on the left and a stored key on the right:
//!
//! | probe \ stored | range `[a, b]` | point `q` |
//! |---|---|---|
//! | point `x` | `x < a` / `x > b` / `a <= x <= b` | `x < q` / `x > q` / `x == q` |
//! | range `[c, d]` | `d < a` / `c > b` / `c == a && d == b` | `d < q` / `c > q` / `c <= q <= d` |
//!
//! Overlapping but unequal ranges are neither less, greater nor equal, so a
//! tree rejects them with [`Error::Incomparable`]. A point with a NaN
//! coordinate has no place on the line and fails every comparison with
//! [`Error::UnsupportedComparisonKind`].

use crate::comparable::Comparable;
use crate::error::{Error, Result};

/// A closed interval `[start, end]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Range {
    start: f32,
    end: f32,
}

impl Range {
    pub fn new(start: f32, end: f32) -> Result<Self> {
        if start.is_nan() || end.is_nan() || start > end {
            return Err(Error::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    #[inline]
    pub fn start(&self) -> f32 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> f32 {
        self.end
    }

    #[inline]
    pub fn contains(&self, x: f32) -> bool {
        self.start <= x && x <= self.end
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Geometric {
    Point(f32),
    Range(Range),
}

impl Geometric {
    pub fn point(x: f32) -> Self {
        Self::Point(x)
    }

    pub fn range(start: f32, end: f32) -> Result<Self> {
        Range::new(start, end).map(Self::Range)
    }

    pub fn as_range(&self) -> Option<&Range> {
        match self {
            Self::Range(range) => Some(range),
            Self::Point(_) => None,
        }
    }

    fn check(&self, other: &Self) -> Result<()> {
        if self.kind() == "nan" || other.kind() == "nan" {
            return Err(Error::unsupported(self.kind(), other.kind()));
        }
        Ok(())
    }
}

impl Default for Geometric {
    fn default() -> Self {
        Self::Point(0.0)
    }
}

impl From<Range> for Geometric {
    fn from(range: Range) -> Self {
        Self::Range(range)
    }
}

impl Comparable for Geometric {
    fn kind(&self) -> &'static str {
        match self {
            Self::Point(x) if x.is_nan() => "nan",
            Self::Point(_) => "point",
            Self::Range(_) => "range",
        }
    }

    fn less(&self, other: &Self) -> Result<bool> {
        self.check(other)?;
        Ok(match (self, other) {
            (Self::Point(x), Self::Point(q)) => x < q,
            (Self::Point(x), Self::Range(r)) => *x < r.start,
            (Self::Range(c), Self::Point(q)) => c.end < *q,
            (Self::Range(c), Self::Range(r)) => c.end < r.start,
        })
    }

    fn greater(&self, other: &Self) -> Result<bool> {
        self.check(other)?;
        Ok(match (self, other) {
            (Self::Point(x), Self::Point(q)) => x > q,
            (Self::Point(x), Self::Range(r)) => *x > r.end,
            (Self::Range(c), Self::Point(q)) => c.start > *q,
            (Self::Range(c), Self::Range(r)) => c.start > r.end,
        })
    }

    fn equal(&self, other: &Self) -> Result<bool> {
        self.check(other)?;
        Ok(match (self, other) {
            (Self::Point(x), Self::Point(q)) => x == q,
            (Self::Point(x), Self::Range(r)) => r.contains(*x),
            (Self::Range(c), Self::Point(q)) => c.contains(*q),
            (Self::Range(c), Self::Range(r)) => c == r,
        })
    }
}
