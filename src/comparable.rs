use crate::error::Result;

/// Comparison capability for keys of an [`UnrestrictedAvlTree`].
///
/// Unlike [`Ord`], the three relations do not have to come from one total
/// order. They only need to be consistent for the pairs of key shapes that a
/// tree actually compares: a point probe against stored ranges, for example,
/// where `equal` means "falls inside". A tree that stores ranges and is
/// queried with points then behaves as an interval-search tree.
///
/// The probe (the key being inserted, removed or searched for) is always the
/// receiver and the stored key is always `other`, so a probe shape only needs
/// to support comparisons against the stored shape.
///
/// An implementation that receives a shape pair it does not handle returns
/// [`Error::UnsupportedComparisonKind`](crate::Error::UnsupportedComparisonKind).
/// The error propagates out of the tree operation and the tree is left
/// unchanged. The tree does not check that the three relations agree with each
/// other; when none of them holds the operation fails with
/// [`Error::Incomparable`](crate::Error::Incomparable).
///
/// [`UnrestrictedAvlTree`]: crate::UnrestrictedAvlTree
pub trait Comparable {
    /// Short name of this key's shape, used in error reports.
    fn kind(&self) -> &'static str;

    fn less(&self, other: &Self) -> Result<bool>;

    fn greater(&self, other: &Self) -> Result<bool>;

    fn equal(&self, other: &Self) -> Result<bool>;
}
