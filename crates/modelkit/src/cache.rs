//! Coarse-grained cache invalidation markers.
//!
//! Each aggregate family (totals, weighted totals, extrema) carries exactly
//! one of these flags. Mutations flip every dependent family to `Dirty`;
//! the next aggregate read performs one full rescan and flips it back.
//! There is no per-cell invalidation.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CacheState {
    Clean,
    Dirty,
}

impl CacheState {
    #[inline]
    pub(crate) fn is_dirty(self) -> bool {
        matches!(self, CacheState::Dirty)
    }
}
