//! Identity contracts for keys stored in dense containers.
//!
//! Every key type used with an [`IndexSet`](crate::index_set::IndexSet) must
//! report a stable, zero-based integer index that is unique within its
//! universe. Closed key sets (enums) map their discriminant directly; open
//! key sets hand out indices at registration time. Indices need not be
//! contiguous; storage is sized to the largest index, so sparse numbering
//! trades memory for simplicity.

/// A key with a stable small-integer identity.
pub trait Indexed {
    /// Zero-based index, unique within one key universe.
    fn index(&self) -> usize;
}

/// A key that additionally carries a display/lookup name.
pub trait Named {
    fn name(&self) -> &str;
}
