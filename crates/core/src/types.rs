//! Key type definitions for the Arbor index.

/// Default key type stored by the index.
///
/// Keys are totally-ordered scalars. The index itself accepts any
/// `Copy + Ord` scalar and falls back to this type when none is named.
pub type Key = i64;
