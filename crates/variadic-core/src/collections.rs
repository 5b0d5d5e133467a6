//! Hash map alias for trait stores.
//!
//! Trait stores are keyed by `TypeId`, which already carries a good hash, so
//! the fast FxHash maps are the default. Enable the `std-hash` feature to fall
//! back to SipHash (useful when comparing behaviour against std collections).

#[cfg(feature = "std-hash")]
pub mod map {
    pub use std::collections::HashMap;
}

#[cfg(not(feature = "std-hash"))]
pub mod map {
    pub use rustc_hash::FxHashMap as HashMap;
}
