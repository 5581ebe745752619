//! FxHash-backed collection aliases.
//!
//! All map/set usage in the workspace goes through these aliases so the
//! hasher can be swapped in one place.

/// HashMap with the FxHash hasher.
pub type FxHashMap<K, V> = rustc_hash::FxHashMap<K, V>;

/// HashSet with the FxHash hasher.
pub type FxHashSet<T> = rustc_hash::FxHashSet<T>;
