//! # Cache Layer
//!
//! Pluggable cache backends behind a single provider handle, plus the typed
//! stores the student facade reads and writes through.
//!
//! ## Backends
//!
//! - **Redis** (`cache-redis` feature): shared across instances, SCAN-based
//!   pattern deletion
//! - **Moka** (`cache-moka` feature): in-process, for single instances and tests
//! - **NoOp**: used when caching is disabled; every read misses
//!
//! Failures are never swallowed here. A cache that cannot be reached makes
//! the calling operation fail.

pub mod errors;
pub mod pattern;
pub mod provider;
pub mod providers;
pub mod traits;
pub mod typed;

pub use errors::{CacheError, CacheResult};
pub use pattern::{escape_pattern, glob_match};
pub use provider::CacheProvider;
pub use traits::CacheService;
pub use typed::{BucketStore, KeyPatternStore, ListStore, TypedCache};
