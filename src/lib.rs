//! # u-collections
//!
//! Generic collection primitives for the U-Engine ecosystem.
//!
//! The centerpiece is [`WeightedList`], an ordered list whose elements carry
//! positive integer weights and which reports each element's share of the
//! total as a normalized `f64`. Normalization is deferred until a weight is
//! read and cached until the next mutation.
//!
//! ## Modules
//!
//! - [`collections`] — `WeightedList`, `BoundedList`, `AutoMap`, `CountMap`
//! - [`random`] — Seeded RNG and integer-unit weighted sampling
//! - [`error`] — `CollectionError`, shared by every fallible operation
//!
//! ## Design Philosophy
//!
//! - **Strong error safety**: a failed call leaves the collection unchanged
//! - **No internal locking**: collections are plain values; wrap them in a
//!   `Mutex` to share across threads
//! - **Property-based testing**: invariants verified via proptest
//!
//! ## Features
//!
//! - `serde` — `Serialize`/`Deserialize` for every collection. Deserialized
//!   values are re-validated.

pub mod collections;
pub mod error;
pub mod random;

pub use collections::{AutoMap, BoundedList, CountMap, WeightedList};
pub use error::{CollectionError, Result};
