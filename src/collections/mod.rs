//! Generic collection types.
//!
//! - [`WeightedList`] — ordered elements with integer weights, normalized lazily
//! - [`BoundedList`] — fixed-capacity list that evicts its oldest element
//! - [`AutoMap`] / [`CountMap`] — auto-vivifying map and occurrence counter

mod bounded_list;
mod count_map;
mod weighted_list;

pub use bounded_list::BoundedList;
pub use count_map::{AutoMap, CountMap};
pub use weighted_list::WeightedList;
