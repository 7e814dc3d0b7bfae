//! Multi-key typed property tables with compile-time accessor dispatch
//!
//! `multikey` is the property store that underlies stateful entities in a
//! framework: visual sprites, animated blocks, text objects, configuration
//! sections. Every such entity holds a collection of strongly-typed properties,
//! each addressable by one of several key values of different types
//! simultaneously, with lookup, update, iteration and size queries resolved at
//! compile time rather than through a runtime dictionary.
//!
//! The store is built leaf-first:
//! * [`cell`] — the tagged multi-value cell: one value per declared key type,
//!   all coexisting, with typed set/get and two equality strengths.
//! * [`record`] — a payload paired with a cell used purely as its composite key.
//! * [`multi_map`] — the growable, insertion-ordered table with upsert-by-key
//!   semantics.
//! * [`fixed_multi_map`] — the closed-capacity table for enumerable property
//!   sets, with positional access as a first-class operation.
//! * [`table`] and [`access`] — the composition layer: an entity embeds one
//!   table per payload-type family and exposes a single `get`/`set`/`index`/
//!   `size` surface, routed statically by payload and key type.
//!
//! The tables perform no synchronization and no I/O; callers serialize access.

pub mod access;
pub mod cell;
pub mod error;
pub mod fixed_multi_map;
pub mod log;
pub mod macros;
pub mod multi_map;
pub mod prelude;
pub mod record;
pub mod table;

pub use crate::access::{PropertiesExt, TableOf};
pub use crate::cell::KeyCell;
pub use crate::log::{debug, error, info, trace, warn};
pub use crate::error::MultikeyError;
pub use crate::fixed_multi_map::FixedMultiMap;
pub use crate::multi_map::MultiMap;
pub use crate::record::Record;

// Re-exported for the `define_key_enum!` expansion.
pub use paste;
pub use serde;
pub use serde_derive;
