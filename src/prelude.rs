pub use crate::access::{PropertiesExt, TableOf};
pub use crate::cell::{KeyCell, KeySlot, KeyTuple, KeyValue};
pub use crate::error::MultikeyError;
pub use crate::fixed_multi_map::FixedMultiMap;
pub use crate::log::{debug, error, info, trace, warn};
pub use crate::multi_map::MultiMap;
pub use crate::record::{Record, StoreValue};
pub use crate::table::{PropertyTable, TableCore};
pub use crate::{define_key_enum, define_tables};
