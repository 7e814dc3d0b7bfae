/*!

A `Record<S, T>` pairs one payload value (the "store" type `S`) with a
[`KeyCell`](crate::cell::KeyCell) over the key tuple `T`, used purely as a composite
lookup key. It is a passive holder: the tables own records exclusively and do all the
interesting work.

*/

use std::fmt::Debug;

use serde::Serialize;

use crate::cell::{KeyCell, KeyTuple};

/// The contract every payload type must satisfy. Payloads are the values a table is
/// meant to hold and return from lookups: floats, bools, colors, strings.
pub trait StoreValue: Clone + Debug + Serialize + 'static {}
impl<T> StoreValue for T where T: Clone + Debug + Serialize + 'static {}

/// One keyed entry of a table: a payload plus its composite key-cell.
///
/// The set of key types and the payload type are fixed by the record's type; the
/// payload and the individual key slots stay mutable after construction.
#[derive(Clone, Debug, Serialize)]
pub struct Record<S: StoreValue, T: KeyTuple> {
    pub store: S,
    pub keys: KeyCell<T>,
}

impl<S: StoreValue, T: KeyTuple> Record<S, T> {
    /// Creates a record from one payload and one value per declared key type.
    pub fn new(store: S, keys: T) -> Self {
        Self {
            store,
            keys: KeyCell::new(keys),
        }
    }

    /// Renders the payload for human consumption, e.g. in log messages.
    #[must_use]
    pub fn get_display(&self) -> String {
        format!("{:?}", self.store)
    }
}

impl<S: StoreValue + Default, T: KeyTuple + Default> Default for Record<S, T> {
    fn default() -> Self {
        Self {
            store: S::default(),
            keys: KeyCell::default(),
        }
    }
}
