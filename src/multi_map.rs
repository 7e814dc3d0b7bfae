/*!

`MultiMap<S, T>`: the growable table. An insertion-ordered sequence of
[`Record`](crate::record::Record)s holding payloads of type `S`, each addressable by
any of the key types declared in the tuple `T`.

Inserts are upserts on the composite key: a record whose key-cell "one-equals" a
resident record's cell overwrites that record's payload in place instead of appending
(the resident key-cell is preserved). `find`/`at`/`contains` probe a single typed key
slot; `find_if` takes a whole-record predicate for queries the key API cannot express.

All lookups are linear scans. These tables hold small, bounded sets of named
properties (tens of entries), not general key-value data, so no index structure is
maintained. The table performs no synchronization; callers serialize access.

```rust
use multikey::multi_map::MultiMap;
use multikey::record::Record;

let mut map: MultiMap<i32, (char, u32)> = MultiMap::new();
map.insert(Record::new(10, ('a', 100)));
map.insert(Record::new(20, ('b', 200)));

assert_eq!(map.at(&'a').unwrap(), &10);
assert_eq!(map.at(&200u32).unwrap(), &20);
```

*/

use log::trace;

use crate::cell::{KeySlot, KeyTuple, KeyValue};
use crate::error::MultikeyError;
use crate::record::{Record, StoreValue};

/// The growable, insertion-ordered multi-key table.
///
/// Invariant: no two resident records compare equal under the key-cell's "one-equal"
/// relation. `insert` maintains this by upserting.
#[derive(Clone, Debug)]
pub struct MultiMap<S: StoreValue, T: KeyTuple> {
    records: Vec<Record<S, T>>,
}

impl<S: StoreValue, T: KeyTuple> Default for MultiMap<S, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: StoreValue, T: KeyTuple> MultiMap<S, T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    /// Current number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Inserts a record, or — if a resident record's key-cell one-equals the new
    /// record's cell — overwrites the first such record's payload in place. The
    /// resident record keeps its position and its key-cell. Returns `true` if a new
    /// record was appended.
    pub fn insert(&mut self, record: Record<S, T>) -> bool {
        match self
            .records
            .iter_mut()
            .find(|resident| resident.keys.one_equal(&record.keys))
        {
            Some(resident) => {
                trace!(
                    "upsert hit: payload {} replaced by {}",
                    resident.get_display(),
                    record.get_display()
                );
                resident.store = record.store;
                false
            }
            None => {
                self.records.push(record);
                true
            }
        }
    }

    /// Alias of [`MultiMap::insert`] for call sites that read like sequence appends.
    pub fn push(&mut self, record: Record<S, T>) {
        self.insert(record);
    }

    /// Returns the first record with a `K` slot equal to `key`.
    #[must_use]
    pub fn find<K, I>(&self, key: &K) -> Option<&Record<S, T>>
    where
        T: KeySlot<K, I>,
        K: KeyValue,
    {
        self.records.iter().find(|record| record.keys.matches(key))
    }

    /// Mutable variant of [`MultiMap::find`].
    pub fn find_mut<K, I>(&mut self, key: &K) -> Option<&mut Record<S, T>>
    where
        T: KeySlot<K, I>,
        K: KeyValue,
    {
        self.records
            .iter_mut()
            .find(|record| record.keys.matches(key))
    }

    /// Returns the payload for `key`, failing with
    /// [`MultikeyError::KeyNotFound`] if no record matches.
    pub fn at<K, I>(&self, key: &K) -> Result<&S, MultikeyError>
    where
        T: KeySlot<K, I>,
        K: KeyValue,
    {
        self.find(key)
            .map(|record| &record.store)
            .ok_or_else(|| MultikeyError::KeyNotFound(format!("{key:?}")))
    }

    /// Mutable variant of [`MultiMap::at`].
    pub fn at_mut<K, I>(&mut self, key: &K) -> Result<&mut S, MultikeyError>
    where
        T: KeySlot<K, I>,
        K: KeyValue,
    {
        self.find_mut(key)
            .map(|record| &mut record.store)
            .ok_or_else(|| MultikeyError::KeyNotFound(format!("{key:?}")))
    }

    /// Returns a mutable reference to the payload for `key`, appending a
    /// default-valued record first if no record matches. The appended record's `K`
    /// slot is set to `key`; its remaining slots and payload are default-normalized.
    ///
    /// This is the assign-through entry point: `*map.get_or_insert('a') = 5;`.
    pub fn get_or_insert<K, I>(&mut self, key: K) -> &mut S
    where
        T: KeySlot<K, I> + Default,
        K: KeyValue,
        S: Default,
    {
        let index = match self
            .records
            .iter()
            .position(|record| record.keys.matches(&key))
        {
            Some(index) => index,
            None => {
                trace!("upsert miss: appending default record for key {key:?}");
                let mut record = Record::<S, T>::default();
                record.keys.set(key);
                self.records.push(record);
                self.records.len() - 1
            }
        };
        &mut self.records[index].store
    }

    /// True if any record has a `K` slot equal to `key`. No mutation.
    #[must_use]
    pub fn contains<K, I>(&self, key: &K) -> bool
    where
        T: KeySlot<K, I>,
        K: KeyValue,
    {
        self.find(key).is_some()
    }

    /// Linear scan with a caller-supplied predicate over whole records.
    pub fn find_if<P>(&self, predicate: P) -> Option<&Record<S, T>>
    where
        P: FnMut(&&Record<S, T>) -> bool,
    {
        self.records.iter().find(predicate)
    }

    /// Removes and returns the first record with a `K` slot equal to `key`. The
    /// order of the remaining records is preserved.
    pub fn erase<K, I>(&mut self, key: &K) -> Option<Record<S, T>>
    where
        T: KeySlot<K, I>,
        K: KeyValue,
    {
        let index = self
            .records
            .iter()
            .position(|record| record.keys.matches(key))?;
        trace!("erasing record for key {key:?}");
        Some(self.records.remove(index))
    }

    /// Removes and returns the record at `index`, shifting later records left.
    /// Panics if `index` is out of range.
    pub fn remove(&mut self, index: usize) -> Record<S, T> {
        self.records.remove(index)
    }

    /// Removes the records in `range`, returning them as an iterator. The order of
    /// the remaining records is preserved.
    pub fn drain<R>(&mut self, range: R) -> std::vec::Drain<'_, Record<S, T>>
    where
        R: std::ops::RangeBounds<usize>,
    {
        self.records.drain(range)
    }

    /// Keeps only the records for which the predicate holds. Stable.
    pub fn retain<P>(&mut self, predicate: P)
    where
        P: FnMut(&Record<S, T>) -> bool,
    {
        self.records.retain(predicate);
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Exchanges the contents of two tables.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.records, &mut other.records);
    }

    /// Positional access to a record. Panics if `index` is out of range; use
    /// [`MultiMap::get_index`] for the checked form.
    #[must_use]
    pub fn index(&self, index: usize) -> &Record<S, T> {
        &self.records[index]
    }

    /// Mutable variant of [`MultiMap::index`].
    pub fn index_mut(&mut self, index: usize) -> &mut Record<S, T> {
        &mut self.records[index]
    }

    /// Bounds-checked positional access.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&Record<S, T>> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record<S, T>> {
        self.records.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Record<S, T>> {
        self.records.iter_mut()
    }
}

impl<S: StoreValue, T: KeyTuple> From<Vec<Record<S, T>>> for MultiMap<S, T> {
    /// Builds a table from an ordered record list, applying upsert semantics to any
    /// colliding composite keys.
    fn from(records: Vec<Record<S, T>>) -> Self {
        records.into_iter().collect()
    }
}

impl<S: StoreValue, T: KeyTuple> FromIterator<Record<S, T>> for MultiMap<S, T> {
    fn from_iter<II: IntoIterator<Item = Record<S, T>>>(iter: II) -> Self {
        let mut map = Self::new();
        for record in iter {
            map.insert(record);
        }
        map
    }
}

impl<S: StoreValue, T: KeyTuple> IntoIterator for MultiMap<S, T> {
    type Item = Record<S, T>;
    type IntoIter = std::vec::IntoIter<Record<S, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a, S: StoreValue, T: KeyTuple> IntoIterator for &'a MultiMap<S, T> {
    type Item = &'a Record<S, T>;
    type IntoIter = std::slice::Iter<'a, Record<S, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, S: StoreValue, T: KeyTuple> IntoIterator for &'a mut MultiMap<S, T> {
    type Item = &'a mut Record<S, T>;
    type IntoIter = std::slice::IterMut<'a, Record<S, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::MultiMap;
    use crate::error::MultikeyError;
    use crate::record::Record;

    fn sample() -> MultiMap<i32, (char, u32)> {
        let mut map = MultiMap::new();
        map.insert(Record::new(10, ('a', 100)));
        map.insert(Record::new(20, ('b', 200)));
        map.insert(Record::new(30, ('c', 300)));
        map
    }

    #[test]
    fn find_by_any_key_type() {
        let map = sample();
        assert_eq!(map.find(&'b').unwrap().store, 20);
        assert_eq!(map.find(&300u32).unwrap().store, 30);
        assert!(map.find(&'z').is_none());
    }

    #[test]
    fn upsert_replaces_payload_in_place() {
        // A second insert with a colliding key leaves one record, holding the
        // second payload, at the first record's position.
        let mut map = sample();
        let appended = map.insert(Record::new(99, ('a', 777)));
        assert!(!appended);
        assert_eq!(map.len(), 3);
        assert_eq!(map.index(0).store, 99);
    }

    #[test]
    fn upsert_preserves_resident_key_cell() {
        // {10,'a',100} then {20,'a',200} leaves one record with payload 20, still
        // findable by 100 but not by 200.
        let mut map: MultiMap<i32, (char, u32)> = MultiMap::new();
        map.insert(Record::new(10, ('a', 100)));
        map.insert(Record::new(20, ('a', 200)));
        assert_eq!(map.len(), 1);
        assert_eq!(map.at(&'a').unwrap(), &20);
        assert_eq!(map.at(&100u32).unwrap(), &20);
        assert!(!map.contains(&200u32));
    }

    #[test]
    fn at_fails_on_missing_key_for_every_key_type() {
        let map = sample();
        assert_eq!(
            map.at(&'z'),
            Err(MultikeyError::KeyNotFound("'z'".to_string()))
        );
        assert_eq!(
            map.at(&999u32),
            Err(MultikeyError::KeyNotFound("999".to_string()))
        );
    }

    #[test]
    fn get_or_insert_appends_default_on_miss() {
        let mut map = sample();
        *map.get_or_insert('d') = 40;
        assert_eq!(map.len(), 4);
        assert_eq!(map.at(&'d').unwrap(), &40);
        // The non-probed slot of the auto-created cell is default-normalized.
        assert_eq!(map.index(3).keys.get::<u32, _>(), 0);
    }

    #[test]
    fn get_or_insert_hits_without_growing() {
        let mut map = sample();
        *map.get_or_insert('a') = -1;
        assert_eq!(map.len(), 3);
        assert_eq!(map.at(&'a').unwrap(), &-1);
    }

    #[test]
    fn erase_is_stable() {
        let mut map = sample();
        let removed = map.erase(&'b').unwrap();
        assert_eq!(removed.store, 20);
        assert_eq!(map.len(), 2);
        assert_eq!(map.index(0).store, 10);
        assert_eq!(map.index(1).store, 30);
        assert!(map.erase(&'b').is_none());
    }

    #[test]
    fn find_if_sees_whole_records() {
        let map = sample();
        let record = map.find_if(|r| r.store > 15 && r.keys.matches(&'c')).unwrap();
        assert_eq!(record.store, 30);
        assert!(map.find_if(|r| r.store > 99).is_none());
    }

    #[test]
    fn drain_removes_a_range_stably() {
        let mut map = sample();
        let drained: Vec<i32> = map.drain(0..2).map(|r| r.store).collect();
        assert_eq!(drained, vec![10, 20]);
        assert_eq!(map.len(), 1);
        assert_eq!(map.at(&'c').unwrap(), &30);
    }

    #[test]
    fn retain_and_clear() {
        let mut map = sample();
        map.retain(|r| r.store >= 20);
        assert_eq!(map.len(), 2);
        assert_eq!(map.index(0).store, 20);
        map.clear();
        assert!(map.is_empty());
    }

    #[test]
    fn swap_exchanges_contents() {
        let mut a = sample();
        let mut b: MultiMap<i32, (char, u32)> = MultiMap::new();
        a.swap(&mut b);
        assert!(a.is_empty());
        assert_eq!(b.len(), 3);
    }

    #[test]
    fn from_vec_applies_upsert() {
        let map = MultiMap::from(vec![
            Record::new(1, ('a', 100)),
            Record::new(2, ('a', 200)),
            Record::new(3, ('b', 300)),
        ]);
        assert_eq!(map.len(), 2);
        assert_eq!(map.at(&'a').unwrap(), &2);
    }

    #[test]
    fn iteration_preserves_insertion_order() {
        let map = sample();
        let payloads: Vec<i32> = map.iter().map(|r| r.store).collect();
        assert_eq!(payloads, vec![10, 20, 30]);
    }
}
