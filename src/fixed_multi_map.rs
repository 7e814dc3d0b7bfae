/*!

`FixedMultiMap<S, T, N>`: the fixed-capacity table. The lookup surface of
[`MultiMap`](crate::multi_map::MultiMap) backed by a `[Record; N]` whose slot count
never changes. The records are the enumerable property slots of an entity class —
typically one slot per variant of a key enum — so positional access via `index` is a
first-class operation, independent of any key comparison.

There is no insert or erase. `assign` overwrites the payload of a matching slot and is
a deliberate silent no-op when no slot matches: a closed table cannot grow. Callers
that need insertion semantics belong on the growable table.

Construction takes a `[Record; N]`, so supplying the wrong number of initializers is a
compile-time failure rather than a runtime surprise. `TryFrom<Vec<_>>` covers the
runtime path and reports [`MultikeyError::CapacityMismatch`] on a length mismatch.

*/

use log::trace;

use crate::cell::{KeySlot, KeyTuple, KeyValue};
use crate::error::MultikeyError;
use crate::record::{Record, StoreValue};

/// The fixed-capacity multi-key table. `N` is the slot count for the table's
/// lifetime.
#[derive(Clone, Debug)]
pub struct FixedMultiMap<S: StoreValue, T: KeyTuple, const N: usize> {
    records: [Record<S, T>; N],
}

impl<S: StoreValue, T: KeyTuple, const N: usize> FixedMultiMap<S, T, N> {
    /// Builds the table from exactly `N` records, assigned positionally.
    pub fn new(records: [Record<S, T>; N]) -> Self {
        Self { records }
    }

    /// Builds the table by calling `f` for each slot position in order.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: FnMut(usize) -> Record<S, T>,
    {
        Self {
            records: std::array::from_fn(f),
        }
    }

    /// The slot count. Constant for the table's lifetime.
    #[must_use]
    pub const fn len(&self) -> usize {
        N
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        N == 0
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

    /// Mutable variant of [`FixedMultiMap::find`].
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
    /// [`MultikeyError::KeyNotFound`] if no slot matches.
    pub fn at<K, I>(&self, key: &K) -> Result<&S, MultikeyError>
    where
        T: KeySlot<K, I>,
        K: KeyValue,
    {
        self.find(key)
            .map(|record| &record.store)
            .ok_or_else(|| MultikeyError::KeyNotFound(format!("{key:?}")))
    }

    /// Mutable variant of [`FixedMultiMap::at`].
    pub fn at_mut<K, I>(&mut self, key: &K) -> Result<&mut S, MultikeyError>
    where
        T: KeySlot<K, I>,
        K: KeyValue,
    {
        self.find_mut(key)
            .map(|record| &mut record.store)
            .ok_or_else(|| MultikeyError::KeyNotFound(format!("{key:?}")))
    }

    /// Overwrites the payload of the slot whose `K` key equals `key`. If no slot
    /// matches, the table is left untouched and `false` is returned — a closed table
    /// cannot grow.
    pub fn assign<K, I>(&mut self, key: &K, value: S) -> bool
    where
        T: KeySlot<K, I>,
        K: KeyValue,
    {
        match self.find_mut(key) {
            Some(record) => {
                record.store = value;
                true
            }
            None => {
                trace!("assign miss on closed table: key {key:?} dropped");
                false
            }
        }
    }

    /// True if any slot's `K` key equals `key`. No mutation.
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

    /// Positional access, independent of key comparison. Panics if `index` is out of
    /// range; use [`FixedMultiMap::get_index`] for the checked form.
    #[must_use]
    pub fn index(&self, index: usize) -> &Record<S, T> {
        &self.records[index]
    }

    /// Mutable variant of [`FixedMultiMap::index`].
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

impl<S: StoreValue, T: KeyTuple, const N: usize> TryFrom<Vec<Record<S, T>>>
    for FixedMultiMap<S, T, N>
{
    type Error = MultikeyError;

    /// The runtime construction path. The record count must equal `N` exactly.
    fn try_from(records: Vec<Record<S, T>>) -> Result<Self, Self::Error> {
        let actual = records.len();
        let records: [Record<S, T>; N] = records
            .try_into()
            .map_err(|_| MultikeyError::CapacityMismatch {
                expected: N,
                actual,
            })?;
        Ok(Self { records })
    }
}

impl<'a, S: StoreValue, T: KeyTuple, const N: usize> IntoIterator for &'a FixedMultiMap<S, T, N> {
    type Item = &'a Record<S, T>;
    type IntoIter = std::slice::Iter<'a, Record<S, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, S: StoreValue, T: KeyTuple, const N: usize> IntoIterator
    for &'a mut FixedMultiMap<S, T, N>
{
    type Item = &'a mut Record<S, T>;
    type IntoIter = std::slice::IterMut<'a, Record<S, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::FixedMultiMap;
    use crate::error::MultikeyError;
    use crate::record::Record;

    fn sample() -> FixedMultiMap<f32, (char, u32), 3> {
        FixedMultiMap::new([
            Record::new(1.0, ('x', 100)),
            Record::new(2.0, ('y', 200)),
            Record::new(3.0, ('z', 300)),
        ])
    }

    #[test]
    fn find_and_at_by_either_key_type() {
        let map = sample();
        assert_eq!(map.at(&'y').unwrap(), &2.0);
        assert_eq!(map.at(&300u32).unwrap(), &3.0);
        assert_eq!(
            map.at(&'w'),
            Err(MultikeyError::KeyNotFound("'w'".to_string()))
        );
    }

    #[test]
    fn assign_overwrites_matching_slot() {
        let mut map = sample();
        assert!(map.assign(&'y', 5.0));
        assert_eq!(map.at(&'y').unwrap(), &5.0);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn assign_miss_is_silent_noop() {
        // The miss leaves every slot's payload unchanged and the size constant.
        let mut map = sample();
        assert!(!map.assign(&'w', 9.0));
        assert_eq!(map.len(), 3);
        assert_eq!(map.index(0).store, 1.0);
        assert_eq!(map.index(1).store, 2.0);
        assert_eq!(map.index(2).store, 3.0);
    }

    #[test]
    fn positional_access_ignores_keys() {
        let mut map = sample();
        map.index_mut(2).store = 9.5;
        assert_eq!(map.index(2).store, 9.5);
        assert_eq!(map.at(&'z').unwrap(), &9.5);
        assert!(map.get_index(3).is_none());
    }

    #[test]
    fn from_fn_populates_in_order() {
        let map: FixedMultiMap<usize, (u32,), 4> =
            FixedMultiMap::from_fn(|i| Record::new(i * 10, (i as u32,)));
        assert_eq!(map.index(3).store, 30);
        assert_eq!(map.at(&2u32).unwrap(), &20);
    }

    #[test]
    fn try_from_vec_checks_capacity() {
        let records = vec![Record::new(1.0f32, ('x', 1u32)), Record::new(2.0, ('y', 2))];
        let map: Result<FixedMultiMap<f32, (char, u32), 3>, _> = records.try_into();
        assert_eq!(
            map.unwrap_err(),
            MultikeyError::CapacityMismatch {
                expected: 3,
                actual: 2
            }
        );

        let records = vec![Record::new(1.0f32, ('x', 1u32))];
        let map: FixedMultiMap<f32, (char, u32), 1> = records.try_into().unwrap();
        assert_eq!(map.at(&'x').unwrap(), &1.0);
    }

    #[test]
    fn find_if_sees_whole_records() {
        let map = sample();
        let record = map.find_if(|r| r.store > 1.5 && r.keys.matches(&200u32)).unwrap();
        assert_eq!(record.store, 2.0);
    }
}
