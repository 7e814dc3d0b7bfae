/*!

The trait seam between the two table kinds and the composition layer in
[`access`](crate::access). `TableCore<S>` is the key-free surface (positional access
and size); `PropertyTable<S, K, I>` adds the typed key surface. The composition layer
is written against these traits only, so an entity can embed either table kind behind
the same accessor API.

Write semantics differ per table kind, exactly as at the table level: writing through
a `MultiMap` upserts (appending a default-normalized record on a miss), while writing
through a `FixedMultiMap` assigns in place and silently drops a miss.

*/

use crate::cell::{KeySlot, KeyTuple, KeyValue};
use crate::fixed_multi_map::FixedMultiMap;
use crate::multi_map::MultiMap;
use crate::record::StoreValue;

/// The key-free table surface: payload count and positional payload access.
pub trait TableCore<S: StoreValue> {
    fn count(&self) -> usize;

    /// Positional payload access. Panics if `index` is out of range.
    fn position(&self, index: usize) -> &S;

    /// Mutable variant of [`TableCore::position`].
    fn position_mut(&mut self, index: usize) -> &mut S;
}

/// The typed key surface. `I` is the slot position marker from
/// [`cell`](crate::cell); it is always inferred.
pub trait PropertyTable<S: StoreValue, K: KeyValue, I>: TableCore<S> {
    fn lookup(&self, key: &K) -> Option<&S>;

    fn lookup_mut(&mut self, key: &K) -> Option<&mut S>;

    /// Writes `value` under `key` with the table kind's own semantics: upsert for the
    /// growable table, assign-or-drop for the fixed table.
    fn write(&mut self, key: K, value: S);
}

impl<S: StoreValue, T: KeyTuple> TableCore<S> for MultiMap<S, T> {
    fn count(&self) -> usize {
        self.len()
    }

    fn position(&self, index: usize) -> &S {
        &self.index(index).store
    }

    fn position_mut(&mut self, index: usize) -> &mut S {
        &mut self.index_mut(index).store
    }
}

impl<S, T, K, I> PropertyTable<S, K, I> for MultiMap<S, T>
where
    S: StoreValue + Default,
    T: KeyTuple + KeySlot<K, I> + Default,
    K: KeyValue,
{
    fn lookup(&self, key: &K) -> Option<&S> {
        self.find(key).map(|record| &record.store)
    }

    fn lookup_mut(&mut self, key: &K) -> Option<&mut S> {
        self.find_mut(key).map(|record| &mut record.store)
    }

    fn write(&mut self, key: K, value: S) {
        *self.get_or_insert(key) = value;
    }
}

impl<S: StoreValue, T: KeyTuple, const N: usize> TableCore<S> for FixedMultiMap<S, T, N> {
    fn count(&self) -> usize {
        self.len()
    }

    fn position(&self, index: usize) -> &S {
        &self.index(index).store
    }

    fn position_mut(&mut self, index: usize) -> &mut S {
        &mut self.index_mut(index).store
    }
}

impl<S, T, K, I, const N: usize> PropertyTable<S, K, I> for FixedMultiMap<S, T, N>
where
    S: StoreValue,
    T: KeyTuple + KeySlot<K, I>,
    K: KeyValue,
{
    fn lookup(&self, key: &K) -> Option<&S> {
        self.find(key).map(|record| &record.store)
    }

    fn lookup_mut(&mut self, key: &K) -> Option<&mut S> {
        self.find_mut(key).map(|record| &mut record.store)
    }

    fn write(&mut self, key: K, value: S) {
        self.assign(&key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::{PropertyTable, TableCore};
    use crate::fixed_multi_map::FixedMultiMap;
    use crate::multi_map::MultiMap;
    use crate::record::Record;

    fn exercise<TBL>(table: &mut TBL)
    where
        TBL: PropertyTable<i32, char, crate::cell::P0>,
    {
        table.write('a', 11);
        assert_eq!(table.lookup(&'a'), Some(&11));
        *table.lookup_mut(&'a').unwrap() += 1;
        assert_eq!(table.lookup(&'a'), Some(&12));
    }

    #[test]
    fn both_table_kinds_satisfy_the_seam() {
        let mut growable: MultiMap<i32, (char,)> = MultiMap::new();
        growable.insert(Record::new(1, ('a',)));
        exercise(&mut growable);

        let mut fixed: FixedMultiMap<i32, (char,), 2> =
            FixedMultiMap::new([Record::new(1, ('a',)), Record::new(2, ('b',))]);
        exercise(&mut fixed);
        assert_eq!(fixed.count(), 2);
    }

    #[test]
    fn write_through_seam_keeps_table_semantics() {
        // Growable: a write to an unknown key grows the table.
        let mut growable: MultiMap<i32, (char,)> = MultiMap::new();
        PropertyTable::write(&mut growable, 'q', 7);
        assert_eq!(growable.len(), 1);

        // Fixed: the same write is a silent no-op.
        let mut fixed: FixedMultiMap<i32, (char,), 1> =
            FixedMultiMap::new([Record::new(1, ('a',))]);
        PropertyTable::write(&mut fixed, 'q', 7);
        assert_eq!(fixed.lookup(&'a'), Some(&1));
        assert!(fixed.lookup(&'q').is_none());
    }

    #[test]
    fn positional_surface() {
        let mut growable: MultiMap<i32, (char,)> = MultiMap::new();
        growable.insert(Record::new(5, ('a',)));
        growable.insert(Record::new(6, ('b',)));
        assert_eq!(growable.count(), 2);
        assert_eq!(*TableCore::position(&growable, 1), 6);
        *growable.position_mut(0) = 50;
        assert_eq!(growable.at(&'a').unwrap(), &50);
    }
}
