/*!

A `KeyCell<T>` is the composite lookup key of a [`Record`](crate::record::Record): it
holds one value of *each* of the declared key types simultaneously. It is a labeled
tuple, not a tagged union — every slot coexists and is independently settable.

The declared key types are given as a tuple, e.g. `KeyCell<(char, u32)>`. Slot
selection is type-directed and resolved entirely at compile time: `let c: char = cell.get();`
reads the `char` slot, `cell.set(7u32)` writes the `u32` slot, and probing a type that
is not in the tuple does not compile.

```rust
use multikey::cell::KeyCell;

let mut cell = KeyCell::new(('a', 100u32));
let tag: char = cell.get();
assert_eq!(tag, 'a');
cell.set(200u32);
let id: u32 = cell.get();
assert_eq!(id, 200);
```

Requesting a type outside the declared set is rejected before the program runs:

```compile_fail
use multikey::cell::KeyCell;

let cell = KeyCell::new(('a', 100u32));
let _: i64 = cell.get(); // no `i64` slot declared
```

Equality comes in two strengths: `one_equal` is true when *any* slot agrees, and
`is_all_equal` only when every slot agrees. The `PartialEq` impl uses `one_equal`,
because "does this key match" is the question the tables ask.

*/

use std::fmt::Debug;

use serde::Serialize;

/// The contract every declared key slot type must satisfy. Key types are small
/// by-value things: enum tags, `char`s, integer ids.
pub trait KeyValue: Copy + Debug + PartialEq + Serialize + 'static {}
impl<T> KeyValue for T where T: Copy + Debug + PartialEq + Serialize + 'static {}

// Position markers for slot selection. The marker is an inference-only type
// parameter: for a tuple with pairwise-distinct element types there is exactly one
// `KeySlot<K, _>` impl per `K`, so the compiler fills the marker in. A duplicated
// element type makes the selection ambiguous, which is a compile failure.
pub struct P0;
pub struct P1;
pub struct P2;
pub struct P3;
pub struct P4;
pub struct P5;

/// Access to the unique tuple slot of type `K`. `I` is the position marker and is
/// always inferred at the call site.
pub trait KeySlot<K, I> {
    fn key(&self) -> &K;
    fn key_mut(&mut self) -> &mut K;
}

/// The tuple-wide operations: slot count and the two equality strengths.
/// Implemented for tuples of arity 1 through 6.
pub trait KeyTuple: Copy + Debug + PartialEq + Serialize + 'static {
    const LEN: usize;

    /// True if *any* slot agrees with the corresponding slot of `other`.
    fn one_equal(&self, other: &Self) -> bool;

    /// True only if *every* slot agrees with the corresponding slot of `other`.
    fn all_equal(&self, other: &Self) -> bool;
}

macro_rules! impl_key_tuple {
    ($len:literal; $($t:ident : $idx:tt),+) => {
        impl<$($t: KeyValue),+> KeyTuple for ($($t,)+) {
            const LEN: usize = $len;

            fn one_equal(&self, other: &Self) -> bool {
                [$(self.$idx == other.$idx),+].into_iter().any(|slot| slot)
            }

            fn all_equal(&self, other: &Self) -> bool {
                [$(self.$idx == other.$idx),+].into_iter().all(|slot| slot)
            }
        }
    };
}

macro_rules! impl_key_slot {
    (($($t:ident),+); $k:ident : $idx:tt : $pos:ty) => {
        impl<$($t: KeyValue),+> KeySlot<$k, $pos> for ($($t,)+) {
            fn key(&self) -> &$k {
                &self.$idx
            }

            fn key_mut(&mut self) -> &mut $k {
                &mut self.$idx
            }
        }
    };
}

impl_key_tuple!(1; A:0);
impl_key_tuple!(2; A:0, B:1);
impl_key_tuple!(3; A:0, B:1, C:2);
impl_key_tuple!(4; A:0, B:1, C:2, D:3);
impl_key_tuple!(5; A:0, B:1, C:2, D:3, E:4);
impl_key_tuple!(6; A:0, B:1, C:2, D:3, E:4, F:5);

impl_key_slot!((A); A:0:P0);

impl_key_slot!((A, B); A:0:P0);
impl_key_slot!((A, B); B:1:P1);

impl_key_slot!((A, B, C); A:0:P0);
impl_key_slot!((A, B, C); B:1:P1);
impl_key_slot!((A, B, C); C:2:P2);

impl_key_slot!((A, B, C, D); A:0:P0);
impl_key_slot!((A, B, C, D); B:1:P1);
impl_key_slot!((A, B, C, D); C:2:P2);
impl_key_slot!((A, B, C, D); D:3:P3);

impl_key_slot!((A, B, C, D, E); A:0:P0);
impl_key_slot!((A, B, C, D, E); B:1:P1);
impl_key_slot!((A, B, C, D, E); C:2:P2);
impl_key_slot!((A, B, C, D, E); D:3:P3);
impl_key_slot!((A, B, C, D, E); E:4:P4);

impl_key_slot!((A, B, C, D, E, F); A:0:P0);
impl_key_slot!((A, B, C, D, E, F); B:1:P1);
impl_key_slot!((A, B, C, D, E, F); C:2:P2);
impl_key_slot!((A, B, C, D, E, F); D:3:P3);
impl_key_slot!((A, B, C, D, E, F); E:4:P4);
impl_key_slot!((A, B, C, D, E, F); F:5:P5);

/// The tagged multi-value cell: one value per declared key type, all live at once.
///
/// Owned by its enclosing [`Record`](crate::record::Record); constructed from an
/// ordered tuple of key values at record-creation time and mutated in place with
/// [`KeyCell::set`].
#[derive(Copy, Clone, Debug, Serialize)]
#[serde(transparent)]
pub struct KeyCell<T: KeyTuple>(T);

impl<T: KeyTuple> KeyCell<T> {
    pub fn new(keys: T) -> Self {
        Self(keys)
    }

    /// The number of declared key slots.
    #[must_use]
    pub const fn len() -> usize {
        T::LEN
    }

    /// Returns the value of the slot of type `K`.
    #[must_use]
    pub fn get<K, I>(&self) -> K
    where
        T: KeySlot<K, I>,
        K: KeyValue,
    {
        *self.0.key()
    }

    /// Overwrites the slot of type `K`.
    pub fn set<K, I>(&mut self, value: K)
    where
        T: KeySlot<K, I>,
    {
        *self.0.key_mut() = value;
    }

    /// True if the slot of type `K` equals `key`. This is the single-slot probe the
    /// tables use for `find`/`contains`.
    #[must_use]
    pub fn matches<K, I>(&self, key: &K) -> bool
    where
        T: KeySlot<K, I>,
        K: KeyValue,
    {
        self.0.key() == key
    }

    /// True if this cell and `other` agree on at least one slot.
    #[must_use]
    pub fn one_equal(&self, other: &Self) -> bool {
        self.0.one_equal(&other.0)
    }

    /// True only if this cell and `other` agree on every slot.
    #[must_use]
    pub fn is_all_equal(&self, other: &Self) -> bool {
        self.0.all_equal(&other.0)
    }

    /// The raw tuple of key values.
    #[must_use]
    pub fn as_tuple(&self) -> &T {
        &self.0
    }
}

impl<T: KeyTuple> PartialEq for KeyCell<T> {
    /// "One-equal" semantics: two cells compare equal if any slot matches.
    fn eq(&self, other: &Self) -> bool {
        self.one_equal(other)
    }
}

impl<T: KeyTuple + Default> Default for KeyCell<T> {
    fn default() -> Self {
        Self(T::default())
    }
}

impl<T: KeyTuple> From<T> for KeyCell<T> {
    fn from(keys: T) -> Self {
        Self(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::KeyCell;

    #[test]
    fn get_set_by_type() {
        let mut cell = KeyCell::new(('a', 100u32, -5i64));
        assert_eq!(cell.get::<char, _>(), 'a');
        assert_eq!(cell.get::<u32, _>(), 100);
        assert_eq!(cell.get::<i64, _>(), -5);

        cell.set('z');
        cell.set(7u32);
        assert_eq!(cell.get::<char, _>(), 'z');
        assert_eq!(cell.get::<u32, _>(), 7);
        assert_eq!(cell.get::<i64, _>(), -5);
    }

    #[test]
    fn matches_probes_one_slot() {
        let cell = KeyCell::new(('a', 100u32));
        assert!(cell.matches(&'a'));
        assert!(cell.matches(&100u32));
        assert!(!cell.matches(&'b'));
        assert!(!cell.matches(&99u32));
    }

    #[test]
    fn all_equal_implies_one_equal() {
        let a = KeyCell::new(('a', 1u32, true));
        let b = KeyCell::new(('a', 1u32, true));
        assert!(a.is_all_equal(&b));
        assert!(a.one_equal(&b));
        assert!(a == b);
    }

    #[test]
    fn one_equal_does_not_imply_all_equal() {
        // One matching field, two differing fields.
        let a = KeyCell::new(('a', 1u32, true));
        let b = KeyCell::new(('a', 2u32, false));
        assert!(a == b);
        assert!(!a.is_all_equal(&b));
    }

    #[test]
    fn fully_distinct_cells_compare_unequal() {
        let a = KeyCell::new(('a', 1u32));
        let b = KeyCell::new(('b', 2u32));
        assert!(a != b);
        assert!(!a.is_all_equal(&b));
    }

    #[test]
    fn slot_count() {
        assert_eq!(KeyCell::<(char,)>::len(), 1);
        assert_eq!(KeyCell::<(char, u32, i64)>::len(), 3);
    }
}
