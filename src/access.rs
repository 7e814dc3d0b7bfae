/*!

The composition layer: one entity, several independently-typed property tables, one
type-disambiguated accessor surface.

An entity (a sprite, an animated block, a text object, a config section) embeds one
table per payload-type family — a float table, a bool table, a color table — and
implements [`TableOf<S>`] once per family, usually via [`define_tables!`]. The
blanket [`PropertiesExt`] extension then routes `get`/`set`/`index`/`size` calls to
the right table purely from the requested payload type and the key's declared type.
There is no runtime tag and no branching: coherence allows at most one `TableOf<S>`
impl per entity, and the `PropertyTable` bound rejects key types the selected table's
cell does not declare. An inadmissible combination does not compile.

```rust,ignore
define_key_enum!(enum Knob { Volume, Balance });

struct Mixer {
    levels: KnobTable<f32>,
    muted: KnobTable<bool>,
}

define_tables!(Mixer {
    levels: KnobTable<f32> => f32,
    muted: KnobTable<bool> => bool,
});

mixer.set(Knob::Volume, 0.8f32);
mixer.set(Knob::Volume, true);          // routed to the bool table
let level: &f32 = mixer.get(Knob::Volume);
```

A payload type no embedded table stores is rejected before the program runs:

```compile_fail
use multikey::access::PropertiesExt;
use multikey::multi_map::MultiMap;
use multikey::define_tables;

struct Widget {
    floats: MultiMap<f32, (char,)>,
}
define_tables!(Widget { floats: MultiMap<f32, (char,)> => f32 });

fn probe(widget: &Widget) -> &u64 {
    widget.get('a') // no u64 table composed
}
```

*/

use crate::cell::KeyValue;
use crate::record::StoreValue;
use crate::table::{PropertyTable, TableCore};

/// Binds an entity to the one embedded table whose payload type is `S`.
///
/// Implement this once per payload-type family (normally with [`define_tables!`]); a
/// second impl for the same `S` is a coherence error, which is what guarantees the
/// accessor routing is unambiguous.
pub trait TableOf<S: StoreValue> {
    type Table: TableCore<S>;

    fn table(&self) -> &Self::Table;

    fn table_mut(&mut self) -> &mut Self::Table;
}

/// The unified accessor surface over everything implementing [`TableOf`].
///
/// Blanket-implemented for every type; each method carries the bounds that make the
/// routing well-defined, so calling it on an entity without a matching table simply
/// does not compile.
pub trait PropertiesExt {
    /// Returns the payload of type `S` stored under `key`.
    ///
    /// Panics if no record matches the key. Use [`PropertiesExt::try_get`] when a
    /// miss is an expected outcome.
    fn get<S, K, I>(&self, key: K) -> &S
    where
        S: StoreValue,
        K: KeyValue,
        Self: TableOf<S>,
        <Self as TableOf<S>>::Table: PropertyTable<S, K, I>,
    {
        self.table().lookup(&key).unwrap_or_else(|| {
            panic!(
                "no {} property stored under key {key:?}",
                std::any::type_name::<S>()
            )
        })
    }

    /// Mutable variant of [`PropertiesExt::get`]. Panics if no record matches.
    fn get_mut<S, K, I>(&mut self, key: K) -> &mut S
    where
        S: StoreValue,
        K: KeyValue,
        Self: TableOf<S>,
        <Self as TableOf<S>>::Table: PropertyTable<S, K, I>,
    {
        self.table_mut().lookup_mut(&key).unwrap_or_else(|| {
            panic!(
                "no {} property stored under key {key:?}",
                std::any::type_name::<S>()
            )
        })
    }

    /// Non-panicking variant of [`PropertiesExt::get`].
    fn try_get<S, K, I>(&self, key: K) -> Option<&S>
    where
        S: StoreValue,
        K: KeyValue,
        Self: TableOf<S>,
        <Self as TableOf<S>>::Table: PropertyTable<S, K, I>,
    {
        self.table().lookup(&key)
    }

    /// Non-panicking variant of [`PropertiesExt::get_mut`].
    fn try_get_mut<S, K, I>(&mut self, key: K) -> Option<&mut S>
    where
        S: StoreValue,
        K: KeyValue,
        Self: TableOf<S>,
        <Self as TableOf<S>>::Table: PropertyTable<S, K, I>,
    {
        self.table_mut().lookup_mut(&key)
    }

    /// Writes `value` under `key`, with the embedded table kind's own semantics:
    /// upsert on a growable table, assign-or-drop on a fixed one.
    fn set<S, K, I>(&mut self, key: K, value: S)
    where
        S: StoreValue,
        K: KeyValue,
        Self: TableOf<S>,
        <Self as TableOf<S>>::Table: PropertyTable<S, K, I>,
    {
        self.table_mut().write(key, value);
    }

    /// Positional payload access on the `S` table, independent of key lookup.
    /// Panics if `position` is out of range.
    fn index<S>(&self, position: usize) -> &S
    where
        S: StoreValue,
        Self: TableOf<S>,
    {
        self.table().position(position)
    }

    /// Mutable variant of [`PropertiesExt::index`].
    fn index_mut<S>(&mut self, position: usize) -> &mut S
    where
        S: StoreValue,
        Self: TableOf<S>,
    {
        self.table_mut().position_mut(position)
    }

    /// The number of records in the `S` table.
    fn size<S>(&self) -> usize
    where
        S: StoreValue,
        Self: TableOf<S>,
    {
        self.table().count()
    }

    /// Escape hatch: the underlying `S` table itself.
    fn table_ref<S>(&self) -> &<Self as TableOf<S>>::Table
    where
        S: StoreValue,
        Self: TableOf<S>,
    {
        self.table()
    }

    /// Mutable variant of [`PropertiesExt::table_ref`].
    fn table_mut_ref<S>(&mut self) -> &mut <Self as TableOf<S>>::Table
    where
        S: StoreValue,
        Self: TableOf<S>,
    {
        self.table_mut()
    }
}

impl<E> PropertiesExt for E {}

/// Implements [`TableOf`] for an entity's embedded tables.
///
/// Takes the entity type and, per embedded table, `field: TableType => PayloadType`.
/// One arm per payload-type family; listing the same payload twice is a coherence
/// error, by design.
///
/// ```rust,ignore
/// define_tables!(Sprite {
///     floats: SpriteFloatTable<f32> => f32,
///     flags: SpriteFlagTable<bool> => bool,
/// });
/// ```
#[macro_export]
macro_rules! define_tables {
    ($entity:ty { $($field:ident : $table:ty => $store:ty),+ $(,)? }) => {
        $(
            impl $crate::access::TableOf<$store> for $entity {
                type Table = $table;

                fn table(&self) -> &Self::Table {
                    &self.$field
                }

                fn table_mut(&mut self) -> &mut Self::Table {
                    &mut self.$field
                }
            }
        )+
    };
}
pub use define_tables;
