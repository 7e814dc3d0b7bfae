/// Defines a key enum with the standard derive set every key type needs, plus the
/// enumeration helpers the fixed tables want:
/// * `ALL`: every variant, in declaration order
/// * `COUNT`: the variant count
/// * a `<Name>Table<S>` alias for a fixed table with one slot per variant
///
/// The first variant becomes the `Default` (the value an auto-created key slot is
/// normalized to). The primary advantage of this macro is that you don't have to
/// remember the derive list; you also get a table alias sized to the enum for free.
///
/// ```rust,ignore
/// define_key_enum!(enum SpriteFloat { Scale, Rotation, X, Y });
///
/// let scales: SpriteFloatTable<f32> =
///     SpriteFloatTable::from_fn(|i| Record::new(1.0, (SpriteFloat::ALL[i],)));
/// ```
#[macro_export]
macro_rules! define_key_enum {
    (enum $name:ident { $first:ident $(, $rest:ident)* $(,)? }) => {
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Default, $crate::serde_derive::Serialize)]
        pub enum $name {
            #[default]
            $first,
            $($rest,)*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$name::$first $(, $name::$rest)*];
            pub const COUNT: usize = $name::ALL.len();
        }

        $crate::paste::paste! {
            pub type [<$name Table>]<S> =
                $crate::fixed_multi_map::FixedMultiMap<S, ($name,), { $name::COUNT }>;
        }
    };
}
pub use define_key_enum;

#[cfg(test)]
mod tests {
    use crate::record::Record;

    define_key_enum!(enum Channel { Red, Green, Blue });

    #[test]
    fn enumeration_helpers() {
        assert_eq!(Channel::COUNT, 3);
        assert_eq!(Channel::ALL, &[Channel::Red, Channel::Green, Channel::Blue]);
        assert_eq!(Channel::default(), Channel::Red);
    }

    #[test]
    fn table_alias_is_sized_to_the_enum() {
        let table: ChannelTable<u8> =
            ChannelTable::from_fn(|i| Record::new(i as u8, (Channel::ALL[i],)));
        assert_eq!(table.len(), 3);
        assert_eq!(table.at(&Channel::Blue).unwrap(), &2);
    }
}
