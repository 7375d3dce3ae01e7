/// Declares a `usize` id type for `$t`, usable as an index into `Vec<$t>`
/// and `[$t]`. Ids serialize as plain numbers.
#[macro_export]
macro_rules! define_index_newtype {
    ($name:ident, $t:ident) => {
        #[derive(
            serde::Serialize,
            schemars::JsonSchema,
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            Default,
        )]
        #[serde(transparent)]
        pub struct $name(usize);

        impl $name {
            pub const fn new(index: usize) -> Self {
                $name(index)
            }

            pub const fn get(&self) -> usize {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<usize> for $name {
            fn from(index: usize) -> Self {
                $name(index)
            }
        }

        impl From<$name> for usize {
            fn from(id: $name) -> usize {
                id.0
            }
        }

        impl std::ops::Index<$name> for [$t] {
            type Output = $t;

            #[inline(always)]
            fn index(&self, id: $name) -> &$t {
                &self[id.0]
            }
        }

        impl std::ops::Index<$name> for Vec<$t> {
            type Output = $t;

            #[inline(always)]
            fn index(&self, id: $name) -> &$t {
                &self.as_slice()[id]
            }
        }
    };
}
