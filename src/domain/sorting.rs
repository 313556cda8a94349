//! Sort orders accepted by the list views.
//!
//! Each list takes a `sortOrder` query parameter. Unknown or missing values
//! fall back to the list's default order.

/// Declares a sort-order enum whose variants map to `sortOrder` values.
/// The first variant is the default.
macro_rules! sort_order {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $default:ident => $default_param:literal,
            $($variant:ident => $param:literal),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub enum $name {
            #[default]
            $default,
            $($variant),*
        }

        impl $name {
            /// Parse a `sortOrder` value, falling back to the default order.
            pub fn parse(raw: Option<&str>) -> Self {
                match raw.map(str::trim) {
                    $(Some($param) => Self::$variant,)*
                    _ => Self::$default,
                }
            }

            pub fn as_param(self) -> &'static str {
                match self {
                    Self::$default => $default_param,
                    $(Self::$variant => $param),*
                }
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_param())
            }
        }
    };
}

pub(crate) use sort_order;

/// Link value for a column header: descending when the list is currently
/// sorted by that column ascending, otherwise ascending.
pub fn toggle<S: Copy + PartialEq>(current: S, ascending: S, descending: S) -> S {
    if current == ascending {
        descending
    } else {
        ascending
    }
}
