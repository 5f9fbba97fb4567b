//! Newtype IDs for type-safe resource references.
//!
//! The backend identifies every resource with an integer primary key. Wrapping
//! each one in its own type keeps a cart item ID from being passed where a
//! favorite ID is expected, which matters because both are deleted through
//! the same `DELETE /<resource>/{id}/` shape.

/// Define a type-safe ID wrapper around the backend's integer keys.
///
/// Generates a `#[serde(transparent)]` newtype over `i64` with `new()`,
/// `get()`, `Display`, and conversions to and from `i64`.
///
/// # Example
///
/// ```rust
/// # use marketplace_core::define_id;
/// define_id!(ReviewId);
///
/// let id = ReviewId::new(7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw backend key.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// The raw backend key.
            #[must_use]
            pub const fn get(&self) -> i64 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::core::num::ParseIntError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                s.parse::<i64>().map(Self)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(UserId);
define_id!(ProductId);
define_id!(CategoryId);
define_id!(StyleId);
define_id!(FavoriteId);
define_id!(CartItemId);
define_id!(OrderId);
define_id!(OrderItemId);
