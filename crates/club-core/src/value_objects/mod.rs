//! Value objects - immutable types that represent domain concepts

/// Declares a closed set of upper-case literals with case-insensitive parsing.
///
/// Unknown literals become `DomainError::UnknownLiteral`, so boundary code can
/// turn raw strings into enums with `?`.
macro_rules! literal_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident as $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $lit:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $lit)] $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Canonical literal as stored and serialized
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $lit),+
                }
            }

            /// Case-insensitive parse
            pub fn parse(value: &str) -> Result<Self, $crate::error::DomainError> {
                let wanted = value.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|candidate| candidate.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| $crate::error::DomainError::UnknownLiteral {
                        kind: $kind,
                        value: value.to_string(),
                    })
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

mod category;
mod membership;
mod schedule_window;
mod snowflake;

pub use category::{CheckListItemCategory, ClubCategory, EventType, FriendStatus, MemberType};
pub use membership::{ClubRole, MemberState};
pub use schedule_window::ScheduleWindow;
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
