//! Entity to model mappers
//!
//! Rows come back with enum columns as text, so every conversion into a
//! domain entity is a `TryFrom` that fails with `DomainError::UnknownLiteral`
//! when a stored literal is not recognised.

mod checklist;
mod club;
mod club_link;
mod club_member;
mod friend;
mod member;
mod preset;
mod schedule;

pub use checklist::assemble_checklist;
pub use preset::assemble_presets;
