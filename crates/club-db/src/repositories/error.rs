//! Error handling utilities for repositories

use club_core::error::DomainError;
use club_core::value_objects::Snowflake;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Like [`map_unique_violation`], but only for the named constraint
pub fn map_constraint_violation<F>(e: SqlxError, constraint: &str, on_match: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() && db_err.constraint() == Some(constraint) {
            return on_match();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

pub fn member_not_found(id: Snowflake) -> DomainError {
    DomainError::MemberNotFound(id)
}

pub fn club_not_found(id: Snowflake) -> DomainError {
    DomainError::ClubNotFound(id)
}

pub fn club_member_not_found() -> DomainError {
    DomainError::ClubMemberNotFound
}

pub fn schedule_not_found(id: Snowflake) -> DomainError {
    DomainError::ScheduleNotFound(id)
}

pub fn checklist_not_found(id: Snowflake) -> DomainError {
    DomainError::CheckListNotFound(id)
}

pub fn friend_not_found(id: Snowflake) -> DomainError {
    DomainError::FriendNotFound(id)
}

pub fn preset_not_found(id: Snowflake) -> DomainError {
    DomainError::PresetNotFound(id)
}
