//! Schedule entity - an event on a club's calendar

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Scheduled club event.
///
/// `checklist_id` is a projection of the checklist that points at this
/// schedule; it is never written through the schedule itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub id: Snowflake,
    pub club_id: Snowflake,
    pub title: String,
    pub content: Option<String>,
    pub start_at: NaiveDateTime,
    pub end_at: NaiveDateTime,
    pub spot: Option<String>,
    pub is_active: bool,
    pub checklist_id: Option<Snowflake>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Editable schedule fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleFields {
    pub title: String,
    pub content: Option<String>,
    pub start_at: NaiveDateTime,
    pub end_at: NaiveDateTime,
    pub spot: Option<String>,
}

impl ScheduleFields {
    /// Start must not be after end
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.start_at > self.end_at {
            return Err(DomainError::InvalidDateRange);
        }
        Ok(())
    }
}

impl Schedule {
    /// Create an active schedule without a checklist
    pub fn new(id: Snowflake, club_id: Snowflake, fields: ScheduleFields) -> Result<Self, DomainError> {
        fields.validate()?;
        let now = Utc::now();
        Ok(Self {
            id,
            club_id,
            title: fields.title,
            content: fields.content,
            start_at: fields.start_at,
            end_at: fields.end_at,
            spot: fields.spot,
            is_active: true,
            checklist_id: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Overwrite every editable field in place
    pub fn modify(&mut self, fields: ScheduleFields) -> Result<(), DomainError> {
        fields.validate()?;
        self.title = fields.title;
        self.content = fields.content;
        self.start_at = fields.start_at;
        self.end_at = fields.end_at;
        self.spot = fields.spot;
        self.updated_at = Utc::now();
        Ok(())
    }

    #[inline]
    pub fn has_checklist(&self) -> bool {
        self.checklist_id.is_some()
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }
}
