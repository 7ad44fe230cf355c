//! Client-side ordering of user records.
//!
//! Each sortable column is an explicit [`SortField`] with a typed accessor
//! producing a [`SortKey`]. Keys compare by kind: timestamps by instant,
//! booleans as 0/1, text case-insensitively, numbers naturally. Missing
//! values are the smallest key; the direction is applied afterwards, so
//! nulls lead an ascending sort and trail a descending one.

use crate::error::RosterError;
use crate::types::UserRecord;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Columns of the users table that can be sorted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Id,
    Name,
    BirthYear,
    Gender,
    IsAdmin,
    CreatedAt,
    CreatedBy,
}

/// How a field's values are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareKind {
    Numeric,
    Textual,
    Boolean,
    Timestamp,
}

impl SortField {
    pub const ALL: [SortField; 7] = [
        SortField::Id,
        SortField::Name,
        SortField::BirthYear,
        SortField::Gender,
        SortField::IsAdmin,
        SortField::CreatedAt,
        SortField::CreatedBy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Name => "name",
            SortField::BirthYear => "birth_year",
            SortField::Gender => "gender",
            SortField::IsAdmin => "is_admin",
            SortField::CreatedAt => "created_at",
            SortField::CreatedBy => "created_by",
        }
    }

    pub fn kind(&self) -> CompareKind {
        match self {
            SortField::Id | SortField::BirthYear => CompareKind::Numeric,
            SortField::Name | SortField::Gender | SortField::CreatedBy => CompareKind::Textual,
            SortField::IsAdmin => CompareKind::Boolean,
            SortField::CreatedAt => CompareKind::Timestamp,
        }
    }

    /// Extract this field's comparable key from a record.
    pub fn key(&self, user: &UserRecord) -> SortKey {
        match self {
            SortField::Id => SortKey::Number(user.id),
            SortField::BirthYear => SortKey::Number(i64::from(user.birth_year)),
            SortField::Name => SortKey::text(&user.name),
            SortField::Gender => SortKey::text(user.gender.as_str()),
            SortField::CreatedBy => user
                .created_by
                .as_deref()
                .map_or(SortKey::Null, SortKey::text),
            SortField::IsAdmin => SortKey::Number(i64::from(user.is_admin)),
            SortField::CreatedAt => user
                .created_at_instant()
                .map_or(SortKey::Null, SortKey::Instant),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        SortField::ALL
            .into_iter()
            .find(|field| field.as_str() == wanted)
            .ok_or_else(|| RosterError::UnknownSortField(s.to_string()))
    }
}

/// A comparable value extracted from a record.
///
/// Variant order matters: `Null` is the smallest key. Keys of one field
/// always share a variant (or are `Null`), so cross-variant ordering only
/// ever involves `Null`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Null,
    Number(i64),
    Instant(NaiveDateTime),
    Text(String),
}

impl SortKey {
    fn text(value: &str) -> Self {
        SortKey::Text(value.to_lowercase())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Current ordering of the users table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortState {
    /// Newest records first.
    fn default() -> Self {
        Self {
            field: SortField::CreatedAt,
            direction: SortDirection::Descending,
        }
    }
}

impl SortState {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Select a column: the active column flips direction, any other
    /// column becomes active in ascending order.
    pub fn select(&mut self, field: SortField) {
        if self.field == field {
            self.direction = self.direction.flipped();
        } else {
            self.field = field;
            self.direction = SortDirection::Ascending;
        }
    }

    /// Header marker for a column.
    pub fn indicator(&self, field: SortField) -> &'static str {
        if self.field != field {
            return "↕";
        }
        match self.direction {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }

    pub fn compare(&self, a: &UserRecord, b: &UserRecord) -> Ordering {
        self.direction
            .apply(self.field.key(a).cmp(&self.field.key(b)))
    }

    /// Return a sorted copy of `users`. Equal keys keep their input order.
    pub fn sorted(&self, users: &[UserRecord]) -> Vec<UserRecord> {
        let mut keyed: Vec<(SortKey, &UserRecord)> = users
            .iter()
            .map(|user| (self.field.key(user), user))
            .collect();
        // `sort_by` is stable
        keyed.sort_by(|(a, _), (b, _)| self.direction.apply(a.cmp(b)));
        keyed.into_iter().map(|(_, user)| user.clone()).collect()
    }
}

/// Sort `users` by `field` in `direction`.
pub fn sort_users(
    users: &[UserRecord],
    field: SortField,
    direction: SortDirection,
) -> Vec<UserRecord> {
    SortState::new(field, direction).sorted(users)
}
