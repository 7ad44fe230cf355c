//! User domain types
use crate::error::{Result, RosterError};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Server-assigned user identifier
pub type UserId = i64;

/// Format of `UserRecord::created_at` as rendered by the backend
pub const CREATED_AT_FORMAT: &str = "%d-%m-%Y %H:%M";

/// Parse a `DD-MM-YYYY HH:MM` timestamp into a naive local instant.
///
/// Returns `None` for anything that does not match the format exactly.
pub fn parse_created_at(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), CREATED_AT_FORMAT).ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            other => Err(RosterError::UnknownGender(other.to_string())),
        }
    }
}

/// A user record as listed by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Unique user identifier
    pub id: UserId,

    /// Full name, also used as the login name
    pub name: String,

    pub birth_year: i32,

    pub gender: Gender,

    #[serde(default)]
    pub is_admin: bool,

    /// Creation timestamp (`DD-MM-YYYY HH:MM`)
    pub created_at: String,

    /// Name of the user who created this record
    #[serde(default)]
    pub created_by: Option<String>,

    /// Avatar location relative to the API base URL
    #[serde(default)]
    pub avatar_path: Option<String>,
}

impl UserRecord {
    /// Creation instant, or `None` when `created_at` is malformed.
    pub fn created_at_instant(&self) -> Option<NaiveDateTime> {
        parse_created_at(&self.created_at)
    }
}

/// Payload for creating or replacing a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFields {
    pub name: String,
    pub birth_year: i32,
    pub gender: Gender,
    #[serde(default)]
    pub is_admin: bool,
    /// Base64 image payload; `None` keeps the current avatar on update
    pub avatar_base64: Option<String>,
    /// Empty on update means "keep the current password"
    pub password: String,
}

impl UserFields {
    pub fn new(
        name: impl Into<String>,
        birth_year: i32,
        gender: Gender,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            birth_year,
            gender,
            is_admin: false,
            avatar_base64: None,
            password: password.into(),
        }
    }

    /// Pre-fill an edit payload from an existing record.
    ///
    /// The password is left empty so the backend keeps the current one.
    pub fn from_record(record: &UserRecord) -> Self {
        Self {
            name: record.name.clone(),
            birth_year: record.birth_year,
            gender: record.gender,
            is_admin: record.is_admin,
            avatar_base64: None,
            password: String::new(),
        }
    }

    /// Check the fields before sending them.
    ///
    /// A password is mandatory only when creating a user.
    pub fn validate(&self, creating: bool) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(RosterError::invalid_input("name cannot be empty"));
        }
        if self.birth_year <= 0 {
            return Err(RosterError::invalid_input(format!(
                "birth year must be positive, got {}",
                self.birth_year
            )));
        }
        if creating && self.password.is_empty() {
            return Err(RosterError::invalid_input(
                "password is required for a new user",
            ));
        }
        Ok(())
    }
}
