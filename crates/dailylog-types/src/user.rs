//! User profile view relevant to diary composition and entitlement.
//!
//! Account credentials, email verification, and password flows live in an
//! external service; this crate only sees the profile fields that feed the
//! system prompt and the mutable free-trial counter.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Default number of free diary writes granted to a new account.
pub const DEFAULT_FREE_TRIAL_COUNT: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
            Gender::Other => write!(f, "other"),
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            other => Err(format!("invalid gender: '{other}'")),
        }
    }
}

/// A user account, reduced to the fields this service reads and writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: Option<String>,
    pub birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    /// Remaining free diary writes; decremented by the entitlement gate.
    pub free_trial_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a user with the default trial allowance.
    pub fn new(username: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            username,
            birth: None,
            gender: None,
            free_trial_count: DEFAULT_FREE_TRIAL_COUNT,
            created_at: now,
            updated_at: now,
        }
    }
}
