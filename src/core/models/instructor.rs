//! Instructor model

use super::{Identity, Person};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// A member of teaching staff
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instructor {
    identity: Identity,
    /// Home department
    pub department: String,
    hire_date: NaiveDate,
}

impl Instructor {
    /// Create an instructor hired today
    #[must_use]
    pub fn new(full_name: String, email: String, department: String) -> Self {
        Self {
            identity: Identity::new(full_name, email),
            department,
            hire_date: Local::now().date_naive(),
        }
    }

    /// Date the instructor was hired
    #[must_use]
    pub const fn hire_date(&self) -> NaiveDate {
        self.hire_date
    }
}

impl Person for Instructor {
    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn profile_summary(&self) -> String {
        format!(
            "Instructor Profile | Name: {} | Department: {} | Hired: {}",
            self.identity.full_name,
            self.department,
            self.hire_date.format("%Y-%m-%d")
        )
    }
}
