//! Identity shared by students and instructors

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Globally unique person identifier, assigned once at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PersonId(Uuid);

impl PersonId {
    /// Generate a fresh random identifier
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Borrow the underlying UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PersonId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity and contact fields common to every person
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    id: PersonId,
    /// Full display name
    pub full_name: String,
    /// Contact email
    pub email: String,
}

impl Identity {
    /// Create an identity with a newly generated id
    #[must_use]
    pub fn new(full_name: String, email: String) -> Self {
        Self {
            id: PersonId::new(),
            full_name,
            email,
        }
    }

    /// Immutable identifier
    #[must_use]
    pub const fn id(&self) -> PersonId {
        self.id
    }
}

/// Capability shared by every kind of person in the system
pub trait Person {
    /// Identity record backing this person
    fn identity(&self) -> &Identity;

    /// One-line profile summary, rendered per variant
    fn profile_summary(&self) -> String;

    /// Immutable identifier
    fn id(&self) -> PersonId {
        self.identity().id()
    }

    /// Full display name
    fn full_name(&self) -> &str {
        &self.identity().full_name
    }

    /// Contact email
    fn email(&self) -> &str {
        &self.identity().email
    }
}
