//! Registered library members.

use std::{
    fmt,
    hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};

/// Membership category of a reader
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum ReaderCategory {
    /// Enrolled student
    Student,
    /// Teaching staff
    Teacher,
    /// Ordinary member
    #[default]
    Regular,
    /// Premium member
    Vip,
}

/// A registered library member, identified by `id`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Reader {
    /// Unique, immutable identifier
    id: String,
    /// Display name
    name: String,
    /// Contact address
    email: String,
    /// Membership category
    category: ReaderCategory,
}

impl Reader {
    /// Create a reader
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        category: ReaderCategory,
    ) -> Self {
        Self { id: id.into(), name: name.into(), email: email.into(), category }
    }

    /// Unique identifier
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Contact address
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Membership category
    #[must_use]
    pub fn category(&self) -> ReaderCategory {
        self.category
    }
}

impl PartialEq for Reader {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Reader {}

impl Hash for Reader {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Reader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}> ({:?})", self.name, self.email, self.category)
    }
}
