//! Contact identifier type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned identifier of a contact.
///
/// Serialized as a bare integer (`"contactId": 7`). Assigned exactly once on
/// insert and never reused after deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(i64);

impl ContactId {
    /// Creates a contact ID from its raw value.
    ///
    /// # Examples
    ///
    /// ```
    /// use cms_core::ContactId;
    ///
    /// let id = ContactId::new(7);
    /// assert_eq!(id.get(), 7);
    /// ```
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw integer value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ContactId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<ContactId> for i64 {
    fn from(id: ContactId) -> Self {
        id.0
    }
}

impl std::str::FromStr for ContactId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}
