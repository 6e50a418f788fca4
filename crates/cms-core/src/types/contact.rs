//! Contact entity, transfer objects, and boundary validation.

use serde::{Deserialize, Serialize};

use super::ContactId;
use crate::{Error, Result};

/// A persisted contact record.
///
/// `contact_id` is `None` only for a record that has not been saved yet;
/// the store populates it on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    /// Store-assigned identifier
    pub contact_id: Option<ContactId>,
    /// Display name (never blank once persisted)
    pub name: String,
    /// Email address (never blank once persisted)
    pub email: String,
    /// Optional phone number
    pub phone: Option<String>,
}

impl From<NewContact> for Contact {
    fn from(new: NewContact) -> Self {
        Self {
            contact_id: None,
            name: new.name,
            email: new.email,
            phone: new.phone,
        }
    }
}

/// Boundary representation of a contact.
///
/// A straight field-for-field copy of [`Contact`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDto {
    /// Store-assigned identifier
    pub contact_id: Option<ContactId>,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Optional phone number (`null` when absent)
    pub phone: Option<String>,
}

impl From<Contact> for ContactDto {
    fn from(contact: Contact) -> Self {
        Self {
            contact_id: contact.contact_id,
            name: contact.name,
            email: contact.email,
            phone: contact.phone,
        }
    }
}

/// Request body for creating or updating a contact.
///
/// Every field is optional by type. Creation requires `name` and `email`
/// (see [`CreateContactRequest::validate`]); updates treat missing or blank
/// fields as "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateContactRequest {
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Email address
    #[serde(default)]
    pub email: Option<String>,
    /// Phone number
    #[serde(default)]
    pub phone: Option<String>,
}

impl CreateContactRequest {
    /// Creates a request with the required fields set.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            phone: None,
        }
    }

    /// Sets the phone number.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Validates the required creation fields.
    ///
    /// Fails with a validation error naming the first missing or blank
    /// required field (`name`, then `email`). Blank means empty after
    /// trimming whitespace.
    pub fn validate(self) -> Result<NewContact> {
        let name = require_non_blank("name", self.name)?;
        let email = require_non_blank("email", self.email)?;
        Ok(NewContact {
            name,
            email,
            phone: self.phone,
        })
    }
}

fn require_non_blank(field: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        Some(_) => Err(Error::validation_field(field, format!("{field} must not be blank"))),
        None => Err(Error::validation_field(field, format!("{field} is required"))),
    }
}

/// A validated creation request.
///
/// Only constructed through [`CreateContactRequest::validate`], so `name`
/// and `email` are guaranteed non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    name: String,
    email: String,
    phone: Option<String>,
}

impl NewContact {
    /// Validated display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Validated email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Optional phone number.
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_required_fields() {
        let new = CreateContactRequest::new("Ann Lee", "ann@x.com")
            .validate()
            .unwrap();
        assert_eq!(new.name(), "Ann Lee");
        assert_eq!(new.email(), "ann@x.com");
        assert_eq!(new.phone(), None);
    }

    #[test]
    fn test_validate_rejects_missing_name() {
        let request = CreateContactRequest {
            email: Some("ann@x.com".to_string()),
            ..Default::default()
        };
        let Error::Validation { field, message } = request.validate().unwrap_err() else {
            unreachable!("Expected Validation error variant");
        };
        assert_eq!(field.as_deref(), Some("name"));
        assert_eq!(message, "name is required");
    }

    #[test]
    fn test_validate_rejects_blank_email() {
        let request = CreateContactRequest::new("Ann", "   ");
        let Error::Validation { field, message } = request.validate().unwrap_err() else {
            unreachable!("Expected Validation error variant");
        };
        assert_eq!(field.as_deref(), Some("email"));
        assert_eq!(message, "email must not be blank");
    }

    #[test]
    fn test_phone_is_optional_and_kept() {
        let new = CreateContactRequest::new("Bo", "bo@x.com")
            .with_phone("555-1212")
            .validate()
            .unwrap();
        let contact = Contact::from(new);
        assert_eq!(contact.contact_id, None);
        assert_eq!(contact.phone.as_deref(), Some("555-1212"));
    }

    #[test]
    fn test_dto_json_field_names() {
        let dto = ContactDto::from(Contact {
            contact_id: Some(ContactId::new(1)),
            name: "Ann Lee".to_string(),
            email: "ann@x.com".to_string(),
            phone: None,
        });
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "contactId": 1,
                "name": "Ann Lee",
                "email": "ann@x.com",
                "phone": null,
            })
        );
    }

    #[test]
    fn test_request_deserializes_partial_body() {
        let request: CreateContactRequest =
            serde_json::from_str(r#"{"phone":"555-1212"}"#).unwrap();
        assert_eq!(request.name, None);
        assert_eq!(request.email, None);
        assert_eq!(request.phone.as_deref(), Some("555-1212"));
    }
}
