use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for delivered leads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeadId(pub String);

/// Editable inputs of the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    Name,
    Email,
    Message,
    Notes,
}

impl ContactField {
    pub const fn ordered() -> [Self; 4] {
        [Self::Name, Self::Email, Self::Message, Self::Notes]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Full Name",
            Self::Email => "Email Address",
            Self::Message => "Message",
            Self::Notes => "Additional Roof Notes",
        }
    }

    pub const fn is_required(self) -> bool {
        !matches!(self, Self::Notes)
    }
}

/// Raw contact details as typed by the visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(alias = "roofNotes", alias = "roof_notes")]
    pub notes: String,
}

impl ContactSubmission {
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Message => &self.message,
            ContactField::Notes => &self.notes,
        }
    }

    pub fn set(&mut self, field: ContactField, value: String) {
        match field {
            ContactField::Name => self.name = value,
            ContactField::Email => self.email = value,
            ContactField::Message => self.message = value,
            ContactField::Notes => self.notes = value,
        }
    }

    pub fn is_blank(&self) -> bool {
        ContactField::ordered()
            .into_iter()
            .all(|field| self.get(field).is_empty())
    }
}

/// Field-scoped validation messages keyed by the offending input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{} contact field(s) failed validation", .0.len())]
pub struct ValidationErrors(BTreeMap<ContactField, String>);

impl ValidationErrors {
    pub fn insert(&mut self, field: ContactField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: ContactField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn clear(&mut self, field: ContactField) {
        self.0.remove(&field);
    }

    pub fn fields(&self) -> impl Iterator<Item = ContactField> + '_ {
        self.0.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Validated lead handed to the [`LeadGateway`](super::gateway::LeadGateway).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadSubmission {
    pub lead_id: LeadId,
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub received_at: DateTime<Utc>,
}

impl LeadSubmission {
    pub fn from_submission(
        lead_id: LeadId,
        submission: ContactSubmission,
        received_at: DateTime<Utc>,
    ) -> Self {
        let notes = submission.notes.trim();
        Self {
            lead_id,
            name: submission.name.trim().to_string(),
            email: submission.email.trim().to_string(),
            message: submission.message.trim().to_string(),
            notes: (!notes.is_empty()).then(|| notes.to_string()),
            received_at,
        }
    }
}
