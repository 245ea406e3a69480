use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned user identifier.
///
/// The client never inspects or invents ids; whatever shape the server sends
/// is kept and echoed back verbatim when addressing update and delete calls.
/// Ids that are neither `i64` nor strings (floats, large unsigned) land in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Int(i64),
    Text(String),
    Other(serde_json::Value),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
            Self::Other(value) => write!(f, "{value}"),
        }
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

/// Typed ids (CLI arguments) are kept exactly as written.
impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub fullname: String,
    pub email: String,
    pub phone: String,
}

/// Editable subset of a [`User`]; this is also the create/update request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFields {
    pub fullname: String,
    pub email: String,
    pub phone: String,
}

impl UserFields {
    pub fn new(
        fullname: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            fullname: fullname.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    /// All three fields present. Email format is left to the server.
    pub fn is_complete(&self) -> bool {
        !self.fullname.is_empty() && !self.email.is_empty() && !self.phone.is_empty()
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Fullname => &self.fullname,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Fullname => &mut self.fullname,
            FormField::Email => &mut self.email,
            FormField::Phone => &mut self.phone,
        };
        *slot = value.into();
    }
}

impl From<&User> for UserFields {
    fn from(user: &User) -> Self {
        Self {
            fullname: user.fullname.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Fullname,
    Email,
    Phone,
}

impl FormField {
    pub const ALL: [FormField; 3] = [FormField::Fullname, FormField::Email, FormField::Phone];

    pub fn name(self) -> &'static str {
        match self {
            Self::Fullname => "fullname",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }
}
