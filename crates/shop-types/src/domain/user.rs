use serde::{Deserialize, Deserializer, Serialize};

use super::record::{FieldValue, Record};
use super::role::Role;

/// An account holder. The password is optional so that service responses
/// can drop it entirely; it is never serialized when absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(deserialize_with = "role_or_default")]
    pub role: Role,
}

// Unknown or null role labels decode to the default role.
fn role_or_default<'de, D>(deserializer: D) -> Result<Role, D::Error>
where
    D: Deserializer<'de>,
{
    let label = Option::<String>::deserialize(deserializer)?;
    Ok(label.and_then(|l| l.parse().ok()).unwrap_or_default())
}

impl User {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: 0,
            username: username.into(),
            password: Some(password.into()),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            role,
        }
    }

    pub fn without_password(mut self) -> Self {
        self.password = None;
        self
    }
}

impl Record for User {
    const FIELDS: &'static [&'static str] = &[
        "id",
        "username",
        "password",
        "firstName",
        "lastName",
        "email",
        "role",
    ];

    fn field_values(&self) -> Vec<(&'static str, FieldValue<'_>)> {
        vec![
            ("id", FieldValue::Int(self.id)),
            ("username", FieldValue::Text(&self.username)),
            (
                "password",
                FieldValue::Text(self.password.as_deref().unwrap_or_default()),
            ),
            ("firstName", FieldValue::Text(&self.first_name)),
            ("lastName", FieldValue::Text(&self.last_name)),
            ("email", FieldValue::Text(&self.email)),
            ("role", FieldValue::Text(self.role.name())),
        ]
    }
}

/// User fields that can be searched by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserKey {
    Username,
    Email,
    FirstName,
    LastName,
}

impl UserKey {
    /// Maps a wire field name onto a searchable key. `id` has its own lookup,
    /// and `password`/`role` are not searchable.
    pub fn from_field(field: &str) -> Option<Self> {
        match field {
            "username" => Some(UserKey::Username),
            "email" => Some(UserKey::Email),
            "firstName" => Some(UserKey::FirstName),
            "lastName" => Some(UserKey::LastName),
            _ => None,
        }
    }

    pub fn value_of<'a>(&self, user: &'a User) -> &'a str {
        match self {
            UserKey::Username => &user.username,
            UserKey::Email => &user.email,
            UserKey::FirstName => &user.first_name,
            UserKey::LastName => &user.last_name,
        }
    }
}
