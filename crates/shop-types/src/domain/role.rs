use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role label attached to a user. Persisted in `user_roles` with fixed ids.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    #[default]
    User,
    Locked,
}

impl Role {
    pub fn id(&self) -> i64 {
        match self {
            Role::Admin => 1,
            Role::User => 2,
            Role::Locked => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::User => "User",
            Role::Locked => "Locked",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Admin" => Ok(Role::Admin),
            "User" => Ok(Role::User),
            "Locked" => Ok(Role::Locked),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}
