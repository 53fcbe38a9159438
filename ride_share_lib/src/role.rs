use std::{fmt, str::FromStr};

use serde::Deserialize;
use thiserror::Error;

use crate::text;

/// Which collection an account lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Provider,
    Receiver,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Provider => "provider",
            Role::Receiver => "receiver",
        }
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "provider" => Ok(Role::Provider),
            "receiver" => Ok(Role::Receiver),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of a login attempt. The role stays raw text so an unknown role can be
/// told apart from bad credentials.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "text::lenient")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "text::lenient")]
    pub password: Option<String>,
    #[serde(default, deserialize_with = "text::lenient")]
    pub role: Option<String>,
}

impl LoginRequest {
    pub fn role(&self) -> Result<Role, UnknownRole> {
        self.role.as_deref().unwrap_or_default().parse()
    }
}
