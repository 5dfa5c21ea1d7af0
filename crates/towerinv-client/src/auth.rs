//! Authentication modes

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How requests are authenticated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    /// HTTP basic credentials on every request
    #[default]
    Basic,
    /// Token obtained once from the login endpoint
    Token,
}

impl FromStr for AuthMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "basic" | "session" => Ok(Self::Basic),
            "token" => Ok(Self::Token),
            other => Err(format!("unknown auth mode: {other}")),
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic => f.write_str("basic"),
            Self::Token => f.write_str("token"),
        }
    }
}

/// Username and password
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Credentials attached to each request
#[derive(Clone)]
pub(crate) enum Auth {
    Basic(Credentials),
    Token(String),
}

impl Auth {
    pub(crate) fn apply(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self {
            Self::Basic(credentials) => {
                request.basic_auth(&credentials.username, Some(&credentials.password))
            }
            Self::Token(token) => {
                request.header(reqwest::header::AUTHORIZATION, format!("Token {token}"))
            }
        }
    }
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic(credentials) => f.debug_tuple("Basic").field(credentials).finish(),
            Self::Token(_) => f.debug_tuple("Token").field(&"***").finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_mode_parsing() {
        assert_eq!("basic".parse::<AuthMode>(), Ok(AuthMode::Basic));
        assert_eq!("Token".parse::<AuthMode>(), Ok(AuthMode::Token));
        assert_eq!("session".parse::<AuthMode>(), Ok(AuthMode::Basic));
        assert!("oauth".parse::<AuthMode>().is_err());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let basic = format!("{:?}", Auth::Basic(Credentials::new("admin", "hunter2")));
        assert!(basic.contains("admin"));
        assert!(!basic.contains("hunter2"));

        let token = format!("{:?}", Auth::Token("abc123".into()));
        assert!(!token.contains("abc123"));
    }
}
