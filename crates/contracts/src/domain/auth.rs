//! Authentication payloads: login credentials and bearer tokens.
//!
//! Token issuance lives in the server; this module only fixes the shapes both
//! sides agree on and validates raw inputs before they reach a service.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::Zeroizing;

use super::{EmailAddress, User, UserValidationError};

/// Error returned when login or token values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginValidationError {
    /// Email was missing or malformed.
    #[error(transparent)]
    Email(#[from] UserValidationError),
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
    /// Token string was blank.
    #[error("access token must not be empty")]
    EmptyToken,
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `email` satisfies [`EmailAddress`].
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use sitegen_contracts::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("Ada@example.com", "password").unwrap();
/// assert_eq!(creds.email().as_ref(), "ada@example.com");
/// assert_eq!(creds.password(), "password");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = EmailAddress::new(email)?;
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email used for the user lookup.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password string provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Opaque bearer credential. Cleared from memory on drop.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccessToken(Zeroizing<String>);

impl AccessToken {
    /// Wrap a non-blank token string.
    pub fn new(token: impl Into<String>) -> Result<Self, LoginValidationError> {
        let token = Zeroizing::new(token.into());
        if token.trim().is_empty() {
            return Err(LoginValidationError::EmptyToken);
        }
        Ok(Self(token))
    }

    /// Raw token value.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

impl From<AccessToken> for String {
    fn from(value: AccessToken) -> Self {
        value.expose().to_owned()
    }
}

impl TryFrom<String> for AccessToken {
    type Error = LoginValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Token scheme advertised to clients.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenType {
    /// RFC 6750 bearer token.
    #[default]
    Bearer,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bearer => f.write_str("Bearer"),
        }
    }
}

/// Token pair returned after a successful login or refresh.
///
/// # Examples
/// ```
/// use chrono::{Duration, Utc};
/// use sitegen_contracts::domain::{AccessToken, AuthToken};
///
/// let now = Utc::now();
/// let token = AuthToken::bearer(AccessToken::new("abc").unwrap(), now + Duration::hours(1));
/// assert!(!token.is_expired_at(now));
/// assert_eq!(token.authorization_header_value(), "Bearer abc");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct AuthToken {
    access_token: AccessToken,
    #[serde(default)]
    token_type: TokenType,
    expires_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh_token: Option<AccessToken>,
}

impl AuthToken {
    /// Bearer token without a refresh token.
    #[must_use]
    pub fn bearer(access_token: AccessToken, expires_at: DateTime<Utc>) -> Self {
        Self {
            access_token,
            token_type: TokenType::Bearer,
            expires_at,
            refresh_token: None,
        }
    }

    /// Attach a refresh token.
    #[must_use]
    pub fn with_refresh_token(mut self, refresh_token: AccessToken) -> Self {
        self.refresh_token = Some(refresh_token);
        self
    }

    /// The access token.
    #[must_use]
    pub const fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    /// Token scheme.
    #[must_use]
    pub const fn token_type(&self) -> TokenType {
        self.token_type
    }

    /// Instant after which the access token is rejected.
    #[must_use]
    pub const fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Optional refresh token.
    #[must_use]
    pub const fn refresh_token(&self) -> Option<&AccessToken> {
        self.refresh_token.as_ref()
    }

    /// Expired once `now` reaches `expires_at`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Value for the `Authorization` request header.
    #[must_use]
    pub fn authorization_header_value(&self) -> String {
        format!("{} {}", self.token_type, self.access_token.expose())
    }
}

/// Login response body: the signed-in user and their tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct AuthSession {
    /// The authenticated user.
    pub user: User,
    /// Tokens issued for the session.
    pub token: AuthToken,
}
