//! Login credentials.
//!
//! Handlers build [`LoginCredentials`] from request payloads so the
//! authentication port only ever sees well-formed usernames.

use zeroize::Zeroizing;

use super::{Username, UsernameValidationError};

/// Returned when a login payload is malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Username failed [`Username`] validation.
    #[error(transparent)]
    Username(#[from] UsernameValidationError),
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials.
///
/// The username is trimmed before validation; the password keeps
/// caller-provided whitespace and is zeroised on drop.
///
/// # Examples
/// ```
/// use fresque::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" admin ", "password").expect("valid credentials");
/// assert_eq!(creds.username().as_ref(), "admin");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: Username,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let username = Username::new(username.trim())?;
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Account the caller claims to be.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
