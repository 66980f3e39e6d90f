//! Driving port for authentication.
//!
//! Inbound adapters call it to turn credentials into a [`Username`] that is
//! then stored in the session. Identity provider integration plugs in here.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Username};

/// Domain use-case port for authentication.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated account.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Username, Error>;
}

/// Development authenticator: `admin` / `password` logs in as `admin`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Username, Error> {
        if credentials.username().as_ref() == "admin" && credentials.password() == "password" {
            Ok(credentials.username().clone())
        } else {
            Err(Error::unauthorized("invalid credentials"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("admin", "password", true)]
    #[case("admin", "wrong", false)]
    #[case("other", "password", false)]
    #[tokio::test]
    async fn fixture_login_accepts_only_the_dev_account(
        #[case] username: &str,
        #[case] password: &str,
        #[case] should_succeed: bool,
    ) {
        let creds = LoginCredentials::try_from_parts(username, password).expect("credentials shape");
        match (should_succeed, FixtureLoginService.authenticate(&creds).await) {
            (true, Ok(name)) => assert_eq!(name.as_ref(), "admin"),
            (false, Err(err)) => assert_eq!(err.code(), ErrorCode::Unauthorized),
            (true, Err(err)) => panic!("expected success, got error: {err:?}"),
            (false, Ok(name)) => panic!("expected failure, got success: {name}"),
        }
    }
}
