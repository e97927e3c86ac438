//! Bearer token supply.
//!
//! The token is opaque: it is read once, trimmed, and attached to every
//! authenticated request. Obtaining it (the login flow) happens elsewhere.

use std::fmt;
use std::fs;
use std::path::Path;

use super::error::InfraError;

/// Source of the bearer token sent with authenticated requests.
pub trait CredentialProvider: Send + Sync {
    fn bearer_token(&self) -> Result<String, InfraError>;
}

/// A token fixed for the lifetime of the process.
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StaticToken(***)")
    }
}

impl CredentialProvider for StaticToken {
    fn bearer_token(&self) -> Result<String, InfraError> {
        Ok(self.0.clone())
    }
}

/// Resolve the token from a file (preferred) or the environment value.
pub fn resolve_token(
    token_file: Option<&Path>,
    env_token: Option<&str>,
) -> Result<StaticToken, InfraError> {
    let token = if let Some(path) = token_file {
        fs::read_to_string(path)
            .map_err(|err| {
                InfraError::credentials(format!(
                    "failed to read token file `{}`: {err}",
                    path.display()
                ))
            })?
            .trim()
            .to_string()
    } else {
        env_token
            .map(|token| token.trim().to_string())
            .ok_or_else(|| {
                InfraError::credentials("token is required (use --token-file or DOCINTEL_TOKEN)")
            })?
    };

    if token.is_empty() {
        return Err(InfraError::credentials("token is empty"));
    }
    Ok(StaticToken::new(token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn tmp_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("tmp file");
        file.write_all(contents.as_bytes()).expect("write tmp");
        file
    }

    #[test]
    fn token_file_wins_over_env() {
        let file = tmp_file("file-token\n");
        let token = resolve_token(Some(file.path()), Some("env-token")).expect("token");
        assert_eq!(token.bearer_token().expect("token"), "file-token");
    }

    #[test]
    fn env_token_is_used_without_file() {
        let token = resolve_token(None, Some("env-token")).expect("token");
        assert_eq!(token.bearer_token().expect("token"), "env-token");
    }

    #[test]
    fn missing_or_blank_token_is_an_error() {
        let err = resolve_token(None, None).expect_err("missing");
        assert!(matches!(err, InfraError::Credentials { .. }));

        let file = tmp_file("   \n");
        let err = resolve_token(Some(file.path()), None).expect_err("blank");
        assert!(matches!(err, InfraError::Credentials { .. }));
    }

    #[test]
    fn debug_output_hides_token() {
        let token = StaticToken::new("secret");
        assert!(!format!("{token:?}").contains("secret"));
    }
}
