use crate::api::ApiError;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// Where the bearer token comes from. Implementations are consulted on every
/// request so a token rotated mid-session is picked up by the next call.
pub trait TokenSource: Send + Sync + fmt::Debug {
    fn current_token(&self) -> Option<String>;
}

/// A fixed token, mostly useful for tests and one-shot runs.
#[derive(Debug, Clone, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    pub const fn none() -> Self {
        Self(None)
    }
}

impl TokenSource for StaticToken {
    fn current_token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Token persisted on disk by the login flow, re-read on each call.
#[derive(Debug, Clone)]
pub struct TokenFile {
    path: PathBuf,
}

impl TokenFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenSource for TokenFile {
    fn current_token(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => non_empty(&contents),
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "token file unreadable");
                None
            }
        }
    }
}

/// Token held in an environment variable, re-read on each call.
#[derive(Debug, Clone)]
pub struct EnvToken {
    var: String,
}

impl EnvToken {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl TokenSource for EnvToken {
    fn current_token(&self) -> Option<String> {
        std::env::var(&self.var).ok().as_deref().and_then(non_empty)
    }
}

fn non_empty(raw: &str) -> Option<String> {
    let token = raw.trim();
    (!token.is_empty()).then(|| token.to_string())
}

#[derive(Deserialize)]
struct ExpiryClaims {
    exp: Option<u64>,
}

/// True when the token's `exp` claim has passed or the token is not a
/// readable JWT. A token without `exp` never expires. The signature is not
/// checked here; the backend does that.
pub fn is_expired(token: &str) -> bool {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_aud = false;
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    match decode::<ExpiryClaims>(token, &DecodingKey::from_secret(&[]), &validation) {
        Ok(data) => {
            let now = u64::try_from(chrono::Utc::now().timestamp()).unwrap_or_default();
            data.claims.exp.is_some_and(|exp| exp < now)
        }
        Err(e) => {
            tracing::debug!(error = %e, "bearer token rejected");
            true
        }
    }
}

/// Reads a fresh token from `source` and checks it has not expired.
pub fn bearer(source: &dyn TokenSource) -> Result<String, ApiError> {
    let token = source.current_token().ok_or(ApiError::MissingToken)?;
    if is_expired(&token) {
        return Err(ApiError::ExpiredToken);
    }
    Ok(token)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    pub(crate) fn token_expiring_in(seconds: i64) -> String {
        let exp = chrono::Utc::now().timestamp() + seconds;
        let claims = serde_json::json!({ "sub": "admin@wildtrails.lk", "exp": exp });
        encode(&Header::default(), &claims, &EncodingKey::from_secret(b"test-secret"))
            .unwrap_or_default()
    }

    #[test]
    fn fresh_token_is_accepted() {
        let token = token_expiring_in(3600);
        assert!(!is_expired(&token));
        assert_eq!(bearer(&StaticToken::new(token.clone())).ok(), Some(token));
    }

    #[test]
    fn past_expiry_is_rejected() {
        let token = token_expiring_in(-30);
        assert!(is_expired(&token));
        assert!(matches!(
            bearer(&StaticToken::new(token)),
            Err(ApiError::ExpiredToken)
        ));
    }

    #[test]
    fn token_without_expiry_is_accepted() {
        let claims = serde_json::json!({ "sub": "admin@wildtrails.lk" });
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(b"test-secret"))
            .unwrap_or_default();
        assert!(!token.is_empty());
        assert!(!is_expired(&token));
    }

    #[test]
    fn garbage_token_counts_as_expired() {
        assert!(is_expired("not-a-jwt"));
    }

    #[test]
    fn missing_token_is_reported() {
        assert!(matches!(
            bearer(&StaticToken::none()),
            Err(ApiError::MissingToken)
        ));
    }

    #[test]
    fn token_file_is_read_on_every_call() -> Result<(), Box<dyn std::error::Error>> {
        let path = std::env::temp_dir().join(format!("wildtrails-token-{}", std::process::id()));
        let source = TokenFile::new(&path);

        std::fs::write(&path, "first\n")?;
        assert_eq!(source.current_token().as_deref(), Some("first"));

        std::fs::write(&path, "second")?;
        assert_eq!(source.current_token().as_deref(), Some("second"));

        std::fs::write(&path, "   ")?;
        assert_eq!(source.current_token(), None);

        std::fs::remove_file(&path)?;
        assert_eq!(source.current_token(), None);
        Ok(())
    }
}
