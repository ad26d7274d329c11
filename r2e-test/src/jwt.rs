//! Signed test tokens for driving guard- and identity-gated routes without a
//! concrete production token backend.

use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Serialize)]
struct Claims {
    sub: String,
    #[serde(flatten)]
    extra: BTreeMap<String, serde_json::Value>,
}

/// Mints HS256 bearer tokens under a fixed test secret.
///
/// ```ignore
/// let jwt = TestJwt::new("test-secret");
/// let token = jwt.builder("alice").roles(&["admin"]).build();
/// app.get_authenticated("/admin", &token).await;
/// ```
pub struct TestJwt {
    secret: String,
}

impl TestJwt {
    pub fn new(secret: impl Into<String>) -> Self {
        Self { secret: secret.into() }
    }

    /// Shorthand for a token with only a `sub` claim.
    pub fn token(&self, sub: &str) -> String {
        self.builder(sub).build()
    }

    pub fn builder(&self, sub: &str) -> TokenBuilder {
        TokenBuilder {
            secret: self.secret.clone(),
            sub: sub.to_string(),
            extra: BTreeMap::new(),
        }
    }
}

/// Accumulates claims for a single test token before signing it.
pub struct TokenBuilder {
    secret: String,
    sub: String,
    extra: BTreeMap<String, serde_json::Value>,
}

impl TokenBuilder {
    pub fn roles(mut self, roles: &[&str]) -> Self {
        self.extra.insert("roles".to_string(), serde_json::json!(roles));
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.extra
            .insert("email".to_string(), serde_json::json!(email.into()));
        self
    }

    pub fn claim(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> String {
        let claims = Claims {
            sub: self.sub,
            extra: self.extra,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .expect("failed to encode test JWT")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_carries_sub_and_roles() {
        let jwt = TestJwt::new("shh");
        let token = jwt.builder("alice").roles(&["admin", "editor"]).build();
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn shorthand_token_differs_per_subject() {
        let jwt = TestJwt::new("shh");
        assert_ne!(jwt.token("alice"), jwt.token("bob"));
    }
}
