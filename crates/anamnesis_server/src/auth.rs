//! Bearer-token verification.

use anamnesis_error::AnamnesisResult;
use anamnesis_interface::TokenVerifier;
use async_trait::async_trait;
use std::collections::HashMap;

/// Verifies tokens against a fixed token-to-user table.
///
/// The table comes from configuration; token issuance itself is out of
/// scope, callers arrive with tokens minted elsewhere.
#[derive(Debug, Default)]
pub struct StaticTokenVerifier {
    tokens: HashMap<String, String>,
}

impl StaticTokenVerifier {
    /// Build a verifier from a token-to-user table.
    pub fn new(tokens: HashMap<String, String>) -> Self {
        Self { tokens }
    }
}

#[async_trait]
impl TokenVerifier for StaticTokenVerifier {
    async fn verify(&self, token: &str) -> AnamnesisResult<Option<String>> {
        Ok(self.tokens.get(token).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn known_token_resolves_to_its_user() {
        let verifier = StaticTokenVerifier::new(HashMap::from([(
            "tok-1".to_string(),
            "u1".to_string(),
        )]));

        assert_eq!(verifier.verify("tok-1").await.unwrap().as_deref(), Some("u1"));
        assert_eq!(verifier.verify("tok-2").await.unwrap(), None);
    }
}
