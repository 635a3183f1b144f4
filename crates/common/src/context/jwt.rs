// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::env::Environment;
use crate::env_const::LUMEN_JWT_SECRET;
use crate::http::RequestHead;

use super::error::ContextExtractionError;
use super::request_context::RequestContext;

const TOKEN_PREFIX: &str = "Bearer ";
const AUTHORIZATION_HEADER: &str = "Authorization";

const TOKEN_VALIDITY_DAYS: i64 = 30;

#[derive(Debug, Error)]
pub enum JwtAuthenticationError {
    #[error("Invalid token")]
    Invalid,
    #[error("Expired token")]
    Expired,
    #[error("Delegate error: {0}")]
    Delegate(#[from] Box<dyn std::error::Error + Send + Sync>),
}

#[derive(Serialize, Deserialize)]
struct Claims {
    user_id: i64,
    exp: i64,
    iat: i64,
}

/// Validates (and issues) the HMAC-SHA256 tokens that carry the
/// authenticated identity. This is the "token service" collaborator surface:
/// it runs before any directive and populates the request context's identity.
pub struct JwtAuthenticator {
    secret: String,
}

impl JwtAuthenticator {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// `None` when no secret is configured, which disables authentication:
    /// every request resolves anonymously.
    pub fn from_env(env: &dyn Environment) -> Option<Self> {
        env.get(LUMEN_JWT_SECRET).map(JwtAuthenticator::new)
    }

    pub fn issue_token(&self, user_id: i64) -> Result<String, JwtAuthenticationError> {
        let now = Utc::now();
        let claims = Claims {
            user_id,
            exp: (now + Duration::days(TOKEN_VALIDITY_DAYS)).timestamp(),
            iat: now.timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )
        .map_err(|err| JwtAuthenticationError::Delegate(Box::new(err)))
    }

    /// The identity baked into a token, after signature and expiry
    /// validation.
    pub fn user_id_from_token(&self, token: &str) -> Result<i64, JwtAuthenticationError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|err| match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtAuthenticationError::Expired,
            _ => JwtAuthenticationError::Invalid,
        })?;
        Ok(token_data.claims.user_id)
    }

    /// Extract the bearer token from the `Authorization` header. An absent
    /// header is anonymous, not an error; a header without the bearer prefix
    /// is malformed.
    pub fn extract_token(
        &self,
        head: &(dyn RequestHead + Send + Sync),
    ) -> Result<Option<String>, ContextExtractionError> {
        match head.get_header(AUTHORIZATION_HEADER) {
            Some(header) => match header.strip_prefix(TOKEN_PREFIX) {
                Some(token) => Ok(Some(token.to_string())),
                None => Err(ContextExtractionError::Malformed),
            },
            None => Ok(None),
        }
    }

    /// The join point run once per request, before any directive: extract
    /// the token, validate it, and record the identity in the context.
    pub fn populate_identity(
        &self,
        head: &(dyn RequestHead + Send + Sync),
        request_context: &RequestContext,
    ) -> Result<(), ContextExtractionError> {
        match self.extract_token(head)? {
            Some(token) => {
                let user_id = self.user_id_from_token(&token).map_err(|err| match err {
                    JwtAuthenticationError::Expired => {
                        ContextExtractionError::ExpiredAuthentication
                    }
                    _ => ContextExtractionError::Unauthorized,
                })?;
                request_context.set_user_id(user_id);
                Ok(())
            }
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MapEnvironment;
    use crate::http::Headers;

    fn authenticator() -> JwtAuthenticator {
        JwtAuthenticator::new("shibboleth")
    }

    #[test]
    fn round_trip() {
        let authenticator = authenticator();
        let token = authenticator.issue_token(42).unwrap();
        assert_eq!(authenticator.user_id_from_token(&token).unwrap(), 42);
    }

    #[test]
    fn tampered_token_is_invalid() {
        let authenticator = authenticator();
        let token = authenticator.issue_token(42).unwrap();

        let other = JwtAuthenticator::new("different-secret");
        assert!(matches!(
            other.user_id_from_token(&token),
            Err(JwtAuthenticationError::Invalid)
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let authenticator = authenticator();
        let now = Utc::now().timestamp();
        let stale = encode(
            &Header::default(),
            &Claims {
                user_id: 42,
                exp: now - 3600,
                iat: now - 7200,
            },
            &EncodingKey::from_secret("shibboleth".as_ref()),
        )
        .unwrap();

        assert!(matches!(
            authenticator.user_id_from_token(&stale),
            Err(JwtAuthenticationError::Expired)
        ));
    }

    #[test]
    fn from_env_requires_secret() {
        assert!(JwtAuthenticator::from_env(&MapEnvironment::default()).is_none());

        let env = MapEnvironment::from([(LUMEN_JWT_SECRET, "shibboleth")]);
        assert!(JwtAuthenticator::from_env(&env).is_some());
    }

    #[test]
    fn populate_identity_sets_user_id() {
        let authenticator = authenticator();
        let token = authenticator.issue_token(7).unwrap();

        let mut headers = Headers::new();
        headers.insert("Authorization".into(), format!("Bearer {token}"));

        let context = RequestContext::new();
        authenticator.populate_identity(&headers, &context).unwrap();
        assert_eq!(context.user_id(), Some(7));
    }

    #[test]
    fn absent_header_is_anonymous() {
        let context = RequestContext::new();
        authenticator()
            .populate_identity(&Headers::new(), &context)
            .unwrap();
        assert_eq!(context.user_id(), None);
    }

    #[test]
    fn non_bearer_header_is_malformed() {
        let mut headers = Headers::new();
        headers.insert("Authorization".into(), "Basic dXNlcjpwdw==".into());

        let context = RequestContext::new();
        let err = authenticator()
            .populate_identity(&headers, &context)
            .unwrap_err();
        assert!(matches!(err, ContextExtractionError::Malformed));
        assert_eq!(err.user_error_message(), "Not authorized");
    }
}
