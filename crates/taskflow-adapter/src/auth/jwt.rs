/*
[INPUT]:  Bearer tokens issued by the external auth provider
[OUTPUT]: Token retrieval, decoded claims and expiration status
[POS]:    Auth layer - session token storage
[UPDATE]: When token claims or storage strategy change
*/

use std::sync::{Arc, RwLock};

use base64::{
    Engine as _,
    engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD},
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::http::{Result, TaskflowError};
use crate::types::{Actor, Role};

/// Claims the task API puts into its session tokens.
///
/// All fields are optional; opaque tokens simply carry no claims.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub exp: Option<i64>,
}

/// Stored token data with decoded claims
#[derive(Debug, Clone)]
pub struct TokenData {
    pub token: String,
    pub claims: TokenClaims,
}

impl TokenData {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.claims
            .exp
            .and_then(|exp| DateTime::<Utc>::from_timestamp(exp, 0))
    }

    /// Actor described by the token claims, when both subject and role are present
    pub fn actor(&self) -> Option<Actor> {
        let id = self.claims.sub.clone()?;
        let role = self.claims.role?;
        Some(Actor::new(id, role))
    }
}

/// Thread-safe session token manager
#[derive(Debug, Clone, Default)]
pub struct JwtManager {
    data: Arc<RwLock<Option<TokenData>>>,
}

impl JwtManager {
    /// Create a new empty manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a token; claims are decoded when the token is a JWT
    pub fn set_token(&self, token: String) {
        let claims = decode_claims(&token).unwrap_or_default();
        let token_data = TokenData { token, claims };

        let mut guard = self.data.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(token_data);
    }

    /// Get the current token if available
    pub fn get_token(&self) -> Option<String> {
        let guard = self.data.read().unwrap_or_else(|e| e.into_inner());
        guard.as_ref().map(|data| data.token.clone())
    }

    /// Check if token is missing or past its `exp` claim.
    ///
    /// Tokens without an `exp` claim never expire locally; the server decides.
    pub fn is_expired(&self) -> bool {
        let guard = self.data.read().unwrap_or_else(|e| e.into_inner());
        match guard.as_ref() {
            Some(data) => data
                .expires_at()
                .is_some_and(|expires_at| Utc::now() > expires_at),
            None => true,
        }
    }

    /// Get token data if available
    pub fn token_data(&self) -> Option<TokenData> {
        let guard = self.data.read().unwrap_or_else(|e| e.into_inner());
        guard.clone()
    }

    /// Clear the stored token
    pub fn clear(&self) {
        let mut guard = self.data.write().unwrap_or_else(|e| e.into_inner());
        *guard = None;
    }
}

/// Decode the payload segment of a JWT without verifying its signature
pub fn decode_claims(token: &str) -> Result<TokenClaims> {
    let payload_b64 = token
        .trim()
        .split('.')
        .nth(1)
        .ok_or_else(|| TaskflowError::InvalidResponse("token is not a valid JWT".to_string()))?;

    let payload_bytes = URL_SAFE_NO_PAD
        .decode(payload_b64)
        .or_else(|_| URL_SAFE.decode(payload_b64))
        .map_err(|e| TaskflowError::InvalidResponse(format!("Invalid JWT payload base64: {e}")))?;

    Ok(serde_json::from_slice(&payload_bytes)?)
}
