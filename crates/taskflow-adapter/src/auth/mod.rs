/*
[INPUT]:  Session tokens and the identity endpoint
[OUTPUT]: Bearer tokens, decoded claims and the acting user
[POS]:    Auth layer - session and identity for the task API
[UPDATE]: When auth flow or identity resolution changes
*/

pub mod identity;
pub mod jwt;

pub use identity::{IdentityProvider, StaticIdentity};
pub use jwt::{JwtManager, TokenClaims, TokenData, decode_claims};
