//! Signed identity tokens and the [`AuthenticatedUser`] extractor.
//!
//! The identity cookie stores an HS256 JWT with the user's claims, so handlers
//! get the user without a database round trip.

use std::future::{Ready, ready};

use actix_identity::{Identity, IdentityExt};
use actix_web::error::{ErrorInternalServerError, ErrorUnauthorized};
use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload, web};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::domain::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;

pub fn issue_token(
    claims: &AuthenticatedUser,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verifies the signature and expiry of a token.
pub fn decode_token(
    token: &str,
    secret: &str,
) -> Result<AuthenticatedUser, jsonwebtoken::errors::Error> {
    decode::<AuthenticatedUser>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

/// Attaches the signed claims to the session.
pub fn login(
    req: &HttpRequest,
    claims: &AuthenticatedUser,
    secret: &str,
) -> Result<(), actix_web::Error> {
    let token = issue_token(claims, secret).map_err(|e| {
        log::error!("Failed to sign identity token: {e}");
        ErrorInternalServerError("failed to sign in")
    })?;
    Identity::login(&req.extensions(), token).map_err(|e| {
        log::error!("Failed to attach identity: {e}");
        ErrorInternalServerError("failed to sign in")
    })?;
    Ok(())
}

fn extract_user(req: &HttpRequest) -> Result<AuthenticatedUser, actix_web::Error> {
    let config = req
        .app_data::<web::Data<ServerConfig>>()
        .ok_or_else(|| ErrorInternalServerError("server configuration is not registered"))?;

    let token = req
        .get_identity()
        .and_then(|identity| identity.id())
        .map_err(|_| ErrorUnauthorized("not signed in"))?;

    decode_token(&token, &config.secret).map_err(|e| {
        log::warn!("Rejected identity token: {e}");
        ErrorUnauthorized("session expired")
    })
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(extract_user(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

    fn claims(exp: i64) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".into(),
            email: "admin@kashop.com".into(),
            name: "Admin User".into(),
            roles: vec!["Admin".into()],
            exp,
        }
    }

    #[test]
    fn token_carries_claims() {
        let exp = chrono::Utc::now().timestamp() + 3600;
        let token = issue_token(&claims(exp), SECRET).unwrap();

        let decoded = decode_token(&token, SECRET).unwrap();
        assert_eq!(decoded, claims(exp));
        assert!(decoded.is_admin());
    }

    #[test]
    fn expired_or_foreign_tokens_are_rejected() {
        let expired = issue_token(&claims(1_000), SECRET).unwrap();
        assert!(decode_token(&expired, SECRET).is_err());

        let exp = chrono::Utc::now().timestamp() + 3600;
        let token = issue_token(&claims(exp), SECRET).unwrap();
        assert!(decode_token(&token, "another-secret").is_err());
    }
}
