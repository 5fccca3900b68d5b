use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use tracing::{debug, warn};

use super::identity::{is_guest_id, Identity};
use crate::{auth::jwt::JwtKeys, error::AppError};

/// Pulls the credential out of `Authorization: Bearer <cred>`.
pub fn bearer_credential(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
    let (scheme, credential) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let credential = credential.trim();
    (!credential.is_empty()).then_some(credential)
}

/// Turns a bearer credential into exactly one identity.
///
/// Guest ids are taken at face value; anything else must be a valid access
/// token issued by `keys`.
pub fn resolve(credential: Option<&str>, keys: &JwtKeys) -> Result<Identity, AppError> {
    let credential = credential.ok_or(AppError::Unauthenticated)?;

    if is_guest_id(credential) {
        debug!(guest_id = %credential, "resolved guest identity");
        return Ok(Identity::Guest(credential.to_string()));
    }

    match keys.verify_access(credential) {
        Ok(claims) => Ok(Identity::Account(claims.sub)),
        Err(e) => {
            warn!(error = %e, "invalid or expired token");
            Err(AppError::InvalidOrExpiredToken)
        }
    }
}

/// Identity resolved for the current request.
pub struct CurrentIdentity(pub Identity);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        resolve(bearer_credential(&parts.headers), &keys).map(CurrentIdentity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JwtConfig;
    use axum::http::HeaderValue;
    use uuid::Uuid;

    fn keys() -> JwtKeys {
        JwtKeys::from(&JwtConfig {
            secret: "resolver-secret".into(),
            issuer: "iss".into(),
            audience: "aud".into(),
            ttl_minutes: 5,
            refresh_ttl_minutes: 60,
        })
    }

    fn headers(auth: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(AUTHORIZATION, HeaderValue::from_str(auth).unwrap());
        h
    }

    #[test]
    fn bearer_credential_parsing() {
        assert_eq!(bearer_credential(&headers("Bearer abc")), Some("abc"));
        assert_eq!(bearer_credential(&headers("bearer abc")), Some("abc"));
        assert_eq!(bearer_credential(&headers("Basic abc")), None);
        assert_eq!(bearer_credential(&headers("Bearer ")), None);
        assert_eq!(bearer_credential(&headers("Bearer")), None);
        assert_eq!(bearer_credential(&HeaderMap::new()), None);
    }

    #[test]
    fn missing_credential_is_unauthenticated() {
        assert!(matches!(resolve(None, &keys()), Err(AppError::Unauthenticated)));
    }

    #[test]
    fn guest_credentials_resolve_to_themselves() {
        for id in ["guest_1700000000_ab12", "guest_x", "guest_1_zzzzzzzzzzz", "guest_"] {
            assert_eq!(
                resolve(Some(id), &keys()).unwrap(),
                Identity::Guest(id.to_string())
            );
        }
    }

    #[test]
    fn access_token_resolves_to_account() {
        let keys = keys();
        let account_id = Uuid::new_v4();
        let token = keys.sign_access(account_id).unwrap();
        assert_eq!(
            resolve(Some(&token), &keys).unwrap(),
            Identity::Account(account_id)
        );
    }

    #[test]
    fn bad_tokens_are_rejected() {
        let keys = keys();
        let refresh = keys.sign_refresh(Uuid::new_v4()).unwrap();
        for cred in ["not-a-jwt", "Guest_1_a", refresh.as_str()] {
            assert!(matches!(
                resolve(Some(cred), &keys),
                Err(AppError::InvalidOrExpiredToken)
            ));
        }
    }
}
