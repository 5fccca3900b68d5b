use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which half of the token pair a JWT is. Only `access` tokens resolve to an
/// identity; `refresh` tokens are only good at `/auth/refresh`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Payload of tokens minted for registered accounts. Guests never get one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// `users.id` of the account.
    pub sub: Uuid,
    pub iat: usize,
    pub exp: usize,
    pub iss: String,
    pub aud: String,
    pub kind: TokenKind,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kind_travels_as_a_lowercase_string() {
        let sub = Uuid::new_v4();
        let claims = Claims {
            sub,
            iat: 1,
            exp: 2,
            iss: "tickerdesk".into(),
            aud: "tickerdesk-users".into(),
            kind: TokenKind::Refresh,
        };
        let v = serde_json::to_value(&claims).unwrap();
        assert_eq!(v["kind"], json!("refresh"));
        assert_eq!(v["sub"], json!(sub.to_string()));
    }
}
