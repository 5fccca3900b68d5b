use std::fmt;

use rand::Rng;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

pub const GUEST_PREFIX: &str = "guest_";

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Owner of portfolio data for the lifetime of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// Backed by a `users` row; the id comes from a verified access token.
    Account(Uuid),
    /// Self-asserted `guest_...` string. Knowing it is the whole authorization.
    Guest(String),
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IdentityKind {
    Account,
    Guest,
}

impl Identity {
    /// String key stored in `portfolio_entries.owner_id`.
    pub fn owner_id(&self) -> String {
        match self {
            Identity::Account(id) => id.to_string(),
            Identity::Guest(id) => id.clone(),
        }
    }

    pub fn kind(&self) -> IdentityKind {
        match self {
            Identity::Account(_) => IdentityKind::Account,
            Identity::Guest(_) => IdentityKind::Guest,
        }
    }

    pub fn is_guest(&self) -> bool {
        matches!(self, Identity::Guest(_))
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::Account(id) => write!(f, "account:{}", id),
            Identity::Guest(id) => write!(f, "{}", id),
        }
    }
}

/// Anything carrying the `guest_` prefix is a guest id.
pub fn is_guest_id(value: &str) -> bool {
    value.starts_with(GUEST_PREFIX)
}

/// Builds `guest_<unix millis>_<random base36>`, the same shape browsers mint locally.
pub fn generate_guest_id() -> String {
    let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    let mut rng = rand::thread_rng();
    let suffix: String = (0..11)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("{}{}_{}", GUEST_PREFIX, millis, suffix)
}
