use argon2::{
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

/// Shortest password `register` accepts, counted in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

pub fn meets_length_policy(plain: &str) -> bool {
    plain.chars().count() >= MIN_PASSWORD_LEN
}

fn argon2_failure(step: &'static str) -> impl FnOnce(password_hash::Error) -> anyhow::Error {
    move |e| {
        error!(error = %e, step, "argon2 failure");
        anyhow::anyhow!("{}: {}", step, e)
    }
}

/// PHC-format argon2id hash with a fresh random salt.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let phc = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(argon2_failure("hash password"))?;
    Ok(phc.to_string())
}

/// `Ok(false)` on a plain mismatch. A stored hash that cannot be parsed or
/// checked is an error, not a failed login.
pub fn verify_password(plain: &str, stored: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(stored).map_err(argon2_failure("parse stored password hash"))?;
    match Argon2::default().verify_password(plain.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(argon2_failure("verify password")(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_are_salted_and_verifiable() {
        let first = hash_password("tickerdesk-pass").unwrap();
        let second = hash_password("tickerdesk-pass").unwrap();
        assert!(first.starts_with("$argon2id$"));
        assert_ne!(first, second);
        assert!(verify_password("tickerdesk-pass", &first).unwrap());
        assert!(verify_password("tickerdesk-pass", &second).unwrap());
    }

    #[test]
    fn mismatch_is_false_not_an_error() {
        let stored = hash_password("right-password").unwrap();
        assert!(!verify_password("wrong-password", &stored).unwrap());
    }

    #[test]
    fn unparseable_stored_hash_is_an_error() {
        let err = verify_password("anything", "plaintext-in-db").unwrap_err();
        assert!(err.to_string().starts_with("parse stored password hash"));
    }

    #[test]
    fn length_policy_counts_characters() {
        assert!(!meets_length_policy("short"));
        assert!(meets_length_policy("12345678"));
        // 4 chars, 8 bytes
        assert!(!meets_length_policy("éééé"));
    }
}
