use std::sync::OnceLock;

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

/// Wrong password is `Ok(false)`, not an error; only an unparseable hash
/// surfaces as `Err`.
pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

static DUMMY_HASH: OnceLock<String> = OnceLock::new();

/// Burn a full argon2 verification against a throwaway hash. Login calls
/// this when the account does not exist, so the unknown-account path costs
/// the same as a wrong password and cannot be told apart by timing.
pub fn dummy_verify(plain: &str) {
    let hash = DUMMY_HASH.get_or_init(|| {
        hash_password("expensetrack-dummy-credential").unwrap_or_default()
    });
    let _ = verify_password(plain, hash);
}
