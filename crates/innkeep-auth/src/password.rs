//! Argon2id password hashing.
//!
//! Hashes are PHC strings produced with the OWASP baseline parameters
//! (19 MiB, 2 passes, 1 lane) and a fresh salt each time. When a pepper
//! is configured it is prepended to the password on both sides.

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};

use crate::error::AuthError;

const MEMORY_KIB: u32 = 19 * 1024;
const PASSES: u32 = 2;
const LANES: u32 = 1;

fn hasher() -> Result<Argon2<'static>, AuthError> {
    let params = Params::new(MEMORY_KIB, PASSES, LANES, None)
        .map_err(|e| AuthError::Crypto(format!("argon2 params: {e}")))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

fn peppered(password: &str, pepper: Option<&str>) -> Vec<u8> {
    match pepper {
        Some(p) => [p.as_bytes(), password.as_bytes()].concat(),
        None => password.as_bytes().to_vec(),
    }
}

/// Hash `password` for storage.
pub fn hash_password(password: &str, pepper: Option<&str>) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = hasher()?
        .hash_password(&peppered(password, pepper), &salt)
        .map_err(|e| AuthError::Crypto(format!("password hash: {e}")))?;
    Ok(hash.to_string())
}

/// Check `password` against a stored PHC hash. The comparison is exact;
/// a malformed hash is an error rather than a mismatch.
pub fn verify_password(
    password: &str,
    hash: &str,
    pepper: Option<&str>,
) -> Result<bool, AuthError> {
    let parsed =
        PasswordHash::new(hash).map_err(|e| AuthError::Crypto(format!("stored hash: {e}")))?;

    // Parameters come from the PHC string, so the default instance verifies
    // hashes made with any cost settings.
    match Argon2::default().verify_password(&peppered(password, pepper), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::Crypto(format!("password verify: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_argon2id_phc_with_owasp_cost() {
        let hash = hash_password("Secret123", None).unwrap();
        assert!(hash.starts_with("$argon2id$v=19$m=19456,t=2,p=1$"), "{hash}");
        assert_ne!(hash, hash_password("Secret123", None).unwrap(), "salted");
    }

    #[test]
    fn round_trip_is_exact_and_case_sensitive() {
        let hash = hash_password("Secret123", None).unwrap();
        assert!(verify_password("Secret123", &hash, None).unwrap());
        assert!(!verify_password("secret123", &hash, None).unwrap());
        assert!(!verify_password("Secret123 ", &hash, None).unwrap());
    }

    #[test]
    fn pepper_must_match() {
        let hash = hash_password("Secret123", Some("kitchen")).unwrap();
        assert!(verify_password("Secret123", &hash, Some("kitchen")).unwrap());
        assert!(!verify_password("Secret123", &hash, None).unwrap());
        assert!(!verify_password("Secret123", &hash, Some("cellar")).unwrap());
    }

    #[test]
    fn malformed_hash_is_a_crypto_error() {
        let result = verify_password("pw", "plaintext-in-the-db", None);
        assert!(matches!(result, Err(AuthError::Crypto(_))));
    }
}
