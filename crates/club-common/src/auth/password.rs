//! Password hashing and verification
//!
//! Members and guests both log in with an Argon2id-hashed password. Only
//! registered members are held to the strength policy; guest passwords are
//! short-lived club passcodes.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use club_core::DomainError;

use crate::error::{AppError, AppResult};

/// Minimum length of a registered member's password
const MIN_PASSWORD_LEN: usize = 8;

/// Hash a password using Argon2id
///
/// # Errors
/// Returns an error if hashing fails
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {e}")))
}

/// Verify a password against a stored PHC hash string
///
/// # Errors
/// Returns an error if the stored hash cannot be parsed
pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash format: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Password hashing behind a value the service context can hold
#[derive(Debug, Clone, Default)]
pub struct PasswordService;

impl PasswordService {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Hash a password
    ///
    /// # Errors
    /// Returns an error if hashing fails
    pub fn hash(&self, password: &str) -> AppResult<String> {
        hash_password(password)
    }

    /// Verify a password against a hash
    ///
    /// # Errors
    /// Returns an error if the hash is malformed
    pub fn verify(&self, password: &str, hash: &str) -> AppResult<bool> {
        verify_password(password, hash)
    }

    /// Verify a login attempt.
    ///
    /// A missing hash (unknown account) and a wrong password produce the same
    /// `InvalidCredentials` error.
    ///
    /// # Errors
    /// Returns `DomainError::InvalidCredentials` if the password doesn't match
    pub fn verify_login(&self, password: &str, hash: Option<&str>) -> AppResult<()> {
        match hash {
            Some(hash) if self.verify(password, hash)? => Ok(()),
            _ => Err(DomainError::InvalidCredentials.into()),
        }
    }
}

/// Validate a registered member's password.
///
/// Requires at least 8 characters with an upper-case letter, a lower-case
/// letter and a digit.
///
/// # Errors
/// Returns `DomainError::WeakPassword` naming the first unmet rule
pub fn validate_password_strength(password: &str) -> AppResult<()> {
    let weak = |msg: &str| Err(DomainError::WeakPassword(msg.to_string()).into());

    if password.chars().count() < MIN_PASSWORD_LEN {
        return weak("must be at least 8 characters long");
    }
    if !password.chars().any(char::is_uppercase) {
        return weak("must contain an uppercase letter");
    }
    if !password.chars().any(char::is_lowercase) {
        return weak("must contain a lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return weak("must contain a digit");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weak_reason(password: &str) -> String {
        match validate_password_strength(password) {
            Err(AppError::Domain(DomainError::WeakPassword(reason))) => reason,
            other => panic!("expected weak password, got {other:?}"),
        }
    }

    #[test]
    fn test_hash_is_salted() {
        let hash = hash_password("ClubPass123").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert_ne!(hash, hash_password("ClubPass123").unwrap());
    }

    #[test]
    fn test_verify_password() {
        let hash = hash_password("ClubPass123").unwrap();
        assert!(verify_password("ClubPass123", &hash).unwrap());
        assert!(!verify_password("ClubPass124", &hash).unwrap());
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(verify_password("anything", "not-a-phc-string").is_err());
    }

    #[test]
    fn test_verify_login() {
        let service = PasswordService::new();
        let hash = service.hash("1234").unwrap();

        assert!(service.verify_login("1234", Some(&hash)).is_ok());

        let wrong = service.verify_login("4321", Some(&hash)).unwrap_err();
        assert!(matches!(wrong, AppError::Domain(DomainError::InvalidCredentials)));

        let unknown = service.verify_login("1234", None).unwrap_err();
        assert_eq!(unknown.status_code(), 401);
    }

    #[test]
    fn test_strength_accepts_valid() {
        assert!(validate_password_strength("SecurePass1").is_ok());
        assert!(validate_password_strength("Abcdefg1").is_ok());
    }

    #[test]
    fn test_strength_reasons() {
        assert!(weak_reason("Short1").contains("8 characters"));
        assert!(weak_reason("lowercase123").contains("uppercase"));
        assert!(weak_reason("UPPERCASE123").contains("lowercase"));
        assert!(weak_reason("NoDigitsHere").contains("digit"));
    }

    #[test]
    fn test_weak_password_is_validation_error() {
        let err = validate_password_strength("abc").unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "WEAK_PASSWORD");
    }
}
