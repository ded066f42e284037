//! Admin credential
//!
//! A single configured admin identity verified with argon2. The stored
//! value is always a PHC hash; plaintext passwords only exist transiently
//! at startup in development setups.

use ring::rand::{SecureRandom, SystemRandom};

/// Configured admin credential
#[derive(Debug, Clone)]
pub struct AdminCredential {
    pub username: String,
    password_hash: String,
}

impl AdminCredential {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }

    /// Build from a plaintext password (hashed immediately)
    pub fn from_plain(
        username: impl Into<String>,
        password: &str,
    ) -> Result<Self, argon2::password_hash::Error> {
        Ok(Self {
            username: username.into(),
            password_hash: Self::hash_password(password)?,
        })
    }

    /// Verify a login attempt against the stored hash
    pub fn verify(
        &self,
        username: &str,
        password: &str,
    ) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        if username != self.username {
            return Ok(false);
        }
        let parsed_hash = PasswordHash::new(&self.password_hash)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash a password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }

    /// Generate a random printable password (development fallback)
    pub fn generate_password() -> String {
        let allowed_chars = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
        let rng = SystemRandom::new();
        let mut password = String::with_capacity(24);
        for _ in 0..24 {
            let mut byte = [0u8; 1];
            if rng.fill(&mut byte).is_err() {
                return "bakehouse-dev-password".to_string();
            }
            let idx = (byte[0] as usize) % allowed_chars.len();
            password.push(allowed_chars.as_bytes()[idx] as char);
        }
        password
    }
}
