use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::Error as PhcError;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Password hashing implementation.
///
/// Argon2id with a fresh random salt per call, so hashing the same password
/// twice never yields the same string.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Create a new password hasher with the Argon2 default cost parameters.
    ///
    /// # Returns
    /// PasswordHasher instance configured with secure defaults
    pub fn new() -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::default()),
        }
    }

    /// Create a password hasher with explicit cost parameters.
    ///
    /// # Arguments
    /// * `memory_kib` - Memory cost in KiB
    /// * `iterations` - Number of passes
    /// * `parallelism` - Degree of parallelism
    ///
    /// # Errors
    /// * `InvalidParams` - Parameters are outside the ranges Argon2 accepts
    pub fn with_params(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, PasswordError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| PasswordError::InvalidParams(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a plaintext password securely.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// Parameters and salt are read from the stored hash, so hashes produced
    /// under older cost settings still verify.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash in PHC string format
    ///
    /// # Returns
    /// True if password matches; false on mismatch or unreadable hash
    ///
    /// # Errors
    /// * `VerificationFailed` - The underlying primitive failed
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            return Ok(false);
        };

        match self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
        {
            Ok(()) => Ok(true),
            Err(PhcError::Crypto) => Err(PasswordError::VerificationFailed(
                PhcError::Crypto.to_string(),
            )),
            Err(_) => Ok(false),
        }
    }

    /// Whether a stored hash was produced with different settings than this hasher's.
    ///
    /// Unparseable and non-argon2id hashes always need a rehash.
    pub fn needs_rehash(&self, hash: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            return true;
        };

        if parsed_hash.algorithm != Algorithm::Argon2id.ident()
            || parsed_hash.version != Some(Version::V0x13 as u32)
        {
            return true;
        }

        let current = self.argon2.params();
        match Params::try_from(&parsed_hash) {
            Ok(stored) => {
                stored.m_cost() != current.m_cost()
                    || stored.t_cost() != current.t_cost()
                    || stored.p_cost() != current.p_cost()
            }
            Err(_) => true,
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimal cost keeps the suite fast.
    fn cheap_hasher() -> PasswordHasher {
        PasswordHasher::with_params(8, 1, 1).expect("Failed to build hasher")
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = cheap_hasher();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");
        assert!(hash.starts_with("$argon2id$"));

        assert!(hasher
            .verify(password, &hash)
            .expect("Failed to verify password"));

        assert!(!hasher
            .verify("wrong_password", &hash)
            .expect("Failed to verify password"));
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let hasher = cheap_hasher();

        let first = hasher.hash("cat").expect("Failed to hash password");
        let second = hasher.hash("cat").expect("Failed to hash password");

        assert_ne!(first, second);
        assert!(hasher.verify("cat", &first).unwrap());
        assert!(hasher.verify("cat", &second).unwrap());
    }

    #[test]
    fn test_verify_malformed_hash_returns_false() {
        let hasher = cheap_hasher();

        assert!(!hasher.verify("password", "invalid_hash").unwrap());
        assert!(!hasher.verify("password", "").unwrap());
        assert!(!hasher
            .verify("password", "$argon2id$v=19$m=8,t=1,p=1$notbase64!$xx")
            .unwrap());
    }

    #[test]
    fn test_verify_uses_parameters_from_stored_hash() {
        let old = PasswordHasher::with_params(16, 2, 1).unwrap();
        let hash = old.hash("andela1").unwrap();

        assert!(cheap_hasher().verify("andela1", &hash).unwrap());
    }

    #[test]
    fn test_with_params_rejects_out_of_range() {
        let result = PasswordHasher::with_params(8, 0, 1);
        assert!(matches!(result, Err(PasswordError::InvalidParams(_))));
    }

    #[test]
    fn test_needs_rehash() {
        let hasher = cheap_hasher();
        let hash = hasher.hash("andela1").unwrap();
        assert!(!hasher.needs_rehash(&hash));

        let stronger = PasswordHasher::with_params(16, 2, 1).unwrap();
        assert!(stronger.needs_rehash(&hash));

        assert!(hasher.needs_rehash("pbkdf2:sha256:50000$abc$def"));
    }
}
