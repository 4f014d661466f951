use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

pub fn hash_password(password: &str) -> Result<String, String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| e.to_string())?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, String> {
    let parsed_hash = PasswordHash::new(hash).map_err(|e| e.to_string())?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// The single admin account. Only the argon2 hash is kept in memory.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    hash: String,
}

impl AdminCredentials {
    pub fn from_password(password: &str) -> Result<Self, String> {
        Ok(AdminCredentials {
            hash: hash_password(password)?,
        })
    }

    /// False for a wrong password and for an unusable stored hash.
    pub fn verify(&self, candidate: &str) -> bool {
        match verify_password(candidate, &self.hash) {
            Ok(ok) => ok,
            Err(e) => {
                log::error!("Admin password hash unusable: {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_credentials_accept_only_the_configured_password() {
        let creds = AdminCredentials::from_password("fortuna").expect("hash");
        assert!(creds.verify("fortuna"));
        assert!(!creds.verify("Fortuna"));
        assert!(!creds.verify(""));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("fortuna").expect("hash a");
        let b = hash_password("fortuna").expect("hash b");
        assert_ne!(a, b);
        assert!(verify_password("fortuna", &a).expect("verify"));
    }
}
