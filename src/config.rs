use std::path::PathBuf;

const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
const MIN_SESSION_KEY_LEN: usize = 64;

/// Runtime settings, read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    /// Holds `storage.json`.
    pub data_dir: PathBuf,
    /// Front-end bundle and uploaded images (`<public_dir>/images`).
    pub public_dir: PathBuf,
    pub admin_password: String,
    /// Only set when long enough to be used as a cookie key.
    pub session_key: Option<String>,
    pub secure_cookies: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            bind_addr: "127.0.0.1:8080".to_string(),
            data_dir: PathBuf::from("data"),
            public_dir: PathBuf::from("public"),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            session_key: None,
            secure_cookies: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            log::debug!("No .env file loaded: {e}");
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; `lookup` returns `None` when unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = AppConfig::default();
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let admin_password = match non_empty("ADMIN_PASSWORD") {
            Some(password) => password,
            None => {
                log::warn!("No ADMIN_PASSWORD set, using the default password");
                defaults.admin_password
            }
        };

        let session_key = match lookup("SESSION_KEY") {
            Some(key) if key.len() >= MIN_SESSION_KEY_LEN => {
                log::info!("Using SESSION_KEY from environment");
                Some(key)
            }
            Some(key) => {
                log::warn!(
                    "SESSION_KEY too short ({} bytes, need {MIN_SESSION_KEY_LEN}+), generating random key",
                    key.len()
                );
                None
            }
            None => {
                log::warn!("No SESSION_KEY set, generating random key (sessions lost on restart)");
                None
            }
        };

        AppConfig {
            bind_addr: non_empty("BIND_ADDR").unwrap_or(defaults.bind_addr),
            data_dir: non_empty("DATA_DIR").map(PathBuf::from).unwrap_or(defaults.data_dir),
            public_dir: non_empty("PUBLIC_DIR").map(PathBuf::from).unwrap_or(defaults.public_dir),
            admin_password,
            session_key,
            secure_cookies: non_empty("SECURE_COOKIES")
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.secure_cookies),
        }
    }

    pub fn images_dir(&self) -> PathBuf {
        self.public_dir.join("images")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let cfg = AppConfig::from_lookup(lookup_from(&[]));
        assert_eq!(cfg.bind_addr, "127.0.0.1:8080");
        assert_eq!(cfg.data_dir, PathBuf::from("data"));
        assert_eq!(cfg.images_dir(), PathBuf::from("public").join("images"));
        assert_eq!(cfg.admin_password, DEFAULT_ADMIN_PASSWORD);
        assert!(cfg.session_key.is_none());
        assert!(!cfg.secure_cookies);
    }

    #[test]
    fn variables_override_defaults() {
        let key = "k".repeat(64);
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("BIND_ADDR", "0.0.0.0:3000"),
            ("DATA_DIR", "/var/lib/svadba"),
            ("ADMIN_PASSWORD", "fortuna"),
            ("SESSION_KEY", &key),
            ("SECURE_COOKIES", "TRUE"),
        ]));
        assert_eq!(cfg.bind_addr, "0.0.0.0:3000");
        assert_eq!(cfg.data_dir, PathBuf::from("/var/lib/svadba"));
        assert_eq!(cfg.admin_password, "fortuna");
        assert_eq!(cfg.session_key.as_deref(), Some(key.as_str()));
        assert!(cfg.secure_cookies);
    }

    #[test]
    fn short_session_key_is_ignored() {
        let cfg = AppConfig::from_lookup(lookup_from(&[("SESSION_KEY", "short")]));
        assert!(cfg.session_key.is_none());
    }
}
