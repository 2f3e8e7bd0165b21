use crate::di::Injectable;
use dashmap::DashMap;
use std::env;
use std::str::FromStr;
use std::sync::Arc;

/// String key/value configuration, seeded from the process environment.
///
/// Resolvable as a singleton once marked injectable, so every consumer sees
/// the same values.
#[derive(Clone, Default)]
pub struct ConfigService {
    config: Arc<DashMap<String, String>>,
}

impl ConfigService {
    /// An empty store that ignores the environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ConfigService seeded from the process environment
    pub fn from_env() -> Self {
        Self::from_pairs(env::vars())
    }

    /// Create a ConfigService from explicit key/value pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let service = Self::new();
        for (key, value) in pairs {
            service.config.insert(key.into(), value.into());
        }
        service
    }

    /// Get a config value
    pub fn get(&self, key: &str) -> Option<String> {
        self.config.get(key).map(|v| v.clone())
    }

    /// Get a config value or a default
    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// Parse `key`; absent and unparsable values both read as `None`.
    pub fn get_parsed<T: FromStr>(&self, key: &str) -> Option<T> {
        let raw = self.get(key)?;
        match raw.trim().parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring unparsable config value {}={:?}", key, raw);
                None
            }
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) {
        self.config.insert(key.to_string(), value.to_string());
    }

    pub fn len(&self) -> usize {
        self.config.len()
    }

    pub fn is_empty(&self) -> bool {
        self.config.is_empty()
    }
}

impl Injectable for ConfigService {
    fn create() -> Self {
        Self::from_env()
    }
}
