use std::env;
use std::fmt;

use crate::SecretsConfig;

/// Secrets read from the environment. An unset or blank variable is `None`.
#[derive(Clone, Default)]
pub struct Secrets {
    pub api_key: Option<String>,
    pub private_key: Option<String>,
}

fn read_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Secrets {
    pub fn from_env(config: &SecretsConfig) -> Self {
        Self { api_key: read_var(&config.api_key_env), private_key: read_var(&config.private_key_env) }
    }
}

impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secrets")
            .field("api_key", &self.api_key.as_ref().map(|_| "<set>"))
            .field("private_key", &self.private_key.as_ref().map(|_| "<set>"))
            .finish()
    }
}
