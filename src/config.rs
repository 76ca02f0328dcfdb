//! Configuration for the persona engine and its hosts
//!
//! Layering: built-in defaults → TOML file → `PERSONA_*` environment
//! variables (`__` separates nested keys, e.g. `PERSONA_SERVER__ADDR`).

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::types::TraitProfile;
use crate::{DIRECTIVE_HEADER, HISTORY_CAPACITY, SNIPPET_CHARS};

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "persona.toml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "PERSONA_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonaConfig {
    /// Line placed above every directive
    pub directive_header: String,
    /// Accepted responses kept in history
    pub history_capacity: usize,
    /// Characters kept per accepted response
    pub snippet_chars: usize,
    /// Profile for conversations that start without a state
    pub default_traits: TraitProfile,
    pub server: ServerConfig,
    /// `tracing` filter used when RUST_LOG is unset
    pub log_filter: String,
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            directive_header: DIRECTIVE_HEADER.to_string(),
            history_capacity: HISTORY_CAPACITY,
            snippet_chars: SNIPPET_CHARS,
            default_traits: TraitProfile::default(),
            server: ServerConfig::default(),
            log_filter: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:3000".to_string(),
        }
    }
}

impl PersonaConfig {
    /// Layered figment for a given config file (missing file is skipped)
    pub fn figment(path: impl AsRef<Path>) -> Figment {
        Figment::from(Serialized::defaults(PersonaConfig::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load from `path`, or `persona.toml` when None
    pub fn load(path: Option<&Path>) -> crate::Result<Self> {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        let config = Self::figment(path).extract()?;
        Ok(config)
    }

    /// Parse a TOML string over the defaults (no env layer)
    pub fn from_toml_str(toml: &str) -> crate::Result<Self> {
        let config = Figment::from(Serialized::defaults(PersonaConfig::default()))
            .merge(Toml::string(toml))
            .extract()?;
        Ok(config)
    }
}
