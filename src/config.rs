use crate::name::Name;

/// Settings of a handoff agent, fixed before it starts.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "config",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct AgentConfig {
    /// The prefix this agent serves. Interests are expected as `<prefix>/<sequence number>`.
    pub prefix: Name,
    /// Where the producer can be found after the handoff. Empty means it has not moved.
    pub locator: Name,
    /// Time from start until the handoff completes.
    pub handoff_delay_ms: u64,
    /// Hold on to Interests that arrive before the handoff and replay them afterwards.
    pub open_cache: bool,
    /// Mark forwarded Interests as sent by an agent.
    pub relay: bool,
}

impl AgentConfig {
    pub fn new(prefix: Name) -> Self {
        Self {
            prefix,
            ..Self::default()
        }
    }

    pub fn with_locator(mut self, locator: Name) -> Self {
        self.locator = locator;
        self
    }

    pub fn with_handoff_delay_ms(mut self, handoff_delay_ms: u64) -> Self {
        self.handoff_delay_ms = handoff_delay_ms;
        self
    }

    pub fn with_open_cache(mut self, open_cache: bool) -> Self {
        self.open_cache = open_cache;
        self
    }

    pub fn with_relay(mut self, relay: bool) -> Self {
        self.relay = relay;
        self
    }

    pub fn has_locator(&self) -> bool {
        !self.locator.is_empty()
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            prefix: Name::new(),
            locator: Name::new(),
            handoff_delay_ms: 0,
            open_cache: false,
            relay: true,
        }
    }
}

#[cfg(feature = "config")]
mod load {
    use thiserror::Error;

    use super::AgentConfig;

    #[derive(Debug, Error)]
    pub enum ConfigError {
        #[error("failed to parse agent config: {0}")]
        TomlParse(#[from] toml::de::Error),
    }

    impl AgentConfig {
        /// Reads a config such as
        ///
        /// ```toml
        /// prefix = "/prefix"
        /// locator = "/ap2"
        /// handoff_delay_ms = 2000
        /// open_cache = true
        /// ```
        ///
        /// Missing keys keep their defaults.
        pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
            Ok(toml::from_str(text)?)
        }
    }
}

#[cfg(feature = "config")]
pub use load::ConfigError;
