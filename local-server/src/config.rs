use std::env;

pub const DEFAULT_PORT: u16 = 8947;
pub const PORT_ENV_VAR: &str = "PORT";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid {PORT_ENV_VAR} value '{0}': {1}")]
    InvalidPort(String, std::num::ParseIntError),
}

/// Listener configuration, resolved once at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusConfig {
    pub port: u16,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

impl StatusConfig {
    pub fn new(port: u16) -> Self {
        Self { port }
    }

    /// Resolve the port from the `PORT` environment variable, falling back
    /// to the default. A present but unparsable value is an error rather
    /// than something the listener trips over later.
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var(PORT_ENV_VAR) {
            Ok(value) => Self::parse_port(&value),
            Err(_) => Ok(Self::default()),
        }
    }

    fn parse_port(value: &str) -> Result<Self, ConfigError> {
        value
            .parse::<u16>()
            .map(Self::new)
            .map_err(|e| ConfigError::InvalidPort(value.to_string(), e))
    }

    /// The local URL advertised in the status body. Kept as a plain string
    /// on purpose: clients expect it without a trailing slash.
    pub fn endpoint(&self) -> String {
        format!("http://localhost:{}", self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_port_is_8947() {
        assert_eq!(StatusConfig::default().port, DEFAULT_PORT);
        assert_eq!(DEFAULT_PORT, 8947);
    }

    #[test]
    fn endpoint_embeds_the_configured_port() {
        assert_eq!(StatusConfig::new(9001).endpoint(), "http://localhost:9001");
        assert_eq!(
            StatusConfig::default().endpoint(),
            "http://localhost:8947"
        );
    }

    #[test]
    fn parse_port_accepts_valid_values() {
        assert_eq!(StatusConfig::parse_port("9001").unwrap().port, 9001);
    }

    #[test]
    fn parse_port_rejects_garbage() {
        assert!(StatusConfig::parse_port("not-a-port").is_err());
        assert!(StatusConfig::parse_port("70000").is_err());
        assert!(StatusConfig::parse_port("").is_err());
    }

    // Single test for the environment lookup so parallel tests never race
    // on the process environment.
    #[test]
    fn from_env_honors_override_and_default() {
        env::remove_var(PORT_ENV_VAR);
        assert_eq!(StatusConfig::from_env().unwrap().port, DEFAULT_PORT);

        env::set_var(PORT_ENV_VAR, "9001");
        assert_eq!(StatusConfig::from_env().unwrap().port, 9001);

        env::set_var(PORT_ENV_VAR, "nine-thousand");
        assert!(StatusConfig::from_env().is_err());

        env::remove_var(PORT_ENV_VAR);
    }
}
