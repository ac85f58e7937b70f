use std::env;
use std::net::{IpAddr, SocketAddr};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid HOST value {0:?}")]
    InvalidHost(String),
    #[error("Invalid PORT value {0:?}")]
    InvalidPort(String),
}

/// Listen address, read from `HOST` and `PORT`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
        Self::parse(&host, &port)
    }

    pub fn parse(host: &str, port: &str) -> Result<Self, ConfigError> {
        let host = host
            .parse::<IpAddr>()
            .map_err(|_| ConfigError::InvalidHost(host.to_string()))?;
        let port = port
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort(port.to_string()))?;
        Ok(Self { host, port })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from((self.host, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_host_and_port() {
        let config = ServerConfig::parse("0.0.0.0", "3000").unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn rejects_bad_port() {
        assert!(matches!(
            ServerConfig::parse("127.0.0.1", "http"),
            Err(ConfigError::InvalidPort(_))
        ));
    }
}
