use std::net::{IpAddr, SocketAddr};

/// Runtime configuration, assembled from the environment (with `.env`
/// support) and overridable per-field from the CLI.
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub metadata: ConfigMetadata,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
}

/// Where the configuration came from; logged at startup.
#[derive(Debug, Clone, Default)]
pub struct ConfigMetadata {
    pub env_file_loaded: bool,
}

/// A loaded configuration plus non-fatal findings for the operator log.
#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: Vec<String>,
}

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

impl Config {
    pub fn load() -> ConfigLoad {
        let mut warnings = Vec::new();
        let env_file_loaded = dotenvy::dotenv().is_ok();

        let host = std::env::var("HAVEN_HOST")
            .unwrap_or_else(|_| DEFAULT_HOST.to_string());

        let port = match std::env::var("HAVEN_PORT") {
            Ok(raw) => match raw.parse::<u16>() {
                Ok(port) => port,
                Err(_) => {
                    warnings.push(format!(
                        "HAVEN_PORT value {:?} is not a valid port, using {}",
                        raw, DEFAULT_PORT
                    ));
                    DEFAULT_PORT
                }
            },
            Err(_) => DEFAULT_PORT,
        };

        let url = std::env::var("DATABASE_URL").ok();

        ConfigLoad {
            config: Config {
                server: ServerConfig { host, port },
                database: DatabaseConfig { url },
                metadata: ConfigMetadata { env_file_loaded },
            },
            warnings,
        }
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        let ip: IpAddr = self.server.host.parse()?;
        Ok(SocketAddr::new(ip, self.server.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_combines_host_and_port() {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 9090,
            },
            database: DatabaseConfig { url: None },
            metadata: ConfigMetadata::default(),
        };

        let addr = config.bind_addr().unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:9090");
    }

    #[test]
    fn hostname_that_is_not_an_ip_is_rejected() {
        let config = Config {
            server: ServerConfig {
                host: "not-an-ip".to_string(),
                port: 8080,
            },
            database: DatabaseConfig { url: None },
            metadata: ConfigMetadata::default(),
        };

        assert!(config.bind_addr().is_err());
    }
}
