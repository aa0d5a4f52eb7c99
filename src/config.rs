use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_body_size: usize,  // in bytes
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub users_file: String,
    pub tasks_file: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_secs: i64,
    pub bcrypt_cost: u32,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.max_body_size", 1024 * 1024)?
            .set_default("storage.users_file", "data/usuarios.json")?
            .set_default("storage.tasks_file", "data/tareas.json")?
            .set_default("auth.jwt_secret", "clave_secreta_tareas")?
            .set_default("auth.token_ttl_secs", 3600)?
            .set_default("auth.bcrypt_cost", 10)?
            .add_source(config::File::with_name("config/default").required(false))
            // e.g. APP_SERVER__PORT=8080
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.auth.jwt_secret.is_empty() {
            return Err(config::ConfigError::Message(
                "auth.jwt_secret must not be empty".into(),
            ));
        }
        if !(4..=31).contains(&self.auth.bcrypt_cost) {
            return Err(config::ConfigError::Message(format!(
                "auth.bcrypt_cost must be between 4 and 31, got {}",
                self.auth.bcrypt_cost
            )));
        }
        if self.auth.token_ttl_secs <= 0 {
            return Err(config::ConfigError::Message(
                "auth.token_ttl_secs must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_uses_defaults() {
        let config = Config::load().expect("config loads");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.auth.token_ttl_secs, 3600);
        assert_eq!(config.auth.bcrypt_cost, 10);
        assert!(!config.auth.jwt_secret.is_empty());
    }

    #[test]
    fn test_validate_rejects_empty_secret() {
        let mut config = Config::load().expect("config loads");
        config.auth.jwt_secret.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bcrypt_cost_out_of_range() {
        let mut config = Config::load().expect("config loads");
        for cost in [0, 3, 32] {
            config.auth.bcrypt_cost = cost;
            assert!(config.validate().is_err(), "cost {} accepted", cost);
        }
        for cost in [4, 31] {
            config.auth.bcrypt_cost = cost;
            assert!(config.validate().is_ok(), "cost {} rejected", cost);
        }
    }

    #[test]
    fn test_validate_rejects_non_positive_ttl() {
        let mut config = Config::load().expect("config loads");
        config.auth.token_ttl_secs = 0;
        assert!(config.validate().is_err());
    }
}
