use std::env;

use config::builder::ConfigBuilder;
use config::builder::DefaultState;
use config::Config;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;
use thiserror::Error;

/// Default and maximum access token lifetime, in seconds.
pub const DEFAULT_ACCESS_TOKEN_SECONDS: i64 = 3600;

/// Upper bound for any configured token lifetime (one year).
pub const MAX_CONFIGURABLE_EXPIRATION_SECONDS: i64 = 365 * 24 * 60 * 60;

/// Error for configuration loading and validation. Fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ConfigError),

    #[error("JWT signing secret is not configured")]
    MissingSecret,

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    #[serde(default)]
    pub secret: String,
    pub default_expiration_seconds: i64,
    pub max_expiration_seconds: i64,
}

// The secret never reaches logs through Debug.
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field(
                "default_expiration_seconds",
                &self.default_expiration_seconds,
            )
            .field("max_expiration_seconds", &self.max_expiration_seconds)
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_kib: argon2::Params::DEFAULT_M_COST,
            iterations: argon2::Params::DEFAULT_T_COST,
            parallelism: argon2::Params::DEFAULT_P_COST,
        }
    }
}

impl AuthConfig {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, JWT__MAX_EXPIRATION_SECONDS, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults (everything except the secret)
    pub fn load() -> Result<Self, ConfigurationError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let builder = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(
                Environment::default()
                    .separator("__")
                    .try_parsing(true),
            );

        Self::from_builder(builder)
    }

    /// Configuration with built-in defaults and the given signing secret.
    pub fn from_secret(secret: impl Into<String>) -> Self {
        Self {
            jwt: JwtConfig {
                secret: secret.into(),
                default_expiration_seconds: DEFAULT_ACCESS_TOKEN_SECONDS,
                max_expiration_seconds: DEFAULT_ACCESS_TOKEN_SECONDS,
            },
            password: PasswordConfig::default(),
        }
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let password = PasswordConfig::default();

        Config::builder()
            .set_default("jwt.default_expiration_seconds", DEFAULT_ACCESS_TOKEN_SECONDS)?
            .set_default("jwt.max_expiration_seconds", DEFAULT_ACCESS_TOKEN_SECONDS)?
            .set_default("password.memory_kib", i64::from(password.memory_kib))?
            .set_default("password.iterations", i64::from(password.iterations))?
            .set_default("password.parallelism", i64::from(password.parallelism))
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigurationError> {
        let config: AuthConfig = builder.build()?.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Check invariants that deserialization cannot express.
    ///
    /// # Errors
    /// * `MissingSecret` - Secret is empty or whitespace
    /// * `Invalid` - Token lifetimes are non-positive, above one year, or
    ///   inconsistent
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(ConfigurationError::MissingSecret);
        }

        if self.jwt.max_expiration_seconds <= 0 {
            return Err(ConfigurationError::Invalid(
                "jwt.max_expiration_seconds must be positive".to_string(),
            ));
        }

        if self.jwt.max_expiration_seconds > MAX_CONFIGURABLE_EXPIRATION_SECONDS {
            return Err(ConfigurationError::Invalid(format!(
                "jwt.max_expiration_seconds must not exceed {}",
                MAX_CONFIGURABLE_EXPIRATION_SECONDS
            )));
        }

        if self.jwt.default_expiration_seconds <= 0 {
            return Err(ConfigurationError::Invalid(
                "jwt.default_expiration_seconds must be positive".to_string(),
            ));
        }

        if self.jwt.default_expiration_seconds > self.jwt.max_expiration_seconds {
            return Err(ConfigurationError::Invalid(format!(
                "jwt.default_expiration_seconds ({}) exceeds jwt.max_expiration_seconds ({})",
                self.jwt.default_expiration_seconds, self.jwt.max_expiration_seconds
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn from_toml(toml: &str) -> Result<AuthConfig, ConfigurationError> {
        let builder = AuthConfig::defaults()
            .expect("Failed to set defaults")
            .add_source(File::from_str(toml, FileFormat::Toml));

        AuthConfig::from_builder(builder)
    }

    #[test]
    fn test_defaults_applied() {
        let config = from_toml(
            r#"
            [jwt]
            secret = "top-secret"
            "#,
        )
        .expect("Failed to load config");

        assert_eq!(config.jwt.secret, "top-secret");
        assert_eq!(config.jwt.default_expiration_seconds, 3600);
        assert_eq!(config.jwt.max_expiration_seconds, 3600);
        assert_eq!(config.password, PasswordConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = from_toml(
            r#"
            [jwt]
            secret = "top-secret"
            default_expiration_seconds = 600
            max_expiration_seconds = 1800

            [password]
            memory_kib = 8192
            iterations = 1
            parallelism = 1
            "#,
        )
        .expect("Failed to load config");

        assert_eq!(config.jwt.default_expiration_seconds, 600);
        assert_eq!(config.jwt.max_expiration_seconds, 1800);
        assert_eq!(config.password.memory_kib, 8192);
    }

    #[test]
    fn test_missing_secret() {
        let result = from_toml("");
        assert!(matches!(result, Err(ConfigurationError::MissingSecret)));

        let result = from_toml(
            r#"
            [jwt]
            secret = "   "
            "#,
        );
        assert!(matches!(result, Err(ConfigurationError::MissingSecret)));
    }

    #[test]
    fn test_default_above_ceiling() {
        let result = from_toml(
            r#"
            [jwt]
            secret = "top-secret"
            default_expiration_seconds = 7200
            "#,
        );
        assert!(matches!(result, Err(ConfigurationError::Invalid(_))));
    }

    #[test]
    fn test_non_positive_ceiling() {
        let mut config = AuthConfig::from_secret("top-secret");
        config.jwt.max_expiration_seconds = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::Invalid(_))
        ));
    }

    #[test]
    fn test_ceiling_above_one_year() {
        let result = from_toml(
            r#"
            [jwt]
            secret = "top-secret"
            max_expiration_seconds = 9223372036854775807
            "#,
        );
        assert!(matches!(result, Err(ConfigurationError::Invalid(_))));

        let mut config = AuthConfig::from_secret("top-secret");
        config.jwt.max_expiration_seconds = MAX_CONFIGURABLE_EXPIRATION_SECONDS;
        config.jwt.default_expiration_seconds = MAX_CONFIGURABLE_EXPIRATION_SECONDS;
        assert!(config.validate().is_ok());

        config.jwt.max_expiration_seconds = MAX_CONFIGURABLE_EXPIRATION_SECONDS + 1;
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::Invalid(_))
        ));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = AuthConfig::from_secret("top-secret");
        let rendered = format!("{:?}", config);

        assert!(!rendered.contains("top-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
