//! Environment-driven application configuration.
//!
//! The deployment environment is read from `APP_ENV` and selects the matching
//! Rocket profile, so `Rocket.toml` and `ROCKET_*` variables supply the
//! per-environment database URL, upload limits and port.

use rocket::figment::Figment;
use std::env;
use std::fmt;
use std::str::FromStr;

const ROCKET_QUIET_FILTER: &str = "rocket::server=warn,rocket::request=warn";

fn env_string(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Deployment environment the service runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Production,
    Staging,
    Testing,
    #[default]
    Development,
}

impl Environment {
    /// Rocket profile selected for this environment.
    pub fn profile(self) -> &'static str {
        match self {
            Environment::Production => "production",
            Environment::Staging => "staging",
            Environment::Testing => "testing",
            Environment::Development => "development",
        }
    }

    fn default_log_filter(self) -> &'static str {
        match self {
            Environment::Production | Environment::Staging => "info",
            Environment::Testing => "warn",
            Environment::Development => "debug",
        }
    }

    /// Parse an environment name, falling back to development for anything unknown.
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            log::warn!("unknown environment '{name}', using development");
            Environment::Development
        })
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Environment::Production),
            "staging" => Ok(Environment::Staging),
            "testing" | "test" => Ok(Environment::Testing),
            "development" | "dev" => Ok(Environment::Development),
            other => Err(format!("unknown environment '{other}'")),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.profile())
    }
}

/// Runtime configuration resolved at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub log_filter: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = env_string("APP_ENV")
            .map(|name| Environment::from_name(&name))
            .unwrap_or_default();
        Self::for_environment(environment, env_string("APP_LOG_FILTER"))
    }

    pub fn for_environment(environment: Environment, log_filter: Option<String>) -> Self {
        let log_filter = log_filter.unwrap_or_else(|| {
            format!(
                "{},{}",
                environment.default_log_filter(),
                ROCKET_QUIET_FILTER
            )
        });

        Self {
            environment,
            log_filter,
        }
    }

    /// Rocket figment with the environment's profile selected.
    pub fn figment(&self) -> Figment {
        rocket::Config::figment().select(self.environment.profile())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_environments_map_to_profiles() {
        let cases = [
            ("production", "production"),
            ("staging", "staging"),
            ("testing", "testing"),
            ("development", "development"),
            ("PRODUCTION", "production"),
        ];

        for (name, profile) in cases {
            assert_eq!(Environment::from_name(name).profile(), profile);
        }
    }

    #[test]
    fn unknown_environment_falls_back_to_development() {
        assert_eq!(Environment::from_name("unknown"), Environment::Development);
        assert_eq!(Environment::from_name(""), Environment::Development);
    }

    #[test]
    fn default_log_filter_follows_environment() {
        let config = AppConfig::for_environment(Environment::Production, None);
        assert!(config.log_filter.starts_with("info,"));
        assert!(config.log_filter.contains("rocket::server=warn"));

        let config = AppConfig::for_environment(Environment::Testing, Some("trace".into()));
        assert_eq!(config.log_filter, "trace");
    }

    #[test]
    fn figment_selects_environment_profile() {
        let config = AppConfig::for_environment(Environment::Staging, None);
        let figment = config.figment();
        assert_eq!(figment.profile().to_string(), "staging");
    }
}
