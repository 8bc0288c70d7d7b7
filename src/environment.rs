//! Deployment environment classification
//!
//! The facade does not detect its environment; callers hand it an
//! [`Environment`] and the setup table picks a configuration from it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Process environment variable that forces debug-level structured logging
/// when set to `"true"`, whatever the environment
pub const DEBUG_LOG_ENV: &str = "FIELDLOG_DEBUG_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Environment {
    #[default]
    Production,
    Sandbox,
    Development,
    Local,
    UnitTest,
    IntegrationTest,
}

impl Environment {
    pub const ALL: [Environment; 6] = [
        Environment::Production,
        Environment::Sandbox,
        Environment::Development,
        Environment::Local,
        Environment::UnitTest,
        Environment::IntegrationTest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Production => "production",
            Environment::Sandbox => "sandbox",
            Environment::Development => "development",
            Environment::Local => "local",
            Environment::UnitTest => "unit-test",
            Environment::IntegrationTest => "integration-test",
        }
    }

    pub fn is_integration_test(&self) -> bool {
        matches!(self, Environment::IntegrationTest)
    }

    pub fn is_unit_test(&self) -> bool {
        matches!(self, Environment::UnitTest)
    }

    /// Anything that is not a deployed production-like environment
    pub fn is_dev_or_test(&self) -> bool {
        matches!(
            self,
            Environment::Development
                | Environment::Local
                | Environment::UnitTest
                | Environment::IntegrationTest
        )
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "production" | "prod" => Ok(Environment::Production),
            "sandbox" => Ok(Environment::Sandbox),
            "development" | "dev" => Ok(Environment::Development),
            "local" => Ok(Environment::Local),
            "unit-test" | "unittest" => Ok(Environment::UnitTest),
            "integration-test" | "integrationtest" => Ok(Environment::IntegrationTest),
            _ => Err(format!("Invalid environment: '{}'", s)),
        }
    }
}

/// Value of the process environment variable `name`, or `default` when unset
/// or not valid unicode
pub fn var_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Whether [`DEBUG_LOG_ENV`] is set to `"true"`
pub fn debug_logging_forced() -> bool {
    var_or(DEBUG_LOG_ENV, "false") == "true"
}
