//! Deployment environment (`APP_ENV`).

use std::str::FromStr;

use crate::error::CoreError;

/// The environment the server runs in.
///
/// Third-party checks that need real credentials (CAPTCHA) are only
/// enforced in [`AppEnvironment::Production`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Local,
    Testing,
    Production,
}

impl AppEnvironment {
    pub fn is_production(self) -> bool {
        self == AppEnvironment::Production
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AppEnvironment::Local => "local",
            AppEnvironment::Testing => "testing",
            AppEnvironment::Production => "production",
        }
    }
}

impl FromStr for AppEnvironment {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" | "dev" | "development" => Ok(AppEnvironment::Local),
            "testing" | "test" => Ok(AppEnvironment::Testing),
            "production" | "prod" => Ok(AppEnvironment::Production),
            other => Err(CoreError::Validation(format!(
                "Unknown APP_ENV '{other}'. Expected local, testing or production"
            ))),
        }
    }
}
