use std::path::PathBuf;

use salon_core::environment::AppEnvironment;
use salon_core::upload::DEFAULT_MAX_IMAGE_KB;

use crate::auth::jwt::JwtConfig;

/// Google reCAPTCHA verification endpoint.
pub const DEFAULT_RECAPTCHA_VERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Deployment environment (default: `local`).
    pub environment: AppEnvironment,
    /// Public base URL used to build links to stored files.
    pub app_url: String,
    /// Public file storage settings.
    pub storage: StorageConfig,
    /// CAPTCHA verification settings.
    pub recaptcha: RecaptchaConfig,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

/// Where uploaded files live and how large they may be.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Root directory of the public disk (default: `storage/app/public`).
    pub public_path: PathBuf,
    /// Maximum portfolio image size in kilobytes (default: `2048`).
    pub max_image_kb: u64,
}

#[derive(Debug, Clone)]
pub struct RecaptchaConfig {
    /// Server-side secret. Required in production.
    pub secret_key: Option<String>,
    pub verify_url: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `8000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `APP_ENV`              | `local`                    |
    /// | `APP_URL`              | `http://localhost:8000`    |
    /// | `STORAGE_PUBLIC_PATH`  | `storage/app/public`       |
    /// | `MAX_IMAGE_UPLOAD_KB`  | `2048`                     |
    /// | `RECAPTCHA_SECRET_KEY` | -- (required in production)|
    /// | `RECAPTCHA_VERIFY_URL` | Google siteverify          |
    ///
    /// # Panics
    ///
    /// Panics on unparsable values, and when `APP_ENV=production` but no
    /// `RECAPTCHA_SECRET_KEY` is set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key: &str| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// [`ServerConfig::from_env`] passes the process environment; tests pass
    /// a map.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = var("HOST", "0.0.0.0");

        let port: u16 = var("PORT", "8000")
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = var("CORS_ORIGINS", "http://localhost:3000")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = var("REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let environment: AppEnvironment = var("APP_ENV", "local")
            .parse()
            .expect("APP_ENV must be local, testing or production");

        let app_url = var("APP_URL", "http://localhost:8000")
            .trim_end_matches('/')
            .to_string();

        let storage = StorageConfig {
            public_path: PathBuf::from(var("STORAGE_PUBLIC_PATH", "storage/app/public")),
            max_image_kb: var("MAX_IMAGE_UPLOAD_KB", &DEFAULT_MAX_IMAGE_KB.to_string())
                .parse()
                .expect("MAX_IMAGE_UPLOAD_KB must be a valid u64"),
        };

        let recaptcha = RecaptchaConfig {
            secret_key: lookup("RECAPTCHA_SECRET_KEY").filter(|s| !s.is_empty()),
            verify_url: var("RECAPTCHA_VERIFY_URL", DEFAULT_RECAPTCHA_VERIFY_URL),
        };

        assert!(
            !environment.is_production() || recaptcha.secret_key.is_some(),
            "RECAPTCHA_SECRET_KEY must be set when APP_ENV=production"
        );

        let jwt = JwtConfig::from_lookup(&lookup);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            environment,
            app_url,
            storage,
            recaptcha,
            jwt,
        }
    }
}
