//! CAPTCHA verification for the public feedback form.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::RecaptchaConfig;

/// Verifies a CAPTCHA response token with a third-party service.
#[async_trait]
pub trait CaptchaVerifier: Send + Sync {
    /// Returns `Ok(true)` when the token is accepted.
    async fn verify(&self, token: &str, remote_ip: Option<&str>) -> anyhow::Result<bool>;
}

/// Google reCAPTCHA `siteverify` client.
pub struct RecaptchaVerifier {
    client: reqwest::Client,
    secret_key: Option<String>,
    verify_url: String,
}

#[derive(Debug, Deserialize)]
struct SiteVerifyResponse {
    success: bool,
    #[serde(default, rename = "error-codes")]
    error_codes: Vec<String>,
}

impl RecaptchaVerifier {
    pub fn new(config: &RecaptchaConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            secret_key: config.secret_key.clone(),
            verify_url: config.verify_url.clone(),
        }
    }
}

#[async_trait]
impl CaptchaVerifier for RecaptchaVerifier {
    async fn verify(&self, token: &str, remote_ip: Option<&str>) -> anyhow::Result<bool> {
        let Some(secret) = self.secret_key.as_deref() else {
            tracing::warn!("reCAPTCHA secret key is not configured");
            return Ok(false);
        };

        let mut form = vec![("secret", secret), ("response", token)];
        if let Some(ip) = remote_ip {
            form.push(("remoteip", ip));
        }

        let response: SiteVerifyResponse = self
            .client
            .post(&self.verify_url)
            .form(&form)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if !response.success {
            tracing::info!(error_codes = ?response.error_codes, "reCAPTCHA rejected token");
        }
        Ok(response.success)
    }
}
