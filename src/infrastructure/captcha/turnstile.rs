//! Cloudflare Turnstile verification client.

use super::service::{CaptchaError, CaptchaVerifier};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Public Turnstile `siteverify` endpoint.
pub const TURNSTILE_VERIFY_URL: &str = "https://challenges.cloudflare.com/turnstile/v0/siteverify";

/// Form body of a `siteverify` call.
#[derive(Serialize)]
struct SiteverifyRequest<'a> {
    secret: &'a str,
    response: &'a str,
    remoteip: String,
}

/// The only field of the answer that matters; everything else is ignored.
#[derive(Deserialize)]
struct SiteverifyResponse {
    success: bool,
}

/// Verifies captcha tokens against a `siteverify`-compatible endpoint.
///
/// Every request is bounded by the timeout given at construction, so an
/// unresponsive upstream cannot pin request handlers indefinitely.
pub struct TurnstileVerifier {
    client: reqwest::Client,
    endpoint: Url,
    secret: String,
}

impl TurnstileVerifier {
    /// Builds a verifier with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`CaptchaError::Transport`] if the TLS backend cannot be initialized.
    pub fn new(
        endpoint: Url,
        secret: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, CaptchaError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(CaptchaError::Transport)?;

        Ok(Self {
            client,
            endpoint,
            secret: secret.into(),
        })
    }
}

#[async_trait]
impl CaptchaVerifier for TurnstileVerifier {
    async fn verify(&self, response_token: &str, remote_ip: IpAddr) -> Result<bool, CaptchaError> {
        let form = SiteverifyRequest {
            secret: &self.secret,
            response: response_token,
            remoteip: remote_ip.to_string(),
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(CaptchaError::Status(status.as_u16()));
        }

        let body: SiteverifyResponse = response.json().await?;
        debug!(success = body.success, "Captcha verification answered");

        Ok(body.success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SECRET: &str = "test-secret";

    fn verifier_for(server: &MockServer, timeout: Duration) -> TurnstileVerifier {
        let endpoint = Url::parse(&format!("{}/siteverify", server.uri())).unwrap();
        TurnstileVerifier::new(endpoint, SECRET, timeout).unwrap()
    }

    fn ip() -> IpAddr {
        "1.2.3.4".parse().unwrap()
    }

    #[tokio::test]
    async fn test_verify_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/siteverify"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("secret=test-secret"))
            .and(body_string_contains("response=tok"))
            .and(body_string_contains("remoteip=1.2.3.4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "hostname": "example.com",
                "error-codes": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let verifier = verifier_for(&server, Duration::from_secs(5));

        assert!(verifier.verify("tok", ip()).await.unwrap());
    }

    #[tokio::test]
    async fn test_verify_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "error-codes": ["invalid-input-response"]
            })))
            .mount(&server)
            .await;

        let verifier = verifier_for(&server, Duration::from_secs(5));

        assert!(!verifier.verify("bad", ip()).await.unwrap());
    }

    #[tokio::test]
    async fn test_verify_non_200_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "success": true })))
            .mount(&server)
            .await;

        let verifier = verifier_for(&server, Duration::from_secs(5));

        let err = verifier.verify("tok", ip()).await.unwrap_err();
        assert!(matches!(err, CaptchaError::Status(500)));
    }

    #[tokio::test]
    async fn test_verify_malformed_body_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let verifier = verifier_for(&server, Duration::from_secs(5));

        let err = verifier.verify("tok", ip()).await.unwrap_err();
        assert!(matches!(err, CaptchaError::Decode(_)));
    }

    #[tokio::test]
    async fn test_verify_missing_success_field_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "hostname": "x" })))
            .mount(&server)
            .await;

        let verifier = verifier_for(&server, Duration::from_secs(5));

        assert!(verifier.verify("tok", ip()).await.is_err());
    }

    #[tokio::test]
    async fn test_verify_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "success": true }))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let verifier = verifier_for(&server, Duration::from_millis(100));

        let err = verifier.verify("tok", ip()).await.unwrap_err();
        assert!(matches!(err, CaptchaError::Timeout));
    }

    #[tokio::test]
    async fn test_verify_unreachable_endpoint() {
        let endpoint = Url::parse("http://127.0.0.1:1/siteverify").unwrap();
        let verifier = TurnstileVerifier::new(endpoint, SECRET, Duration::from_secs(2)).unwrap();

        assert!(verifier.verify("tok", ip()).await.is_err());
    }

    #[tokio::test]
    async fn test_ipv6_remote_ip_is_form_encoded() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("remoteip=2001%3Adb8%3A%3A1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
            .expect(1)
            .mount(&server)
            .await;

        let verifier = verifier_for(&server, Duration::from_secs(5));

        assert!(
            verifier
                .verify("tok", "2001:db8::1".parse().unwrap())
                .await
                .unwrap()
        );
    }
}
