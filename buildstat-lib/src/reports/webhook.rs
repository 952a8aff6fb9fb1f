use crate::Result;
use core::time::Duration;
use ohno::{IntoAppError, bail};
use serde_json::Value;

const LOG_TARGET: &str = "   webhook";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Delivers a rendered message to a chat service.
pub trait Notifier {
    /// Send `payload` to `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the message could not be delivered.
    fn post(&self, url: &str, payload: &Value) -> Result<()>;
}

/// Posts JSON messages to an incoming webhook.
///
/// A single attempt is made; there is no retry.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    timeout: Duration,
}

impl WebhookNotifier {
    #[must_use]
    pub const fn new() -> Self {
        Self { timeout: DEFAULT_TIMEOUT }
    }

    #[must_use]
    pub const fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for WebhookNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for WebhookNotifier {
    fn post(&self, url: &str, payload: &Value) -> Result<()> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("buildstat")
            .timeout(self.timeout)
            .build()
            .into_app_err("unable to create HTTP client")?;

        log::debug!(target: LOG_TARGET, "Posting notification to '{url}'");

        let response = client
            .post(url)
            .json(payload)
            .send()
            .into_app_err_with(|| format!("unable to reach webhook '{url}'"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            bail!("webhook '{url}' rejected the notification: HTTP {status}: {}", body.trim());
        }

        log::info!(target: LOG_TARGET, "Notification sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    // The blocking client must not run on the async runtime's worker threads.
    async fn post_blocking(url: String, payload: Value) -> Result<()> {
        tokio::task::spawn_blocking(move || WebhookNotifier::new().post(&url, &payload))
            .await
            .unwrap()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_post_sends_json() {
        let server = MockServer::start().await;
        let payload = json!({"text": "hello"});

        Mock::given(method("POST"))
            .and(path("/hook"))
            .and(header("content-type", "application/json"))
            .and(body_json(&payload))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        post_blocking(format!("{}/hook", server.uri()), payload).await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_post_error_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no_service"))
            .mount(&server)
            .await;

        let err = post_blocking(format!("{}/hook", server.uri()), json!({})).await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("404"), "unexpected message: {msg}");
        assert!(msg.contains("no_service"), "unexpected message: {msg}");
    }

    #[test]
    fn test_post_unreachable() {
        let notifier = WebhookNotifier::with_timeout(Duration::from_secs(2));
        let err = notifier.post("http://127.0.0.1:1/hook", &json!({})).unwrap_err();
        assert!(err.to_string().contains("unable to reach webhook"));
    }
}
