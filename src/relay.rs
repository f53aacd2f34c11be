use crate::contact::{ContactError, EmailRelay, RelayRequest};

/// Sends relay requests over HTTPS as JSON.
#[derive(Debug, Clone, Default)]
pub struct HttpRelay {
    client: reqwest::Client,
}

impl HttpRelay {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl EmailRelay for HttpRelay {
    async fn send(&self, endpoint: &str, request: &RelayRequest) -> Result<(), ContactError> {
        let response = self
            .client
            .post(endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| ContactError::Transport(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            tracing::info!(template = %request.template_id, "contact message relayed");
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(%status, %body, "email relay rejected contact message");
        Err(ContactError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}
