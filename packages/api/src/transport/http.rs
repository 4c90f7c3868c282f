use crate::error::TransportError;
use crate::transport::{Request, Response, Transport};

/// `reqwest` transport. One request per call: no retry, no timeout.
#[derive(Clone, Debug, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        let mut builder = self.client.request(request.method.clone(), &request.url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!("{} {} failed: {}", request.method, request.url, e);
            TransportError::from(e)
        })?;

        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        let body = if bytes.is_empty() {
            None
        } else {
            serde_json::from_slice(&bytes).ok()
        };

        tracing::debug!("{} {} -> {}", request.method, request.url, status);
        Ok(Response { status, body })
    }
}
