//! Outbound notification transports
//!
//! The worker talks to the outside world through these traits; production
//! wiring posts JSON to the configured email/message gateway endpoints.

use async_trait::async_trait;
use serde_json::json;
use thiserror::Error;

use crate::core::config::NotifyConfig;
use crate::notifications::types::{EmailMessage, TextMessage};

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("gateway rejected message: status {0}")]
    Rejected(u16),
}

#[async_trait]
pub trait EmailTransport: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<(), TransportError>;
}

#[async_trait]
pub trait MessageTransport: Send + Sync {
    async fn send(&self, message: &TextMessage) -> Result<(), TransportError>;
}

/// Email gateway client (JSON POST, bearer-authenticated)
pub struct HttpEmailTransport {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    from: String,
}

impl HttpEmailTransport {
    /// Returns `None` when no email gateway is configured
    pub fn from_config(cfg: &NotifyConfig) -> Option<Self> {
        cfg.email_api_url.as_ref().map(|endpoint| Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.clone(),
            api_key: cfg.email_api_key.clone(),
            from: cfg.email_from.clone(),
        })
    }
}

#[async_trait]
impl EmailTransport for HttpEmailTransport {
    async fn send(&self, message: &EmailMessage) -> Result<(), TransportError> {
        let mut request = self.client.post(&self.endpoint).json(&json!({
            "from": self.from,
            "to": message.to,
            "subject": message.subject,
            "text": message.body,
        }));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(TransportError::Rejected(response.status().as_u16()));
        }
        Ok(())
    }
}

/// Message gateway client (Twilio-style phone-number-addressed texts)
pub struct HttpMessageTransport {
    client: reqwest::Client,
    endpoint: String,
    token: Option<String>,
    from: Option<String>,
}

impl HttpMessageTransport {
    /// Returns `None` when no message gateway is configured
    pub fn from_config(cfg: &NotifyConfig) -> Option<Self> {
        cfg.message_api_url.as_ref().map(|endpoint| Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.clone(),
            token: cfg.message_api_token.clone(),
            from: cfg.message_from.clone(),
        })
    }
}

#[async_trait]
impl MessageTransport for HttpMessageTransport {
    async fn send(&self, message: &TextMessage) -> Result<(), TransportError> {
        let mut request = self.client.post(&self.endpoint).json(&json!({
            "from": self.from,
            "to": message.to,
            "body": message.body,
        }));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(TransportError::Rejected(response.status().as_u16()));
        }
        Ok(())
    }
}
