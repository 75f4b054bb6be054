use async_trait::async_trait;
use serde::Serialize;

use crate::{error::PresenterError, game::Prompt, render::Reply};

/// Delivers replies to end users. The engine never knows the channel.
#[async_trait]
pub trait Presenter: Send + Sync {
    async fn deliver(&self, recipient: &str, reply: &Reply) -> Result<(), PresenterError>;
}

/// Writes deliveries to the log; used when no webhook is configured
pub struct LogPresenter;

#[async_trait]
impl Presenter for LogPresenter {
    async fn deliver(&self, recipient: &str, reply: &Reply) -> Result<(), PresenterError> {
        let title = reply.view.as_ref().map(|v| v.title.as_str());
        tracing::info!(
            "Delivery to {}: {}",
            recipient,
            title.or(reply.text.as_deref()).unwrap_or_default()
        );
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct Delivery<'a> {
    recipient: &'a str,
    reply: &'a Reply,
}

/// POSTs every delivery as JSON to the chat-integration layer
pub struct WebhookPresenter {
    url: String,
    http_client: reqwest::Client,
}

impl WebhookPresenter {
    pub fn new(url: String, http_client: reqwest::Client) -> Self {
        Self { url, http_client }
    }
}

#[async_trait]
impl Presenter for WebhookPresenter {
    async fn deliver(&self, recipient: &str, reply: &Reply) -> Result<(), PresenterError> {
        self.http_client
            .post(&self.url)
            .json(&Delivery { recipient, reply })
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

/// Hand each prompt to the presenter. Failures are logged; the game state they
/// describe is already persisted.
pub async fn deliver_prompts(presenter: &dyn Presenter, prompts: &[Prompt]) {
    for prompt in prompts {
        let reply = Reply::public(prompt.view.clone());
        if let Err(e) = presenter.deliver(&prompt.recipient, &reply).await {
            tracing::error!("Failed to deliver prompt to {}: {}", prompt.recipient, e);
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Keeps every delivery for assertions
    #[derive(Default)]
    pub struct RecordingPresenter {
        pub deliveries: Mutex<Vec<(String, Reply)>>,
    }

    impl RecordingPresenter {
        pub fn recipients(&self) -> Vec<String> {
            self.deliveries
                .lock()
                .unwrap()
                .iter()
                .map(|(recipient, _)| recipient.clone())
                .collect()
        }
    }

    #[async_trait]
    impl Presenter for RecordingPresenter {
        async fn deliver(&self, recipient: &str, reply: &Reply) -> Result<(), PresenterError> {
            self.deliveries
                .lock()
                .unwrap()
                .push((recipient.to_string(), reply.clone()));
            Ok(())
        }
    }
}
