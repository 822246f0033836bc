//! Conversation page controller, shared by the chat and code pages.
//!
//! DESIGN
//! ======
//! `submit` takes `&mut self`, so a second submission cannot start while one
//! is awaiting the server. History is only touched after a successful reply:
//! on failure the page looks exactly as it did before, prompt included.

use super::api::ProxyApi;
use super::form::PromptForm;
use super::{ClientError, UsageRefresh};
use crate::llm::types::Message;
use crate::types::ChatFeature;

pub struct ConversationController {
    feature: ChatFeature,
    messages: Vec<Message>,
    pub form: PromptForm,
}

impl ConversationController {
    #[must_use]
    pub fn new(feature: ChatFeature) -> Self {
        Self { feature, messages: Vec::new(), form: PromptForm::default() }
    }

    #[must_use]
    pub fn feature(&self) -> ChatFeature {
        self.feature
    }

    /// History in chronological order.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// History most-recent-first, the order the page shows it in.
    pub fn display(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().rev()
    }

    /// Send the form prompt together with the full history.
    ///
    /// On success the user message and the assistant reply are appended and
    /// the form is cleared. `usage` is refreshed once the request settles,
    /// whatever the outcome. A blank prompt never reaches the server.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidForm`] for a blank prompt, or the
    /// request/response error otherwise. State is unchanged on any error.
    pub async fn submit(&mut self, api: &dyn ProxyApi, usage: &dyn UsageRefresh) -> Result<(), ClientError> {
        let prompt = self.form.validate()?;
        let user_message = Message::user(prompt);

        let mut outbound = self.messages.clone();
        outbound.push(user_message.clone());

        let result = api
            .chat(self.feature, &outbound)
            .await
            .and_then(|completion| completion.into_reply().ok_or(ClientError::EmptyReply));
        usage.refresh();

        match result {
            Ok(reply) => {
                self.messages.push(user_message);
                self.messages.push(Message::assistant(reply.content));
                self.form.reset();
                Ok(())
            }
            Err(e) => {
                tracing::warn!(feature = ?self.feature, error = %e, "conversation request failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;
