use std::sync::Arc;

use async_trait::async_trait;

use crate::api::DecisionError;

/// One chat completion: system prompt plus a single user turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionRequest {
    pub model: String,
    pub system: String,
    pub prompt: String,
}

/// Transport to a language model.
///
/// No HTTP implementation ships with the runtime; embedders provide one.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Returns the raw text of the model's reply.
    async fn complete(&self, request: CompletionRequest) -> Result<String, DecisionError>;
}

#[async_trait]
impl<T: CompletionClient + ?Sized> CompletionClient for Arc<T> {
    async fn complete(&self, request: CompletionRequest) -> Result<String, DecisionError> {
        (**self).complete(request).await
    }
}
