pub mod gemini;

use crate::errors::NlqError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A trait for interacting with a text-generation provider.
///
/// This defines a common interface for generating SQL statements from an
/// assembled prompt using different Large Language Models. A call is pure
/// request/response: no retry, no backoff, no rate-limit handling.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Sends a prompt to the generation service and returns its raw text.
    async fn generate(&self, prompt: &str) -> Result<String, NlqError>;
}

dyn_clone::clone_trait_object!(AiProvider);
