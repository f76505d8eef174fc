//! Model-provider abstraction for the analysis pipeline.
//!
//! A provider turns a topic into raw model text. The gateway ships one
//! real implementation (Tencent Hunyuan); the trait seam exists so the
//! request pipeline can be exercised without network access.

mod hunyuan;
pub mod signer;

pub use hunyuan::HunyuanProvider;
pub use signer::Credentials;

use async_trait::async_trait;
use trend_common::analysis::SourceReference;
use trend_common::Result;

/// Raw output of one model call: the text content of the first completion
/// choice, plus any grounding citations the provider surfaced.
#[derive(Debug, Clone, Default)]
pub struct ModelReply {
    pub content: String,
    pub sources: Vec<SourceReference>,
}

/// Unified interface for analysis model providers.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Run one analysis call for the given topic and return the raw
    /// model text. Implementations must map transport and provider
    /// failures into the error taxonomy; they never panic.
    async fn analyze(&self, topic: &str) -> Result<ModelReply>;
}
