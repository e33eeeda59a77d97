//! The stage contract.

use async_trait::async_trait;

use super::context::RequestContext;

/// One step of the pipeline.
///
/// A stage checks the recorded error itself and decides whether to do
/// its work; the pipeline runs every stage regardless.
#[async_trait]
pub trait Stage: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    async fn run(&self, ctx: &mut RequestContext);
}
