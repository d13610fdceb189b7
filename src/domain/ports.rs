use crate::domain::model::{Identifier, LookupResult};
use async_trait::async_trait;

/// Remote ban lookup. Failures are reported inside [`LookupResult`], never
/// as an `Err`, so every valid identifier yields exactly one reply.
#[async_trait]
pub trait LookupService: Send + Sync {
    async fn lookup(&self, id: &Identifier) -> LookupResult;
}
