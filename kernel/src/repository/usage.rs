use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::usage::UsageSnapshot;

#[async_trait]
pub trait UsageRepository: Send + Sync {
    async fn snapshot(&self) -> AppResult<UsageSnapshot>;
}
