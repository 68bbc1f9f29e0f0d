use crate::model::{
    id::SpaceId,
    space::{
        event::{CreateSpace, DeleteSpace, UpdateSpace},
        SpaceWithOccupancy,
    },
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait SpaceRepository: Send + Sync {
    async fn create(&self, event: CreateSpace) -> AppResult<SpaceWithOccupancy>;
    async fn find_all(&self) -> AppResult<Vec<SpaceWithOccupancy>>;
    async fn find_by_id(&self, space_id: SpaceId) -> AppResult<Option<SpaceWithOccupancy>>;
    async fn update(&self, event: UpdateSpace) -> AppResult<SpaceWithOccupancy>;
    // Marks the space UNAVAILABLE when it has access history, removes it otherwise.
    async fn delete(&self, event: DeleteSpace) -> AppResult<()>;
}
