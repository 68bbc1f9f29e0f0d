use crate::{
    extractor::{AppJson, AppPath, AuthorizedUser},
    model::{
        envelope::ApiResponse,
        space::{CreateSpaceRequest, SpaceResponse, UpdateSpaceRequest, UpdateSpaceRequestWithId},
    },
};
use axum::{extract::State, Json};
use garde::Validate;
use kernel::model::{id::SpaceId, space::event::DeleteSpace};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn register_space(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    AppJson(req): AppJson<CreateSpaceRequest>,
) -> AppResult<Json<ApiResponse<SpaceResponse>>> {
    user.require_admin()?;
    req.validate(&())?;

    registry
        .space_repository()
        .create(req.into())
        .await
        .map(|space| ApiResponse::with_message("Space created successfully", space.into()))
}

pub async fn show_space_list(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ApiResponse<Vec<SpaceResponse>>>> {
    let spaces = registry.space_repository().find_all().await?;

    Ok(ApiResponse::data(
        spaces.into_iter().map(SpaceResponse::from).collect(),
    ))
}

pub async fn show_space(
    _user: AuthorizedUser,
    AppPath(space_id): AppPath<SpaceId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ApiResponse<SpaceResponse>>> {
    registry
        .space_repository()
        .find_by_id(space_id)
        .await
        .and_then(|space| match space {
            Some(space) => Ok(ApiResponse::data(space.into())),
            None => Err(AppError::EntityNotFound(format!(
                "Space not found with id: {space_id}"
            ))),
        })
}

pub async fn update_space(
    user: AuthorizedUser,
    AppPath(space_id): AppPath<SpaceId>,
    State(registry): State<AppRegistry>,
    AppJson(req): AppJson<UpdateSpaceRequest>,
) -> AppResult<Json<ApiResponse<SpaceResponse>>> {
    user.require_admin()?;
    req.validate(&())?;

    let update_space = UpdateSpaceRequestWithId::new(space_id, req);
    registry
        .space_repository()
        .update(update_space.into())
        .await
        .map(|space| ApiResponse::with_message("Space updated successfully", space.into()))
}

pub async fn delete_space(
    user: AuthorizedUser,
    AppPath(space_id): AppPath<SpaceId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ApiResponse<()>>> {
    user.require_admin()?;

    registry
        .space_repository()
        .delete(DeleteSpace { space_id })
        .await
        .map(|_| ApiResponse::message("Space deleted successfully"))
}
