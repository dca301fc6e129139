use axum::{extract::State, Json};

use shared::types::Username;

use crate::domain::UpdateProfileRequest;
use crate::errors::Result;
use crate::extractors::{SessionToken, ValidatedJson};
use crate::services::auth::ProfileUpdate;
use crate::services::AuthUser;
use crate::state::AppState;

pub async fn get_profile(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
) -> Result<Json<AuthUser>> {
    Ok(Json(state.auth.session_user(&token).await?))
}

pub async fn update_profile(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
    ValidatedJson(req): ValidatedJson<UpdateProfileRequest>,
) -> Result<Json<AuthUser>> {
    let username = req.username.map(Username::try_from).transpose()?;

    let update = ProfileUpdate {
        name: req.name,
        username,
    };
    let user = state.auth.update_profile(&token, update).await?;
    Ok(Json(user))
}
