use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use shared::errors::ServiceError;
use shared::types::Credits;

use crate::catalog::{self, TimeSlotInfo};
use crate::domain::{
    CatalogMode, CatalogResponse, MatchRegistrationResponse, MatchResultRequest,
    RegisterMatchRequest, SlotsQuery, TeamSizeOption,
};
use crate::errors::{AppError, Result};
use crate::extractors::{SessionToken, ValidatedJson};
use crate::registration::validate_selection;
use crate::services::AuthUser;
use crate::state::AppState;

/// The fixed product catalog: modes with their team-size options, and the
/// entry tiers
pub async fn get_catalog() -> Json<CatalogResponse> {
    let modes = catalog::GameMode::all()
        .into_iter()
        .map(|mode| CatalogMode {
            mode,
            label: mode.label(),
            team_sizes: catalog::team_sizes(mode)
                .iter()
                .map(|(team_size, max_players)| TeamSizeOption {
                    team_size: *team_size,
                    max_players: *max_players,
                })
                .collect(),
        })
        .collect();

    Json(CatalogResponse {
        modes,
        tiers: catalog::entry_tiers().to_vec(),
    })
}

/// The daily slot board for a mode/team-size pair. Occupancy is not
/// tracked server-side; every slot reports zero registered players.
pub async fn get_slots(Query(query): Query<SlotsQuery>) -> Result<Json<Vec<TimeSlotInfo>>> {
    catalog::slot_board(query.mode, query.team_size)
        .map(Json)
        .ok_or_else(|| {
            AppError::Service(ServiceError::invalid_selection(format!(
                "Team size {:?} is not offered for {:?}",
                query.team_size, query.mode
            )))
        })
}

/// Confirm a wizard selection: replay it through the step gating, then
/// charge the entry fee. Registration is not atomic with slot capacity —
/// no server-side check prevents overbooking.
pub async fn register_match(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
    ValidatedJson(req): ValidatedJson<RegisterMatchRequest>,
) -> Result<Json<MatchRegistrationResponse>> {
    let selection = validate_selection(req.mode, req.team_size, req.slot, req.tier)?;
    let match_id = format!("match-{}", Uuid::new_v4());

    let span = tracing::info_span!(
        "register_match",
        %match_id,
        mode = ?selection.mode,
        tier = ?selection.tier.id,
        fee = selection.tier.entry_fee.as_u64()
    );
    let _enter = span.enter();

    let user = state
        .auth
        .deduct_match_entry(
            &token,
            selection.tier.entry_fee,
            &selection.description(),
            &match_id,
        )
        .await?;

    tracing::info!(account_id = %user.account.id, "Match registration confirmed");

    let wallet = wallet_of(&user)?;
    Ok(Json(MatchRegistrationResponse {
        match_id,
        mode: selection.mode,
        team_size: selection.team_size,
        slot: selection.slot,
        tier: selection.tier.id,
        entry_fee: selection.tier.entry_fee,
        max_players: selection.max_players,
        wallet,
    }))
}

/// Client-posted match outcome: updates the stats and, on a win, credits
/// the posted reward
pub async fn report_result(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
    Path(match_id): Path<String>,
    ValidatedJson(req): ValidatedJson<MatchResultRequest>,
) -> Result<Json<AuthUser>> {
    let reward = req
        .reward
        .map(Credits::operation_amount)
        .transpose()?;

    let user = state
        .auth
        .record_match_result(&token, &match_id, req.result, reward)
        .await?;

    Ok(Json(user))
}

fn wallet_of(user: &AuthUser) -> Result<shared::profile::Wallet> {
    user.profile
        .as_ref()
        .map(|profile| profile.wallet.clone())
        .ok_or_else(|| AppError::Service(ServiceError::profile_not_found(&user.account.id)))
}
