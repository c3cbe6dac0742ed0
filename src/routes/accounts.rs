use axum::{extract::State, http::StatusCode, Json};

use super::{IdParams, JsonBody, QueryParams};
use crate::domain::aggregates::{AddressInput, AddressSlot, NewUser, User};
use crate::error::Result;
use crate::state::AppState;

pub async fn signup(State(s): State<AppState>, JsonBody(r): JsonBody<NewUser>) -> Result<(StatusCode, Json<User>)> {
    let user = s.accounts.signup(r).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn add_address(State(s): State<AppState>, QueryParams(p): QueryParams<IdParams>, JsonBody(r): JsonBody<AddressInput>) -> Result<(StatusCode, Json<&'static str>)> {
    s.accounts.add_address(p.id()?, r).await?;
    Ok((StatusCode::CREATED, Json("successfully added the address")))
}

pub async fn edit_home_address(State(s): State<AppState>, QueryParams(p): QueryParams<IdParams>, JsonBody(r): JsonBody<AddressInput>) -> Result<Json<&'static str>> {
    s.accounts.edit_address(p.id()?, AddressSlot::Home, r).await?;
    Ok(Json("successfully updated home address"))
}

pub async fn edit_work_address(State(s): State<AppState>, QueryParams(p): QueryParams<IdParams>, JsonBody(r): JsonBody<AddressInput>) -> Result<Json<&'static str>> {
    s.accounts.edit_address(p.id()?, AddressSlot::Work, r).await?;
    Ok(Json("successfully updated work address"))
}

pub async fn delete_addresses(State(s): State<AppState>, QueryParams(p): QueryParams<IdParams>) -> Result<Json<&'static str>> {
    s.accounts.delete_addresses(p.id()?).await?;
    Ok(Json("successfully deleted"))
}
