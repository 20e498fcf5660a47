use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::{Depot, Request, Response, Router, handler};
use serde::Deserialize;
use serde_json::Value;

use flock_service::error::ServiceError;
use flock_service::members::{ImportOutcome, MembersImport, TabularMembersImport};
use flock_service::model::{Member, MemberId, NewMember};

use super::MEMBERS_ROUTE_COMPONENT;
use super::response::render_error;
use crate::error::{AppError, AppResult};
use crate::state::{get_store_from_depot, member_service};

/// Spreadsheet rows as sent by the upload form; cells may be any JSON scalar.
#[derive(Debug, Deserialize)]
struct ImportRequest {
    rows: Vec<Vec<Value>>,
}

fn cell_text(cell: Value) -> String {
    match cell {
        Value::Null => String::new(),
        Value::String(text) => text,
        other => other.to_string(),
    }
}

fn member_id(req: &Request) -> AppResult<MemberId> {
    let raw = req.param::<String>("id").unwrap_or_default();
    raw.parse::<MemberId>()
        .ok()
        .ok_or_else(|| ServiceError::NotFound(format!("member {raw}")).into())
}

async fn payload(req: &mut Request) -> AppResult<NewMember> {
    req.parse_json::<NewMember>()
        .await
        .map_err(|err| AppError::BadRequest(format!("invalid member body: {err}")))
}

fn list(depot: &Depot) -> AppResult<Vec<Member>> {
    Ok(member_service(depot)?.list()?)
}

async fn create(req: &mut Request, depot: &Depot) -> AppResult<Member> {
    let new_member = payload(req).await?;
    Ok(member_service(depot)?.create(new_member)?)
}

fn show(req: &Request, depot: &Depot) -> AppResult<Member> {
    let id = member_id(req)?;
    Ok(member_service(depot)?.show(id)?)
}

async fn update(req: &mut Request, depot: &Depot) -> AppResult<Member> {
    let id = member_id(req)?;
    let new_member = payload(req).await?;
    Ok(member_service(depot)?.update(id, new_member)?)
}

fn delete(req: &Request, depot: &Depot) -> AppResult<Member> {
    let id = member_id(req)?;
    Ok(member_service(depot)?.delete(id)?)
}

async fn import(req: &mut Request, depot: &Depot) -> AppResult<ImportOutcome> {
    let body: ImportRequest = req
        .parse_json()
        .await
        .map_err(|err| AppError::BadRequest(format!("invalid import body: {err}")))?;
    let rows = body
        .rows
        .into_iter()
        .map(|row| row.into_iter().map(cell_text).collect())
        .collect();

    let store = get_store_from_depot(depot)?;
    Ok(TabularMembersImport::new(store, rows).save()?)
}

#[handler]
async fn list_members(depot: &mut Depot, res: &mut Response) {
    match list(depot) {
        Ok(members) => res.render(Json(members)),
        Err(err) => render_error(res, &err),
    }
}

/// ## Summary
/// POST /api/members - creates a member.
///
/// ## Errors
/// Returns HTTP 422 with the validation sentence, or 400 for a malformed body.
#[handler]
async fn create_member(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match create(req, depot).await {
        Ok(member) => {
            res.status_code(StatusCode::CREATED);
            res.render(Json(member));
        }
        Err(err) => render_error(res, &err),
    }
}

#[handler]
async fn show_member(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match show(req, depot) {
        Ok(member) => res.render(Json(member)),
        Err(err) => render_error(res, &err),
    }
}

#[handler]
async fn update_member(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match update(req, depot).await {
        Ok(member) => res.render(Json(member)),
        Err(err) => render_error(res, &err),
    }
}

/// ## Summary
/// DELETE /api/members/{id} - removes a member and unassigns it from events.
#[handler]
async fn delete_member(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match delete(req, depot) {
        Ok(member) => {
            tracing::debug!(member_id = %member.id, "Deleted via API");
            res.status_code(StatusCode::NO_CONTENT);
        }
        Err(err) => render_error(res, &err),
    }
}

/// ## Summary
/// POST /api/members/import - imports a roster sheet in one transaction.
///
/// ## Errors
/// Returns HTTP 422 with the per-row errors when any row is invalid; nothing
/// is saved in that case.
#[handler]
async fn import_members(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match import(req, depot).await {
        Ok(outcome) => {
            if !outcome.success {
                res.status_code(StatusCode::UNPROCESSABLE_ENTITY);
            }
            res.render(Json(outcome));
        }
        Err(err) => render_error(res, &err),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(MEMBERS_ROUTE_COMPONENT)
        .get(list_members)
        .post(create_member)
        .push(Router::with_path("import").post(import_members))
        .push(
            Router::with_path("{id}")
                .get(show_member)
                .put(update_member)
                .delete(delete_member),
        )
}
