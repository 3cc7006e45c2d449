//! Outcome router: maps outcome values to HTTP responses.
//!
//! | Outcome | Status | Body |
//! |---|---|---|
//! | invalid input | 400 | [`ValidationError`](crate::outcome::ValidationError) |
//! | not found | 404 | empty |
//! | rule violation | 400 | [`RuleViolation`](crate::outcome::RuleViolation) |
//! | created | 201 | `{"id"}` plus `Location` |
//! | found / accepted | 200 | [`UserResource`] |
//! | deleted | 204 | empty |
//!
//! Every function here is pure and total.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::links::{EDITED_RELS, ITEM_RELS, Link, LinkBuilder, UserResource, attach_links};
use crate::models::{UserId, UserInfo};
use crate::outcome::{CreateOutcome, EditOutcome, LookupOutcome, RejectionDetail};
use crate::pagination::{Page, PageMeta, PageRequest};

/// Body of a 201 from `POST /users`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreatedResponse {
    pub id: UserId,
}

/// Body of `GET /users`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserPageResponse {
    pub data: Vec<UserResource>,
    pub page: PageMeta,
    pub links: Vec<Link>,
}

fn bad_request(detail: impl Into<RejectionDetail>) -> Response {
    (StatusCode::BAD_REQUEST, Json(detail.into())).into_response()
}

pub fn route_create(outcome: CreateOutcome, links: &LinkBuilder) -> Response {
    match outcome {
        CreateOutcome::InvalidInput(detail) => bad_request(detail),
        CreateOutcome::Rejected(detail) => bad_request(detail),
        CreateOutcome::Created(id) => (
            StatusCode::CREATED,
            [(header::LOCATION, links.location(&id))],
            Json(CreatedResponse { id }),
        )
            .into_response(),
    }
}

pub fn route_get(lookup: LookupOutcome<UserInfo>, links: &LinkBuilder) -> Response {
    match lookup {
        None => StatusCode::NOT_FOUND.into_response(),
        Some(info) => (StatusCode::OK, Json(attach_links(info, &ITEM_RELS, links))).into_response(),
    }
}

pub fn route_edit(outcome: EditOutcome, links: &LinkBuilder) -> Response {
    match outcome {
        EditOutcome::InvalidInput(detail) => bad_request(detail),
        EditOutcome::NotFound => StatusCode::NOT_FOUND.into_response(),
        EditOutcome::Rejected(detail) => bad_request(detail),
        EditOutcome::Accepted(info) => {
            (StatusCode::OK, Json(attach_links(info, &EDITED_RELS, links))).into_response()
        }
    }
}

/// Delete is idempotent: a missing user is indistinguishable from a deleted one.
pub fn route_delete() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

pub fn route_list(page: Page<UserInfo>, request: PageRequest, links: &LinkBuilder) -> Response {
    let meta = PageMeta::new(&request, page.total);
    let body = UserPageResponse {
        data: page
            .items
            .into_iter()
            .map(|info| attach_links(info, &ITEM_RELS, links))
            .collect(),
        links: links.page_links(&meta),
        page: meta,
    };

    (StatusCode::OK, Json(body)).into_response()
}
