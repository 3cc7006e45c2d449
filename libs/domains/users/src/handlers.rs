use axum::{
    Router,
    extract::{Path, State},
    response::Response,
    routing::get,
};
use axum_helpers::{
    JsonBody, QueryParams,
    errors::responses::{BadRequestJsonResponse, BadRequestQueryResponse, InternalServerErrorResponse},
};
use std::sync::Arc;
use tracing::instrument;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::links::{Link, LinkBuilder, Rel, UserResource};
use crate::models::{CreateUserRequest, EditUserRequest, UserId, UserInfo, UserStatus};
use crate::outcome::{
    CreateOutcome, EditOutcome, RejectionDetail, RuleReason, RuleViolation, ValidationError,
    ValidationReason,
};
use crate::pagination::{PageMeta, PageParams, PageRequest};
use crate::repository::UserRepository;
use crate::respond::{
    CreatedResponse, UserPageResponse, route_create, route_delete, route_edit, route_get,
    route_list,
};
use crate::service::UserService;
use crate::user_validator::UserLogicValidator;

pub const TAG: &str = "users";

/// OpenAPI documentation for Users API
#[derive(OpenApi)]
#[openapi(
    paths(list_users, create_user, get_user, edit_user, delete_user),
    components(
        schemas(
            UserId,
            UserInfo,
            UserStatus,
            UserResource,
            UserPageResponse,
            CreatedResponse,
            CreateUserRequest,
            EditUserRequest,
            ValidationError,
            ValidationReason,
            RuleViolation,
            RuleReason,
            RejectionDetail,
            Link,
            Rel,
            PageMeta
        ),
        responses(
            BadRequestJsonResponse,
            BadRequestQueryResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "User management endpoints")
    )
)]
pub struct ApiDoc;

struct UsersState<R: UserRepository> {
    service: UserService<R>,
    links: LinkBuilder,
}

/// Create the users router with all HTTP endpoints.
///
/// `links` builds hrefs under the public URL the router is mounted at.
pub fn router<R: UserRepository + 'static>(service: UserService<R>, links: LinkBuilder) -> Router {
    let state = Arc::new(UsersState { service, links });

    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).put(edit_user).delete(delete_user))
        .with_state(state)
}

/// List users, newest first
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(PageParams),
    responses(
        (status = 200, description = "One page of users", body = UserPageResponse),
        (status = 400, response = BadRequestQueryResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
#[instrument(skip(state))]
async fn list_users<R: UserRepository>(
    State(state): State<Arc<UsersState<R>>>,
    QueryParams(params): QueryParams<PageParams>,
) -> UserResult<Response> {
    let request = PageRequest::from(params);
    let page = state.service.list(request).await?;
    Ok(route_list(page, request, &state.links))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = CreatedResponse,
            headers(("location" = String, description = "URI of the new user"))),
        (status = 400, description = "Invalid field or rejected by a domain rule", body = RejectionDetail),
        (status = 422, description = "Body does not match the payload shape"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
#[instrument(skip(state, input))]
async fn create_user<R: UserRepository>(
    State(state): State<Arc<UsersState<R>>>,
    JsonBody(input): JsonBody<CreateUserRequest>,
) -> UserResult<Response> {
    let outcome: CreateOutcome = match UserLogicValidator::validate(input) {
        Ok(new_user) => Ok(state.service.create(new_user).await?),
        Err(invalid) => Err(invalid),
    }
    .into();

    Ok(route_create(outcome, &state.links))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserResource),
        (status = 404, description = "User not found"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
#[instrument(skip(state))]
async fn get_user<R: UserRepository>(
    State(state): State<Arc<UsersState<R>>>,
    Path(id): Path<String>,
) -> UserResult<Response> {
    let info = state.service.get_info(&UserId::from(id)).await?;
    Ok(route_get(info, &state.links))
}

/// Edit a user
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = String, Path, description = "User ID")
    ),
    request_body = EditUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResource),
        (status = 400, description = "Invalid field or rejected by a domain rule", body = RejectionDetail),
        (status = 404, description = "User not found"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
#[instrument(skip(state, input))]
async fn edit_user<R: UserRepository>(
    State(state): State<Arc<UsersState<R>>>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<EditUserRequest>,
) -> UserResult<Response> {
    let id = UserId::from(id);
    let outcome: EditOutcome = match UserLogicValidator::validate(input) {
        Ok(changes) => Ok(state.service.edit(&id, changes).await?),
        Err(invalid) => Err(invalid),
    }
    .into();

    Ok(route_edit(outcome, &state.links))
}

/// Delete a user. Always 204, whether or not it existed.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
#[instrument(skip(state))]
async fn delete_user<R: UserRepository>(
    State(state): State<Arc<UsersState<R>>>,
    Path(id): Path<String>,
) -> UserResult<Response> {
    state.service.delete(&UserId::from(id)).await?;
    Ok(route_delete())
}
