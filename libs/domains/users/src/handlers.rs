use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use axum_helpers::{
    QueryParams, ValidatedJson,
    errors::responses::{
        BadRequestQueryResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{UserError, UserResult};
use crate::models::{
    ApproverQuery, EmailQuery, NameQuery, TargetUserQuery, UpdateUser, User, UserDetails,
    UserIdQuery,
};
use crate::repository::UserRepository;
use crate::service::UserService;

pub const USERS_TAG: &str = "Users";

/// OpenAPI documentation for Users API
#[derive(OpenApi)]
#[openapi(
    paths(
        get_user_by_id,
        get_user_by_email,
        get_user_by_name,
        get_users_by_approver,
        create_user,
        update_user,
        delete_user,
    ),
    components(
        schemas(User, UserDetails, UpdateUser),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestQueryResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = USERS_TAG, description = "User directory endpoints")
    )
)]
pub struct ApiDoc;

/// Create the user router with all HTTP endpoints
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/get-user-by-id", get(get_user_by_id))
        .route("/get-user-by-email", get(get_user_by_email))
        .route("/get-user-by-name", get(get_user_by_name))
        .route("/get-users-by-approver", get(get_users_by_approver))
        .route("/create-user", post(create_user))
        .route("/update-user", put(update_user))
        .route("/delete-user", delete(delete_user))
        .with_state(shared_service)
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/get-user-by-id",
    tag = USERS_TAG,
    params(UserIdQuery),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 400, response = BadRequestQueryResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user_by_id<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    QueryParams(query): QueryParams<UserIdQuery>,
) -> UserResult<Json<User>> {
    let user = service
        .get_user_by_id(query.employee_id)
        .await?
        .ok_or(UserError::NotFound(query.employee_id))?;
    Ok(Json(user))
}

/// Get a user by email address
#[utoipa::path(
    get,
    path = "/get-user-by-email",
    tag = USERS_TAG,
    params(EmailQuery),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 400, response = BadRequestQueryResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user_by_email<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    QueryParams(query): QueryParams<EmailQuery>,
) -> UserResult<Json<User>> {
    let user = service
        .get_user_by_email(&query.email_address)
        .await?
        .ok_or(UserError::EmailNotFound(query.email_address))?;
    Ok(Json(user))
}

/// Get a user by first and last name
#[utoipa::path(
    get,
    path = "/get-user-by-name",
    tag = USERS_TAG,
    params(NameQuery),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 400, response = BadRequestQueryResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user_by_name<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    QueryParams(query): QueryParams<NameQuery>,
) -> UserResult<Json<User>> {
    let user = service
        .get_user_by_name(&query.first_name, &query.last_name)
        .await?
        .ok_or(UserError::NameNotFound {
            first_name: query.first_name,
            last_name: query.last_name,
        })?;
    Ok(Json(user))
}

/// List the users an approver is responsible for
#[utoipa::path(
    get,
    path = "/get-users-by-approver",
    tag = USERS_TAG,
    params(ApproverQuery),
    responses(
        (status = 200, description = "Users reporting to the approver", body = Vec<User>),
        (status = 400, response = BadRequestQueryResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_users_by_approver<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    QueryParams(query): QueryParams<ApproverQuery>,
) -> UserResult<Json<Vec<User>>> {
    let users = service.list_users_by_approver(query.approver_id).await?;
    Ok(Json(users))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/create-user",
    tag = USERS_TAG,
    request_body = UserDetails,
    responses(
        (status = 201, description = "User created successfully", body = String, content_type = "text/plain"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<UserDetails>,
) -> UserResult<impl IntoResponse> {
    let user = service.create_user(input).await?;

    Ok((
        StatusCode::CREATED,
        format!("User {} successfully created.", user.email_address),
    ))
}

/// Replace every field of an existing user
#[utoipa::path(
    put,
    path = "/update-user",
    tag = USERS_TAG,
    params(TargetUserQuery),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated successfully", body = User),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    QueryParams(query): QueryParams<TargetUserQuery>,
    ValidatedJson(input): ValidatedJson<UpdateUser>,
) -> UserResult<Json<User>> {
    let user = service.update_user(query.user_id, input).await?;
    Ok(Json(user))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/delete-user",
    tag = USERS_TAG,
    params(TargetUserQuery),
    responses(
        (status = 200, description = "User deleted successfully", body = String, content_type = "text/plain"),
        (status = 400, response = BadRequestQueryResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    QueryParams(query): QueryParams<TargetUserQuery>,
) -> UserResult<String> {
    let user = service.delete_user(query.user_id).await?;
    Ok(format!("User with userId {} successfully deleted.", user.id))
}
