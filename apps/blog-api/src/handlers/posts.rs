//! Blog post handlers.

use actix_web::{HttpResponse, web};
use serde_json::{Map, Value};
use uuid::Uuid;

use blog_core::domain::{Author, BlogPost, BlogPostChanges, NewBlogPost, PublicBlogPost};
use blog_core::error::RepoError;
use blog_shared::dto::{
    AuthorInput, CreateBlogPostRequest, REQUIRED_CREATE_FIELDS, UpdateBlogPostRequest,
    describe_id, first_missing_field,
};

use super::JsonObject;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.find_all().await?;
    let body: Vec<PublicBlogPost> = posts.iter().map(BlogPost::serialize).collect();

    Ok(HttpResponse::Ok().json(body))
}

/// GET /posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(HttpResponse::Ok().json(post.serialize()))
}

/// POST /posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: JsonObject,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();

    if let Some(field) = first_missing_field(&body, &REQUIRED_CREATE_FIELDS) {
        let err = AppError::MissingField(field);
        tracing::warn!("{}", err);
        return Err(err);
    }

    let req: CreateBlogPostRequest = parse_body(body)?;
    let new = NewBlogPost::new(
        req.title.unwrap_or_default(),
        req.content,
        req.author.map(into_author),
    )?;

    let post = state.posts.create(new).await?;
    tracing::info!(post_id = %post.id, "Blog post created");

    Ok(HttpResponse::Created().json(post.serialize()))
}

/// PUT /posts/{id}
///
/// Path id and body id must match. Only the fields present in the body are written.
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: JsonObject,
) -> AppResult<HttpResponse> {
    let path_id = path.into_inner();
    let body = body.into_inner();

    let body_id = body.get("id");
    if body_id.and_then(Value::as_str) != Some(path_id.as_str()) {
        let message = format!(
            "Request path id ({}) and request body id ({}) must match",
            path_id,
            describe_id(body_id)
        );
        tracing::warn!("{}", message);
        return Err(AppError::BadRequest(message));
    }

    let id = parse_id(&path_id)?;
    let req: UpdateBlogPostRequest = parse_body(body)?;
    let changes = BlogPostChanges {
        title: req.title,
        content: req.content,
        author: req
            .author
            .map(|author| author.map(into_author).unwrap_or_default()),
    };
    changes.validate()?;

    match state.posts.update(id, changes).await {
        Ok(()) => tracing::info!(post_id = %id, "Blog post updated"),
        Err(RepoError::NotFound) => tracing::debug!(post_id = %id, "Update matched no post"),
        Err(e) => return Err(e.into()),
    }

    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;

    match state.posts.delete(id).await {
        Ok(()) => tracing::info!(post_id = %id, "Blog post deleted"),
        Err(RepoError::NotFound) => tracing::debug!(post_id = %id, "Delete matched no post"),
        Err(e) => return Err(e.into()),
    }

    Ok(HttpResponse::NoContent().finish())
}

/// Ids that are not UUIDs cannot name a stored post.
fn parse_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound)
}

/// Values that cannot be cast to the document's field types fail like any
/// other store rejection.
fn parse_body<T: serde::de::DeserializeOwned>(body: Map<String, Value>) -> AppResult<T> {
    serde_json::from_value(Value::Object(body))
        .map_err(|e| AppError::Internal(format!("Invalid request body: {}", e)))
}

fn into_author(input: AuthorInput) -> Author {
    Author {
        first_name: input.first_name,
        last_name: input.last_name,
    }
}
