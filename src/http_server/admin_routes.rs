//! Admin dashboard and post management routes
//!
//! Pages under `/admin` are only reached by signed-in users (the guard
//! redirects everyone else); the `/api/admin` handlers check the user
//! themselves so reads are protected too.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::blog::{BlogAuthor, BlogPostMeta, SocialLinks};
use crate::errors::{AppError, AppResult};
use crate::validation::{validate_post, BlogPostDraft};

use super::extract::JsonBody;
use super::state::{AppState, CurrentUser};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub user: CurrentUser,
    pub total_posts: usize,
    pub published_posts: usize,
    pub draft_posts: usize,
}

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub redirect: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginPage {
    pub page: &'static str,
    pub redirect: String,
}

#[derive(Debug, Serialize)]
pub struct PostListResponse {
    pub posts: Vec<BlogPostMeta>,
}

#[derive(Debug, Serialize)]
pub struct PostCreatedResponse {
    pub success: bool,
    pub id: String,
    pub slug: String,
}

pub fn admin_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin", get(dashboard_handler))
        .route("/admin/login", get(login_handler))
        .route("/api/admin/blog", get(list_posts_handler).post(create_post_handler))
}

fn require_user(user: Option<Extension<CurrentUser>>) -> AppResult<CurrentUser> {
    user.map(|Extension(user)| user)
        .ok_or_else(|| AppError::authentication("Unauthorized"))
}

/// Byline for posts written from the admin editor
fn author_for(user: &CurrentUser) -> BlogAuthor {
    let name = if user.name.trim().is_empty() {
        "Admin".to_string()
    } else {
        user.name.clone()
    };
    BlogAuthor {
        name,
        role: user.role.clone(),
        bio: "Content creator at Blackforge Digital".to_string(),
        avatar: "/images/team/default.jpg".to_string(),
        social: SocialLinks::default(),
    }
}

async fn dashboard_handler(
    State(state): State<Arc<AppState>>,
    user: Option<Extension<CurrentUser>>,
) -> AppResult<Json<DashboardResponse>> {
    let user = require_user(user)?;

    // One snapshot, so the counts agree under concurrent inserts
    let posts = state.blog.list(true)?;
    let published_posts = posts.iter().filter(|p| p.published_at.is_some()).count();

    Ok(Json(DashboardResponse {
        user,
        total_posts: posts.len(),
        published_posts,
        draft_posts: posts.len() - published_posts,
    }))
}

/// Only same-site paths are accepted as post-login targets
async fn login_handler(Query(query): Query<LoginQuery>) -> Json<LoginPage> {
    let redirect = query
        .redirect
        .filter(|target| target.starts_with('/') && !target.starts_with("//"))
        .unwrap_or_else(|| "/admin".to_string());

    Json(LoginPage {
        page: "login",
        redirect,
    })
}

async fn list_posts_handler(
    State(state): State<Arc<AppState>>,
    user: Option<Extension<CurrentUser>>,
) -> AppResult<Json<PostListResponse>> {
    require_user(user)?;
    Ok(Json(PostListResponse {
        posts: state.blog.list(true)?,
    }))
}

async fn create_post_handler(
    State(state): State<Arc<AppState>>,
    user: Option<Extension<CurrentUser>>,
    JsonBody(draft): JsonBody<BlogPostDraft>,
) -> AppResult<(StatusCode, Json<PostCreatedResponse>)> {
    let user = require_user(user)?;
    let post = validate_post(draft, author_for(&user), Utc::now())?;
    let slug = post.slug().to_string();
    let id = Uuid::new_v4().to_string();

    state.blog.insert(post)?;
    state.logger.info(
        "Blog post created",
        Some(json!({ "id": id, "slug": slug, "author": user.name })),
    );

    Ok((
        StatusCode::CREATED,
        Json(PostCreatedResponse {
            success: true,
            id,
            slug,
        }),
    ))
}
