//! Public blog HTTP routes

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header::CACHE_CONTROL,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use crate::blog::{render_markdown, BlogPost, BlogPostMeta};
use crate::errors::{AppError, AppResult};
use crate::result;

use super::state::AppState;

/// Posts are cached for five minutes and served stale for up to an hour
pub const POST_CACHE_CONTROL: &str =
    "public, max-age=300, s-maxage=300, stale-while-revalidate=3600";

pub fn blog_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/blog", get(list_handler))
        .route("/blog/:slug", get(post_handler))
}

async fn list_handler(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<Vec<BlogPostMeta>>> {
    Ok(Json(state.blog.list(false)?))
}

/// A missing or unpublished post is raised through `result::unwrap` and
/// answered by the panic boundary.
async fn post_handler(State(state): State<Arc<AppState>>, Path(slug): Path<String>) -> Response {
    let post = result::unwrap(result::and_then(state.blog.get(&slug), published));
    let post = with_html(post);

    ([(CACHE_CONTROL, POST_CACHE_CONTROL)], Json(post)).into_response()
}

fn published(post: BlogPost) -> AppResult<BlogPost> {
    if post.is_published() {
        Ok(post)
    } else {
        Err(AppError::not_found(format!("Blog post not found: {}", post.slug()))
            .with_field("slug", post.slug()))
    }
}

fn with_html(mut post: BlogPost) -> BlogPost {
    if post.html_content.trim().is_empty() {
        post.html_content = render_markdown(&post.content);
    }
    post
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blog::{seed_posts, PostStatus};
    use crate::errors::ErrorKind;
    use crate::http_server::config::ServerConfig;

    #[tokio::test]
    async fn test_list_only_published() {
        let state = Arc::new(AppState::new(ServerConfig::default()));
        let Json(posts) = list_handler(State(state)).await.unwrap();
        assert!(posts.iter().any(|p| p.slug == "sveltekit-vs-wordpress"));
    }

    #[test]
    fn test_draft_is_not_found() {
        let mut post = seed_posts().remove(0);
        post.status = PostStatus::Draft;
        let err = published(post).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.field("slug").unwrap(), "sveltekit-vs-wordpress");
    }

    #[test]
    fn test_html_rendered_when_missing() {
        let post = with_html(seed_posts().remove(0));
        assert!(post.html_content.contains("<h2 id="));

        let mut post = seed_posts().remove(0);
        post.html_content = "<p>kept</p>".to_string();
        assert_eq!(with_html(post).html_content, "<p>kept</p>");
    }

    #[tokio::test]
    async fn test_post_sets_cache_control() {
        let state = Arc::new(AppState::new(ServerConfig::default()));
        let response =
            post_handler(State(state), Path("sveltekit-vs-wordpress".to_string())).await;
        assert_eq!(response.headers()[CACHE_CONTROL], POST_CACHE_CONTROL);
    }
}
