//! Blog post storage

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::errors::{AppError, AppResult};

use super::post::{BlogPost, BlogPostMeta};

/// Storage for blog posts, keyed by slug
pub trait BlogRepository: Send + Sync {
    /// Fetch a post by slug
    fn get(&self, slug: &str) -> AppResult<BlogPost>;

    /// Post metadata, newest first
    fn list(&self, include_drafts: bool) -> AppResult<Vec<BlogPostMeta>>;

    /// Store a new post; slugs are unique
    fn insert(&self, post: BlogPost) -> AppResult<()>;
}

/// In-memory post storage
#[derive(Debug, Default)]
pub struct InMemoryBlogStore {
    posts: RwLock<BTreeMap<String, BlogPost>>,
}

impl InMemoryBlogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the given posts
    pub fn with_posts(posts: impl IntoIterator<Item = BlogPost>) -> Self {
        let posts = posts
            .into_iter()
            .map(|post| (post.meta.slug.clone(), post))
            .collect();
        Self {
            posts: RwLock::new(posts),
        }
    }

    /// Number of stored posts
    pub fn len(&self) -> usize {
        self.posts.read().map(|posts| posts.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> AppError {
    AppError::internal("Blog store lock poisoned")
}

impl BlogRepository for InMemoryBlogStore {
    fn get(&self, slug: &str) -> AppResult<BlogPost> {
        let posts = self.posts.read().map_err(|_| poisoned())?;
        posts.get(slug).cloned().ok_or_else(|| {
            AppError::not_found(format!("Blog post not found: {}", slug)).with_field("slug", slug)
        })
    }

    fn list(&self, include_drafts: bool) -> AppResult<Vec<BlogPostMeta>> {
        let posts = self.posts.read().map_err(|_| poisoned())?;
        let mut metas: Vec<BlogPostMeta> = posts
            .values()
            .filter(|post| include_drafts || post.is_published())
            .map(|post| post.meta.clone())
            .collect();
        metas.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(metas)
    }

    fn insert(&self, post: BlogPost) -> AppResult<()> {
        let mut posts = self.posts.write().map_err(|_| poisoned())?;
        let slug = post.meta.slug.clone();
        if posts.contains_key(&slug) {
            return Err(
                AppError::data_integrity(format!("Slug already in use: {}", slug))
                    .with_field("slug", slug),
            );
        }
        posts.insert(slug, post);
        Ok(())
    }
}
