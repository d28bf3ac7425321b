//! # Blog
//!
//! Post model, markdown rendering and post storage.

pub mod post;
pub mod render;
pub mod seed;
pub mod store;

pub use post::{
    BlogAuthor, BlogCategory, BlogPost, BlogPostMeta, PostStatus, SeoMeta, SocialLinks, TocEntry,
};
pub use render::{extract_table_of_contents, heading_anchor, render_markdown};
pub use seed::seed_posts;
pub use store::{BlogRepository, InMemoryBlogStore};
