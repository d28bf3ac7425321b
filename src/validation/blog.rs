//! Blog post drafts submitted from the admin editor

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::blog::{
    extract_table_of_contents, BlogAuthor, BlogCategory, BlogPost, BlogPostMeta, PostStatus,
    SeoMeta,
};
use crate::errors::{AppError, AppResult};
use crate::result::and_then;

use super::fields::{FieldErrors, VALIDATION_FAILED};
use super::slug::{check_slug, parse_slug};

/// Search metadata as submitted
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeoDraft {
    pub meta_title: String,
    pub meta_description: String,
    pub focus_keyword: String,
    pub og_image: Option<String>,
}

/// Post as submitted; `content` is editor HTML
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BlogPostDraft {
    pub title: String,
    /// Derived from the title when absent
    pub slug: Option<String>,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    pub featured: bool,
    pub featured_image: String,
    pub featured_image_alt: String,
    pub read_time: Option<i64>,
    pub status: PostStatus,
    pub seo: SeoDraft,
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Absolute http(s) URL or a root-relative path
fn is_link(value: &str) -> bool {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    match rest {
        Some(host) => !host.is_empty() && !host.contains(char::is_whitespace),
        None => {
            value.starts_with('/')
                && !value.starts_with("//")
                && !value.contains(char::is_whitespace)
        }
    }
}

/// Validate a draft into a storable post.
///
/// `published_at` is stamped with `now` when the draft is published.
pub fn validate_post(
    draft: BlogPostDraft,
    author: BlogAuthor,
    now: DateTime<Utc>,
) -> AppResult<BlogPost> {
    let mut errors = FieldErrors::new();

    let title = draft.title.trim().to_string();
    errors.ensure(!title.is_empty(), "title", "Title is required");
    errors.ensure(char_len(&title) <= 200, "title", "Title too long");

    let explicit = draft
        .slug
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from);
    let slug = match explicit {
        Some(slug) => check_slug(&slug),
        None => and_then(parse_slug(&title), |slug| check_slug(&slug)),
    };
    let slug = errors.capture("slug", slug);

    let excerpt = draft.excerpt.trim().to_string();
    errors.ensure(
        (10..=300).contains(&char_len(&excerpt)),
        "excerpt",
        "Excerpt must be between 10 and 300 characters",
    );

    errors.ensure(char_len(&draft.content) >= 100, "content", "Content too short");

    let category = errors.capture("category", draft.category.parse::<BlogCategory>());

    let read_time = match draft.read_time {
        Some(minutes) if minutes > 0 => u32::try_from(minutes).ok(),
        _ => None,
    };
    errors.ensure(read_time.is_some(), "readTime", "Read time must be a positive number of minutes");

    errors.ensure(is_link(&draft.featured_image), "featuredImage", "Invalid image URL");
    errors.ensure(
        char_len(&draft.featured_image_alt) <= 200,
        "featuredImageAlt",
        "Alt text too long",
    );
    errors.ensure(draft.tags.len() <= 10, "tags", "At most 10 tags");

    let seo = draft.seo;
    errors.ensure(char_len(&seo.meta_title) <= 60, "seo.metaTitle", "Meta title too long");
    errors.ensure(
        char_len(&seo.meta_description) <= 160,
        "seo.metaDescription",
        "Meta description too long",
    );
    errors.ensure(
        char_len(&seo.focus_keyword) <= 50,
        "seo.focusKeyword",
        "Focus keyword too long",
    );
    let og_image = seo.og_image.filter(|s| !s.is_empty());
    if let Some(og_image) = &og_image {
        errors.ensure(is_link(og_image), "seo.ogImage", "Invalid image URL");
    }

    let table_of_contents = extract_table_of_contents(&draft.content)?;
    let (slug, category, read_time) = errors.into_result((slug, category, read_time))?;
    let (Some(slug), Some(category), Some(read_time)) = (slug, category, read_time) else {
        return Err(AppError::validation(VALIDATION_FAILED));
    };

    let published_at = (draft.status == PostStatus::Published).then_some(now);

    Ok(BlogPost {
        meta: BlogPostMeta {
            title,
            slug,
            excerpt,
            category,
            author,
            published_at,
            updated_at: None,
            read_time,
            featured: draft.featured,
            featured_image: draft.featured_image,
            featured_image_alt: draft.featured_image_alt,
            tags: draft.tags,
            seo: SeoMeta {
                meta_title: seo.meta_title,
                meta_description: seo.meta_description,
                focus_keyword: seo.focus_keyword,
                og_image,
            },
        },
        status: draft.status,
        html_content: draft.content.clone(),
        content: draft.content,
        table_of_contents,
        related_posts: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blog::SocialLinks;
    use crate::errors::{ErrorKind, StructuredError};

    fn author() -> BlogAuthor {
        BlogAuthor {
            name: "Admin".to_string(),
            role: "Administrator".to_string(),
            bio: "Content creator".to_string(),
            avatar: "/images/team/default.jpg".to_string(),
            social: SocialLinks::default(),
        }
    }

    fn draft() -> BlogPostDraft {
        BlogPostDraft {
            title: "Shipping Rust Services".to_string(),
            slug: None,
            excerpt: "What we learned moving APIs to Rust.".to_string(),
            content: format!(
                "<h2>Why Rust</h2><p>{}</p><h3>Tooling</h3><p>cargo</p>",
                "Fast and reliable. ".repeat(6)
            ),
            category: "Technical Deep-Dives".to_string(),
            tags: vec!["Rust".to_string()],
            featured: false,
            featured_image: "/images/blog/rust.jpg".to_string(),
            featured_image_alt: "Rust logo".to_string(),
            read_time: Some(6),
            status: PostStatus::Published,
            seo: SeoDraft {
                meta_title: "Shipping Rust Services".to_string(),
                meta_description: "Lessons from production.".to_string(),
                focus_keyword: "rust services".to_string(),
                og_image: None,
            },
        }
    }

    fn fields(err: &AppError) -> Vec<String> {
        err.context()["fields"]
            .as_object()
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_valid_draft() {
        let now = Utc::now();
        let post = validate_post(draft(), author(), now).unwrap();

        assert_eq!(post.slug(), "shipping-rust-services");
        assert_eq!(post.meta.category, BlogCategory::TechnicalDeepDives);
        assert_eq!(post.meta.published_at, Some(now));
        assert_eq!(post.html_content, post.content);
        assert_eq!(post.table_of_contents.len(), 2);
        assert_eq!(post.table_of_contents[0].id, "why-rust");
        assert_eq!(post.table_of_contents[1].level, 3);
    }

    #[test]
    fn test_drafts_are_not_stamped() {
        let post = validate_post(
            BlogPostDraft {
                status: PostStatus::Draft,
                ..draft()
            },
            author(),
            Utc::now(),
        )
        .unwrap();
        assert!(post.meta.published_at.is_none());
    }

    #[test]
    fn test_explicit_slug_must_be_canonical() {
        let err = validate_post(
            BlogPostDraft {
                slug: Some("Not A Slug".to_string()),
                ..draft()
            },
            author(),
            Utc::now(),
        )
        .unwrap_err();
        assert_eq!(err.context()["fields"]["slug"][0], "Invalid slug format");
    }

    #[test]
    fn test_untitled_draft_has_no_slug() {
        let err = validate_post(
            BlogPostDraft {
                title: "???".to_string(),
                ..draft()
            },
            author(),
            Utc::now(),
        )
        .unwrap_err();
        assert_eq!(err.context()["fields"]["slug"][0], "Slug cannot be empty");
    }

    #[test]
    fn test_collects_every_problem() {
        let err = validate_post(BlogPostDraft::default(), author(), Utc::now()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let fields = fields(&err);
        for expected in ["title", "slug", "excerpt", "content", "category", "readTime", "featuredImage"] {
            assert!(fields.iter().any(|f| f == expected), "missing {}", expected);
        }
    }

    #[test]
    fn test_seo_limits() {
        let mut bad = draft();
        bad.seo.meta_title = "t".repeat(61);
        bad.seo.og_image = Some("ftp://example.com/x.png".to_string());
        bad.tags = (0..11).map(|i| format!("tag{}", i)).collect();

        let fields = fields(&validate_post(bad, author(), Utc::now()).unwrap_err());
        assert!(fields.contains(&"seo.metaTitle".to_string()));
        assert!(fields.contains(&"seo.ogImage".to_string()));
        assert!(fields.contains(&"tags".to_string()));
    }

    #[test]
    fn test_is_link() {
        assert!(is_link("https://example.com/a.jpg"));
        assert!(is_link("/images/a.jpg"));
        assert!(!is_link("//cdn.example.com/a.jpg"));
        assert!(!is_link("images/a.jpg"));
        assert!(!is_link("https://"));
    }
}
