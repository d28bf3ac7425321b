//! Blog content model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Blog post category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlogCategory {
    #[serde(rename = "Web Development")]
    WebDevelopment,
    #[serde(rename = "App Development")]
    AppDevelopment,
    #[serde(rename = "SEO & Growth")]
    SeoAndGrowth,
    #[serde(rename = "Case Studies")]
    CaseStudies,
    #[serde(rename = "Industry Insights")]
    IndustryInsights,
    #[serde(rename = "Technical Deep-Dives")]
    TechnicalDeepDives,
}

impl BlogCategory {
    /// Every category
    pub const ALL: [BlogCategory; 6] = [
        BlogCategory::WebDevelopment,
        BlogCategory::AppDevelopment,
        BlogCategory::SeoAndGrowth,
        BlogCategory::CaseStudies,
        BlogCategory::IndustryInsights,
        BlogCategory::TechnicalDeepDives,
    ];

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            BlogCategory::WebDevelopment => "Web Development",
            BlogCategory::AppDevelopment => "App Development",
            BlogCategory::SeoAndGrowth => "SEO & Growth",
            BlogCategory::CaseStudies => "Case Studies",
            BlogCategory::IndustryInsights => "Industry Insights",
            BlogCategory::TechnicalDeepDives => "Technical Deep-Dives",
        }
    }
}

impl fmt::Display for BlogCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BlogCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| AppError::validation(format!("Unknown category: {}", s)))
    }
}

/// Publication state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

/// Author social links
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

/// Post author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogAuthor {
    pub name: String,
    pub role: String,
    pub bio: String,
    pub avatar: String,
    #[serde(default)]
    pub social: SocialLinks,
}

/// Search metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoMeta {
    pub meta_title: String,
    pub meta_description: String,
    pub focus_keyword: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
}

/// Table of contents entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    pub id: String,
    pub text: String,
    /// Heading level, 2 or 3
    pub level: u8,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TocEntry>,
}

impl TocEntry {
    /// Entry without children
    pub fn new(id: impl Into<String>, text: impl Into<String>, level: u8) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            level,
            children: Vec::new(),
        }
    }
}

/// Post metadata, as shown in listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostMeta {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub category: BlogCategory,
    pub author: BlogAuthor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    pub read_time: u32,
    #[serde(default)]
    pub featured: bool,
    pub featured_image: String,
    pub featured_image_alt: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub seo: SeoMeta,
}

/// Complete post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    #[serde(flatten)]
    pub meta: BlogPostMeta,
    #[serde(default)]
    pub status: PostStatus,
    pub content: String,
    #[serde(default)]
    pub html_content: String,
    #[serde(default)]
    pub table_of_contents: Vec<TocEntry>,
    #[serde(default)]
    pub related_posts: Vec<BlogPostMeta>,
}

impl BlogPost {
    /// URL slug
    pub fn slug(&self) -> &str {
        &self.meta.slug
    }

    /// Whether the post is publicly visible
    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }
}
