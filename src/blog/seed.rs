//! Posts the store starts with

use chrono::{TimeZone, Utc};

use super::post::{
    BlogAuthor, BlogCategory, BlogPost, BlogPostMeta, PostStatus, SeoMeta, SocialLinks, TocEntry,
};

const SVELTEKIT_VS_WORDPRESS: &str = "\
# The WordPress Problem

WordPress powers a large share of the web, and a larger share of compromised sites.

## Performance: The Hidden Tax

- Dozens of database queries per page load
- Megabytes of render-blocking scripts
**Result:** multi-second load times.

## Security: The WordPress Vulnerability Crisis

Every plugin is another maintainer, another release schedule and another attack surface.

## Cost of Ownership

Hosting, premium plugins and maintenance add up every single year.

# The Bottom Line

Modern frameworks deliver faster pages, fewer incidents and lower running costs.";

fn author(name: &str, role: &str, bio: &str, avatar: &str) -> BlogAuthor {
    BlogAuthor {
        name: name.to_string(),
        role: role.to_string(),
        bio: bio.to_string(),
        avatar: avatar.to_string(),
        social: SocialLinks::default(),
    }
}

fn related(
    title: &str,
    slug: &str,
    category: BlogCategory,
    author: BlogAuthor,
    (year, month, day): (i32, u32, u32),
    read_time: u32,
) -> BlogPostMeta {
    BlogPostMeta {
        title: title.to_string(),
        slug: slug.to_string(),
        excerpt: format!("{}: what we learned shipping it for clients.", title),
        category,
        author,
        published_at: Utc.with_ymd_and_hms(year, month, day, 10, 0, 0).single(),
        updated_at: None,
        read_time,
        featured: false,
        featured_image: format!("/images/blog/{}.jpg", slug),
        featured_image_alt: title.to_string(),
        tags: Vec::new(),
        seo: SeoMeta {
            meta_title: title.chars().take(60).collect(),
            meta_description: format!("{} explained.", title),
            focus_keyword: title.to_lowercase().chars().take(50).collect(),
            og_image: None,
        },
    }
}

/// The launch post and its related entries
pub fn seed_posts() -> Vec<BlogPost> {
    let alex = BlogAuthor {
        social: SocialLinks {
            twitter: Some("https://twitter.com/alexrivera".to_string()),
            linkedin: Some("https://linkedin.com/in/alexrivera".to_string()),
            github: Some("https://github.com/alexrivera".to_string()),
        },
        ..author(
            "Alex Rivera",
            "Founder & Lead Engineer",
            "Full-stack engineer building production applications.",
            "/images/team/alex.jpg",
        )
    };

    let meta = BlogPostMeta {
        title: "Why Your Next Website Should Be Built on SvelteKit, Not WordPress".to_string(),
        slug: "sveltekit-vs-wordpress".to_string(),
        excerpt: "Modern frameworks deliver better performance, security and ROI for serious businesses."
            .to_string(),
        category: BlogCategory::WebDevelopment,
        author: alex.clone(),
        published_at: Utc.with_ymd_and_hms(2025, 1, 15, 10, 0, 0).single(),
        updated_at: None,
        read_time: 8,
        featured: true,
        featured_image: "/images/blog/sveltekit-vs-wordpress.jpg".to_string(),
        featured_image_alt: "SvelteKit vs WordPress comparison".to_string(),
        tags: vec![
            "SvelteKit".to_string(),
            "WordPress".to_string(),
            "Performance".to_string(),
            "Security".to_string(),
        ],
        seo: SeoMeta {
            meta_title: "SvelteKit vs WordPress: Why Modern Frameworks Win".to_string(),
            meta_description: "Learn why SvelteKit delivers better performance, security, and ROI."
                .to_string(),
            focus_keyword: "SvelteKit vs WordPress".to_string(),
            og_image: Some("/images/blog/sveltekit-vs-wordpress-og.jpg".to_string()),
        },
    };

    let table_of_contents = vec![
        TocEntry::new("the-wordpress-problem", "The WordPress Problem", 2),
        TocEntry::new("performance-the-hidden-tax", "Performance: The Hidden Tax", 2),
        TocEntry::new(
            "security-the-wordpress-vulnerability-crisis",
            "Security: The WordPress Vulnerability Crisis",
            2,
        ),
        TocEntry::new("cost-of-ownership", "Cost of Ownership", 2),
        TocEntry::new("the-bottom-line", "The Bottom Line", 2),
    ];

    let related_posts = vec![
        related(
            "Technical SEO Checklist",
            "technical-seo-checklist-2025",
            BlogCategory::SeoAndGrowth,
            author(
                "Jennifer Park",
                "SEO Strategist",
                "SEO specialist focused on technical optimization.",
                "/images/team/jennifer.jpg",
            ),
            (2025, 1, 28),
            15,
        ),
        related(
            "TypeScript Strict Mode: Why We Mandate It",
            "typescript-strict-mode",
            BlogCategory::TechnicalDeepDives,
            alex,
            (2024, 12, 28),
            9,
        ),
        related(
            "Headless CMS: The End of WordPress?",
            "headless-cms-guide",
            BlogCategory::WebDevelopment,
            author(
                "Marcus Chen",
                "Backend Architect",
                "Backend specialist focused on scalable architecture.",
                "/images/team/marcus.jpg",
            ),
            (2024, 12, 18),
            11,
        ),
    ];

    vec![BlogPost {
        meta,
        status: PostStatus::Published,
        content: SVELTEKIT_VS_WORDPRESS.to_string(),
        html_content: String::new(),
        table_of_contents,
        related_posts,
    }]
}
