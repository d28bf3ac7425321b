//! # Validation
//!
//! Every piece of user input passes through here before it is used.
//! Validators return [`AppResult`](crate::errors::AppResult); multi-field
//! forms report all problems at once in the error's `fields` context.

pub mod blog;
pub mod contact;
pub mod fields;
pub(crate) mod patterns;
pub mod slug;

pub use blog::{validate_post, BlogPostDraft, SeoDraft};
pub use contact::{validate_contact, BudgetRange, ContactForm, ContactSubmission, ServiceType};
pub use fields::{FieldErrors, VALIDATION_FAILED};
pub use slug::{check_slug, parse_slug, MAX_SLUG_LEN};
