//! Contact form
//!
//! Raw form input is validated and normalised into a
//! [`ContactSubmission`] before anything else touches it.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

use super::fields::FieldErrors;
use super::patterns;

/// Service the enquiry is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceType {
    Web,
    App,
    Seo,
    WebSeo,
    Full,
    Unsure,
}

impl ServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Web => "web",
            ServiceType::App => "app",
            ServiceType::Seo => "seo",
            ServiceType::WebSeo => "web-seo",
            ServiceType::Full => "full",
            ServiceType::Unsure => "unsure",
        }
    }
}

impl FromStr for ServiceType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "web" => Ok(ServiceType::Web),
            "app" => Ok(ServiceType::App),
            "seo" => Ok(ServiceType::Seo),
            "web-seo" => Ok(ServiceType::WebSeo),
            "full" => Ok(ServiceType::Full),
            "unsure" => Ok(ServiceType::Unsure),
            other => Err(AppError::validation("Invalid service selection").with_field("value", other)),
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Project budget band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetRange {
    #[serde(rename = "under-8k")]
    Under8k,
    #[serde(rename = "8k-15k")]
    From8kTo15k,
    #[serde(rename = "15k-30k")]
    From15kTo30k,
    #[serde(rename = "30k-50k")]
    From30kTo50k,
    #[serde(rename = "50k-plus")]
    Over50k,
    #[serde(rename = "unsure")]
    Unsure,
}

impl FromStr for BudgetRange {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "under-8k" => Ok(BudgetRange::Under8k),
            "8k-15k" => Ok(BudgetRange::From8kTo15k),
            "15k-30k" => Ok(BudgetRange::From15kTo30k),
            "30k-50k" => Ok(BudgetRange::From30kTo50k),
            "50k-plus" => Ok(BudgetRange::Over50k),
            "unsure" => Ok(BudgetRange::Unsure),
            other => Err(AppError::validation("Invalid budget range").with_field("value", other)),
        }
    }
}

/// Contact form exactly as submitted
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub service: String,
    pub budget: Option<String>,
    pub message: String,
    pub source: Option<String>,
    /// Honeypot, hidden from humans
    pub website: Option<String>,
}

/// A validated, normalised enquiry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub service: ServiceType,
    pub budget: Option<BudgetRange>,
    pub message: String,
    pub source: Option<String>,
    pub received_at: DateTime<Utc>,
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Trimmed optional text; blank counts as absent
fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Validate a submitted form
pub fn validate_contact(form: ContactForm) -> AppResult<ContactSubmission> {
    let mut errors = FieldErrors::new();

    let name = form.name.trim().to_string();
    if name.is_empty() {
        errors.add("name", "Name is required");
    } else {
        errors.ensure(char_len(&name) <= 100, "name", "Name must be under 100 characters");
        errors.ensure(
            patterns::person_name()?.is_match(&name),
            "name",
            "Name contains invalid characters",
        );
    }

    let email = form.email.trim().to_lowercase();
    if email.is_empty() {
        errors.add("email", "Email is required");
    } else {
        errors.ensure(patterns::email()?.is_match(&email), "email", "Invalid email address");
        errors.ensure(char_len(&email) <= 254, "email", "Email exceeds maximum length");
    }

    let phone = match optional(form.phone) {
        Some(raw) if patterns::us_phone()?.is_match(&raw) => {
            Some(raw.chars().filter(char::is_ascii_digit).collect())
        }
        Some(_) => {
            errors.add("phone", "Invalid phone number format");
            None
        }
        None => None,
    };

    let company = optional(form.company);
    if let Some(company) = &company {
        errors.ensure(
            char_len(company) <= 100,
            "company",
            "Company name must be under 100 characters",
        );
    }

    let service = if form.service.trim().is_empty() {
        errors.add("service", "Service is required");
        None
    } else {
        errors.capture("service", form.service.trim().parse::<ServiceType>())
    };

    let budget = match optional(form.budget) {
        Some(raw) => errors.capture("budget", raw.parse::<BudgetRange>()),
        None => None,
    };

    let message = form.message.trim().to_string();
    errors.ensure(
        char_len(&message) >= 10,
        "message",
        "Message must be at least 10 characters",
    );
    errors.ensure(
        char_len(&message) <= 2000,
        "message",
        "Message must be under 2000 characters",
    );

    let source = optional(form.source);
    if let Some(source) = &source {
        errors.ensure(char_len(source) <= 100, "source", "Source must be under 100 characters");
    }

    if form.website.as_deref().is_some_and(|w| !w.is_empty()) {
        errors.add("website", "Bot detected");
    }

    let service = errors.into_result(service)?;
    let service = service.ok_or_else(|| AppError::validation("Service is required"))?;

    Ok(ContactSubmission {
        id: Uuid::new_v4(),
        name,
        email,
        phone,
        company,
        service,
        budget,
        message,
        source,
        received_at: Utc::now(),
    })
}
