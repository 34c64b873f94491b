//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject empty/duplicate service names and zero thresholds
//! - Validate value ranges (timeouts > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function: BreakerSettings → Result<(), Vec<ValidationError>>
//! - Runs before settings are accepted into the system

use std::collections::HashSet;

use crate::config::schema::BreakerSettings;

/// A single semantic problem found in the settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate settings, collecting every problem found.
pub fn validate_settings(settings: &BreakerSettings) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (i, service) in settings.services.iter().enumerate() {
        let field = |name: &str| format!("services[{}].{}", i, name);

        if service.name.is_empty() {
            errors.push(ValidationError {
                field: field("name"),
                message: "service name must not be empty".to_string(),
            });
        } else if !seen.insert(service.name.clone()) {
            errors.push(ValidationError {
                field: field("name"),
                message: format!("duplicate service name '{}'", service.name),
            });
        }

        if service.failure_threshold == 0 {
            errors.push(ValidationError {
                field: field("failure_threshold"),
                message: "must be at least 1".to_string(),
            });
        }
        if service.success_threshold == 0 {
            errors.push(ValidationError {
                field: field("success_threshold"),
                message: "must be at least 1".to_string(),
            });
        }
        if service.timeout_ms == 0 {
            errors.push(ValidationError {
                field: field("timeout_ms"),
                message: "must be greater than 0".to_string(),
            });
        }
        if service.failure_window_ms == 0 {
            errors.push(ValidationError {
                field: field("failure_window_ms"),
                message: "must be greater than 0".to_string(),
            });
        }
        if service.recovery_timeout_ms == 0 {
            errors.push(ValidationError {
                field: field("recovery_timeout_ms"),
                message: "must be greater than 0".to_string(),
            });
        }
    }

    if settings.store.op_timeout_ms == 0 {
        errors.push(ValidationError {
            field: "store.op_timeout_ms".to_string(),
            message: "must be greater than 0".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
