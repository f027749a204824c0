// Copyright 2024-2026 PkgRev-Hooks Contributors
// SPDX-License-Identifier: Apache-2.0

//! Validation functions for orchestration object fields.
//!
//! Rejects names the platform would refuse and image references carrying
//! shell metacharacters.

use thiserror::Error;

/// Maximum allowed length for a DNS-1123 subdomain name.
pub const MAX_NAME_LENGTH: usize = 253;

/// Maximum allowed length for a DNS-1123 label such as a namespace.
pub const MAX_LABEL_LENGTH: usize = 63;

/// Maximum allowed length for an image reference.
const MAX_IMAGE_LENGTH: usize = 512;

/// Validation error types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Name is not a valid DNS-1123 subdomain.
    #[error("invalid name for {field}: {reason}")]
    InvalidName { field: String, reason: String },
    /// Image reference is invalid.
    #[error("invalid image reference: {0}")]
    InvalidImage(String),
    /// Field exceeds maximum length.
    #[error("field '{field}' exceeds maximum length of {max}")]
    MaxLengthExceeded { field: String, max: usize },
    /// Field is empty but required.
    #[error("field '{0}' cannot be empty")]
    EmptyField(String),
}

/// Validate an object name as a DNS-1123 subdomain.
///
/// Lowercase alphanumerics, `-` and `.`. Each `.`-separated label starts
/// and ends with an alphanumeric character.
pub fn validate_name(name: &str, field_name: &str) -> Result<(), ValidationError> {
    validate_dns_label(name, field_name, MAX_NAME_LENGTH, true)
}

/// Validate a namespace as a DNS-1123 label (at most 63 characters, no dots).
pub fn validate_namespace(value: &str, field_name: &str) -> Result<(), ValidationError> {
    validate_dns_label(value, field_name, MAX_LABEL_LENGTH, false)
}

fn validate_dns_label(
    value: &str,
    field_name: &str,
    max: usize,
    allow_dots: bool,
) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::EmptyField(field_name.to_string()));
    }

    if value.len() > max {
        return Err(ValidationError::MaxLengthExceeded {
            field: field_name.to_string(),
            max,
        });
    }

    let invalid = |reason: &str| ValidationError::InvalidName {
        field: field_name.to_string(),
        reason: reason.to_string(),
    };

    let valid_char =
        |c: char| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || (allow_dots && c == '.');
    if !value.chars().all(valid_char) {
        return Err(invalid(
            "must contain only lowercase alphanumeric characters, '-' or '.'",
        ));
    }

    // Every dot-separated label must start and end with an alphanumeric.
    let alnum = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit();
    let label_ok = |label: &str| {
        label.chars().next().is_some_and(alnum) && label.chars().last().is_some_and(alnum)
    };
    if !value.split('.').all(label_ok) {
        return Err(invalid("must start and end with an alphanumeric character"));
    }

    Ok(())
}

/// Validate a container image reference.
///
/// Rejects shell metacharacters and invalid name formats.
pub fn validate_image(image: &str) -> Result<(), ValidationError> {
    if image.is_empty() {
        return Err(ValidationError::EmptyField("image".to_string()));
    }

    if image.len() > MAX_IMAGE_LENGTH {
        return Err(ValidationError::MaxLengthExceeded {
            field: "image".to_string(),
            max: MAX_IMAGE_LENGTH,
        });
    }

    let forbidden_chars = [
        ';', '&', '|', '`', '$', '(', ')', '{', '}', '<', '>', ' ', '\n', '\r', '\0',
    ];
    for ch in forbidden_chars {
        if image.contains(ch) {
            return Err(ValidationError::InvalidImage(format!(
                "contains forbidden character: {:?}",
                ch
            )));
        }
    }

    let name_part = image.rsplit_once(':').map_or(image, |(name, _)| name);
    if name_part.starts_with('-') || name_part.starts_with('.') {
        return Err(ValidationError::InvalidImage(
            "name cannot start with dash or dot".to_string(),
        ));
    }

    Ok(())
}
