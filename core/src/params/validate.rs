//! Identifier and label validation rules.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::ParamError;

/// Label keys reserved for system bookkeeping. User-supplied labels must not
/// shadow them or downstream backends could no longer trust their own
/// tracking labels.
pub const RESERVED_LABELS: [&str; 5] =
    ["job-name", "job-id", "task-id", "user-id", "jobsub-version"];

// Cached validation regexes (compiled once, reused forever)
static NAME_REGEX: OnceLock<Regex> = OnceLock::new();
static LABEL_REGEX: OnceLock<Regex> = OnceLock::new();

fn name_regex() -> &'static Regex {
    NAME_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").expect("NAME_REGEX is valid")
    })
}

fn label_regex() -> &'static Regex {
    LABEL_REGEX
        .get_or_init(|| Regex::new(r"^[a-z]([-_a-z0-9]*)?$").expect("LABEL_REGEX is valid"))
}

/// Validate that a name follows POSIX conventions for shell variable names:
/// underscores, digits, and alphabetics only, not starting with a digit.
pub fn validate_name(name: &str, kind: &'static str) -> Result<(), ParamError> {
    if name_regex().is_match(name) {
        return Ok(());
    }
    Err(ParamError::InvalidName {
        kind,
        name: name.to_string(),
    })
}

/// Validate a label key/value pair.
///
/// Keys and non-empty values must each be 1-63 characters, start with a
/// lowercase letter, and contain only lowercase letters, digits, underscores,
/// and dashes. Reserved keys are rejected unless the caller opted in.
pub fn validate_label(
    name: &str,
    value: Option<&str>,
    allow_reserved: bool,
) -> Result<(), ParamError> {
    check_label_rule(name, "name")?;

    // The value may be empty; if not, it follows the same rules as the name.
    if let Some(value) = value {
        if !value.is_empty() {
            check_label_rule(value, "value")?;
        }
    }

    if !allow_reserved && RESERVED_LABELS.contains(&name) {
        return Err(ParamError::InvalidLabel(format!(
            "label ({name}=...) must not use reserved keys: {RESERVED_LABELS:?}"
        )));
    }

    Ok(())
}

fn check_label_rule(value: &str, kind: &str) -> Result<(), ParamError> {
    let length = value.chars().count();
    if !(1..=63).contains(&length) {
        return Err(ParamError::InvalidLabel(format!(
            "label {kind} must be 1-63 characters long: \"{value}\""
        )));
    }
    if !label_regex().is_match(value) {
        return Err(ParamError::InvalidLabel(format!(
            "invalid {kind} for label: \"{value}\" (must start with a lowercase letter and \
             contain only lowercase letters, digits, underscores, and dashes)"
        )));
    }
    Ok(())
}
