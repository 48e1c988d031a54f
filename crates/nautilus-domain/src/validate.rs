//! Garde validation utilities.

use crate::error::{DomainError, DomainResult};
use garde::{Report, Validate};
use std::collections::HashMap;

/// Convert a garde validation report to `DomainError::Validation`
pub fn validate_struct<T>(value: &T) -> DomainResult<()>
where
    T: Validate,
    T::Context: Default,
{
    value
        .validate()
        .map_err(|report| DomainError::Validation(format_validation_errors(&report)))
}

/// Format validation errors from a garde Report into a human-readable string
fn format_validation_errors(report: &Report) -> String {
    report
        .iter()
        .map(|(path, error)| {
            if path.to_string().is_empty() {
                error.message().to_string()
            } else {
                format!("{}: {}", path, error.message())
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Nested numeric sub-objects carry exactly a fixed set of axis labels.
fn require_axes(value: &HashMap<String, f64>, expected: &[&str]) -> garde::Result {
    for axis in expected {
        if !value.contains_key(*axis) {
            return Err(garde::Error::new(format!("missing `{axis}` component")));
        }
    }
    if let Some(extra) = value.keys().find(|k| !expected.contains(&k.as_str())) {
        return Err(garde::Error::new(format!("unknown `{extra}` component")));
    }
    Ok(())
}

pub(crate) fn cartesian_axes(value: &HashMap<String, f64>, _ctx: &()) -> garde::Result {
    require_axes(value, &["x", "y", "z"])
}

pub(crate) fn orientation_axes(value: &HashMap<String, f64>, _ctx: &()) -> garde::Result {
    require_axes(value, &["roll", "pitch", "yaw"])
}

pub(crate) fn location_axes(value: &HashMap<String, f64>, _ctx: &()) -> garde::Result {
    require_axes(value, &["lat", "lon", "depth"])
}
