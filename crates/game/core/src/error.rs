//! Common error infrastructure for tactics-core.
//!
//! This module provides shared types and traits used across all error types in the crate.
//! Domain-specific errors (e.g., `MapError`, `PathError`) are defined in their
//! respective modules alongside the operations they validate.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each component has its own error type with specific variants
//! - **All-or-nothing**: An operation that returns an error has not mutated anything
//! - **Category Classification**: Errors are categorized so callers can tell a bad
//!   request apart from a stale reference or a sequencing bug
//! - **Deterministic**: There is no I/O in this crate, so nothing here is retryable

/// Category of an error, used to decide how a caller should react.
///
/// - **InvalidArgument**: the request itself is malformed (out-of-bounds position,
///   non-adjacent path point, occupied destination, inverted bounds)
/// - **NotFound**: the request refers to something that is no longer there
///   (a unit that is not on the map)
/// - **PreconditionViolation**: the caller sequenced operations incorrectly
///   (querying the position of an unplaced unit)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Malformed request; reject without retrying the same input.
    ///
    /// Examples: position out of bounds, cell occupied, detached path point
    InvalidArgument,

    /// Stale reference; the addressed entity is absent.
    ///
    /// Examples: removing a unit that was never placed on this map
    NotFound,

    /// Caller bug; the operation was invoked in a state where it is meaningless.
    ///
    /// Examples: asking an unplaced unit for its position.
    /// These are prevented by correct call sequencing, not recovered from.
    PreconditionViolation,
}

impl ErrorCategory {
    /// Returns a human-readable description of this category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidArgument => "invalid_argument",
            Self::NotFound => "not_found",
            Self::PreconditionViolation => "precondition_violation",
        }
    }

    /// Returns true if this error indicates a bug in the calling code.
    pub const fn is_caller_bug(&self) -> bool {
        matches!(self, Self::PreconditionViolation)
    }
}

/// Common trait for all tactics-core errors.
///
/// This trait provides a uniform interface for error classification across
/// all error types in the crate.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Wrapping errors delegate to the error they wrap
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the category of this error.
    fn category(&self) -> ErrorCategory;

    /// Returns a static string identifier for this error variant.
    ///
    /// This is useful for error categorization, log filtering, and testing.
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_precondition_violations_are_caller_bugs() {
        assert!(ErrorCategory::PreconditionViolation.is_caller_bug());
        assert!(!ErrorCategory::InvalidArgument.is_caller_bug());
        assert!(!ErrorCategory::NotFound.is_caller_bug());
    }

    #[test]
    fn category_names_are_snake_case() {
        assert_eq!(ErrorCategory::NotFound.as_str(), "not_found");
        assert_eq!(
            ErrorCategory::InvalidArgument.as_str(),
            "invalid_argument"
        );
    }
}
