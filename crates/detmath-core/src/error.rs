// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error taxonomy shared by every fallible math operation.

use thiserror::Error;
use tracing::debug;

/// Failure raised at the point of an offending math operation.
///
/// None of the operations in this crate recover internally: a failing
/// operation never substitutes zero or identity for its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MathError {
    /// Division with a zero divisor.
    #[error("division by zero")]
    DivideByZero,
    /// Input outside the mathematical domain of the operation.
    #[error("{op}: domain error: {reason}")]
    DomainError {
        /// Operation that rejected its input.
        op: &'static str,
        /// Short description of the violated precondition.
        reason: &'static str,
    },
    /// Operation is undefined for this value (e.g. a singular matrix).
    #[error("{op}: invalid operation: {reason}")]
    InvalidOperation {
        /// Operation that rejected its input.
        op: &'static str,
        /// Short description of the violated precondition.
        reason: &'static str,
    },
}

impl MathError {
    /// Builds [`MathError::DivideByZero`], recording the dividend's raw value.
    pub fn divide_by_zero(op: &'static str, dividend_raw: i128) -> Self {
        debug!(op, dividend = %dividend_raw, "division by zero");
        Self::DivideByZero
    }

    /// Builds [`MathError::DomainError`], recording the rejected raw value.
    pub fn domain(op: &'static str, reason: &'static str, raw: i128) -> Self {
        debug!(op, reason, raw = %raw, "domain error");
        Self::DomainError { op, reason }
    }

    /// Builds [`MathError::InvalidOperation`].
    pub fn invalid_operation(op: &'static str, reason: &'static str) -> Self {
        debug!(op, reason, "invalid operation");
        Self::InvalidOperation { op, reason }
    }
}
