// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Marshalling error types.
//!
//! Every failure the codecs can produce is a [`ConversionError`]. Errors are
//! deterministic: the same input always fails the same way, so none of them
//! are worth retrying. Each error carries a structured code for dashboards,
//! a severity that picks the tracing level, and recovery hints for
//! operators.
//!
//! # Examples
//!
//! ```
//! use crimp_opcua::error::ConversionError;
//!
//! let err = ConversionError::unsupported_value_type("seq of seq");
//! assert_eq!(err.error_code().to_string(), "UA-0101");
//! err.log("encode");
//! ```

use std::fmt;

use thiserror::Error;
use tracing::Level;

/// Convenient result alias for marshalling operations.
pub type ConversionResult<T> = Result<T, ConversionError>;

// =============================================================================
// ConversionError
// =============================================================================

/// Errors raised while translating between host values and wire structures.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// The host value kind has no wire representation.
    #[error("Cannot encode host value: unsupported kind '{kind}'")]
    UnsupportedValueType {
        /// Kind name of the offending value.
        kind: String,
    },

    /// A sequence leads with an element kind that cannot pick a wire tag.
    #[error("Cannot encode sequence: unsupported element kind '{kind}'")]
    UnsupportedElementType {
        /// Kind name of the offending first element.
        kind: String,
    },

    /// A node ID uses an identifier form the host model cannot carry.
    #[error("Unsupported node identifier encoding 0x{encoding:02X} ({kind}) for {node}")]
    UnsupportedIdentityEncoding {
        /// The flags byte of the offending node ID.
        encoding: u8,
        /// Identifier kind name (`guid` or `opaque`).
        kind: String,
        /// Text form of the offending node ID.
        node: String,
    },

    /// A sequence mixes element kinds after the first element fixed the tag.
    #[error("Mixed sequence: element {index} is '{actual}', expected '{expected}'")]
    MixedSequenceKind {
        /// Kind the first element selected.
        expected: String,
        /// Kind actually found.
        actual: String,
        /// Position of the offending element.
        index: usize,
    },

    /// A numeric value does not fit the selected wire type.
    #[error("Value {value} is out of range for {target}")]
    ValueOutOfRange {
        /// The offending value, formatted.
        value: String,
        /// The wire type that could not hold it.
        target: String,
    },
}

impl ConversionError {
    // =========================================================================
    // Factory methods
    // =========================================================================

    /// Creates an unsupported-value-type error.
    pub fn unsupported_value_type(kind: impl Into<String>) -> Self {
        Self::UnsupportedValueType { kind: kind.into() }
    }

    /// Creates an unsupported-element-type error.
    pub fn unsupported_element_type(kind: impl Into<String>) -> Self {
        Self::UnsupportedElementType { kind: kind.into() }
    }

    /// Creates an unsupported-identity-encoding error.
    pub fn unsupported_identity_encoding(
        encoding: u8,
        kind: impl Into<String>,
        node: impl Into<String>,
    ) -> Self {
        Self::UnsupportedIdentityEncoding {
            encoding,
            kind: kind.into(),
            node: node.into(),
        }
    }

    /// Creates a mixed-sequence error.
    pub fn mixed_sequence_kind(
        expected: impl Into<String>,
        actual: impl Into<String>,
        index: usize,
    ) -> Self {
        Self::MixedSequenceKind {
            expected: expected.into(),
            actual: actual.into(),
            index,
        }
    }

    /// Creates a value-out-of-range error.
    pub fn value_out_of_range(value: impl fmt::Display, target: impl Into<String>) -> Self {
        Self::ValueOutOfRange {
            value: value.to_string(),
            target: target.into(),
        }
    }

    // =========================================================================
    // Classification
    // =========================================================================

    /// Returns the error category name.
    pub const fn category(&self) -> &'static str {
        "conversion"
    }

    /// Returns the structured error code.
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::UnsupportedValueType { .. } => ErrorCode::new(1, 1),
            Self::UnsupportedElementType { .. } => ErrorCode::new(1, 2),
            Self::UnsupportedIdentityEncoding { .. } => ErrorCode::new(1, 3),
            Self::MixedSequenceKind { .. } => ErrorCode::new(1, 4),
            Self::ValueOutOfRange { .. } => ErrorCode::new(1, 5),
        }
    }

    /// Returns the error severity.
    pub const fn severity(&self) -> ErrorSeverity {
        match self {
            // Wire data we cannot represent is more alarming than host
            // values we refuse to send.
            Self::UnsupportedIdentityEncoding { .. } => ErrorSeverity::Error,
            Self::UnsupportedValueType { .. }
            | Self::UnsupportedElementType { .. }
            | Self::MixedSequenceKind { .. }
            | Self::ValueOutOfRange { .. } => ErrorSeverity::Warning,
        }
    }

    /// Returns recovery hints for operators.
    pub fn recovery_hints(&self) -> Vec<&'static str> {
        match self {
            Self::UnsupportedValueType { .. } => vec![
                "Check which value kinds the wire layer supports",
                "Flatten nested structures before encoding",
            ],
            Self::UnsupportedElementType { .. } => vec![
                "Sequences must start with a bool, int, float, string or identity",
                "Nested sequences are not supported",
            ],
            Self::UnsupportedIdentityEncoding { .. } => vec![
                "GUID and opaque node identifiers have no host representation",
                "Re-address the node with a numeric or string identifier",
            ],
            Self::MixedSequenceKind { .. } => vec![
                "All sequence elements must share the kind of the first element",
                "Integers are accepted in float sequences; the reverse is not",
            ],
            Self::ValueOutOfRange { .. } => vec![
                "Check the value against the range of the target wire type",
                "Use a float value when the magnitude exceeds 32-bit integers",
            ],
        }
    }

    /// Returns a user-friendly error message in Korean.
    pub fn user_message(&self) -> String {
        match self {
            Self::UnsupportedValueType { kind } => {
                format!("지원되지 않는 값 타입입니다: {}", kind)
            }
            Self::UnsupportedElementType { kind } => {
                format!("시퀀스에 사용할 수 없는 요소 타입입니다: {}", kind)
            }
            Self::UnsupportedIdentityEncoding { kind, .. } => {
                format!("지원되지 않는 노드 식별자 인코딩입니다: {}", kind)
            }
            Self::MixedSequenceKind { index, .. } => {
                format!("시퀀스 요소 타입이 일치하지 않습니다 (위치: {})", index)
            }
            Self::ValueOutOfRange { target, .. } => {
                format!("값이 허용 범위를 벗어났습니다: {}", target)
            }
        }
    }

    /// Returns the appropriate tracing level.
    pub fn tracing_level(&self) -> Level {
        self.severity().to_tracing_level()
    }

    /// Logs this error with appropriate level and context.
    pub fn log(&self, context: &str) {
        let code = self.error_code();

        match self.tracing_level() {
            Level::ERROR => tracing::error!(
                error_code = %code,
                category = self.category(),
                context = context,
                "{self}"
            ),
            Level::WARN => tracing::warn!(
                error_code = %code,
                category = self.category(),
                context = context,
                "{self}"
            ),
            _ => tracing::debug!(
                error_code = %code,
                category = self.category(),
                context = context,
                "{self}"
            ),
        }
    }
}

// =============================================================================
// ErrorSeverity
// =============================================================================

/// Error severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Informational - no action required.
    Info,
    /// Warning - action may be required.
    Warning,
    /// Error - action required, but recoverable.
    Error,
    /// Critical - immediate action required.
    Critical,
}

impl ErrorSeverity {
    /// Converts to tracing level.
    pub fn to_tracing_level(self) -> Level {
        match self {
            Self::Info => Level::INFO,
            Self::Warning => Level::WARN,
            Self::Error => Level::ERROR,
            Self::Critical => Level::ERROR,
        }
    }

    /// Returns the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// ErrorCode
// =============================================================================

/// Structured error code for categorization.
///
/// Formatted as `UA-<category><code>` in hex, e.g. `UA-0103`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode {
    /// Category digit.
    pub category: u8,
    /// Specific error within the category.
    pub code: u8,
}

impl ErrorCode {
    /// Creates a new error code.
    pub const fn new(category: u8, code: u8) -> Self {
        Self { category, code }
    }

    /// Returns the full error code as a u16.
    pub fn as_u16(&self) -> u16 {
        ((self.category as u16) << 8) | (self.code as u16)
    }

    /// Creates from a u16.
    pub fn from_u16(value: u16) -> Self {
        Self {
            category: (value >> 8) as u8,
            code: (value & 0xFF) as u8,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UA-{:02X}{:02X}", self.category, self.code)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ConversionError::unsupported_value_type("seq");
        assert!(err.to_string().contains("seq"));

        let err = ConversionError::mixed_sequence_kind("int", "string", 2);
        assert!(err.to_string().contains("element 2"));
        assert!(err.to_string().contains("'string'"));
        assert!(err.to_string().contains("'int'"));

        let err = ConversionError::unsupported_identity_encoding(0x04, "guid", "ns=2;g=...");
        assert!(err.to_string().contains("0x04"));
        assert!(err.to_string().contains("guid"));
    }

    #[test]
    fn test_error_codes_unique() {
        let errors = [
            ConversionError::unsupported_value_type("x"),
            ConversionError::unsupported_element_type("x"),
            ConversionError::unsupported_identity_encoding(4, "guid", "n"),
            ConversionError::mixed_sequence_kind("a", "b", 0),
            ConversionError::value_out_of_range(1, "t"),
        ];
        let mut codes: Vec<u16> = errors.iter().map(|e| e.error_code().as_u16()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_error_code_format() {
        let code = ErrorCode::new(1, 3);
        assert_eq!(code.to_string(), "UA-0103");
        assert_eq!(ErrorCode::from_u16(code.as_u16()), code);
    }

    #[test]
    fn test_severity_levels() {
        let guid = ConversionError::unsupported_identity_encoding(4, "guid", "n");
        assert_eq!(guid.severity(), ErrorSeverity::Error);
        assert_eq!(guid.tracing_level(), Level::ERROR);

        let range = ConversionError::value_out_of_range(u64::MAX, "int");
        assert_eq!(range.severity(), ErrorSeverity::Warning);
    }

    #[test]
    fn test_user_messages_not_empty() {
        let errors = [
            ConversionError::unsupported_value_type("x"),
            ConversionError::unsupported_element_type("x"),
            ConversionError::unsupported_identity_encoding(4, "guid", "n"),
            ConversionError::mixed_sequence_kind("a", "b", 0),
            ConversionError::value_out_of_range(1, "t"),
        ];
        for err in errors {
            assert!(!err.user_message().is_empty());
            assert!(!err.recovery_hints().is_empty());
        }
    }
}
