// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Host-side error types.

use thiserror::Error;

// =============================================================================
// IdentityError
// =============================================================================

/// Errors raised while parsing identity text.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The text does not follow the `[svr=..;][nsu=..;][ns=..;]{i|s}=..` form.
    #[error("Invalid identity text '{text}': {reason}")]
    InvalidText {
        /// The offending input.
        text: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The identifier form exists on the wire but has no host representation.
    #[error("Identifier form '{form}' in '{text}' has no host representation")]
    UnsupportedForm {
        /// The offending input.
        text: String,
        /// The rejected form (`guid` or `opaque`).
        form: String,
    },
}

impl IdentityError {
    /// Creates an invalid-text error.
    pub fn invalid_text(text: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidText {
            text: text.into(),
            reason: reason.into(),
        }
    }

    /// Creates an unsupported-form error.
    pub fn unsupported_form(text: impl Into<String>, form: impl Into<String>) -> Self {
        Self::UnsupportedForm {
            text: text.into(),
            form: form.into(),
        }
    }

    /// Returns a user-friendly error message in Korean.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidText { text, .. } => {
                format!("노드 식별자 형식이 올바르지 않습니다: {}", text)
            }
            Self::UnsupportedForm { form, .. } => {
                format!("지원되지 않는 식별자 형식입니다: {}", form)
            }
        }
    }

    /// Logs this error with structured context.
    pub fn log(&self, context: &str) {
        tracing::warn!(
            error = %self,
            context = context,
            "Identity parse error"
        );
    }
}
