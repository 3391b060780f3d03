// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Custom Test Assertions
//!
//! Domain-specific assertion helpers for CRIMP integration tests.
//!
//! ## Design Principles
//!
//! - Provide clear, informative failure messages
//! - Chain-able assertions for complex validations

use chrono::{DateTime, Utc};

use crimp_core::{DataRecord, DynamicValue, StatusCode};
use crimp_opcua::{NodeId, Variant, VariantTag};

// =============================================================================
// DataRecord Assertions
// =============================================================================

/// Assertion extensions for DataRecord.
pub trait DataRecordAssertions {
    /// Assert that the record carries the expected value.
    fn assert_value(&self, expected: &DynamicValue);

    /// Assert that the value is a float within a tolerance.
    fn assert_value_approx(&self, expected: f64, tolerance: f64);

    /// Assert that the record has good quality.
    fn assert_good(&self);

    /// Assert that the record carries a specific status.
    fn assert_status(&self, expected: StatusCode);

    /// Assert that no field is present.
    fn assert_empty(&self);

    /// Assert the source timestamp.
    fn assert_source_timestamp(&self, expected: DateTime<Utc>);
}

impl DataRecordAssertions for DataRecord {
    fn assert_value(&self, expected: &DynamicValue) {
        assert_eq!(
            self.value.as_ref(),
            Some(expected),
            "Expected value {:?}, but got {:?}",
            expected,
            self.value
        );
    }

    fn assert_value_approx(&self, expected: f64, tolerance: f64) {
        let actual = self
            .value
            .as_ref()
            .and_then(DynamicValue::as_f64)
            .unwrap_or_else(|| panic!("Expected a numeric value, but got {:?}", self.value));
        let diff = (actual - expected).abs();
        assert!(
            diff <= tolerance,
            "Expected value {} ± {}, but got {} (diff: {})",
            expected,
            tolerance,
            actual,
            diff
        );
    }

    fn assert_good(&self) {
        assert!(
            self.is_good(),
            "Expected good quality, but got {:?}",
            self.status
        );
    }

    fn assert_status(&self, expected: StatusCode) {
        assert_eq!(
            self.status,
            Some(expected),
            "Expected status {}, but got {:?}",
            expected,
            self.status
        );
    }

    fn assert_empty(&self) {
        assert!(self.is_empty(), "Expected an empty record, but got {:?}", self);
    }

    fn assert_source_timestamp(&self, expected: DateTime<Utc>) {
        assert_eq!(
            self.source_timestamp,
            Some(expected),
            "Expected source timestamp {}, but got {:?}",
            expected,
            self.source_timestamp
        );
    }
}

// =============================================================================
// Variant Assertions
// =============================================================================

/// Assertion extensions for Variant.
pub trait VariantAssertions {
    /// Assert the variant's type tag.
    fn assert_tag(&self, expected: VariantTag);

    /// Assert that the variant is null.
    fn assert_is_null(&self);

    /// Assert that the variant is an array of the given length.
    fn assert_array_len(&self, expected: usize);
}

impl VariantAssertions for Variant {
    fn assert_tag(&self, expected: VariantTag) {
        assert_eq!(
            self.tag(),
            Some(expected),
            "Expected tag {:?}, but got {:?} for {:?}",
            expected,
            self.tag(),
            self
        );
    }

    fn assert_is_null(&self) {
        assert!(
            matches!(self, Variant::Null),
            "Expected Null, but got {:?}",
            self
        );
    }

    fn assert_array_len(&self, expected: usize) {
        assert!(self.is_array(), "Expected an array, but got {:?}", self);
        assert_eq!(
            self.len(),
            expected,
            "Expected {} elements, but got {}",
            expected,
            self.len()
        );
    }
}

// =============================================================================
// NodeId Assertions
// =============================================================================

/// Assertion extensions for NodeId.
pub trait NodeIdAssertions {
    /// Assert the derived encoding flags byte.
    fn assert_encoding(&self, expected: u8);

    /// Assert the namespace index.
    fn assert_namespace(&self, expected: u16);
}

impl NodeIdAssertions for NodeId {
    fn assert_encoding(&self, expected: u8) {
        assert_eq!(
            self.encoding_byte(),
            expected,
            "Expected encoding byte 0x{:02X}, but got 0x{:02X} for {}",
            expected,
            self.encoding_byte(),
            self
        );
    }

    fn assert_namespace(&self, expected: u16) {
        assert_eq!(
            self.namespace, expected,
            "Expected namespace {}, but got {} for {}",
            expected, self.namespace, self
        );
    }
}

// =============================================================================
// Result Assertions
// =============================================================================

/// Assertion helper for Results.
pub trait ResultAssertions<T, E> {
    /// Assert that the result is Ok and return the value.
    fn assert_ok(self) -> T;

    /// Assert that the result is Err.
    fn assert_err(self) -> E;
}

impl<T: std::fmt::Debug, E: std::fmt::Debug> ResultAssertions<T, E> for Result<T, E> {
    fn assert_ok(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, but got Err: {:?}", e),
        }
    }

    fn assert_err(self) -> E {
        match self {
            Ok(v) => panic!("Expected Err, but got Ok: {:?}", v),
            Err(e) => e,
        }
    }
}
