// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Test Builders
//!
//! Builder patterns for constructing complex test objects with sensible defaults.
//!
//! ## Design Principles
//!
//! - Sensible defaults for common test scenarios
//! - Chainable methods for fluent API
//! - Clear separation between required and optional fields

use chrono::{DateTime, Utc};

use crimp_core::{AttributeId, DataRecord, DynamicValue, Identity, StatusCode, WriteRequest};
use crimp_opcua::{DataValue, DataValueMask, Variant};

// =============================================================================
// WriteRequest Builder
// =============================================================================

/// Builder for constructing WriteRequest instances with sensible defaults.
#[derive(Debug, Clone)]
pub struct WriteRequestBuilder {
    target: Option<Identity>,
    attribute: AttributeId,
    index_range: Option<String>,
    record: DataRecord,
}

impl Default for WriteRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WriteRequestBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            target: None,
            attribute: AttributeId::Value,
            index_range: None,
            record: DataRecord::new(),
        }
    }

    /// Set the target identity.
    pub fn target(mut self, target: Identity) -> Self {
        self.target = Some(target);
        self
    }

    /// Set the attribute.
    pub fn attribute(mut self, attribute: AttributeId) -> Self {
        self.attribute = attribute;
        self
    }

    /// Set the index range.
    pub fn index_range(mut self, range: impl Into<String>) -> Self {
        self.index_range = Some(range.into());
        self
    }

    /// Set the record.
    pub fn record(mut self, record: DataRecord) -> Self {
        self.record = record;
        self
    }

    /// Set a float value on the record.
    pub fn float_value(mut self, v: f64) -> Self {
        self.record.value = Some(DynamicValue::Float(v));
        self
    }

    /// Set an integer value on the record.
    pub fn int_value(mut self, v: i64) -> Self {
        self.record.value = Some(DynamicValue::Int(v));
        self
    }

    /// Set a boolean value on the record.
    pub fn bool_value(mut self, v: bool) -> Self {
        self.record.value = Some(DynamicValue::Bool(v));
        self
    }

    /// Set the status on the record.
    pub fn status(mut self, status: StatusCode) -> Self {
        self.record.status = Some(status);
        self
    }

    /// Set the source timestamp on the record.
    pub fn source_timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.record.source_timestamp = Some(at);
        self
    }

    /// Build the WriteRequest.
    ///
    /// # Panics
    /// Panics if the target is not set.
    pub fn build(self) -> WriteRequest {
        let target = self.target.expect("target is required");
        let mut req = WriteRequest::new(target, self.attribute, self.record);
        req.index_range = self.index_range;
        req
    }

    /// Try to build, returning None if the target is missing.
    pub fn try_build(self) -> Option<WriteRequest> {
        let target = self.target?;
        let mut req = WriteRequest::new(target, self.attribute, self.record);
        req.index_range = self.index_range;
        Some(req)
    }
}

// =============================================================================
// DataValue Builder
// =============================================================================

/// Builder for constructing wire DataValue instances.
///
/// Setting a field also sets its presence bit, mimicking what a server
/// produces. Use [`DataValueBuilder::mask`] to override the mask when a
/// test needs a deliberately inconsistent wire value.
#[derive(Debug, Clone, Default)]
pub struct DataValueBuilder {
    value: DataValue,
}

impl DataValueBuilder {
    /// Create a builder for an empty DataValue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the variant payload.
    pub fn variant(mut self, variant: Variant) -> Self {
        self.value.value = variant;
        self.value.mask |= DataValueMask::VALUE;
        self
    }

    /// Set a Double payload.
    pub fn double(self, v: f64) -> Self {
        self.variant(Variant::Double(v))
    }

    /// Set an Int32 payload.
    pub fn int32(self, v: i32) -> Self {
        self.variant(Variant::Int32(v))
    }

    /// Set a Boolean payload.
    pub fn boolean(self, v: bool) -> Self {
        self.variant(Variant::Boolean(v))
    }

    /// Set the status code.
    pub fn status(mut self, status: StatusCode) -> Self {
        self.value.status = status;
        self.value.mask |= DataValueMask::STATUS_CODE;
        self
    }

    /// Set the source timestamp in ticks.
    pub fn source_ticks(mut self, ticks: u64) -> Self {
        self.value.source_timestamp = ticks;
        self.value.mask |= DataValueMask::SOURCE_TIMESTAMP;
        self
    }

    /// Set the server timestamp in ticks.
    pub fn server_ticks(mut self, ticks: u64) -> Self {
        self.value.server_timestamp = ticks;
        self.value.mask |= DataValueMask::SERVER_TIMESTAMP;
        self
    }

    /// Set the source picoseconds.
    pub fn source_picoseconds(mut self, picos: u16) -> Self {
        self.value.source_picoseconds = picos;
        self.value.mask |= DataValueMask::SOURCE_PICOSECONDS;
        self
    }

    /// Set the server picoseconds.
    pub fn server_picoseconds(mut self, picos: u16) -> Self {
        self.value.server_picoseconds = picos;
        self.value.mask |= DataValueMask::SERVER_PICOSECONDS;
        self
    }

    /// Override the presence mask.
    pub fn mask(mut self, mask: DataValueMask) -> Self {
        self.value.mask = mask;
        self
    }

    /// Build the DataValue.
    pub fn build(self) -> DataValue {
        self.value
    }
}
