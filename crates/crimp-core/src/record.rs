// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Sparse measurement records.
//!
//! A [`DataRecord`] is the host-side view of an OPC UA DataValue: a value
//! plus quality and timing metadata, every field independently optional.
//! Presence is explicit through `Option`; the wire-level presence mask is
//! derived by the record codec, never by the host.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::attribute::{AttributeId, StatusCode};
use crate::identity::Identity;
use crate::value::DynamicValue;

// =============================================================================
// DataRecord
// =============================================================================

/// A sparse value-with-metadata record.
///
/// # Examples
///
/// ```
/// use crimp_core::{DataRecord, DynamicValue, StatusCode};
///
/// let record = DataRecord::from_value(DynamicValue::Float(21.5))
///     .with_status(StatusCode::GOOD);
/// assert!(record.is_good());
/// assert!(record.server_timestamp.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataRecord {
    /// The measured value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<DynamicValue>,
    /// Quality of the value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusCode>,
    /// When the source produced the value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_timestamp: Option<DateTime<Utc>>,
    /// Sub-millisecond part of the source timestamp, in 10 picosecond units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_picoseconds: Option<u16>,
    /// When the server observed the value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_timestamp: Option<DateTime<Utc>>,
    /// Sub-millisecond part of the server timestamp, in 10 picosecond units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_picoseconds: Option<u16>,
}

impl DataRecord {
    /// Creates a record with no fields present.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a record carrying only a value.
    pub fn from_value(value: DynamicValue) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }

    /// Sets the value.
    pub fn with_value(mut self, value: DynamicValue) -> Self {
        self.value = Some(value);
        self
    }

    /// Sets the status code.
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the source timestamp.
    pub fn with_source_timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.source_timestamp = Some(at);
        self
    }

    /// Sets the server timestamp.
    pub fn with_server_timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.server_timestamp = Some(at);
        self
    }

    /// Sets the source picoseconds.
    pub fn with_source_picoseconds(mut self, picos: u16) -> Self {
        self.source_picoseconds = Some(picos);
        self
    }

    /// Sets the server picoseconds.
    pub fn with_server_picoseconds(mut self, picos: u16) -> Self {
        self.server_picoseconds = Some(picos);
        self
    }

    /// Returns `true` if no field is present.
    pub fn is_empty(&self) -> bool {
        self.value.is_none()
            && self.status.is_none()
            && self.source_timestamp.is_none()
            && self.source_picoseconds.is_none()
            && self.server_timestamp.is_none()
            && self.server_picoseconds.is_none()
    }

    /// Returns `true` if the record has good quality.
    ///
    /// An absent status counts as good, matching the protocol convention
    /// that servers omit the status code when it is `Good`.
    pub fn is_good(&self) -> bool {
        self.status.map_or(true, |s| s.is_good())
    }
}

// =============================================================================
// WriteRequest
// =============================================================================

/// A host-side request to write one attribute of one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriteRequest {
    /// Node to write.
    pub target: Identity,
    /// Attribute to write.
    pub attribute: AttributeId,
    /// Optional numeric range within an array value (e.g. `"2:4"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_range: Option<String>,
    /// The record to write.
    pub record: DataRecord,
}

impl WriteRequest {
    /// Creates a write request for an arbitrary attribute.
    pub fn new(target: Identity, attribute: AttributeId, record: DataRecord) -> Self {
        Self {
            target,
            attribute,
            index_range: None,
            record,
        }
    }

    /// Creates a request that writes a plain value to the Value attribute.
    pub fn value(target: Identity, value: DynamicValue) -> Self {
        Self::new(target, AttributeId::Value, DataRecord::from_value(value))
    }

    /// Sets the index range.
    pub fn with_index_range(mut self, range: impl Into<String>) -> Self {
        self.index_range = Some(range.into());
        self
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_empty_record() {
        let record = DataRecord::new();
        assert!(record.is_empty());
        assert!(record.is_good());
    }

    #[test]
    fn test_builder_chain() {
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let record = DataRecord::from_value(DynamicValue::Int(5))
            .with_status(StatusCode::GOOD)
            .with_source_timestamp(at)
            .with_source_picoseconds(250);

        assert!(!record.is_empty());
        assert_eq!(record.value, Some(DynamicValue::Int(5)));
        assert_eq!(record.status, Some(StatusCode::GOOD));
        assert_eq!(record.source_timestamp, Some(at));
        assert_eq!(record.source_picoseconds, Some(250));
        assert_eq!(record.server_timestamp, None);
        assert_eq!(record.server_picoseconds, None);
    }

    #[test]
    fn test_quality() {
        let bad = DataRecord::new().with_status(StatusCode::BAD_NOT_READABLE);
        assert!(!bad.is_good());

        let explicit_good = DataRecord::new().with_status(StatusCode::GOOD);
        assert!(explicit_good.is_good());
    }

    #[test]
    fn test_serde_skips_absent_fields() {
        let record = DataRecord::from_value(DynamicValue::Bool(true));
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("value"));
        assert!(!json.contains("status"));
        assert!(!json.contains("timestamp"));

        let back: DataRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_write_request_value_shorthand() {
        let req = WriteRequest::value(Identity::numeric(2, 1001), DynamicValue::Float(3.5));
        assert_eq!(req.attribute, AttributeId::Value);
        assert_eq!(req.index_range, None);
        assert_eq!(req.record.value, Some(DynamicValue::Float(3.5)));
        assert!(req.record.status.is_none());
    }

    #[test]
    fn test_write_request_index_range() {
        let req = WriteRequest::value(Identity::string(2, "Array"), DynamicValue::Int(1))
            .with_index_range("2:4");
        assert_eq!(req.index_range.as_deref(), Some("2:4"));
    }
}
