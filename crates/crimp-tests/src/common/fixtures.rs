// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Test Fixtures
//!
//! Pre-built test data for consistent and reproducible testing.
//!
//! ## Design Principles
//!
//! - Fixtures are immutable and thread-safe
//! - Each fixture represents a realistic scenario
//! - Fixtures can be composed for complex test scenarios

use chrono::{DateTime, TimeZone, Utc};

use crimp_core::{DataRecord, DynamicValue, Identity, StatusCode};
use crimp_opcua::{NodeId, Variant, VariantList};

// =============================================================================
// Identity Fixtures
// =============================================================================

/// Fixture providing standard node identities.
pub struct IdentityFixtures;

impl IdentityFixtures {
    /// A string-identified temperature sensor.
    pub fn boiler_temperature() -> Identity {
        Identity::string(2, "Boiler1.Temperature")
    }

    /// A numeric-identified motor speed variable.
    pub fn motor_speed() -> Identity {
        Identity::numeric(2, 1001)
    }

    /// A status flag variable.
    pub fn status_flag() -> Identity {
        Identity::string(2, "Line1.Running")
    }

    /// An identity with expanded addressing fields.
    pub fn remote_sensor() -> Identity {
        Identity::string(4, "Cell4.Sensor")
            .with_namespace_uri("urn:factory:cell4")
            .with_server_index(2)
    }

    /// Multiple identities for batch testing.
    pub fn identity_batch(count: usize) -> Vec<Identity> {
        (0..count)
            .map(|i| Identity::string(2, format!("Tag{:04}", i)))
            .collect()
    }
}

// =============================================================================
// Record Fixtures
// =============================================================================

/// Fixture providing measurement records.
pub struct RecordFixtures;

impl RecordFixtures {
    /// A fixed reference instant used across tests.
    pub fn reference_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap()
    }

    /// A good measurement with value, status and source timestamp.
    pub fn good_measurement(value: f64) -> DataRecord {
        DataRecord::from_value(DynamicValue::Float(value))
            .with_status(StatusCode::GOOD)
            .with_source_timestamp(Self::reference_time())
    }

    /// A record reporting an unreadable node.
    pub fn bad_reading() -> DataRecord {
        DataRecord::new().with_status(StatusCode::BAD_NOT_READABLE)
    }

    /// A record with every field present.
    pub fn full_record() -> DataRecord {
        DataRecord::from_value(DynamicValue::Float(98.6))
            .with_status(StatusCode::GOOD)
            .with_source_timestamp(Self::reference_time())
            .with_source_picoseconds(120)
            .with_server_timestamp(Self::reference_time())
            .with_server_picoseconds(250)
    }

    /// A record whose every present field is falsy.
    pub fn falsy_record() -> DataRecord {
        DataRecord::from_value(DynamicValue::Int(0)).with_status(StatusCode::GOOD)
    }
}

// =============================================================================
// Variant Fixtures
// =============================================================================

/// Fixture providing wire variant payloads.
pub struct VariantFixtures;

impl VariantFixtures {
    /// One variant of each scalar payload the codec decodes.
    pub fn scalar_spread() -> Vec<Variant> {
        vec![
            Variant::Boolean(true),
            Variant::SByte(-5),
            Variant::Byte(200),
            Variant::Int16(-1000),
            Variant::UInt16(40_000),
            Variant::Int32(7),
            Variant::UInt32(3_000_000_000),
            Variant::Int64(-9),
            Variant::UInt64(9),
            Variant::Float(1.5),
            Variant::Double(2.25),
            Variant::String("idle".into()),
        ]
    }

    /// An Int32 array payload.
    pub fn int_array() -> Variant {
        Variant::Array(VariantList::Int32(vec![1, 2, 3]))
    }

    /// A single-element node array payload.
    pub fn node_array() -> Variant {
        Variant::Array(VariantList::NodeId(vec![NodeId::string(3, "Pump")]))
    }
}
