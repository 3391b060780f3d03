// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Record codec.
//!
//! Translates between host [`DataRecord`]s and wire [`DataValue`]s.
//!
//! The wire form is sparse: a presence mask says which of the six fields
//! carry information, absent fields hold zero defaults. Decoding turns each
//! masked field into `Some`, leaving the rest `None`, and never invents
//! presence from the defaults.
//!
//! Encoding has two modes. The default is explicit: every `Some` field is
//! encoded, including zero values. [`RecordCodecOptions::truthy_presence`]
//! restores the classic lossy behavior where falsy values (zero status,
//! zero picoseconds, epoch timestamps, falsy host values) are silently
//! dropped from the mask.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crimp_core::DataRecord;

use crate::codec::ValueCodec;
use crate::error::{ConversionError, ConversionResult};
use crate::types::{DataValue, DataValueMask};

// =============================================================================
// Tick conversion
// =============================================================================

/// Ticks between 1601-01-01T00:00:00Z and the Unix epoch.
const UNIX_EPOCH_TICKS: i64 = 116_444_736_000_000_000;

/// Ticks per second (one tick is 100 nanoseconds).
const TICKS_PER_SECOND: i64 = 10_000_000;

/// Converts OPC UA ticks (100ns intervals since 1601-01-01T00:00:00Z)
/// to a UTC datetime.
///
/// # Errors
///
/// Fails when the tick count is outside the representable datetime range.
pub fn ticks_to_datetime(ticks: u64) -> ConversionResult<DateTime<Utc>> {
    let unix_ticks = i128::from(ticks) - i128::from(UNIX_EPOCH_TICKS);
    let secs = unix_ticks.div_euclid(i128::from(TICKS_PER_SECOND));
    let subsec_ticks = unix_ticks.rem_euclid(i128::from(TICKS_PER_SECOND));

    let secs = i64::try_from(secs)
        .map_err(|_| ConversionError::value_out_of_range(ticks, "datetime"))?;
    let nanos = (subsec_ticks * 100) as u32;

    DateTime::from_timestamp(secs, nanos)
        .ok_or_else(|| ConversionError::value_out_of_range(ticks, "datetime"))
}

/// Converts a UTC datetime to OPC UA ticks.
///
/// Sub-tick precision (the two low decimal digits of the nanosecond part)
/// is truncated.
///
/// # Errors
///
/// Fails for datetimes before 1601-01-01T00:00:00Z, which ticks cannot
/// represent.
pub fn datetime_to_ticks(at: &DateTime<Utc>) -> ConversionResult<u64> {
    let unix_ticks = i128::from(at.timestamp()) * i128::from(TICKS_PER_SECOND)
        + i128::from(at.timestamp_subsec_nanos() / 100);
    let ticks = unix_ticks + i128::from(UNIX_EPOCH_TICKS);

    u64::try_from(ticks).map_err(|_| ConversionError::value_out_of_range(at, "tick timestamp"))
}

// =============================================================================
// RecordCodecOptions
// =============================================================================

/// Behavior switches for the record codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecordCodecOptions {
    /// Drop falsy fields from the encoded mask.
    ///
    /// When set, a present field is still omitted if its value is falsy:
    /// `Good` status, zero picoseconds, the 1601 epoch timestamp, and host
    /// values that fail [`truthiness`](crimp_core::DynamicValue::is_truthy).
    /// This reproduces the classic API and loses the distinction between
    /// "absent" and "present but zero".
    #[serde(default)]
    pub truthy_presence: bool,
}

impl RecordCodecOptions {
    /// Options with the lossy truthiness behavior enabled.
    pub fn truthy() -> Self {
        Self {
            truthy_presence: true,
        }
    }
}

// =============================================================================
// RecordCodec
// =============================================================================

/// Codec between [`DataRecord`] and [`DataValue`].
///
/// # Examples
///
/// ```
/// use crimp_core::{DataRecord, DynamicValue, StatusCode};
/// use crimp_opcua::codec::RecordCodec;
/// use crimp_opcua::types::DataValueMask;
///
/// let codec = RecordCodec::new();
/// let record = DataRecord::from_value(DynamicValue::Int(5))
///     .with_status(StatusCode::GOOD);
///
/// let wire = codec.encode(&record).unwrap();
/// assert_eq!(wire.mask, DataValueMask::VALUE | DataValueMask::STATUS_CODE);
///
/// let back = codec.decode(&wire).unwrap();
/// assert_eq!(back, record);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordCodec {
    options: RecordCodecOptions,
}

impl RecordCodec {
    /// Creates a codec with explicit presence semantics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a codec with the given options.
    pub fn with_options(options: RecordCodecOptions) -> Self {
        Self { options }
    }

    /// Returns the active options.
    pub fn options(&self) -> RecordCodecOptions {
        self.options
    }

    /// Decodes a wire data value into a host record.
    ///
    /// Each field materializes as `Some` exactly when its mask bit is set.
    /// Unmasked fields decode to `None` regardless of what the wire struct
    /// holds in them.
    ///
    /// # Errors
    ///
    /// Fails when the masked value cannot be decoded or a masked timestamp
    /// is out of the datetime range.
    pub fn decode(&self, wire: &DataValue) -> ConversionResult<DataRecord> {
        let mut record = DataRecord::new();

        if wire.mask.contains(DataValueMask::VALUE) {
            record.value = Some(ValueCodec::decode(&wire.value)?);
        }
        if wire.mask.contains(DataValueMask::STATUS_CODE) {
            record.status = Some(wire.status);
        }
        if wire.mask.contains(DataValueMask::SOURCE_TIMESTAMP) {
            record.source_timestamp = Some(ticks_to_datetime(wire.source_timestamp)?);
        }
        if wire.mask.contains(DataValueMask::SERVER_TIMESTAMP) {
            record.server_timestamp = Some(ticks_to_datetime(wire.server_timestamp)?);
        }
        if wire.mask.contains(DataValueMask::SOURCE_PICOSECONDS) {
            record.source_picoseconds = Some(wire.source_picoseconds);
        }
        if wire.mask.contains(DataValueMask::SERVER_PICOSECONDS) {
            record.server_picoseconds = Some(wire.server_picoseconds);
        }

        Ok(record)
    }

    /// Encodes a host record as a wire data value.
    ///
    /// In the default mode every `Some` field is encoded and flagged, zero
    /// or not. With [`RecordCodecOptions::truthy_presence`] falsy fields
    /// are dropped instead.
    ///
    /// # Errors
    ///
    /// Fails when the value cannot be encoded or a timestamp predates the
    /// 1601 tick epoch.
    pub fn encode(&self, record: &DataRecord) -> ConversionResult<DataValue> {
        let truthy = self.options.truthy_presence;
        let mut wire = DataValue::default();

        if let Some(status) = record.status {
            if !truthy || status.raw() != 0 {
                wire.status = status;
                wire.mask |= DataValueMask::STATUS_CODE;
            } else {
                warn_dropped("status");
            }
        }
        if let Some(picos) = record.server_picoseconds {
            if !truthy || picos != 0 {
                wire.server_picoseconds = picos;
                wire.mask |= DataValueMask::SERVER_PICOSECONDS;
            } else {
                warn_dropped("server_picoseconds");
            }
        }
        if let Some(picos) = record.source_picoseconds {
            if !truthy || picos != 0 {
                wire.source_picoseconds = picos;
                wire.mask |= DataValueMask::SOURCE_PICOSECONDS;
            } else {
                warn_dropped("source_picoseconds");
            }
        }
        if let Some(at) = &record.server_timestamp {
            let ticks = datetime_to_ticks(at)?;
            if !truthy || ticks != 0 {
                wire.server_timestamp = ticks;
                wire.mask |= DataValueMask::SERVER_TIMESTAMP;
            } else {
                warn_dropped("server_timestamp");
            }
        }
        if let Some(at) = &record.source_timestamp {
            let ticks = datetime_to_ticks(at)?;
            if !truthy || ticks != 0 {
                wire.source_timestamp = ticks;
                wire.mask |= DataValueMask::SOURCE_TIMESTAMP;
            } else {
                warn_dropped("source_timestamp");
            }
        }
        if let Some(value) = &record.value {
            if !truthy || value.is_truthy() {
                wire.value = ValueCodec::encode(value)?;
                wire.mask |= DataValueMask::VALUE;
            } else {
                warn_dropped("value");
            }
        }

        Ok(wire)
    }
}

/// Logs a field the truthiness mode silently dropped.
fn warn_dropped(field: &'static str) {
    tracing::warn!(field, "truthy presence dropped a present falsy field");
}

// =============================================================================
// Tests
// =============================================================================
