// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Codecs between the host model and the wire model.
//!
//! Three codecs cover the three data shapes that cross the boundary:
//!
//! - [`ValueCodec`]: dynamic values to and from tagged variants
//! - [`IdentityCodec`]: node identities to and from wire node IDs
//! - [`RecordCodec`]: sparse records to and from masked data values
//!
//! The value and identity codecs are stateless; the record codec carries
//! [`RecordCodecOptions`] because its presence semantics are configurable.

mod identity;
mod record;
mod value;

pub use identity::IdentityCodec;
pub use record::{datetime_to_ticks, ticks_to_datetime, RecordCodec, RecordCodecOptions};
pub use value::ValueCodec;
