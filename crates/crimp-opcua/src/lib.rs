// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! OPC UA marshalling layer for CRIMP.
//!
//! This crate translates between the host-side data model of `crimp-core`
//! and typed OPC UA wire structures. It contains no transport; the output
//! is ready to hand to any OPC UA stack.
//!
//! # Features
//!
//! - Value marshalling between dynamic host values and tagged variants
//! - Node identity marshalling with structural encoding flags
//! - Sparse DataValue records with explicit or truthiness-based presence
//! - Browse/Read/Write service request assembly
//! - Endpoint and browse result descriptions
//!
//! # Pipeline
//!
//! ```text
//! DynamicValue ──ValueCodec──▶ Variant
//! Identity     ──IdentityCodec──▶ NodeId
//! DataRecord   ──RecordCodec──▶ DataValue
//! queries      ──QueryBuilder──▶ service requests
//! ```
//!
//! Every decode direction reverses the corresponding encode; conversion
//! failures surface as [`ConversionError`] with stable error codes.
//!
//! # Example
//!
//! ```rust
//! use crimp_core::{DynamicValue, Identity, WriteRequest};
//! use crimp_opcua::{QueryBuilder, ValueCodec};
//!
//! // Marshal a host value.
//! let variant = ValueCodec::encode(&DynamicValue::Float(21.5))?;
//!
//! // Assemble a write request.
//! let builder = QueryBuilder::new();
//! let writes = builder.write(&[WriteRequest::value(
//!     Identity::string(2, "Boiler.Setpoint"),
//!     DynamicValue::Float(21.5),
//! )])?;
//! assert_eq!(writes.len(), 1);
//! # Ok::<(), crimp_opcua::ConversionError>(())
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod codec;
pub mod endpoint;
pub mod error;
pub mod query;
pub mod types;

// Re-export the codecs
pub use codec::{
    datetime_to_ticks, ticks_to_datetime, IdentityCodec, RecordCodec, RecordCodecOptions,
    ValueCodec,
};

// Re-export error types
pub use error::{ConversionError, ConversionResult, ErrorCode, ErrorSeverity};

// Re-export wire model types
pub use types::{
    encoding, DataValue, DataValueMask, LocalizedText, NodeId, NodeIdentifier, QualifiedName,
    Variant, VariantList, VariantTag,
};

// Re-export query assembly types
pub use query::{
    AttributeQuery, BrowseDescription, BrowseQuery, BrowseResultMask, NodeClassMask, NodesQuery,
    QueryBuilder, ReadParameters, ReadQuery, ReadValueId, WriteValue,
};

// Re-export endpoint and browse result types
pub use endpoint::{
    ApplicationDescription, ApplicationType, EndpointDescription, ReferenceDescription,
    ReferenceInfo, SecurityMode, UserTokenPolicy, UserTokenType,
};
