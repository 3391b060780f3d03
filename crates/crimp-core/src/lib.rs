// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # CRIMP Core
//!
//! Host-side data model for the CRIMP OPC UA marshalling layer.
//!
//! This crate defines the types application code works with before anything
//! touches the wire: dynamically typed values, node identities, sparse
//! measurement records and the protocol constant tables. The wire model and
//! the codecs that translate between the two live in `crimp-opcua`.
//!
//! ## Modules
//!
//! - [`value`]: Dynamically typed host values
//! - [`identity`]: Node identities and their text format
//! - [`record`]: Sparse measurement records and write requests
//! - [`attribute`]: Attribute, status and node-class constant tables
//! - [`error`]: Host-side error types

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

// =============================================================================
// Modules
// =============================================================================

pub mod attribute;
pub mod error;
pub mod identity;
pub mod record;
pub mod value;

// =============================================================================
// Re-exports
// =============================================================================

pub use attribute::{AttributeId, BrowseDirection, NodeClass, StatusCode, TimestampsToReturn};
pub use error::IdentityError;
pub use identity::{Identifier, Identity};
pub use record::{DataRecord, WriteRequest};
pub use value::DynamicValue;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
