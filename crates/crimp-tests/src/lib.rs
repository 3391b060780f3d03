// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # CRIMP Integration Tests
//!
//! This crate provides integration tests for the CRIMP OPC UA marshalling
//! layer. It includes test utilities, fixtures and assertion helpers shared
//! across the test suites.
//!
//! ## Module Structure
//!
//! - [`common`]: Shared test utilities, fixtures, and helpers
//!   - `fixtures`: Pre-built test data for consistent testing
//!   - `builders`: Builder patterns for constructing test objects
//!   - `assertions`: Custom assertion helpers
//!
//! ## Running Tests
//!
//! ```bash
//! # Run all integration tests
//! cargo test -p crimp-tests
//!
//! # Run specific test suite
//! cargo test -p crimp-tests --test integration_codec
//! cargo test -p crimp-tests --test integration_query
//!
//! # Run with verbose output
//! cargo test -p crimp-tests -- --nocapture
//! ```
//!
//! ## Test Categories
//!
//! ### Codec Tests (`integration_codec.rs`)
//! - Value marshalling in both directions
//! - Identity marshalling and encoding flags
//! - Record presence semantics, explicit and truthy
//! - Error codes and classification
//!
//! ### Query Tests (`integration_query.rs`)
//! - Browse/Read/Write request assembly
//! - Browse result conversion to host views
//! - JSON shape of assembled requests
//!
//! ## Writing New Tests
//!
//! ### Using Fixtures
//!
//! ```rust,ignore
//! use crimp_tests::common::fixtures::{IdentityFixtures, RecordFixtures};
//!
//! #[test]
//! fn test_something() {
//!     let identity = IdentityFixtures::boiler_temperature();
//!     let record = RecordFixtures::good_measurement(21.5);
//!     // ... test logic
//! }
//! ```
//!
//! ### Using Builders
//!
//! ```rust,ignore
//! use crimp_tests::common::builders::DataValueBuilder;
//!
//! #[test]
//! fn test_something() {
//!     let wire = DataValueBuilder::new()
//!         .double(21.5)
//!         .source_ticks(133_800_000_000_000_000)
//!         .build();
//!     // ... test logic
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod common;

/// Re-export commonly used items for convenience.
pub mod prelude {
    pub use crate::common::assertions::*;
    pub use crate::common::builders::*;
    pub use crate::common::fixtures::*;
}
