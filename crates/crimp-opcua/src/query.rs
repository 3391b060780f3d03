// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Service request assembly.
//!
//! [`QueryBuilder`] turns host-side query descriptions into the wire
//! request structures of the Browse, Read and Write services. It is a thin
//! assembly layer: identities pass through the identity codec, records
//! through the record codec, everything else is copied field by field. No
//! network activity happens here; the output is handed to a transport.
//!
//! # Examples
//!
//! ```
//! use crimp_core::Identity;
//! use crimp_opcua::query::{BrowseQuery, QueryBuilder};
//!
//! let builder = QueryBuilder::new();
//! let request = builder.browse_one(&BrowseQuery::new(Identity::OBJECTS_FOLDER));
//! assert_eq!(request.nodes_to_browse.len(), 1);
//! ```

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crimp_core::{
    AttributeId, BrowseDirection, Identity, NodeClass, TimestampsToReturn, WriteRequest,
};

use crate::codec::{IdentityCodec, RecordCodec, RecordCodecOptions};
use crate::error::ConversionResult;
use crate::types::{DataValue, NodeId, QualifiedName};

// =============================================================================
// Well-known reference types (namespace 0)
// =============================================================================

/// Standard reference type identities used in browse filters.
pub mod reference_types {
    use crimp_core::Identity;

    /// The abstract base of all references (i=31).
    pub const REFERENCES: Identity = Identity::numeric(0, 31);
    /// Non-hierarchical references (i=32).
    pub const NON_HIERARCHICAL_REFERENCES: Identity = Identity::numeric(0, 32);
    /// Hierarchical references (i=33).
    pub const HIERARCHICAL_REFERENCES: Identity = Identity::numeric(0, 33);
    /// HasChild references (i=34).
    pub const HAS_CHILD: Identity = Identity::numeric(0, 34);
    /// Organizes references (i=35).
    pub const ORGANIZES: Identity = Identity::numeric(0, 35);
    /// HasEventSource references (i=36).
    pub const HAS_EVENT_SOURCE: Identity = Identity::numeric(0, 36);
    /// HasModellingRule references (i=37).
    pub const HAS_MODELLING_RULE: Identity = Identity::numeric(0, 37);
    /// HasEncoding references (i=38).
    pub const HAS_ENCODING: Identity = Identity::numeric(0, 38);
    /// HasDescription references (i=39).
    pub const HAS_DESCRIPTION: Identity = Identity::numeric(0, 39);
    /// HasTypeDefinition references (i=40).
    pub const HAS_TYPE_DEFINITION: Identity = Identity::numeric(0, 40);
    /// GeneratesEvent references (i=41).
    pub const GENERATES_EVENT: Identity = Identity::numeric(0, 41);
    /// Aggregates references (i=44).
    pub const AGGREGATES: Identity = Identity::numeric(0, 44);
    /// HasSubtype references (i=45).
    pub const HAS_SUBTYPE: Identity = Identity::numeric(0, 45);
    /// HasProperty references (i=46).
    pub const HAS_PROPERTY: Identity = Identity::numeric(0, 46);
    /// HasComponent references (i=47).
    pub const HAS_COMPONENT: Identity = Identity::numeric(0, 47);
    /// HasNotifier references (i=48).
    pub const HAS_NOTIFIER: Identity = Identity::numeric(0, 48);
}

// =============================================================================
// Filter masks
// =============================================================================

bitflags! {
    /// Node class filter of a browse request. Empty means no filtering.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NodeClassMask: u32 {
        /// Object nodes.
        const OBJECT = 1;
        /// Variable nodes.
        const VARIABLE = 2;
        /// Method nodes.
        const METHOD = 4;
        /// Object type nodes.
        const OBJECT_TYPE = 8;
        /// Variable type nodes.
        const VARIABLE_TYPE = 16;
        /// Reference type nodes.
        const REFERENCE_TYPE = 32;
        /// Data type nodes.
        const DATA_TYPE = 64;
        /// View nodes.
        const VIEW = 128;
    }
}

// Masks travel as their raw bits.
impl Serialize for NodeClassMask {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.bits())
    }
}

impl<'de> Deserialize<'de> for NodeClassMask {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_bits_truncate(u32::deserialize(deserializer)?))
    }
}

impl NodeClassMask {
    /// Folds a class list into a mask. An empty list folds to the empty
    /// mask, which servers interpret as "all classes".
    pub fn from_classes(classes: &[NodeClass]) -> Self {
        classes
            .iter()
            .fold(NodeClassMask::empty(), |mask, class| mask | (*class).into())
    }
}

impl From<NodeClass> for NodeClassMask {
    fn from(class: NodeClass) -> Self {
        NodeClassMask::from_bits_truncate(class.as_u32())
    }
}

bitflags! {
    /// Which reference fields a browse result should carry.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BrowseResultMask: u32 {
        /// Reference type of each result.
        const REFERENCE_TYPE = 1;
        /// Traversal direction of each result.
        const IS_FORWARD = 2;
        /// Node class of each target.
        const NODE_CLASS = 4;
        /// Browse name of each target.
        const BROWSE_NAME = 8;
        /// Display name of each target.
        const DISPLAY_NAME = 16;
        /// Type definition of each target.
        const TYPE_DEFINITION = 32;
    }
}

impl Serialize for BrowseResultMask {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.bits())
    }
}

impl<'de> Deserialize<'de> for BrowseResultMask {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_bits_truncate(u32::deserialize(deserializer)?))
    }
}

// =============================================================================
// Wire request structures
// =============================================================================

/// One node to browse, with its traversal filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowseDescription {
    /// The node whose references are requested.
    pub node_to_browse: NodeId,
    /// Reference type to follow.
    pub reference_type: NodeId,
    /// Traversal direction.
    pub direction: BrowseDirection,
    /// Whether subtypes of the reference type are followed too.
    pub include_subtypes: bool,
    /// Target node class filter.
    pub node_classes: NodeClassMask,
    /// Result fields to return.
    pub result_mask: BrowseResultMask,
}

/// A Browse service request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodesQuery {
    /// Per-node cap on returned references. Zero means no limit.
    pub max_references_per_node: u32,
    /// The nodes to browse.
    pub nodes_to_browse: Vec<BrowseDescription>,
}

impl NodesQuery {
    /// Sets the per-node reference cap.
    pub fn with_max_references(mut self, max: u32) -> Self {
        self.max_references_per_node = max;
        self
    }
}

/// One attribute to read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadValueId {
    /// The node to read.
    pub node: NodeId,
    /// The attribute to read.
    pub attribute: AttributeId,
    /// Optional numeric range within an array value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_range: Option<String>,
    /// Requested data encoding. The default qualified name selects the
    /// server's native encoding.
    #[serde(default, skip_serializing_if = "QualifiedName::is_empty")]
    pub data_encoding: QualifiedName,
}

/// A Read service request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadParameters {
    /// Oldest acceptable cached value, in milliseconds. Zero forces a
    /// device read.
    pub max_age: f64,
    /// Which timestamps to return.
    pub timestamps_to_return: TimestampsToReturn,
    /// The attributes to read.
    pub nodes_to_read: Vec<ReadValueId>,
}

/// One attribute write of a Write service request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriteValue {
    /// The node to write.
    pub node: NodeId,
    /// The attribute to write.
    pub attribute: AttributeId,
    /// Optional numeric range within an array value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_range: Option<String>,
    /// The encoded record to write.
    pub value: DataValue,
}

// =============================================================================
// Host query descriptions
// =============================================================================

/// Host-side description of a browse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowseQuery {
    /// The node whose references are requested.
    pub target: Identity,
    /// Reference type to follow.
    #[serde(default = "default_reference_type")]
    pub reference_type: Identity,
    /// Traversal direction.
    #[serde(default)]
    pub direction: BrowseDirection,
    /// Whether subtypes of the reference type are followed too.
    #[serde(default = "default_include_subtypes")]
    pub include_subtypes: bool,
    /// Target node class filter. Empty means all classes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub node_classes: Vec<NodeClass>,
    /// Result fields to return.
    #[serde(default = "default_result_mask")]
    pub result_mask: BrowseResultMask,
}

fn default_reference_type() -> Identity {
    reference_types::HIERARCHICAL_REFERENCES
}

fn default_include_subtypes() -> bool {
    true
}

fn default_result_mask() -> BrowseResultMask {
    BrowseResultMask::all()
}

impl BrowseQuery {
    /// Creates a browse query with the default filter: hierarchical
    /// references, forward, subtypes included, all classes, all result
    /// fields.
    pub fn new(target: Identity) -> Self {
        Self {
            target,
            reference_type: default_reference_type(),
            direction: BrowseDirection::default(),
            include_subtypes: default_include_subtypes(),
            node_classes: Vec::new(),
            result_mask: default_result_mask(),
        }
    }

    /// Sets the reference type to follow.
    pub fn with_reference_type(mut self, reference_type: Identity) -> Self {
        self.reference_type = reference_type;
        self
    }

    /// Sets the traversal direction.
    pub fn with_direction(mut self, direction: BrowseDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Sets whether subtypes are followed.
    pub fn with_include_subtypes(mut self, include: bool) -> Self {
        self.include_subtypes = include;
        self
    }

    /// Restricts results to the given node classes.
    pub fn with_node_classes(mut self, classes: impl Into<Vec<NodeClass>>) -> Self {
        self.node_classes = classes.into();
        self
    }

    /// Sets the result field mask.
    pub fn with_result_mask(mut self, mask: BrowseResultMask) -> Self {
        self.result_mask = mask;
        self
    }
}

/// Host-side description of one attribute read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeQuery {
    /// The node to read.
    pub target: Identity,
    /// The attribute to read.
    pub attribute: AttributeId,
    /// Optional numeric range within an array value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_range: Option<String>,
    /// Optional data encoding request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_encoding: Option<QualifiedName>,
}

impl AttributeQuery {
    /// Creates a query for an arbitrary attribute.
    pub fn new(target: Identity, attribute: AttributeId) -> Self {
        Self {
            target,
            attribute,
            index_range: None,
            data_encoding: None,
        }
    }

    /// Creates a query for the Value attribute.
    pub fn value(target: Identity) -> Self {
        Self::new(target, AttributeId::Value)
    }

    /// Sets the index range.
    pub fn with_index_range(mut self, range: impl Into<String>) -> Self {
        self.index_range = Some(range.into());
        self
    }

    /// Sets the requested data encoding.
    pub fn with_data_encoding(mut self, encoding: QualifiedName) -> Self {
        self.data_encoding = Some(encoding);
        self
    }
}

/// Host-side description of a read.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReadQuery {
    /// Oldest acceptable cached value, in milliseconds.
    #[serde(default)]
    pub max_age: f64,
    /// Which timestamps to return.
    #[serde(default)]
    pub timestamps: TimestampsToReturn,
    /// The attributes to read.
    pub attributes: Vec<AttributeQuery>,
}

impl ReadQuery {
    /// Creates an empty read query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a query reading the Value attribute of each target.
    pub fn values(targets: impl IntoIterator<Item = Identity>) -> Self {
        Self {
            attributes: targets.into_iter().map(AttributeQuery::value).collect(),
            ..Self::default()
        }
    }

    /// Adds one attribute query.
    pub fn with_attribute(mut self, query: AttributeQuery) -> Self {
        self.attributes.push(query);
        self
    }

    /// Sets the maximum age.
    pub fn with_max_age(mut self, max_age: f64) -> Self {
        self.max_age = max_age;
        self
    }

    /// Sets which timestamps to return.
    pub fn with_timestamps(mut self, timestamps: TimestampsToReturn) -> Self {
        self.timestamps = timestamps;
        self
    }
}

// =============================================================================
// QueryBuilder
// =============================================================================

/// Assembles wire service requests from host query descriptions.
///
/// The builder owns a [`RecordCodec`] because write assembly encodes
/// records; its presence semantics follow the codec options the builder
/// was created with.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    records: RecordCodec,
}

impl QueryBuilder {
    /// Creates a builder with default record codec options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder whose write assembly uses the given record
    /// codec options.
    pub fn with_record_options(options: RecordCodecOptions) -> Self {
        Self {
            records: RecordCodec::with_options(options),
        }
    }

    /// Assembles a Browse request from one or more queries.
    pub fn browse(&self, queries: &[BrowseQuery]) -> NodesQuery {
        tracing::debug!(nodes = queries.len(), "assembled browse request");
        NodesQuery {
            max_references_per_node: 0,
            nodes_to_browse: queries.iter().map(Self::browse_description).collect(),
        }
    }

    /// Assembles a Browse request for a single query.
    pub fn browse_one(&self, query: &BrowseQuery) -> NodesQuery {
        self.browse(std::slice::from_ref(query))
    }

    fn browse_description(query: &BrowseQuery) -> BrowseDescription {
        BrowseDescription {
            node_to_browse: IdentityCodec::encode(&query.target),
            reference_type: IdentityCodec::encode(&query.reference_type),
            direction: query.direction,
            include_subtypes: query.include_subtypes,
            node_classes: NodeClassMask::from_classes(&query.node_classes),
            result_mask: query.result_mask,
        }
    }

    /// Assembles a Read request.
    pub fn read(&self, query: &ReadQuery) -> ReadParameters {
        tracing::debug!(attributes = query.attributes.len(), "assembled read request");
        ReadParameters {
            max_age: query.max_age,
            timestamps_to_return: query.timestamps,
            nodes_to_read: query
                .attributes
                .iter()
                .map(|attr| ReadValueId {
                    node: IdentityCodec::encode(&attr.target),
                    attribute: attr.attribute,
                    index_range: attr.index_range.clone(),
                    data_encoding: attr.data_encoding.clone().unwrap_or_default(),
                })
                .collect(),
        }
    }

    /// Assembles the write list of a Write request.
    ///
    /// # Errors
    ///
    /// Fails when any record cannot be encoded; no partial list is
    /// returned.
    pub fn write(&self, requests: &[WriteRequest]) -> ConversionResult<Vec<WriteValue>> {
        tracing::debug!(values = requests.len(), "assembling write request");
        requests
            .iter()
            .map(|req| {
                Ok(WriteValue {
                    node: IdentityCodec::encode(&req.target),
                    attribute: req.attribute,
                    index_range: req.index_range.clone(),
                    value: self.records.encode(&req.record)?,
                })
            })
            .collect()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{encoding, DataValueMask, Variant};
    use crimp_core::{DataRecord, DynamicValue, StatusCode};

    #[test]
    fn test_node_class_mask_folding() {
        assert_eq!(NodeClassMask::from_classes(&[]), NodeClassMask::empty());
        assert_eq!(
            NodeClassMask::from_classes(&[NodeClass::Object, NodeClass::Variable]),
            NodeClassMask::OBJECT | NodeClassMask::VARIABLE
        );
        assert_eq!(NodeClassMask::from(NodeClass::View), NodeClassMask::VIEW);
    }

    #[test]
    fn test_browse_result_mask_all_value() {
        assert_eq!(BrowseResultMask::all().bits(), 63);
    }

    #[test]
    fn test_browse_assembly_defaults() {
        let builder = QueryBuilder::new();
        let request = builder.browse_one(&BrowseQuery::new(Identity::OBJECTS_FOLDER));

        assert_eq!(request.max_references_per_node, 0);
        assert_eq!(request.nodes_to_browse.len(), 1);

        let desc = &request.nodes_to_browse[0];
        assert_eq!(desc.node_to_browse, NodeId::numeric(0, 85));
        assert_eq!(desc.reference_type, NodeId::numeric(0, 33));
        assert_eq!(desc.direction, BrowseDirection::Forward);
        assert!(desc.include_subtypes);
        assert_eq!(desc.node_classes, NodeClassMask::empty());
        assert_eq!(desc.result_mask, BrowseResultMask::all());
    }

    #[test]
    fn test_browse_assembly_with_filter() {
        let query = BrowseQuery::new(Identity::string(2, "Line1"))
            .with_reference_type(reference_types::HAS_COMPONENT)
            .with_direction(BrowseDirection::Both)
            .with_include_subtypes(false)
            .with_node_classes(vec![NodeClass::Variable])
            .with_result_mask(BrowseResultMask::BROWSE_NAME | BrowseResultMask::NODE_CLASS);

        let request = QueryBuilder::new().browse_one(&query);
        let desc = &request.nodes_to_browse[0];

        assert_eq!(desc.node_to_browse.encoding_byte(), encoding::STRING);
        assert_eq!(desc.reference_type, NodeId::numeric(0, 47));
        assert_eq!(desc.direction, BrowseDirection::Both);
        assert!(!desc.include_subtypes);
        assert_eq!(desc.node_classes, NodeClassMask::VARIABLE);
        assert_eq!(desc.result_mask.bits(), 12);
    }

    #[test]
    fn test_read_assembly() {
        let query = ReadQuery::values([
            Identity::numeric(2, 1001),
            Identity::string(2, "Pump.Speed"),
        ])
        .with_max_age(500.0)
        .with_timestamps(TimestampsToReturn::Both);

        let request = QueryBuilder::new().read(&query);
        assert_eq!(request.max_age, 500.0);
        assert_eq!(request.timestamps_to_return, TimestampsToReturn::Both);
        assert_eq!(request.nodes_to_read.len(), 2);
        assert_eq!(request.nodes_to_read[0].attribute, AttributeId::Value);
        assert_eq!(request.nodes_to_read[0].node, NodeId::numeric(2, 1001));
        assert!(request.nodes_to_read[0].data_encoding.is_empty());
    }

    #[test]
    fn test_read_assembly_custom_attribute() {
        let query = ReadQuery::new().with_attribute(
            AttributeQuery::new(Identity::numeric(2, 9), AttributeId::DisplayName)
                .with_index_range("0:3")
                .with_data_encoding(QualifiedName::new(0, "DefaultBinary")),
        );

        let request = QueryBuilder::new().read(&query);
        let read = &request.nodes_to_read[0];
        assert_eq!(read.attribute, AttributeId::DisplayName);
        assert_eq!(read.index_range.as_deref(), Some("0:3"));
        assert_eq!(read.data_encoding.name, "DefaultBinary");
    }

    #[test]
    fn test_write_assembly() {
        let requests = vec![
            WriteRequest::value(Identity::numeric(2, 1001), DynamicValue::Int(7)),
            WriteRequest::new(
                Identity::string(2, "Status"),
                AttributeId::Value,
                DataRecord::from_value(DynamicValue::Bool(true))
                    .with_status(StatusCode::GOOD),
            ),
        ];

        let values = QueryBuilder::new().write(&requests).unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values[0].node, NodeId::numeric(2, 1001));
        assert_eq!(values[0].value.value, Variant::Int32(7));
        assert_eq!(values[0].value.mask, DataValueMask::VALUE);
        assert!(values[1].value.mask.contains(DataValueMask::STATUS_CODE));
    }

    #[test]
    fn test_write_assembly_respects_truthy_options() {
        let builder = QueryBuilder::with_record_options(RecordCodecOptions::truthy());
        let requests = vec![WriteRequest::value(
            Identity::numeric(2, 1),
            DynamicValue::Int(0),
        )];

        let values = builder.write(&requests).unwrap();
        assert!(values[0].value.mask.is_empty());
    }

    #[test]
    fn test_write_assembly_propagates_encode_errors() {
        let requests = vec![WriteRequest::value(
            Identity::numeric(2, 1),
            DynamicValue::Seq(vec![DynamicValue::Int(1), DynamicValue::String("x".into())]),
        )];

        assert!(QueryBuilder::new().write(&requests).is_err());
    }
}
