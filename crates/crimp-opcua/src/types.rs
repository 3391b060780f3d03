// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! OPC UA wire model.
//!
//! This module defines the typed in-memory form of the OPC UA structures the
//! codecs produce and consume:
//!
//! - **NodeId**: All four identifier forms plus expanded addressing, with the
//!   flags byte derived from structure
//! - **Variant**: Tagged scalar and array payloads
//! - **DataValue**: Sparse value-with-metadata record with an explicit
//!   presence mask
//! - **QualifiedName/LocalizedText**: Naming primitives used by browse
//!   results and endpoint descriptions
//!
//! # Examples
//!
//! ```
//! use crimp_opcua::types::{encoding, NodeId};
//!
//! let node = NodeId::string(2, "Temperature.Value");
//! assert_eq!(node.encoding_byte(), encoding::STRING);
//! assert_eq!(node.to_string(), "ns=2;s=Temperature.Value");
//! ```

use std::fmt;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crimp_core::StatusCode;

// =============================================================================
// NodeId encoding flags
// =============================================================================

/// Identifier encoding values of the NodeId flags byte.
///
/// The low six bits select the identifier form; the top two bits flag the
/// presence of expanded addressing fields.
pub mod encoding {
    /// Numeric identifier in [0, 255], namespace 0 (compressed form).
    pub const TWO_BYTE: u8 = 0x00;
    /// Numeric identifier in [0, 65535], namespace in [0, 255] (compressed form).
    pub const FOUR_BYTE: u8 = 0x01;
    /// Full numeric identifier.
    pub const NUMERIC: u8 = 0x02;
    /// String identifier.
    pub const STRING: u8 = 0x03;
    /// GUID identifier.
    pub const GUID: u8 = 0x04;
    /// Opaque (byte string) identifier.
    pub const BYTE_STRING: u8 = 0x05;

    /// Set when an explicit namespace URI follows.
    pub const NAMESPACE_URI: u8 = 0x80;
    /// Set when a server index follows.
    pub const SERVER_INDEX: u8 = 0x40;

    /// Mask selecting the identifier form bits.
    pub const VALUE_MASK: u8 = 0x3F;
}

// =============================================================================
// NodeId
// =============================================================================

/// Wire-level OPC UA node identifier.
///
/// Unlike the host-side `Identity`, the wire form carries all four
/// identifier kinds and represents absent expanded fields with sentinel
/// values (empty URI, zero server index), exactly as the binary encoding
/// does. The flags byte is never stored; [`NodeId::encoding_byte`] derives
/// it from structure so the two can never disagree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId {
    /// Namespace index (0 = OPC UA standard namespace).
    pub namespace: u16,
    /// The node identifier.
    pub identifier: NodeIdentifier,
    /// Explicit namespace URI. Empty means absent.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace_uri: String,
    /// Server index. Zero means local.
    #[serde(default, skip_serializing_if = "is_zero_u32")]
    pub server_index: u32,
}

#[inline]
fn is_zero_u32(v: &u32) -> bool {
    *v == 0
}

impl NodeId {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Creates a numeric node ID.
    #[inline]
    pub fn numeric(namespace: u16, value: u32) -> Self {
        Self {
            namespace,
            identifier: NodeIdentifier::Numeric(value),
            namespace_uri: String::new(),
            server_index: 0,
        }
    }

    /// Creates a string node ID.
    #[inline]
    pub fn string(namespace: u16, value: impl Into<String>) -> Self {
        Self {
            namespace,
            identifier: NodeIdentifier::String(value.into()),
            namespace_uri: String::new(),
            server_index: 0,
        }
    }

    /// Creates a GUID node ID.
    #[inline]
    pub fn guid(namespace: u16, value: Uuid) -> Self {
        Self {
            namespace,
            identifier: NodeIdentifier::Guid(value),
            namespace_uri: String::new(),
            server_index: 0,
        }
    }

    /// Creates an opaque (byte string) node ID.
    #[inline]
    pub fn opaque(namespace: u16, value: Vec<u8>) -> Self {
        Self {
            namespace,
            identifier: NodeIdentifier::Opaque(value),
            namespace_uri: String::new(),
            server_index: 0,
        }
    }

    /// Returns the null node ID (ns=0, i=0).
    #[inline]
    pub fn null() -> Self {
        Self::numeric(0, 0)
    }

    /// Sets the namespace URI.
    pub fn with_namespace_uri(mut self, uri: impl Into<String>) -> Self {
        self.namespace_uri = uri.into();
        self
    }

    /// Sets the server index.
    pub fn with_server_index(mut self, index: u32) -> Self {
        self.server_index = index;
        self
    }

    // =========================================================================
    // Properties
    // =========================================================================

    /// Returns `true` if this is a numeric identifier.
    #[inline]
    pub const fn is_numeric(&self) -> bool {
        matches!(self.identifier, NodeIdentifier::Numeric(_))
    }

    /// Returns `true` if this is a string identifier.
    #[inline]
    pub const fn is_string(&self) -> bool {
        matches!(self.identifier, NodeIdentifier::String(_))
    }

    /// Returns `true` if this is a null node ID (ns=0, i=0).
    pub fn is_null(&self) -> bool {
        self.namespace == 0
            && self.namespace_uri.is_empty()
            && self.server_index == 0
            && matches!(self.identifier, NodeIdentifier::Numeric(0))
    }

    /// Derives the encoding flags byte for this node ID.
    ///
    /// The identifier form occupies the low bits; [`encoding::NAMESPACE_URI`]
    /// is or-ed in when a URI is present and [`encoding::SERVER_INDEX`] when
    /// the server index is non-zero. Exactly one form bit pattern is ever
    /// produced per identifier kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use crimp_opcua::types::{encoding, NodeId};
    ///
    /// let plain = NodeId::numeric(2, 1001);
    /// assert_eq!(plain.encoding_byte(), encoding::NUMERIC);
    ///
    /// let expanded = plain.with_namespace_uri("urn:plant").with_server_index(1);
    /// assert_eq!(
    ///     expanded.encoding_byte(),
    ///     encoding::NUMERIC | encoding::NAMESPACE_URI | encoding::SERVER_INDEX
    /// );
    /// ```
    pub fn encoding_byte(&self) -> u8 {
        let mut byte = match &self.identifier {
            NodeIdentifier::Numeric(_) => encoding::NUMERIC,
            NodeIdentifier::String(_) => encoding::STRING,
            NodeIdentifier::Guid(_) => encoding::GUID,
            NodeIdentifier::Opaque(_) => encoding::BYTE_STRING,
        };
        if !self.namespace_uri.is_empty() {
            byte |= encoding::NAMESPACE_URI;
        }
        if self.server_index != 0 {
            byte |= encoding::SERVER_INDEX;
        }
        byte
    }

    /// Returns the identifier kind as a string.
    pub const fn identifier_kind(&self) -> &'static str {
        match &self.identifier {
            NodeIdentifier::Numeric(_) => "numeric",
            NodeIdentifier::String(_) => "string",
            NodeIdentifier::Guid(_) => "guid",
            NodeIdentifier::Opaque(_) => "opaque",
        }
    }

    /// Converts to the OPC UA string format.
    ///
    /// Format: `[svr=<index>;][nsu=<uri>;][ns=<namespace>;]{i|s|g|b}=<identifier>`
    pub fn to_opc_string(&self) -> String {
        let id_str = match &self.identifier {
            NodeIdentifier::Numeric(v) => format!("i={}", v),
            NodeIdentifier::String(v) => format!("s={}", v),
            NodeIdentifier::Guid(v) => format!("g={}", v),
            NodeIdentifier::Opaque(v) => format!("b={}", BASE64.encode(v)),
        };

        let mut out = String::new();
        if self.server_index != 0 {
            out.push_str(&format!("svr={};", self.server_index));
        }
        if !self.namespace_uri.is_empty() {
            out.push_str(&format!("nsu={};", self.namespace_uri));
        }
        if self.namespace != 0 {
            out.push_str(&format!("ns={};", self.namespace));
        }
        out.push_str(&id_str);
        out
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::null()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_opc_string())
    }
}

// =============================================================================
// NodeIdentifier
// =============================================================================

/// The identifier part of a wire [`NodeId`].
///
/// The compressed two-byte and four-byte numeric encodings normalize to
/// [`NodeIdentifier::Numeric`] when a flags byte is interpreted; the typed
/// model does not distinguish them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeIdentifier {
    /// Numeric identifier.
    Numeric(u32),
    /// String identifier.
    String(String),
    /// GUID identifier.
    Guid(Uuid),
    /// Opaque byte string identifier.
    Opaque(Vec<u8>),
}

// =============================================================================
// VariantTag
// =============================================================================

/// Wire type tags a [`Variant`] can carry.
///
/// The discriminants are the OPC UA built-in type identifiers, which double
/// as the numeric node IDs of the corresponding DataType nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum VariantTag {
    /// Boolean.
    Boolean = 1,
    /// Signed 8-bit integer.
    SByte = 2,
    /// Unsigned 8-bit integer.
    Byte = 3,
    /// Signed 16-bit integer.
    Int16 = 4,
    /// Unsigned 16-bit integer.
    UInt16 = 5,
    /// Signed 32-bit integer.
    Int32 = 6,
    /// Unsigned 32-bit integer.
    UInt32 = 7,
    /// Signed 64-bit integer.
    Int64 = 8,
    /// Unsigned 64-bit integer.
    UInt64 = 9,
    /// 32-bit float.
    Float = 10,
    /// 64-bit float.
    Double = 11,
    /// UTF-8 string.
    String = 12,
    /// Node identifier.
    NodeId = 17,
}

impl VariantTag {
    /// Returns the OPC UA built-in type identifier.
    #[inline]
    pub const fn type_id(self) -> u8 {
        self as u8
    }

    /// Returns the tag name as used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            VariantTag::Boolean => "Boolean",
            VariantTag::SByte => "SByte",
            VariantTag::Byte => "Byte",
            VariantTag::Int16 => "Int16",
            VariantTag::UInt16 => "UInt16",
            VariantTag::Int32 => "Int32",
            VariantTag::UInt32 => "UInt32",
            VariantTag::Int64 => "Int64",
            VariantTag::UInt64 => "UInt64",
            VariantTag::Float => "Float",
            VariantTag::Double => "Double",
            VariantTag::String => "String",
            VariantTag::NodeId => "NodeId",
        }
    }
}

impl fmt::Display for VariantTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// =============================================================================
// Variant
// =============================================================================

/// A tagged OPC UA value.
///
/// A variant is either null, a single scalar, or a homogeneous array.
/// Homogeneity is structural: [`VariantList`] stores one typed vector per
/// tag, so a mixed array cannot be represented at all.
///
/// # Examples
///
/// ```
/// use crimp_opcua::types::{Variant, VariantTag};
///
/// let v = Variant::Int32(42);
/// assert_eq!(v.tag(), Some(VariantTag::Int32));
/// assert_eq!(v.len(), 1);
/// assert!(!v.is_array());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Variant {
    /// Absent value.
    Null,
    /// Boolean scalar.
    Boolean(bool),
    /// Signed 8-bit scalar.
    SByte(i8),
    /// Unsigned 8-bit scalar.
    Byte(u8),
    /// Signed 16-bit scalar.
    Int16(i16),
    /// Unsigned 16-bit scalar.
    UInt16(u16),
    /// Signed 32-bit scalar.
    Int32(i32),
    /// Unsigned 32-bit scalar.
    UInt32(u32),
    /// Signed 64-bit scalar.
    Int64(i64),
    /// Unsigned 64-bit scalar.
    UInt64(u64),
    /// 32-bit float scalar.
    Float(f32),
    /// 64-bit float scalar.
    Double(f64),
    /// String scalar.
    String(String),
    /// Node identifier scalar.
    NodeId(NodeId),
    /// Homogeneous array.
    Array(VariantList),
}

impl Variant {
    /// Returns the wire type tag, or `None` for a null variant.
    pub fn tag(&self) -> Option<VariantTag> {
        match self {
            Variant::Null => None,
            Variant::Boolean(_) => Some(VariantTag::Boolean),
            Variant::SByte(_) => Some(VariantTag::SByte),
            Variant::Byte(_) => Some(VariantTag::Byte),
            Variant::Int16(_) => Some(VariantTag::Int16),
            Variant::UInt16(_) => Some(VariantTag::UInt16),
            Variant::Int32(_) => Some(VariantTag::Int32),
            Variant::UInt32(_) => Some(VariantTag::UInt32),
            Variant::Int64(_) => Some(VariantTag::Int64),
            Variant::UInt64(_) => Some(VariantTag::UInt64),
            Variant::Float(_) => Some(VariantTag::Float),
            Variant::Double(_) => Some(VariantTag::Double),
            Variant::String(_) => Some(VariantTag::String),
            Variant::NodeId(_) => Some(VariantTag::NodeId),
            Variant::Array(list) => Some(list.tag()),
        }
    }

    /// Returns the number of carried elements.
    ///
    /// Null has zero, scalars have one, arrays have their length.
    pub fn len(&self) -> usize {
        match self {
            Variant::Null => 0,
            Variant::Array(list) => list.len(),
            _ => 1,
        }
    }

    /// Returns `true` if the variant carries no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if this is the null variant.
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Variant::Null)
    }

    /// Returns `true` if this is an array variant.
    #[inline]
    pub const fn is_array(&self) -> bool {
        matches!(self, Variant::Array(_))
    }
}

impl Default for Variant {
    fn default() -> Self {
        Variant::Null
    }
}

// =============================================================================
// VariantList
// =============================================================================

/// Typed array payload of a [`Variant`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "items", rename_all = "snake_case")]
pub enum VariantList {
    /// Boolean array.
    Boolean(Vec<bool>),
    /// Signed 8-bit array.
    SByte(Vec<i8>),
    /// Unsigned 8-bit array.
    Byte(Vec<u8>),
    /// Signed 16-bit array.
    Int16(Vec<i16>),
    /// Unsigned 16-bit array.
    UInt16(Vec<u16>),
    /// Signed 32-bit array.
    Int32(Vec<i32>),
    /// Unsigned 32-bit array.
    UInt32(Vec<u32>),
    /// Signed 64-bit array.
    Int64(Vec<i64>),
    /// Unsigned 64-bit array.
    UInt64(Vec<u64>),
    /// 32-bit float array.
    Float(Vec<f32>),
    /// 64-bit float array.
    Double(Vec<f64>),
    /// String array.
    String(Vec<String>),
    /// Node identifier array.
    NodeId(Vec<NodeId>),
}

impl VariantList {
    /// Returns the element type tag.
    pub const fn tag(&self) -> VariantTag {
        match self {
            VariantList::Boolean(_) => VariantTag::Boolean,
            VariantList::SByte(_) => VariantTag::SByte,
            VariantList::Byte(_) => VariantTag::Byte,
            VariantList::Int16(_) => VariantTag::Int16,
            VariantList::UInt16(_) => VariantTag::UInt16,
            VariantList::Int32(_) => VariantTag::Int32,
            VariantList::UInt32(_) => VariantTag::UInt32,
            VariantList::Int64(_) => VariantTag::Int64,
            VariantList::UInt64(_) => VariantTag::UInt64,
            VariantList::Float(_) => VariantTag::Float,
            VariantList::Double(_) => VariantTag::Double,
            VariantList::String(_) => VariantTag::String,
            VariantList::NodeId(_) => VariantTag::NodeId,
        }
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        match self {
            VariantList::Boolean(v) => v.len(),
            VariantList::SByte(v) => v.len(),
            VariantList::Byte(v) => v.len(),
            VariantList::Int16(v) => v.len(),
            VariantList::UInt16(v) => v.len(),
            VariantList::Int32(v) => v.len(),
            VariantList::UInt32(v) => v.len(),
            VariantList::Int64(v) => v.len(),
            VariantList::UInt64(v) => v.len(),
            VariantList::Float(v) => v.len(),
            VariantList::Double(v) => v.len(),
            VariantList::String(v) => v.len(),
            VariantList::NodeId(v) => v.len(),
        }
    }

    /// Returns `true` if the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// QualifiedName
// =============================================================================

/// A name qualified by a namespace index.
///
/// # Examples
///
/// ```
/// use crimp_opcua::types::QualifiedName;
///
/// let name = QualifiedName::parse("2:Motor").unwrap();
/// assert_eq!(name.namespace, 2);
/// assert_eq!(name.name, "Motor");
/// assert_eq!(name.to_string(), "2:Motor");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct QualifiedName {
    /// Namespace index.
    pub namespace: u16,
    /// The name within that namespace.
    pub name: String,
}

impl QualifiedName {
    /// Creates a qualified name.
    pub fn new(namespace: u16, name: impl Into<String>) -> Self {
        Self {
            namespace,
            name: name.into(),
        }
    }

    /// Parses the `<namespace>:<name>` form; bare names get namespace 0.
    pub fn parse(text: &str) -> Option<Self> {
        match text.split_once(':') {
            Some((ns, name)) => {
                let namespace = ns.parse().ok()?;
                Some(Self::new(namespace, name))
            }
            None => Some(Self::new(0, text)),
        }
    }

    /// Returns `true` if both parts are at their defaults.
    pub fn is_empty(&self) -> bool {
        self.namespace == 0 && self.name.is_empty()
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace == 0 {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}:{}", self.namespace, self.name)
        }
    }
}

// =============================================================================
// LocalizedText
// =============================================================================

/// Human readable text with an optional locale.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LocalizedText {
    /// RFC 3066 locale identifier. Empty means unspecified.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub locale: String,
    /// The text itself.
    pub text: String,
}

impl LocalizedText {
    /// Creates text without a locale.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            locale: String::new(),
            text: text.into(),
        }
    }

    /// Creates text with a locale.
    pub fn with_locale(locale: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            text: text.into(),
        }
    }
}

impl fmt::Display for LocalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

// =============================================================================
// DataValueMask
// =============================================================================

bitflags! {
    /// Presence mask of a wire [`DataValue`].
    ///
    /// Each bit flags one field as present. Fields whose bit is clear hold
    /// their zero default and carry no information.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DataValueMask: u8 {
        /// The value field is present.
        const VALUE = 0x01;
        /// The status code field is present.
        const STATUS_CODE = 0x02;
        /// The source timestamp field is present.
        const SOURCE_TIMESTAMP = 0x04;
        /// The server timestamp field is present.
        const SERVER_TIMESTAMP = 0x08;
        /// The source picoseconds field is present.
        const SOURCE_PICOSECONDS = 0x10;
        /// The server picoseconds field is present.
        const SERVER_PICOSECONDS = 0x20;
    }
}

// Masks travel as their raw bits.
impl Serialize for DataValueMask {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.bits())
    }
}

impl<'de> Deserialize<'de> for DataValueMask {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_bits_truncate(u8::deserialize(deserializer)?))
    }
}

// =============================================================================
// DataValue
// =============================================================================

/// Wire-level value-with-metadata record.
///
/// Timestamps are in OPC UA ticks: 100 nanosecond intervals since
/// 1601-01-01T00:00:00Z. A field is meaningful only when its bit is set in
/// [`DataValue::mask`]; the record codec maintains that coupling.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataValue {
    /// Which fields are present.
    pub mask: DataValueMask,
    /// The value. Meaningful when `VALUE` is set.
    #[serde(default, skip_serializing_if = "Variant::is_null")]
    pub value: Variant,
    /// Status code. Meaningful when `STATUS_CODE` is set.
    #[serde(default, skip_serializing_if = "status_is_default")]
    pub status: StatusCode,
    /// Source timestamp in ticks. Meaningful when `SOURCE_TIMESTAMP` is set.
    #[serde(default, skip_serializing_if = "is_zero_u64")]
    pub source_timestamp: u64,
    /// Source picoseconds. Meaningful when `SOURCE_PICOSECONDS` is set.
    #[serde(default, skip_serializing_if = "is_zero_u16")]
    pub source_picoseconds: u16,
    /// Server timestamp in ticks. Meaningful when `SERVER_TIMESTAMP` is set.
    #[serde(default, skip_serializing_if = "is_zero_u64")]
    pub server_timestamp: u64,
    /// Server picoseconds. Meaningful when `SERVER_PICOSECONDS` is set.
    #[serde(default, skip_serializing_if = "is_zero_u16")]
    pub server_picoseconds: u16,
}

#[inline]
fn is_zero_u64(v: &u64) -> bool {
    *v == 0
}

#[inline]
fn is_zero_u16(v: &u16) -> bool {
    *v == 0
}

#[inline]
fn status_is_default(v: &StatusCode) -> bool {
    *v == StatusCode::GOOD
}

impl DataValue {
    /// Creates a data value carrying only a variant.
    pub fn from_variant(value: Variant) -> Self {
        Self {
            mask: DataValueMask::VALUE,
            value,
            ..Self::default()
        }
    }

    /// Returns `true` if no field is present.
    pub fn is_empty(&self) -> bool {
        self.mask.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
