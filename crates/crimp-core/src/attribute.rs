// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Protocol constant tables shared by hosts and the wire layer.
//!
//! These enums mirror the values OPC UA defines; the numeric discriminants
//! are part of the protocol and must not change.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// AttributeId
// =============================================================================

/// Node attribute identifiers (OPC UA Part 4).
///
/// # Examples
///
/// ```
/// use crimp_core::AttributeId;
///
/// assert_eq!(AttributeId::Value.as_u32(), 13);
/// assert_eq!(AttributeId::from_u32(13), Some(AttributeId::Value));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum AttributeId {
    /// Canonical node identifier.
    NodeId = 1,
    /// Node class.
    NodeClass = 2,
    /// Browse name.
    BrowseName = 3,
    /// Localized display name.
    DisplayName = 4,
    /// Localized description.
    Description = 5,
    /// Write mask.
    WriteMask = 6,
    /// User write mask.
    UserWriteMask = 7,
    /// Whether a type node is abstract.
    IsAbstract = 8,
    /// Whether a reference type is symmetric.
    Symmetric = 9,
    /// Inverse name of a reference type.
    InverseName = 10,
    /// Whether a view contains no loops.
    ContainsNoLoops = 11,
    /// Event notifier byte.
    EventNotifier = 12,
    /// Current value of a variable node.
    Value = 13,
    /// Data type of a variable node.
    DataType = 14,
    /// Value rank (scalar or array dimensionality).
    ValueRank = 15,
    /// Array dimensions.
    ArrayDimensions = 16,
    /// Access level byte.
    AccessLevel = 17,
    /// User access level byte.
    UserAccessLevel = 18,
    /// Minimum sampling interval in milliseconds.
    MinimumSamplingInterval = 19,
    /// Whether history is collected.
    Historizing = 20,
    /// Whether a method is executable.
    Executable = 21,
    /// Whether a method is executable by the current user.
    UserExecutable = 22,
}

impl AttributeId {
    /// Returns the protocol value.
    #[inline]
    pub const fn as_u32(self) -> u32 {
        self as u32
    }

    /// Looks up an attribute by its protocol value.
    pub const fn from_u32(value: u32) -> Option<Self> {
        Some(match value {
            1 => AttributeId::NodeId,
            2 => AttributeId::NodeClass,
            3 => AttributeId::BrowseName,
            4 => AttributeId::DisplayName,
            5 => AttributeId::Description,
            6 => AttributeId::WriteMask,
            7 => AttributeId::UserWriteMask,
            8 => AttributeId::IsAbstract,
            9 => AttributeId::Symmetric,
            10 => AttributeId::InverseName,
            11 => AttributeId::ContainsNoLoops,
            12 => AttributeId::EventNotifier,
            13 => AttributeId::Value,
            14 => AttributeId::DataType,
            15 => AttributeId::ValueRank,
            16 => AttributeId::ArrayDimensions,
            17 => AttributeId::AccessLevel,
            18 => AttributeId::UserAccessLevel,
            19 => AttributeId::MinimumSamplingInterval,
            20 => AttributeId::Historizing,
            21 => AttributeId::Executable,
            22 => AttributeId::UserExecutable,
            _ => return None,
        })
    }
}

impl Default for AttributeId {
    fn default() -> Self {
        AttributeId::Value
    }
}

impl fmt::Display for AttributeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// =============================================================================
// StatusCode
// =============================================================================

/// An OPC UA status code.
///
/// The top two bits carry the severity: `00` good, `01` uncertain,
/// `10` bad. The remaining bits identify the condition.
///
/// # Examples
///
/// ```
/// use crimp_core::StatusCode;
///
/// assert!(StatusCode::GOOD.is_good());
/// assert!(StatusCode::BAD_NOT_READABLE.is_bad());
/// assert_eq!(StatusCode::GOOD.name(), "Good");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusCode(u32);

impl StatusCode {
    /// The operation succeeded.
    pub const GOOD: StatusCode = StatusCode(0x0000_0000);
    /// The attribute is not supported for the specified node.
    pub const BAD_ATTRIBUTE_ID_INVALID: StatusCode = StatusCode(0x8035_0000);
    /// The node identifier is not valid.
    pub const BAD_NODE_ID_INVALID: StatusCode = StatusCode(0x8033_0000);
    /// The node identifier refers to an unknown node.
    pub const BAD_NODE_ID_UNKNOWN: StatusCode = StatusCode(0x8034_0000);
    /// The requested operation is not implemented.
    pub const BAD_NOT_IMPLEMENTED: StatusCode = StatusCode(0x8040_0000);
    /// The access level does not allow reading.
    pub const BAD_NOT_READABLE: StatusCode = StatusCode(0x803A_0000);
    /// The access level does not allow writing.
    pub const BAD_NOT_WRITABLE: StatusCode = StatusCode(0x803B_0000);
    /// The value supplied does not match the node's data type.
    pub const BAD_TYPE_MISMATCH: StatusCode = StatusCode(0x8074_0000);
    /// The value is out of range.
    pub const BAD_OUT_OF_RANGE: StatusCode = StatusCode(0x803C_0000);
    /// Writing the attribute is not supported.
    pub const BAD_WRITE_NOT_SUPPORTED: StatusCode = StatusCode(0x8073_0000);

    /// Creates a status code from its raw protocol value.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        StatusCode(raw)
    }

    /// Returns the raw protocol value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns `true` if the severity is bad.
    #[inline]
    pub const fn is_bad(self) -> bool {
        self.0 & 0x8000_0000 != 0
    }

    /// Returns `true` if the severity is uncertain.
    #[inline]
    pub const fn is_uncertain(self) -> bool {
        !self.is_bad() && self.0 & 0x4000_0000 != 0
    }

    /// Returns `true` if the severity is good.
    #[inline]
    pub const fn is_good(self) -> bool {
        self.0 & 0xC000_0000 == 0
    }

    /// Returns a human readable name for well-known codes.
    pub const fn name(self) -> &'static str {
        match self.0 {
            0x0000_0000 => "Good",
            0x8033_0000 => "BadNodeIdInvalid",
            0x8034_0000 => "BadNodeIdUnknown",
            0x8035_0000 => "BadAttributeIdInvalid",
            0x803A_0000 => "BadNotReadable",
            0x803B_0000 => "BadNotWritable",
            0x803C_0000 => "BadOutOfRange",
            0x8040_0000 => "BadNotImplemented",
            0x8073_0000 => "BadWriteNotSupported",
            0x8074_0000 => "BadTypeMismatch",
            _ => "Unknown",
        }
    }
}

impl Default for StatusCode {
    fn default() -> Self {
        StatusCode::GOOD
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            "Unknown" => write!(f, "0x{:08X}", self.0),
            name => write!(f, "{}", name),
        }
    }
}

impl From<u32> for StatusCode {
    fn from(raw: u32) -> Self {
        StatusCode(raw)
    }
}

// =============================================================================
// NodeClass
// =============================================================================

/// Node classes (OPC UA Part 3).
///
/// The discriminants are single bits so that class lists can be folded
/// into a browse filter mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum NodeClass {
    /// Generic object node.
    Object = 1,
    /// Variable node holding a value.
    Variable = 2,
    /// Callable method node.
    Method = 4,
    /// Object type definition.
    ObjectType = 8,
    /// Variable type definition.
    VariableType = 16,
    /// Reference type definition.
    ReferenceType = 32,
    /// Data type definition.
    DataType = 64,
    /// View node.
    View = 128,
}

impl NodeClass {
    /// Returns the protocol bit value.
    #[inline]
    pub const fn as_u32(self) -> u32 {
        self as u32
    }

    /// Looks up a node class by its protocol value.
    pub const fn from_u32(value: u32) -> Option<Self> {
        Some(match value {
            1 => NodeClass::Object,
            2 => NodeClass::Variable,
            4 => NodeClass::Method,
            8 => NodeClass::ObjectType,
            16 => NodeClass::VariableType,
            32 => NodeClass::ReferenceType,
            64 => NodeClass::DataType,
            128 => NodeClass::View,
            _ => return None,
        })
    }
}

impl fmt::Display for NodeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// =============================================================================
// BrowseDirection
// =============================================================================

/// Direction of reference traversal during a browse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum BrowseDirection {
    /// Follow references from source to target.
    Forward = 0,
    /// Follow references from target to source.
    Inverse = 1,
    /// Follow references in both directions.
    Both = 2,
}

impl Default for BrowseDirection {
    fn default() -> Self {
        BrowseDirection::Forward
    }
}

// =============================================================================
// TimestampsToReturn
// =============================================================================

/// Which timestamps a read should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum TimestampsToReturn {
    /// Source timestamps only.
    Source = 0,
    /// Server timestamps only.
    Server = 1,
    /// Both source and server timestamps.
    Both = 2,
    /// No timestamps.
    Neither = 3,
}

impl Default for TimestampsToReturn {
    fn default() -> Self {
        TimestampsToReturn::Source
    }
}

// =============================================================================
// Tests
// =============================================================================
