// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Dynamic host values.
//!
//! [`DynamicValue`] is the loosely typed value model that application code
//! hands to the marshalling layer. It deliberately carries less type
//! information than the OPC UA wire model: hosts think in terms of "an
//! integer" or "a list of floats", and the codec layer decides which wire
//! representation that becomes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::identity::Identity;

// =============================================================================
// DynamicValue
// =============================================================================

/// A dynamically typed host value.
///
/// This is the input to variant encoding and the output of variant decoding.
/// Sequences are untyped at this level; element homogeneity is enforced by
/// the codec when a sequence is encoded.
///
/// # Examples
///
/// ```
/// use crimp_core::DynamicValue;
///
/// let v = DynamicValue::Int(42);
/// assert_eq!(v.as_i64(), Some(42));
/// assert_eq!(v.kind(), "int");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum DynamicValue {
    /// Absent value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// UTF-8 string value.
    String(String),
    /// Reference to an address-space node.
    Identity(Identity),
    /// Ordered sequence of values.
    Seq(Vec<DynamicValue>),
}

impl DynamicValue {
    /// Returns the kind of this value as a string.
    ///
    /// Kind names are stable and appear in error messages and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            DynamicValue::Null => "null",
            DynamicValue::Bool(_) => "bool",
            DynamicValue::Int(_) => "int",
            DynamicValue::Float(_) => "float",
            DynamicValue::String(_) => "string",
            DynamicValue::Identity(_) => "identity",
            DynamicValue::Seq(_) => "seq",
        }
    }

    /// Returns true if the value is null.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, DynamicValue::Null)
    }

    /// Returns true if the value is numeric (int or float).
    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(self, DynamicValue::Int(_) | DynamicValue::Float(_))
    }

    /// Returns true if the value is a sequence.
    #[inline]
    pub fn is_seq(&self) -> bool {
        matches!(self, DynamicValue::Seq(_))
    }

    /// Python-style truthiness, used by the lossy record compatibility mode.
    ///
    /// Null, `false`, `0`, `0.0`, the empty string and the empty sequence
    /// are falsy; everything else (identities included) is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            DynamicValue::Null => false,
            DynamicValue::Bool(b) => *b,
            DynamicValue::Int(i) => *i != 0,
            DynamicValue::Float(f) => *f != 0.0,
            DynamicValue::String(s) => !s.is_empty(),
            DynamicValue::Identity(_) => true,
            DynamicValue::Seq(items) => !items.is_empty(),
        }
    }

    /// Attempts to get the value as a boolean.
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DynamicValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to get the value as a signed integer.
    #[inline]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            DynamicValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Attempts to get the value as a float.
    ///
    /// Integers convert losslessly up to 2^53.
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DynamicValue::Float(f) => Some(*f),
            DynamicValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Attempts to get the value as a string slice.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DynamicValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to get the value as an identity reference.
    #[inline]
    pub fn as_identity(&self) -> Option<&Identity> {
        match self {
            DynamicValue::Identity(id) => Some(id),
            _ => None,
        }
    }

    /// Attempts to get the value as a sequence slice.
    #[inline]
    pub fn as_seq(&self) -> Option<&[DynamicValue]> {
        match self {
            DynamicValue::Seq(items) => Some(items),
            _ => None,
        }
    }
}

impl Default for DynamicValue {
    fn default() -> Self {
        DynamicValue::Null
    }
}

impl fmt::Display for DynamicValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DynamicValue::Null => write!(f, "null"),
            DynamicValue::Bool(b) => write!(f, "{}", b),
            DynamicValue::Int(i) => write!(f, "{}", i),
            DynamicValue::Float(v) => write!(f, "{}", v),
            DynamicValue::String(s) => write!(f, "{}", s),
            DynamicValue::Identity(id) => write!(f, "{}", id),
            DynamicValue::Seq(items) => write!(f, "[{} elements]", items.len()),
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

/// Implements `From` for integer types that widen into `Int`.
macro_rules! impl_from_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for DynamicValue {
                fn from(v: $t) -> Self {
                    DynamicValue::Int(i64::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for DynamicValue {
    fn from(v: bool) -> Self {
        DynamicValue::Bool(v)
    }
}

impl From<f32> for DynamicValue {
    fn from(v: f32) -> Self {
        DynamicValue::Float(f64::from(v))
    }
}

impl From<f64> for DynamicValue {
    fn from(v: f64) -> Self {
        DynamicValue::Float(v)
    }
}

impl From<String> for DynamicValue {
    fn from(v: String) -> Self {
        DynamicValue::String(v)
    }
}

impl From<&str> for DynamicValue {
    fn from(v: &str) -> Self {
        DynamicValue::String(v.to_string())
    }
}

impl From<Identity> for DynamicValue {
    fn from(v: Identity) -> Self {
        DynamicValue::Identity(v)
    }
}

impl<T: Into<DynamicValue>> From<Vec<T>> for DynamicValue {
    fn from(items: Vec<T>) -> Self {
        DynamicValue::Seq(items.into_iter().map(Into::into).collect())
    }
}

// =============================================================================
// Tests
// =============================================================================
