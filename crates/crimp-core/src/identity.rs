// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Host-side node identities.
//!
//! An [`Identity`] names a node in an OPC UA address space from the host's
//! point of view. It supports exactly two identifier forms, numeric and
//! string, which is the subset hosts can round-trip through the wire layer.
//! GUID and opaque identifiers exist only in the wire model and are rejected
//! on decode.
//!
//! Identities carry optional expanded addressing: an explicit namespace URI
//! that overrides the numeric namespace index, and a server index for
//! multi-server topologies. Both default to absent.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::IdentityError;

// =============================================================================
// Identifier
// =============================================================================

/// The identifier part of an [`Identity`].
///
/// Exactly one form is populated; the kind is fixed at construction and
/// never inferred from the payload. A string identifier whose text happens
/// to be numeric stays a string identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Identifier {
    /// Numeric identifier (e.g. `i=1001`).
    Numeric(u32),
    /// String identifier (e.g. `s=Temperature.Value`).
    String(String),
}

impl Identifier {
    /// Returns the identifier kind as a string.
    pub const fn kind(&self) -> &'static str {
        match self {
            Identifier::Numeric(_) => "numeric",
            Identifier::String(_) => "string",
        }
    }
}

// =============================================================================
// Identity
// =============================================================================

/// A host-side reference to an address-space node.
///
/// # Examples
///
/// ```
/// use crimp_core::Identity;
///
/// let temp = Identity::string(2, "Temperature.Value");
/// assert_eq!(temp.to_string(), "ns=2;s=Temperature.Value");
///
/// let root = Identity::ROOT_FOLDER;
/// assert_eq!(root.to_string(), "i=84");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    /// Namespace index within the server's namespace table.
    pub namespace: u16,
    /// Numeric or string identifier.
    pub identifier: Identifier,
    /// Explicit namespace URI. When present and non-empty it takes
    /// precedence over `namespace` on the wire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace_uri: Option<String>,
    /// Server index for multi-server address spaces. Zero means local.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub server_index: u32,
}

#[inline]
fn is_zero(v: &u32) -> bool {
    *v == 0
}

impl Identity {
    // =========================================================================
    // Well-known nodes (namespace 0)
    // =========================================================================

    /// Root folder node (i=84).
    pub const ROOT_FOLDER: Identity = Identity::well_known(84);

    /// Objects folder node (i=85).
    pub const OBJECTS_FOLDER: Identity = Identity::well_known(85);

    /// Types folder node (i=86).
    pub const TYPES_FOLDER: Identity = Identity::well_known(86);

    /// Views folder node (i=87).
    pub const VIEWS_FOLDER: Identity = Identity::well_known(87);

    /// Server object node (i=2253).
    pub const SERVER: Identity = Identity::well_known(2253);

    const fn well_known(id: u32) -> Identity {
        Identity {
            namespace: 0,
            identifier: Identifier::Numeric(id),
            namespace_uri: None,
            server_index: 0,
        }
    }

    // =========================================================================
    // Constructors
    // =========================================================================

    /// Creates a numeric identity.
    pub const fn numeric(namespace: u16, id: u32) -> Self {
        Self {
            namespace,
            identifier: Identifier::Numeric(id),
            namespace_uri: None,
            server_index: 0,
        }
    }

    /// Creates a string identity.
    pub fn string(namespace: u16, id: impl Into<String>) -> Self {
        Self {
            namespace,
            identifier: Identifier::String(id.into()),
            namespace_uri: None,
            server_index: 0,
        }
    }

    /// Sets the namespace URI.
    pub fn with_namespace_uri(mut self, uri: impl Into<String>) -> Self {
        self.namespace_uri = Some(uri.into());
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

    /// Returns `true` if this is a numeric identity.
    #[inline]
    pub const fn is_numeric(&self) -> bool {
        matches!(self.identifier, Identifier::Numeric(_))
    }

    /// Returns `true` if this is a string identity.
    #[inline]
    pub const fn is_string(&self) -> bool {
        matches!(self.identifier, Identifier::String(_))
    }

    /// Returns the namespace URI that actually takes effect.
    ///
    /// An empty URI is treated the same as an absent one.
    #[inline]
    pub fn resolved_uri(&self) -> Option<&str> {
        self.namespace_uri.as_deref().filter(|u| !u.is_empty())
    }

    /// Returns `true` if this identity uses expanded addressing
    /// (namespace URI or non-zero server index).
    pub fn is_expanded(&self) -> bool {
        self.resolved_uri().is_some() || self.server_index != 0
    }

    /// Returns the numeric value if this is a numeric identity.
    #[inline]
    pub fn as_numeric(&self) -> Option<u32> {
        match &self.identifier {
            Identifier::Numeric(v) => Some(*v),
            Identifier::String(_) => None,
        }
    }

    /// Returns the string value if this is a string identity.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match &self.identifier {
            Identifier::Numeric(_) => None,
            Identifier::String(v) => Some(v),
        }
    }
}

impl Default for Identity {
    fn default() -> Self {
        Identity::numeric(0, 0)
    }
}

// =============================================================================
// Text format
// =============================================================================

impl fmt::Display for Identity {
    /// Formats in the OPC UA expanded text form.
    ///
    /// Format: `[svr=<index>;][nsu=<uri>;][ns=<namespace>;]{i|s}=<identifier>`
    ///
    /// Prefixes are omitted when they carry their default value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.server_index != 0 {
            write!(f, "svr={};", self.server_index)?;
        }
        if let Some(uri) = self.resolved_uri() {
            write!(f, "nsu={};", uri)?;
        }
        if self.namespace != 0 {
            write!(f, "ns={};", self.namespace)?;
        }
        match &self.identifier {
            Identifier::Numeric(v) => write!(f, "i={}", v),
            Identifier::String(v) => write!(f, "s={}", v),
        }
    }
}

impl FromStr for Identity {
    type Err = IdentityError;

    /// Parses an identity from the OPC UA text form.
    ///
    /// Supported formats:
    /// - `ns=2;i=1001` (numeric)
    /// - `ns=2;s=MyNode` (string)
    /// - `i=1001` (numeric, namespace 0)
    /// - `svr=1;nsu=urn:factory:plc;s=Line1.Speed` (expanded)
    ///
    /// GUID (`g=`) and opaque (`b=`) identifiers have no host representation
    /// and are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let original = s;
        let mut rest = s.trim();

        let mut server_index = 0u32;
        if let Some(tail) = rest.strip_prefix("svr=") {
            let (value, tail) = split_prefix_value(original, tail)?;
            server_index = value
                .parse()
                .map_err(|_| IdentityError::invalid_text(original, "Invalid server index"))?;
            rest = tail;
        }

        let mut namespace_uri = None;
        if let Some(tail) = rest.strip_prefix("nsu=") {
            let (value, tail) = split_prefix_value(original, tail)?;
            namespace_uri = Some(value.to_string());
            rest = tail;
        }

        let mut namespace = 0u16;
        if let Some(tail) = rest.strip_prefix("ns=") {
            let (value, tail) = split_prefix_value(original, tail)?;
            namespace = value
                .parse()
                .map_err(|_| IdentityError::invalid_text(original, "Invalid namespace index"))?;
            rest = tail;
        }

        let identifier = if let Some(id) = rest.strip_prefix("i=") {
            let value: u32 = id
                .parse()
                .map_err(|_| IdentityError::invalid_text(original, "Invalid numeric identifier"))?;
            Identifier::Numeric(value)
        } else if let Some(id) = rest.strip_prefix("s=") {
            Identifier::String(id.to_string())
        } else if rest.starts_with("g=") {
            return Err(IdentityError::unsupported_form(original, "guid"));
        } else if rest.starts_with("b=") {
            return Err(IdentityError::unsupported_form(original, "opaque"));
        } else {
            return Err(IdentityError::invalid_text(
                original,
                "Unknown identifier form. Expected i= or s=",
            ));
        };

        Ok(Self {
            namespace,
            identifier,
            namespace_uri,
            server_index,
        })
    }
}

/// Splits `head;tail` after a `key=` prefix has been stripped.
fn split_prefix_value<'a>(
    original: &str,
    tail: &'a str,
) -> Result<(&'a str, &'a str), IdentityError> {
    match tail.split_once(';') {
        Some((value, rest)) => Ok((value, rest)),
        None => Err(IdentityError::invalid_text(
            original,
            "Missing identifier after prefix",
        )),
    }
}

// =============================================================================
// Tests
// =============================================================================
