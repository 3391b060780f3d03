// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Endpoint and browse result descriptions.
//!
//! Wire structures returned by the discovery and Browse services, plus the
//! flattened host-side view of a browse reference. Endpoint structures are
//! consumed as-is; references convert to [`ReferenceInfo`] through the
//! identity codec so hosts never touch wire node IDs.

use serde::{Deserialize, Serialize};

use crimp_core::{Identity, NodeClass};

use crate::codec::IdentityCodec;
use crate::error::ConversionResult;
use crate::types::{LocalizedText, NodeId, QualifiedName};

// =============================================================================
// Security policy URIs
// =============================================================================

/// Standard security policy URIs offered in endpoint descriptions.
pub mod security_policies {
    /// No security.
    pub const NONE: &str = "http://opcfoundation.org/UA/SecurityPolicy#None";
    /// Basic128Rsa15 (deprecated).
    pub const BASIC128_RSA15: &str = "http://opcfoundation.org/UA/SecurityPolicy#Basic128Rsa15";
    /// Basic256 (deprecated).
    pub const BASIC256: &str = "http://opcfoundation.org/UA/SecurityPolicy#Basic256";
    /// Basic256Sha256.
    pub const BASIC256_SHA256: &str = "http://opcfoundation.org/UA/SecurityPolicy#Basic256Sha256";
    /// Aes128-Sha256-RsaOaep.
    pub const AES128_SHA256_RSA_OAEP: &str =
        "http://opcfoundation.org/UA/SecurityPolicy#Aes128_Sha256_RsaOaep";
    /// Aes256-Sha256-RsaPss.
    pub const AES256_SHA256_RSA_PSS: &str =
        "http://opcfoundation.org/UA/SecurityPolicy#Aes256_Sha256_RsaPss";
}

// =============================================================================
// Wire enumerations
// =============================================================================

/// The role an application plays in discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum ApplicationType {
    /// A server.
    Server = 0,
    /// A client.
    Client = 1,
    /// Both client and server.
    ClientAndServer = 2,
    /// A discovery server.
    DiscoveryServer = 3,
}

impl ApplicationType {
    /// Returns the wire value.
    #[inline]
    pub const fn as_u32(self) -> u32 {
        self as u32
    }

    /// Converts from a wire value.
    pub const fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Server),
            1 => Some(Self::Client),
            2 => Some(Self::ClientAndServer),
            3 => Some(Self::DiscoveryServer),
            _ => None,
        }
    }
}

impl Default for ApplicationType {
    fn default() -> Self {
        Self::Server
    }
}

/// Message security applied on a secure channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum SecurityMode {
    /// Mode not set.
    Invalid = 0,
    /// Messages are neither signed nor encrypted.
    None = 1,
    /// Messages are signed.
    Sign = 2,
    /// Messages are signed and encrypted.
    SignAndEncrypt = 3,
}

impl SecurityMode {
    /// Returns the wire value.
    #[inline]
    pub const fn as_u32(self) -> u32 {
        self as u32
    }

    /// Converts from a wire value.
    pub const fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Invalid),
            1 => Some(Self::None),
            2 => Some(Self::Sign),
            3 => Some(Self::SignAndEncrypt),
            _ => None,
        }
    }

    /// Returns `true` if messages are at least signed.
    #[inline]
    pub const fn is_secure(self) -> bool {
        matches!(self, Self::Sign | Self::SignAndEncrypt)
    }
}

impl Default for SecurityMode {
    fn default() -> Self {
        Self::Invalid
    }
}

/// How a user identity is proven at session activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum UserTokenType {
    /// No credentials.
    Anonymous = 0,
    /// User name and password.
    Username = 1,
    /// X.509 certificate.
    Certificate = 2,
    /// Token issued by an external authority.
    IssuedToken = 3,
}

impl UserTokenType {
    /// Returns the wire value.
    #[inline]
    pub const fn as_u32(self) -> u32 {
        self as u32
    }

    /// Converts from a wire value.
    pub const fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Anonymous),
            1 => Some(Self::Username),
            2 => Some(Self::Certificate),
            3 => Some(Self::IssuedToken),
            _ => None,
        }
    }
}

impl Default for UserTokenType {
    fn default() -> Self {
        Self::Anonymous
    }
}

// =============================================================================
// Endpoint structures
// =============================================================================

/// Description of an application known to a discovery server.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApplicationDescription {
    /// Globally unique application URI.
    pub application_uri: String,
    /// URI of the product.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub product_uri: String,
    /// Human-readable application name.
    #[serde(default)]
    pub name: LocalizedText,
    /// The role the application plays.
    #[serde(default)]
    pub application_type: ApplicationType,
    /// URI of the gateway server, when reached through one.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub gateway_server_uri: String,
    /// Discovery profile the application supports.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub discovery_profile_uri: String,
    /// URLs where the application can be discovered.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub discovery_urls: Vec<String>,
}

/// One way a user may authenticate against an endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserTokenPolicy {
    /// Server-assigned policy identifier, echoed back at activation.
    pub policy_id: String,
    /// The token kind this policy accepts.
    #[serde(default)]
    pub token_type: UserTokenType,
    /// Token type URI for issued tokens.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub issued_token_type: String,
    /// Endpoint of the token issuer.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub issuer_endpoint_url: String,
    /// Security policy securing the token, when it differs from the
    /// endpoint's.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub security_policy_uri: String,
}

/// Description of one server endpoint.
///
/// # Examples
///
/// ```
/// use crimp_opcua::endpoint::{security_policies, EndpointDescription, SecurityMode};
///
/// let endpoint = EndpointDescription {
///     endpoint_url: "opc.tcp://plc:4840".into(),
///     security_mode: SecurityMode::None,
///     security_policy_uri: security_policies::NONE.into(),
///     ..EndpointDescription::default()
/// };
/// assert!(!endpoint.is_secure());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EndpointDescription {
    /// URL clients connect to.
    pub endpoint_url: String,
    /// The server behind the endpoint.
    #[serde(default)]
    pub server: ApplicationDescription,
    /// Message security mode.
    #[serde(default)]
    pub security_mode: SecurityMode,
    /// Security policy URI.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub security_policy_uri: String,
    /// Accepted user authentication policies.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub user_identity_tokens: Vec<UserTokenPolicy>,
    /// Transport profile URI.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub transport_profile_uri: String,
    /// Relative security strength, higher is stronger.
    #[serde(default)]
    pub security_level: u8,
}

impl EndpointDescription {
    /// Returns `true` if the endpoint signs or encrypts messages.
    #[inline]
    pub fn is_secure(&self) -> bool {
        self.security_mode.is_secure()
    }

    /// Returns `true` if the endpoint accepts the given token kind.
    pub fn accepts_token(&self, token_type: UserTokenType) -> bool {
        self.user_identity_tokens
            .iter()
            .any(|policy| policy.token_type == token_type)
    }
}

// =============================================================================
// Browse references
// =============================================================================

/// One reference returned by the Browse service, in wire form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceDescription {
    /// Type of the reference.
    pub reference_type_id: NodeId,
    /// `true` when the reference was followed in its natural direction.
    pub is_forward: bool,
    /// The target node.
    pub target_node_id: NodeId,
    /// Browse name of the target.
    #[serde(default)]
    pub browse_name: QualifiedName,
    /// Display name of the target.
    #[serde(default)]
    pub display_name: LocalizedText,
    /// Class of the target node.
    pub node_class: NodeClass,
    /// Type definition of the target, null for non-instance nodes.
    #[serde(default, skip_serializing_if = "NodeId::is_null")]
    pub type_definition: NodeId,
}

impl ReferenceDescription {
    /// Converts to the host-side view.
    ///
    /// # Errors
    ///
    /// Fails when any of the three node IDs uses an identifier form the
    /// host model does not carry (GUID or opaque).
    pub fn to_info(&self) -> ConversionResult<ReferenceInfo> {
        Ok(ReferenceInfo {
            reference_type: IdentityCodec::decode(&self.reference_type_id)?,
            is_forward: self.is_forward,
            target: IdentityCodec::decode(&self.target_node_id)?,
            browse_name: self.browse_name.to_string(),
            display_name: self.display_name.text.clone(),
            node_class: self.node_class,
            type_definition: IdentityCodec::decode(&self.type_definition)?,
        })
    }
}

/// Host-side view of one browse reference.
///
/// Node IDs are decoded to identities and naming structures flattened to
/// plain strings, so downstream code never handles wire types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceInfo {
    /// Type of the reference.
    pub reference_type: Identity,
    /// `true` when the reference was followed in its natural direction.
    pub is_forward: bool,
    /// The target node.
    pub target: Identity,
    /// Browse name, in `namespace:name` form.
    pub browse_name: String,
    /// Display name text.
    pub display_name: String,
    /// Class of the target node.
    pub node_class: NodeClass,
    /// Type definition of the target.
    pub type_definition: Identity,
}

// =============================================================================
// Tests
// =============================================================================
