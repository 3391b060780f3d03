// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Identity codec.
//!
//! Translates between host [`Identity`] values and wire [`NodeId`]s.
//! Encoding is total: both host identifier kinds exist on the wire.
//! Decoding is partial: GUID and opaque identifiers are rejected rather
//! than coerced, because the host model has nothing faithful to coerce
//! them into.

use crimp_core::{Identifier, Identity};

use crate::error::{ConversionError, ConversionResult};
use crate::types::{NodeId, NodeIdentifier};

// =============================================================================
// IdentityCodec
// =============================================================================

/// Stateless codec between [`Identity`] and [`NodeId`].
///
/// # Examples
///
/// ```
/// use crimp_core::Identity;
/// use crimp_opcua::codec::IdentityCodec;
/// use crimp_opcua::types::encoding;
///
/// let node = IdentityCodec::encode(&Identity::string(2, "Pump.Speed"));
/// assert_eq!(node.encoding_byte(), encoding::STRING);
///
/// let back = IdentityCodec::decode(&node).unwrap();
/// assert_eq!(back, Identity::string(2, "Pump.Speed"));
/// ```
pub struct IdentityCodec;

impl IdentityCodec {
    /// Encodes a host identity as a wire node ID.
    ///
    /// The identifier kind follows the host identifier exactly; it is never
    /// inferred from the payload, so a string identity whose text looks
    /// numeric stays a string node ID. The expanded flags of the resulting
    /// encoding byte are derived from presence: the URI flag when a
    /// non-empty namespace URI is set, the server index flag when the index
    /// is non-zero.
    pub fn encode(identity: &Identity) -> NodeId {
        let identifier = match &identity.identifier {
            Identifier::Numeric(v) => NodeIdentifier::Numeric(*v),
            Identifier::String(v) => NodeIdentifier::String(v.clone()),
        };

        NodeId {
            namespace: identity.namespace,
            identifier,
            namespace_uri: identity.resolved_uri().unwrap_or_default().to_string(),
            server_index: identity.server_index,
        }
    }

    /// Decodes a wire node ID into a host identity.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::UnsupportedIdentityEncoding`] for GUID and
    /// opaque identifiers.
    pub fn decode(node: &NodeId) -> ConversionResult<Identity> {
        let identifier = match &node.identifier {
            NodeIdentifier::Numeric(v) => Identifier::Numeric(*v),
            NodeIdentifier::String(v) => Identifier::String(v.clone()),
            NodeIdentifier::Guid(_) | NodeIdentifier::Opaque(_) => {
                let err = ConversionError::unsupported_identity_encoding(
                    node.encoding_byte(),
                    node.identifier_kind(),
                    node.to_string(),
                );
                err.log("identity decode");
                return Err(err);
            }
        };

        let namespace_uri = if node.namespace_uri.is_empty() {
            None
        } else {
            Some(node.namespace_uri.clone())
        };

        Ok(Identity {
            namespace: node.namespace,
            identifier,
            namespace_uri,
            server_index: node.server_index,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::encoding;
    use uuid::Uuid;

    #[test]
    fn test_encode_numeric() {
        let node = IdentityCodec::encode(&Identity::numeric(2, 1001));
        assert_eq!(node, NodeId::numeric(2, 1001));
        assert_eq!(node.encoding_byte(), encoding::NUMERIC);
    }

    #[test]
    fn test_encode_string() {
        let node = IdentityCodec::encode(&Identity::string(3, "Tank.Level"));
        assert_eq!(node, NodeId::string(3, "Tank.Level"));
        assert_eq!(node.encoding_byte(), encoding::STRING);
    }

    #[test]
    fn test_encode_expanded_sets_flags() {
        let identity = Identity::numeric(2, 7)
            .with_namespace_uri("urn:factory")
            .with_server_index(5);
        let node = IdentityCodec::encode(&identity);

        assert_eq!(node.namespace_uri, "urn:factory");
        assert_eq!(node.server_index, 5);
        assert_eq!(
            node.encoding_byte(),
            encoding::NUMERIC | encoding::NAMESPACE_URI | encoding::SERVER_INDEX
        );
    }

    #[test]
    fn test_encode_empty_uri_is_absent() {
        let identity = Identity::numeric(2, 7).with_namespace_uri("");
        let node = IdentityCodec::encode(&identity);
        assert!(node.namespace_uri.is_empty());
        assert_eq!(node.encoding_byte(), encoding::NUMERIC);
    }

    #[test]
    fn test_encode_numeric_text_stays_string() {
        // Caller intent decides the kind, not the payload shape.
        let node = IdentityCodec::encode(&Identity::string(2, "1001"));
        assert_eq!(node.encoding_byte() & encoding::VALUE_MASK, encoding::STRING);
        assert_eq!(node, NodeId::string(2, "1001"));
    }

    #[test]
    fn test_decode_numeric_and_string() {
        let identity = IdentityCodec::decode(&NodeId::numeric(2, 1001)).unwrap();
        assert_eq!(identity, Identity::numeric(2, 1001));

        let identity = IdentityCodec::decode(&NodeId::string(2, "A.B")).unwrap();
        assert_eq!(identity, Identity::string(2, "A.B"));
    }

    #[test]
    fn test_decode_expanded() {
        let node = NodeId::string(4, "X")
            .with_namespace_uri("urn:site")
            .with_server_index(2);
        let identity = IdentityCodec::decode(&node).unwrap();

        assert_eq!(identity.namespace_uri.as_deref(), Some("urn:site"));
        assert_eq!(identity.server_index, 2);
    }

    #[test]
    fn test_decode_rejects_guid() {
        let node = NodeId::guid(2, Uuid::nil());
        let err = IdentityCodec::decode(&node).unwrap_err();
        assert!(matches!(
            err,
            ConversionError::UnsupportedIdentityEncoding { encoding: 0x04, .. }
        ));
    }

    #[test]
    fn test_decode_rejects_opaque() {
        let node = NodeId::opaque(2, vec![1, 2, 3]);
        let err = IdentityCodec::decode(&node).unwrap_err();
        assert!(matches!(
            err,
            ConversionError::UnsupportedIdentityEncoding { encoding: 0x05, .. }
        ));
    }

    #[test]
    fn test_round_trip() {
        let cases = [
            Identity::numeric(0, 84),
            Identity::string(2, "Line.Speed"),
            Identity::numeric(9, 42).with_namespace_uri("urn:x").with_server_index(1),
        ];
        for identity in cases {
            let back = IdentityCodec::decode(&IdentityCodec::encode(&identity)).unwrap();
            assert_eq!(back, identity);
        }
    }
}
