// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Value codec.
//!
//! Translates between [`DynamicValue`] and [`Variant`].
//!
//! Encoding is tag selection: a dynamic value carries less type information
//! than the wire demands, so the codec picks the wire tag from the value's
//! kind, in a fixed priority order. Sequences dispatch on their first
//! element and every later element must match it, with one widening
//! exception (integers are accepted into float sequences). Hosts that know
//! the target type can pass a hint to override the default choice.
//!
//! Decoding collapses cardinality: a null or empty array becomes
//! [`DynamicValue::Null`], exactly one element becomes a bare scalar, and
//! two or more become a sequence. One element of information is lost by
//! design; `decode(encode([x]))` yields `x`, not `[x]`.

use crimp_core::DynamicValue;

use crate::codec::IdentityCodec;
use crate::error::{ConversionError, ConversionResult};
use crate::types::{Variant, VariantList, VariantTag};

// =============================================================================
// ValueCodec
// =============================================================================

/// Stateless codec between [`DynamicValue`] and [`Variant`].
///
/// # Examples
///
/// ```
/// use crimp_core::DynamicValue;
/// use crimp_opcua::codec::ValueCodec;
/// use crimp_opcua::types::Variant;
///
/// let encoded = ValueCodec::encode(&DynamicValue::Int(42)).unwrap();
/// assert_eq!(encoded, Variant::Int32(42));
///
/// let decoded = ValueCodec::decode(&encoded).unwrap();
/// assert_eq!(decoded, DynamicValue::Int(42));
/// ```
pub struct ValueCodec;

impl ValueCodec {
    // =========================================================================
    // Encoding
    // =========================================================================

    /// Encodes a dynamic value as a variant, selecting the wire tag from
    /// the value's kind.
    ///
    /// Tag selection:
    ///
    /// 1. String values become `String`.
    /// 2. Sequences dispatch on their first element (see below).
    /// 3. Booleans become `Boolean`.
    /// 4. Integers become `Int32` when they fit, otherwise `Double`.
    /// 5. Floats become `Double`.
    /// 6. Identities become a one-element `NodeId` array.
    /// 7. Null stays null.
    ///
    /// A sequence takes the tag its first element would take as a scalar
    /// and re-encodes every element under it. Integer elements are widened
    /// into float sequences; every other mismatch is a
    /// [`ConversionError::MixedSequenceKind`]. An empty sequence encodes as
    /// [`Variant::Null`]: with no elements there is no tag to pick.
    ///
    /// # Errors
    ///
    /// Fails when the value kind has no wire representation, when a
    /// sequence leads with an unsupported element kind, when a sequence
    /// mixes kinds, or when an integer sequence element exceeds 32 bits.
    pub fn encode(value: &DynamicValue) -> ConversionResult<Variant> {
        tracing::trace!(kind = value.kind(), "encoding host value");
        match value {
            DynamicValue::String(s) => Ok(Variant::String(s.clone())),
            DynamicValue::Seq(items) => Self::encode_seq(items),
            DynamicValue::Bool(b) => Ok(Variant::Boolean(*b)),
            DynamicValue::Int(i) => Ok(Self::encode_int(*i)),
            DynamicValue::Float(f) => Ok(Variant::Double(*f)),
            DynamicValue::Identity(id) => Ok(Variant::Array(VariantList::NodeId(vec![
                IdentityCodec::encode(id),
            ]))),
            DynamicValue::Null => Ok(Variant::Null),
        }
    }

    /// Encodes a dynamic value under an explicit type hint.
    ///
    /// Hints reproduce the narrow dispatch of the classic API:
    ///
    /// - `Boolean` encodes booleans and the integers 0 and 1.
    /// - `UInt16` and `UInt32` both produce a `UInt32` payload; the
    ///   sixteen-bit hint never narrows.
    /// - For sequences, only `Boolean` and `UInt32` are honored.
    ///
    /// Any other hint, and any hinted kind outside the table, falls back
    /// to [`ValueCodec::encode`]. An empty sequence encodes as null under
    /// every hint.
    ///
    /// # Errors
    ///
    /// In addition to the unhinted failure modes, fails when a value
    /// cannot be coerced to the hinted type (a non-0/1 integer hinted as
    /// boolean, a negative or oversized integer hinted as unsigned).
    pub fn encode_with_hint(value: &DynamicValue, hint: VariantTag) -> ConversionResult<Variant> {
        match value {
            DynamicValue::Seq(items) => {
                if items.is_empty() {
                    return Ok(Variant::Null);
                }
                match hint {
                    VariantTag::Boolean => Self::encode_hinted_bool_seq(items),
                    VariantTag::UInt32 => Self::encode_hinted_u32_seq(items),
                    _ => Self::encode(value),
                }
            }
            scalar => match hint {
                VariantTag::Boolean => Ok(Variant::Boolean(Self::coerce_bool(scalar)?)),
                VariantTag::UInt16 | VariantTag::UInt32 => {
                    Ok(Variant::UInt32(Self::coerce_u32(scalar)?))
                }
                _ => Self::encode(value),
            },
        }
    }

    /// Integers that fit 32 bits keep integer typing; wider ones fall
    /// through to double, trading precision for magnitude.
    fn encode_int(i: i64) -> Variant {
        match i32::try_from(i) {
            Ok(v) => Variant::Int32(v),
            Err(_) => Variant::Double(i as f64),
        }
    }

    fn encode_seq(items: &[DynamicValue]) -> ConversionResult<Variant> {
        if items.is_empty() {
            return Ok(Variant::Null);
        }
        match &items[0] {
            DynamicValue::Bool(_) => Self::encode_bool_seq(items),
            DynamicValue::Int(_) => Self::encode_int_seq(items),
            DynamicValue::Float(_) => Self::encode_float_seq(items),
            DynamicValue::String(_) => Self::encode_string_seq(items),
            DynamicValue::Identity(_) => Self::encode_identity_seq(items),
            other => Err(ConversionError::unsupported_element_type(other.kind())),
        }
    }

    fn encode_bool_seq(items: &[DynamicValue]) -> ConversionResult<Variant> {
        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match item {
                DynamicValue::Bool(b) => out.push(*b),
                other => {
                    return Err(ConversionError::mixed_sequence_kind(
                        "bool",
                        other.kind(),
                        index,
                    ))
                }
            }
        }
        Ok(Variant::Array(VariantList::Boolean(out)))
    }

    fn encode_int_seq(items: &[DynamicValue]) -> ConversionResult<Variant> {
        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match item {
                DynamicValue::Int(i) => {
                    let v = i32::try_from(*i).map_err(|_| {
                        ConversionError::value_out_of_range(*i, "Int32 sequence element")
                    })?;
                    out.push(v);
                }
                other => {
                    return Err(ConversionError::mixed_sequence_kind(
                        "int",
                        other.kind(),
                        index,
                    ))
                }
            }
        }
        Ok(Variant::Array(VariantList::Int32(out)))
    }

    fn encode_float_seq(items: &[DynamicValue]) -> ConversionResult<Variant> {
        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match item {
                DynamicValue::Float(f) => out.push(*f),
                // Integers widen into a float sequence.
                DynamicValue::Int(i) => out.push(*i as f64),
                other => {
                    return Err(ConversionError::mixed_sequence_kind(
                        "float",
                        other.kind(),
                        index,
                    ))
                }
            }
        }
        Ok(Variant::Array(VariantList::Double(out)))
    }

    fn encode_string_seq(items: &[DynamicValue]) -> ConversionResult<Variant> {
        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match item {
                DynamicValue::String(s) => out.push(s.clone()),
                other => {
                    return Err(ConversionError::mixed_sequence_kind(
                        "string",
                        other.kind(),
                        index,
                    ))
                }
            }
        }
        Ok(Variant::Array(VariantList::String(out)))
    }

    fn encode_identity_seq(items: &[DynamicValue]) -> ConversionResult<Variant> {
        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match item {
                DynamicValue::Identity(id) => out.push(IdentityCodec::encode(id)),
                other => {
                    return Err(ConversionError::mixed_sequence_kind(
                        "identity",
                        other.kind(),
                        index,
                    ))
                }
            }
        }
        Ok(Variant::Array(VariantList::NodeId(out)))
    }

    fn encode_hinted_bool_seq(items: &[DynamicValue]) -> ConversionResult<Variant> {
        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match item {
                DynamicValue::Bool(b) => out.push(*b),
                DynamicValue::Int(0) => out.push(false),
                DynamicValue::Int(1) => out.push(true),
                DynamicValue::Int(i) => {
                    return Err(ConversionError::value_out_of_range(*i, "Boolean"))
                }
                other => {
                    return Err(ConversionError::mixed_sequence_kind(
                        "bool",
                        other.kind(),
                        index,
                    ))
                }
            }
        }
        Ok(Variant::Array(VariantList::Boolean(out)))
    }

    fn encode_hinted_u32_seq(items: &[DynamicValue]) -> ConversionResult<Variant> {
        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match item {
                DynamicValue::Int(i) => {
                    let v = u32::try_from(*i)
                        .map_err(|_| ConversionError::value_out_of_range(*i, "UInt32"))?;
                    out.push(v);
                }
                DynamicValue::Bool(b) => out.push(u32::from(*b)),
                other => {
                    return Err(ConversionError::mixed_sequence_kind(
                        "int",
                        other.kind(),
                        index,
                    ))
                }
            }
        }
        Ok(Variant::Array(VariantList::UInt32(out)))
    }

    fn coerce_bool(value: &DynamicValue) -> ConversionResult<bool> {
        match value {
            DynamicValue::Bool(b) => Ok(*b),
            DynamicValue::Int(0) => Ok(false),
            DynamicValue::Int(1) => Ok(true),
            DynamicValue::Int(i) => Err(ConversionError::value_out_of_range(*i, "Boolean")),
            other => Err(ConversionError::unsupported_value_type(other.kind())),
        }
    }

    fn coerce_u32(value: &DynamicValue) -> ConversionResult<u32> {
        match value {
            DynamicValue::Int(i) => {
                u32::try_from(*i).map_err(|_| ConversionError::value_out_of_range(*i, "UInt32"))
            }
            DynamicValue::Bool(b) => Ok(u32::from(*b)),
            other => Err(ConversionError::unsupported_value_type(other.kind())),
        }
    }

    // =========================================================================
    // Decoding
    // =========================================================================

    /// Decodes a variant into a dynamic value, collapsing cardinality.
    ///
    /// All integer tags narrower than 64 bits decode to `Int`; `UInt64`
    /// values above `i64::MAX` fail rather than wrap. `Float` widens to
    /// `Double` precision. Arrays collapse: zero elements decode to null,
    /// one element to a bare scalar, two or more to a sequence.
    ///
    /// # Errors
    ///
    /// Fails on unsigned 64-bit overflow and on node IDs the identity
    /// codec rejects.
    pub fn decode(variant: &Variant) -> ConversionResult<DynamicValue> {
        tracing::trace!(tag = ?variant.tag(), "decoding wire variant");
        Ok(match variant {
            Variant::Null => DynamicValue::Null,
            Variant::Boolean(v) => DynamicValue::Bool(*v),
            Variant::SByte(v) => DynamicValue::Int(i64::from(*v)),
            Variant::Byte(v) => DynamicValue::Int(i64::from(*v)),
            Variant::Int16(v) => DynamicValue::Int(i64::from(*v)),
            Variant::UInt16(v) => DynamicValue::Int(i64::from(*v)),
            Variant::Int32(v) => DynamicValue::Int(i64::from(*v)),
            Variant::UInt32(v) => DynamicValue::Int(i64::from(*v)),
            Variant::Int64(v) => DynamicValue::Int(*v),
            Variant::UInt64(v) => DynamicValue::Int(Self::decode_u64(*v)?),
            Variant::Float(v) => DynamicValue::Float(f64::from(*v)),
            Variant::Double(v) => DynamicValue::Float(*v),
            Variant::String(v) => DynamicValue::String(v.clone()),
            Variant::NodeId(v) => DynamicValue::Identity(IdentityCodec::decode(v)?),
            Variant::Array(list) => Self::decode_list(list)?,
        })
    }

    fn decode_u64(v: u64) -> ConversionResult<i64> {
        i64::try_from(v).map_err(|_| ConversionError::value_out_of_range(v, "int"))
    }

    fn decode_list(list: &VariantList) -> ConversionResult<DynamicValue> {
        let mut items: Vec<DynamicValue> = match list {
            VariantList::Boolean(v) => v.iter().map(|x| DynamicValue::Bool(*x)).collect(),
            VariantList::SByte(v) => v.iter().map(|x| DynamicValue::Int(i64::from(*x))).collect(),
            VariantList::Byte(v) => v.iter().map(|x| DynamicValue::Int(i64::from(*x))).collect(),
            VariantList::Int16(v) => v.iter().map(|x| DynamicValue::Int(i64::from(*x))).collect(),
            VariantList::UInt16(v) => v.iter().map(|x| DynamicValue::Int(i64::from(*x))).collect(),
            VariantList::Int32(v) => v.iter().map(|x| DynamicValue::Int(i64::from(*x))).collect(),
            VariantList::UInt32(v) => v.iter().map(|x| DynamicValue::Int(i64::from(*x))).collect(),
            VariantList::Int64(v) => v.iter().map(|x| DynamicValue::Int(*x)).collect(),
            VariantList::UInt64(v) => v
                .iter()
                .map(|x| Self::decode_u64(*x).map(DynamicValue::Int))
                .collect::<ConversionResult<_>>()?,
            VariantList::Float(v) => v.iter().map(|x| DynamicValue::Float(f64::from(*x))).collect(),
            VariantList::Double(v) => v.iter().map(|x| DynamicValue::Float(*x)).collect(),
            VariantList::String(v) => v.iter().map(|x| DynamicValue::String(x.clone())).collect(),
            VariantList::NodeId(v) => v
                .iter()
                .map(|x| IdentityCodec::decode(x).map(DynamicValue::Identity))
                .collect::<ConversionResult<_>>()?,
        };

        Ok(match items.len() {
            0 => DynamicValue::Null,
            1 => items.remove(0),
            _ => DynamicValue::Seq(items),
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crimp_core::Identity;
    use crate::types::NodeId;

    fn seq(items: Vec<DynamicValue>) -> DynamicValue {
        DynamicValue::Seq(items)
    }

    // -------------------------------------------------------------------------
    // Scalar encoding
    // -------------------------------------------------------------------------

    #[test]
    fn test_encode_scalars() {
        assert_eq!(
            ValueCodec::encode(&DynamicValue::Bool(true)).unwrap(),
            Variant::Boolean(true)
        );
        assert_eq!(
            ValueCodec::encode(&DynamicValue::Int(42)).unwrap(),
            Variant::Int32(42)
        );
        assert_eq!(
            ValueCodec::encode(&DynamicValue::Float(2.5)).unwrap(),
            Variant::Double(2.5)
        );
        assert_eq!(
            ValueCodec::encode(&DynamicValue::String("on".into())).unwrap(),
            Variant::String("on".into())
        );
        assert_eq!(ValueCodec::encode(&DynamicValue::Null).unwrap(), Variant::Null);
    }

    #[test]
    fn test_encode_wide_int_widens_to_double() {
        let wide = i64::from(i32::MAX) + 1;
        assert_eq!(
            ValueCodec::encode(&DynamicValue::Int(wide)).unwrap(),
            Variant::Double(wide as f64)
        );
        let negative = i64::from(i32::MIN) - 1;
        assert_eq!(
            ValueCodec::encode(&DynamicValue::Int(negative)).unwrap(),
            Variant::Double(negative as f64)
        );
        // Boundary values stay integers.
        assert_eq!(
            ValueCodec::encode(&DynamicValue::Int(i64::from(i32::MAX))).unwrap(),
            Variant::Int32(i32::MAX)
        );
    }

    #[test]
    fn test_encode_identity_as_node_list() {
        let identity = Identity::numeric(2, 1001);
        let encoded = ValueCodec::encode(&DynamicValue::Identity(identity)).unwrap();
        assert_eq!(
            encoded,
            Variant::Array(VariantList::NodeId(vec![NodeId::numeric(2, 1001)]))
        );
    }

    // -------------------------------------------------------------------------
    // Sequence encoding
    // -------------------------------------------------------------------------

    #[test]
    fn test_encode_empty_seq_is_null() {
        assert_eq!(ValueCodec::encode(&seq(vec![])).unwrap(), Variant::Null);
    }

    #[test]
    fn test_encode_seq_dispatches_on_first_element() {
        assert_eq!(
            ValueCodec::encode(&seq(vec![DynamicValue::Bool(true), DynamicValue::Bool(false)]))
                .unwrap(),
            Variant::Array(VariantList::Boolean(vec![true, false]))
        );
        assert_eq!(
            ValueCodec::encode(&seq(vec![DynamicValue::Int(1), DynamicValue::Int(2)])).unwrap(),
            Variant::Array(VariantList::Int32(vec![1, 2]))
        );
        assert_eq!(
            ValueCodec::encode(&seq(vec![
                DynamicValue::String("a".into()),
                DynamicValue::String("b".into())
            ]))
            .unwrap(),
            Variant::Array(VariantList::String(vec!["a".into(), "b".into()]))
        );
    }

    #[test]
    fn test_encode_int_widens_into_float_seq() {
        let encoded = ValueCodec::encode(&seq(vec![
            DynamicValue::Float(1.5),
            DynamicValue::Int(2),
            DynamicValue::Float(3.0),
        ]))
        .unwrap();
        assert_eq!(encoded, Variant::Array(VariantList::Double(vec![1.5, 2.0, 3.0])));
    }

    #[test]
    fn test_encode_float_in_int_seq_is_mixed() {
        let err = ValueCodec::encode(&seq(vec![DynamicValue::Int(1), DynamicValue::Float(2.0)]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConversionError::MixedSequenceKind { index: 1, .. }
        ));
    }

    #[test]
    fn test_encode_mixed_seq_reports_position() {
        let err = ValueCodec::encode(&seq(vec![
            DynamicValue::String("a".into()),
            DynamicValue::String("b".into()),
            DynamicValue::Int(3),
        ]))
        .unwrap_err();
        match err {
            ConversionError::MixedSequenceKind {
                expected,
                actual,
                index,
            } => {
                assert_eq!(expected, "string");
                assert_eq!(actual, "int");
                assert_eq!(index, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_encode_nested_seq_unsupported() {
        let err = ValueCodec::encode(&seq(vec![seq(vec![DynamicValue::Int(1)])])).unwrap_err();
        assert!(matches!(
            err,
            ConversionError::UnsupportedElementType { .. }
        ));
    }

    #[test]
    fn test_encode_null_led_seq_unsupported() {
        let err = ValueCodec::encode(&seq(vec![DynamicValue::Null, DynamicValue::Int(1)]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConversionError::UnsupportedElementType { .. }
        ));
    }

    #[test]
    fn test_encode_wide_int_in_int_seq_fails() {
        // Inside a sequence the tag is already fixed to Int32; a wide
        // element cannot widen the whole sequence after the fact.
        let err = ValueCodec::encode(&seq(vec![
            DynamicValue::Int(1),
            DynamicValue::Int(i64::from(i32::MAX) + 1),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConversionError::ValueOutOfRange { .. }));
    }

    #[test]
    fn test_encode_identity_seq() {
        let encoded = ValueCodec::encode(&seq(vec![
            DynamicValue::Identity(Identity::numeric(2, 1)),
            DynamicValue::Identity(Identity::string(2, "B")),
        ]))
        .unwrap();
        assert_eq!(
            encoded,
            Variant::Array(VariantList::NodeId(vec![
                NodeId::numeric(2, 1),
                NodeId::string(2, "B")
            ]))
        );
    }

    // -------------------------------------------------------------------------
    // Hinted encoding
    // -------------------------------------------------------------------------

    #[test]
    fn test_hint_boolean_scalar() {
        assert_eq!(
            ValueCodec::encode_with_hint(&DynamicValue::Bool(true), VariantTag::Boolean).unwrap(),
            Variant::Boolean(true)
        );
        assert_eq!(
            ValueCodec::encode_with_hint(&DynamicValue::Int(1), VariantTag::Boolean).unwrap(),
            Variant::Boolean(true)
        );
        assert_eq!(
            ValueCodec::encode_with_hint(&DynamicValue::Int(0), VariantTag::Boolean).unwrap(),
            Variant::Boolean(false)
        );
    }

    #[test]
    fn test_hint_boolean_rejects_wide_int() {
        let err =
            ValueCodec::encode_with_hint(&DynamicValue::Int(2), VariantTag::Boolean).unwrap_err();
        assert!(matches!(err, ConversionError::ValueOutOfRange { .. }));

        let err = ValueCodec::encode_with_hint(&DynamicValue::String("t".into()), VariantTag::Boolean)
            .unwrap_err();
        assert!(matches!(err, ConversionError::UnsupportedValueType { .. }));
    }

    #[test]
    fn test_hint_uint16_produces_uint32_payload() {
        // Both unsigned hints share one payload width.
        assert_eq!(
            ValueCodec::encode_with_hint(&DynamicValue::Int(7), VariantTag::UInt16).unwrap(),
            Variant::UInt32(7)
        );
        assert_eq!(
            ValueCodec::encode_with_hint(&DynamicValue::Int(7), VariantTag::UInt32).unwrap(),
            Variant::UInt32(7)
        );
    }

    #[test]
    fn test_hint_uint32_rejects_negative() {
        let err =
            ValueCodec::encode_with_hint(&DynamicValue::Int(-1), VariantTag::UInt32).unwrap_err();
        assert!(matches!(err, ConversionError::ValueOutOfRange { .. }));
    }

    #[test]
    fn test_hint_boolean_seq() {
        let encoded = ValueCodec::encode_with_hint(
            &seq(vec![
                DynamicValue::Bool(true),
                DynamicValue::Int(0),
                DynamicValue::Int(1),
            ]),
            VariantTag::Boolean,
        )
        .unwrap();
        assert_eq!(
            encoded,
            Variant::Array(VariantList::Boolean(vec![true, false, true]))
        );
    }

    #[test]
    fn test_hint_uint32_seq() {
        let encoded = ValueCodec::encode_with_hint(
            &seq(vec![DynamicValue::Int(1), DynamicValue::Int(2)]),
            VariantTag::UInt32,
        )
        .unwrap();
        assert_eq!(encoded, Variant::Array(VariantList::UInt32(vec![1, 2])));
    }

    #[test]
    fn test_hint_uint16_seq_falls_back_to_default_dispatch() {
        // Only Boolean and UInt32 are honored for sequences; a UInt16 hint
        // takes the ordinary first-element path and lands on Int32.
        let encoded = ValueCodec::encode_with_hint(
            &seq(vec![DynamicValue::Int(1), DynamicValue::Int(2)]),
            VariantTag::UInt16,
        )
        .unwrap();
        assert_eq!(encoded, Variant::Array(VariantList::Int32(vec![1, 2])));
    }

    #[test]
    fn test_hint_empty_seq_is_null() {
        assert_eq!(
            ValueCodec::encode_with_hint(&seq(vec![]), VariantTag::Boolean).unwrap(),
            Variant::Null
        );
    }

    #[test]
    fn test_unhonored_hint_falls_back() {
        assert_eq!(
            ValueCodec::encode_with_hint(&DynamicValue::Float(2.5), VariantTag::Double).unwrap(),
            Variant::Double(2.5)
        );
        assert_eq!(
            ValueCodec::encode_with_hint(&DynamicValue::String("x".into()), VariantTag::String)
                .unwrap(),
            Variant::String("x".into())
        );
    }

    // -------------------------------------------------------------------------
    // Decoding
    // -------------------------------------------------------------------------

    #[test]
    fn test_decode_scalars() {
        assert_eq!(ValueCodec::decode(&Variant::Null).unwrap(), DynamicValue::Null);
        assert_eq!(
            ValueCodec::decode(&Variant::Boolean(true)).unwrap(),
            DynamicValue::Bool(true)
        );
        assert_eq!(
            ValueCodec::decode(&Variant::UInt16(7)).unwrap(),
            DynamicValue::Int(7)
        );
        assert_eq!(
            ValueCodec::decode(&Variant::Int64(-9)).unwrap(),
            DynamicValue::Int(-9)
        );
        assert_eq!(
            ValueCodec::decode(&Variant::Float(1.5)).unwrap(),
            DynamicValue::Float(1.5)
        );
        assert_eq!(
            ValueCodec::decode(&Variant::String("hi".into())).unwrap(),
            DynamicValue::String("hi".into())
        );
    }

    #[test]
    fn test_decode_node_id_scalar() {
        let decoded = ValueCodec::decode(&Variant::NodeId(NodeId::numeric(2, 5))).unwrap();
        assert_eq!(decoded, DynamicValue::Identity(Identity::numeric(2, 5)));
    }

    #[test]
    fn test_decode_u64_overflow() {
        assert_eq!(
            ValueCodec::decode(&Variant::UInt64(u64::from(u32::MAX))).unwrap(),
            DynamicValue::Int(i64::from(u32::MAX))
        );
        let err = ValueCodec::decode(&Variant::UInt64(u64::MAX)).unwrap_err();
        assert!(matches!(err, ConversionError::ValueOutOfRange { .. }));
    }

    #[test]
    fn test_decode_cardinality_collapse() {
        assert_eq!(
            ValueCodec::decode(&Variant::Array(VariantList::Int32(vec![]))).unwrap(),
            DynamicValue::Null
        );
        assert_eq!(
            ValueCodec::decode(&Variant::Array(VariantList::Int32(vec![7]))).unwrap(),
            DynamicValue::Int(7)
        );
        assert_eq!(
            ValueCodec::decode(&Variant::Array(VariantList::Int32(vec![1, 2]))).unwrap(),
            DynamicValue::Seq(vec![DynamicValue::Int(1), DynamicValue::Int(2)])
        );
    }

    #[test]
    fn test_decode_single_node_array_is_bare_identity() {
        let variant = Variant::Array(VariantList::NodeId(vec![NodeId::numeric(2, 1001)]));
        assert_eq!(
            ValueCodec::decode(&variant).unwrap(),
            DynamicValue::Identity(Identity::numeric(2, 1001))
        );
    }

    #[test]
    fn test_decode_u64_array_element_overflow() {
        let err = ValueCodec::decode(&Variant::Array(VariantList::UInt64(vec![1, u64::MAX])))
            .unwrap_err();
        assert!(matches!(err, ConversionError::ValueOutOfRange { .. }));
    }

    #[test]
    fn test_decode_guid_in_node_array_fails() {
        let variant = Variant::Array(VariantList::NodeId(vec![NodeId::guid(
            2,
            uuid::Uuid::nil(),
        )]));
        let err = ValueCodec::decode(&variant).unwrap_err();
        assert!(matches!(
            err,
            ConversionError::UnsupportedIdentityEncoding { .. }
        ));
    }
}
