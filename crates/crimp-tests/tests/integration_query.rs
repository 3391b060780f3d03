// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Query Integration Tests
//!
//! Integration tests for service request assembly including:
//!
//! - Browse/Read/Write request assembly
//! - Browse result conversion to host views
//! - Endpoint description handling
//! - JSON shape of assembled requests
//!
//! ## Test Categories
//!
//! - `test_browse_*`: Browse assembly tests
//! - `test_read_*`: Read assembly tests
//! - `test_write_*`: Write assembly tests
//! - `test_reference_*`: Browse result conversion tests
//! - `test_endpoint_*`: Endpoint description tests

use crimp_core::{
    AttributeId, BrowseDirection, DynamicValue, Identity, NodeClass, StatusCode,
    TimestampsToReturn,
};
use crimp_opcua::{
    encoding, query::reference_types, AttributeQuery, BrowseQuery, BrowseResultMask,
    DataValueMask, EndpointDescription, LocalizedText, NodeClassMask, NodeId, QualifiedName,
    QueryBuilder, ReadQuery, RecordCodecOptions, ReferenceDescription, SecurityMode,
    UserTokenType, Variant,
};

use crimp_tests::common::{
    assertions::{NodeIdAssertions, ResultAssertions},
    builders::WriteRequestBuilder,
    fixtures::{IdentityFixtures, RecordFixtures},
};

// =============================================================================
// Browse Assembly Tests
// =============================================================================

#[test]
fn test_browse_hierarchy_walk_request() {
    let builder = QueryBuilder::new();

    let request = builder.browse(&[
        BrowseQuery::new(Identity::OBJECTS_FOLDER),
        BrowseQuery::new(IdentityFixtures::boiler_temperature())
            .with_reference_type(reference_types::HAS_PROPERTY)
            .with_direction(BrowseDirection::Inverse),
    ]);

    assert_eq!(request.nodes_to_browse.len(), 2);
    request.nodes_to_browse[0]
        .node_to_browse
        .assert_encoding(encoding::NUMERIC);
    assert_eq!(
        request.nodes_to_browse[1].reference_type,
        NodeId::numeric(0, 46)
    );
    assert_eq!(
        request.nodes_to_browse[1].direction,
        BrowseDirection::Inverse
    );
}

#[test]
fn test_browse_class_filter_folds_to_mask() {
    let query = BrowseQuery::new(Identity::OBJECTS_FOLDER)
        .with_node_classes(vec![NodeClass::Variable, NodeClass::Object]);

    let request = QueryBuilder::new().browse_one(&query);
    assert_eq!(
        request.nodes_to_browse[0].node_classes,
        NodeClassMask::OBJECT | NodeClassMask::VARIABLE
    );

    // No filter means the empty mask, which servers read as "everything".
    let unfiltered = QueryBuilder::new().browse_one(&BrowseQuery::new(Identity::OBJECTS_FOLDER));
    assert!(unfiltered.nodes_to_browse[0].node_classes.is_empty());
}

#[test]
fn test_browse_request_json_shape() {
    let request = QueryBuilder::new()
        .browse_one(&BrowseQuery::new(Identity::numeric(0, 85)))
        .with_max_references(100);

    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["max_references_per_node"], 100);
    assert_eq!(json["nodes_to_browse"][0]["node_to_browse"]["namespace"], 0);
    assert_eq!(
        json["nodes_to_browse"][0]["node_to_browse"]["identifier"]["numeric"],
        85
    );
    // Masks travel as raw bits.
    assert_eq!(
        json["nodes_to_browse"][0]["result_mask"],
        BrowseResultMask::all().bits()
    );
}

// =============================================================================
// Read Assembly Tests
// =============================================================================

#[test]
fn test_read_values_shorthand() {
    let request = QueryBuilder::new().read(&ReadQuery::values(IdentityFixtures::identity_batch(5)));

    assert_eq!(request.nodes_to_read.len(), 5);
    assert_eq!(request.max_age, 0.0);
    assert_eq!(request.timestamps_to_return, TimestampsToReturn::Source);
    for read in &request.nodes_to_read {
        assert_eq!(read.attribute, AttributeId::Value);
        assert!(read.data_encoding.is_empty());
    }
}

#[test]
fn test_read_mixed_attributes() {
    let target = IdentityFixtures::motor_speed();
    let query = ReadQuery::new()
        .with_attribute(AttributeQuery::value(target.clone()))
        .with_attribute(AttributeQuery::new(target.clone(), AttributeId::DisplayName))
        .with_attribute(
            AttributeQuery::new(target, AttributeId::Value).with_index_range("0:9"),
        )
        .with_max_age(250.0)
        .with_timestamps(TimestampsToReturn::Both);

    let request = QueryBuilder::new().read(&query);
    assert_eq!(request.max_age, 250.0);
    assert_eq!(request.nodes_to_read[1].attribute, AttributeId::DisplayName);
    assert_eq!(request.nodes_to_read[2].index_range.as_deref(), Some("0:9"));
}

// =============================================================================
// Write Assembly Tests
// =============================================================================

#[test]
fn test_write_built_request() {
    let request = WriteRequestBuilder::new()
        .target(IdentityFixtures::boiler_temperature())
        .float_value(72.5)
        .status(StatusCode::GOOD)
        .source_timestamp(RecordFixtures::reference_time())
        .build();

    let values = QueryBuilder::new().write(&[request]).assert_ok();
    let value = &values[0];

    value.node.assert_encoding(encoding::STRING);
    assert_eq!(value.attribute, AttributeId::Value);
    assert_eq!(value.value.value, Variant::Double(72.5));
    assert!(value.value.mask.contains(DataValueMask::SOURCE_TIMESTAMP));
}

#[test]
fn test_write_builder_requires_target() {
    assert!(WriteRequestBuilder::new().int_value(1).try_build().is_none());

    let some = WriteRequestBuilder::new()
        .target(IdentityFixtures::motor_speed())
        .int_value(1)
        .try_build();
    assert!(some.is_some());
}

#[test]
fn test_write_truthy_presence_drops_falsy_fields() {
    let request = WriteRequestBuilder::new()
        .target(IdentityFixtures::status_flag())
        .bool_value(false)
        .status(StatusCode::GOOD)
        .build();

    let builder = QueryBuilder::with_record_options(RecordCodecOptions::truthy());
    let values = builder.write(std::slice::from_ref(&request)).assert_ok();
    assert!(values[0].value.mask.is_empty());

    // The explicit builder keeps both fields.
    let values = QueryBuilder::new().write(&[request]).assert_ok();
    assert_eq!(
        values[0].value.mask,
        DataValueMask::VALUE | DataValueMask::STATUS_CODE
    );
}

#[test]
fn test_write_error_aborts_batch() {
    let good = WriteRequestBuilder::new()
        .target(IdentityFixtures::motor_speed())
        .int_value(1)
        .build();
    let bad = WriteRequestBuilder::new()
        .target(IdentityFixtures::motor_speed())
        .record(crimp_core::DataRecord::from_value(DynamicValue::Seq(vec![
            DynamicValue::String("a".into()),
            DynamicValue::Int(1),
        ])))
        .build();

    QueryBuilder::new().write(&[good, bad]).assert_err();
}

// =============================================================================
// Reference Conversion Tests
// =============================================================================

#[test]
fn test_reference_batch_conversion() {
    let references: Vec<ReferenceDescription> = (0..10)
        .map(|i| ReferenceDescription {
            reference_type_id: NodeId::numeric(0, 47),
            is_forward: true,
            target_node_id: NodeId::string(2, format!("Tag{:04}", i)),
            browse_name: QualifiedName::new(2, format!("Tag{:04}", i)),
            display_name: LocalizedText::new(format!("Tag {}", i)),
            node_class: NodeClass::Variable,
            type_definition: NodeId::numeric(0, 63),
        })
        .collect();

    let infos: Vec<_> = references
        .iter()
        .map(ReferenceDescription::to_info)
        .collect::<Result<_, _>>()
        .assert_ok();

    assert_eq!(infos.len(), 10);
    assert_eq!(infos[3].target, Identity::string(2, "Tag0003"));
    assert_eq!(infos[3].browse_name, "2:Tag0003");
}

#[test]
fn test_reference_conversion_failure_names_the_node() {
    let reference = ReferenceDescription {
        reference_type_id: NodeId::numeric(0, 47),
        is_forward: true,
        target_node_id: NodeId::guid(2, uuid::Uuid::nil()),
        browse_name: QualifiedName::default(),
        display_name: LocalizedText::default(),
        node_class: NodeClass::Variable,
        type_definition: NodeId::null(),
    };

    let err = reference.to_info().assert_err();
    assert!(err.to_string().contains("g="), "message was: {err}");
}

// =============================================================================
// Endpoint Tests
// =============================================================================

#[test]
fn test_endpoint_from_json_dump() {
    // The shape a discovery tool would hand over.
    let json = serde_json::json!({
        "endpoint_url": "opc.tcp://plc:4840",
        "security_mode": "sign_and_encrypt",
        "security_policy_uri": "http://opcfoundation.org/UA/SecurityPolicy#Basic256Sha256",
        "security_level": 3,
        "user_identity_tokens": [
            { "policy_id": "user-pass", "token_type": "username" }
        ]
    });

    let endpoint: EndpointDescription = serde_json::from_value(json).unwrap();
    assert!(endpoint.is_secure());
    assert_eq!(endpoint.security_mode, SecurityMode::SignAndEncrypt);
    assert!(endpoint.accepts_token(UserTokenType::Username));
    assert!(!endpoint.accepts_token(UserTokenType::Anonymous));
    assert_eq!(endpoint.security_level, 3);
}
