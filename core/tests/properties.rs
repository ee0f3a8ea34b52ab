use std::sync::Arc;

use union_schema_core::{
    DecodeOptions, ErrorKind, FieldSchema, FieldType, RegistryError, UnionRegistry, UntypedRecord,
    ValidationError, Value, ValueKind, VariantSchema, decode, decode_with, encode,
    record_from_json,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn sample_registry() -> UnionRegistry {
    UnionRegistry::new(
        "tag",
        vec![
            VariantSchema::new("Variant1")
                .with_name("SampleVariant1")
                .with_field(FieldSchema::required("f1", FieldType::Int))
                .with_field(FieldSchema::required("f2", FieldType::Int)),
            VariantSchema::new("Variant2")
                .with_name("SampleVariant2")
                .with_field(FieldSchema::required("field1", FieldType::Int))
                .with_field(FieldSchema::required("field2", FieldType::Bool)),
        ],
    )
    .unwrap()
}

fn mixed_registry() -> UnionRegistry {
    UnionRegistry::builder()
        .tag_field("type")
        .variant(
            VariantSchema::new("reading")
                .with_field(FieldSchema::required("sensor", FieldType::String))
                .with_field(FieldSchema::required("value", FieldType::Float))
                .with_field(FieldSchema::optional("calibrated", FieldType::Bool))
                .with_field(FieldSchema::optional("seq", FieldType::Int)),
        )
        .variant(VariantSchema::new("heartbeat"))
        .build()
        .unwrap()
}

fn record(json: serde_json::Value) -> UntypedRecord {
    record_from_json(&json).unwrap()
}

/// Domain enum an application would dispatch into.
#[derive(Debug, PartialEq)]
enum Sample {
    Variant1 { f1: i64, f2: i64 },
    Variant2 { field1: i64, field2: bool },
}

fn to_sample(record: &UntypedRecord, registry: &UnionRegistry) -> Option<Sample> {
    let instance = decode(record, registry).ok()?;
    match instance.tag() {
        "Variant1" => Some(Sample::Variant1 {
            f1: instance.int("f1")?,
            f2: instance.int("f2")?,
        }),
        "Variant2" => Some(Sample::Variant2 {
            field1: instance.int("field1")?,
            field2: instance.bool("field2")?,
        }),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Worked example
// ---------------------------------------------------------------------------

#[test]
fn variant1_decodes() {
    let registry = sample_registry();
    let instance = decode(
        &record(serde_json::json!({"tag": "Variant1", "f1": 1, "f2": 2})),
        &registry,
    )
    .unwrap();

    assert_eq!(instance.tag(), "Variant1");
    assert_eq!(instance.get("f1"), Some(&Value::Int(1)));
    assert_eq!(instance.get("f2"), Some(&Value::Int(2)));
    assert_eq!(instance.fields().len(), 2);
}

#[test]
fn variant2_with_string_bool_is_a_single_type_mismatch() {
    let registry = sample_registry();
    let errors = decode(
        &record(serde_json::json!({"tag": "Variant2", "field1": 1, "field2": "yes"})),
        &registry,
    )
    .unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].path, vec!["field2"]);
    assert_eq!(
        errors[0].kind,
        ErrorKind::TypeMismatch {
            expected: FieldType::Bool,
            actual: ValueKind::String,
        }
    );
}

#[test]
fn variant3_is_unknown() {
    let registry = sample_registry();
    let errors = decode(
        &record(serde_json::json!({"tag": "Variant3", "f1": 1})),
        &registry,
    )
    .unwrap_err();

    assert_eq!(
        errors,
        vec![ValidationError {
            path: vec!["tag".to_string()],
            kind: ErrorKind::UnknownTag {
                tag: "Variant3".to_string()
            },
            message: "unknown tag value 'Variant3'".to_string(),
        }]
    );
}

#[test]
fn instances_dispatch_into_domain_enum() {
    let registry = sample_registry();
    assert_eq!(
        to_sample(
            &record(serde_json::json!({"tag": "Variant2", "field1": 9, "field2": true})),
            &registry
        ),
        Some(Sample::Variant2 {
            field1: 9,
            field2: true
        })
    );
    assert_eq!(
        to_sample(
            &record(serde_json::json!({"tag": "Variant1", "f1": 1, "f2": 2})),
            &registry
        ),
        Some(Sample::Variant1 { f1: 1, f2: 2 })
    );
}

// ---------------------------------------------------------------------------
// Round trip and idempotence
// ---------------------------------------------------------------------------

#[test]
fn conformant_records_round_trip() {
    let registry = mixed_registry();
    let inputs = [
        serde_json::json!({"type": "reading", "sensor": "t1", "value": 21.5}),
        serde_json::json!({"type": "reading", "sensor": "t2", "value": 20, "calibrated": true}),
        serde_json::json!({"type": "reading", "sensor": "t3", "value": -1.25, "calibrated": false, "seq": 12}),
        serde_json::json!({"type": "reading", "sensor": "t4", "value": 0.5, "calibrated": null}),
        serde_json::json!({"type": "heartbeat"}),
    ];

    for input in inputs {
        let original = record(input);
        let instance = decode(&original, &registry).unwrap();
        let encoded = encode(&instance, &registry).unwrap();
        assert_eq!(encoded, original);
        assert!(encoded.iter().eq(original.iter()), "field order must match");
    }
}

#[test]
fn decode_is_idempotent() {
    let registry = mixed_registry();
    let good = record(serde_json::json!({"type": "reading", "sensor": "a", "value": 1.0}));
    let bad = record(serde_json::json!({"type": "reading", "value": "x", "zzz": 1}));

    assert_eq!(decode(&good, &registry), decode(&good, &registry));
    assert_eq!(decode(&bad, &registry), decode(&bad, &registry));
}

#[test]
fn null_optional_field_round_trips() {
    let registry = UnionRegistry::builder()
        .variant(
            VariantSchema::new("A")
                .with_field(FieldSchema::required("x", FieldType::Int))
                .with_field(FieldSchema::optional("y", FieldType::Bool)),
        )
        .build()
        .unwrap();
    let original = record(serde_json::json!({"tag": "A", "x": 1, "y": null}));

    let instance = decode(&original, &registry).unwrap();
    assert_eq!(instance.get("y"), Some(&Value::Null));
    assert_eq!(encode(&instance, &registry).unwrap(), original);
}

// ---------------------------------------------------------------------------
// Registry construction
// ---------------------------------------------------------------------------

#[test]
fn duplicate_tag_always_fails() {
    for filler in 0..5 {
        let mut variants: Vec<VariantSchema> = (0..filler)
            .map(|i| VariantSchema::new(&format!("V{i}")))
            .collect();
        variants.insert(0, VariantSchema::new("dup"));
        variants.push(VariantSchema::new("dup"));

        let err = UnionRegistry::new("tag", variants).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateTag("dup".to_string()));
    }
}

// ---------------------------------------------------------------------------
// Error collection
// ---------------------------------------------------------------------------

#[test]
fn two_missing_and_one_unexpected_yield_three_errors() {
    let registry = UnionRegistry::builder()
        .variant(
            VariantSchema::new("Order")
                .with_field(FieldSchema::required("id", FieldType::Int))
                .with_field(FieldSchema::required("sku", FieldType::String))
                .with_field(FieldSchema::required("qty", FieldType::Int)),
        )
        .build()
        .unwrap();

    let errors = decode(
        &record(serde_json::json!({"tag": "Order", "coupon": "X", "sku": "A-1"})),
        &registry,
    )
    .unwrap_err();

    assert_eq!(
        errors,
        vec![
            ValidationError::missing_field("id"),
            ValidationError::missing_field("qty"),
            ValidationError::unexpected_field("coupon"),
        ]
    );
}

#[test]
fn permissive_mode_only_drops_unexpected_fields() {
    let registry = sample_registry();
    let input = record(serde_json::json!({"tag": "Variant1", "f1": 1, "extra": true}));

    let errors = decode_with(&input, &registry, &DecodeOptions::permissive()).unwrap_err();
    assert_eq!(errors, vec![ValidationError::missing_field("f2")]);
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

#[test]
fn shared_registry_decodes_across_threads() {
    let registry = Arc::new(sample_registry());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                let input = record(serde_json::json!({"tag": "Variant1", "f1": i, "f2": i * 2}));
                let instance = decode(&input, &registry).unwrap();
                encode(&instance, &registry).unwrap() == input
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

#[test]
fn stale_instance_fails_to_encode_with_other_registry() {
    let old = sample_registry();
    let new = mixed_registry();
    let instance = decode(
        &record(serde_json::json!({"tag": "Variant1", "f1": 1, "f2": 2})),
        &old,
    )
    .unwrap();

    assert!(encode(&instance, &new).is_err());
}
