use serde_json::json;
use swgen_core::tags::{apply_tags, parse_default, schema_from_type_tag};
use swgen_core::{BaseType, CollectionFormat, Constraints, SchemaError, Tags};

fn applied(tags: Tags, base_type: Option<BaseType>) -> Result<Constraints, SchemaError> {
    let mut constraints = Constraints {
        base_type,
        ..Constraints::default()
    };
    apply_tags(&tags, &mut constraints, "Model.field")?;
    Ok(constraints)
}

// ── Text keys ───────────────────────────────────────────────────────────────

#[test]
fn text_keys_are_copied() {
    let c = applied(
        Tags::new()
            .with("title", "Name")
            .with("description", "Display name")
            .with("format", "email")
            .with("pattern", "^.+@.+$"),
        Some(BaseType::String),
    )
    .unwrap();
    assert_eq!(c.title.as_deref(), Some("Name"));
    assert_eq!(c.description.as_deref(), Some("Display name"));
    assert_eq!(c.format.as_deref(), Some("email"));
    assert_eq!(c.pattern.as_deref(), Some("^.+@.+$"));
}

#[test]
fn dash_clears_and_empty_is_ignored() {
    let mut c = Constraints::of_type(BaseType::String);
    c.format = Some("uuid".into());
    c.description = Some("kept".into());
    apply_tags(
        &Tags::new().with("format", "-").with("description", ""),
        &mut c,
        "Model.field",
    )
    .unwrap();
    assert!(c.format.is_none());
    assert_eq!(c.description.as_deref(), Some("kept"));
}

#[test]
fn last_duplicate_wins() {
    let c = applied(
        Tags::new().with("title", "first").with("title", "second"),
        None,
    )
    .unwrap();
    assert_eq!(c.title.as_deref(), Some("second"));
}

// ── Type ────────────────────────────────────────────────────────────────────

#[test]
fn type_tag_accepts_common_names_and_base_types() {
    let c = applied(Tags::new().with("type", "password"), Some(BaseType::Integer)).unwrap();
    assert_eq!(c.base_type, Some(BaseType::String));
    assert_eq!(c.format.as_deref(), Some("password"));

    let c = applied(Tags::new().with("type", "object"), Some(BaseType::String)).unwrap();
    assert_eq!(c.base_type, Some(BaseType::Object));
}

#[test]
fn type_tag_is_applied_before_default() {
    // `default` comes first but must parse against the overridden type.
    let c = applied(
        Tags::new().with("default", "42").with("type", "long"),
        Some(BaseType::String),
    )
    .unwrap();
    assert_eq!(c.base_type, Some(BaseType::Integer));
    assert_eq!(c.default, Some(json!(42)));
}

#[test]
fn unknown_type_is_invalid() {
    let err = applied(Tags::new().with("type", "decimal"), None).unwrap_err();
    assert!(matches!(err, SchemaError::InvalidTag { ref key, .. } if key == "type"));
    assert!(schema_from_type_tag("Model.field", "decimal").is_err());
}

#[test]
fn schema_from_type_tag_forms() {
    let node = schema_from_type_tag("Model.field", "byte").unwrap();
    assert_eq!(node.to_value(), json!({"type": "string", "format": "byte"}));
    let node = schema_from_type_tag("Model.field", "array").unwrap();
    assert_eq!(node.to_value(), json!({"type": "array"}));
}

// ── Numbers and booleans ────────────────────────────────────────────────────

#[test]
fn numeric_bounds() {
    let c = applied(
        Tags::new()
            .with("minimum", "-1.5")
            .with("maximum", "10")
            .with("exclusiveMaximum", "true")
            .with("multipleOf", "0.5")
            .with("minItems", "1")
            .with("maxItems", "5")
            .with("uniqueItems", "true"),
        Some(BaseType::Number),
    )
    .unwrap();
    assert_eq!(c.minimum, Some(-1.5));
    assert_eq!(c.maximum, Some(10.0));
    assert!(c.exclusive_maximum);
    assert!(!c.exclusive_minimum);
    assert_eq!(c.multiple_of, Some(0.5));
    assert_eq!(c.min_items, Some(1));
    assert_eq!(c.max_items, Some(5));
    assert!(c.unique_items);
}

#[test]
fn malformed_numbers_name_the_field() {
    let err = applied(Tags::new().with("maxLength", "-3"), None).unwrap_err();
    assert_eq!(
        err,
        SchemaError::InvalidTag {
            subject: "Model.field".into(),
            key: "maxLength".into(),
            value: "-3".into(),
            expected: "a non-negative integer",
        }
    );

    let err = applied(Tags::new().with("nullable", "yes"), None).unwrap_err();
    assert!(matches!(err, SchemaError::InvalidTag { expected: "a boolean", .. }));
}

// ── Defaults and enums ──────────────────────────────────────────────────────

#[test]
fn defaults_follow_the_base_type() {
    assert_eq!(
        parse_default("m.f", Some(BaseType::Integer), "-7").unwrap(),
        json!(-7)
    );
    assert_eq!(
        parse_default("m.f", Some(BaseType::Number), "2.5").unwrap(),
        json!(2.5)
    );
    assert_eq!(
        parse_default("m.f", Some(BaseType::Boolean), "true").unwrap(),
        json!(true)
    );
    assert_eq!(
        parse_default("m.f", Some(BaseType::String), "42").unwrap(),
        json!("42")
    );
    assert_eq!(
        parse_default("m.f", None, r#"{"a": 1}"#).unwrap(),
        json!({"a": 1})
    );
    assert!(parse_default("m.f", Some(BaseType::Integer), "1.5").is_err());
}

#[test]
fn enum_tag_forms() {
    let c = applied(Tags::new().with("enum", "[1, 2, 3]"), Some(BaseType::Integer)).unwrap();
    assert_eq!(c.enum_values, vec![json!(1), json!(2), json!(3)]);

    let c = applied(Tags::new().with("enum", "a, b"), Some(BaseType::String)).unwrap();
    assert_eq!(c.enum_values, vec![json!("a"), json!("b")]);

    let mut c = c;
    apply_tags(&Tags::new().with("enum", "-"), &mut c, "Model.field").unwrap();
    assert!(c.enum_values.is_empty());
}

// ── Owner-level keys ────────────────────────────────────────────────────────

#[test]
fn required_and_collection_format_are_carried() {
    let c = applied(
        Tags::new()
            .with("required", "true")
            .with("collectionFormat", "ssv")
            .with("json", "name,omitempty")
            .with("query", "q"),
        Some(BaseType::Array),
    )
    .unwrap();
    assert_eq!(c.required, Some(true));
    assert_eq!(c.collection_format, Some(CollectionFormat::Ssv));

    let err = applied(Tags::new().with("collectionFormat", "commas"), None).unwrap_err();
    assert!(matches!(err, SchemaError::InvalidTag { expected: "a collection format", .. }));
}

#[test]
fn naming_helpers() {
    let tags = Tags::from_pairs([("json", "user_id,omitempty"), ("query", "-")]);
    assert_eq!(tags.name_for("json"), Some("user_id"));
    assert_eq!(tags.name_for("query"), None);
    assert!(tags.is_excluded("query"));
    assert!(!tags.has_constraints());
    assert!(tags.with("minimum", "1").has_constraints());
}
