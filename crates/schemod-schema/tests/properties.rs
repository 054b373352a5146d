//! Property-based checks of optionality, integer signedness and naming.

use proptest::prelude::*;
use schemod_core::{PropertyTag, ResolveConfig};
use schemod_schema::{infer_tag, resolve_models};
use serde_json::json;

fn scalar_type() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("boolean"),
        Just("integer"),
        Just("number"),
        Just("string"),
    ]
}

proptest! {
    #[test]
    fn unrequired_properties_are_optional(ty in scalar_type()) {
        let schema = json!({"type": "object", "properties": {"field": {"type": ty}}});
        let models = resolve_models(&schema, &ResolveConfig::default()).unwrap();
        let field = &models.get("Model").unwrap().properties[0];
        prop_assert!(field.optional);
        if ty != "string" {
            prop_assert_eq!(field.tag, PropertyTag::BoxedNumber);
        }
    }

    #[test]
    fn required_properties_follow_their_type(ty in scalar_type(), nullable in any::<bool>()) {
        let type_value = if nullable { json!([ty, "null"]) } else { json!(ty) };
        let schema = json!({
            "type": "object",
            "required": ["field"],
            "properties": {"field": {"type": type_value}}
        });
        let models = resolve_models(&schema, &ResolveConfig::default()).unwrap();
        let field = &models.get("Model").unwrap().properties[0];
        prop_assert_eq!(field.optional, nullable);
    }

    #[test]
    fn integer_signedness_follows_minimum_and_required(
        minimum in prop::option::of(-1000i64..1000),
        required in any::<bool>()
    ) {
        let mut field = json!({"type": "integer"});
        if let Some(minimum) = minimum {
            field["minimum"] = json!(minimum);
        }
        let mut schema = json!({"type": "object", "properties": {"field": field}});
        if required {
            schema["required"] = json!(["field"]);
        }

        let models = resolve_models(&schema, &ResolveConfig::default()).unwrap();
        let field = &models.get("Model").unwrap().properties[0];
        let expected = if !required {
            PropertyTag::BoxedNumber
        } else if minimum.is_some_and(|m| m >= 0) {
            PropertyTag::UnsignedInt
        } else {
            PropertyTag::SignedInt
        };
        prop_assert_eq!((field.tag, field.optional), (expected, !required));
    }

    #[test]
    fn null_in_a_union_always_forces_optional(ty in scalar_type(), optional in any::<bool>()) {
        let node = json!({"type": [ty, "null"]});
        let (_, forced) = infer_tag(&node, optional, "#").unwrap();
        prop_assert!(forced);
    }

    #[test]
    fn prefix_wraps_every_model_name(prefix in "[A-Z]{0,3}") {
        let schema = json!({
            "type": "object",
            "properties": {
                "child": {"type": "object", "properties": {"leaf": {"type": "string"}}}
            }
        });
        let models = resolve_models(&schema, &ResolveConfig::with_prefix(prefix.clone())).unwrap();
        prop_assert_eq!(models.len(), 2);
        for name in models.names() {
            prop_assert!(name.starts_with(prefix.as_str()));
            prop_assert!(name.ends_with("Model"));
        }
    }
}
