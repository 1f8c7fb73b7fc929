use indexmap::IndexMap;
use serde_json::Value;

use crate::document::Schema;
use crate::dto::is_truthy;
use crate::{ApiError, Dto};

/// A JSON request body, shaped by the schema properties.
pub type Body = IndexMap<String, Value>;

/// Projects the DTO onto the properties of a body schema.
///
/// Properties are visited in schema order. A property marked as required
/// (see [`Schema::is_marked_required`]) must resolve to a truthy value; other
/// properties are copied when the DTO provides them. DTO keys the schema does not
/// declare are dropped.
///
/// # Errors
///
/// Returns [`ApiError::ValidationFailed`] naming the first required property
/// without a truthy value.
pub fn build_body(dto: &Dto, schema: &Schema) -> Result<Body, ApiError> {
    let mut body = Body::new();

    for (key, property) in &schema.properties {
        let value = dto.body_value(key);
        if property.is_marked_required() && !value.is_some_and(is_truthy) {
            return Err(ApiError::ValidationFailed {
                property: key.clone(),
            });
        }
        if let Some(value) = value {
            body.insert(key.clone(), value.clone());
        }
    }

    Ok(body)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::tag_body;

    fn schema(value: Value) -> Schema {
        serde_json::from_value(value).expect("valid schema")
    }

    fn user_schema() -> Schema {
        schema(json!({
            "type": "object",
            "properties": {
                "name": { "type": "string", "required": true },
                "age": { "type": "integer", "required": true },
                "nickname": { "type": "string" }
            }
        }))
    }

    #[test]
    fn should_copy_declared_properties_only() {
        let dto = Dto::new()
            .with("id", "iddd")
            .with("age", 10)
            .with("name", "test");

        let body = build_body(&dto, &user_schema()).expect("valid body");

        insta::assert_debug_snapshot!(body, @r#"
        {
            "name": String("test"),
            "age": Number(10),
        }
        "#);
    }

    #[test]
    fn should_ignore_object_level_required_list() {
        let schema = schema(json!({
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "age": { "type": "number" }
            },
            "required": ["name", "age"]
        }));

        let body = build_body(&Dto::new(), &schema).expect("nothing marked required");

        assert!(body.is_empty());
    }

    #[test]
    fn should_fail_on_each_missing_required_property() {
        let complete = Dto::new().with("name", "test").with("age", 10);
        let schema = user_schema();

        for property in ["name", "age"] {
            let dto = complete
                .iter()
                .filter(|(key, _)| key.as_str() != property)
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect::<Dto>();

            let error = build_body(&dto, &schema).expect_err("missing property");

            assert_eq!(
                error.to_string(),
                format!("Missing required property: {property}")
            );
        }
    }

    #[test]
    fn should_fail_on_falsy_required_property() {
        let dto = Dto::new().with("name", "").with("age", 10);

        let error = build_body(&dto, &user_schema()).expect_err("empty name");

        insta::assert_snapshot!(error, @"Missing required property: name");
    }

    #[test]
    fn should_keep_falsy_optional_property() {
        let dto = Dto::new()
            .with("name", "test")
            .with("age", 10)
            .with("nickname", "");

        let body = build_body(&dto, &user_schema()).expect("valid body");

        assert_eq!(body.get("nickname"), Some(&json!("")));
    }

    #[test]
    fn should_use_body_tagged_keys() {
        let dto = Dto::new()
            .with("name", "plain")
            .with(tag_body("name"), "tagged")
            .with(tag_body("age"), 12);

        let body = build_body(&dto, &user_schema()).expect("valid body");

        assert_eq!(body.get("name"), Some(&json!("plain")));
        assert_eq!(body.get("age"), Some(&json!(12)));
    }
}
