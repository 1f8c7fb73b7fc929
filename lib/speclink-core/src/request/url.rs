use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use super::encoding::{encode_uri_component, stringify};
use super::parameters::ClassifiedParameters;
use crate::Dto;

/// Regular expression for matching path placeholders in the format `{param_name}`.
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(?<name>[^{}/]+)}").expect("a valid regex"));

fn replace_path_param(path: &str, param_name: &str, value: &str) -> String {
    let pattern = ["{", param_name, "}"].concat();
    path.replace(&pattern, value)
}

/// Builds the request URL from a path template.
///
/// Every `{name}` placeholder of a path parameter is replaced by the encoded DTO
/// value, then every query parameter is appended in declaration order.
///
/// A parameter missing from the DTO is not an error: it is rendered as
/// `undefined`, in the path as well as in the query string.
///
/// ```rust
/// use speclink_core::{Dto, Parameter, ParameterLocation, build_url, classify_parameters};
///
/// let parameters = vec![
///     Parameter { name: "id".into(), location: ParameterLocation::Path, required: true, schema: None },
///     Parameter { name: "name".into(), location: ParameterLocation::Query, required: true, schema: None },
/// ];
/// let dto = Dto::new().with("id", "iddd").with("name", "test");
///
/// let url = build_url(&dto, "/test/{id}", &classify_parameters(&parameters));
/// assert_eq!(url, "/test/iddd?name=test");
/// ```
pub fn build_url(dto: &Dto, path_key: &str, parameters: &ClassifiedParameters<'_>) -> String {
    let mut url = path_key.to_string();

    for param in parameters.path() {
        let value = dto.path_value(&param.name);
        if value.is_none() {
            warn!(name = %param.name, path = path_key, "missing path parameter value");
        }
        let encoded = encode_uri_component(&stringify(value));
        url = replace_path_param(&url, &param.name, &encoded);
    }

    for name in PLACEHOLDER
        .captures_iter(&url)
        .filter_map(|caps| caps.name("name"))
    {
        warn!(name = name.as_str(), path = path_key, "placeholder without path parameter");
    }

    for param in parameters.query() {
        let value = dto.query_value(&param.name);
        let separator = if url.contains('?') { '&' } else { '?' };
        let encoded = encode_uri_component(&stringify(value));
        url.push(separator);
        url.push_str(&param.name);
        url.push('=');
        url.push_str(&encoded);
    }

    url
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::document::{Parameter, ParameterLocation};
    use crate::request::classify_parameters;
    use crate::{tag_path, tag_query};

    fn param(name: &str, location: ParameterLocation) -> Parameter {
        Parameter {
            name: name.to_string(),
            location,
            required: true,
            schema: None,
        }
    }

    fn url(dto: &Dto, path_key: &str, parameters: &[Parameter]) -> String {
        build_url(dto, path_key, &classify_parameters(parameters))
    }

    #[test]
    fn should_append_query_parameters_in_declaration_order() {
        let dto = Dto::new().with("name", "test").with("age", 10);
        let parameters = [
            param("name", ParameterLocation::Query),
            param("age", ParameterLocation::Query),
        ];

        insta::assert_snapshot!(url(&dto, "/test", &parameters), @"/test?name=test&age=10");
    }

    #[test]
    fn should_substitute_path_then_append_query() {
        let dto = Dto::new()
            .with("age", 10)
            .with("name", "test")
            .with("id", "iddd");
        let parameters = [
            param("id", ParameterLocation::Path),
            param("name", ParameterLocation::Query),
            param("age", ParameterLocation::Query),
        ];

        insta::assert_snapshot!(url(&dto, "/test/{id}", &parameters), @"/test/iddd?name=test&age=10");
    }

    #[test]
    fn should_encode_substituted_values_only() {
        let dto = Dto::new()
            .with("query", "hello world")
            .with("filter", "a&b=c");
        let parameters = [
            param("query", ParameterLocation::Path),
            param("filter", ParameterLocation::Query),
        ];

        insta::assert_snapshot!(
            url(&dto, "/search/{query}/all items", &parameters),
            @"/search/hello%20world/all items?filter=a%26b%3Dc"
        );
    }

    #[test]
    fn should_replace_every_occurrence_of_a_placeholder() {
        let dto = Dto::new().with("id", 7);
        let parameters = [param("id", ParameterLocation::Path)];

        assert_eq!(url(&dto, "/test/{id}/{id}", &parameters), "/test/7/7");
    }

    #[test]
    fn should_not_confuse_placeholder_substrings() {
        let dto = Dto::new().with("id", 1).with("user_id", 2);
        let parameters = [
            param("id", ParameterLocation::Path),
            param("user_id", ParameterLocation::Path),
        ];

        assert_eq!(
            url(&dto, "/users/{user_id}/posts/{id}", &parameters),
            "/users/2/posts/1"
        );
    }

    #[test]
    fn should_render_missing_values_as_undefined() {
        let dto = Dto::new();
        let parameters = [
            param("id", ParameterLocation::Path),
            param("page", ParameterLocation::Query),
        ];

        insta::assert_snapshot!(url(&dto, "/user/{id}", &parameters), @"/user/undefined?page=undefined");
    }

    #[test]
    fn should_render_null_values_as_null() {
        let dto = Dto::new().with("page", Value::Null);
        let parameters = [param("page", ParameterLocation::Query)];

        assert_eq!(url(&dto, "/users", &parameters), "/users?page=null");
    }

    #[test]
    fn should_use_tagged_keys_for_colliding_names() {
        let dto = Dto::new()
            .with(tag_path("id"), "path-id")
            .with(tag_query("id"), "query-id");
        let parameters = [
            param("id", ParameterLocation::Path),
            param("id", ParameterLocation::Query),
        ];

        assert_eq!(
            url(&dto, "/items/{id}", &parameters),
            "/items/path-id?id=query-id"
        );
    }

    #[test]
    fn should_ignore_other_locations() {
        let dto = Dto::new().with("token", "secret").with("odd", 1);
        let parameters = [
            param("token", ParameterLocation::Header),
            param("odd", ParameterLocation::Other("matrix".to_string())),
        ];

        assert_eq!(url(&dto, "/items", &parameters), "/items");
    }

    #[test]
    fn should_keep_undeclared_placeholders() {
        let dto = Dto::new().with("id", 1);

        assert_eq!(url(&dto, "/items/{id}", &[]), "/items/{id}");
    }

    #[test]
    fn test_replace_path_param_exact_match_only() {
        let result = replace_path_param("/prefix{param}suffix/{param}", "param", "value");
        assert_eq!(result, "/prefixvaluesuffix/value");

        let result = replace_path_param("/users/{id}", "nonexistent", "123");
        assert_eq!(result, "/users/{id}");
    }
}
