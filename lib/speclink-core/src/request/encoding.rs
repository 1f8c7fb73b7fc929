use std::borrow::Cow;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::Value;

/// Characters left untouched by `encodeURIComponent`: `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Rendering of a value the DTO does not provide.
pub const UNDEFINED: &str = "undefined";

/// Percent-encodes a URL component the way `encodeURIComponent` does.
pub fn encode_uri_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Formats a float the way JavaScript's `Number.prototype.toString` does: plain
/// decimal notation between `1e-6` and `1e21`, exponent notation outside.
fn format_float(number: f64) -> String {
    let magnitude = number.abs();
    if magnitude == 0.0 {
        return "0".to_string();
    }
    if (1e-6..1e21).contains(&magnitude) {
        return number.to_string();
    }

    let scientific = format!("{number:e}");
    match scientific.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => scientific,
    }
}

/// Renders a DTO value as a URL component, before percent-encoding.
///
/// A missing value renders as `undefined`, `null` as `null`, arrays as their
/// elements joined with `,` (nested `null` render empty) and objects as
/// `[object Object]`.
pub fn stringify(value: Option<&Value>) -> Cow<'_, str> {
    match value {
        None => Cow::Borrowed(UNDEFINED),
        Some(Value::Null) => Cow::Borrowed("null"),
        Some(Value::Bool(flag)) => Cow::Owned(flag.to_string()),
        Some(Value::Number(number)) => {
            if let Some(int) = number.as_i64() {
                Cow::Owned(int.to_string())
            } else if let Some(uint) = number.as_u64() {
                Cow::Owned(uint.to_string())
            } else {
                Cow::Owned(number.as_f64().map_or_else(|| number.to_string(), format_float))
            }
        }
        Some(Value::String(text)) => Cow::Borrowed(text),
        Some(Value::Array(items)) => {
            let items = items
                .iter()
                .map(|item| match item {
                    Value::Null => Cow::Borrowed(""),
                    item => stringify(Some(item)),
                })
                .collect::<Vec<_>>();
            Cow::Owned(items.join(","))
        }
        Some(Value::Object(_)) => Cow::Borrowed("[object Object]"),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case::unreserved("AZaz09-_.!~*'()", "AZaz09-_.!~*'()")]
    #[case::space("hello world", "hello%20world")]
    #[case::reserved("a/b?c=d&e#f", "a%2Fb%3Fc%3Dd%26e%23f")]
    #[case::email("test@example.com", "test%40example.com")]
    #[case::braces("{id}", "%7Bid%7D")]
    #[case::utf8("café", "caf%C3%A9")]
    fn should_encode_like_encode_uri_component(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(encode_uri_component(input), expected);
    }

    #[rstest]
    #[case::missing(None, "undefined")]
    #[case::null(Some(Value::Null), "null")]
    #[case::bool(Some(json!(true)), "true")]
    #[case::int(Some(json!(10)), "10")]
    #[case::negative(Some(json!(-3)), "-3")]
    #[case::whole_float(Some(json!(2.0)), "2")]
    #[case::float(Some(json!(1.5)), "1.5")]
    #[case::negative_zero(Some(json!(-0.0)), "0")]
    #[case::small_float(Some(json!(0.000001)), "0.000001")]
    #[case::tiny_float(Some(json!(1e-7)), "1e-7")]
    #[case::tiny_negative_float(Some(json!(-2.5e-9)), "-2.5e-9")]
    #[case::huge_float(Some(json!(1e21)), "1e+21")]
    #[case::large_float(Some(json!(1.5e300)), "1.5e+300")]
    #[case::below_exponent_threshold(Some(json!(1e20)), "100000000000000000000")]
    #[case::string(Some(json!("iddd")), "iddd")]
    #[case::array(Some(json!([1, "a", null, [2, 3]])), "1,a,,2,3")]
    #[case::object(Some(json!({ "a": 1 })), "[object Object]")]
    fn should_stringify_values(#[case] value: Option<Value>, #[case] expected: &str) {
        assert_eq!(stringify(value.as_ref()), expected);
    }
}
