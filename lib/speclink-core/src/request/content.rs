use crate::document::Operation;

/// The content types negotiated for an operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NegotiatedContent {
    /// The content type of the request body.
    pub content_type: Option<String>,
    /// The content type expected in the response.
    pub accept: Option<String>,
}

/// Chooses the request content type and the accepted response content type.
///
/// The request content type is the first one declared under `requestBody.content`.
/// The accepted type is the first one declared by the responses, visited in
/// document order (not sorted by status code); a response without content is
/// skipped.
pub fn negotiate_content(operation: &Operation) -> NegotiatedContent {
    let content_type = operation
        .request_body
        .as_ref()
        .and_then(|body| body.content.keys().next())
        .cloned();

    let accept = operation
        .responses
        .values()
        .find_map(|response| response.content.keys().next())
        .cloned();

    NegotiatedContent {
        content_type,
        accept,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn operation(json: &str) -> Operation {
        serde_json::from_str(json).expect("valid operation")
    }

    #[test]
    fn should_negotiate_nothing_without_content() {
        let negotiated = negotiate_content(&operation("{}"));

        assert_eq!(negotiated, NegotiatedContent::default());
    }

    #[test]
    fn should_pick_first_declared_content_types() {
        let operation = operation(
            r#"{
                "requestBody": {
                    "content": {
                        "application/json": { "schema": { "type": "object" } },
                        "application/xml": {}
                    }
                },
                "responses": {
                    "201": { "content": { "text/plain": {}, "application/json": {} } },
                    "200": { "content": { "application/json": {} } }
                }
            }"#,
        );

        insta::assert_debug_snapshot!(negotiate_content(&operation), @r#"
        NegotiatedContent {
            content_type: Some(
                "application/json",
            ),
            accept: Some(
                "text/plain",
            ),
        }
        "#);
    }

    #[test]
    fn should_skip_responses_without_content() {
        let operation = operation(
            r#"{
                "responses": {
                    "204": { "description": "no content" },
                    "400": { "content": { "application/problem+json": {} } }
                }
            }"#,
        );

        let negotiated = negotiate_content(&operation);

        assert_eq!(negotiated.accept.as_deref(), Some("application/problem+json"));
        assert_eq!(negotiated.content_type, None);
    }
}
