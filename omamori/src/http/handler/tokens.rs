use axum::{
    debug_handler,
    extract::State,
    response::{IntoResponse, Response},
};
use http::{HeaderMap, HeaderValue, header};
use omamori_error::{ErrorType, Result, bail, omamori_error};
use omamori_registry::{PageTokens, TokenRegistry, TokenState};
use zabuton::SessionHandle;

/// Header a browser script sets to ask for the single rotating token
const FETCH_TOKEN_HEADER: &str = "fetch-csrf-token";

enum FetchMode<'a> {
    Single(&'a TokenRegistry),
    Page,
    Hidden,
}

/// Decide what a request is asking for, in fixed precedence
///
/// The fetch header wins over per-page serving; with no registry the endpoint
/// pretends not to exist.
fn fetch_mode(registry: Option<&TokenRegistry>, fetch_single: bool) -> FetchMode<'_> {
    match registry {
        Some(registry) if fetch_single => FetchMode::Single(registry),
        Some(registry) if registry.per_page_tokens_enabled() => FetchMode::Page,
        _ => FetchMode::Hidden,
    }
}

fn serve_single_token(
    registry: &TokenRegistry,
    sessions: &SessionHandle<TokenState>,
) -> Response {
    let session = sessions.get_or_create();
    let state = session.load();

    // an unset token serves as the empty value, not as an error
    let token_value = state.token.as_deref().unwrap_or_default();
    let token_pair = format!("{}:{}", registry.token_name(), token_value);

    ([(header::CONTENT_TYPE, "text/plain")], token_pair).into_response()
}

fn serve_page_tokens(sessions: &SessionHandle<TokenState>) -> Response {
    let session = sessions.get_or_create();
    let state = session.load();

    let body = state
        .page_tokens
        .as_ref()
        .map(serialize_page_tokens)
        .unwrap_or_default();

    // the exact byte length is part of the wire contract
    let headers = [
        (header::CONTENT_TYPE, HeaderValue::from_static("text/plain")),
        (header::CONTENT_LENGTH, HeaderValue::from(body.len())),
    ];

    (headers, body).into_response()
}

/// `page:token` pairs joined by commas, in stored order, nothing else
fn serialize_page_tokens(page_tokens: &PageTokens) -> String {
    let mut buffer = String::new();
    for (page, token) in page_tokens.iter() {
        if !buffer.is_empty() {
            buffer.push(',');
        }

        buffer.push_str(page);
        buffer.push(':');
        buffer.push_str(token);
    }

    buffer
}

#[debug_handler(state = crate::state::AppState)]
pub async fn post(
    State(registry): State<Option<TokenRegistry>>,
    sessions: SessionHandle<TokenState>,
    headers: HeaderMap,
) -> Result<Response> {
    let fetch_single = headers.contains_key(FETCH_TOKEN_HEADER);

    match fetch_mode(registry.as_ref(), fetch_single) {
        FetchMode::Single(registry) => Ok(serve_single_token(registry, &sessions)),
        FetchMode::Page => Ok(serve_page_tokens(&sessions)),
        // deliberately indistinguishable from a route that does not exist
        FetchMode::Hidden => Err(omamori_error!(
            type = ErrorType::NotFound,
            "token issuing inactive or per-page tokens disabled"
        )),
    }
}

#[debug_handler]
pub async fn get() -> Result<Response> {
    bail!(
        type = ErrorType::MethodNotAllowed(Some(
            "GET method not supported. Use POST instead.".into()
        )),
        "read verb on the token endpoint"
    );
}

#[cfg(test)]
mod tests {
    use super::{FetchMode, fetch_mode, serialize_page_tokens};
    use omamori_config::csrf;
    use omamori_registry::{PageTokens, TokenRegistry};
    use pretty_assertions::assert_eq;

    fn registry(per_page_tokens: bool) -> TokenRegistry {
        TokenRegistry::builder()
            .config(csrf::Configuration {
                token_name: "csrftoken".into(),
                per_page_tokens,
            })
            .build()
    }

    #[test]
    fn serialize_empty_map() {
        assert_eq!(serialize_page_tokens(&PageTokens::default()), "");
    }

    #[test]
    fn serialize_single_entry() {
        let page_tokens: PageTokens = [("login", "abc")].into_iter().collect();
        assert_eq!(serialize_page_tokens(&page_tokens), "login:abc");
    }

    #[test]
    fn serialize_many_entries() {
        let page_tokens: PageTokens = [("login", "abc"), ("checkout", "xyz"), ("admin", "123")]
            .into_iter()
            .collect();

        let serialized = serialize_page_tokens(&page_tokens);
        assert_eq!(serialized, "login:abc,checkout:xyz,admin:123");
        assert!(!serialized.starts_with(','));
        assert!(!serialized.ends_with(','));
        assert!(!serialized.ends_with('\n'));
    }

    #[test]
    fn serialized_output_reparses() {
        let pairs = [("login", "abc"), ("checkout", "xyz"), ("search", "s3cr3t")];
        let page_tokens: PageTokens = pairs.into_iter().collect();

        let serialized = serialize_page_tokens(&page_tokens);
        let reparsed: Vec<(&str, &str)> = serialized
            .split(',')
            .map(|entry| entry.split_once(':').unwrap())
            .collect();

        assert_eq!(reparsed, pairs);
    }

    #[test]
    fn fetch_header_takes_precedence() {
        assert!(matches!(
            fetch_mode(Some(&registry(true)), true),
            FetchMode::Single(_)
        ));
        assert!(matches!(
            fetch_mode(Some(&registry(false)), true),
            FetchMode::Single(_)
        ));
    }

    #[test]
    fn page_mode_requires_per_page_tokens() {
        assert!(matches!(
            fetch_mode(Some(&registry(true)), false),
            FetchMode::Page
        ));
        assert!(matches!(
            fetch_mode(Some(&registry(false)), false),
            FetchMode::Hidden
        ));
    }

    #[test]
    fn missing_registry_hides_the_endpoint() {
        assert!(matches!(fetch_mode(None, true), FetchMode::Hidden));
        assert!(matches!(fetch_mode(None, false), FetchMode::Hidden));
    }
}
