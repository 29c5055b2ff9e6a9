use omamori_config::csrf;
use omamori_registry::{TokenRegistry, TokenState};
use pretty_assertions::assert_eq;
use zabuton::InMemoryStore;

fn registry(per_page_tokens: bool) -> TokenRegistry {
    TokenRegistry::builder()
        .config(csrf::Configuration {
            token_name: "csrftoken".into(),
            per_page_tokens,
        })
        .build()
}

#[test]
fn minted_tokens_are_alphanumeric() {
    let registry = registry(false);

    let token = registry.mint();
    assert!(!token.is_empty());
    assert!(token.chars().all(char::is_alphanumeric));
    assert_ne!(token, registry.mint());
}

#[test]
fn rotate_replaces_the_token() {
    let registry = registry(false);
    let store = InMemoryStore::<TokenState>::new();
    let session = store.create();

    assert!(session.load().token.is_none());

    let first = registry.rotate(&session);
    assert_eq!(session.load().token.as_ref(), Some(&first));

    let second = registry.rotate(&session);
    assert_ne!(first, second);
    assert_eq!(session.load().token.as_ref(), Some(&second));
}

#[test]
fn page_tokens_keep_binding_unique_and_ordered() {
    let registry = registry(true);
    let store = InMemoryStore::<TokenState>::new();
    let session = store.create();

    registry.issue_page_token(&session, "login");
    registry.issue_page_token(&session, "checkout");
    let replacement = registry.issue_page_token(&session, "login");

    let state = session.load();
    let page_tokens = state.page_tokens.as_ref().unwrap();

    assert_eq!(page_tokens.len(), 2);
    assert_eq!(page_tokens.get("login"), Some(replacement.as_str()));

    let pages: Vec<&str> = page_tokens.iter().map(|(page, _)| page).collect();
    assert_eq!(pages, ["login", "checkout"]);
}

#[test]
fn rotation_does_not_touch_page_tokens() {
    let registry = registry(true);
    let store = InMemoryStore::<TokenState>::new();
    let session = store.create();

    let page_token = registry.issue_page_token(&session, "login");
    registry.rotate(&session);

    let state = session.load();
    assert_eq!(
        state.page_tokens.as_ref().unwrap().get("login"),
        Some(page_token.as_str())
    );
}
