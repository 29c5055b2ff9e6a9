#[macro_use]
extern crate tracing;

pub use self::state::{PageTokens, TokenState};

mod state;

use omamori_config::csrf;
use rand::{Rng, distributions::Alphanumeric};
use smol_str::SmolStr;
use typed_builder::TypedBuilder;
use zabuton::Session;

const TOKEN_LEN: usize = 32;

/// Owner of token naming and the mutation side of the per-session token state
///
/// The retrieval protocol only ever reads session state; everything that
/// writes it (rotation, per-page issuance) lives here. Constructed from the
/// `[csrf]` configuration section and passed around explicitly.
#[derive(Clone, TypedBuilder)]
pub struct TokenRegistry {
    config: csrf::Configuration,
}

impl TokenRegistry {
    /// Name under which the single rotating token is reported on the wire
    #[must_use]
    pub fn token_name(&self) -> &str {
        &self.config.token_name
    }

    #[must_use]
    pub fn per_page_tokens_enabled(&self) -> bool {
        self.config.per_page_tokens
    }

    /// Mint a fresh token value
    #[must_use]
    pub fn mint(&self) -> SmolStr {
        rand::thread_rng()
            .sample_iter(Alphanumeric)
            .map(char::from)
            .take(TOKEN_LEN)
            .collect::<String>()
            .into()
    }

    /// Replace the session's rotating token
    pub fn rotate(&self, session: &Session<TokenState>) -> SmolStr {
        let token = self.mint();
        session.rcu(|state| TokenState {
            token: Some(token.clone()),
            page_tokens: state.page_tokens.clone(),
        });

        debug!("rotated session token");

        token
    }

    /// Issue (or replace) the token bound to one page
    pub fn issue_page_token(&self, session: &Session<TokenState>, page: &str) -> SmolStr {
        let token = self.mint();
        session.rcu(|state| {
            let mut next = state.clone();
            next.page_tokens
                .get_or_insert_with(PageTokens::default)
                .insert(page, token.clone());
            next
        });

        debug!(%page, "issued page token");

        token
    }
}
