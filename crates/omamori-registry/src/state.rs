use indexmap::IndexMap;
use smol_str::SmolStr;

/// Per-session token state
///
/// This is the single session attribute the retrieval protocol reads. It is
/// only ever replaced wholesale (snapshot-swap), never mutated in place, so
/// readers working off one snapshot cannot observe a half-updated value.
#[derive(Clone, Default)]
pub struct TokenState {
    /// The rotating token used for fetch-style requests; `None` until the
    /// registry first rotates it. Serving the empty value is fine.
    pub token: Option<SmolStr>,
    /// Tokens issued per page; absent while no page has been tokenized yet,
    /// which is a valid state distinct from a missing session.
    pub page_tokens: Option<PageTokens>,
}

/// Insertion-ordered page-identifier → token map
///
/// Each page binds to exactly one token; re-issuing replaces the value but
/// keeps the page's position.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PageTokens(IndexMap<SmolStr, SmolStr>);

impl PageTokens {
    /// Bind `page` to `token`, returning the previously bound token if any
    pub fn insert<P, T>(&mut self, page: P, token: T) -> Option<SmolStr>
    where
        P: Into<SmolStr>,
        T: Into<SmolStr>,
    {
        self.0.insert(page.into(), token.into())
    }

    #[must_use]
    pub fn get(&self, page: &str) -> Option<&str> {
        self.0.get(page).map(SmolStr::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(page, token)| (page.as_str(), token.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<P, T> FromIterator<(P, T)> for PageTokens
where
    P: Into<SmolStr>,
    T: Into<SmolStr>,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (P, T)>,
    {
        Self(
            iter.into_iter()
                .map(|(page, token)| (page.into(), token.into()))
                .collect(),
        )
    }
}
