use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

#[derive(Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Configuration {
    /// Name under which the single rotating token is reported to clients
    pub token_name: SmolStr,
    /// Whether every page gets its own token in addition to the rotating one
    pub per_page_tokens: bool,
}
