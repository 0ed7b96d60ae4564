//! Evolution chain resolution.
//!
//! Species records point at their chain through a resource URL whose
//! trailing segment is the chain id. That id is unrelated to the species'
//! own numeric id: wartortle is species 8, but chain 8 belongs to spearow.
//! Substituting the species id silently fetches the wrong chain, so the id
//! is always derived from the URL here.

use crate::api;
use crate::state::EvolutionNode;

/// Extracts the chain id from an evolution-chain resource URL. A single
/// trailing slash is tolerated; anything that does not end in
/// `/evolution-chain/<id>` yields `None`.
pub fn chain_id_from_url(url: &str) -> Option<String> {
    let trimmed = url.strip_suffix('/').unwrap_or(url);
    let (prefix, id) = trimmed.rsplit_once('/')?;
    if !prefix.ends_with("/evolution-chain") || id.is_empty() {
        return None;
    }
    Some(id.to_string())
}

/// Resolves the chain behind a species' evolution-chain URL. Every failure
/// mode (absent URL, unparseable URL, fetch error) degrades to `None` so
/// the detail view renders without evolutions instead of breaking.
pub async fn resolve_chain(url: Option<&str>) -> Option<EvolutionNode> {
    let id = url.and_then(chain_id_from_url);
    api::fetch_evolution_chain(id.as_deref()).await.ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_trailing_id() {
        assert_eq!(
            chain_id_from_url("https://pokeapi.co/api/v2/evolution-chain/12/").as_deref(),
            Some("12")
        );
        assert_eq!(
            chain_id_from_url("https://pokeapi.co/api/v2/evolution-chain/12").as_deref(),
            Some("12")
        );
    }

    #[test]
    fn url_without_chain_segment_yields_none() {
        assert_eq!(
            chain_id_from_url("https://pokeapi.co/api/v2/pokemon-species/8/"),
            None
        );
        assert_eq!(chain_id_from_url("https://pokeapi.co/api/v2/"), None);
        assert_eq!(chain_id_from_url(""), None);
    }

    #[test]
    fn empty_or_nested_tail_yields_none() {
        assert_eq!(
            chain_id_from_url("https://pokeapi.co/api/v2/evolution-chain/"),
            None
        );
        assert_eq!(
            chain_id_from_url("https://pokeapi.co/api/v2/evolution-chain/12/extra"),
            None
        );
    }

    #[tokio::test]
    async fn absent_url_resolves_to_no_chain_without_a_request() {
        assert_eq!(resolve_chain(None).await, None);
    }

    #[tokio::test]
    async fn malformed_url_resolves_to_no_chain_without_a_request() {
        assert_eq!(resolve_chain(Some("not-a-chain-url")).await, None);
    }
}
