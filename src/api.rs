use std::sync::OnceLock;

use serde::Deserialize;

use crate::state::{CatalogEntry, EvolutionNode, PokemonDetails, PokemonSpecies};

const API_BASE: &str = "https://pokeapi.co/api/v2";
const CATALOG_LIMIT: usize = 2000;

/// Failure of a single API round trip. Nothing here is retried or cached;
/// callers decide what (if anything) to surface.
#[derive(Debug)]
pub enum FetchError {
    /// Network, HTTP-status, or body-decode failure.
    Transport(reqwest::Error),
    /// The API does not know the requested name/id.
    NotFound(String),
    /// No chain id could be derived, so no request was made.
    InvalidId,
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Transport(err) => write!(f, "request failed: {err}"),
            FetchError::NotFound(resource) => write!(f, "not found: {resource}"),
            FetchError::InvalidId => write!(f, "invalid evolution chain id"),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Transport(err) => Some(err),
            FetchError::NotFound(_) | FetchError::InvalidId => None,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Clone, Debug, Deserialize)]
struct ApiResource {
    url: String,
}

#[derive(Clone, Debug, Deserialize)]
struct ListResponse {
    results: Vec<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    name: String,
    types: Vec<PokemonTypeSlot>,
    moves: Vec<PokemonMoveSlot>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonTypeSlot {
    #[serde(rename = "type")]
    type_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonMoveSlot {
    #[serde(rename = "move")]
    move_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonSpeciesResponse {
    name: String,
    evolution_chain: Option<ApiResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct EvolutionChainResponse {
    chain: ChainLink,
}

#[derive(Clone, Debug, Deserialize)]
struct ChainLink {
    species: NamedResource,
    evolves_to: Vec<ChainLink>,
}

/// Fetches the full catalog in one round trip, in API order.
pub async fn fetch_all_pokemon() -> Result<Vec<CatalogEntry>, FetchError> {
    let url = format!("{API_BASE}/pokemon?limit={CATALOG_LIMIT}&offset=0");
    let response: ListResponse = fetch_json(&url).await?;
    Ok(response
        .results
        .into_iter()
        .map(|entry| CatalogEntry { name: entry.name })
        .collect())
}

pub async fn fetch_pokemon_details(name: &str) -> Result<PokemonDetails, FetchError> {
    let url = format!("{API_BASE}/pokemon/{name}");
    let response: PokemonResponse = fetch_json(&url).await?;
    Ok(PokemonDetails {
        name: response.name,
        types: response
            .types
            .into_iter()
            .map(|slot| slot.type_info.name)
            .collect(),
        moves: response
            .moves
            .into_iter()
            .map(|slot| slot.move_info.name)
            .collect(),
    })
}

pub async fn fetch_pokemon_species(name: &str) -> Result<PokemonSpecies, FetchError> {
    let url = format!("{API_BASE}/pokemon-species/{name}");
    let response: PokemonSpeciesResponse = fetch_json(&url).await?;
    Ok(PokemonSpecies {
        name: response.name,
        evolution_chain_url: response.evolution_chain.map(|chain| chain.url),
    })
}

/// Fetches an evolution chain by its (chain-space) id. An absent id reports
/// `InvalidId` before any network traffic happens.
pub async fn fetch_evolution_chain(id: Option<&str>) -> Result<EvolutionNode, FetchError> {
    let Some(id) = id else {
        return Err(FetchError::InvalidId);
    };
    let url = format!("{API_BASE}/evolution-chain/{id}");
    let response: EvolutionChainResponse = fetch_json(&url).await?;
    Ok(chain_to_node(response.chain))
}

fn chain_to_node(link: ChainLink) -> EvolutionNode {
    EvolutionNode {
        name: link.species.name,
        evolves_to: link.evolves_to.into_iter().map(chain_to_node).collect(),
    }
}

async fn fetch_json<T: serde::de::DeserializeOwned>(url: &str) -> Result<T, FetchError> {
    let response = http_client()
        .get(url)
        .send()
        .await
        .map_err(FetchError::Transport)?;
    if response.status() == reqwest::StatusCode::NOT_FOUND {
        return Err(FetchError::NotFound(url.to_string()));
    }
    let response = response.error_for_status().map_err(FetchError::Transport)?;
    response.json().await.map_err(FetchError::Transport)
}

fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(reqwest::Client::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pokemon_response_projection_preserves_order() {
        let json = r#"{
            "name": "bulbasaur",
            "types": [
                {"slot": 1, "type": {"name": "grass", "url": "u"}},
                {"slot": 2, "type": {"name": "poison", "url": "u"}}
            ],
            "moves": [
                {"move": {"name": "razor-wind", "url": "u"}},
                {"move": {"name": "swords-dance", "url": "u"}},
                {"move": {"name": "cut", "url": "u"}}
            ]
        }"#;
        let response: PokemonResponse = serde_json::from_str(json).expect("decode");
        assert_eq!(response.name, "bulbasaur");
        let types: Vec<_> = response
            .types
            .into_iter()
            .map(|slot| slot.type_info.name)
            .collect();
        assert_eq!(types, vec!["grass", "poison"]);
        let moves: Vec<_> = response
            .moves
            .into_iter()
            .map(|slot| slot.move_info.name)
            .collect();
        assert_eq!(moves, vec!["razor-wind", "swords-dance", "cut"]);
    }

    #[test]
    fn species_response_tolerates_missing_chain() {
        let json = r#"{"name": "mew", "evolution_chain": null}"#;
        let response: PokemonSpeciesResponse = serde_json::from_str(json).expect("decode");
        assert!(response.evolution_chain.is_none());

        let json = r#"{
            "name": "squirtle",
            "evolution_chain": {"url": "https://pokeapi.co/api/v2/evolution-chain/3/"}
        }"#;
        let response: PokemonSpeciesResponse = serde_json::from_str(json).expect("decode");
        assert_eq!(
            response.evolution_chain.map(|chain| chain.url).as_deref(),
            Some("https://pokeapi.co/api/v2/evolution-chain/3/")
        );
    }

    #[test]
    fn chain_decodes_into_branching_tree() {
        let json = r#"{
            "chain": {
                "species": {"name": "eevee", "url": "u"},
                "evolves_to": [
                    {"species": {"name": "vaporeon", "url": "u"}, "evolves_to": []},
                    {"species": {"name": "jolteon", "url": "u"}, "evolves_to": []},
                    {"species": {"name": "flareon", "url": "u"}, "evolves_to": []}
                ]
            }
        }"#;
        let response: EvolutionChainResponse = serde_json::from_str(json).expect("decode");
        let node = chain_to_node(response.chain);
        assert_eq!(node.name, "eevee");
        let children: Vec<_> = node
            .evolves_to
            .iter()
            .map(|child| child.name.as_str())
            .collect();
        assert_eq!(children, vec!["vaporeon", "jolteon", "flareon"]);
        assert!(node.evolves_to.iter().all(|child| child.evolves_to.is_empty()));
    }

    #[tokio::test]
    async fn absent_chain_id_fails_without_a_request() {
        match fetch_evolution_chain(None).await {
            Err(FetchError::InvalidId) => {}
            other => panic!("expected InvalidId, got {other:?}"),
        }
    }
}
