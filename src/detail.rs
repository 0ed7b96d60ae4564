//! Detail loading: one bundle per selection.

use crate::api::{self, FetchError};
use crate::evolution;
use crate::state::{EvolutionNode, PokemonDetails};

pub struct DetailBundle {
    pub details: PokemonDetails,
    pub evolution: Option<EvolutionNode>,
}

/// Loads everything the detail pane needs for one Pokemon. Details and
/// species go out concurrently and both must succeed; a failure of either
/// fails the whole bundle, so the pane never shows a partial result. The
/// chain fetch depends on the species payload and runs after it; its
/// failures degrade to an absent tree inside the resolver.
///
/// Whether the bundle may be committed is not decided here: the reducer
/// compares the request generation at commit time and drops superseded
/// results.
pub async fn load(name: &str) -> Result<DetailBundle, FetchError> {
    let (details, species) = tokio::join!(
        api::fetch_pokemon_details(name),
        api::fetch_pokemon_species(name),
    );
    let details = details?;
    let species = species?;
    let evolution = evolution::resolve_chain(species.evolution_chain_url.as_deref()).await;
    Ok(DetailBundle { details, evolution })
}
