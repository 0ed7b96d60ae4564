use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;
use tui_dispatch_debug::debug::{ron_string, DebugSection, DebugState};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchState {
    pub active: bool,
    pub query: String,
}

/// One entry of the full catalog list. Order is whatever the API returned;
/// names are the working key but the API does not guarantee uniqueness.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PokemonDetails {
    pub name: String,
    pub types: Vec<String>,
    pub moves: Vec<String>,
}

/// The only species field the app consumes. The URL embeds the evolution
/// chain id, which lives in a different identifier space than the species'
/// own id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PokemonSpecies {
    pub name: String,
    pub evolution_chain_url: Option<String>,
}

/// Evolution chains are trees: branching evolutions (Eevee and friends) are
/// legal, depth is bounded by game data, and there are no cycles.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvolutionNode {
    pub name: String,
    pub evolves_to: Vec<EvolutionNode>,
}

/// Everything shown in the detail pane for the active selection. Replaced
/// wholesale on the next committed load; an absent evolution tree means the
/// chain could not be resolved and the pane degrades to "no evolutions".
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetailView {
    pub details: PokemonDetails,
    pub evolution: Option<EvolutionNode>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppState {
    pub terminal_size: (u16, u16),

    /// Catalog lifecycle: Empty until Init, then Loading, then
    /// Loaded/Failed. Single load per session, no transition back.
    pub catalog: DataResource<Vec<CatalogEntry>>,
    pub filtered_indices: Vec<usize>,
    pub selected_index: usize,
    pub search: SearchState,

    /// Most recently requested detail name.
    pub detail_name: Option<String>,
    /// Generation counter bumped on every detail request. Completion
    /// actions carry the generation they were spawned with; the reducer
    /// commits only when it still matches, which is what discards results
    /// of superseded loads.
    pub detail_request: u64,
    pub detail_loading: bool,
    pub detail: Option<DetailView>,

    pub message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            terminal_size: (80, 24),
            catalog: DataResource::Empty,
            filtered_indices: Vec::new(),
            selected_index: 0,
            search: SearchState::default(),
            detail_name: None,
            detail_request: 0,
            detail_loading: false,
            detail: None,
            message: None,
        }
    }
}

impl AppState {
    pub fn catalog_entries(&self) -> &[CatalogEntry] {
        self.catalog.data().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn selected_entry(&self) -> Option<&CatalogEntry> {
        self.filtered_indices
            .get(self.selected_index)
            .and_then(|idx| self.catalog_entries().get(*idx))
    }

    pub fn selected_name(&self) -> Option<String> {
        self.selected_entry().map(|entry| entry.name.clone())
    }

    pub fn set_selected_index(&mut self, index: usize) -> bool {
        if self.filtered_indices.is_empty() {
            self.selected_index = 0;
            return false;
        }
        let bounded = index.min(self.filtered_indices.len() - 1);
        if bounded != self.selected_index {
            self.selected_index = bounded;
            return true;
        }
        false
    }

    /// Recomputes the filtered view over the (immutable) catalog. The
    /// catalog itself is never touched; only the index vector changes.
    pub fn rebuild_filtered(&mut self) {
        self.filtered_indices = filter_indices(self.catalog_entries(), &self.search.query);
        if self.selected_index >= self.filtered_indices.len() {
            self.selected_index = 0;
        }
    }
}

/// Pure search filter: indices of entries whose name contains the query,
/// case-insensitively, preserving relative order. An empty or
/// whitespace-only query keeps every entry.
pub fn filter_indices(entries: &[CatalogEntry], query: &str) -> Vec<usize> {
    let query = query.trim().to_lowercase();
    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| query.is_empty() || entry.name.to_lowercase().contains(&query))
        .map(|(idx, _)| idx)
        .collect()
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        vec![
            DebugSection::new("Catalog")
                .entry("total", ron_string(&self.catalog_entries().len()))
                .entry("filtered", ron_string(&self.filtered_indices.len()))
                .entry("selected", ron_string(&self.selected_index))
                .entry("loading", ron_string(&self.catalog.is_loading())),
            DebugSection::new("Detail")
                .entry("name", ron_string(&self.detail_name))
                .entry("request", ron_string(&self.detail_request))
                .entry("loading", ron_string(&self.detail_loading))
                .entry("loaded", ron_string(&self.detail.is_some())),
            DebugSection::new("Search")
                .entry("active", ron_string(&self.search.active))
                .entry("query", ron_string(&self.search.query))
                .entry("message", ron_string(&self.message)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(names: &[&str]) -> Vec<CatalogEntry> {
        names
            .iter()
            .map(|name| CatalogEntry {
                name: name.to_string(),
            })
            .collect()
    }

    #[test]
    fn empty_query_keeps_every_entry_in_order() {
        let entries = catalog(&["bulbasaur", "ivysaur", "venusaur"]);
        assert_eq!(filter_indices(&entries, ""), vec![0, 1, 2]);
        assert_eq!(filter_indices(&entries, "   "), vec![0, 1, 2]);
    }

    #[test]
    fn filter_is_case_insensitive() {
        let entries = catalog(&["Pikachu", "raichu", "pichu"]);
        assert_eq!(
            filter_indices(&entries, "pika"),
            filter_indices(&entries, "PIKA")
        );
        assert_eq!(filter_indices(&entries, "PIKA"), vec![0]);
    }

    #[test]
    fn filter_is_idempotent() {
        let entries = catalog(&["charmander", "charmeleon", "charizard", "mew"]);
        let once = filter_indices(&entries, "char");
        let filtered: Vec<CatalogEntry> =
            once.iter().map(|idx| entries[*idx].clone()).collect();
        let twice = filter_indices(&filtered, "char");
        assert_eq!(twice.len(), once.len());
        assert_eq!(twice, vec![0, 1, 2]);
    }

    #[test]
    fn filter_preserves_relative_order_and_duplicates() {
        let entries = catalog(&["abra", "kadabra", "abra"]);
        assert_eq!(filter_indices(&entries, "abra"), vec![0, 1, 2]);
        assert_eq!(filter_indices(&entries, "kad"), vec![1]);
    }

    #[test]
    fn selection_clamps_to_filtered_range() {
        let mut state = AppState::default();
        state.catalog = DataResource::Loaded(catalog(&["a", "b", "c"]));
        state.rebuild_filtered();

        assert!(state.set_selected_index(99));
        assert_eq!(state.selected_index, 2);
        assert!(!state.set_selected_index(2));

        state.search.query = "zzz".to_string();
        state.rebuild_filtered();
        assert!(state.filtered_indices.is_empty());
        assert!(!state.set_selected_index(1));
        assert_eq!(state.selected_index, 0);
        assert!(state.selected_name().is_none());
    }
}
