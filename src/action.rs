use serde::{Deserialize, Serialize};

use crate::state::{CatalogEntry, EvolutionNode, PokemonDetails};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[action(infer_categories)]
pub enum Action {
    Init,
    CatalogDidLoad(Vec<CatalogEntry>),
    CatalogDidError(String),

    SelectionMove(i16),
    SelectionPage(i16),
    SelectionJumpTop,
    SelectionJumpBottom,
    DexSelect(usize),

    SearchStart,
    SearchCancel,
    SearchSubmit,
    SearchInput(char),
    SearchBackspace,

    /// Completion of a detail load. `request` is the generation the load
    /// was spawned with; the reducer drops it if the selection moved on.
    DetailDidLoad {
        request: u64,
        details: PokemonDetails,
        evolution: Option<EvolutionNode>,
    },
    DetailDidError {
        request: u64,
        name: String,
        error: String,
    },

    UiTerminalResize(u16, u16),
    Quit,
}
