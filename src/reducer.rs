use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::AppState;

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            state.catalog = DataResource::Loading;
            state.message = None;
            DispatchResult::changed_with(Effect::LoadCatalog)
        }

        Action::CatalogDidLoad(entries) => {
            state.catalog = DataResource::Loaded(entries);
            state.selected_index = 0;
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::CatalogDidError(error) => {
            state.catalog = DataResource::Failed(error);
            state.filtered_indices.clear();
            state.selected_index = 0;
            DispatchResult::changed()
        }

        Action::SelectionMove(delta) => {
            let mut index = state.selected_index as i16 + delta;
            if index < 0 {
                index = 0;
            }
            if !state.set_selected_index(index as usize) {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed_with_many(select_current(state))
        }

        Action::SelectionPage(delta) => {
            let page = list_page_size(state) as i16;
            let mut index = state.selected_index as i16 + delta * page;
            if index < 0 {
                index = 0;
            }
            if !state.set_selected_index(index as usize) {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed_with_many(select_current(state))
        }

        Action::SelectionJumpTop => {
            if !state.set_selected_index(0) {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed_with_many(select_current(state))
        }

        Action::SelectionJumpBottom => {
            let last = state.filtered_indices.len().saturating_sub(1);
            if !state.set_selected_index(last) {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed_with_many(select_current(state))
        }

        Action::DexSelect(index) => {
            state.set_selected_index(index);
            DispatchResult::changed_with_many(select_current(state))
        }

        Action::SearchStart => {
            state.search.active = true;
            state.search.query.clear();
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::SearchCancel => {
            if !state.search.active && state.search.query.is_empty() {
                return DispatchResult::unchanged();
            }
            state.search.active = false;
            state.search.query.clear();
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::SearchSubmit => {
            state.search.active = false;
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::SearchInput(ch) => {
            state.search.query.push(ch);
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::SearchBackspace => {
            state.search.query.pop();
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::DetailDidLoad {
            request,
            details,
            evolution,
        } => {
            // Commit gate: a load spawned for an earlier selection is
            // discarded silently. The compare and the commit sit in one
            // reducer call, so no other dispatch can interleave.
            if request != state.detail_request {
                return DispatchResult::unchanged();
            }
            state.detail = Some(crate::state::DetailView { details, evolution });
            state.detail_loading = false;
            state.message = None;
            DispatchResult::changed()
        }

        Action::DetailDidError {
            request,
            name,
            error,
        } => {
            if request != state.detail_request {
                return DispatchResult::unchanged();
            }
            state.detail_loading = false;
            state.message = Some(format!("{name} load error: {error}"));
            DispatchResult::changed()
        }

        Action::UiTerminalResize(width, height) => {
            if state.terminal_size != (width, height) {
                state.terminal_size = (width, height);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Makes the currently highlighted entry the requested detail and starts a
/// load for it. Re-requesting the name already in flight or shown is a
/// no-op; otherwise the generation is bumped, which orphans every earlier
/// in-flight load.
fn select_current(state: &mut AppState) -> Vec<Effect> {
    let Some(name) = state.selected_name() else {
        return Vec::new();
    };
    if state.detail_name.as_deref() == Some(&name) {
        return Vec::new();
    }
    state.detail_name = Some(name.clone());
    state.detail_request += 1;
    state.detail_loading = true;
    state.detail = None;
    state.message = None;
    vec![Effect::LoadDetail {
        name,
        request: state.detail_request,
    }]
}

fn list_page_size(state: &AppState) -> usize {
    state.terminal_size.1.saturating_sub(8) as usize
}
