use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tui_dispatch::{
    Component, EventContext, EventKind, EventRoutingState, HandlerResponse, RenderContext,
};
use tui_dispatch_components::style::BorderStyle;
use tui_dispatch_components::{
    BaseStyle, Padding, SelectList, SelectListBehavior, SelectListProps, SelectListStyle,
    SelectionStyle, StatusBar, StatusBarHint, StatusBarItem, StatusBarProps, StatusBarSection,
    StatusBarStyle,
};

use crate::action::Action;
use crate::state::{AppState, EvolutionNode};

const BG_BASE: Color = Color::Rgb(16, 16, 24);
const BG_PANEL: Color = Color::Rgb(28, 30, 44);
const BG_HIGHLIGHT: Color = Color::Rgb(70, 74, 120);
const TEXT_MAIN: Color = Color::Rgb(236, 236, 244);
const TEXT_DIM: Color = Color::Rgb(158, 164, 188);
const ACCENT_RED: Color = Color::Rgb(224, 96, 96);
const ACCENT_YELLOW: Color = Color::Rgb(236, 200, 104);

/// The original client previews only the first few moves; details keep the
/// full ordered list.
const MOVE_PREVIEW_LIMIT: usize = 4;

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum DexComponentId {
    DexList,
    Search,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DexContext {
    DexList,
    Search,
}

impl EventRoutingState<DexComponentId, DexContext> for AppState {
    fn focused(&self) -> Option<DexComponentId> {
        if self.search.active {
            Some(DexComponentId::Search)
        } else {
            Some(DexComponentId::DexList)
        }
    }

    fn modal(&self) -> Option<DexComponentId> {
        if self.search.active {
            Some(DexComponentId::Search)
        } else {
            None
        }
    }

    fn binding_context(&self, id: DexComponentId) -> DexContext {
        match id {
            DexComponentId::DexList => DexContext::DexList,
            DexComponentId::Search => DexContext::Search,
        }
    }

    fn default_context(&self) -> DexContext {
        DexContext::DexList
    }
}

pub struct DexUi {
    dex_list: SelectList,
    status_bar: StatusBar,
}

impl DexUi {
    pub fn new() -> Self {
        Self {
            dex_list: SelectList::new(),
            status_bar: StatusBar::new(),
        }
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<DexComponentId>,
    ) {
        render_app(
            frame,
            area,
            state,
            render_ctx,
            event_ctx,
            &mut self.dex_list,
            &mut self.status_bar,
        );
    }

    pub fn handle_list_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        handle_list_event(event, state, &mut self.dex_list)
    }

    pub fn handle_search_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        handle_search_event(event, state)
    }
}

impl Default for DexUi {
    fn default() -> Self {
        Self::new()
    }
}

pub fn render_app(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    _render_ctx: RenderContext,
    event_ctx: &mut EventContext<DexComponentId>,
    dex_list: &mut SelectList,
    status_bar: &mut StatusBar,
) {
    let base = Block::default().style(Style::default().bg(BG_BASE));
    frame.render_widget(base, area);
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(area);

    render_header(frame, layout[0], state, event_ctx);
    render_body(frame, layout[1], state, event_ctx, dex_list);
    render_footer(frame, layout[2], state, status_bar);
}

pub fn handle_list_event(
    event: &EventKind,
    state: &AppState,
    dex_list: &mut SelectList,
) -> HandlerResponse<Action> {
    let actions = match event {
        EventKind::Key(key) => match key.code {
            crossterm::event::KeyCode::PageDown => vec![Action::SelectionPage(1)],
            crossterm::event::KeyCode::PageUp => vec![Action::SelectionPage(-1)],
            crossterm::event::KeyCode::Home | crossterm::event::KeyCode::Char('g') => {
                vec![Action::SelectionJumpTop]
            }
            crossterm::event::KeyCode::End | crossterm::event::KeyCode::Char('G') => {
                vec![Action::SelectionJumpBottom]
            }
            _ => {
                let items = dex_items(state);
                let props = SelectListProps {
                    items: &items,
                    count: items.len(),
                    selected: state.selected_index.min(items.len().saturating_sub(1)),
                    is_focused: true,
                    style: dex_list_style(),
                    behavior: SelectListBehavior {
                        show_scrollbar: true,
                        wrap_navigation: false,
                    },
                    on_select: Action::DexSelect,
                    render_item: &|item| item.clone(),
                };
                let actions: Vec<_> = dex_list.handle_event(event, props).into_iter().collect();
                return handler_response(actions);
            }
        },
        EventKind::Scroll { delta, .. } => vec![Action::SelectionMove((*delta * 3) as i16)],
        _ => vec![],
    };
    handler_response(actions)
}

pub fn handle_search_event(event: &EventKind, _state: &AppState) -> HandlerResponse<Action> {
    let actions = match event {
        EventKind::Key(key) => match key.code {
            crossterm::event::KeyCode::Esc => vec![Action::SearchCancel],
            crossterm::event::KeyCode::Enter => vec![Action::SearchSubmit],
            crossterm::event::KeyCode::Backspace => vec![Action::SearchBackspace],
            crossterm::event::KeyCode::Char(ch) => vec![Action::SearchInput(ch)],
            _ => vec![],
        },
        _ => vec![],
    };
    handler_response(actions)
}

fn handler_response(actions: Vec<Action>) -> HandlerResponse<Action> {
    if actions.is_empty() {
        HandlerResponse::ignored()
    } else {
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn render_header(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    event_ctx: &mut EventContext<DexComponentId>,
) {
    if state.search.active {
        event_ctx.set_component_area(DexComponentId::Search, area);
    }
    let title_style = Style::default().fg(ACCENT_RED).add_modifier(Modifier::BOLD);
    let search = if state.search.active {
        format!("/{}_", state.search.query)
    } else if state.search.query.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", state.search.query)
    };
    let header_text = Line::from(vec![
        Span::styled("POKEDEX", title_style),
        Span::raw("  |  Search: "),
        Span::styled(search, Style::default().fg(ACCENT_YELLOW)),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN));
    let paragraph = Paragraph::new(header_text)
        .block(block)
        .style(Style::default().fg(TEXT_MAIN));
    frame.render_widget(paragraph, area);
}

fn render_body(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    event_ctx: &mut EventContext<DexComponentId>,
    dex_list: &mut SelectList,
) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    render_list(frame, layout[0], state, event_ctx, dex_list);
    render_detail(frame, layout[1], state);
}

fn render_list(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    event_ctx: &mut EventContext<DexComponentId>,
    dex_list: &mut SelectList,
) {
    event_ctx.set_component_area(DexComponentId::DexList, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title("POKEMON")
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(status) = list_status(state) {
        frame.render_widget(
            Paragraph::new(status)
                .style(Style::default().fg(TEXT_DIM))
                .wrap(Wrap { trim: true }),
            inner,
        );
        return;
    }

    let items = dex_items(state);
    let props = SelectListProps {
        items: &items,
        count: items.len(),
        selected: state.selected_index.min(items.len().saturating_sub(1)),
        is_focused: !state.search.active,
        style: dex_list_style(),
        behavior: SelectListBehavior {
            show_scrollbar: true,
            wrap_navigation: false,
        },
        on_select: Action::DexSelect,
        render_item: &|item| item.clone(),
    };
    dex_list.render(frame, inner, props);
}

/// Status line shown instead of the list. The three texts are deliberately
/// distinct so Loading, Failed, and an empty result never look alike.
pub fn list_status(state: &AppState) -> Option<String> {
    use tui_dispatch::DataResource;
    match &state.catalog {
        DataResource::Empty | DataResource::Loading => Some("Loading...".to_string()),
        DataResource::Failed(_) => Some("An error has occurred.".to_string()),
        DataResource::Loaded(_) if state.filtered_indices.is_empty() => {
            Some("No Results Found".to_string())
        }
        DataResource::Loaded(_) => None,
    }
}

fn render_detail(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("DETAILS")
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let content = detail_text(state);
    frame.render_widget(
        Paragraph::new(content)
            .style(Style::default().fg(TEXT_MAIN))
            .wrap(Wrap { trim: false })
            .alignment(Alignment::Left),
        inner,
    );
}

fn detail_text(state: &AppState) -> Text<'static> {
    let Some(view) = state.detail.as_ref() else {
        if state.detail_loading {
            return Text::from(Span::styled("...", Style::default().fg(TEXT_DIM)));
        }
        return Text::from(Span::styled(
            "Select a Pokemon to view details.",
            Style::default().fg(TEXT_DIM),
        ));
    };

    let heading_style = Style::default().fg(ACCENT_RED).add_modifier(Modifier::BOLD);
    let section_style = Style::default()
        .fg(ACCENT_YELLOW)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(Span::styled(view.details.name.to_uppercase(), heading_style)),
        Line::default(),
        Line::from(Span::styled("Types", section_style)),
    ];
    for type_name in &view.details.types {
        lines.push(Line::from(format!("  {type_name}")));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled("Moves", section_style)));
    for move_name in view.details.moves.iter().take(MOVE_PREVIEW_LIMIT) {
        lines.push(Line::from(format!("  {move_name}")));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled("Evolutions", section_style)));
    match view.evolution.as_ref() {
        Some(chain) => lines.extend(evolution_lines(chain)),
        None => lines.push(Line::from(Span::styled(
            "  No evolution data.",
            Style::default().fg(TEXT_DIM),
        ))),
    }

    Text::from(lines)
}

/// Pure preorder flatten of an evolution tree: each row is (depth, name),
/// children directly after their parent. Drives both rendering and tests.
pub fn evolution_rows(node: &EvolutionNode) -> Vec<(usize, String)> {
    let mut rows = Vec::new();
    push_rows(node, 0, &mut rows);
    rows
}

fn push_rows(node: &EvolutionNode, depth: usize, rows: &mut Vec<(usize, String)>) {
    rows.push((depth, node.name.clone()));
    for child in &node.evolves_to {
        push_rows(child, depth + 1, rows);
    }
}

fn evolution_lines(chain: &EvolutionNode) -> Vec<Line<'static>> {
    evolution_rows(chain)
        .into_iter()
        .map(|(depth, name)| Line::from(format!("{}  {name}", "  ".repeat(depth))))
        .collect()
}

fn render_footer(frame: &mut Frame, area: Rect, state: &AppState, status_bar: &mut StatusBar) {
    let status = footer_status(state);
    let (left_hints, center_hints) = status_hints(state);
    let status_span = Span::styled(status.as_str(), Style::default().fg(ACCENT_YELLOW));
    let status_items = [StatusBarItem::span(status_span)];

    let style = StatusBarStyle {
        base: BaseStyle {
            border: Some(BorderStyle {
                borders: Borders::ALL,
                style: Style::default().fg(TEXT_DIM),
                focused_style: Some(Style::default().fg(ACCENT_RED)),
            }),
            padding: Padding::xy(1, 0),
            bg: Some(BG_PANEL),
            fg: Some(TEXT_MAIN),
        },
        text: Style::default().fg(TEXT_DIM),
        hint_key: Style::default()
            .fg(ACCENT_RED)
            .add_modifier(Modifier::BOLD),
        hint_label: Style::default().fg(TEXT_DIM),
        separator: Style::default().fg(TEXT_DIM),
    };

    let props = StatusBarProps {
        left: StatusBarSection::hints(&left_hints).with_separator("  "),
        center: StatusBarSection::hints(&center_hints).with_separator("  "),
        right: StatusBarSection::items(&status_items).with_separator("  "),
        style,
        is_focused: false,
    };
    Component::<Action>::render(status_bar, frame, area, props);
}

fn footer_status(state: &AppState) -> String {
    if let Some(message) = state.message.as_ref() {
        return message.clone();
    }
    if let tui_dispatch::DataResource::Failed(error) = &state.catalog {
        return format!("Catalog error: {error}");
    }
    if state.catalog.is_loading() {
        "Loading pokedex...".to_string()
    } else if state.detail_loading {
        "Loading details...".to_string()
    } else {
        String::new()
    }
}

fn status_hints(state: &AppState) -> (Vec<StatusBarHint<'static>>, Vec<StatusBarHint<'static>>) {
    if state.search.active {
        let left = vec![
            StatusBarHint::new("Enter", "Apply"),
            StatusBarHint::new("Esc", "Cancel"),
            StatusBarHint::new("Bksp", "Delete"),
        ];
        let center = vec![StatusBarHint::new("q", "Quit")];
        return (left, center);
    }

    let left = vec![
        StatusBarHint::new("j/k", "Move"),
        StatusBarHint::new("PgUp/PgDn", "Page"),
        StatusBarHint::new("g/G", "Top/Bottom"),
        StatusBarHint::new("Enter", "Details"),
    ];
    let center = vec![
        StatusBarHint::new("/", "Search"),
        StatusBarHint::new("q", "Quit"),
    ];
    (left, center)
}

fn dex_items(state: &AppState) -> Vec<Line<'static>> {
    state
        .filtered_indices
        .iter()
        .filter_map(|idx| state.catalog_entries().get(*idx))
        .map(|entry| Line::from(entry.name.clone()))
        .collect()
}

fn dex_list_style() -> SelectListStyle {
    SelectListStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: None,
            fg: Some(TEXT_MAIN),
        },
        selection: SelectionStyle {
            style: Some(
                Style::default()
                    .bg(BG_HIGHLIGHT)
                    .fg(TEXT_MAIN)
                    .add_modifier(Modifier::BOLD),
            ),
            marker: None,
            disabled: false,
        },
        ..SelectListStyle::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CatalogEntry, DetailView, PokemonDetails};
    use tui_dispatch::DataResource;

    fn node(name: &str, evolves_to: Vec<EvolutionNode>) -> EvolutionNode {
        EvolutionNode {
            name: name.to_string(),
            evolves_to,
        }
    }

    #[test]
    fn linear_chain_flattens_parent_before_child() {
        let chain = node(
            "Bulbasaur",
            vec![node("Ivysaur", vec![node("Venusaur", vec![])])],
        );
        assert_eq!(
            evolution_rows(&chain),
            vec![
                (0, "Bulbasaur".to_string()),
                (1, "Ivysaur".to_string()),
                (2, "Venusaur".to_string()),
            ]
        );
    }

    #[test]
    fn branching_chain_keeps_sibling_order() {
        let chain = node(
            "eevee",
            vec![
                node("vaporeon", vec![]),
                node("jolteon", vec![]),
                node("flareon", vec![]),
            ],
        );
        assert_eq!(
            evolution_rows(&chain),
            vec![
                (0, "eevee".to_string()),
                (1, "vaporeon".to_string()),
                (1, "jolteon".to_string()),
                (1, "flareon".to_string()),
            ]
        );
    }

    #[test]
    fn single_node_renders_one_row() {
        let chain = node("tauros", vec![]);
        assert_eq!(evolution_rows(&chain), vec![(0, "tauros".to_string())]);
    }

    #[test]
    fn list_statuses_are_pairwise_distinct() {
        let mut state = AppState::default();

        state.catalog = DataResource::Loading;
        let loading = list_status(&state).expect("loading text");

        state.catalog = DataResource::Failed("boom".to_string());
        let failed = list_status(&state).expect("failed text");

        state.catalog = DataResource::Loaded(Vec::<CatalogEntry>::new());
        state.rebuild_filtered();
        let empty = list_status(&state).expect("empty text");

        assert_ne!(loading, failed);
        assert_ne!(loading, empty);
        assert_ne!(failed, empty);
    }

    #[test]
    fn loaded_catalog_with_matches_has_no_status() {
        let mut state = AppState::default();
        state.catalog = DataResource::Loaded(vec![CatalogEntry {
            name: "pikachu".to_string(),
        }]);
        state.rebuild_filtered();
        assert_eq!(list_status(&state), None);
    }

    #[test]
    fn detail_placeholder_depends_on_loading() {
        let mut state = AppState::default();
        let idle = detail_text(&state);
        state.detail_loading = true;
        let loading = detail_text(&state);
        assert_ne!(
            format!("{idle:?}"),
            format!("{loading:?}"),
        );

        state.detail = Some(DetailView {
            details: PokemonDetails {
                name: "pikachu".to_string(),
                types: vec!["electric".to_string()],
                moves: vec!["thunder-shock".to_string()],
            },
            evolution: None,
        });
        let shown = format!("{:?}", detail_text(&state));
        assert!(shown.contains("PIKACHU"));
        assert!(shown.contains("electric"));
        assert!(shown.contains("No evolution data."));
    }
}
