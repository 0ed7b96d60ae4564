use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventKind,
    HandlerResponse, Keybindings, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use pokedex::action::Action;
use pokedex::api;
use pokedex::detail;
use pokedex::effect::Effect;
use pokedex::reducer::reducer;
use pokedex::state::AppState;
use pokedex::ui::{DexComponentId, DexContext, DexUi};

#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "Pokedex TUI over the PokeAPI")]
struct Args {
    #[command(flatten)]
    debug: DebugCliArgs,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    let debug = DebugSession::new(args.debug);

    let state = debug
        .load_state_or_else_async(|| async { Ok::<AppState, io::Error>(AppState::default()) })
        .await
        .map_err(debug_error)?;
    let replay_actions = debug.load_replay_items().map_err(debug_error)?;
    let (middleware, recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions).await;

    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug.save_actions(recorder.as_ref()).map_err(debug_error)?;
    Ok(())
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(DexUi::new()));
    let mut bus: EventBus<AppState, Action, DexComponentId, DexContext> = EventBus::new();
    let keybindings: Keybindings<DexContext> = Keybindings::new();

    let ui_list = Rc::clone(&ui);
    bus.register(DexComponentId::DexList, move |event, state| {
        ui_list.borrow_mut().handle_list_event(&event.kind, state)
    });

    let ui_search = Rc::clone(&ui);
    bus.register(DexComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    bus.register_global(|event, state| match event.kind {
        EventKind::Resize(width, height) => {
            HandlerResponse::action(Action::UiTerminalResize(width, height)).with_render()
        }
        EventKind::Key(key) => match key.code {
            crossterm::event::KeyCode::Char('q') if !state.search.active => {
                HandlerResponse::action(Action::Quit)
            }
            crossterm::event::KeyCode::Char('/') if !state.search.active => {
                HandlerResponse::action(Action::SearchStart)
            }
            _ => HandlerResponse::ignored(),
        },
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |_runtime| {},
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::LoadCatalog => {
            ctx.tasks().spawn(TaskKey::new("catalog"), async {
                match api::fetch_all_pokemon().await {
                    Ok(entries) => Action::CatalogDidLoad(entries),
                    Err(error) => Action::CatalogDidError(error.to_string()),
                }
            });
        }
        Effect::LoadDetail { name, request } => {
            // One task key per generation: superseded loads are never
            // cancelled, their results just fail the commit gate.
            let key = format!("detail_{request}");
            ctx.tasks().spawn(TaskKey::new(key), async move {
                match detail::load(&name).await {
                    Ok(bundle) => Action::DetailDidLoad {
                        request,
                        details: bundle.details,
                        evolution: bundle.evolution,
                    },
                    Err(error) => Action::DetailDidError {
                        request,
                        name,
                        error: error.to_string(),
                    },
                }
            });
        }
    }
}
