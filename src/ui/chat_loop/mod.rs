//! The display loop.
//!
//! A spawned reader task forwards terminal events over a channel; the loop
//! drains that channel and the turn-event channel without blocking, applies
//! the resulting actions through the reducer, executes any side-effect
//! commands, and redraws at most once per frame. Input stays live while a
//! turn streams because nothing here ever waits on the producer.

pub mod keybindings;
pub mod lifecycle;

use std::error::Error;
use std::sync::Arc;
use std::time::{Duration, Instant};

use ratatui::crossterm::event;
use tokio::sync::mpsc;
use tracing::debug;

use crate::core::app::{
    apply_actions, App, AppAction, AppActionContext, AppActionDispatcher, AppActionEnvelope,
    AppCommand,
};
use crate::core::config::Config;
use crate::core::turn::{TurnDispatcher, TurnEvent};
use crate::supervisor::Supervisor;
use crate::ui::renderer::ui;
use crate::ui::theme::Theme;

use keybindings::actions_for_event;
use lifecycle::{restore_terminal, setup_terminal, ChatTerminal};

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const IDLE_SLEEP: Duration = Duration::from_millis(16);

pub async fn run_chat(
    config: Config,
    supervisor: Arc<dyn Supervisor>,
    show_thoughts: bool,
) -> Result<(), Box<dyn Error>> {
    let theme = Theme::from_name(config.theme.as_deref().unwrap_or("dark"));
    let mut app = App::new(supervisor, theme, show_thoughts);

    let mut terminal = setup_terminal()?;
    let result = run_event_loop(&mut terminal, &mut app).await;
    restore_terminal(&mut terminal)?;
    result
}

async fn run_event_loop(terminal: &mut ChatTerminal, app: &mut App) -> Result<(), Box<dyn Error>> {
    let (turn_dispatcher, mut turn_rx) = TurnDispatcher::new();

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<AppActionEnvelope>();
    let action_dispatcher = AppActionDispatcher::new(action_tx);

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<event::Event>();
    let reader = spawn_event_reader(event_tx);

    let mut last_frame = Instant::now() - FRAME_INTERVAL;
    let mut needs_redraw = true;

    loop {
        if app.ui.exit_requested {
            break;
        }

        // The activity pulse animates even when nothing else happens.
        if app.ui.activity {
            needs_redraw = true;
        }

        if needs_redraw && last_frame.elapsed() >= FRAME_INTERVAL {
            terminal.draw(|f| {
                app.ui.last_term_size = f.area().as_size();
                ui(f, app);
            })?;
            last_frame = Instant::now();
            needs_redraw = false;
        }

        let ctx = AppActionContext {
            term_width: app.ui.last_term_size.width,
            term_height: app.ui.last_term_size.height,
        };

        let mut busy = false;
        busy |= forward_terminal_events(&mut event_rx, &action_dispatcher, ctx);
        busy |= forward_turn_events(&mut turn_rx, &action_dispatcher, ctx);
        busy |= drain_action_queue(app, &mut action_rx, &turn_dispatcher);

        if busy {
            needs_redraw = true;
        } else {
            tokio::time::sleep(IDLE_SLEEP).await;
        }
    }

    reader.abort();
    Ok(())
}

/// Polls the terminal off the main loop so drawing never waits on input.
fn spawn_event_reader(tx: mpsc::UnboundedSender<event::Event>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match event::poll(Duration::from_millis(10)) {
                Ok(true) => match event::read() {
                    Ok(ev) => {
                        if tx.send(ev).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        debug!(error = %e, "terminal read failed");
                        break;
                    }
                },
                Ok(false) => {
                    tokio::task::yield_now().await;
                }
                Err(e) => {
                    debug!(error = %e, "terminal poll failed");
                    break;
                }
            }
        }
    })
}

fn forward_terminal_events(
    event_rx: &mut mpsc::UnboundedReceiver<event::Event>,
    dispatcher: &AppActionDispatcher,
    ctx: AppActionContext,
) -> bool {
    let mut saw_any = false;
    while let Ok(ev) = event_rx.try_recv() {
        saw_any = true;
        if matches!(ev, event::Event::Resize(..)) {
            continue; // The next draw picks up the new size.
        }
        dispatcher.dispatch_many(actions_for_event(ev), ctx);
    }
    saw_any
}

fn forward_turn_events(
    turn_rx: &mut mpsc::UnboundedReceiver<(TurnEvent, u64)>,
    dispatcher: &AppActionDispatcher,
    ctx: AppActionContext,
) -> bool {
    let mut saw_any = false;
    while let Ok((event, turn_id)) = turn_rx.try_recv() {
        saw_any = true;
        let action = match event {
            TurnEvent::Thought(text) => AppAction::TurnThought { text, turn_id },
            TurnEvent::Final(text) => AppAction::TurnFinal { text, turn_id },
            TurnEvent::Error(message) => AppAction::TurnErrored { message, turn_id },
            TurnEvent::Cancelled => AppAction::TurnCancelled { turn_id },
            TurnEvent::TurnComplete => AppAction::TurnCompleted { turn_id },
        };
        dispatcher.dispatch_many([action], ctx);
    }
    saw_any
}

fn drain_action_queue(
    app: &mut App,
    action_rx: &mut mpsc::UnboundedReceiver<AppActionEnvelope>,
    turn_dispatcher: &TurnDispatcher,
) -> bool {
    let mut envelopes = Vec::new();
    while let Ok(envelope) = action_rx.try_recv() {
        envelopes.push(envelope);
    }
    if envelopes.is_empty() {
        return false;
    }

    for command in apply_actions(app, envelopes) {
        match command {
            AppCommand::SpawnTurn(params) => turn_dispatcher.spawn_turn(params),
        }
    }
    true
}
