//! Terminal chat front end: transcript, live suggestions and input line.

pub mod app;
pub mod view;

use std::sync::Arc;

use crossterm::event::{Event, EventStream, KeyEventKind};
use futures_util::StreamExt;
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::application::{ConversationUseCase, LookupSuggestionsUseCase, SequencedSuggestions};
use crate::domain::{SessionState, UserAction};

pub use app::{ChatApp, UiCommand};

/// Run the chat until the user quits. The terminal is restored on every exit path.
pub async fn run(
    conversation: Arc<ConversationUseCase>,
    lookup: Arc<LookupSuggestionsUseCase>,
) -> anyhow::Result<()> {
    let session = SessionState::with_random_user();
    info!("Starting chat session {}", session.user_id());

    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, ChatApp::new(session), conversation, lookup).await;
    ratatui::restore();
    result
}

async fn event_loop(
    terminal: &mut DefaultTerminal,
    mut app: ChatApp,
    conversation: Arc<ConversationUseCase>,
    lookup: Arc<LookupSuggestionsUseCase>,
) -> anyhow::Result<()> {
    let mut events = EventStream::new();
    let (lookup_tx, mut lookup_rx) = mpsc::unbounded_channel::<SequencedSuggestions>();
    let (turn_tx, mut turn_rx) = mpsc::unbounded_channel::<SessionState>();

    while app.is_running() {
        terminal.draw(|frame| view::draw(frame, &mut app))?;

        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    match app.handle_key(key) {
                        Some(UiCommand::Lookup { seq, query }) => {
                            let lookup = Arc::clone(&lookup);
                            let tx = lookup_tx.clone();
                            tokio::spawn(async move {
                                let hits = lookup.execute(&query).await;
                                let _ = tx.send(SequencedSuggestions { seq, hits });
                            });
                        }
                        Some(UiCommand::Submit { state, action }) => {
                            let conversation = Arc::clone(&conversation);
                            let tx = turn_tx.clone();
                            tokio::spawn(async move {
                                let state = run_turn(conversation, *state, action).await;
                                let _ = tx.send(state);
                            });
                        }
                        Some(UiCommand::Quit) | None => {}
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
            Some(response) = lookup_rx.recv() => {
                if !app.apply_suggestions(response) {
                    debug!("Dropped stale suggestion response");
                }
            }
            Some(state) = turn_rx.recv() => app.finish_turn(state),
        }
    }

    info!("Chat session ended");
    Ok(())
}

/// Run one conversation turn and hand the session back. If the turn panics
/// the session comes back as it was before the turn, so the UI never stays
/// stuck waiting for a reply.
pub async fn run_turn(
    conversation: Arc<ConversationUseCase>,
    state: SessionState,
    action: UserAction,
) -> SessionState {
    let before = state.clone();
    let turn = tokio::spawn(async move {
        let mut state = state;
        conversation.submit(&mut state, action).await;
        state
    });

    match turn.await {
        Ok(state) => state,
        Err(e) => {
            error!("Conversation turn failed: {e}");
            before
        }
    }
}
