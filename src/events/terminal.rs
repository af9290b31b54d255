use crate::error::{AppError, AppResult};
use crate::state::{FormField, State};
use crossterm::{
    event,
    event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use log::*;
use std::{sync::mpsc, thread, time::Duration};

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Tick,
}

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::Receiver<Event<KeyEvent>>,
    _tx: mpsc::Sender<Event<KeyEvent>>,
}

impl Handler {
    /// Return new instance after spawning new input polling thread.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();
        thread::spawn(move || loop {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            match event::poll(tick_rate) {
                Ok(true) => {
                    if let Ok(CrosstermEvent::Key(key)) = event::read() {
                        if tx_clone.send(Event::Input(key)).is_err() {
                            break;
                        }
                    }
                }
                Ok(false) => {}
                Err(e) => {
                    error!("Failed to poll terminal events: {}", e);
                    break;
                }
            }
            if tx_clone.send(Event::Tick).is_err() {
                break;
            }
        });
        Handler { rx, _tx: tx }
    }

    /// Receive next terminal event and handle it accordingly. Returns result
    /// with value true if should continue or false if exit was requested.
    ///
    pub fn handle_next(&self, state: &mut State) -> AppResult<bool> {
        let event = self
            .rx
            .recv()
            .map_err(|e| AppError::Terminal(e.to_string()))?;
        match event {
            Event::Input(key) if key.kind == KeyEventKind::Press => Ok(handle_key(key, state)),
            _ => Ok(true),
        }
    }
}

/// Apply a key press to state. Returns false if exit was requested.
///
fn handle_key(key: KeyEvent, state: &mut State) -> bool {
    match key {
        KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => {
            debug!("Processing exit terminal event '{:?}'...", key);
            return false;
        }
        KeyEvent {
            code: KeyCode::Char('s'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => {
            state.submit();
        }
        KeyEvent {
            code: KeyCode::Esc, ..
        } => {
            state.cancel();
        }
        KeyEvent {
            code: KeyCode::Tab | KeyCode::Down,
            ..
        } => {
            state.next_field();
        }
        KeyEvent {
            code: KeyCode::BackTab | KeyCode::Up,
            ..
        } => {
            state.previous_field();
        }
        KeyEvent {
            code: KeyCode::Right,
            ..
        } => {
            state.cycle_option(true);
        }
        KeyEvent {
            code: KeyCode::Left, ..
        } => {
            state.cycle_option(false);
        }
        KeyEvent {
            code: KeyCode::Enter,
            ..
        } if state.focus() == FormField::Description => {
            state.add_char('\n');
        }
        KeyEvent {
            code: KeyCode::Enter,
            ..
        } => {
            state.submit();
        }
        KeyEvent {
            code: KeyCode::Backspace,
            ..
        } => {
            state.remove_char();
        }
        KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::NONE | KeyModifiers::SHIFT,
            ..
        } => {
            state.add_char(c);
        }
        _ => {}
    }
    true
}
