use crate::api::Api;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::events::network::{Event as NetworkEvent, Handler as NetworkEventHandler};
use crate::events::terminal::Handler as TerminalEventHandler;
use crate::logger::CustomLogger;
use crate::state::{FormRoute, Route, State};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::*;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout, Stdout};
use std::sync::{mpsc, Arc};
use tokio::sync::Mutex;

pub type NetworkEventSender = mpsc::Sender<NetworkEvent>;
type NetworkEventReceiver = mpsc::Receiver<NetworkEvent>;
type LogReceiver = mpsc::Receiver<String>;

/// Oversees event processing, state management, and terminal output.
///
pub struct App {
    state: Arc<Mutex<State>>,
}

impl App {
    /// Start the form on route according to the given configuration.
    /// Returns the route the form navigated to, or `None` if the user quit.
    ///
    pub async fn start(config: Config, route: FormRoute) -> AppResult<Option<Route>> {
        let logger = CustomLogger::new(config.level_filter()?)
            .install()
            .map_err(|e| AppError::Logger(e.to_string()))?;
        let (log_tx, log_rx) = mpsc::channel::<String>();
        let log_tx = std::sync::Mutex::new(log_tx);
        logger.set_log_callback(Box::new(move |line| {
            if let Ok(tx) = log_tx.lock() {
                let _ = tx.send(line);
            }
        }));

        info!("Starting application...");
        let api = Api::new(&config.base_url, config.access_token.as_deref())?;
        let (tx, rx) = mpsc::channel::<NetworkEvent>();
        let app = App {
            state: Arc::new(Mutex::new(State::new(tx))),
        };
        app.start_network(api, rx)?;
        let destination = app.start_ui(route, log_rx).await?;

        info!("Exiting application...");
        Ok(destination)
    }

    /// Start a separate thread for asynchronous requests. Events are handled
    /// one at a time in the order they were queued.
    ///
    fn start_network(&self, api: Api, net_receiver: NetworkEventReceiver) -> AppResult<()> {
        debug!("Creating new thread for asynchronous networking...");
        let cloned_state = Arc::clone(&self.state);
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        std::thread::spawn(move || {
            runtime.block_on(async {
                let mut network_event_handler = NetworkEventHandler::new(&cloned_state, &api);
                while let Ok(network_event) = net_receiver.recv() {
                    network_event_handler.handle(network_event).await;
                }
            })
        });
        Ok(())
    }

    /// Run the render loop on the main thread until the form navigates away
    /// or an exit is requested, restoring the terminal either way.
    ///
    async fn start_ui(&self, route: FormRoute, log_rx: LogReceiver) -> AppResult<Option<Route>> {
        debug!("Starting user interface on main thread...");
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        enable_raw_mode()?;

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;

        self.state.lock().await.mount(route);
        let result = self.run(&mut terminal, &log_rx).await;

        disable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    async fn run(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        log_rx: &LogReceiver,
    ) -> AppResult<Option<Route>> {
        let terminal_event_handler = TerminalEventHandler::new();
        loop {
            let mut state = self.state.lock().await;
            while let Ok(entry) = log_rx.try_recv() {
                state.add_log_entry(entry);
            }
            if let Some(route) = state.navigated() {
                return Ok(Some(route.clone()));
            }
            terminal
                .draw(|frame| crate::ui::render(frame, &mut state))
                .map_err(|e| AppError::Terminal(e.to_string()))?;
            if !terminal_event_handler.handle_next(&mut state)? {
                debug!("Received application exit request.");
                return Ok(None);
            }
        }
    }
}
