use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use engine_logging::{engine_info, LogDestination, DEFAULT_LOG_FILE};
use landed_core::{update, AppState, AppViewModel, Msg};
use log::LevelFilter;

use super::effects::EffectRunner;
use super::settings::{load_settings, SETTINGS_FILENAME};
use super::ui::commands::{self, Command, HELP};
use super::ui::render;

/// Everything the main loop reacts to, in arrival order.
pub(crate) enum LoopEvent {
    Msg(Msg),
    Input(String),
    InputClosed,
}

pub fn run_app() -> anyhow::Result<()> {
    engine_logging::initialize(
        LogDestination::File(PathBuf::from(DEFAULT_LOG_FILE)),
        LevelFilter::Info,
    );

    let settings = load_settings(Path::new(SETTINGS_FILENAME));
    let (event_tx, event_rx) = mpsc::channel::<LoopEvent>();
    let runner = EffectRunner::new(&settings, std::env::var("API_KEY").ok(), event_tx.clone())
        .context("failed to start the search engine")?;

    spawn_input_reader(event_tx);
    println!("{HELP}");

    let mut shell = Shell::new(runner);
    shell.dispatch(Msg::TopJobsRequested);

    for event in event_rx {
        match event {
            LoopEvent::Msg(msg) => shell.dispatch(msg),
            LoopEvent::Input(line) => match commands::parse(&line) {
                Ok(Command::Quit) => break,
                Ok(Command::Help) => println!("{HELP}"),
                Ok(command) => match command_to_msg(command, &shell.view) {
                    Ok(msg) => shell.dispatch(msg),
                    Err(problem) => println!("{problem}"),
                },
                Err(problem) => println!("{problem}"),
            },
            LoopEvent::InputClosed => break,
        }
    }

    engine_info!("Shutting down");
    Ok(())
}

struct Shell {
    state: AppState,
    view: AppViewModel,
    runner: EffectRunner,
}

impl Shell {
    fn new(runner: EffectRunner) -> Self {
        let state = AppState::new();
        let view = state.view();
        Self {
            state,
            view,
            runner,
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let (mut state, effects) = update(std::mem::take(&mut self.state), msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        self.runner.run(effects);

        if was_dirty {
            self.view = self.state.view();
            let mut stdout = io::stdout().lock();
            let _ = writeln!(stdout, "\n{}", render::render(&self.view));
            let _ = stdout.flush();
        }
    }
}

fn spawn_input_reader(events: mpsc::Sender<LoopEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if events.send(LoopEvent::Input(line)).is_err() {
                return;
            }
        }
        let _ = events.send(LoopEvent::InputClosed);
    });
}

/// Maps a parsed command onto a core message. List positions refer to the
/// last rendered view.
fn command_to_msg(command: Command, view: &AppViewModel) -> Result<Msg, String> {
    Ok(match command {
        Command::Search { keyword, location } => Msg::SearchSubmitted { keyword, location },
        Command::TopJobs => Msg::TopJobsRequested,
        Command::More => Msg::LoadMoreClicked,
        Command::Open(position) => {
            let card = position
                .checked_sub(1)
                .and_then(|index| view.listings.get(index))
                .ok_or_else(|| format!("No listing number {position} on screen"))?;
            Msg::ListingOpened(card.key.clone())
        }
        Command::Close => Msg::ListingClosed,
        Command::Category(label) => Msg::CategorySelected(label),
        Command::MinSalary(amount) => Msg::MinSalaryChanged(amount),
        Command::ClearFilters => Msg::FiltersCleared,
        Command::Export => Msg::ExportClicked,
        Command::Help | Command::Quit => Msg::NoOp,
    })
}
