use std::io::{self, Write};
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use chrono::{DateTime, Local};
use engine_logging::{engine_debug, engine_info, engine_warn};
use intellidebug_core::{update, AppState, Msg};

use super::effects::EffectRunner;
use super::input::{command_to_msg, parse_line, Command, LossyLines};
use super::settings::{self, SETTINGS_FILENAME};
use super::{logging, ui};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

enum InputEvent {
    Line(String),
    Closed,
}

pub fn run_app() -> anyhow::Result<()> {
    let (settings, settings_error) = settings::load_or_default(Path::new(SETTINGS_FILENAME));
    logging::initialize(settings.log_destination, settings.level_filter());
    if let Some(err) = settings_error {
        engine_warn!("Using default settings: {}", err);
    }

    let runner =
        EffectRunner::new(settings.client_settings()).context("starting analysis engine")?;
    let mut session = Session::new(AppState::with_debounce(settings.debounce()));
    let mut out = io::stdout().lock();

    print_lines(&mut out, &ui::render::banner())?;
    runner.enqueue(session.state.startup_effects());
    print_lines(&mut out, &ui::render::render(&session.state.view(), None))?;

    let (input_tx, input_rx) = mpsc::channel();
    spawn_stdin_reader(input_tx);

    let mut closing = false;
    loop {
        if !closing {
            match input_rx.recv_timeout(POLL_INTERVAL) {
                Ok(InputEvent::Line(line)) => match parse_line(&line) {
                    Command::Quit => break,
                    Command::Help => print_lines(&mut out, &ui::render::banner())?,
                    Command::Unknown(name) => {
                        writeln!(out, "Unknown command ':{name}' (try :help)")?;
                    }
                    command => {
                        if command == Command::Submit && session.state.is_loading() {
                            writeln!(out, "{}", ui::constants::SUBMIT_DISABLED)?;
                        }
                        if let Some(msg) = command_to_msg(command, session.state.draft()) {
                            session.dispatch(msg, &runner, &mut out)?;
                        }
                    }
                },
                Ok(InputEvent::Closed) | Err(mpsc::RecvTimeoutError::Disconnected) => {
                    engine_info!("Input closed; waiting for pending work");
                    closing = true;
                }
                Err(mpsc::RecvTimeoutError::Timeout) => {}
            }
        } else {
            thread::sleep(POLL_INTERVAL);
        }

        for msg in runner.poll() {
            session.dispatch(msg, &runner, &mut out)?;
        }

        if closing && session.state.is_settled() {
            break;
        }
    }

    engine_info!("Exiting");
    Ok(())
}

/// The dispatch loop's view of the world: core state plus display-only extras.
struct Session {
    state: AppState,
    result_at: Option<DateTime<Local>>,
}

impl Session {
    fn new(state: AppState) -> Self {
        Self {
            state,
            result_at: None,
        }
    }

    fn dispatch(
        &mut self,
        msg: Msg,
        runner: &EffectRunner,
        out: &mut impl Write,
    ) -> io::Result<()> {
        if let Some(generation) = stale_expiry(&self.state, &msg) {
            engine_debug!(
                "Ignoring stale debounce generation={} current={}",
                generation,
                self.state.generation()
            );
        }
        if matches!(
            msg,
            Msg::AnalysisCompleted { .. } | Msg::ProjectAnalysisCompleted { .. }
        ) {
            self.result_at = Some(Local::now());
        }

        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        let view = state.view();
        self.state = state;

        runner.enqueue(effects);
        if was_dirty {
            print_lines(out, &ui::render::render(&view, self.result_at))?;
        }
        Ok(())
    }
}

fn spawn_stdin_reader(tx: mpsc::Sender<InputEvent>) {
    thread::spawn(move || {
        for line in LossyLines::new(io::stdin().lock()) {
            match line {
                Ok(line) => {
                    if tx.send(InputEvent::Line(line)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    engine_warn!("Failed to read input: {}", err);
                    break;
                }
            }
        }
        let _ = tx.send(InputEvent::Closed);
    });
}

fn print_lines(out: &mut impl Write, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()
}

/// The generation of a debounce expiry that a later edit already superseded.
fn stale_expiry(state: &AppState, msg: &Msg) -> Option<u64> {
    match msg {
        Msg::DebounceElapsed { generation } if *generation != state.generation() => {
            Some(*generation)
        }
        _ => None,
    }
}
