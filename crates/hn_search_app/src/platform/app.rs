use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use clap::Parser;
use engine_logging::{engine_debug, engine_info, engine_warn, LogDestination};
use hn_search_core::{update, AppState, AppViewModel, Msg};
use log::LevelFilter;

use super::cli::Cli;
use super::config::{load_config, SearchConfig};
use super::effects::EffectRunner;
use super::ui::input::{parse_command, Command, HELP_TEXT};
use super::ui::render;

/// Everything the main loop reacts to, in arrival order.
#[derive(Debug)]
pub enum LoopEvent {
    Msg(Msg),
    Line(String),
    InputClosed,
}

pub fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_deref())?;
    cli.apply(&mut config);
    config.validate()?;
    init_logging(&config, cli.verbose);
    engine_info!(
        "Starting with base_url={} hits_per_page={}",
        config.base_url,
        config.hits_per_page
    );

    let (loop_tx, loop_rx) = mpsc::channel::<LoopEvent>();
    let runner = EffectRunner::new(config.fetch_settings(), loop_tx.clone())
        .context("failed to start search engine")?;
    spawn_stdin_reader(loop_tx)?;

    let mut handler = AppEventHandler::new(AppState::with_search_text(&config.default_query), runner);
    println!("{HELP_TEXT}\n");
    handler.dispatch_msg(Msg::Mounted);

    while let Ok(event) = loop_rx.recv() {
        match event {
            LoopEvent::Msg(msg) => handler.dispatch_msg(msg),
            LoopEvent::Line(line) => match parse_command(&line) {
                Command::Dispatch(msgs) => {
                    for msg in msgs {
                        handler.dispatch_msg(msg);
                    }
                }
                Command::Help => println!("{HELP_TEXT}"),
                Command::Quit => break,
                Command::Invalid(reason) => println!("{reason}"),
            },
            LoopEvent::InputClosed => break,
        }
    }

    engine_info!("Shutting down");
    Ok(())
}

fn init_logging(config: &SearchConfig, verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    match (&config.log_file, verbose) {
        (Some(path), true) => engine_logging::initialize(LogDestination::Both(path.clone()), level),
        (Some(path), false) => engine_logging::initialize(LogDestination::File(path.clone()), level),
        (None, true) => engine_logging::initialize(LogDestination::Terminal, level),
        (None, false) => {}
    }
}

fn spawn_stdin_reader(loop_tx: mpsc::Sender<LoopEvent>) -> anyhow::Result<()> {
    thread::Builder::new()
        .name("stdin".to_string())
        .spawn(move || forward_lines(io::stdin().lock(), &loop_tx))
        .context("failed to spawn stdin reader")?;
    Ok(())
}

/// Sends each input line to the main loop until end of input. Bytes that are
/// not valid UTF-8 are replaced rather than ending the session.
fn forward_lines(mut reader: impl BufRead, loop_tx: &mpsc::Sender<LoopEvent>) {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf)
                    .trim_end_matches(['\n', '\r'])
                    .to_string();
                if loop_tx.send(LoopEvent::Line(line)).is_err() {
                    return;
                }
            }
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => {
                engine_warn!("Stopped reading input: {}", err);
                break;
            }
        }
    }
    let _ = loop_tx.send(LoopEvent::InputClosed);
}

struct AppEventHandler {
    state: AppState,
    runner: EffectRunner,
}

impl AppEventHandler {
    fn new(state: AppState, runner: EffectRunner) -> Self {
        Self { state, runner }
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        engine_debug!("dispatch {:?}", msg);
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let view = state.view();
        let was_dirty = state.consume_dirty();
        self.state = state;

        self.runner.enqueue(effects);
        if was_dirty {
            self.render(&view);
        }
    }

    fn render(&self, view: &AppViewModel) {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        for line in render::render(view) {
            let _ = writeln!(out, "{line}");
        }
        let _ = write!(out, "> ");
        let _ = out.flush();
    }
}
