use anyhow::{Context, Result};
use chess_sync::core::{init_logging, load_settings, with_startup_logging, GameSettings};
use chess_sync::game::ai::SearchEngine;
use chess_sync::game::components::MoveRequest;
use chess_sync::ui::{describe_event, render_session, Command, CommandError, HELP};
use chess_sync::GameSession;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use stockfish_ai::UciEngine;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

/// Play chess in the terminal, optionally against a UCI engine
#[derive(Parser, Debug)]
#[command(name = "chess_sync", version, about)]
struct Args {
    /// Settings file (defaults to settings.json in the config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// UCI engine program
    #[arg(long)]
    engine: Option<String>,

    /// Computer strength, 1-20
    #[arg(long, allow_negative_numbers = true)]
    difficulty: Option<i64>,

    /// Play black with the computer
    #[arg(long)]
    computer: bool,

    /// Starting position
    #[arg(long)]
    fen: Option<String>,

    /// Pause before the computer starts thinking
    #[arg(long)]
    think_delay_ms: Option<u64>,
}

impl Args {
    fn apply(&self, settings: &mut GameSettings) {
        if let Some(engine) = &self.engine {
            settings.engine.path = engine.clone();
        }
        if let Some(level) = self.difficulty {
            settings.difficulty = level.clamp(1, 20) as u8;
        }
        if self.computer {
            settings.computer_enabled = true;
        }
        if let Some(fen) = &self.fen {
            settings.start_fen = Some(fen.clone());
        }
        if let Some(delay) = self.think_delay_ms {
            settings.think_delay_ms = delay;
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = with_startup_logging(|| load_settings(args.config.as_deref()));
    args.apply(&mut settings);
    init_logging(&settings.log_filter).context("installing logger")?;

    let engine = connect_engine(&settings).await;
    let search = engine
        .clone()
        .map(|engine| engine as Arc<dyn SearchEngine>);

    let (mut session, mut replies) = GameSession::new(
        settings.start_fen.as_deref(),
        settings.computer_config(),
        search,
    )
    .context("starting game")?;
    info!("[GAME] Session started");

    redraw(&mut session, &settings);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt();
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("reading stdin")? else {
                    break;
                };
                match line.parse::<Command>() {
                    Ok(Command::Quit) => break,
                    Ok(command) => handle_command(&mut session, command, &settings),
                    Err(CommandError::Empty) => {}
                    Err(err) => println!("{err}"),
                }
            }
            Some(reply) = replies.recv() => {
                println!();
                session.apply_engine_reply(reply);
                redraw(&mut session, &settings);
            }
        }
    }

    if let Some(engine) = engine {
        if let Err(err) = engine.shutdown().await {
            warn!("[UCI] Engine did not shut down cleanly: {}", err);
        }
    }
    Ok(())
}

/// Start the engine; the game runs without a computer opponent if it fails
async fn connect_engine(settings: &GameSettings) -> Option<Arc<UciEngine>> {
    match UciEngine::spawn(&settings.engine.path, settings.engine.uci_options()).await {
        Ok(engine) => Some(Arc::new(engine)),
        Err(err) => {
            warn!(
                "[UCI] Could not start engine {:?}: {}. Playing without a computer opponent.",
                settings.engine.path, err
            );
            None
        }
    }
}

fn handle_command(session: &mut GameSession, command: Command, settings: &GameSettings) {
    match command {
        Command::Move {
            from,
            to,
            promotion,
        } => {
            let mut request = MoveRequest::new(from, to);
            if let Some(piece) = promotion {
                request = request.with_promotion(piece);
            }
            if let Err(err) = session.try_move(request) {
                println!("{err}");
            }
        }
        Command::Select(square) => {
            session.select_square(square);
        }
        Command::Undo => {
            if session.request_undo() == 0 {
                println!("Nothing to undo");
            }
        }
        Command::Reset => {
            if let Err(err) = session.request_reset() {
                println!("{err}");
            }
        }
        Command::NewGame(fen) => {
            if let Err(err) = session.new_game_from_fen(fen.as_deref()) {
                println!("{err}");
            }
        }
        Command::ToggleComputer => match session.toggle_computer() {
            Ok(true) => println!("Computer opponent on (plays black)"),
            Ok(false) => println!("Computer opponent off"),
            Err(err) => println!("{err}"),
        },
        Command::Difficulty(level) => {
            let difficulty = session.set_difficulty(level);
            let config = session.computer().config();
            if config.pending_difficulty().is_some() {
                println!("Difficulty {difficulty} applies from the next game");
            } else {
                println!("Difficulty {difficulty}");
            }
        }
        Command::View(index) => {
            if let Err(err) = session.view_history_index(index) {
                println!("{err}");
            }
        }
        Command::Start => session.reset_to_start(),
        Command::Live => session.reset_to_live(),
        Command::Export(format) => {
            println!("{}", session.export_as_text(format));
            return;
        }
        Command::Retry => {
            if !session.retry_computer() {
                println!("The computer is not waiting to move");
            }
        }
        Command::Board => {}
        Command::Help => {
            println!("{HELP}");
            return;
        }
        Command::Quit => return,
    }
    redraw(session, settings);
}

fn redraw(session: &mut GameSession, settings: &GameSettings) {
    for event in session.drain_events() {
        if let Some(message) = describe_event(&event) {
            println!("{message}");
        }
    }
    println!("{}", render_session(session, settings.highlight_last_move));
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}
