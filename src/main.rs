//! # Delve Main Entry Point
//!
//! Parses the command line, sets up logging, and either prints a generated
//! map or opens the macroquad window and runs the game loop.

use clap::Parser;
use delve::generation::utils::create_rng;
use delve::{
    ascii_dump, DelveResult, Engine, GameConfig, InputHandler, MacroquadDisplay, TurnOutcome,
    ERROR_TEXT,
};
use log::{error, info, warn};
use macroquad::prelude::next_frame;
use macroquad::window::Conf;
use std::path::PathBuf;

/// Command line arguments for Delve.
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(about = "A small turn-based dungeon crawl")]
#[command(version)]
struct Args {
    /// Random seed for dungeon generation (overrides the config file)
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Print the generated map as text and exit without opening a window
    #[arg(long)]
    dump_map: bool,
}

fn main() {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    info!("Starting Delve v{}", delve::VERSION);

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    if args.dump_map {
        match dump_map(&config) {
            Ok(text) => print!("{}", text),
            Err(e) => {
                error!("Failed to generate map: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let display = MacroquadDisplay::new(config.message_log_lines);
    let (width, height) =
        display.window_size(config.generation.map_width, config.generation.map_height);
    let window = Conf {
        window_title: "Delve".to_string(),
        window_width: width as i32,
        window_height: height as i32,
        ..Default::default()
    };
    macroquad::Window::from_config(window, run_game(config, display));
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) {
    #[cfg(feature = "dev-tools")]
    {
        use tracing::Level;

        let level = match log_level.to_lowercase().as_str() {
            "error" => Level::ERROR,
            "warn" => Level::WARN,
            "info" => Level::INFO,
            "debug" => Level::DEBUG,
            "trace" => Level::TRACE,
            _ => Level::INFO,
        };

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .init();
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        env_logger::Builder::new().parse_filters(log_level).init();
    }
}

fn load_config(args: &Args) -> DelveResult<GameConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            GameConfig::load(path)?
        }
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.generation.seed = seed;
    }
    config.validate()?;
    Ok(config)
}

fn dump_map(config: &GameConfig) -> DelveResult<String> {
    let mut rng = create_rng(&config.generation);
    let engine = Engine::new_game(config, &mut rng)?;
    Ok(ascii_dump(&engine.map))
}

/// Main game loop: one input poll, at most one engine action, one frame.
async fn run_game(config: GameConfig, display: MacroquadDisplay) {
    info!("Generating dungeon with seed {}", config.generation.seed);
    let mut rng = create_rng(&config.generation);
    let mut engine = match Engine::new_game(&config, &mut rng) {
        Ok(engine) => engine,
        Err(e) => {
            error!("Failed to start game: {}", e);
            return;
        }
    };
    let input_handler = InputHandler::new();

    loop {
        if let Some(input) = input_handler.get_input() {
            let action = input_handler.input_to_action(input);
            match engine.handle_action(action) {
                Ok(TurnOutcome::Quit) => break,
                Ok(_) => {}
                Err(e) => {
                    warn!("Action failed: {}", e);
                    engine.log.add(format!("Error: {}", e), ERROR_TEXT, true);
                }
            }
        }

        display.render(&engine);
        next_frame().await;
    }

    let stats = &engine.statistics;
    info!(
        "Session ended after {} turns: {} steps, {} enemies defeated, {} damage dealt, {} taken",
        engine.turn_number(),
        stats.steps_taken,
        stats.enemies_defeated,
        stats.damage_dealt,
        stats.damage_taken
    );
}
