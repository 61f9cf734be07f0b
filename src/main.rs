use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use cutejump::core::config::{load_config, GameConfig, Variant};
use cutejump::core::constants::{CONFIG_FILE, FRAME_TICK_US, LOG_ENV_VAR, LOG_FILE};
use cutejump::input::{map_key, JumpInput, KeyboardTilt};
use cutejump::jump::{GameEvent, JsonScoreStore, JumpGame, MemoryScoreStore, ScoreStore, Session};
use cutejump::physics::ArcadePhysics;
use cutejump::ui::draw_ui;
use cutejump::ui::jump_scene::HudState;
use cutejump::utils::build_info;
use cutejump::utils::persistence::save_path;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io::{self, Stdout};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Default, PartialEq)]
struct Options {
    variant: Option<Variant>,
    seed: Option<u64>,
}

#[derive(Debug, PartialEq)]
enum Command {
    Play(Options),
    Version,
    Help,
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut options = Options::default();
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--version" | "-v" => return Ok(Command::Version),
            "--help" | "-h" => return Ok(Command::Help),
            "--variant" => {
                let name = iter.next().ok_or("--variant needs a name")?;
                let variant = Variant::from_name(name)
                    .ok_or_else(|| format!("Unknown variant: {}", name))?;
                options.variant = Some(variant);
            }
            "--seed" => {
                let value = iter.next().ok_or("--seed needs a number")?;
                let seed = value
                    .parse()
                    .map_err(|_| format!("Invalid seed: {}", value))?;
                options.seed = Some(seed);
            }
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }
    Ok(Command::Play(options))
}

fn print_help() {
    println!("Cute Jump - endless jumper for the terminal\n");
    println!("Usage: cutejump [options]\n");
    println!("Options:");
    println!("  --variant <name>  Play a preset: classic, meadow, compact");
    println!("  --seed <n>        Seed platform generation");
    println!("  --version         Show version information");
    println!("  --help            Show this help message");
    println!("\nSettings are read from ~/.cutejump/{}", CONFIG_FILE);
    println!("Set {} to control logging (e.g. {}=debug)", LOG_ENV_VAR, LOG_ENV_VAR);
}

/// Log to ~/.cutejump/cutejump.log. The terminal belongs to the game, so
/// when the file cannot be opened we log nowhere.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let file = save_path(LOG_FILE).and_then(|path| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map(|file| (path, file))
    });

    match file {
        Ok((path, file)) => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .with(env_filter)
                .init();
            tracing::info!(path = %path.display(), "Logging initialized");
        }
        Err(_) => {
            tracing_subscriber::registry().with(env_filter).init();
        }
    }
}

fn resolve_config(variant: Option<Variant>) -> GameConfig {
    if let Some(variant) = variant {
        return GameConfig::preset(variant);
    }
    match save_path(CONFIG_FILE) {
        Ok(path) => load_config(&path),
        Err(e) => {
            tracing::warn!(error = %e, "No config directory, using defaults");
            GameConfig::default()
        }
    }
}

fn open_store() -> Box<dyn ScoreStore> {
    match JsonScoreStore::new().and_then(|store| store.load().map(|_| store)) {
        Ok(store) => {
            tracing::info!(path = %store.path().display(), "Using score file");
            Box::new(store)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Scores will not be saved this session");
            Box::new(MemoryScoreStore::default())
        }
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::Haptic | GameEvent::Sound(_) => tracing::trace!(?event, "Feedback"),
        GameEvent::GameOver { run_best } => tracing::info!(run_best, "Run finished"),
        _ => tracing::debug!(?event, "Scene event"),
    }
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let options = match parse_args(&args) {
        Ok(Command::Play(options)) => options,
        Ok(Command::Version) => {
            println!("{}", build_info::version_line());
            std::process::exit(0);
        }
        Ok(Command::Help) => {
            print_help();
            std::process::exit(0);
        }
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Run 'cutejump --help' for usage.");
            std::process::exit(2);
        }
    };

    init_tracing();

    let config = resolve_config(options.variant);
    tracing::info!(variant = config.variant.name(), seed = ?options.seed, "Starting");

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let game = JumpGame::with_arcade_physics(config, &mut rng);
    let mut session = Session::new(game, open_store())?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run(&mut terminal, &mut session, &mut rng);

    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "Exited with error");
    }
    println!(
        "Thanks for playing! High score: {}",
        cutejump::jump::format_score(session.display_high_score())
    );
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    session: &mut Session<Box<dyn ScoreStore>, ArcadePhysics>,
    rng: &mut StdRng,
) -> io::Result<()> {
    let mut tilt = KeyboardTilt::new();
    let mut hud = HudState::new();
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| draw_ui(frame, &session.game, &session.record, &hud))?;

        if event::poll(Duration::from_micros(FRAME_TICK_US))? {
            if let Event::Key(key) = event::read()? {
                match map_key(key) {
                    JumpInput::Tilt(sample) => tilt.press(sample),
                    JumpInput::Level => tilt.level(),
                    JumpInput::Touch => {
                        session.game.start();
                    }
                    JumpInput::Quit => return Ok(()),
                    JumpInput::Other => {}
                }
            }
        }

        let elapsed_ms = last_tick.elapsed().as_millis() as u64;
        last_tick += Duration::from_millis(elapsed_ms);
        let frames = session.game.tick(elapsed_ms, &mut tilt, rng);
        hud.advance(frames);

        let events = session.process_events();
        for event in &events {
            log_event(event);
        }
        hud.observe(&events, &session.record);
    }
}
