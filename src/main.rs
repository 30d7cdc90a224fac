//! Terminal host for the taxi game.

use std::error::Error;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use shadow_taxi::compute::{step, GameState};
use shadow_taxi::config::Settings;
use shadow_taxi::display;
use shadow_taxi::input::{Controls, Key};
use shadow_taxi::level::Level;
use shadow_taxi::scores::ScoreFile;
use shadow_taxi::terminal::{KeyState, TerminalCanvas};

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

/// Shadow Taxi - pick up passengers, dodge traffic, hit the target fare
#[derive(Parser, Debug)]
#[command(name = "shadow_taxi")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Level object rows (TAXI, DRIVER, PASSENGER, COIN, INVINCIBLE_POWER)
    #[arg(short, long, default_value = "res/level.csv")]
    level: PathBuf,

    /// Weather schedule rows (SUNNY|RAINING,start,end)
    #[arg(short, long)]
    weather: Option<PathBuf>,

    /// JSON settings file (default: built-in settings)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Score file, appended after every game
    #[arg(long, default_value = "scores.csv")]
    scores: PathBuf,

    /// Random seed (default: random)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Log file; the terminal itself is taken by the game
    #[arg(long, default_value = "shadow_taxi.log")]
    log: PathBuf,

    /// Log filter, e.g. `info` or `shadow_taxi=debug`
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_logging(args: &Args) -> Result<(), Box<dyn Error>> {
    let file = File::create(&args.log)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&args.log_level)?)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logging(&args)?;

    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let level = Arc::new(Level::load(&args.level, args.weather.as_deref())?);
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, "starting");

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread to blocking event reads so the frame loop never
    // blocks on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let mut scores = ScoreFile::new(&args.scores);
    let mut rng = StdRng::seed_from_u64(seed);
    let state = GameState::new(level, &settings);
    let result = run(&mut out, &rx, state, &settings, &mut rng, &mut scores);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.map_err(Into::into)
}

/// Frame loop: drain input, step, draw, sleep. Returns on Escape or Ctrl-C.
fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    mut state: GameState,
    settings: &Settings,
    rng: &mut StdRng,
    scores: &mut ScoreFile,
) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let world = (settings.window.width, settings.window.height);
    let mut canvas = TerminalCanvas::new(out, cols, rows, world);
    let mut keys = KeyState::new();

    loop {
        let frame_start = Instant::now();
        keys.begin_frame();

        // ── Drain all pending input events (non-blocking) ────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Resize(cols, rows) => canvas.resize(cols, rows),
                other => keys.handle(&other),
            }
        }
        if keys.interrupted() || keys.was_pressed(Key::Escape) {
            info!("quit");
            return Ok(());
        }

        state = step(&state, settings, &keys, rng, scores);

        canvas.begin()?;
        display::render(&mut canvas, &state, settings);
        canvas.present()?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}
