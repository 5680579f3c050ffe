//! Terminal runner (default binary).
//!
//! Wires a [`Session`] to crossterm input, the framebuffer renderer, the
//! terminal bell and an [`IntervalTimer`] that turns elapsed time into ticks.
//!
//! Environment:
//! - `BLOCKFALL_SEED`: piece sequence seed (defaults to the clock)
//! - `BLOCKFALL_LOG`: write logs to this file (off when unset)

use std::fs::File;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::core::{GameConfig, GameSnapshot, IntervalTimer, PieceQueue, Session};
use blockfall::input::{handle_key_event, should_quit};
use blockfall::term::{BellSink, FrameBuffer, GameView, TerminalRenderer, Viewport};

/// Input poll timeout while no tick is scheduled (idle, paused, game over).
const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    init_logging()?;
    let seed = seed_from_env()?;
    log::info!("seed {seed}");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, seed);

    // Always try to restore terminal state.
    let _ = term.exit();

    let (score, finished) = result?;
    if finished.is_empty() {
        println!("Score: {score}");
    } else {
        for (i, final_score) in finished.iter().enumerate() {
            println!("Game {}: {final_score}", i + 1);
        }
    }
    Ok(())
}

fn init_logging() -> Result<()> {
    let Ok(path) = std::env::var("BLOCKFALL_LOG") else {
        return Ok(());
    };
    let file = File::create(&path).with_context(|| format!("creating log file {path}"))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()?;
    Ok(())
}

fn seed_from_env() -> Result<u32> {
    match std::env::var("BLOCKFALL_SEED") {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("BLOCKFALL_SEED must be an unsigned integer, got {raw:?}")),
        Err(_) => Ok(SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
            .unwrap_or(1)),
    }
}

/// Play until a quit key. Returns the current score and every finished game's
/// final score.
fn run(term: &mut TerminalRenderer, seed: u32) -> Result<(u32, Vec<u32>)> {
    let mut game = Session::with_collaborators(
        GameConfig::default(),
        PieceQueue::new(seed),
        BellSink::stdout(),
        Vec::<u32>::new(),
    )?;
    let mut timer = IntervalTimer::new();
    game.start().apply_to(&mut timer);

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut last = Instant::now();

    loop {
        game.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let timeout = timer.remaining().unwrap_or(IDLE_POLL);
        let ready = event::poll(timeout)?;

        // Ticks first, so a command from the input below starts a clean period.
        let now = Instant::now();
        if timer.poll(now - last) {
            if let Some(command) = game.tick() {
                command.apply_to(&mut timer);
            }
        }
        last = now;

        if !ready {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    break;
                }
                if let Some(command) = handle_key_event(key).and_then(|a| game.handle_input(a)) {
                    command.apply_to(&mut timer);
                }
            }
            Event::Resize(..) => term.invalidate(),
            _ => {}
        }
    }

    Ok((game.score(), game.notifier().clone()))
}
