//! Terminal runner (default binary).
//!
//! Polls crossterm for keys with a one-frame timeout, feeds wall time to the
//! session's gravity timer and redraws through the framebuffer renderer.

use std::fs::File;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::info;

use blockfall::config::AppConfig;
use blockfall::core::{GameSnapshot, GameState, Session};
use blockfall::input::{handle_key_event, should_quit};
use blockfall::term::{FrameBuffer, GameView, Overlay, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    init_logging(&config)?;
    info!("starting with seed {} ({}ms frames)", config.seed, config.frame_ms);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// The game owns the screen, so logs only go to a file.
fn init_logging(config: &AppConfig) -> Result<()> {
    let Some(path) = config.log_path.as_deref() else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("cannot open log file {path}"))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("logger already initialized")?;
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: &AppConfig) -> Result<()> {
    let mut session = Session::new(GameState::new(config.seed));
    let view = GameView::default();
    let frame = Duration::from_millis(config.frame_ms);

    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut last_update = Instant::now();

    loop {
        session.snapshot_into(&mut snap);
        let overlay = Overlay::for_state(session.paused(), snap.game_over);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, overlay, Viewport::new(w, h), &mut fb);
        term.present(&mut fb)?;

        if event::poll(frame)? {
            match event::read()? {
                // Terminal auto-repeat arrives as fresh presses on most
                // terminals, which is all the key repeat the game needs.
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        info!("quit requested");
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        session.apply(action);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        let now = Instant::now();
        let elapsed = now.duration_since(last_update).as_millis();
        last_update = now;
        session.update(u32::try_from(elapsed).unwrap_or(u32::MAX));
    }
}
