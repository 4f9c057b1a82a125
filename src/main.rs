//! Terminal Quadra runner.
//!
//! Reads settings from the environment, then runs a poll / update / render
//! loop at roughly 60 FPS. Falling speed depends on real elapsed time, not on
//! the frame rate.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use quadra::term::{FrameBuffer, GameView, MenuView, TerminalRenderer, Viewport};
use quadra::types::TICK_MS;
use quadra::{App, Control, DispatchConfig, EventDispatcher, GameConfig, HighScoreFile};

fn main() -> Result<()> {
    let config = GameConfig::from_env();
    let mut dispatcher = EventDispatcher::start(DispatchConfig {
        event_log: config.event_log.clone(),
        bell: config.bell,
    })?;
    let mut app = App::new(HighScoreFile::new(&config.highscore_path), config.seed);

    let mut term = TerminalRenderer::new();
    let result = term.enter().and_then(|_| run(&mut term, &mut app, &mut dispatcher));

    // Always try to restore terminal state.
    let _ = term.exit();
    app.shutdown();
    dispatcher.shutdown();
    result
}

fn run(term: &mut TerminalRenderer, app: &mut App, dispatcher: &mut EventDispatcher) -> Result<()> {
    let game_view = GameView::default();
    let menu_view = MenuView::new();
    let mut fb = FrameBuffer::new(0, 0);

    let frame = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();
    let mut last_screen = app.screen();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        if app.screen() != last_screen {
            term.invalidate();
            last_screen = app.screen();
        }
        app.render_into(&game_view, &menu_view, Viewport::new(w, h), &mut fb);
        if dispatcher.take_bell() {
            term.bell();
        }
        term.draw_swap(&mut fb)?;

        // Input with timeout until next frame.
        let timeout = frame.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if app.handle_key(key) == Control::Quit {
                        app.drain_events(dispatcher);
                        return Ok(());
                    }
                }
                Event::FocusLost => app.focus_lost(),
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Update with the real time since the previous update.
        let elapsed = last_tick.elapsed();
        if elapsed >= frame {
            last_tick = Instant::now();
            app.tick(elapsed.as_millis().min(u32::MAX as u128) as u32);
        }

        if let Some(session) = app.session() {
            dispatcher.observe(session.score(), session.level());
        }
        app.drain_events(dispatcher);
    }
}
