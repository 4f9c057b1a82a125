//! Screen state machine around a [`Session`].
//!
//! `Menu → {Playing | Instructions | Credits | quit}`. While playing, the
//! game-over overlay offers "Try again" and "Back to menu". Leaving a game
//! for any reason records the score in the high-score file.

use crossterm::event::KeyEvent;

use crate::core::{EventSink, Session, SimpleRng};
use crate::highscore::HighScoreFile;
use crate::input::{handle_key_event, menu_input, should_quit, MenuInput};
use crate::term::{FrameBuffer, GameView, MenuView, Page, Viewport, GAME_OVER_OPTIONS, MENU_OPTIONS};
use crate::types::GameAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Instructions,
    Credits,
    Playing,
}

/// What the main loop should do after an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

pub struct App {
    screen: Screen,
    menu_choice: usize,
    game_over_choice: usize,
    session: Option<Session>,
    /// Score of the current session already offered to the file
    recorded: bool,
    highscores: HighScoreFile,
    high_score: u32,
    seeds: SimpleRng,
}

impl App {
    pub fn new(highscores: HighScoreFile, seed: u32) -> Self {
        let high_score = highscores.load();
        Self {
            screen: Screen::Menu,
            menu_choice: 0,
            game_over_choice: 0,
            session: None,
            recorded: false,
            highscores,
            high_score,
            seeds: SimpleRng::new(seed),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn menu_choice(&self) -> usize {
        self.menu_choice
    }

    pub fn game_over_choice(&self) -> usize {
        self.game_over_choice
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn high_score(&self) -> u32 {
        self.session
            .as_ref()
            .map_or(self.high_score, |s| s.high_score().max(self.high_score))
    }

    /// Route one key press to the current screen.
    pub fn handle_key(&mut self, key: KeyEvent) -> Control {
        match self.screen {
            Screen::Menu => self.menu_key(key),
            Screen::Instructions | Screen::Credits => {
                if should_quit(key) {
                    return Control::Quit;
                }
                if matches!(menu_input(key), Some(MenuInput::Select | MenuInput::Back)) {
                    self.screen = Screen::Menu;
                }
                Control::Continue
            }
            Screen::Playing => self.playing_key(key),
        }
    }

    fn menu_key(&mut self, key: KeyEvent) -> Control {
        if should_quit(key) {
            return Control::Quit;
        }
        let n = MENU_OPTIONS.len();
        match menu_input(key) {
            Some(MenuInput::Up) => self.menu_choice = (self.menu_choice + n - 1) % n,
            Some(MenuInput::Down) => self.menu_choice = (self.menu_choice + 1) % n,
            Some(MenuInput::Select) => match self.menu_choice {
                0 => self.start_game(),
                1 => self.screen = Screen::Instructions,
                2 => self.screen = Screen::Credits,
                _ => return Control::Quit,
            },
            Some(MenuInput::Back) | None => {}
        }
        Control::Continue
    }

    fn playing_key(&mut self, key: KeyEvent) -> Control {
        let over = self.session.as_ref().is_some_and(Session::game_over);
        if over {
            return self.game_over_key(key);
        }

        let Some(action) = handle_key_event(key) else {
            return Control::Continue;
        };
        match action {
            GameAction::Quit => {
                self.record();
                return Control::Quit;
            }
            GameAction::Restart => {
                self.record();
                self.recorded = false;
            }
            _ => {}
        }
        if let Some(session) = self.session.as_mut() {
            session.apply_action(action);
        }
        self.after_update();
        Control::Continue
    }

    fn game_over_key(&mut self, key: KeyEvent) -> Control {
        if should_quit(key) {
            return Control::Quit;
        }
        if handle_key_event(key) == Some(GameAction::Restart) {
            self.restart_session();
            return Control::Continue;
        }
        match menu_input(key) {
            Some(MenuInput::Up | MenuInput::Down) => {
                self.game_over_choice = (self.game_over_choice + 1) % GAME_OVER_OPTIONS.len();
            }
            Some(MenuInput::Select) if self.game_over_choice == 0 => self.restart_session(),
            Some(MenuInput::Select | MenuInput::Back) => self.back_to_menu(),
            None => {}
        }
        Control::Continue
    }

    /// Advance the running session by real elapsed time.
    pub fn tick(&mut self, elapsed_ms: u32) {
        if let Some(session) = self.session.as_mut() {
            session.tick(elapsed_ms);
        }
        self.after_update();
    }

    pub fn focus_lost(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.focus_lost();
        }
    }

    /// Hand queued engine events to `sink`.
    pub fn drain_events(&mut self, sink: &mut dyn EventSink) {
        if let Some(session) = self.session.as_mut() {
            session.drain_events(sink);
        }
    }

    /// Record the current score before the process exits.
    pub fn shutdown(&mut self) {
        self.record();
    }

    pub fn render_into(&self, game: &GameView, menu: &MenuView, viewport: Viewport, fb: &mut FrameBuffer) {
        match (self.screen, self.session.as_ref()) {
            (Screen::Playing, Some(session)) => {
                game.render_into(&session.snapshot(), self.game_over_choice, viewport, fb)
            }
            (Screen::Instructions, _) => menu.render_into(Page::Instructions, viewport, fb),
            (Screen::Credits, _) => menu.render_into(Page::Credits, viewport, fb),
            _ => menu.render_into(
                Page::Menu {
                    selected: self.menu_choice,
                    high_score: self.high_score(),
                },
                viewport,
                fb,
            ),
        }
    }

    fn start_game(&mut self) {
        self.high_score = self.high_score.max(self.highscores.load());
        self.session = Some(Session::new(self.seeds.next_u32(), self.high_score));
        self.recorded = false;
        self.game_over_choice = 0;
        self.screen = Screen::Playing;
    }

    fn restart_session(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.restart();
        }
        self.recorded = false;
        self.game_over_choice = 0;
    }

    fn back_to_menu(&mut self) {
        self.record();
        self.session = None;
        self.menu_choice = 0;
        self.screen = Screen::Menu;
    }

    fn after_update(&mut self) {
        if self.session.as_ref().is_some_and(Session::game_over) && !self.recorded {
            self.record();
            self.game_over_choice = 0;
        }
    }

    fn record(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        if self.recorded {
            return;
        }
        let score = session.score();
        self.highscores.record(score);
        self.high_score = self.high_score.max(score);
        self.recorded = session.game_over();
    }
}
