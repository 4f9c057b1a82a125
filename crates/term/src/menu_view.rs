//! Full-screen pages shown outside of play: main menu, instructions, credits.

use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::game_view::{draw_border, Viewport, GREY, WHITE, YELLOW};

/// Main menu entries, top to bottom.
pub const MENU_OPTIONS: [&str; 4] = ["Play", "Instructions", "Credits", "Quit"];

const PAGE_BG: Rgb = Rgb::new(20, 20, 30);
const ORANGE: Rgb = Rgb::new(255, 200, 0);
const CYAN: Rgb = Rgb::new(0, 255, 255);
const MAGENTA: Rgb = Rgb::new(255, 0, 255);

const INSTRUCTIONS: [&str; 6] = [
    "Left / Right : move",
    "Up           : rotate",
    "Down         : soft drop",
    "Space        : hard drop",
    "C            : hold piece",
    "P            : pause",
];

/// Which non-game page to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Menu { selected: usize, high_score: u32 },
    Instructions,
    Credits,
}

#[derive(Debug, Default)]
pub struct MenuView;

impl MenuView {
    pub fn new() -> Self {
        Self
    }

    pub fn render_into(&self, page: Page, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(WHITE, PAGE_BG).cell(' '));
        draw_border(
            fb,
            0,
            0,
            viewport.width,
            viewport.height,
            CellStyle::new(Rgb::new(60, 60, 80), PAGE_BG),
        );

        match page {
            Page::Menu {
                selected,
                high_score,
            } => self.draw_menu(fb, viewport, selected, high_score),
            Page::Instructions => self.draw_instructions(fb, viewport),
            Page::Credits => self.draw_credits(fb, viewport),
        }
    }

    pub fn render(&self, page: Page, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(page, viewport, &mut fb);
        fb
    }

    fn draw_menu(&self, fb: &mut FrameBuffer, vp: Viewport, selected: usize, high_score: u32) {
        let w = vp.width;
        let mut y = vp.height / 5;

        fb.put_str_centered(0, w, y, "Q U A D R A", CellStyle::new(CYAN, PAGE_BG).bold());
        y += 2;

        let label = "High score: ";
        let digits = decimal_width(high_score);
        let start = w.saturating_sub(label.len() as u16 + digits) / 2;
        let style = CellStyle::new(ORANGE, PAGE_BG).bold();
        let end = fb.put_str(start, y, label, style);
        fb.put_u32(end, y, high_score, style);
        y += 3;

        for (i, option) in MENU_OPTIONS.iter().enumerate() {
            if i == selected {
                let style = CellStyle::new(YELLOW, PAGE_BG).bold();
                let len = option.chars().count() as u16 + 4;
                let start = w.saturating_sub(len) / 2;
                let end = fb.put_str(start, y, "> ", style);
                let end = fb.put_str(end, y, option, style);
                fb.put_str(end, y, " <", style);
            } else {
                fb.put_str_centered(0, w, y, option, CellStyle::new(GREY, PAGE_BG));
            }
            y += 2;
        }

        fb.put_str_centered(
            0,
            w,
            vp.height.saturating_sub(3),
            "Arrows to choose, Space to select",
            CellStyle::new(WHITE, PAGE_BG),
        );
    }

    fn draw_instructions(&self, fb: &mut FrameBuffer, vp: Viewport) {
        let w = vp.width;
        let mut y = vp.height / 6;
        fb.put_str_centered(0, w, y, "HOW TO PLAY", CellStyle::new(CYAN, PAGE_BG).bold());
        y += 3;

        // Left-align the table as a block so the colons line up.
        let block_w = INSTRUCTIONS.iter().map(|l| l.len()).max().unwrap_or(0) as u16;
        let x = w.saturating_sub(block_w) / 2;
        for line in INSTRUCTIONS {
            fb.put_str(x, y, line, CellStyle::new(WHITE, PAGE_BG));
            y += 2;
        }

        fb.put_str_centered(
            0,
            w,
            vp.height.saturating_sub(3),
            "Press Space to go back",
            CellStyle::new(YELLOW, PAGE_BG),
        );
    }

    fn draw_credits(&self, fb: &mut FrameBuffer, vp: Viewport) {
        let w = vp.width;
        let mut y = vp.height / 6;
        fb.put_str_centered(0, w, y, "CREDITS", CellStyle::new(MAGENTA, PAGE_BG).bold());
        y += 3;

        fb.put_str_centered(0, w, y, "Original Tetris design", CellStyle::new(ORANGE, PAGE_BG));
        fb.put_str_centered(0, w, y + 1, "Alexey Pajitnov (1984)", CellStyle::new(WHITE, PAGE_BG));
        y += 4;
        fb.put_str_centered(0, w, y, "Quadra", CellStyle::new(CYAN, PAGE_BG));
        fb.put_str_centered(0, w, y + 1, "joaorizzo0112 (GitHub)", CellStyle::new(WHITE, PAGE_BG));

        fb.put_str_centered(
            0,
            w,
            vp.height.saturating_sub(3),
            "Press Space to go back",
            CellStyle::new(WHITE, PAGE_BG),
        );
    }
}

fn decimal_width(mut n: u32) -> u16 {
    let mut w = 1;
    while n >= 10 {
        n /= 10;
        w += 1;
    }
    w
}
