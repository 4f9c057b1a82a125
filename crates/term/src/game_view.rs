//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, Mask};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH, MASK_SIZE};

/// Choices offered on the game-over overlay, top to bottom.
pub const GAME_OVER_OPTIONS: [&str; 2] = ["Try again", "Back to menu"];

const SCREEN_BG: Rgb = Rgb::new(15, 15, 20);
const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const GRID_FG: Rgb = Rgb::new(60, 60, 72);
const GHOST_FG: Rgb = Rgb::new(140, 140, 150);
pub(crate) const WHITE: Rgb = Rgb::new(255, 255, 255);
pub(crate) const YELLOW: Rgb = Rgb::new(255, 255, 0);
pub(crate) const GREY: Rgb = Rgb::new(128, 128, 128);
const CYAN: Rgb = Rgb::new(0, 255, 255);
const RED: Rgb = Rgb::new(255, 0, 0);
const GREEN: Rgb = Rgb::new(0, 255, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Screen position of the well's outer frame, computed once per frame.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// Draws the playing field, the side panel and the pause / game-over overlays.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell keeps blocks roughly square.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render a frame into an existing framebuffer.
    ///
    /// `game_over_choice` is the highlighted entry of [`GAME_OVER_OPTIONS`];
    /// it is only read when the snapshot is in the game-over phase.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        game_over_choice: usize,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(WHITE, SCREEN_BG).cell(' '));

        let board_px_w = BOARD_WIDTH as u16 * self.cell_w;
        let board_px_h = BOARD_HEIGHT as u16 * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        // Leave room for the side panel to the right of the well.
        let total_w = frame_w + 2 + PANEL_W;
        let x = viewport.width.saturating_sub(total_w) / 2;
        let y = viewport.height.saturating_sub(frame_h) / 2;
        let frame = Frame {
            x,
            y,
            w: frame_w,
            h: frame_h,
        };

        self.draw_well(fb, snap, frame);
        self.draw_side_panel(fb, snap, viewport, frame);

        if snap.game_over() {
            self.draw_game_over(fb, snap, game_over_choice, viewport, frame);
        } else if snap.paused() {
            self.draw_pause(fb, frame);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, game_over_choice: usize, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, game_over_choice, viewport, &mut fb);
        fb
    }

    /// Terminal column of the left edge of board column `x`.
    pub fn cell_origin(&self, viewport: Viewport, x: u16, y: u16) -> (u16, u16) {
        let frame_w = BOARD_WIDTH as u16 * self.cell_w + 2;
        let frame_h = BOARD_HEIGHT as u16 * self.cell_h + 2;
        let fx = viewport.width.saturating_sub(frame_w + 2 + PANEL_W) / 2;
        let fy = viewport.height.saturating_sub(frame_h) / 2;
        (fx + 1 + x * self.cell_w, fy + 1 + y * self.cell_h)
    }

    fn draw_well(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, frame: Frame) {
        let well = CellStyle::new(GRID_FG, WELL_BG).dim();
        fb.fill_rect(frame.x + 1, frame.y + 1, frame.w - 2, frame.h - 2, ' ', well);
        draw_border(fb, frame.x, frame.y, frame.w, frame.h, CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG));

        for (y, row) in snap.board.iter().enumerate() {
            for (x, &id) in row.iter().enumerate() {
                match PieceKind::from_id(id) {
                    Some(kind) => self.fill_cell(fb, frame, x as i8, y as i8, '█', block_style(kind.rgb().into())),
                    None => self.fill_cell(fb, frame, x as i8, y as i8, '·', well),
                }
            }
        }

        if snap.game_over() {
            return;
        }
        let Some(active) = snap.active else {
            return;
        };

        if let Some(ghost_y) = snap.ghost_y {
            let ghost = CellStyle::new(GHOST_FG, WELL_BG).dim();
            for (dx, dy) in active.mask.cells() {
                self.fill_cell(fb, frame, active.x + dx, ghost_y + dy, '░', ghost);
            }
        }

        let style = block_style(active.kind.rgb().into());
        for (dx, dy) in active.mask.cells() {
            self.fill_cell(fb, frame, active.x + dx, active.y + dy, '█', style);
        }
    }

    /// Paint one board cell; cells outside the visible grid are skipped.
    fn fill_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: i8, y: i8, ch: char, style: CellStyle) {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return;
        }
        let px = frame.x + 1 + x as u16 * self.cell_w;
        let py = frame.y + 1 + y as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, frame: Frame) {
        let x = frame.x.saturating_add(frame.w).saturating_add(2);
        if x >= viewport.width || viewport.width - x < 12 {
            return;
        }

        let label = CellStyle::new(WHITE, SCREEN_BG).bold();
        let value = CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG);
        let mut y = frame.y;

        fb.put_str(x, y, "HOLD (C)", label);
        y += 1;
        if let Some(kind) = snap.hold {
            // Greyed out once the hold slot has been used for this piece.
            let colour = Rgb::from(kind.rgb());
            let rgb = if snap.can_hold { colour } else { colour.greyscale() };
            self.draw_preview(fb, x, y, kind, rgb);
        }
        y += PREVIEW_ROWS + 1;

        fb.put_str(x, y, "HIGH", CellStyle::new(YELLOW, SCREEN_BG).bold());
        fb.put_u32(x + 7, y, snap.score.max(snap.high_score), CellStyle::new(YELLOW, SCREEN_BG));
        y += 1;
        for (name, v) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(x, y, name, label);
            fb.put_u32(x + 7, y, v, value);
            y += 1;
        }
        if snap.combo > 0 {
            let combo = CellStyle::new(CYAN, SCREEN_BG).bold();
            let end = fb.put_str(x, y, "COMBO x", combo);
            fb.put_u32(end, y, snap.combo as u32, combo);
        }
        y += 2;

        fb.put_str(x, y, "NEXT", label);
        y += 1;
        if let Some(kind) = snap.next {
            self.draw_preview(fb, x, y, kind, kind.rgb().into());
        }
    }

    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind, rgb: Rgb) {
        let style = block_style(rgb);
        for (dx, dy) in Mask::spawn(kind).cells() {
            let px = x + dx as u16 * self.cell_w;
            let py = y + dy as u16;
            fb.fill_rect(px, py, self.cell_w, 1, '█', style);
        }
    }

    fn draw_pause(&self, fb: &mut FrameBuffer, frame: Frame) {
        let mid = frame.y + frame.h / 2;
        let backdrop = CellStyle::new(WHITE, Rgb::new(0, 0, 0));
        fb.fill_rect(frame.x + 1, mid - 1, frame.w - 2, 4, ' ', backdrop);
        fb.put_str_centered(frame.x, frame.w, mid, "PAUSED", CellStyle::new(YELLOW, Rgb::new(0, 0, 0)).bold());
        fb.put_str_centered(frame.x, frame.w, mid + 1, "P to resume", backdrop);
    }

    fn draw_game_over(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        choice: usize,
        viewport: Viewport,
        frame: Frame,
    ) {
        let black = Rgb::new(0, 0, 0);
        let w = viewport.width.min(frame.w + 12);
        let x = viewport.width.saturating_sub(w) / 2;
        let top = (frame.y + frame.h / 2).saturating_sub(4);
        fb.fill_rect(x, top, w, 9, ' ', CellStyle::new(WHITE, black));

        fb.put_str_centered(x, w, top + 1, "GAME OVER", CellStyle::new(RED, black).bold());

        let mut line = [0u8; 24];
        let text = score_line(&mut line, snap.score);
        fb.put_str_centered(x, w, top + 2, text, CellStyle::new(WHITE, black));
        if snap.new_record {
            fb.put_str_centered(x, w, top + 3, "NEW RECORD!", CellStyle::new(YELLOW, black).bold());
        }

        for (i, option) in GAME_OVER_OPTIONS.iter().enumerate() {
            let row = top + 5 + i as u16 * 2;
            if i == choice {
                let style = CellStyle::new(GREEN, black).bold();
                let len = option.chars().count() as u16 + 4;
                let start = x + w.saturating_sub(len) / 2;
                let end = fb.put_str(start, row, "> ", style);
                let end = fb.put_str(end, row, option, style);
                fb.put_str(end, row, " <", style);
            } else {
                fb.put_str_centered(x, w, row, option, CellStyle::new(GREY, black));
            }
        }
    }
}

/// Rows reserved for a 4x4 mini preview
const PREVIEW_ROWS: u16 = MASK_SIZE as u16;

/// Width of the side panel in terminal columns
const PANEL_W: u16 = 16;

fn block_style(fg: Rgb) -> CellStyle {
    CellStyle::new(fg, WELL_BG).bold()
}

/// Format "Final score: N" into a stack buffer.
fn score_line(buf: &mut [u8; 24], score: u32) -> &str {
    const PREFIX: &[u8] = b"Final score: ";
    buf[..PREFIX.len()].copy_from_slice(PREFIX);
    let mut digits = [0u8; 10];
    let mut n = score;
    let mut len = 0;
    loop {
        digits[len] = b'0' + (n % 10) as u8;
        len += 1;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    for (i, d) in digits[..len].iter().rev().enumerate() {
        buf[PREFIX.len() + i] = *d;
    }
    std::str::from_utf8(&buf[..PREFIX.len() + len]).unwrap_or("Final score")
}

pub(crate) fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}
