//! Rendering a live session through the facade crate

use quadra::core::Session;
use quadra::term::{FrameBuffer, GameView, MenuView, Page, Viewport};
use quadra::types::{GameAction, PieceKind};

fn text(fb: &FrameBuffer) -> String {
    (0..fb.height())
        .map(|y| fb.row_text(y))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn game_view_draws_panel_for_live_session() {
    let mut session = Session::new(12345, 300);
    session.apply_action(GameAction::Hold);

    let view = GameView::default();
    let fb = view.render(&session.snapshot(), 0, Viewport::new(80, 24));
    let screen = text(&fb);

    for label in ["HOLD (C)", "HIGH", "SCORE", "LEVEL", "LINES", "NEXT"] {
        assert!(screen.contains(label), "missing {}", label);
    }
    assert!(screen.contains("300"));
    assert!(screen.contains('┌'));
    assert!(!screen.contains("PAUSED"));
}

#[test]
fn active_piece_cells_are_two_columns_wide() {
    let session = Session::new(7, 0);
    let snap = session.snapshot();
    let active = snap.active.unwrap();

    let view = GameView::default();
    let vp = Viewport::new(80, 24);
    let fb = view.render(&snap, 0, vp);

    let (r, g, b) = active.kind.rgb();
    for (dx, dy) in active.mask.cells() {
        let (px, py) = view.cell_origin(vp, (active.x + dx) as u16, (active.y + dy) as u16);
        for col in [px, px + 1] {
            let cell = fb.get(col, py).unwrap();
            assert_eq!(cell.ch, '█');
            assert_eq!((cell.style.fg.r, cell.style.fg.g, cell.style.fg.b), (r, g, b));
        }
    }
}

#[test]
fn render_into_reuses_buffer_across_sizes() {
    let session = Session::new(1, 0);
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    view.render_into(&session.snapshot(), 0, Viewport::new(80, 24), &mut fb);
    assert_eq!((fb.width(), fb.height()), (80, 24));
    view.render_into(&session.snapshot(), 0, Viewport::new(100, 30), &mut fb);
    assert_eq!((fb.width(), fb.height()), (100, 30));
}

#[test]
fn pause_overlay_appears() {
    let mut session = Session::new(1, 0);
    session.apply_action(GameAction::TogglePause);
    let fb = GameView::default().render(&session.snapshot(), 0, Viewport::new(80, 24));
    assert!(text(&fb).contains("PAUSED"));
}

#[test]
fn menu_page_lists_options() {
    let fb = MenuView::new().render(
        Page::Menu {
            selected: 0,
            high_score: 0,
        },
        Viewport::new(80, 24),
    );
    let screen = text(&fb);
    assert!(screen.contains("> Play <"));
    for option in ["Instructions", "Credits", "Quit"] {
        assert!(screen.contains(option));
    }
    // Every piece colour is distinct.
    let mut colours: Vec<_> = PieceKind::ALL.iter().map(|k| k.rgb()).collect();
    colours.sort();
    colours.dedup();
    assert_eq!(colours.len(), 7);
}
