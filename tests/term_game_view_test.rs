use blockfall::core::{piece_color, GameState, PieceQueue};
use blockfall::term::{FrameBuffer, GameView, Overlay, Viewport};
use blockfall::types::PieceKind;

fn screen(fb: &FrameBuffer) -> String {
    (0..fb.height())
        .map(|y| fb.row_text(y))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameState::new(1).snapshot();
    let view = GameView::default();

    // With cell_w=2 and cell_h=1:
    // board pixels = 10*2 by 20*1 => 20x20
    // plus border => 22x22
    let fb = view.render(&snap, Overlay::None, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = GameState::new(1).snapshot();
    snap.board[19][0] = Some(PieceKind::L);
    snap.active = None;

    let fb = GameView::default().render(&snap, Overlay::None, Viewport::new(22, 22));

    // Inside border: (1,1) origin. Each cell is 2 chars wide.
    let (x0, y0) = (1, 1 + 19);
    for x in [x0, x0 + 1] {
        let cell = fb.get(x, y0).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, piece_color(PieceKind::L));
    }
    assert_eq!(fb.get(x0 + 2, y0).unwrap().ch, '·');
}

#[test]
fn term_view_draws_active_piece_over_board() {
    let game = GameState::with_queue(PieceQueue::cycle(&[PieceKind::O]));
    let fb = GameView::default().render(&game.snapshot(), Overlay::None, Viewport::new(22, 22));

    // O at (4, 0) covers board columns 4 and 5 on rows 0 and 1.
    for (cx, cy) in [(4u16, 0u16), (5, 0), (4, 1), (5, 1)] {
        let cell = fb.get(1 + cx * 2, 1 + cy).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, piece_color(PieceKind::O));
    }
    assert_eq!(fb.get(1 + 3 * 2, 1).unwrap().ch, '·');
}

#[test]
fn term_view_side_panel_shows_progress() {
    let mut snap = GameState::new(1).snapshot();
    snap.score = 1200;
    snap.level = 4;
    snap.lines = 32;

    let text = screen(&GameView::default().render(&snap, Overlay::None, Viewport::new(60, 24)));

    assert!(text.contains("SCORE"));
    assert!(text.contains("1200"));
    assert!(text.contains("LEVEL"));
    assert!(text.contains("LINES"));
    assert!(text.contains("32"));
}

#[test]
fn term_view_overlays() {
    let snap = GameState::new(1).snapshot();
    let view = GameView::default();
    let vp = Viewport::new(60, 24);

    let plain = screen(&view.render(&snap, Overlay::None, vp));
    assert!(!plain.contains("PAUSED"));

    let paused = screen(&view.render(&snap, Overlay::Paused, vp));
    assert!(paused.contains("GAME PAUSED"));
    assert!(paused.contains("quit"));

    let over = screen(&view.render(&snap, Overlay::GameOver, vp));
    assert!(over.contains("GAME OVER!"));
    assert!(over.contains("R: play again"));
}

#[test]
fn term_view_render_into_reuses_buffer() {
    let snap = GameState::new(1).snapshot();
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    view.render_into(&snap, Overlay::None, Viewport::new(30, 22), &mut fb);
    assert_eq!((fb.width(), fb.height()), (30, 22));
    let first = fb.clone();

    view.render_into(&snap, Overlay::None, Viewport::new(30, 22), &mut fb);
    assert_eq!(fb, first);
}
