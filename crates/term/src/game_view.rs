//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{piece_color, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
use blockfall_input::CONTROLS;

const WELL_BG: Rgb = Rgb::new(17, 17, 17);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

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

/// Modal box drawn over the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Paused,
    GameOver,
}

impl Overlay {
    /// Game over wins over pause.
    pub fn for_state(paused: bool, game_over: bool) -> Self {
        if game_over {
            Overlay::GameOver
        } else if paused {
            Overlay::Paused
        } else {
            Overlay::None
        }
    }
}

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual terminal glyph aspect ratio.
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

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        overlay: Overlay,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(crate::fb::Cell {
            ch: ' ',
            style: CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG),
        });

        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let border = CellStyle::new(Rgb::new(51, 51, 51), SCREEN_BG);
        fb.fill_rect(start_x + 1, start_y + 1, board_px_w, board_px_h, ' ', CellStyle::new(WELL_BG, WELL_BG));
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        // Locked cells with the active piece drawn on top.
        for y in 0..BOARD_HEIGHT as u16 {
            for x in 0..BOARD_WIDTH as u16 {
                match snap.visible_cell(x as usize, y as usize) {
                    Some(kind) => self.draw_block(fb, start_x, start_y, x, y, kind),
                    None => self.draw_empty_cell(fb, start_x, start_y, x, y),
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x, start_y, frame_w);

        match overlay {
            Overlay::None => {}
            Overlay::Paused => {
                let mut lines: Vec<(&str, Option<u32>)> = vec![
                    ("GAME PAUSED", None),
                    ("", None),
                    ("Score ", Some(snap.score)),
                    ("Level ", Some(snap.level)),
                    ("Lines ", Some(snap.lines)),
                    ("", None),
                ];
                lines.extend(CONTROLS.iter().map(|(keys, _)| (*keys, None)));
                self.draw_modal(fb, start_x, start_y, frame_w, frame_h, &lines, true);
            }
            Overlay::GameOver => {
                let lines: [(&str, Option<u32>); 7] = [
                    ("GAME OVER!", None),
                    ("", None),
                    ("Final Score ", Some(snap.score)),
                    ("Level ", Some(snap.level)),
                    ("Lines ", Some(snap.lines)),
                    ("", None),
                    ("R: play again", None),
                ];
                self.draw_modal(fb, start_x, start_y, frame_w, frame_h, &lines, false);
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, overlay: Overlay, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, overlay, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
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

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(60, 60, 60), WELL_BG).dim();
        self.fill_cell_rect(fb, start_x, start_y, x, y, '·', style);
    }

    fn draw_block(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: u16,
        y: u16,
        kind: PieceKind,
    ) {
        let style = CellStyle::new(piece_color(kind), WELL_BG).bold();
        self.fill_cell_rect(fb, start_x, start_y, x, y, '█', style);
    }

    #[allow(clippy::too_many_arguments)]
    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 8 {
            return;
        }

        let label = CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);

        let mut y = start_y;
        for (name, v) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), v, value);
            y = y.saturating_add(3);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_modal(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        lines: &[(&str, Option<u32>)],
        with_descriptions: bool,
    ) {
        let box_w = frame_w.saturating_sub(4).max(4);
        let box_h = (lines.len() as u16).saturating_add(2);
        let box_x = start_x.saturating_add((frame_w.saturating_sub(box_w)) / 2);
        let box_y = start_y.saturating_add(frame_h.saturating_sub(box_h) / 2);

        let panel = CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG);
        fb.fill_rect(box_x, box_y, box_w, box_h, ' ', panel);
        self.draw_border(fb, box_x, box_y, box_w, box_h, CellStyle::new(Rgb::new(51, 51, 51), SCREEN_BG));

        let title = panel.bold();
        let hint = CellStyle::new(Rgb::new(160, 160, 160), SCREEN_BG);
        let controls_from = lines.len().saturating_sub(CONTROLS.len());

        for (i, (text, number)) in lines.iter().enumerate() {
            let y = box_y + 1 + i as u16;
            let style = if i == 0 { title } else { panel };
            let x = box_x + 2;
            let end = fb.put_str(x, y, text, style);
            if let Some(n) = number {
                fb.put_u32(end, y, *n, style);
            }
            if with_descriptions && i >= controls_from {
                let (_, what) = CONTROLS[i - controls_from];
                fb.put_str(x + 6, y, what, hint);
            }
        }
    }
}
