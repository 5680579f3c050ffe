//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! Pure (no I/O), so layout is unit-tested directly on the framebuffer.

use crate::core::{BoardSnapshot, GameSnapshot, Phase};
use crate::fb::{FrameBuffer, GlyphStyle, Rgb};
use crate::types::{Cell, Color};

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Draws the playfield, the preview box and the score panel.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Outer size of a framed board, border included.
    fn frame_size(&self, board: &BoardSnapshot) -> (u16, u16) {
        (
            (board.width as u16) * self.cell_w + 2,
            (board.height as u16) * self.cell_h + 2,
        )
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(GlyphStyle::default().glyph(' '));

        let (frame_w, frame_h) = self.frame_size(&snap.board);
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        self.draw_board(fb, &snap.board, start_x, start_y);
        self.draw_side_panel(fb, snap, viewport, start_x + frame_w + 2, start_y);

        match snap.phase {
            Phase::Paused => self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "PAUSED"),
            Phase::GameOver => {
                self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "GAME OVER")
            }
            Phase::Idle => {
                self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "PRESS R")
            }
            Phase::Running => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_board(&self, fb: &mut FrameBuffer, board: &BoardSnapshot, x: u16, y: u16) {
        let (w, h) = self.frame_size(board);
        let border = GlyphStyle {
            fg: Rgb::new(200, 200, 200),
            bg: PANEL_BG,
            bold: false,
            dim: false,
        };
        self.draw_border(fb, x, y, w, h, border);

        for (row, cells) in board.rows().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                let (ch, style) = match cell {
                    Cell::Filled(color) => (
                        '█',
                        GlyphStyle {
                            fg: color_to_rgb(*color),
                            bg: WELL_BG,
                            bold: true,
                            dim: false,
                        },
                    ),
                    Cell::Empty => (
                        '·',
                        GlyphStyle {
                            fg: Rgb::new(90, 90, 100),
                            bg: WELL_BG,
                            bold: false,
                            dim: true,
                        },
                    ),
                };
                let px = x + 1 + (col as u16) * self.cell_w;
                let py = y + 1 + (row as u16) * self.cell_h;
                fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
            }
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: GlyphStyle) {
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

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width || viewport.width - panel_x < 8 {
            return;
        }

        let label = GlyphStyle {
            fg: Rgb::new(220, 220, 220),
            bg: PANEL_BG,
            bold: true,
            dim: false,
        };
        let value = GlyphStyle {
            fg: Rgb::new(200, 200, 200),
            bg: PANEL_BG,
            bold: false,
            dim: false,
        };

        let mut y = start_y;
        for (name, number) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), number, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        if snap.preview.width > 0 {
            self.draw_board(fb, &snap.preview, panel_x, y.saturating_add(1));
        }
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = GlyphStyle {
            fg: Rgb::new(255, 255, 255),
            bg: PANEL_BG,
            bold: true,
            dim: false,
        };
        fb.put_str(x, mid_y, text, style);
    }
}

pub fn color_to_rgb(color: Color) -> Rgb {
    match color {
        Color::Cyan => Rgb::new(80, 220, 220),
        Color::Yellow => Rgb::new(240, 220, 80),
        Color::Purple => Rgb::new(200, 120, 220),
        Color::Green => Rgb::new(100, 220, 120),
        Color::Red => Rgb::new(220, 80, 80),
        Color::Blue => Rgb::new(80, 120, 220),
        Color::Orange => Rgb::new(255, 165, 0),
    }
}
