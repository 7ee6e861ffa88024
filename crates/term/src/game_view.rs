//! GameView: paints a `GameSnapshot` onto a canvas.
//!
//! Pure (no I/O), so every frame can be checked in unit tests.

use std::time::Duration;

use crate::canvas::{Canvas, Glyph, Style};
use crate::core::stats::format_mm_ss;
use crate::core::{get_shape, GameSnapshot};
use crate::types::{Cell, Phase, PieceKind, Rgb, Rotation};

const BLOCK: [char; 2] = ['█', '█'];
const GHOST: [char; 2] = ['░', '░'];
const PANEL_GAP: u16 = 3;
const PANEL_WIDTH: u16 = 16;

const BACKGROUND: Rgb = Rgb::new(20, 20, 28);
const LABEL: Rgb = Rgb::new(150, 150, 160);
const VALUE: Rgb = Rgb::new(235, 235, 235);

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

/// Board plus side panel, centered in the viewport.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Terminal columns per board cell.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell keeps blocks roughly square.
        Self { cell_w: 2 }
    }
}

impl GameView {
    /// Columns and rows the whole view needs for a `width` x `height` board.
    pub fn footprint(&self, width: u8, height: u8) -> (u16, u16) {
        (
            u16::from(width) * self.cell_w + PANEL_GAP + PANEL_WIDTH,
            u16::from(height),
        )
    }

    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, canvas: &mut Canvas) {
        canvas.reset(viewport.width, viewport.height);

        let (view_w, view_h) = self.footprint(snap.width, snap.height);
        let origin_x = viewport.width.saturating_sub(view_w) / 2;
        let origin_y = viewport.height.saturating_sub(view_h) / 2;

        self.draw_board(snap, canvas, origin_x, origin_y);
        if snap.phase() != Phase::Countdown {
            self.draw_ghost(snap, canvas, origin_x, origin_y);
            self.draw_active(snap, canvas, origin_x, origin_y);
        }

        let panel_x = origin_x + u16::from(snap.width) * self.cell_w + PANEL_GAP;
        self.draw_panel(snap, canvas, panel_x, origin_y);
        self.draw_overlay(snap, canvas, origin_x, origin_y);
    }

    /// Paint board cell `(x, y)` of a board whose top-left is at `origin`.
    fn board_cell(
        &self,
        canvas: &mut Canvas,
        origin: (u16, u16),
        cell: (i8, i8),
        art: [char; 2],
        style: Style,
    ) {
        let (Ok(x), Ok(y)) = (u16::try_from(cell.0), u16::try_from(cell.1)) else {
            return;
        };
        let (ox, oy) = origin;
        for (i, ch) in (0..self.cell_w).zip(art.iter().cycle()) {
            canvas.put(ox + x * self.cell_w + i, oy + y, Glyph::new(*ch, style));
        }
    }

    fn draw_board(&self, snap: &GameSnapshot, canvas: &mut Canvas, ox: u16, oy: u16) {
        for (y, row) in (0i8..).zip(snap.cells.iter()) {
            for (x, cell) in (0i8..).zip(row.iter()) {
                let (art, style) = match cell {
                    Cell::Empty => ([' ', '·'], Style::new(Rgb::new(60, 60, 70), BACKGROUND)),
                    other => {
                        let color = other.color().unwrap_or(BACKGROUND);
                        (BLOCK, Style::new(color, BACKGROUND))
                    }
                };
                self.board_cell(canvas, (ox, oy), (x, y), art, style);
            }
        }
    }

    fn draw_ghost(&self, snap: &GameSnapshot, canvas: &mut Canvas, ox: u16, oy: u16) {
        let (Some(active), Some(cells)) = (snap.active, snap.ghost_cells()) else {
            return;
        };
        let style = Style::new(active.kind.color(), BACKGROUND).dim();
        for (x, y) in cells {
            if snap.cell(x, y) == Some(Cell::Empty) {
                self.board_cell(canvas, (ox, oy), (x, y), GHOST, style);
            }
        }
    }

    fn draw_active(&self, snap: &GameSnapshot, canvas: &mut Canvas, ox: u16, oy: u16) {
        let Some(active) = snap.active else {
            return;
        };
        let style = Style::new(active.kind.color(), BACKGROUND).bold();
        for (x, y) in active.cells() {
            self.board_cell(canvas, (ox, oy), (x, y), BLOCK, style);
        }
    }

    /// A piece in spawn orientation, with its frame's top-left at `(x, y)`.
    fn draw_mini(&self, canvas: &mut Canvas, x: u16, y: u16, kind: PieceKind) {
        let style = Style::new(kind.color(), Rgb::new(0, 0, 0));
        for (dx, dy) in get_shape(kind, Rotation::North) {
            let cx = x + dx as u16 * self.cell_w;
            for i in 0..self.cell_w {
                canvas.put(cx + i, y + dy as u16, Glyph::new(BLOCK[0], style));
            }
        }
    }

    fn draw_panel(&self, snap: &GameSnapshot, canvas: &mut Canvas, x: u16, y: u16) {
        let label = Style::new(LABEL, Rgb::new(0, 0, 0));
        let value = Style::new(VALUE, Rgb::new(0, 0, 0)).bold();
        let p = &snap.progression;

        let mut line = y;
        for (name, text) in [
            ("SCORE", p.score.to_string()),
            ("LEVEL", p.level.to_string()),
            ("LINES", p.lines_total.to_string()),
            ("TIME", format_mm_ss(Duration::from_millis(p.elapsed_ms))),
        ] {
            canvas.text(x, line, name, label);
            canvas.text(x + 7, line, &text, value);
            line += 1;
        }

        line += 1;
        let hold_label = if snap.can_hold { "HOLD" } else { "HOLD (used)" };
        canvas.text(x, line, hold_label, label);
        if let Some(kind) = snap.held {
            self.draw_mini(canvas, x, line + 1, kind);
        }
        line += 4;

        canvas.text(x, line, "NEXT", label);
        line += 1;
        for kind in &snap.preview {
            self.draw_mini(canvas, x, line, *kind);
            line += 3;
        }
    }

    fn draw_overlay(&self, snap: &GameSnapshot, canvas: &mut Canvas, ox: u16, oy: u16) {
        let p = &snap.progression;
        let (headline, hint) = match p.phase {
            Phase::Countdown => (p.countdown.to_string(), "get ready"),
            Phase::Paused => ("PAUSED".to_string(), "P to resume"),
            Phase::GameOver => ("GAME OVER".to_string(), "R to restart"),
            Phase::Active => return,
        };
        let board_w = u16::from(snap.width) * self.cell_w;
        let mid_y = oy + u16::from(snap.height) / 2;
        let style = Style::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        let hint_style = Style::new(LABEL, Rgb::new(0, 0, 0));

        let lines = [
            (mid_y - 1, headline.as_str(), style),
            (mid_y + 1, hint, hint_style),
        ];
        for (row, text, style) in lines {
            let len = text.chars().count() as u16;
            let x = ox + board_w.saturating_sub(len) / 2;
            canvas.text(x, row, text, style);
        }
    }
}
