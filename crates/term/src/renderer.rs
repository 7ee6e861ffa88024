//! Terminal output: canvas frames to crossterm command streams.
//!
//! Frames are encoded into a byte buffer first and written in one go. After
//! the first frame only glyphs that differ from the previous frame are sent.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::canvas::{Canvas, Glyph, Style};
use crate::types::Rgb;

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    previous: Option<Canvas>,
    buf: Vec<u8>,
}

impl TerminalRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            previous: None,
            buf: Vec::with_capacity(32 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush()
    }

    /// Undo [`enter`](Self::enter). Safe to call after a failed frame.
    pub fn leave(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Forget the previous frame so the next draw repaints everything.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    pub fn draw(&mut self, canvas: &Canvas) -> Result<()> {
        self.buf.clear();
        match &self.previous {
            Some(prev) if prev.width() == canvas.width() && prev.height() == canvas.height() => {
                encode_diff(prev, canvas, &mut self.buf)?
            }
            _ => encode_full(canvas, &mut self.buf)?,
        }
        self.flush()?;
        match &mut self.previous {
            Some(prev) => prev.clone_from(canvas),
            None => self.previous = Some(canvas.clone()),
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

/// Clear the screen and paint every glyph.
pub fn encode_full(canvas: &Canvas, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut pen = Pen::default();
    for y in 0..canvas.height() {
        if let Some(row) = canvas.row(y) {
            out.queue(cursor::MoveTo(0, y))?;
            for glyph in row {
                pen.print(out, glyph)?;
            }
        }
    }
    pen.finish(out)
}

/// Paint only the runs of glyphs that changed between two same-sized frames.
pub fn encode_diff(prev: &Canvas, next: &Canvas, out: &mut Vec<u8>) -> Result<()> {
    let mut pen = Pen::default();
    for y in 0..next.height() {
        let (Some(old), Some(new)) = (prev.row(y), next.row(y)) else {
            continue;
        };
        for (start, end) in changed_spans(old, new) {
            out.queue(cursor::MoveTo(start as u16, y))?;
            for glyph in &new[start..end] {
                pen.print(out, glyph)?;
            }
        }
    }
    pen.finish(out)
}

/// Half-open index ranges where `a` and `b` differ.
fn changed_spans(a: &[Glyph], b: &[Glyph]) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut open: Option<usize> = None;
    for (i, (x, y)) in a.iter().zip(b).enumerate() {
        match (x != y, open) {
            (true, None) => open = Some(i),
            (false, Some(start)) => {
                spans.push((start, i));
                open = None;
            }
            _ => {}
        }
    }
    if let Some(start) = open {
        spans.push((start, b.len()));
    }
    spans
}

/// Tracks the active style so attributes are only sent when they change.
#[derive(Default)]
struct Pen {
    style: Option<Style>,
}

impl Pen {
    fn print(&mut self, out: &mut Vec<u8>, glyph: &Glyph) -> Result<()> {
        if self.style != Some(glyph.style) {
            let style = glyph.style;
            out.queue(SetAttribute(Attribute::Reset))?;
            out.queue(SetForegroundColor(color(style.fg)))?;
            out.queue(SetBackgroundColor(color(style.bg)))?;
            if style.bold {
                out.queue(SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                out.queue(SetAttribute(Attribute::Dim))?;
            }
            self.style = Some(style);
        }
        out.queue(Print(glyph.ch))?;
        Ok(())
    }

    fn finish(self, out: &mut Vec<u8>) -> Result<()> {
        out.queue(ResetColor)?;
        out.queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
