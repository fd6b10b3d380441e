use std::{
    io::{self, Write},
    thread,
    time::Duration,
};

use crossterm::{
    cursor::{Hide, MoveTo, MoveToNextLine, Show},
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use pmaze::{
    array::Array2D,
    dims::Dims,
    gameboard::{Cell, CellWall},
    sink::{DrawSink, MoveKind},
};

const CORNER: char = '+';
const HORIZONTAL: char = '-';
const VERTICAL: char = '|';
const EMPTY: char = ' ';

#[derive(Debug, Clone, Copy)]
pub struct RenderStyle {
    pub commit_char: char,
    pub undo_char: char,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            commit_char: '*',
            undo_char: '.',
        }
    }
}

/// Draws the maze as text, using cell bounds as character positions.
///
/// With a delay set, every notification repaints the terminal and then
/// pauses, otherwise the canvas is only filled in and shown by the caller.
pub struct TextRenderer<W: Write> {
    canvas: Array2D<char>,
    out: W,
    style: RenderStyle,
    delay: Option<Duration>,
}

impl<W: Write> TextRenderer<W> {
    /// `size` is the canvas size, which is one past the bottom right corner of the last cell.
    pub fn new(size: Dims, out: W, style: RenderStyle, delay: Option<Duration>) -> Self {
        let size = Dims(size.0.max(1), size.1.max(1));
        Self {
            canvas: Array2D::new(EMPTY, size.0 as usize, size.1 as usize),
            out,
            style,
            delay,
        }
    }

    pub fn is_animated(&self) -> bool {
        self.delay.is_some()
    }

    pub fn render(&self) -> String {
        let Dims(w, _) = self.canvas.size();
        self.canvas
            .iter()
            .collect::<Vec<_>>()
            .chunks(w as usize)
            .map(|line| line.iter().copied().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn begin(&mut self) -> io::Result<()> {
        if self.is_animated() {
            queue!(self.out, Clear(ClearType::All), Hide)?;
            self.out.flush()?;
        }
        Ok(())
    }

    pub fn finish(&mut self) -> io::Result<()> {
        if self.is_animated() {
            self.redraw()?;
            queue!(self.out, Show, MoveToNextLine(1))?;
            self.out.flush()?;
        }
        Ok(())
    }

    fn put(&mut self, pos: Dims, c: char) {
        if let Some(slot) = self.canvas.get_mut(pos) {
            *slot = c;
        }
    }

    fn line(&mut self, from: Dims, to: Dims, c: char) {
        let (min, max) = (
            Dims(from.0.min(to.0), from.1.min(to.1)),
            Dims(from.0.max(to.0), from.1.max(to.1)),
        );
        for pos in Dims::iter_fill(min, max + Dims::ONE) {
            self.put(pos, c);
        }
    }

    fn paint_cell(&mut self, cell: &Cell) {
        let bounds = cell.bounds();
        let Dims(x1, y1) = bounds.top_left;
        let Dims(x2, y2) = bounds.bottom_right;

        let sides = [
            (CellWall::Top, Dims(x1 + 1, y1), Dims(x2 - 1, y1), HORIZONTAL),
            (CellWall::Bottom, Dims(x1 + 1, y2), Dims(x2 - 1, y2), HORIZONTAL),
            (CellWall::Left, Dims(x1, y1 + 1), Dims(x1, y2 - 1), VERTICAL),
            (CellWall::Right, Dims(x2, y1 + 1), Dims(x2, y2 - 1), VERTICAL),
        ];
        for (wall, from, to, c) in sides {
            let c = if cell.is_closed(wall) { c } else { EMPTY };
            if from.0 <= to.0 && from.1 <= to.1 {
                self.line(from, to, c);
            }
        }

        for corner in [Dims(x1, y1), Dims(x2, y1), Dims(x1, y2), Dims(x2, y2)] {
            self.put(corner, CORNER);
        }
    }

    fn redraw(&mut self) -> io::Result<()> {
        queue!(self.out, MoveTo(0, 0))?;
        let frame = self.render();
        for line in frame.lines() {
            queue!(self.out, Print(line), MoveToNextLine(1))?;
        }
        self.out.flush()
    }

    fn animate(&mut self) {
        let Some(delay) = self.delay else {
            return;
        };

        if let Err(err) = self.redraw() {
            log::warn!("Cannot draw to terminal, animation disabled: {}", err);
            self.delay = None;
            return;
        }
        thread::sleep(delay);
    }
}

impl<W: Write> DrawSink for TextRenderer<W> {
    fn draw_cell(&mut self, cell: &Cell) {
        self.paint_cell(cell);
        self.animate();
    }

    fn draw_move(&mut self, from: &Cell, to: &Cell, kind: MoveKind) {
        let c = match kind {
            MoveKind::Commit => self.style.commit_char,
            MoveKind::Undo => self.style.undo_char,
        };
        self.line(from.center(), to.center(), c);
        self.animate();
    }
}
