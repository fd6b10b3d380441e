use crate::{dims::Dims, gameboard::Cell};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Commit,
    Undo,
}

/// Receiver of the state changes made while generating and solving a maze.
///
/// The algorithms never read anything back from the sink, so an implementation
/// is free to draw, record, pace, or ignore every notification.
pub trait DrawSink {
    /// Wall configuration of `cell` changed, or the cell is shown for the first time.
    fn draw_cell(&mut self, cell: &Cell);

    /// Solver moved from the center of `from` to the center of `to`,
    /// or took that move back.
    fn draw_move(&mut self, from: &Cell, to: &Cell, kind: MoveKind);
}

/// Sink for headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl DrawSink for NoopSink {
    fn draw_cell(&mut self, _cell: &Cell) {}

    fn draw_move(&mut self, _from: &Cell, _to: &Cell, _kind: MoveKind) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkEvent {
    Cell(Dims),
    Move { from: Dims, to: Dims, kind: MoveKind },
}

/// Keeps every notification, in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub events: Vec<SinkEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn moves(&self) -> impl Iterator<Item = (Dims, Dims, MoveKind)> + '_ {
        self.events.iter().filter_map(|e| match *e {
            SinkEvent::Move { from, to, kind } => Some((from, to, kind)),
            SinkEvent::Cell(_) => None,
        })
    }

    pub fn cells(&self) -> impl Iterator<Item = Dims> + '_ {
        self.events.iter().filter_map(|e| match *e {
            SinkEvent::Cell(pos) => Some(pos),
            SinkEvent::Move { .. } => None,
        })
    }
}

impl DrawSink for RecordingSink {
    fn draw_cell(&mut self, cell: &Cell) {
        self.events.push(SinkEvent::Cell(cell.get_coord()));
    }

    fn draw_move(&mut self, from: &Cell, to: &Cell, kind: MoveKind) {
        self.events.push(SinkEvent::Move {
            from: from.get_coord(),
            to: to.get_coord(),
            kind,
        });
    }
}
