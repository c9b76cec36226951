//! The move log. Entries carry everything needed to reverse-apply a move,
//! plus explicit turn boundaries: a "turn" is one undo unit, which spans two
//! moves when an AI reply belongs to the player's move. Boundaries are fixed
//! at record time, so what a turn means never depends on the current mode.

use smallvec::SmallVec;

use crate::board::{MoveUndo, Position};
use crate::chess_move::Move;

#[derive(Debug, Clone, Copy)]
struct HistoryEntry {
    mv: Move,
    undo: MoveUndo,
    ends_turn: bool,
}

#[derive(Debug, Default)]
pub struct MoveHistory {
    entries: Vec<HistoryEntry>,
}

impl MoveHistory {
    pub fn new() -> Self {
        Default::default()
    }

    /// Appends a move to the currently open turn.
    pub fn record(&mut self, mv: Move, undo: MoveUndo) {
        self.entries.push(HistoryEntry {
            mv,
            undo,
            ends_turn: false,
        });
    }

    /// Marks the most recent entry as the end of its turn.
    pub fn close_turn(&mut self) {
        if let Some(entry) = self.entries.last_mut() {
            entry.ends_turn = true;
        }
    }

    /// Reverse-applies the most recent completed turn and returns the
    /// reverted moves, most recent first. A no-op returning an empty list
    /// when the history is empty or the last turn is still open (an AI reply
    /// is pending), so the caller is never left mid-turn.
    pub fn undo_last_turn(&mut self, position: &mut Position) -> SmallVec<[Move; 2]> {
        let mut reverted = SmallVec::new();

        match self.entries.last() {
            Some(entry) if entry.ends_turn => {}
            _ => return reverted,
        }

        loop {
            let entry = match self.entries.pop() {
                Some(entry) => entry,
                None => break,
            };
            position.undo(&entry.mv, entry.undo);
            reverted.push(entry.mv);

            // Stop once we reach the previous turn's boundary.
            match self.entries.last() {
                Some(previous) if !previous.ends_turn => continue,
                _ => break,
            }
        }

        reverted
    }

    pub fn moves(&self) -> impl Iterator<Item = &Move> {
        self.entries.iter().map(|entry| &entry.mv)
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.entries.last().map(|entry| &entry.mv)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
