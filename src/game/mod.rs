pub mod controller;
pub mod display;
pub mod history;

/// Who plays each side. The controller records turn boundaries at write time,
/// so switching modes mid-game never corrupts undo pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    VsAi,
    TwoPlayer,
}
