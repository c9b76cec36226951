//! CLI argument parsing using StructOpt.

use structopt::StructOpt;

use crate::cli::commands::{best_move::BestMoveArgs, play::PlayArgs, pvp::PvpArgs};

#[derive(StructOpt)]
#[structopt(
    name = "deepchess",
    about = "A chess engine with four difficulty tiers ♛"
)]
pub enum Deepchess {
    #[structopt(
        name = "play",
        about = "Play a game against the computer at the given `--difficulty` (default: medium). You play white unless you pass `--color black`, in which case the engine opens. The initial position can be specified using FEN notation with `--fen` (default: starting position)."
    )]
    Play(PlayArgs),
    #[structopt(
        name = "pvp",
        about = "Play a game against another human on this local machine. The initial position can be specified using FEN notation with `--fen` (default: starting position)."
    )]
    Pvp(PvpArgs),
    #[structopt(
        name = "best-move",
        about = "Print the engine's chosen move and score for a position, provided in FEN notation with `--fen` (required), at the given `--difficulty` (default: medium)."
    )]
    BestMove(BestMoveArgs),
}

impl crate::cli::commands::Command for Deepchess {
    fn execute(self) {
        match self {
            Self::Play(cmd) => cmd.execute(),
            Self::Pvp(cmd) => cmd.execute(),
            Self::BestMove(cmd) => cmd.execute(),
        }
    }
}
