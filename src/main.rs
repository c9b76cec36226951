use deepchess::cli::args::Deepchess;
use deepchess::cli::commands::Command;
use structopt::StructOpt;

fn main() {
    env_logger::init();
    Deepchess::from_args().execute();
}
