//! CLI entry point for building and printing a piece grid

use clap::Parser;
use piecegrid::io::cli::{Cli, Session};
use piecegrid::io::logging;

// Allow print for the rendered grid, the program's only output
#[allow(clippy::print_stdout)]
fn main() -> piecegrid::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let session = Session::new(cli);
    println!("{}", session.run()?);
    Ok(())
}
