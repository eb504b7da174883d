use std::{error::Error, path::PathBuf};

use clap::{builder::PathBufValueParser, Parser};
use shakmaty::{fen::Fen, CastlingMode, Chess, Position};
use shakmaty_gaviota::{verdict, NullEngine, PathRegistry, PositionQuery, ProbeSession};

#[derive(Debug, Parser)]
struct Opt {
    /// Tablebase directories, searched in the given order
    #[arg(long = "path", value_parser = PathBufValueParser::new())]
    path: Vec<PathBuf>,
    /// Position to probe
    #[arg(long = "fen", default_value = "4k3/8/8/8/8/8/8/4K3 w - - 0 1")]
    fen: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let opt = Opt::parse();

    let mut registry = PathRegistry::new();
    for path in opt.path {
        registry.add(path)?;
    }

    let pos: Chess = opt
        .fen
        .parse::<Fen>()?
        .into_position(CastlingMode::Standard)?;
    let query = PositionQuery::from_position(&pos)?;

    // Swap in a native engine binding here to probe real tables.
    let mut session = ProbeSession::new(NullEngine::new());
    let report = session.initialize(registry)?;
    if let Some(message) = report.diagnostic() {
        eprintln!("{message}");
    }

    let outcome = session.probe(&query)?;
    println!("{}", verdict::describe(pos.turn(), &outcome));

    session.shutdown()?;
    Ok(())
}
