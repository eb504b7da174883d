//! Probe Gaviota endgame tablebases.
//!
//! [Gaviota tables](https://sites.google.com/site/gaviotachessengine/Home/endgame-tablebases-1)
//! store the exact game-theoretic outcome and distance to mate for
//! endgame positions with few pieces. This crate is the query boundary
//! in front of a probing engine: it owns the ordered search-path
//! registry, the initialize/probe/shutdown lifecycle, and the encoding
//! of positions and decoding of results. The table file format and the
//! lookup algorithm themselves stay behind the [`ProbeEngine`] seam; a
//! binding to the native probing code implements that trait, while
//! [`NullEngine`] stands in where no tables are installed.
//!
//! # Example
//!
//! ```
//! use shakmaty::{Color, Role, Square};
//! use shakmaty_gaviota::{verdict, NullEngine, PathRegistry, PositionQuery, ProbeSession};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut registry = PathRegistry::new();
//! registry.add("tables/gaviota")?;
//!
//! let mut session = ProbeSession::new(NullEngine::new());
//! let report = session.initialize(registry)?;
//! assert!(report.diagnostic().is_none());
//!
//! let query = PositionQuery::builder(Color::White)
//!     .piece(Color::White, Square::E1, Role::King)
//!     .piece(Color::Black, Square::E8, Role::King)
//!     .build()?;
//!
//! let outcome = session.probe(&query)?;
//! assert!(!outcome.is_available());
//! assert_eq!(
//!     verdict::describe(Color::White, &outcome),
//!     "tablebase information not available."
//! );
//!
//! session.shutdown()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Errors
//!
//! An unavailable tablebase is not an error: the probe succeeds and
//! reports it through [`ProbeOutcome::tb_available`]. See
//! [`RegistryError`], [`QueryError`] and [`StateError`] for the
//! conditions that are.

#![warn(missing_debug_implementations)]

pub mod engine;
mod errors;
mod query;
mod registry;
mod session;
mod types;
pub mod verdict;

pub use crate::{
    engine::{EncodedPosition, NullEngine, ProbeEngine, RawProbe},
    errors::{Operation, QueryError, RegistryError, StateError},
    query::{PositionQuery, PositionQueryBuilder, MAX_PIECES_PER_SIDE},
    registry::PathRegistry,
    session::{InitReport, ProbeSession, ProbeStats, SessionState},
    types::{Castling, CompressionScheme, Outcome, ProbeOutcome},
};
