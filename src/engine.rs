use std::path::PathBuf;

use crate::types::CompressionScheme;

/// Raw wire codes shared with the probing engine.
pub mod codes {
    /// White to move.
    pub const WHITE_TO_MOVE: u32 = 0;
    /// Black to move.
    pub const BLACK_TO_MOVE: u32 = 1;

    /// Square sentinel terminating the square lists.
    pub const NOSQUARE: u32 = 64;

    /// Piece sentinel terminating the piece lists.
    pub const NOPIECE: u8 = 0;

    /// Drawn with best play.
    pub const DRAW: u32 = 0;
    /// White mates.
    pub const WMATE: u32 = 1;
    /// Black mates.
    pub const BMATE: u32 = 2;
    /// Illegal or otherwise excluded position.
    pub const FORBIDDEN: u32 = 3;
    /// No classification.
    pub const UNKNOWN: u32 = 7;

    /// No castling available.
    pub const NOCASTLE: u32 = 0;
    /// White may castle king-side.
    pub const WHITE_OO: u32 = 8;
    /// White may castle queen-side.
    pub const WHITE_OOO: u32 = 4;
    /// Black may castle king-side.
    pub const BLACK_OO: u32 = 2;
    /// Black may castle queen-side.
    pub const BLACK_OOO: u32 = 1;
}

/// Number of entries in each wire piece list: up to 16 pieces per side
/// plus the terminating sentinel.
pub const WIRE_LIST_LEN: usize = 17;

/// Flat position encoding handed verbatim to the probing engine.
///
/// The square and piece lists are parallel: `white_squares[i]` holds the
/// piece coded by `white_pieces[i]`. Square lists are terminated by
/// [`codes::NOSQUARE`], piece lists by [`codes::NOPIECE`]. Produced by
/// [`PositionQuery::encode`](crate::PositionQuery::encode), which upholds
/// these invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedPosition {
    pub side_to_move: u32,
    /// Square index of the en passant target, or [`codes::NOSQUARE`].
    pub en_passant: u32,
    pub castling: u32,
    pub white_squares: [u32; WIRE_LIST_LEN],
    pub black_squares: [u32; WIRE_LIST_LEN],
    pub white_pieces: [u8; WIRE_LIST_LEN],
    pub black_pieces: [u8; WIRE_LIST_LEN],
}

/// Raw result aggregate of a hard probe, before decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawProbe {
    /// Whether a tablebase covered the position and the lookup succeeded.
    pub available: bool,
    /// Classification code, one of the [`codes`] outcome values.
    pub info: u32,
    /// Half-moves to mate, meaningful for the two mate codes only.
    pub plies_to_mate: u32,
}

/// The external probing engine behind the session.
///
/// The tablebase file format, the decompression scheme and the lookup
/// algorithm all live behind this seam. A binding to the native Gaviota
/// probing code implements it for real lookups; [`NullEngine`] stands in
/// where no tablebases are wanted, and tests script their own
/// implementations.
///
/// Methods correspond one to one to the engine's entry points and are
/// called in a fixed order by [`ProbeSession`](crate::ProbeSession):
/// `init`, `cache_init`, `stats_reset` during initialization, then any
/// number of `probe_hard` calls, then `cache_done`, `done` at shutdown.
pub trait ProbeEngine {
    /// Registers the search paths and loads table metadata.
    ///
    /// Paths are searched in slice order; for a table present under more
    /// than one path, the earliest wins. Returns an advisory diagnostic
    /// (missing or incompatible files) if the engine has one. A
    /// diagnostic does not mean initialization failed.
    fn init(
        &mut self,
        verbosity: u32,
        scheme: CompressionScheme,
        paths: &[PathBuf],
    ) -> Option<String>;

    /// Sets up the shared decompression and lookup cache.
    ///
    /// `wdl_fraction` is the percentage of the budget reserved for
    /// win/draw/loss data over distance-to-mate data. Returns whether the
    /// cache could be set up; probing works either way.
    fn cache_init(&mut self, bytes: u64, wdl_fraction: u32) -> bool;

    /// Resets the engine's cumulative probe statistics.
    fn stats_reset(&mut self);

    /// Looks the position up in the loaded tables, reading table files
    /// through the cache as needed. Blocks until the lookup completes.
    fn probe_hard(&mut self, pos: &EncodedPosition) -> RawProbe;

    /// Releases the shared cache.
    fn cache_done(&mut self);

    /// Releases all remaining engine resources. Last call of a session.
    fn done(&mut self);
}

/// An engine with no tablebases.
///
/// Every probe reports that no database covers the position. Useful as a
/// stand-in where probing is wired up but no tables are installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEngine;

impl NullEngine {
    pub fn new() -> NullEngine {
        NullEngine
    }
}

impl ProbeEngine for NullEngine {
    fn init(
        &mut self,
        _verbosity: u32,
        _scheme: CompressionScheme,
        _paths: &[PathBuf],
    ) -> Option<String> {
        None
    }

    fn cache_init(&mut self, _bytes: u64, _wdl_fraction: u32) -> bool {
        true
    }

    fn stats_reset(&mut self) {}

    fn probe_hard(&mut self, _pos: &EncodedPosition) -> RawProbe {
        RawProbe {
            available: false,
            info: codes::UNKNOWN,
            plies_to_mate: 0,
        }
    }

    fn cache_done(&mut self) {}

    fn done(&mut self) {}
}
