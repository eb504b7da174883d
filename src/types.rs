use crate::engine::{codes, RawProbe};

bitflags::bitflags! {
    /// Castling availabilities of a queried position.
    ///
    /// The bit values match the engine's castling codes, so a mask encodes
    /// verbatim.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Castling: u32 {
        const WHITE_KING_SIDE = 8;
        const WHITE_QUEEN_SIDE = 4;
        const BLACK_KING_SIDE = 2;
        const BLACK_QUEEN_SIDE = 1;
    }
}

/// On-disk compression scheme of the tablebase files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionScheme {
    Uncompressed,
    Cp1,
    Cp2,
    Cp3,
    /// The scheme the publicly distributed table sets use.
    Cp4,
}

impl CompressionScheme {
    /// Wire code of the scheme.
    pub fn to_raw(self) -> u32 {
        match self {
            CompressionScheme::Uncompressed => 0,
            CompressionScheme::Cp1 => 1,
            CompressionScheme::Cp2 => 2,
            CompressionScheme::Cp3 => 3,
            CompressionScheme::Cp4 => 4,
        }
    }
}

/// Game-theoretic classification reported by a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No tablebase covered the position, or the engine could not
    /// classify it.
    Unknown,
    /// Drawn with best play on both sides.
    Draw,
    /// White delivers mate with best play.
    WhiteMates,
    /// Black delivers mate with best play.
    BlackMates,
    /// A classification code defined by the engine but not by this crate,
    /// passed through opaquely.
    Other(u32),
}

impl Outcome {
    pub(crate) fn from_raw(raw: u32) -> Outcome {
        match raw {
            codes::DRAW => Outcome::Draw,
            codes::WMATE => Outcome::WhiteMates,
            codes::BMATE => Outcome::BlackMates,
            codes::UNKNOWN => Outcome::Unknown,
            other => Outcome::Other(other),
        }
    }
}

/// Result of probing a single position.
///
/// An unavailable tablebase is a normal, successfully reported outcome,
/// not an error: `tb_available` is `false`, `info` is
/// [`Outcome::Unknown`] and `plies_to_mate` carries no meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeOutcome {
    /// Whether the engine attempted and succeeded at a lookup.
    ///
    /// Kept for wire compatibility. Always equal to `tb_available`: both
    /// fields mirror the engine's single success flag.
    pub found: bool,
    /// Whether a tablebase covering this material configuration was
    /// available and the probe could be serviced.
    pub tb_available: bool,
    /// Outcome classification.
    pub info: Outcome,
    /// Half-moves until the forced mate. Meaningful only when `info` is
    /// [`Outcome::WhiteMates`] or [`Outcome::BlackMates`].
    pub plies_to_mate: u32,
}

impl ProbeOutcome {
    pub(crate) fn decode(raw: RawProbe) -> ProbeOutcome {
        if raw.available {
            ProbeOutcome {
                found: true,
                tb_available: true,
                info: Outcome::from_raw(raw.info),
                plies_to_mate: raw.plies_to_mate,
            }
        } else {
            ProbeOutcome {
                found: false,
                tb_available: false,
                info: Outcome::Unknown,
                plies_to_mate: 0,
            }
        }
    }

    /// Whether the probe was serviced by a tablebase.
    pub fn is_available(&self) -> bool {
        self.tb_available
    }
}
