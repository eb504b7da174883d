//! Human-readable probe verdicts, for logging and diagnostics.

use shakmaty::Color;

use crate::types::{Outcome, ProbeOutcome};

/// Renders an outcome and the side to move into a verdict line, e.g.
/// `"White mates in 3 plies"` or `"draw."`.
///
/// Diagnostic only; the probing path never needs it.
///
/// # Panics
///
/// Panics on an available outcome with no defined verdict, such as
/// [`Outcome::Unknown`] reported as available. Such a combination means
/// the engine broke its contract; no verdict is guessed for it.
pub fn describe(side_to_move: Color, outcome: &ProbeOutcome) -> String {
    if !outcome.tb_available {
        return "tablebase information not available.".to_owned();
    }
    match (outcome.info, side_to_move) {
        (Outcome::Draw, _) => "draw.".to_owned(),
        (Outcome::WhiteMates, Color::White) => {
            format!("White mates in {} plies", outcome.plies_to_mate)
        }
        (Outcome::BlackMates, Color::Black) => {
            format!("Black mates in {} plies", outcome.plies_to_mate)
        }
        (Outcome::WhiteMates, Color::Black) => {
            format!("Black is mated in {} plies", outcome.plies_to_mate)
        }
        (Outcome::BlackMates, Color::White) => {
            format!("White is mated in {} plies", outcome.plies_to_mate)
        }
        (info, side) => panic!("no verdict for {info:?} with {side} to move"),
    }
}
