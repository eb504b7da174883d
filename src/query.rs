use arrayvec::ArrayVec;
use shakmaty::{Bitboard, CastlingSide, Color, Position, Role, Square};

use crate::{
    engine::{codes, EncodedPosition, WIRE_LIST_LEN},
    errors::QueryError,
    types::Castling,
};

/// Maximum number of pieces per side in a single query, bounded by the
/// capacity of the wire piece lists.
pub const MAX_PIECES_PER_SIDE: usize = WIRE_LIST_LEN - 1;

/// A single position to look up, validated at construction time.
///
/// Each piece is one `(Square, Role)` pair, so the parallel square and
/// piece lists of the wire encoding cannot get out of step. Construct
/// through [`PositionQuery::builder`] or convert a whole position with
/// [`PositionQuery::from_position`].
///
/// Queries are plain values: they are encoded afresh for every probe and
/// share no state with the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionQuery {
    side_to_move: Color,
    en_passant: Option<Square>,
    castling: Castling,
    white: ArrayVec<(Square, Role), MAX_PIECES_PER_SIDE>,
    black: ArrayVec<(Square, Role), MAX_PIECES_PER_SIDE>,
}

impl PositionQuery {
    /// Starts building a query for a position with the given side to move.
    pub fn builder(side_to_move: Color) -> PositionQueryBuilder {
        PositionQueryBuilder {
            side_to_move,
            en_passant: None,
            castling: Castling::empty(),
            pieces: Vec::new(),
        }
    }

    /// Builds a query from a [`shakmaty::Position`].
    ///
    /// Takes the side to move, en passant square, castling rights and
    /// board occupancy from the position.
    ///
    /// # Errors
    ///
    /// Errors if one side has more pieces than the wire encoding can
    /// hold. Duplicate squares cannot occur in a legal position.
    pub fn from_position<P: Position>(pos: &P) -> Result<PositionQuery, QueryError> {
        let mut builder = PositionQuery::builder(pos.turn());
        if let Some(square) = pos.maybe_ep_square() {
            builder = builder.en_passant(square);
        }

        let castles = pos.castles();
        let mut castling = Castling::empty();
        if castles.has(Color::White, CastlingSide::KingSide) {
            castling |= Castling::WHITE_KING_SIDE;
        }
        if castles.has(Color::White, CastlingSide::QueenSide) {
            castling |= Castling::WHITE_QUEEN_SIDE;
        }
        if castles.has(Color::Black, CastlingSide::KingSide) {
            castling |= Castling::BLACK_KING_SIDE;
        }
        if castles.has(Color::Black, CastlingSide::QueenSide) {
            castling |= Castling::BLACK_QUEEN_SIDE;
        }
        builder = builder.castling(castling);

        let board = pos.board();
        for square in board.occupied() {
            if let Some(piece) = board.piece_at(square) {
                builder = builder.piece(piece.color, square, piece.role);
            }
        }
        builder.build()
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn castling(&self) -> Castling {
        self.castling
    }

    /// Pieces of the given color as `(square, role)` pairs, in insertion
    /// order.
    pub fn pieces(&self, color: Color) -> &[(Square, Role)] {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    /// Produces the flat wire encoding handed to the probing engine.
    ///
    /// Square lists come out terminated by [`codes::NOSQUARE`], piece
    /// lists by [`codes::NOPIECE`]; a full list is terminated by the
    /// final reserved slot. `Role` discriminants coincide with the
    /// engine's piece codes.
    pub fn encode(&self) -> EncodedPosition {
        let mut encoded = EncodedPosition {
            side_to_move: match self.side_to_move {
                Color::White => codes::WHITE_TO_MOVE,
                Color::Black => codes::BLACK_TO_MOVE,
            },
            en_passant: self.en_passant.map_or(codes::NOSQUARE, u32::from),
            castling: self.castling.bits(),
            white_squares: [codes::NOSQUARE; WIRE_LIST_LEN],
            black_squares: [codes::NOSQUARE; WIRE_LIST_LEN],
            white_pieces: [codes::NOPIECE; WIRE_LIST_LEN],
            black_pieces: [codes::NOPIECE; WIRE_LIST_LEN],
        };
        for (i, (square, role)) in self.white.iter().enumerate() {
            encoded.white_squares[i] = u32::from(*square);
            encoded.white_pieces[i] = *role as u8;
        }
        for (i, (square, role)) in self.black.iter().enumerate() {
            encoded.black_squares[i] = u32::from(*square);
            encoded.black_pieces[i] = *role as u8;
        }
        encoded
    }
}

/// Collects the pieces of a [`PositionQuery`] and validates them on
/// [`build`](PositionQueryBuilder::build).
#[derive(Debug, Clone)]
pub struct PositionQueryBuilder {
    side_to_move: Color,
    en_passant: Option<Square>,
    castling: Castling,
    pieces: Vec<(Color, Square, Role)>,
}

impl PositionQueryBuilder {
    /// Sets the en passant target square.
    #[must_use]
    pub fn en_passant(mut self, square: Square) -> Self {
        self.en_passant = Some(square);
        self
    }

    /// Sets the castling availabilities.
    #[must_use]
    pub fn castling(mut self, castling: Castling) -> Self {
        self.castling = castling;
        self
    }

    /// Places a piece.
    #[must_use]
    pub fn piece(mut self, color: Color, square: Square, role: Role) -> Self {
        self.pieces.push((color, square, role));
        self
    }

    /// Validates the collected pieces and builds the query.
    ///
    /// # Errors
    ///
    /// Errors if two pieces share a square or one side exceeds
    /// [`MAX_PIECES_PER_SIDE`]. Malformed input is rejected here, before
    /// it can reach a probing call.
    pub fn build(self) -> Result<PositionQuery, QueryError> {
        let mut white = ArrayVec::new();
        let mut black = ArrayVec::new();
        let mut occupied = Bitboard::EMPTY;
        for (color, square, role) in self.pieces {
            if occupied.contains(square) {
                return Err(QueryError::SquareOccupied(square));
            }
            occupied.add(square);
            let side = match color {
                Color::White => &mut white,
                Color::Black => &mut black,
            };
            if side.try_push((square, role)).is_err() {
                return Err(QueryError::TooManyPieces {
                    color,
                    count: side.len() + 1,
                });
            }
        }
        Ok(PositionQuery {
            side_to_move: self.side_to_move,
            en_passant: self.en_passant,
            castling: self.castling,
            white,
            black,
        })
    }
}
