#![no_main]

use libfuzzer_sys::fuzz_target;
use shakmaty::{Color, Role, Square};
use shakmaty_gaviota::{engine::codes, PositionQuery};

fuzz_target!(|data: &[u8]| {
    let mut builder = PositionQuery::builder(Color::White);
    for chunk in data.chunks_exact(3) {
        let color = if chunk[0] & 1 == 0 {
            Color::White
        } else {
            Color::Black
        };
        let square = Square::new(u32::from(chunk[1] & 63));
        let role = match chunk[2] % 6 {
            0 => Role::Pawn,
            1 => Role::Knight,
            2 => Role::Bishop,
            3 => Role::Rook,
            4 => Role::Queen,
            _ => Role::King,
        };
        builder = builder.piece(color, square, role);
    }

    // Building either rejects the input or yields a query whose wire
    // encoding is sentinel-terminated on both sides.
    if let Ok(query) = builder.build() {
        let encoded = query.encode();
        assert!(encoded.white_squares.contains(&codes::NOSQUARE));
        assert!(encoded.black_squares.contains(&codes::NOSQUARE));
        assert_eq!(
            query.pieces(Color::White).len() + query.pieces(Color::Black).len(),
            encoded
                .white_pieces
                .iter()
                .chain(encoded.black_pieces.iter())
                .filter(|&&p| p != codes::NOPIECE)
                .count()
        );
    }
});
