use fortress_chess::{Board, Color, Coord, EngineError, Piece, PieceType, Variant};

fn at(notation: &str) -> Coord {
    Coord::from_algebraic(notation).unwrap()
}

fn place(board: &mut Board, kind: PieceType, color: Color, notation: &str) {
    board.place_piece(Piece::new(kind, color), at(notation)).unwrap();
}

#[test]
fn corner_blocks_are_void() {
    let board = Board::new(Variant::Fortress);
    // 4x4 corner blocks are void, the cross is playable.
    assert!(!board.is_legal_square(at("a1")));
    assert!(!board.is_legal_square(at("d4")));
    assert!(!board.is_legal_square(at("p1")));
    assert!(!board.is_legal_square(at("a16")));
    assert!(!board.is_legal_square(at("p16")));
    assert!(board.is_legal_square(at("e1")));
    assert!(board.is_legal_square(at("a5")));
    assert!(board.is_legal_square(at("h8")));
    assert!(board.is_legal_square(at("p12")));
}

#[test]
fn pieces_cannot_be_placed_on_void_squares() {
    let mut board = Board::new(Variant::Fortress);
    let err = board
        .place_piece(Piece::new(PieceType::Rook, Color::Yellow), at("a1"))
        .unwrap_err();
    assert_eq!(err, EngineError::IllegalSquare(at("a1")));
}

#[test]
fn standard_setup_places_four_armies() {
    let board = Board::standard(Variant::Fortress);
    assert_eq!(board.current_player(), Color::Yellow);

    // Yellow's back line runs up file a, Red's along rank 1.
    assert_eq!(board.piece_at(at("a5")).unwrap().kind, PieceType::Rook);
    assert_eq!(board.piece_at(at("a9")).unwrap().kind, PieceType::King);
    assert_eq!(board.piece_at(at("a9")).unwrap().color, Color::Yellow);
    assert_eq!(board.piece_at(at("i1")).unwrap().kind, PieceType::King);
    assert_eq!(board.piece_at(at("i1")).unwrap().color, Color::Red);
    assert_eq!(board.piece_at(at("p9")).unwrap().kind, PieceType::King);
    assert_eq!(board.piece_at(at("p9")).unwrap().color, Color::Blue);
    assert_eq!(board.piece_at(at("i16")).unwrap().kind, PieceType::King);
    assert_eq!(board.piece_at(at("i16")).unwrap().color, Color::Green);

    for color in [Color::Yellow, Color::Red, Color::Blue, Color::Green] {
        assert!(board.has_king(color));
    }

    // Pawn lines: file b for Yellow, rank 2 for Red, file o for Blue,
    // rank 15 for Green.
    assert_eq!(board.piece_at(at("b8")).unwrap().kind, PieceType::Pawn);
    assert_eq!(board.piece_at(at("h2")).unwrap().kind, PieceType::Pawn);
    assert_eq!(board.piece_at(at("o8")).unwrap().kind, PieceType::Pawn);
    assert_eq!(board.piece_at(at("h15")).unwrap().kind, PieceType::Pawn);
}

#[test]
fn void_squares_terminate_sliding_rays() {
    let mut board = Board::new(Variant::Fortress);
    place(&mut board, PieceType::Rook, Color::Yellow, "e4");
    let moves = board.valid_moves(at("e4"));
    // West into the corner block stops immediately (d4 is void),
    // south along the file is open down to e1.
    assert!(!moves.contains(&at("d4")));
    assert!(!moves.contains(&at("c4")));
    assert!(moves.contains(&at("e3")));
    assert!(moves.contains(&at("e1")));
    assert!(moves.contains(&at("f4")));
    // d5 belongs to the left arm of the cross and is legal ground, even
    // though the ray through d4 can never reach it.
    assert!(board.is_legal_square(at("d5")));
}

#[test]
fn leapers_cannot_land_on_void_squares() {
    let mut board = Board::new(Variant::Fortress);
    place(&mut board, PieceType::Knight, Color::Red, "e5");
    let moves = board.valid_moves(at("e5"));
    // d3 and c4 sit inside the void corner block.
    assert!(!moves.contains(&at("d3")));
    assert!(!moves.contains(&at("c4")));
    assert!(moves.contains(&at("f3")));
    assert!(moves.contains(&at("g4")));
    assert!(moves.contains(&at("g6")));
}

#[test]
fn yellow_pawns_advance_along_files() {
    // Yellow moves +file; captures are perpendicular to the movement axis.
    let mut board = Board::new(Variant::Fortress);
    place(&mut board, PieceType::Pawn, Color::Yellow, "b8");
    place(&mut board, PieceType::Pawn, Color::Red, "c9");
    place(&mut board, PieceType::Pawn, Color::Yellow, "c7");

    let moves = board.valid_moves(at("b8"));
    assert!(moves.contains(&at("c8")));
    // Double advance from the pawn line.
    assert!(moves.contains(&at("d8")));
    // Capture one file forward, one rank aside - enemy only.
    assert!(moves.contains(&at("c9")));
    assert!(!moves.contains(&at("c7")));
    // Never straight up the rank axis.
    assert!(!moves.contains(&at("b9")));
    assert!(!moves.contains(&at("b7")));
}

#[test]
fn blue_pawns_advance_against_the_file_axis() {
    let mut board = Board::new(Variant::Fortress);
    place(&mut board, PieceType::Pawn, Color::Blue, "o8");
    let moves = board.valid_moves(at("o8"));
    assert!(moves.contains(&at("n8")));
    assert!(moves.contains(&at("m8")));
    assert!(!moves.contains(&at("p8")));
}

#[test]
fn green_pawns_advance_down_the_ranks() {
    // Green's direction is pinned to -rank.
    let mut board = Board::new(Variant::Fortress);
    place(&mut board, PieceType::Pawn, Color::Green, "h15");
    place(&mut board, PieceType::Pawn, Color::Red, "g14");
    let moves = board.valid_moves(at("h15"));
    assert!(moves.contains(&at("h14")));
    assert!(moves.contains(&at("h13")));
    assert!(moves.contains(&at("g14")));
    assert!(!moves.contains(&at("h16")));
}

#[test]
fn rotation_runs_yellow_red_blue_green() {
    let mut board = Board::standard(Variant::Fortress);
    board.move_piece(at("b8"), at("c8")).unwrap();
    assert_eq!(board.current_player(), Color::Red);
    board.move_piece(at("h2"), at("h3")).unwrap();
    assert_eq!(board.current_player(), Color::Blue);
    board.move_piece(at("o8"), at("n8")).unwrap();
    assert_eq!(board.current_player(), Color::Green);
    board.move_piece(at("h15"), at("h14")).unwrap();
    assert_eq!(board.current_player(), Color::Yellow);
}

#[test]
fn rotation_skips_an_eliminated_color() {
    // Scenario C: Yellow has neither king nor pieces; the rotation must pass
    // over it entirely.
    let mut board = Board::standard(Variant::Fortress);
    for file in 0..16 {
        for rank in 0..16 {
            let coord = Coord::new(file, rank);
            if board.piece_at(coord).is_some_and(|p| p.color == Color::Yellow) {
                board.remove_piece(coord).unwrap();
            }
        }
    }
    assert!(!board.is_color_active(Color::Yellow));

    let mut snapshot = board.save();
    snapshot.current_player = Color::Green;
    board.load(&snapshot).unwrap();

    board.move_piece(at("h15"), at("h14")).unwrap();
    assert_eq!(board.current_player(), Color::Red);
}

#[test]
fn color_with_pieces_but_no_king_stays_in_rotation() {
    let mut board = Board::new(Variant::Fortress);
    place(&mut board, PieceType::Pawn, Color::Red, "h2");
    assert!(board.is_color_active(Color::Red));
    assert!(!board.is_color_active(Color::Blue));
}

#[test]
fn side_player_castles_along_its_file() {
    // Yellow's back line is file a; castling runs along it once the squares
    // between king and rook are clear.
    let mut board = Board::new(Variant::Fortress);
    place(&mut board, PieceType::King, Color::Yellow, "a9");
    place(&mut board, PieceType::Rook, Color::Yellow, "a12");
    place(&mut board, PieceType::King, Color::Red, "i1");

    let moves = board.valid_moves(at("a9"));
    assert!(moves.contains(&at("a11")));

    board.move_piece(at("a9"), at("a11")).unwrap();
    assert_eq!(board.piece_at(at("a11")).unwrap().kind, PieceType::King);
    let rook = board.piece_at(at("a10")).unwrap();
    assert_eq!(rook.kind, PieceType::Rook);
    assert!(rook.moved);
    assert!(board.piece_at(at("a12")).is_none());
}

#[test]
fn checkmated_color_is_stripped_from_the_board() {
    // Two yellow rooks ladder-mate the bare red king in the bottom arm.
    let mut board = Board::new(Variant::Fortress);
    place(&mut board, PieceType::King, Color::Yellow, "a9");
    place(&mut board, PieceType::Rook, Color::Yellow, "l1");
    place(&mut board, PieceType::Rook, Color::Yellow, "k3");
    place(&mut board, PieceType::King, Color::Red, "e1");

    // Not mate yet: e2 and f2 are free.
    assert!(board.is_in_check(Color::Red));
    assert!(!board.is_checkmate(Color::Red));

    board.move_piece(at("k3"), at("k2")).unwrap();

    // Red is gone: king removed, presence dropped, rotation lands back on
    // the lone survivor.
    assert!(board.piece_at(at("e1")).is_none());
    assert!(!board.has_king(Color::Red));
    assert!(!board.is_color_active(Color::Red));
    assert_eq!(board.active_colors(), vec![Color::Yellow]);
    assert_eq!(board.current_player(), Color::Yellow);
}

#[test]
fn mover_keeps_turn_only_as_single_survivor() {
    // With two colors still active the turn must change hands after a move.
    let mut board = Board::new(Variant::Fortress);
    place(&mut board, PieceType::King, Color::Yellow, "a9");
    place(&mut board, PieceType::King, Color::Red, "i1");
    board.move_piece(at("a9"), at("b9")).unwrap();
    assert_eq!(board.current_player(), Color::Red);
}

#[test]
fn checkmate_implies_check_for_every_color() {
    let mut board = Board::standard(Variant::Fortress);
    for color in [Color::Yellow, Color::Red, Color::Blue, Color::Green] {
        if board.is_checkmate(color) {
            assert!(board.is_in_check(color));
        }
        // Nobody is mated in the starting position.
        assert!(!board.is_checkmate(color));
    }
}
