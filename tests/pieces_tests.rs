//! Pieces module tests - shape table and piece instance

use blockfall::core::{get_shape, shape_at, Piece};
use blockfall::types::{EngineError, PieceKind, Rotation, SPAWN_X, SPAWN_Y};

// ============== Shape Tests ==============

#[test]
fn test_i_piece_shapes() {
    let north = get_shape(PieceKind::I, Rotation::North);
    assert_eq!(north, [(0, 1), (1, 1), (2, 1), (3, 1)]);

    let east = get_shape(PieceKind::I, Rotation::East);
    assert_eq!(east, [(1, 0), (1, 1), (1, 2), (1, 3)]);

    assert_eq!(get_shape(PieceKind::I, Rotation::South), north);
    assert_eq!(get_shape(PieceKind::I, Rotation::West), east);
}

#[test]
fn test_o_piece_is_rotation_invariant() {
    let north = get_shape(PieceKind::O, Rotation::North);
    for rotation in Rotation::ALL {
        assert_eq!(get_shape(PieceKind::O, rotation), north);
    }
}

#[test]
fn test_t_piece_shapes() {
    assert_eq!(
        get_shape(PieceKind::T, Rotation::North),
        [(1, 0), (0, 1), (1, 1), (2, 1)]
    );
    assert_eq!(
        get_shape(PieceKind::T, Rotation::South),
        [(0, 1), (1, 1), (2, 1), (1, 2)]
    );
}

#[test]
fn test_every_shape_has_four_distinct_cells_in_frame() {
    for kind in PieceKind::ALL {
        for rotation in Rotation::ALL {
            let shape = get_shape(kind, rotation);
            for (i, a) in shape.iter().enumerate() {
                assert!((0..4).contains(&a.0) && (0..4).contains(&a.1));
                assert!(!shape[i + 1..].contains(a), "{kind:?} {rotation:?}");
            }
        }
    }
}

#[test]
fn test_raw_rotation_is_validated() {
    assert_eq!(
        shape_at(PieceKind::L, 2).unwrap(),
        get_shape(PieceKind::L, Rotation::South)
    );
    assert!(matches!(
        shape_at(PieceKind::L, 4),
        Err(EngineError::InvalidRotation(4))
    ));
}

// ============== Piece Tests ==============

#[test]
fn test_spawn_position() {
    let piece = Piece::spawn(PieceKind::J);
    assert_eq!((piece.x, piece.y), (SPAWN_X, SPAWN_Y));
    assert_eq!(piece.rotation, Rotation::North);
}

#[test]
fn test_from_raw_rejects_unknown_kind() {
    assert_eq!(Piece::from_raw(5, 1, 1).unwrap().kind, PieceKind::T);
    assert!(matches!(
        Piece::from_raw(7, 1, 1),
        Err(EngineError::InvalidPieceKind(7))
    ));
}

#[test]
fn test_rotation_cycles() {
    let mut piece = Piece::spawn(PieceKind::S);
    for _ in 0..4 {
        piece.rotate_cw();
    }
    assert_eq!(piece.rotation, Rotation::North);
    piece.rotate_ccw();
    assert_eq!(piece.rotation, Rotation::West);
}

#[test]
fn test_cells_follow_position() {
    let mut piece = Piece::new(PieceKind::O, 3, 4);
    assert_eq!(piece.cells(), [(3, 4), (3, 5), (4, 4), (4, 5)]);
    piece.move_by(2, -1);
    assert_eq!(piece.cells(), [(5, 3), (5, 4), (6, 3), (6, 4)]);
    piece.set_position(0, 0);
    assert_eq!(piece.cells(), get_shape(PieceKind::O, Rotation::North));
}

#[test]
fn test_copies_are_independent() {
    let original = Piece::spawn(PieceKind::Z);
    let mut copy = original;
    copy.move_by(1, 1);
    copy.rotate_cw();
    assert_eq!(original, Piece::spawn(PieceKind::Z));
    assert_ne!(copy, original);
}
