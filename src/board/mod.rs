//! Board layout, knight geometry and board files

pub mod grid;
pub mod io;
pub mod rules;

pub use grid::{Board, Piece};
pub use io::{load_board_from_file, parse_board_from_string, save_board_to_file};
pub use rules::{all_cells, is_knight_move, knight_neighbors, Cell, Color};
