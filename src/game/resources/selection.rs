//! Selection resource for tracking the selected square

use crate::game::rules::coordinates::Square;

/// Currently selected square and where its piece may go
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub selected_square: Option<Square>,
    pub possible_moves: Vec<Square>,
}

impl Selection {
    pub fn select(&mut self, square: Square, possible_moves: Vec<Square>) {
        self.selected_square = Some(square);
        self.possible_moves = possible_moves;
    }

    pub fn clear(&mut self) {
        self.selected_square = None;
        self.possible_moves.clear();
    }

    pub fn is_selected(&self) -> bool {
        self.selected_square.is_some()
    }

    pub fn is_target(&self, square: Square) -> bool {
        self.possible_moves.contains(&square)
    }
}
