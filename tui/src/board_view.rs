//! Board layout in terminal cells and the per-square render state.

use chess::{PieceColor, PieceKind, Position};
use cozy_chess::{File, Rank, Square};
use ratatui::layout::Rect;

/// Columns reserved left of the board for rank labels.
pub const RANK_LABEL_WIDTH: u16 = 3;
/// Rows reserved under the board for file labels.
pub const FILE_LABEL_HEIGHT: u16 = 1;

/// Square sizes tried from largest to smallest. Width is roughly twice the
/// height so squares look square in a terminal.
const SQUARE_SIZES: [(u16, u16); 4] = [(11, 5), (9, 4), (7, 3), (5, 2)];

/// Where the 8x8 grid sits on screen. White is always at the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardGeometry {
    pub left: u16,
    pub top: u16,
    pub square_width: u16,
    pub square_height: u16,
}

impl BoardGeometry {
    pub fn new(left: u16, top: u16, square_width: u16, square_height: u16) -> Self {
        Self {
            left,
            top,
            square_width: square_width.max(1),
            square_height: square_height.max(1),
        }
    }

    /// Largest board that fits `area` with its labels, centred.
    pub fn fit(area: Rect) -> Self {
        let avail_w = area.width.saturating_sub(RANK_LABEL_WIDTH);
        let avail_h = area.height.saturating_sub(FILE_LABEL_HEIGHT);
        let (sw, sh) = SQUARE_SIZES
            .iter()
            .copied()
            .find(|(w, h)| w * 8 <= avail_w && h * 8 <= avail_h)
            .unwrap_or((3, 1));

        let total_w = sw * 8 + RANK_LABEL_WIDTH;
        let total_h = sh * 8 + FILE_LABEL_HEIGHT;
        let offset_x = area.width.saturating_sub(total_w) / 2;
        let offset_y = area.height.saturating_sub(total_h) / 2;

        Self::new(
            area.x + offset_x + RANK_LABEL_WIDTH,
            area.y + offset_y,
            sw,
            sh,
        )
    }

    pub fn width(&self) -> u16 {
        self.square_width * 8
    }

    pub fn height(&self) -> u16 {
        self.square_height * 8
    }

    pub fn area(&self) -> Rect {
        Rect::new(self.left, self.top, self.width(), self.height())
    }

    /// Square containing the cell `(x, y)`. Cells are half-open: the right and
    /// bottom edges belong to the outside.
    pub fn square_at(&self, x: u16, y: u16) -> Option<Square> {
        if x < self.left || y < self.top {
            return None;
        }
        let col = (x - self.left) / self.square_width;
        let row = (y - self.top) / self.square_height;
        if col >= 8 || row >= 8 {
            return None;
        }
        Some(Square::new(
            File::index(col as usize),
            Rank::index(7 - row as usize),
        ))
    }

    /// Top-left cell of `square`.
    pub fn square_origin(&self, square: Square) -> (u16, u16) {
        let col = square.file() as u16;
        let row = 7 - square.rank() as u16;
        (
            self.left + col * self.square_width,
            self.top + row * self.square_height,
        )
    }
}

/// Render state of one square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SquareView {
    pub square: Square,
    pub piece: Option<(PieceKind, PieceColor)>,
    pub is_dark: bool,
    pub is_selected: bool,
    pub is_valid_target: bool,
    pub is_being_dragged: bool,
    pub is_last_move: bool,
}

/// All 64 squares, rank 8 first, file a first within a rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    squares: Vec<SquareView>,
}

impl BoardView {
    /// Pure projection of position plus interaction state.
    pub fn project(
        position: &Position,
        selected: Option<Square>,
        dragged: Option<Square>,
        last_move: Option<(Square, Square)>,
    ) -> Self {
        let targets = selected
            .map(|sq| position.legal_destinations(sq))
            .unwrap_or_default();

        let squares = (0..8)
            .rev()
            .flat_map(|rank| (0..8).map(move |file| Square::new(File::index(file), Rank::index(rank))))
            .map(|square| SquareView {
                square,
                piece: position.piece_at(square),
                is_dark: (square.file() as usize + square.rank() as usize) % 2 == 0,
                is_selected: selected == Some(square),
                is_valid_target: targets.contains(&square),
                is_being_dragged: dragged == Some(square),
                is_last_move: last_move.is_some_and(|(from, to)| from == square || to == square),
            })
            .collect();

        Self { squares }
    }

    pub fn squares(&self) -> &[SquareView] {
        &self.squares
    }

    pub fn square(&self, square: Square) -> &SquareView {
        let row = 7 - square.rank() as usize;
        let col = square.file() as usize;
        &self.squares[row * 8 + col]
    }

    pub fn valid_targets(&self) -> Vec<Square> {
        self.squares
            .iter()
            .filter(|s| s.is_valid_target)
            .map(|s| s.square)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> BoardGeometry {
        BoardGeometry::new(10, 2, 5, 2)
    }

    #[test]
    fn corners_map_to_corner_squares() {
        let g = geometry();
        assert_eq!(g.square_at(10, 2), Some(Square::A8));
        assert_eq!(g.square_at(49, 17), Some(Square::H1));
        assert_eq!(g.square_at(14, 17), Some(Square::A1));
    }

    #[test]
    fn outside_edges_are_not_squares() {
        let g = geometry();
        assert_eq!(g.square_at(9, 5), None);
        assert_eq!(g.square_at(50, 5), None);
        assert_eq!(g.square_at(20, 1), None);
        assert_eq!(g.square_at(20, 18), None);
    }

    #[test]
    fn origin_inverts_square_at() {
        let g = geometry();
        for square in Square::ALL {
            let (x, y) = g.square_origin(square);
            assert_eq!(g.square_at(x, y), Some(square));
            assert_eq!(
                g.square_at(x + g.square_width - 1, y + g.square_height - 1),
                Some(square)
            );
        }
    }

    #[test]
    fn fit_prefers_largest_board_that_fits() {
        let g = BoardGeometry::fit(Rect::new(0, 0, 120, 50));
        assert_eq!((g.square_width, g.square_height), (11, 5));
        let small = BoardGeometry::fit(Rect::new(0, 0, 50, 20));
        assert_eq!((small.square_width, small.square_height), (5, 2));
        assert!(small.area().right() <= 50);
    }

    #[test]
    fn projection_marks_selection_targets_and_drag() {
        let view = BoardView::project(
            &Position::standard(),
            Some(Square::E2),
            Some(Square::E2),
            None,
        );
        assert_eq!(view.squares().len(), 64);
        assert!(view.square(Square::E2).is_selected);
        assert!(view.square(Square::E2).is_being_dragged);
        assert_eq!(view.valid_targets().len(), 2);
        assert!(view.square(Square::E4).is_valid_target);
        assert!(view.square(Square::A1).is_dark);
        assert!(!view.square(Square::H1).is_dark);
        assert_eq!(
            view.square(Square::E1).piece,
            Some((PieceKind::King, PieceColor::White))
        );
    }

    #[test]
    fn projection_without_selection_has_no_targets() {
        let view = BoardView::project(&Position::standard(), None, None, Some((Square::E2, Square::E4)));
        assert!(view.valid_targets().is_empty());
        assert!(view.square(Square::E4).is_last_move);
    }
}
