use crate::{Board, Seat};

/// Four cells as `(row, column)` pairs.
pub type Line = [(usize, usize); 4];

// (row step, column step): horizontal, vertical, down-right, down-left.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

fn line_from(board: &Board, row: usize, column: usize, (dy, dx): (isize, isize)) -> Option<Line> {
    let mut line = [(row, column); 4];
    for (step, cell) in line.iter_mut().enumerate().skip(1) {
        let y = row.checked_add_signed(dy * step as isize)?;
        let x = column.checked_add_signed(dx * step as isize)?;
        if y >= board.height() || x >= board.width() {
            return None;
        }
        *cell = (y, x);
    }
    Some(line)
}

/// Scans every cell of `board` for a four-in-a-row owned by `seat` starting
/// there, in each of the four directions. Returns the first line found.
///
/// The whole board is rescanned on every call, so the answer only ever
/// depends on what's on the board right now.
pub fn find_win(board: &Board, seat: Seat) -> Option<Line> {
    for row in 0..board.height() {
        for column in 0..board.width() {
            for direction in DIRECTIONS {
                if let Some(line) = line_from(board, row, column, direction) {
                    if line
                        .iter()
                        .all(|&(y, x)| board.cell_owner(y, x) == Some(seat))
                    {
                        return Some(line);
                    }
                }
            }
        }
    }
    None
}

pub fn has_win(board: &Board, seat: Seat) -> bool {
    find_win(board, seat).is_some()
}
