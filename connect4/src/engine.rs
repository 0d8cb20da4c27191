use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::win::{self, Line};
use crate::{Board, Dimensions, Error, Player, Seat};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum GameStatus {
    Ongoing,
    Won { seat: Seat },
    Tied,
}

/// What a drop did, for the presentation layer to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum Outcome {
    /// Full or unknown column, or the game is already over. Nothing changed.
    Ignored,
    /// The piece landed and it's the other player's turn.
    Placed { row: usize, column: usize },
    /// The piece landed and completed four in a row.
    Won {
        player: Player,
        row: usize,
        column: usize,
    },
    /// The piece landed in the last empty cell and nobody won.
    Tied { row: usize, column: usize },
}

#[derive(Debug, Clone, Serialize)]
pub struct GameEngine {
    board: Board,
    player1: Player,
    player2: Player,
    current: Seat,
    status: GameStatus,
    winning_line: Option<Line>,
}

impl GameEngine {
    pub fn new(
        player1: Player,
        player2: Player,
        width: usize,
        height: usize,
    ) -> Result<Self, Error> {
        Self::with_dimensions(player1, player2, Dimensions::new(width, height)?)
    }

    pub fn with_dimensions(
        player1: Player,
        player2: Player,
        dimensions: Dimensions,
    ) -> Result<Self, Error> {
        Ok(Self {
            board: Board::with_dimensions(dimensions)?,
            player1,
            player2,
            current: Seat::First,
            status: GameStatus::Ongoing,
            winning_line: None,
        })
    }

    /// Drop the current player's piece into `column`.
    pub fn drop_piece(&mut self, column: usize) -> Outcome {
        if self.is_terminal() {
            trace!(column, "ignoring drop, game is over");
            return Outcome::Ignored;
        }
        let Some(row) = self.board.find_landing_row(column) else {
            trace!(column, "ignoring drop, no landing row");
            return Outcome::Ignored;
        };

        let seat = self.current;
        self.board.place(row, column, seat);
        debug!(?seat, row, column, "placed piece");

        if let Some(line) = win::find_win(&self.board, seat) {
            self.status = GameStatus::Won { seat };
            self.winning_line = Some(line);
            let player = self.player(seat).clone();
            info!(winner = %player, "game won");
            return Outcome::Won {
                player,
                row,
                column,
            };
        }

        if self.board.is_full() {
            self.status = GameStatus::Tied;
            info!("game tied");
            return Outcome::Tied { row, column };
        }

        self.current = seat.other();
        Outcome::Placed { row, column }
    }

    /// Clear the board for a new game between the same players. Player one
    /// moves first again.
    pub fn reset(&mut self) {
        self.board.clear();
        self.current = Seat::First;
        self.status = GameStatus::Ongoing;
        self.winning_line = None;
        debug!("game reset");
    }

    pub fn player(&self, seat: Seat) -> &Player {
        match seat {
            Seat::First => &self.player1,
            Seat::Second => &self.player2,
        }
    }

    /// Whose turn it is. After a win this stays on the winner.
    pub fn current_player(&self) -> &Player {
        self.player(self.current)
    }

    pub fn current_seat(&self) -> Seat {
        self.current
    }

    pub fn cell_owner(&self, row: usize, column: usize) -> Option<&Player> {
        self.board.cell_owner(row, column).map(|seat| self.player(seat))
    }

    pub fn is_terminal(&self) -> bool {
        self.status != GameStatus::Ongoing
    }

    pub fn is_column_playable(&self, column: usize) -> bool {
        !self.is_terminal() && !self.board.is_column_full(column)
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn winner(&self) -> Option<&Player> {
        match self.status {
            GameStatus::Won { seat } => Some(self.player(seat)),
            _ => None,
        }
    }

    pub fn winning_line(&self) -> Option<&Line> {
        self.winning_line.as_ref()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn width(&self) -> usize {
        self.board.width()
    }

    pub fn height(&self) -> usize {
        self.board.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> Player {
        Player::new("red")
    }

    fn yellow() -> Player {
        Player::new("yellow")
    }

    fn standard() -> GameEngine {
        GameEngine::new(red(), yellow(), 7, 6).unwrap()
    }

    fn play(engine: &mut GameEngine, columns: &[usize]) -> Vec<Outcome> {
        columns.iter().map(|&c| engine.drop_piece(c)).collect()
    }

    #[test]
    fn create_game() {
        let engine = standard();
        assert_eq!(engine.current_player(), &red());
        assert_eq!(engine.current_seat(), Seat::First);
        assert_eq!(engine.status(), GameStatus::Ongoing);
        assert!(!engine.is_terminal());
        assert_eq!(engine.width(), 7);
        assert_eq!(engine.height(), 6);

        assert!(GameEngine::new(red(), yellow(), 1, 1).is_ok());
        assert!(GameEngine::new(red(), yellow(), 20, 3).is_ok());
    }

    #[test]
    fn create_game_rejects_bad_dimensions() {
        for (w, h) in [
            (0, 6),
            (7, 0),
            (0, 0),
            (usize::MAX, usize::MAX),
            (2, usize::MAX / 2),
        ] {
            assert!(matches!(
                GameEngine::new(red(), yellow(), w, h),
                Err(Error::InvalidDimension(_))
            ));
        }
    }

    #[test]
    fn turns_alternate() {
        let mut engine = standard();
        for (i, column) in [0, 1, 2, 3, 4, 5, 6, 0].into_iter().enumerate() {
            let expected = if i % 2 == 0 { red() } else { yellow() };
            assert_eq!(engine.current_player(), &expected);
            assert!(matches!(engine.drop_piece(column), Outcome::Placed { .. }));
        }
        assert_eq!(engine.current_player(), &red());
    }

    #[test]
    fn pieces_stack_upward() {
        let mut engine = standard();
        assert_eq!(engine.drop_piece(2), Outcome::Placed { row: 5, column: 2 });
        assert_eq!(engine.drop_piece(2), Outcome::Placed { row: 4, column: 2 });
        assert_eq!(engine.drop_piece(2), Outcome::Placed { row: 3, column: 2 });
        assert_eq!(engine.cell_owner(5, 2), Some(&red()));
        assert_eq!(engine.cell_owner(4, 2), Some(&yellow()));
        assert_eq!(engine.cell_owner(3, 2), Some(&red()));
        assert_eq!(engine.cell_owner(2, 2), None);
    }

    #[test]
    fn full_column_is_ignored() {
        let mut engine = standard();
        // Alternating owners in one column never make four vertically.
        play(&mut engine, &[0, 0, 0, 0, 0, 0]);
        assert!(!engine.is_column_playable(0));
        let before = engine.board().clone();
        let seat = engine.current_seat();

        assert_eq!(engine.drop_piece(0), Outcome::Ignored);
        assert_eq!(engine.board(), &before);
        assert_eq!(engine.current_seat(), seat);
    }

    #[test]
    fn unknown_column_is_ignored() {
        let mut engine = standard();
        assert_eq!(engine.drop_piece(7), Outcome::Ignored);
        assert_eq!(engine.drop_piece(usize::MAX), Outcome::Ignored);
        assert_eq!(engine.current_player(), &red());
        assert_eq!(engine.board(), &Board::new(7, 6).unwrap());
    }

    #[test]
    fn horizontal_win() {
        let mut engine = standard();
        // Red along the bottom row, yellow stacking on top of red.
        let outcomes = play(&mut engine, &[0, 0, 1, 1, 2, 2, 3]);
        assert!(outcomes[..6]
            .iter()
            .all(|o| matches!(o, Outcome::Placed { .. })));
        assert_eq!(
            outcomes[6],
            Outcome::Won {
                player: red(),
                row: 5,
                column: 3
            }
        );
        assert!(engine.is_terminal());
        assert_eq!(engine.status(), GameStatus::Won { seat: Seat::First });
        assert_eq!(engine.winner(), Some(&red()));
        assert_eq!(
            engine.winning_line(),
            Some(&[(5, 0), (5, 1), (5, 2), (5, 3)])
        );
    }

    #[test]
    fn vertical_win_for_second_player() {
        let mut engine = standard();
        let outcomes = play(&mut engine, &[0, 6, 1, 6, 0, 6, 1, 6]);
        assert_eq!(
            outcomes.last(),
            Some(&Outcome::Won {
                player: yellow(),
                row: 2,
                column: 6
            })
        );
        assert_eq!(engine.winner(), Some(&yellow()));
    }

    #[test]
    fn diagonal_win() {
        let mut engine = standard();
        // Red ends up on (5,0), (4,1), (3,2), (2,3).
        let outcomes = play(&mut engine, &[0, 1, 1, 2, 2, 3, 2, 3, 3, 6, 3]);
        assert_eq!(
            outcomes.last(),
            Some(&Outcome::Won {
                player: red(),
                row: 2,
                column: 3
            })
        );
        for (row, column) in [(5, 0), (4, 1), (3, 2), (2, 3)] {
            assert_eq!(engine.cell_owner(row, column), Some(&red()));
        }
    }

    // Fills 7x6 with no four in a row anywhere. Rows go left to right,
    // except the third and sixth, which start one column over.
    fn tie_sequence() -> Vec<usize> {
        let mut columns = Vec::new();
        for layer in 0..6 {
            if layer % 3 == 2 {
                columns.extend([1, 2, 3, 4, 5, 6, 0]);
            } else {
                columns.extend(0..7);
            }
        }
        columns
    }

    #[test]
    fn tie_when_board_fills() {
        let mut engine = standard();
        let columns = tie_sequence();
        assert_eq!(columns.len(), 42);
        let outcomes = play(&mut engine, &columns);
        assert!(outcomes[..41]
            .iter()
            .all(|o| matches!(o, Outcome::Placed { .. })));
        assert_eq!(outcomes[41], Outcome::Tied { row: 0, column: 0 });
        assert_eq!(engine.status(), GameStatus::Tied);
        assert!(engine.is_terminal());
        assert_eq!(engine.winner(), None);
        assert!(engine.board().is_full());
    }

    #[test]
    fn win_on_last_cell_is_a_win() {
        // 4x3: yellow's last piece fills the board and completes the top row.
        let mut engine = GameEngine::new(red(), yellow(), 4, 3).unwrap();
        let outcomes = play(&mut engine, &[0, 2, 1, 2, 3, 2, 0, 0, 1, 1, 3, 3]);
        assert!(outcomes[..11]
            .iter()
            .all(|o| matches!(o, Outcome::Placed { .. })));
        assert_eq!(
            outcomes[11],
            Outcome::Won {
                player: yellow(),
                row: 0,
                column: 3
            }
        );
        assert!(engine.board().is_full());
        assert_eq!(engine.status(), GameStatus::Won { seat: Seat::Second });
    }

    #[test]
    fn drops_after_the_end_are_ignored() {
        for columns in [vec![0, 0, 1, 1, 2, 2, 3], tie_sequence()] {
            let mut engine = standard();
            play(&mut engine, &columns);
            assert!(engine.is_terminal());
            let board = engine.board().clone();
            let seat = engine.current_seat();
            let status = engine.status();
            for column in 0..8 {
                assert!(!engine.is_column_playable(column));
                assert_eq!(engine.drop_piece(column), Outcome::Ignored);
            }
            assert_eq!(engine.board(), &board);
            assert_eq!(engine.current_seat(), seat);
            assert_eq!(engine.status(), status);
        }
    }

    #[test]
    fn reset_starts_over() {
        let mut engine = standard();
        play(&mut engine, &[0, 0, 1, 1, 2, 2, 3]);
        assert!(engine.is_terminal());

        engine.reset();
        assert_eq!(engine.status(), GameStatus::Ongoing);
        assert_eq!(engine.current_player(), &red());
        assert_eq!(engine.winning_line(), None);
        assert_eq!(engine.board(), &Board::new(7, 6).unwrap());
        assert_eq!(engine.drop_piece(3), Outcome::Placed { row: 5, column: 3 });
    }

    #[test]
    fn outcome_json() {
        let placed = serde_json::to_value(Outcome::Placed { row: 5, column: 2 }).unwrap();
        assert_eq!(
            placed,
            serde_json::json!({"outcome": "placed", "row": 5, "column": 2})
        );

        let won = serde_json::to_value(Outcome::Won {
            player: red(),
            row: 2,
            column: 3,
        })
        .unwrap();
        assert_eq!(
            won,
            serde_json::json!({"outcome": "won", "player": {"label": "red"}, "row": 2, "column": 3})
        );

        let ignored: Outcome = serde_json::from_str(r#"{"outcome": "ignored"}"#).unwrap();
        assert_eq!(ignored, Outcome::Ignored);
    }

    #[test]
    fn engine_json() {
        let mut engine = GameEngine::new(red(), yellow(), 2, 2).unwrap();
        engine.drop_piece(1);
        let value = serde_json::to_value(&engine).unwrap();
        assert_eq!(value["current"], "second");
        assert_eq!(value["status"], serde_json::json!({"status": "ongoing"}));
        assert_eq!(value["board"]["width"], 2);
        assert_eq!(
            value["board"]["cells"],
            serde_json::json!([null, null, null, "first"])
        );
    }
}
