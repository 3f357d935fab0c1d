#[cfg(test)]
pub mod test {
    use anyhow::Result;
    use std::collections::HashSet;

    use crate::{
        audit::Audit,
        board::{Board, Cell, Move, Player},
        evaluation::{evaluate, utility},
        game::{Game, InvalidMove, Sides},
        rules::{has_won, is_terminal, winner, LINES},
        solver::{Pruning, Solver, INFINITY},
        CELLS, SEARCH_DEPTH,
    };

    // every position reachable from the empty board with X moving first
    fn reachable_boards() -> HashSet<Board> {
        fn visit(board: &mut Board, to_move: Player, seen: &mut HashSet<Board>) {
            if !seen.insert(*board) || is_terminal(board) {
                return;
            }
            let empty: Vec<Move> = board.empty_cells().collect();
            for cell in empty {
                board.place(cell.row, cell.col, to_move);
                visit(board, to_move.opponent(), seen);
                board.clear(cell.row, cell.col);
            }
        }

        let mut seen = HashSet::new();
        visit(&mut Board::new(), Player::First, &mut seen);
        seen
    }

    // the computer takes whichever side is due to move
    fn sides_to_move(board: &Board) -> Sides {
        let marks = |player| {
            board
                .rows()
                .flatten()
                .filter(|&&cell| cell == Cell::Mark(player))
                .count()
        };
        if marks(Player::First) == marks(Player::Second) {
            Sides::ai_first()
        } else {
            Sides::human_first()
        }
    }

    #[test]
    pub fn board_operations() -> Result<()> {
        let mut board = Board::new();
        assert_eq!(board.count_empty(), CELLS);
        assert!(board.is_empty(1, 2));

        board.place(1, 2, Player::First);
        assert!(!board.is_empty(1, 2));
        assert_eq!(board.cell(1, 2), Cell::Mark(Player::First));
        assert_eq!(board.count_empty(), CELLS - 1);

        board.clear(1, 2);
        assert_eq!(board, Board::new());

        let board = Board::from_layout("XO. | .X. | ..O")?;
        assert_eq!(board.cell(0, 1), Cell::Mark(Player::Second));
        assert_eq!(board.count_empty(), 5);
        assert_eq!(board.to_string(), "XO.\n.X.\n..O");
        assert_eq!(
            board.empty_cells().collect::<Vec<_>>(),
            vec![
                Move::new(0, 2),
                Move::new(1, 0),
                Move::new(1, 2),
                Move::new(2, 0),
                Move::new(2, 1)
            ]
        );
        Ok(())
    }

    #[test]
    pub fn layout_errors() {
        assert!(Board::from_layout("XO.").is_err());
        assert!(Board::from_layout("XO..X..O..").is_err());
        assert!(Board::from_layout("XO..Z..O.").is_err());
    }

    #[test]
    pub fn keypad_positions() {
        assert_eq!(Move::from_position(1), Some(Move::new(0, 0)));
        assert_eq!(Move::from_position(6), Some(Move::new(1, 2)));
        assert_eq!(Move::from_position(9), Some(Move::new(2, 2)));
        assert_eq!(Move::from_position(0), None);
        assert_eq!(Move::from_position(10), None);
        for position in 1..=CELLS {
            assert_eq!(Move::from_position(position).map(|m| m.position()), Some(position));
        }
    }

    #[test]
    pub fn every_line_wins() {
        for line in LINES.iter() {
            let mut board = Board::new();
            for &(row, col) in line {
                board.place(row, col, Player::Second);
            }
            assert!(has_won(&board, Player::Second));
            assert!(!has_won(&board, Player::First));
            assert!(is_terminal(&board));
            assert_eq!(winner(&board), Some(Player::Second));
        }
    }

    #[test]
    pub fn near_wins_are_not_wins() -> Result<()> {
        let board = Board::from_layout("XX. | OO. | ...")?;
        assert!(!has_won(&board, Player::First));
        assert!(!has_won(&board, Player::Second));
        assert!(!is_terminal(&board));
        assert_eq!(winner(&board), None);
        Ok(())
    }

    #[test]
    pub fn detector_over_reachable_boards() {
        let boards = reachable_boards();
        assert_eq!(boards.len(), 5478);

        for board in boards.iter() {
            let first = has_won(board, Player::First);
            let second = has_won(board, Player::Second);
            assert!(!(first && second), "both players won on\n{}", board);
            assert_eq!(is_terminal(board), first || second || board.count_empty() == 0);
        }
    }

    #[test]
    pub fn positional_weights() -> Result<()> {
        assert_eq!(evaluate(&Board::new(), Player::First), 0);
        assert_eq!(evaluate(&Board::from_layout("... | .X. | ...")?, Player::First), 8);
        assert_eq!(evaluate(&Board::from_layout("X.. | ... | ...")?, Player::First), 3);
        assert_eq!(evaluate(&Board::from_layout(".X. | ... | ...")?, Player::First), 2);
        // the opponent's marks are ignored
        assert_eq!(evaluate(&Board::from_layout("... | .X. | ...")?, Player::Second), 0);
        Ok(())
    }

    #[test]
    pub fn threats() -> Result<()> {
        // row with two marks and a gap
        assert_eq!(evaluate(&Board::from_layout("X.X | .O. | ...")?, Player::First), 7);
        // diagonal with the center open
        assert_eq!(evaluate(&Board::from_layout("X.. | ... | ..X")?, Player::First), 7);
        // a blocked line is not a threat
        assert_eq!(evaluate(&Board::from_layout("XXO | ... | ...")?, Player::First), 5);
        // corner and center, anti-diagonal blocked
        assert_eq!(evaluate(&Board::from_layout("XXO | .O. | X..")?, Player::Second), 11);
        // diagonal open at the far corner
        assert_eq!(evaluate(&Board::from_layout("X.. | .X. | ...")?, Player::First), 12);
        Ok(())
    }

    #[test]
    pub fn leaf_utility() -> Result<()> {
        let sides = Sides::human_first();

        let human_won = Board::from_layout("XXX | OO. | ...")?;
        assert_eq!(utility(&human_won, sides, sides.ai), -96);
        assert_eq!(utility(&human_won, sides, sides.human), -96);

        let ai_won = Board::from_layout("OOO | XX. | X..")?;
        assert_eq!(utility(&ai_won, sides, sides.human), 103);

        let open = Board::from_layout("X.. | .O. | ...")?;
        assert_eq!(utility(&open, sides, sides.human), -3);
        assert_eq!(utility(&open, sides, sides.ai), 8);
        Ok(())
    }

    #[test]
    pub fn empty_board_takes_center() {
        for &pruning in [Pruning::RowScoped, Pruning::Full].iter() {
            let mut board = Board::new();
            let mut solver = Solver::new(&mut board, Sides::ai_first()).with_pruning(pruning);
            assert_eq!(solver.solve(), Some((-3, Move::new(1, 1))));
            assert_eq!(solver.count_empty(), CELLS);
        }
    }

    #[test]
    pub fn node_counts() {
        let mut board = Board::new();
        let mut solver = Solver::new(&mut board, Sides::ai_first());
        solver.solve();
        assert_eq!(solver.node_count, 238);

        let mut solver = Solver::new(&mut board, Sides::ai_first()).with_pruning(Pruning::Full);
        solver.solve();
        assert_eq!(solver.node_count, 158);

        let mut board = Board::new();
        board.place(0, 0, Player::First);
        let mut solver = Solver::new(&mut board, Sides::human_first());
        assert_eq!(solver.solve(), Some((-6, Move::new(1, 1))));
        assert_eq!(solver.node_count, 214);
    }

    #[test]
    pub fn completes_own_row() -> Result<()> {
        for &pruning in [Pruning::RowScoped, Pruning::Full].iter() {
            let mut game = Game::from_board(Board::from_layout("XX. | ... | ...")?, Sides::ai_first())
                .with_pruning(pruning);
            assert_eq!(game.compute_ai_move()?, Move::new(0, 2));
            assert!(game.is_game_over());
            assert_eq!(game.winner(), Some(Player::First));
        }
        Ok(())
    }

    #[test]
    pub fn blocks_human_row() -> Result<()> {
        for &pruning in [Pruning::RowScoped, Pruning::Full].iter() {
            let mut board = Board::from_layout("XX. | .O. | ...")?;
            let mut solver = Solver::new(&mut board, Sides::human_first()).with_pruning(pruning);
            assert_eq!(solver.solve(), Some((-8, Move::new(0, 2))));
        }

        let mut game = Game::new(Sides::human_first());
        game.apply_human_move(0, 0)?;
        assert_eq!(game.compute_ai_move()?, Move::new(1, 1));
        game.apply_human_move(0, 1)?;
        assert_eq!(game.compute_ai_move()?, Move::new(0, 2));
        Ok(())
    }

    #[test]
    pub fn ties_go_to_first_move() -> Result<()> {
        // (0, 2) and (2, 0) both win with the same number of empty cells
        let mut board = Board::from_layout("XX. | X.O | .OO")?;
        let mut solver = Solver::new(&mut board, Sides::ai_first());
        assert_eq!(solver.solve(), Some((102, Move::new(0, 2))));
        Ok(())
    }

    #[test]
    pub fn leaves_carry_no_move() -> Result<()> {
        let mut board = Board::from_layout("X.. | .O. | ...")?;
        let mut solver = Solver::new(&mut board, Sides::human_first());
        let leaf = solver.minimax(0, true, -INFINITY, INFINITY);
        assert_eq!(leaf.best_move, None);
        assert_eq!(leaf.score, 8);
        assert_eq!(solver.node_count, 1);

        let mut finished = Board::from_layout("XXX | OO. | ...")?;
        let mut solver = Solver::new(&mut finished, Sides::human_first());
        assert_eq!(solver.solve(), None);
        Ok(())
    }

    #[test]
    pub fn search_restores_board() {
        for board in reachable_boards().iter().filter(|board| !is_terminal(board)) {
            let sides = sides_to_move(board);
            for depth in 0..=SEARCH_DEPTH {
                for &maximizing in [true, false].iter() {
                    let mut searched = *board;
                    let result = Solver::new(&mut searched, sides).minimax(depth, maximizing, -INFINITY, INFINITY);
                    assert_eq!(searched, *board);
                    assert_eq!(result.best_move.is_some(), depth > 0);
                    if let Some(chosen) = result.best_move {
                        assert!(board.is_empty(chosen.row, chosen.col));
                    }
                }
            }
        }
    }

    #[test]
    pub fn pruning_modes_agree() {
        for board in reachable_boards().iter().filter(|board| !is_terminal(board)) {
            let sides = sides_to_move(board);

            let mut row_board = *board;
            let mut row_solver = Solver::new(&mut row_board, sides);
            let row_result = row_solver.solve();
            let row_nodes = row_solver.node_count;

            let mut full_board = *board;
            let mut full_solver = Solver::new(&mut full_board, sides).with_pruning(Pruning::Full);
            let full_result = full_solver.solve();

            assert_eq!(row_result, full_result, "pruning modes disagree on\n{}", board);
            assert!(full_solver.node_count <= row_nodes);
        }
    }

    #[test]
    pub fn ai_move_only_touches_chosen_cell() -> Result<()> {
        for board in reachable_boards().iter().filter(|board| !is_terminal(board)) {
            let sides = sides_to_move(board);
            let mut game = Game::from_board(*board, sides);
            let chosen = game.compute_ai_move()?;

            assert!(board.is_empty(chosen.row, chosen.col));
            let mut expected = *board;
            expected.place(chosen.row, chosen.col, sides.ai);
            assert_eq!(*game.board(), expected);
        }
        Ok(())
    }

    #[test]
    pub fn invalid_human_moves() -> Result<()> {
        let mut game = Game::new(Sides::human_first());
        assert_eq!(
            game.apply_human_move(3, 0),
            Err(InvalidMove::OutOfRange { row: 3, col: 0 })
        );
        assert_eq!(
            game.apply_human_move(0, 7),
            Err(InvalidMove::OutOfRange { row: 0, col: 7 })
        );

        game.apply_human_move(2, 2)?;
        let err = game.apply_human_move(2, 2).unwrap_err();
        assert_eq!(err, InvalidMove::Occupied { row: 2, col: 2 });
        assert_eq!(err.to_string(), "Invalid move, cell (2, 2) is already taken");

        // rejected moves leave the board alone
        assert_eq!(game.board().count_empty(), CELLS - 1);
        Ok(())
    }

    #[test]
    pub fn draw_detection() -> Result<()> {
        let mut game = Game::from_board(Board::from_layout("XOX | XOO | OXX")?, Sides::human_first());
        assert!(game.is_game_over());
        assert_eq!(game.winner(), None);
        assert!(game.compute_ai_move().is_err());
        Ok(())
    }

    #[test]
    pub fn parse_pruning() {
        assert_eq!("row".parse::<Pruning>().ok(), Some(Pruning::RowScoped));
        assert_eq!(" Full ".parse::<Pruning>().ok(), Some(Pruning::Full));
        assert!("partial".parse::<Pruning>().is_err());
        assert_eq!(Pruning::default(), Pruning::RowScoped);
    }

    #[test]
    pub fn audit_human_first() -> Result<()> {
        for &pruning in [Pruning::RowScoped, Pruning::Full].iter() {
            let report = Audit::new(Sides::human_first()).with_pruning(pruning).run()?;
            assert_eq!(report.ai_wins, 370);
            assert_eq!(report.draws, 87);
            assert_eq!(report.human_wins, 0);
            assert!(report.losing_lines.is_empty());
            assert_eq!(report.games(), 457);
        }
        Ok(())
    }

    #[test]
    pub fn audit_ai_first() -> Result<()> {
        let report = Audit::new(Sides::ai_first()).run()?;
        assert_eq!(report.ai_wins, 72);
        assert_eq!(report.draws, 4);
        assert_eq!(report.human_wins, 0);
        Ok(())
    }
}
