#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use ndarray::Array2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::rstest;
    use strum::VariantArray;

    use crate::board::Board;
    use crate::builder::{generate_level, LevelBuilder, DEFAULT_MAX_EMPTY_RATIO};
    use crate::error::{BoardError, BuilderInvalidReason, GenerationFailure};
    use crate::game::{Difficulty, Game};
    use crate::location::{Dimension, Location};
    use crate::neighbors::{compatible_symbols, required_connections, Requirements};
    use crate::randomize::{mutation_frequency, randomize_level};
    use crate::shape::Connections;
    use crate::symbol::Symbol;
    use crate::{check_level_completion, rotate_board_piece, rotate_board_piece_in_place};

    // a closed loop of four elbows
    const RING: &str = "0000
0^>0
0<_0
0000
";

    fn dims(rows: usize, cols: usize) -> (Dimension, Dimension) {
        (NonZero::new(rows).unwrap(), NonZero::new(cols).unwrap())
    }

    fn ring() -> Board {
        RING.parse().unwrap()
    }

    #[test]
    fn every_symbol_survives_every_rotation() {
        for symbol in Symbol::VARIANTS {
            for times in 0..4 {
                let rotated = Symbol::from_connections(symbol.connections().rotated_clockwise(times));
                assert!(rotated.is_some(), "{} turned {} times has no symbol", symbol, times);
            }
        }
    }

    #[rstest]
    fn rotation_is_periodic(#[values(0, 1, 2, 3, 4, 5, 7, 11)] times: usize) {
        for symbol in Symbol::VARIANTS {
            let connections = symbol.connections();
            assert_eq!(connections.rotated_clockwise(times), connections.rotated_clockwise(times % 4));
            assert_eq!(connections.rotated_clockwise(0), connections);
        }
    }

    #[rstest]
    fn rotation_round_trip(#[values(0, 1, 2, 3)] times: usize) {
        for symbol in Symbol::VARIANTS {
            assert_eq!(symbol.rotated(times).unwrap().rotated(4 - times).unwrap(), *symbol);
        }
    }

    #[test]
    fn catalog_round_trip() {
        for symbol in Symbol::VARIANTS {
            assert_eq!(Symbol::from_connections(symbol.connections()), Some(*symbol));
            assert_eq!(Symbol::try_from(symbol.as_char()), Ok(*symbol));
        }
    }

    #[test]
    fn catalog_is_a_bijection() {
        for (i, a) in Symbol::VARIANTS.iter().enumerate() {
            for b in &Symbol::VARIANTS[i + 1..] {
                assert_ne!(a.connections(), b.connections());
                assert_ne!(a.as_char(), b.as_char());
            }
        }
    }

    #[test]
    fn elbow_rotation() {
        let elbow = Symbol::try_from('<').unwrap();
        assert_eq!(elbow.rotated(1).unwrap().connections(), Connections::new(false, true, true, false));
        assert_eq!(elbow.rotated(1).unwrap().as_char(), '^');
        assert_eq!(elbow.rotated(4).unwrap(), elbow);
    }

    #[test]
    fn tee_rotation() {
        let tee = Symbol::TeeNoUp;
        let chars: String = (0..4).map(|times| tee.rotated(times).unwrap().as_char()).collect();
        assert_eq!(chars, "TAIH");
        assert_eq!(Symbol::Vertical.rotated(1), Ok(Symbol::Horizontal));
        assert_eq!(Symbol::Cross.rotated(3), Ok(Symbol::Cross));
    }

    #[test]
    fn unknown_and_unrealized() {
        assert_eq!(Symbol::try_from('x'), Err(BoardError::UnknownSymbol('x')));
        // a lone stub is no tile
        assert_eq!(Symbol::from_connections(Connections::new(true, false, false, false)), None);
    }

    #[test]
    fn requirements_from_placed_board() {
        let board = ring();
        let requirements = required_connections(&board.cells, Location(1, 1));
        assert_eq!(requirements, Requirements {
            top: Some(false),
            right: Some(true),
            bottom: Some(true),
            left: Some(false),
        });
        assert_eq!(compatible_symbols(requirements), vec![Symbol::ElbowRightDown]);
    }

    #[test]
    fn unplaced_neighbors_constrain_nothing() {
        let mut grid: Array2<Option<Symbol>> = Array2::from_elem((4, 4), Some(Symbol::Empty));
        for index in [(1, 1), (1, 2), (2, 1), (2, 2)] {
            grid[index] = None;
        }

        let requirements = required_connections(&grid, Location(1, 1));
        assert_eq!(requirements.right, None);
        assert_eq!(requirements.bottom, None);

        let mut symbols = compatible_symbols(requirements);
        symbols.sort();
        assert_eq!(symbols, vec![Symbol::ElbowRightDown, Symbol::Empty]);
    }

    #[test]
    fn dead_end_admits_no_tile() {
        let mut grid: Array2<Option<Symbol>> = Array2::from_elem((3, 4), Some(Symbol::Empty));
        grid[(1, 1)] = Some(Symbol::Horizontal);
        grid[(1, 2)] = None;

        // only a stub to the left would fit, which no tile has
        assert!(compatible_symbols(required_connections(&grid, Location(1, 2))).is_empty());
    }

    #[test]
    fn unconstrained_admits_every_tile() {
        assert_eq!(compatible_symbols(Requirements::default()).len(), Symbol::VARIANTS.len());
    }

    #[test]
    fn display_round_trip() {
        let board = ring();
        assert_eq!(format!("{}", board), RING);
        assert_eq!(board.dims(), dims(2, 2));
        assert_eq!(board.to_rows()[1], vec!["0", "^", ">", "0"]);
        assert_eq!(Board::from_rows(&["0000", "0^>0", "0<_0", "0000"]).unwrap(), board);
    }

    #[test]
    fn decode_errors() {
        assert_eq!(Board::from_rows(&["000", "0|0", "00"]), Err(BoardError::Ragged { row: 2, expected: 3, found: 2 }));
        assert_eq!(Board::from_rows(&["00", "00"]), Err(BoardError::TooSmall));
        assert_eq!(Board::from_rows::<&str>(&[]), Err(BoardError::TooSmall));
        assert_eq!(Board::from_rows(&["000", "0?0", "000"]), Err(BoardError::UnknownSymbol('?')));
        assert_eq!(Board::from_rows(&["0|0", "0|0", "000"]), Err(BoardError::BorderNotEmpty(Location(0, 1))));
    }

    #[test]
    fn decode_from_cells() {
        let board = ring();
        assert_eq!(Board::from_cells(&board.to_rows()).unwrap(), board);

        let split = [vec!["0", "0", "0"], vec!["0|", "", "0"], vec!["0", "0", "0"]];
        assert_eq!(
            Board::from_cells(&split),
            Err(BoardError::MalformedCell { location: Location(1, 0), cell: "0|".to_owned() }),
        );

        let blank = [vec!["0", "0", "0"], vec!["0", "", "0"], vec!["0", "0", "0"]];
        assert_eq!(
            Board::from_cells(&blank),
            Err(BoardError::MalformedCell { location: Location(1, 1), cell: String::new() }),
        );
        assert_eq!(
            BoardError::MalformedCell { location: Location(1, 1), cell: String::new() }.to_string(),
            "cell (1, 1) holds \"\", expected a single tile symbol",
        );

        // decoding still checks the assembled rows
        let short = [vec!["0", "0", "0"], vec!["0", "|", "0"], vec!["0", "0"]];
        assert_eq!(Board::from_cells(&short), Err(BoardError::Ragged { row: 2, expected: 3, found: 2 }));
    }

    #[test]
    fn error_display() {
        assert_eq!(BoardError::UnknownSymbol('x').to_string(), "unknown tile symbol 'x'");
        assert_eq!(BoardError::OutOfBounds(Location(9, 2)).to_string(), "location (9, 2) is outside the board");
        assert_eq!(
            BoardError::NoMatchingSymbol(Connections::new(true, false, false, false)).to_string(),
            "no tile symbol has connections [T...]",
        );
        assert_eq!(
            GenerationFailure::AttemptsExhausted { attempts: 3 }.to_string(),
            "no fit board found in 3 attempts",
        );
    }

    #[test]
    fn completion() {
        assert!(ring().is_complete());
        assert!(check_level_completion(&ring()));
        assert!("000\n000\n000".parse::<Board>().unwrap().is_complete());

        // nothing above to meet the pipe
        let lonely: Board = "000\n0|0\n000".parse().unwrap();
        assert!(!lonely.is_complete());

        let open: Board = "0000\n0^^0\n0<_0\n0000".parse().unwrap();
        assert!(!open.is_complete());
    }

    #[test]
    fn complete_is_not_single_system() {
        let board: Board = "000000
0^>^>0
0<_<_0
000000".parse().unwrap();

        assert!(board.is_complete());
        assert_eq!(board.pipe_system_len(), 4);
        assert_eq!(board.empty_count(), 0);
    }

    #[test]
    fn pipe_system_ignores_unmatched_stubs() {
        let board: Board = "00000
0^>00
0<^00
00000".parse().unwrap();

        assert_eq!(board.pipe_system_len(), 3);
        assert_eq!(board.empty_count(), 2);
        assert_eq!("000\n000\n000".parse::<Board>().unwrap().pipe_system_len(), 0);
    }

    #[test]
    fn rotate_copy_and_in_place() {
        let board = ring();
        let rotated = rotate_board_piece(&board, Location(1, 1), 1).unwrap();
        assert_eq!(format!("{}", board), RING);
        assert_eq!(format!("{}", rotated), "0000
0>>0
0<_0
0000
");
        assert!(!rotated.is_complete());

        let mut in_place = rotated.clone();
        rotate_board_piece_in_place(&mut in_place, Location(1, 1), 3).unwrap();
        assert_eq!(in_place, board);

        assert_eq!(board.rotated(Location(4, 0), 1), Err(BoardError::OutOfBounds(Location(4, 0))));
        // the border may be turned, it stays empty
        assert_eq!(board.rotated(Location(0, 0), 1).unwrap(), board);
    }

    #[test]
    fn single_cell_level() {
        let mut rng = StdRng::seed_from_u64(7);
        let board = generate_level(NonZero::new(1).unwrap(), NonZero::new(1).unwrap(), &mut rng);
        assert_eq!(format!("{}", board), "000
000
000
");
        assert!(board.is_complete());
    }

    #[rstest]
    #[case(1, 4)]
    #[case(4, 1)]
    #[case(2, 2)]
    #[case(2, 3)]
    #[case(3, 3)]
    #[case(4, 4)]
    #[case(7, 5)]
    fn generated_levels_are_fit(#[case] rows: usize, #[case] cols: usize) {
        for seed in 0..3 {
            let mut rng = StdRng::seed_from_u64(seed);
            let board = LevelBuilder::with_dims(dims(rows, cols)).build(&mut rng).unwrap();
            let area = rows * cols;

            assert_eq!(board.dims(), dims(rows, cols));
            assert!(board.is_complete(), "seed {} produced an unsolved board\n{}", seed, board);
            if rows > 1 && cols > 1 {
                assert!(board.empty_count() as f64 <= DEFAULT_MAX_EMPTY_RATIO * area as f64, "too empty\n{}", board);
            }
            assert_eq!(board.pipe_system_len() + board.empty_count(), area, "more than one system\n{}", board);

            let rows_out = board.to_rows();
            assert!(rows_out.first().unwrap().iter().chain(rows_out.last().unwrap()).all(|cell| cell == "0"));
            assert!(rows_out.iter().all(|row| row.first().unwrap() == "0" && row.last().unwrap() == "0"));
        }
    }

    #[test]
    fn generation_is_reproducible() {
        let a = generate_level(NonZero::new(4).unwrap(), NonZero::new(3).unwrap(), &mut StdRng::seed_from_u64(42));
        let b = generate_level(NonZero::new(4).unwrap(), NonZero::new(3).unwrap(), &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn strict_builder() {
        let mut rng = StdRng::seed_from_u64(3);
        let board = LevelBuilder::with_dims(dims(2, 3))
            .max_empty_ratio(0.0)
            .max_attempts(NonZero::new(10_000).unwrap())
            .build(&mut rng)
            .unwrap();
        assert_eq!(board.empty_count(), 0);
        assert_eq!(board.pipe_system_len(), 6);
    }

    #[test]
    fn attempt_cap_reports_exhaustion() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = LevelBuilder::with_dims(dims(6, 6))
            .max_empty_ratio(0.0)
            .max_attempts(NonZero::new(1).unwrap())
            .build(&mut rng);
        assert_eq!(result, Err(GenerationFailure::AttemptsExhausted { attempts: 1 }));
        assert_eq!(
            GenerationFailure::AttemptsExhausted { attempts: 1 }.to_string(),
            "no fit board found in 1 attempts",
        );
    }

    #[test]
    fn invalid_builder() {
        let mut builder = LevelBuilder::default();
        assert!(builder.is_valid().is_none());

        builder.max_empty_ratio(1.5).max_empty_ratio(0.2);
        assert_eq!(builder.is_valid(), Some(&vec![BuilderInvalidReason::EmptyRatioOutOfRange]));
        assert_eq!(
            builder.build(&mut StdRng::seed_from_u64(0)),
            Err(GenerationFailure::Invalid(vec![BuilderInvalidReason::EmptyRatioOutOfRange])),
        );
    }

    #[test]
    fn mutation_frequency_counts_featureless_tiles() {
        assert_eq!(mutation_frequency(&ring(), &ring()), 0.0);

        let empty: Board = "000\n000\n000".parse().unwrap();
        assert_eq!(mutation_frequency(&empty, &empty), 1.0);

        let turned = ring().rotated(Location(2, 2), 1).unwrap();
        assert_eq!(mutation_frequency(&ring(), &turned), 0.25);
    }

    #[rstest]
    fn randomize_reaches_fraction(#[values(0.0, 0.3, 0.5, 0.8, 1.0)] fraction: f64) {
        let mut rng = StdRng::seed_from_u64(11);
        let solved = LevelBuilder::with_dims(dims(3, 3)).build(&mut rng).unwrap();
        let before = solved.clone();

        let scrambled = randomize_level(&solved, fraction, &mut rng).unwrap();
        assert_eq!(solved, before);
        assert_eq!(scrambled.dims(), solved.dims());
        assert!(mutation_frequency(&solved, &scrambled) >= fraction);

        for location in solved.interior() {
            let original = solved.get(location).unwrap();
            let now = scrambled.get(location).unwrap();
            assert!((0..4).any(|times| original.rotated(times).unwrap() == now));
        }
        for location in [Location(0, 0), Location(4, 4), Location(0, 3), Location(2, 0)] {
            assert_eq!(scrambled.get(location), Some(Symbol::Empty));
        }
    }

    #[test]
    fn randomize_rejects_bad_fraction() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(randomize_level(&ring(), 1.5, &mut rng), Err(BoardError::InvalidMutationFraction(1.5)));
        assert!(randomize_level(&ring(), f64::NAN, &mut rng).is_err());
        assert!(randomize_level(&ring(), -0.1, &mut rng).is_err());
    }

    #[test]
    fn difficulty_presets() {
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!(Difficulty::Hard.to_string(), "hard");
        assert_eq!(Difficulty::default().mutation_fraction(), 0.8);
        assert!(Difficulty::VARIANTS.windows(2).all(|pair| pair[0].mutation_fraction() < pair[1].mutation_fraction()));
        assert!("extreme".parse::<Difficulty>().is_err());
    }

    #[test]
    fn play_to_win() {
        // (1, 1) is one quarter turn past solved
        let mut game = Game::from_board(ring().rotated(Location(1, 1), 1).unwrap());
        assert!(!game.is_won());

        assert_eq!(game.click(Location(1, 1)), Ok(false));
        assert_eq!(game.click(Location(1, 1)), Ok(false));
        assert_eq!(game.click(Location(1, 1)), Ok(true));
        assert_eq!(format!("{}", game.board()), RING);

        // clicks after the win change nothing
        assert_eq!(game.click(Location(2, 2)), Ok(true));
        assert_eq!(format!("{}", game.board()), RING);
    }

    #[test]
    fn double_click() {
        let mut game = Game::from_board(ring().rotated(Location(2, 1), 2).unwrap());
        assert_eq!(game.double_click(Location(2, 1)), Ok(true));
        assert!(game.is_won());

        let mut game = Game::from_board(ring().rotated(Location(2, 1), 1).unwrap());
        assert_eq!(game.click(Location(7, 7)), Err(BoardError::OutOfBounds(Location(7, 7))));
    }

    #[test]
    fn new_game() {
        let mut rng = StdRng::seed_from_u64(5);
        let game = Game::new(NonZero::new(3).unwrap(), NonZero::new(4).unwrap(), Difficulty::Medium, &mut rng).unwrap();
        assert_eq!(game.board().dims(), dims(3, 4));
        assert_eq!(game.is_won(), game.board().is_complete());

        let game = Game::new(NonZero::new(1).unwrap(), NonZero::new(1).unwrap(), Difficulty::Easy, &mut rng).unwrap();
        assert!(game.is_won());
    }
}
