#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::num::NonZero;
    use std::time::Duration;

    use strum::VariantArray;
    use unordered_pair::UnorderedPair;

    use crate::builder::{BoardBuilder, BuilderInvalidReason};
    use crate::cell::Contact;
    use crate::direction::Direction;
    use crate::graph::{roll, Roll, RollGraph, WrongHole};
    use crate::location::Location;
    use crate::movement::{Collision, Movement};
    use crate::solver::{SearchLimits, Solver};
    use crate::Board;

    fn one_wall_board() -> Board {
        BoardBuilder::with_size(NonZero::new(4).unwrap())
            .add_ball(Location(2, 2), Location(4, 4))
            .disconnect(UnorderedPair(Location(2, 4), Location(3, 4)))
            .build()
            .unwrap()
    }

    // apply tilts one after another, panicking on anything but an ordinary move
    fn play(board: &Board, graph: &RollGraph, tilts: &[Direction]) -> Movement {
        let mut state = board.initial_movement();
        for to in tilts {
            let rolls = graph.tilt(*to, state.occupied(), state.open_holes()).unwrap();
            state = state.after(*to);
            for roll in rolls {
                state.advance_ball(roll.ball, roll.from, roll.to).unwrap();
            }
        }

        state
    }

    // step cell by cell until a wall, treating every hole as filled
    fn walk(board: &Board, from: Location, to: Direction) -> (Location, Vec<Location>) {
        let mut at = from;
        let mut holes = Vec::new();
        while !board.cell(at).unwrap().has_wall(to) {
            at = to.attempt_from(at);
            if board.cell(at).unwrap().hole().is_some() {
                holes.push(at);
            }
        }

        (at, holes)
    }

    #[test]
    fn border_walls() {
        let board = BoardBuilder::with_size(NonZero::new(3).unwrap())
            .add_ball(Location(1, 1), Location(3, 3))
            .build()
            .unwrap();

        for x in 1..=3 {
            for y in 1..=3 {
                let cell = board.cell(Location(x, y)).unwrap();
                assert_eq!(cell.has_wall(Direction::North), y == 1);
                assert_eq!(cell.has_wall(Direction::South), y == 3);
                assert_eq!(cell.has_wall(Direction::West), x == 1);
                assert_eq!(cell.has_wall(Direction::East), x == 3);
            }
        }

        assert!(board.cell(Location(0, 1)).is_none());
        assert!(board.cell(Location(4, 2)).is_none());
    }

    #[test]
    fn internal_walls_are_symmetric() {
        let board = BoardBuilder::with_size(NonZero::new(4).unwrap())
            .add_ball(Location(1, 1), Location(4, 4))
            .disconnect(UnorderedPair(Location(2, 3), Location(2, 2)))
            .disconnect_around(Location(3, 3), vec![Direction::East, Direction::South, Direction::East])
            .build()
            .unwrap();

        assert!(board.cell(Location(2, 2)).unwrap().has_wall(Direction::South));
        assert!(board.cell(Location(2, 3)).unwrap().has_wall(Direction::North));
        assert_eq!(board.cell(Location(3, 3)).unwrap().walls().collect::<Vec<_>>(), vec![Direction::South, Direction::East]);
        assert_eq!(board.cell(Location(4, 3)).unwrap().walls().collect::<Vec<_>>(), vec![Direction::West, Direction::East]);
        assert_eq!(board.cell(Location(3, 4)).unwrap().walls().collect::<Vec<_>>(), vec![Direction::North, Direction::South]);
        assert_eq!(board.cell(Location(4, 4)).unwrap().hole(), Some(1));
    }

    #[test]
    fn display_board() {
        let board = BoardBuilder::with_size(NonZero::new(3).unwrap())
            .add_ball(Location(1, 1), Location(3, 3))
            .disconnect(UnorderedPair(Location(2, 2), Location(3, 2)))
            .build()
            .unwrap();

        assert_eq!(format!("{}", board), "+-+-+-+
|A . .|
+ + + +
|. .|.|
+ + + +
|. . a|
+-+-+-+
");
    }

    #[test]
    fn render_movement() {
        let board = one_wall_board();
        let graph = board.roll_graph();

        assert_eq!(format!("{}", board), "+-+-+-+-+
|. . . .|
+ + + + +
|. A . .|
+ + + + +
|. . . .|
+ + + + +
|. .|. a|
+-+-+-+-+
");

        assert_eq!(board.render(&play(&board, &graph, &[Direction::East])), "+-+-+-+-+
|. . . .|
+ + + + +
|. . . A|
+ + + + +
|. . . .|
+ + + + +
|. .|. a|
+-+-+-+-+
");

        assert_eq!(board.render(&play(&board, &graph, &[Direction::East, Direction::South])), "+-+-+-+-+
|. . . .|
+ + + + +
|. . . .|
+ + + + +
|. . . .|
+ + + + +
|. .|. .|
+-+-+-+-+
");
    }

    #[test]
    fn builder_invalid_reasons() {
        let size = NonZero::new(4).unwrap();

        assert_eq!(BoardBuilder::with_size(size).build().err(), Some(vec![BuilderInvalidReason::NoBalls]));

        let mut builder = BoardBuilder::with_size(size);
        builder.add_ball(Location(5, 1), Location(2, 2));
        assert_eq!(builder.is_valid(), Some(&vec![BuilderInvalidReason::FeatureOutOfBounds]));
        // inert once invalid
        builder.add_ball(Location(1, 1), Location(1, 1));
        assert_eq!(builder.build().err(), Some(vec![BuilderInvalidReason::FeatureOutOfBounds]));

        let mut builder = BoardBuilder::with_size(size);
        builder.add_ball(Location(1, 1), Location(1, 1));
        assert_eq!(builder.is_valid(), Some(&vec![BuilderInvalidReason::BallOnHole]));

        let mut builder = BoardBuilder::with_size(size);
        builder.disconnect(UnorderedPair(Location(1, 1), Location(2, 2)));
        assert_eq!(builder.is_valid(), Some(&vec![BuilderInvalidReason::NotAdjacent]));

        let mut builder = BoardBuilder::with_size(size);
        builder.disconnect(UnorderedPair(Location(1, 1), Location(2, 1)))
            .disconnect(UnorderedPair(Location(2, 1), Location(1, 1)));
        assert_eq!(builder.is_valid(), Some(&vec![BuilderInvalidReason::Duplicate]));

        let mut builder = BoardBuilder::with_size(size);
        builder.disconnect_around(Location(4, 4), vec![Direction::East, Direction::South]);
        assert_eq!(builder.is_valid(), None);
    }

    #[test]
    fn pop_ball() {
        let board = BoardBuilder::default()
            .add_ball(Location(1, 1), Location(4, 4))
            .add_ball(Location(2, 2), Location(3, 3))
            .pop_ball()
            .build()
            .unwrap();

        assert_eq!(board.balls(), &[Location(1, 1)]);
        assert_eq!(board.holes(), &[Location(4, 4)]);
        assert_eq!(board.cell(Location(3, 3)).unwrap().hole(), None);
    }

    #[test]
    fn roll_graph_matches_walk() {
        let board = BoardBuilder::with_size(NonZero::new(5).unwrap())
            .add_ball(Location(1, 1), Location(3, 1))
            .add_ball(Location(5, 5), Location(3, 3))
            .add_ball(Location(2, 4), Location(3, 2))
            .disconnect(UnorderedPair(Location(2, 2), Location(3, 2)))
            .disconnect(UnorderedPair(Location(4, 4), Location(4, 5)))
            .disconnect(UnorderedPair(Location(1, 3), Location(2, 3)))
            .build()
            .unwrap();
        let graph = board.roll_graph();

        for x in 1..=5 {
            for y in 1..=5 {
                for to in Direction::VARIANTS {
                    let node = &graph[Location(x, y)];
                    assert_eq!((node.stop(*to), node.holes(*to).to_vec()), walk(&board, Location(x, y), *to));
                }
            }
        }
    }

    #[test]
    fn single_roll() {
        let board = BoardBuilder::default()
            .add_ball(Location(1, 1), Location(3, 1))
            .add_ball(Location(1, 4), Location(4, 4))
            .build()
            .unwrap();

        assert_eq!(roll(&board, Location(1, 1), Direction::East), (Contact::FallOrPass, Location(3, 1)));
        assert_eq!(roll(&board, Location(3, 1), Direction::East), (Contact::Stop, Location(4, 1)));
        assert_eq!(roll(&board, Location(1, 4), Direction::East), (Contact::FallOrStop, Location(4, 4)));
        assert_eq!(roll(&board, Location(4, 4), Direction::South), (Contact::Stop, Location(4, 4)));
        assert_eq!(roll(&board, Location(4, 4), Direction::North), (Contact::Stop, Location(4, 1)));
    }

    #[test]
    fn display_roll_graph() {
        let board = BoardBuilder::with_size(NonZero::new(2).unwrap())
            .add_ball(Location(1, 1), Location(2, 2))
            .build()
            .unwrap();

        assert_eq!(format!("{}", board.roll_graph()), "(1, 1): N (1, 1) W (1, 1) S (1, 2) E (2, 1)
(1, 2): N (1, 1) W (1, 2) S (1, 2) E (2, 2)
\tholes E: (2, 2)
(2, 1): N (2, 1) W (1, 1) S (2, 2) E (2, 1)
\tholes S: (2, 2)
(2, 2): N (2, 1) W (1, 2) S (2, 2) E (2, 2)
");
    }

    #[test]
    fn consecutive_holes_and_wrong_hole() {
        let board = BoardBuilder::default()
            .add_ball(Location(1, 1), Location(3, 1))
            .add_ball(Location(1, 2), Location(2, 1))
            .build()
            .unwrap();
        let graph = board.roll_graph();

        assert_eq!(graph[Location(1, 1)].holes(Direction::East), &[Location(2, 1), Location(3, 1)]);
        assert_eq!(graph[Location(1, 1)].stop(Direction::East), Location(4, 1));

        let initial = board.initial_movement();
        assert_eq!(
            graph.tilt(Direction::East, initial.occupied(), initial.open_holes()),
            Err(WrongHole { ball: 1, owner: 2, hole: Location(2, 1) })
        );

        // with the second hole filled, the first ball rolls over it into its own
        assert_eq!(
            graph.tilt(Direction::East, &BTreeMap::from([(Location(1, 1), 1)]), &BTreeMap::from([(Location(3, 1), 1)])),
            Ok(vec![Roll { ball: 1, from: Location(1, 1), to: Location(3, 1), sunk: true }])
        );
    }

    #[test]
    fn jamming() {
        let board = BoardBuilder::default()
            .add_ball(Location(1, 1), Location(1, 4))
            .add_ball(Location(2, 1), Location(2, 4))
            .build()
            .unwrap();
        let graph = board.roll_graph();
        let initial = board.initial_movement();

        assert_eq!(graph.tilt(Direction::East, initial.occupied(), initial.open_holes()), Ok(vec![
            Roll { ball: 2, from: Location(2, 1), to: Location(4, 1), sunk: false },
            Roll { ball: 1, from: Location(1, 1), to: Location(3, 1), sunk: false },
        ]));

        assert_eq!(graph.tilt(Direction::West, initial.occupied(), initial.open_holes()), Ok(vec![
            Roll { ball: 1, from: Location(1, 1), to: Location(1, 1), sunk: false },
            Roll { ball: 2, from: Location(2, 1), to: Location(2, 1), sunk: false },
        ]));

        let east = play(&board, &graph, &[Direction::East]);
        assert_eq!(east.occupied(), &BTreeMap::from([(Location(3, 1), 1), (Location(4, 1), 2)]));
        assert!(!east.is_looped());

        let west = play(&board, &graph, &[Direction::West]);
        assert_eq!(west.occupied(), initial.occupied());
        assert!(west.is_looped());
    }

    #[test]
    fn hole_closes_within_tilt() {
        let board = BoardBuilder::default()
            .add_ball(Location(2, 1), Location(3, 1))
            .add_ball(Location(1, 1), Location(4, 1))
            .build()
            .unwrap();

        // the first ball sinks before the second rolls over its hole
        let solution = board.solve().unwrap();
        assert_eq!(solution.sequences(), &[vec![Direction::East]]);
    }

    #[test]
    fn pile_up_behind_sunk_ball() {
        let board = BoardBuilder::with_size(NonZero::new(5).unwrap())
            .add_ball(Location(1, 1), Location(1, 5))
            .add_ball(Location(2, 1), Location(2, 5))
            .add_ball(Location(3, 1), Location(4, 1))
            .build()
            .unwrap();
        let graph = board.roll_graph();
        let initial = board.initial_movement();

        assert_eq!(graph.tilt(Direction::East, initial.occupied(), initial.open_holes()), Ok(vec![
            Roll { ball: 3, from: Location(3, 1), to: Location(4, 1), sunk: true },
            Roll { ball: 2, from: Location(2, 1), to: Location(5, 1), sunk: false },
            Roll { ball: 1, from: Location(1, 1), to: Location(4, 1), sunk: false },
        ]));

        let east = play(&board, &graph, &[Direction::East]);
        assert_eq!(east.occupied(), &BTreeMap::from([(Location(4, 1), 1), (Location(5, 1), 2)]));
        assert_eq!(east.open_holes(), &BTreeMap::from([(Location(1, 5), 1), (Location(2, 5), 2)]));
    }

    #[test]
    fn empty_table() {
        let board = one_wall_board();
        let graph = board.roll_graph();
        let empty = Movement::initial(BTreeMap::new(), BTreeMap::new());

        assert!(empty.is_won());
        for to in Direction::VARIANTS {
            assert_eq!(graph.tilt(*to, empty.occupied(), empty.open_holes()), Ok(vec![]));

            let next = empty.after(*to);
            assert!(next.is_won());
            assert_eq!(next.occupied(), empty.occupied());
            assert_eq!(next.tilt(), Some(*to));
        }
    }

    #[test]
    fn movement_tracking() {
        let mut state = Movement::initial(
            BTreeMap::from([(Location(1, 1), 1), (Location(2, 1), 2)]),
            BTreeMap::from([(Location(4, 4), 1), (Location(3, 3), 2)]),
        );
        assert!(state.is_initial());

        state = state.after(Direction::South);
        assert!(!state.is_initial());
        assert_eq!(state.advance_ball(1, Location(1, 1), Location(2, 1)), Err(Collision { ball: 1, location: Location(2, 1) }));
        assert_eq!(state.advance_ball(1, Location(1, 1), Location(3, 3)), Err(Collision { ball: 1, location: Location(3, 3) }));

        let mut stuck = state.after(Direction::West);
        stuck.advance_ball(2, Location(2, 1), Location(2, 1)).unwrap();
        assert!(stuck.is_looped());

        state.advance_ball(2, Location(2, 1), Location(2, 4)).unwrap();
        assert!(!state.is_looped());

        // sinking counts as progress
        let mut sunk = state.after(Direction::East);
        sunk.advance_ball(1, Location(1, 1), Location(4, 4)).unwrap();
        assert!(!sunk.is_looped());
        assert_eq!(sunk.open_holes(), &BTreeMap::from([(Location(3, 3), 2)]));
        assert_eq!(sunk.occupied(), &BTreeMap::from([(Location(2, 4), 2)]));
    }

    #[test]
    fn loop_guard_terminates() {
        let board = BoardBuilder::default()
            .add_ball(Location(1, 1), Location(2, 2))
            .add_ball(Location(4, 4), Location(3, 3))
            .disconnect_around(Location(1, 1), vec![Direction::East, Direction::South])
            .disconnect_around(Location(4, 4), vec![Direction::North, Direction::West])
            .build()
            .unwrap();

        let solution = board.solve().unwrap();
        assert!(solution.is_empty());
        assert!(solution.is_exhaustive());
        assert_eq!(solution.stats().lines_expanded, 1);
        assert_eq!(solution.stats().loops, 4);
    }

    #[test]
    fn solve_one_wall() {
        let solution = one_wall_board().solve().unwrap();

        assert_eq!(solution.sequences(), &[vec![Direction::East, Direction::South]]);
        assert_eq!(solution.moves(), Some(2));
        assert!(solution.is_exhaustive());
        assert_eq!(format!("{}", solution), "E S\n");
    }

    #[test]
    fn solve_walled_in() {
        let board = BoardBuilder::default()
            .add_ball(Location(1, 1), Location(4, 4))
            .disconnect_around(Location(1, 1), vec![Direction::East, Direction::South])
            .build()
            .unwrap();

        let solution = board.solve().unwrap();
        assert!(solution.is_empty());
        assert_eq!(solution.moves(), None);
        assert!(solution.is_exhaustive());
        assert_eq!(format!("{}", solution), "");
    }

    #[test]
    fn solve_keeps_ties() {
        let board = BoardBuilder::default()
            .add_ball(Location(1, 1), Location(4, 4))
            .build()
            .unwrap();

        let solution = board.solve().unwrap();
        assert_eq!(solution.sequences(), &[
            vec![Direction::South, Direction::East],
            vec![Direction::East, Direction::South],
        ]);
        assert_eq!(format!("{}", solution), "S E\nE S\n");
    }

    #[test]
    fn solve_two_balls_at_once() {
        let board = BoardBuilder::default()
            .add_ball(Location(1, 1), Location(4, 1))
            .add_ball(Location(1, 4), Location(4, 4))
            .build()
            .unwrap();

        let solution = board.solve().unwrap();
        assert_eq!(solution.sequences(), &[vec![Direction::East]]);
        assert_eq!(solution.stats().solutions_found, 1);
    }

    #[test]
    fn solve_within_limits() {
        let board = one_wall_board();

        let short = Solver::new(&board, SearchLimits::default().with_max_moves(1)).solve().unwrap();
        assert!(short.is_empty());
        assert!(!short.is_exhaustive());

        let enough = Solver::new(&board, SearchLimits::default().with_max_moves(2)).solve().unwrap();
        assert_eq!(enough.sequences(), &[vec![Direction::East, Direction::South]]);
        assert!(enough.is_exhaustive());
        // no clock is read without a time limit
        assert_eq!(enough.stats().time_total, Duration::ZERO);

        let patient = Solver::new(&board, SearchLimits::default().with_time_limit(Duration::from_secs(60))).solve().unwrap();
        assert_eq!(patient.sequences(), &[vec![Direction::East, Direction::South]]);
        assert!(patient.is_exhaustive());

        let rushed = Solver::new(&board, SearchLimits::default().with_time_limit(Duration::ZERO)).solve().unwrap();
        assert!(rushed.is_empty());
        assert!(!rushed.is_exhaustive());
    }

    #[test]
    fn direction_symbols() {
        assert_eq!(Direction::VARIANTS, &[Direction::North, Direction::West, Direction::South, Direction::East]);
        assert_eq!(Direction::VARIANTS.iter().map(|to| to.to_string()).collect::<Vec<_>>(), vec!["N", "W", "S", "E"]);
        assert_eq!("S".parse::<Direction>().unwrap(), Direction::South);
        assert!("X".parse::<Direction>().is_err());
        assert_eq!(Direction::direction_to(Location(2, 2), Location(2, 1)), Some(Direction::North));
        assert_eq!(Direction::direction_to(Location(2, 2), Location(3, 3)), None);
    }
}
