use std::collections::VecDeque;

use coin_maze::{
    generate_maze, place_bonuses, resolve_exit, Grid, Level, MazeError, Pos, Settings,
};

fn reachable(grid: &Grid, start: Pos) -> Vec<bool> {
    let mut seen = vec![false; grid.cell_count()];
    let mut queue = VecDeque::from([start]);
    seen[grid.index(start)] = true;
    while let Some(pos) = queue.pop_front() {
        for next in grid.open_neighbors(pos) {
            if !seen[grid.index(next)] {
                seen[grid.index(next)] = true;
                queue.push_back(next);
            }
        }
    }
    seen
}

#[test]
fn every_open_cell_is_reachable_from_the_start() {
    for (width, height) in [(5, 5), (9, 21), (31, 7), (22, 16)] {
        for seed in 0..5 {
            let grid = generate_maze(width, height, seed).unwrap();
            let seen = reachable(&grid, Pos::new(1, 1));
            for pos in grid.open_cells() {
                assert!(seen[grid.index(pos)], "{pos} cut off in {width}x{height}");
            }
        }
    }
}

#[test]
fn generated_corner_exit_is_open() {
    for seed in 0..10 {
        let grid = generate_maze(21, 15, seed).unwrap();
        let corner = Pos::new(grid.width() - 2, grid.height() - 2);
        assert_eq!(resolve_exit(&grid, corner), Ok(corner));
    }
}

#[test]
fn identical_seeds_reproduce_grid_and_coins() {
    let first = generate_maze(25, 17, 31337).unwrap();
    let second = generate_maze(25, 17, 31337).unwrap();
    assert_eq!(first, second);

    let start = Pos::new(1, 1);
    assert_eq!(
        place_bonuses(&first, start, 4, 8).unwrap(),
        place_bonuses(&second, start, 4, 8).unwrap()
    );
}

#[test]
fn tiny_dimensions_are_rejected_not_clamped() {
    assert_eq!(
        generate_maze(1, 1, 0),
        Err(MazeError::InvalidDimensions {
            width: 1,
            height: 1
        })
    );
    assert!(Settings::new(21, 2, None).is_err());
}

#[test]
fn level_route_runs_from_start_to_exit() {
    for seed in 0..5 {
        let level = Level::generate(&Settings::default(), seed).unwrap();
        let path = level.solution.path();
        assert_eq!(path.first(), Some(&level.start));
        assert_eq!(path.last(), Some(&level.exit));
        for coin in level.bonuses.iter() {
            assert_ne!(coin, level.start);
            assert!(level.grid.is_open(coin));
        }
    }
}
