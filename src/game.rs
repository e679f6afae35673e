use crate::grid::{Dir, Pos};
use crate::level::Level;
use crate::solver::COIN_DISCOUNT;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Blocked,
    Moved,
    Collected,
    Won,
}

/// Interactive walk through a [`Level`].
///
/// Owns the live coin list; the level's own bonus set and optimal route stay
/// as they were when the level was built.
pub struct Playthrough {
    level: Level,
    player: Pos,
    coins: Vec<Pos>,
    distance: u32,
    won: bool,
    show_help: bool,
}

impl Playthrough {
    pub fn new(level: Level) -> Self {
        let coins = level.bonuses.iter().collect();
        Self {
            player: level.start,
            level,
            coins,
            distance: 0,
            won: false,
            show_help: false,
        }
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn player(&self) -> Pos {
        self.player
    }

    pub fn coins_left(&self) -> &[Pos] {
        &self.coins
    }

    /// Travelled distance for display; coin discounts never take it below 0.
    pub fn distance(&self) -> u32 {
        self.distance
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    pub fn toggle_help(&mut self) {
        if !self.won {
            self.show_help = !self.show_help;
        }
    }

    pub fn try_move(&mut self, dir: Dir) -> MoveOutcome {
        if self.won {
            return MoveOutcome::Blocked;
        }
        let next = match self.level.grid.step(self.player, dir) {
            Some(next) if self.level.grid.is_open(next) => next,
            _ => return MoveOutcome::Blocked,
        };

        self.player = next;
        self.distance += 1;
        let collected = self.consume_coin();

        if self.player == self.level.exit {
            self.won = true;
            MoveOutcome::Won
        } else if collected {
            MoveOutcome::Collected
        } else {
            MoveOutcome::Moved
        }
    }

    fn consume_coin(&mut self) -> bool {
        let Some(idx) = self.coins.iter().position(|c| *c == self.player) else {
            return false;
        };
        self.coins.remove(idx);
        self.distance = self.distance.saturating_sub(COIN_DISCOUNT.unsigned_abs());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bonus::Bonuses;
    use crate::grid::Grid;

    fn level(coins: Vec<Pos>) -> Level {
        let grid = Grid::parse(&[
            "#####", //
            "#.#.#",
            "#.#.#",
            "#...#",
            "#####",
        ])
        .unwrap();
        Level::assemble(0, grid, Pos::new(1, 1), Pos::new(3, 1), Bonuses::new(coins)).unwrap()
    }

    #[test]
    fn walls_and_edges_block_moves() {
        let mut play = Playthrough::new(level(vec![]));

        assert_eq!(play.try_move(Dir::Right), MoveOutcome::Blocked);
        assert_eq!(play.try_move(Dir::Up), MoveOutcome::Blocked);
        assert_eq!(play.player(), Pos::new(1, 1));
        assert_eq!(play.distance(), 0);
    }

    #[test]
    fn coin_discount_is_clamped_at_zero() {
        let mut play = Playthrough::new(level(vec![Pos::new(1, 3)]));

        assert_eq!(play.try_move(Dir::Down), MoveOutcome::Moved);
        assert_eq!(play.try_move(Dir::Down), MoveOutcome::Collected);
        assert_eq!(play.distance(), 0);
        assert!(play.coins_left().is_empty());
        assert_eq!(play.level().bonuses.len(), 1);

        assert_eq!(play.try_move(Dir::Right), MoveOutcome::Moved);
        assert_eq!(play.distance(), 1);
    }

    #[test]
    fn coin_is_collected_only_once() {
        let mut play = Playthrough::new(level(vec![Pos::new(1, 2)]));

        play.try_move(Dir::Down);
        assert_eq!(play.try_move(Dir::Up), MoveOutcome::Moved);
        assert_eq!(play.try_move(Dir::Down), MoveOutcome::Moved);
        assert_eq!(play.distance(), 2);
    }

    #[test]
    fn reaching_the_exit_wins_and_freezes_the_game() {
        let mut play = Playthrough::new(level(vec![]));
        let route = [
            Dir::Down,
            Dir::Down,
            Dir::Right,
            Dir::Right,
            Dir::Up,
            Dir::Up,
        ];
        let outcomes: Vec<MoveOutcome> = route.iter().map(|dir| play.try_move(*dir)).collect();

        assert_eq!(outcomes.last(), Some(&MoveOutcome::Won));
        assert!(play.is_won());
        assert_eq!(play.distance(), 6);
        assert_eq!(play.try_move(Dir::Down), MoveOutcome::Blocked);

        play.toggle_help();
        assert!(!play.show_help());
    }

    #[test]
    fn displayed_distance_is_clamped_while_route_cost_is_not() {
        let play_level = level(vec![Pos::new(2, 3)]);
        let cost = play_level.solution.cost().unwrap();
        let path = play_level.solution.path().to_vec();
        let mut play = Playthrough::new(play_level);

        for pair in path.windows(2) {
            let dir = Dir::ALL
                .into_iter()
                .find(|dir| play.level().grid.step(pair[0], *dir) == Some(pair[1]))
                .unwrap();
            play.try_move(dir);
        }

        // Three steps reach the coin (3 - 10 clamps to 0), three more reach
        // the exit.
        assert!(play.is_won());
        assert_eq!(cost, -4);
        assert_eq!(play.distance(), 3);
    }
}
