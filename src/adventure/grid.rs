//! ASCII grid overworld.
//!
//! The player walks a square board holding a shop tile, an encounter tile and a few
//! wandering monsters. [`GridWorld::step`] applies one player move and reports what the
//! player ran into; the caller decides how to run the shop or the fight.

use rand::seq::SliceRandom;
use rand::Rng;

use super::types::Position;
use crate::config::GridConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// `w/a/s/d`, `n`/`e`, or the words `up/down/left/right` and `north/south/east/west`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "w" | "n" | "up" | "north" => Some(Direction::Up),
            "s" | "down" | "south" => Some(Direction::Down),
            "a" | "left" | "west" => Some(Direction::Left),
            "d" | "e" | "right" | "east" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Neighbour of `pos` in this direction, or `pos` itself at the board edge.
    pub fn apply(self, pos: Position, size: usize) -> Position {
        let max = size.saturating_sub(1);
        match self {
            Direction::Up => Position::new(pos.x, pos.y.saturating_sub(1)),
            Direction::Down => Position::new(pos.x, (pos.y + 1).min(max)),
            Direction::Left => Position::new(pos.x.saturating_sub(1), pos.y),
            Direction::Right => Position::new((pos.x + 1).min(max), pos.y),
        }
    }
}

/// One line of input on the grid screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridInput {
    Move(Direction),
    Menu,
    Quit,
    Unknown,
}

impl GridInput {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("m") || trimmed.eq_ignore_ascii_case("menu") {
            return GridInput::Menu;
        }
        if trimmed.eq_ignore_ascii_case("q") || trimmed.eq_ignore_ascii_case("quit") {
            return GridInput::Quit;
        }
        Direction::parse(trimmed)
            .map(GridInput::Move)
            .unwrap_or(GridInput::Unknown)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WanderingMonster {
    pub position: Position,
}

impl WanderingMonster {
    pub fn spawn<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        WanderingMonster {
            position: random_position(size, rng),
        }
    }

    /// Try one random direction; a step off the board leaves the monster in place.
    pub fn wander<R: Rng + ?Sized>(&mut self, size: usize, rng: &mut R) {
        if let Some(dir) = Direction::ALL.choose(rng) {
            self.position = dir.apply(self.position, size);
        }
    }
}

fn random_position<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Position {
    Position::new(rng.gen_range(0..size), rng.gen_range(0..size))
}

/// What the player's move led to. Shop beats encounter beats monsters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridEvent {
    Shop,
    Encounter,
    /// Walked into `removed` wandering monsters; each was taken off the board.
    Monsters { removed: usize },
    Nothing,
}

#[derive(Debug, Clone)]
pub struct GridWorld {
    size: usize,
    player: Position,
    shop: Position,
    encounter: Position,
    monsters: Vec<WanderingMonster>,
    moves: u32,
    monster_move_every: u32,
    respawn_count: usize,
}

impl GridWorld {
    /// Random layout with the player at `start` (clamped onto the board).
    pub fn new<R: Rng + ?Sized>(config: &GridConfig, start: Position, rng: &mut R) -> Self {
        let size = config.size.max(2);
        let shop = random_position(size, rng);
        let mut encounter = random_position(size, rng);
        while encounter == shop {
            encounter = random_position(size, rng);
        }
        let monsters = (0..config.wandering_monsters)
            .map(|_| WanderingMonster::spawn(size, rng))
            .collect();
        let world = GridWorld {
            size,
            player: clamp(start, size),
            shop,
            encounter,
            monsters,
            moves: 0,
            monster_move_every: config.monster_move_every,
            respawn_count: config.respawn_count,
        };
        log::debug!(
            "adventure: grid {}x{} shop {:?} encounter {:?} monsters {}",
            size,
            size,
            world.shop,
            world.encounter,
            world.monsters.len()
        );
        world
    }

    /// Fixed layout, for scripted boards and tests. Returns `None` if the shop and the
    /// encounter share a tile.
    pub fn with_layout(
        config: &GridConfig,
        player: Position,
        shop: Position,
        encounter: Position,
        monsters: &[Position],
    ) -> Option<Self> {
        let size = config.size.max(2);
        let (shop, encounter) = (clamp(shop, size), clamp(encounter, size));
        if shop == encounter {
            return None;
        }
        Some(GridWorld {
            size,
            player: clamp(player, size),
            shop,
            encounter,
            monsters: monsters
                .iter()
                .map(|p| WanderingMonster {
                    position: clamp(*p, size),
                })
                .collect(),
            moves: 0,
            monster_move_every: config.monster_move_every,
            respawn_count: config.respawn_count,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn player(&self) -> Position {
        self.player
    }

    pub fn shop(&self) -> Position {
        self.shop
    }

    pub fn encounter(&self) -> Position {
        self.encounter
    }

    pub fn monsters(&self) -> &[WanderingMonster] {
        &self.monsters
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Apply one player move.
    ///
    /// Order: move the player, resolve what they landed on, let the monsters wander
    /// (every `monster_move_every` moves), then repopulate an empty board.
    pub fn step<R: Rng + ?Sized>(&mut self, dir: Direction, rng: &mut R) -> GridEvent {
        self.player = dir.apply(self.player, self.size);
        self.moves = self.moves.wrapping_add(1);

        let event = if self.player == self.shop {
            GridEvent::Shop
        } else if self.player == self.encounter {
            GridEvent::Encounter
        } else {
            match self.take_collisions() {
                0 => GridEvent::Nothing,
                removed => GridEvent::Monsters { removed },
            }
        };

        if self.monster_move_every > 0 && self.moves % self.monster_move_every == 0 {
            for monster in &mut self.monsters {
                monster.wander(self.size, rng);
            }
        }
        if self.monsters.is_empty() && self.respawn_count > 0 {
            for _ in 0..self.respawn_count {
                self.monsters.push(WanderingMonster::spawn(self.size, rng));
            }
            log::debug!("adventure: respawned {} monsters", self.monsters.len());
        }
        event
    }

    /// Remove every monster on the player's tile and return how many there were.
    fn take_collisions(&mut self) -> usize {
        let before = self.monsters.len();
        let player = self.player;
        self.monsters.retain(|m| m.position != player);
        before - self.monsters.len()
    }

    /// Board as text, one row per line: `@` player, `M` monster, `$` shop, `!` encounter.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity((self.size + 1) * self.size);
        for y in 0..self.size {
            for x in 0..self.size {
                let here = Position::new(x, y);
                let ch = if here == self.player {
                    '@'
                } else if self.monsters.iter().any(|m| m.position == here) {
                    'M'
                } else if here == self.shop {
                    '$'
                } else if here == self.encounter {
                    '!'
                } else {
                    '.'
                };
                out.push(ch);
            }
            if y + 1 < self.size {
                out.push('\n');
            }
        }
        out
    }
}

fn clamp(p: Position, size: usize) -> Position {
    let max = size.saturating_sub(1);
    Position::new(p.x.min(max), p.y.min(max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn still() -> GridConfig {
        GridConfig {
            monster_move_every: 0,
            ..GridConfig::default()
        }
    }

    #[test]
    fn parse_inputs() {
        assert_eq!(GridInput::parse("w"), GridInput::Move(Direction::Up));
        assert_eq!(GridInput::parse("Left"), GridInput::Move(Direction::Left));
        assert_eq!(GridInput::parse("south"), GridInput::Move(Direction::Down));
        assert_eq!(GridInput::parse("m"), GridInput::Menu);
        assert_eq!(GridInput::parse("Q"), GridInput::Quit);
        assert_eq!(GridInput::parse("jump"), GridInput::Unknown);
    }

    #[test]
    fn shop_and_encounter_never_overlap() {
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let config = GridConfig {
                size: 2,
                ..GridConfig::default()
            };
            let w = GridWorld::new(&config, Position::default(), &mut rng);
            assert_ne!(w.shop(), w.encounter());
        }
    }

    #[test]
    fn player_stays_on_board() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut w = GridWorld::with_layout(
            &still(),
            Position::new(0, 0),
            Position::new(9, 9),
            Position::new(8, 9),
            &[Position::new(5, 5)],
        )
        .unwrap();
        assert_eq!(w.step(Direction::Up, &mut rng), GridEvent::Nothing);
        assert_eq!(w.player(), Position::new(0, 0));
        w.step(Direction::Left, &mut rng);
        assert_eq!(w.player(), Position::new(0, 0));
        w.step(Direction::Right, &mut rng);
        assert_eq!(w.player(), Position::new(1, 0));
    }

    #[test]
    fn shop_takes_priority_and_encounter_triggers() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut w = GridWorld::with_layout(
            &still(),
            Position::new(0, 0),
            Position::new(1, 0),
            Position::new(1, 1),
            &[Position::new(1, 0)],
        )
        .unwrap();
        assert_eq!(w.step(Direction::Right, &mut rng), GridEvent::Shop);
        assert_eq!(w.monsters().len(), 1);
        assert_eq!(w.step(Direction::Down, &mut rng), GridEvent::Encounter);
    }

    #[test]
    fn collision_removes_all_monsters_on_tile_and_respawns() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut w = GridWorld::with_layout(
            &still(),
            Position::new(0, 0),
            Position::new(9, 9),
            Position::new(9, 8),
            &[Position::new(0, 1), Position::new(0, 1)],
        )
        .unwrap();
        assert_eq!(
            w.step(Direction::Down, &mut rng),
            GridEvent::Monsters { removed: 2 }
        );
        assert_eq!(w.monsters().len(), 2, "board repopulated");
    }

    #[test]
    fn monsters_move_every_other_turn_within_bounds() {
        let mut rng = StdRng::seed_from_u64(4);
        let config = GridConfig {
            size: 3,
            ..GridConfig::default()
        };
        let mut w = GridWorld::with_layout(
            &config,
            Position::new(0, 0),
            Position::new(2, 2),
            Position::new(2, 1),
            &[Position::new(1, 1)],
        )
        .unwrap();
        for turn in 1..=40 {
            let before: Vec<Position> = w.monsters().iter().map(|m| m.position).collect();
            let dir = if turn % 2 == 0 { Direction::Left } else { Direction::Up };
            let event = w.step(dir, &mut rng);
            for m in w.monsters() {
                assert!(m.position.x < 3 && m.position.y < 3);
            }
            if turn % 2 == 1 && !matches!(event, GridEvent::Monsters { .. }) {
                let after: Vec<Position> = w.monsters().iter().map(|m| m.position).collect();
                assert_eq!(before, after, "monsters rest on odd moves");
            }
        }
    }

    #[test]
    fn render_marks_tiles() {
        let config = GridConfig {
            size: 3,
            ..GridConfig::default()
        };
        let w = GridWorld::with_layout(
            &config,
            Position::new(0, 0),
            Position::new(2, 0),
            Position::new(0, 2),
            &[Position::new(1, 1)],
        )
        .unwrap();
        assert_eq!(w.render(), "@.$\n.M.\n!..");
    }

    #[test]
    fn overlapping_layout_is_rejected() {
        let p = Position::new(1, 1);
        assert!(GridWorld::with_layout(&still(), Position::default(), p, p, &[]).is_none());
    }
}
