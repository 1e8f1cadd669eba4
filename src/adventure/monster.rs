//! Monster catalog and per-encounter generation.

use rand::Rng;

use super::types::Monster;

/// Static archetype; each encounter draws concrete stats from these ranges.
#[derive(Debug, Clone, Copy)]
pub struct Species {
    pub name: &'static str,
    pub description: &'static str,
    /// Inclusive health range.
    pub health: (i32, i32),
    /// Inclusive power range; power is the fixed damage of every counter-attack.
    pub power: (i32, i32),
    /// Continuous reward range in gold.
    pub money: (f64, f64),
}

pub const SPECIES: [Species; 3] = [
    Species {
        name: "A goblin",
        description: "A lonely goblin that attacks quickly with a dagger.",
        health: (1, 5),
        power: (5, 15),
        money: (10.0, 50.0),
    },
    Species {
        name: "Vulture",
        description: "A vulture scavenging the remains of a battle.",
        health: (1, 2),
        power: (2, 10),
        money: (100.0, 200.0),
    },
    Species {
        name: "Dragon",
        description: "A powerful dragon with fiery breath blocking your path.",
        health: (50, 100),
        power: (30, 50),
        money: (500.0, 1000.0),
    },
];

pub fn species_named(name: &str) -> Option<&'static Species> {
    SPECIES.iter().find(|s| s.name == name)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

impl Species {
    pub fn spawn<R: Rng + ?Sized>(&self, rng: &mut R) -> Monster {
        let health = rng.gen_range(self.health.0..=self.health.1);
        let power = rng.gen_range(self.power.0..=self.power.1);
        let money = round2(rng.gen_range(self.money.0..=self.money.1));
        Monster {
            name: self.name.to_string(),
            description: self.description.to_string(),
            health,
            power,
            money: Some(money),
        }
    }
}

/// Pick a species uniformly and roll a fresh monster from it.
pub fn random_monster<R: Rng + ?Sized>(rng: &mut R) -> Monster {
    let species = &SPECIES[rng.gen_range(0..SPECIES.len())];
    let monster = species.spawn(rng);
    log::debug!(
        "adventure: spawned {} (health {}, power {})",
        monster.name,
        monster.health,
        monster.power
    );
    monster
}
