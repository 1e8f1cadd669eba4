//! Turn-based combat: Attack or Flee until someone drops.
//!
//! Damage model:
//! - Player hit: `1d5` plus the equipped weapon's damage.
//! - Counter-attack: exactly the monster's power, only if it survived the hit.
//!
//! An unused Magic Potion in the inventory is offered before the first turn and ends the
//! fight immediately when accepted; every Magic Potion carried is used up.

use rand::Rng;

use super::inventory::{consume_magic_potions, find_magic_potion, wear_equipped, Wear};
use super::prompt::Prompter;
use super::types::{Monster, PlayerState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatAction {
    Attack,
    Flee,
}

impl CombatAction {
    /// `1` attacks, `2` flees; anything else is not an action.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "1" => Some(CombatAction::Attack),
            "2" => Some(CombatAction::Flee),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FightOutcome {
    /// Monster reduced to 0 HP; `reward` gold credited.
    Victory { reward: u32 },
    /// Won instantly with a Magic Potion; HP untouched.
    PotionVictory { reward: u32 },
    /// Player HP reached 0. Game over for the caller.
    Defeat,
    /// Player left before either side dropped.
    Fled,
}

/// What happened in one Attack turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub player_damage: i32,
    pub monster_hp: i32,
    /// Damage taken from the counter-attack; `None` if the monster died first.
    pub counter_damage: Option<i32>,
    /// Gear that broke during the round.
    pub broken: Vec<String>,
}

pub fn roll_damage<R: Rng + ?Sized>(rng: &mut R) -> i32 {
    rng.gen_range(1..=5)
}

/// Resolve a single Attack against a monster that currently has `monster_hp`.
pub fn attack_round<R: Rng + ?Sized>(
    monster: &Monster,
    monster_hp: i32,
    player: &mut PlayerState,
    rng: &mut R,
) -> Round {
    let bonus = i32::try_from(player.weapon_bonus()).unwrap_or(i32::MAX);
    let player_damage = roll_damage(rng).saturating_add(bonus);
    let mut broken = Vec::new();
    if let Some(item) = wear_equipped(player, Wear::Strike) {
        broken.push(item.name);
    }
    let monster_hp = monster_hp.saturating_sub(player_damage);
    let counter_damage = if monster_hp > 0 {
        player.hp = player.hp.saturating_sub(monster.power);
        if let Some(item) = wear_equipped(player, Wear::Block) {
            broken.push(item.name);
        }
        Some(monster.power)
    } else {
        None
    };
    log::debug!(
        "adventure: hit {} for {} (monster hp {}), counter {:?}, player hp {}",
        monster.name,
        player_damage,
        monster_hp,
        counter_damage,
        player.hp
    );
    Round {
        player_damage,
        monster_hp,
        counter_damage,
        broken,
    }
}

/// Accepting spends every unused Magic Potion the player carries.
fn offer_potion<P: Prompter + ?Sized>(player: &mut PlayerState, io: &mut P) -> bool {
    if find_magic_potion(player).is_none() {
        return false;
    }
    let answer = io.ask("You have a Magic Potion. Use it to defeat the monster instantly? (y/n): ");
    let accepted = answer
        .map(|a| a.trim().eq_ignore_ascii_case("y"))
        .unwrap_or(false);
    accepted && consume_magic_potions(player) > 0
}

/// Run a whole encounter. Player HP, gold and gear are updated in place.
///
/// Invalid action input re-prompts without spending a turn. Running out of input is
/// treated as fleeing.
pub fn fight_monster<P, R>(
    monster: &Monster,
    player: &mut PlayerState,
    io: &mut P,
    rng: &mut R,
) -> FightOutcome
where
    P: Prompter + ?Sized,
    R: Rng + ?Sized,
{
    io.say(&format!(
        "\nYou encounter {}! {}",
        monster.name, monster.description
    ));

    if offer_potion(player, io) {
        let reward = monster.reward();
        player.gold = player.gold.saturating_add(reward);
        io.say("You used the Magic Potion and defeated the monster instantly!");
        log::info!("adventure: {} vanquished with a Magic Potion", monster.name);
        return FightOutcome::PotionVictory { reward };
    }

    let mut monster_hp = monster.health;
    while monster_hp > 0 && player.hp > 0 {
        io.say("\nChoose your action:\n1) Attack\n2) Flee");
        let Some(raw) = io.ask("Enter your choice (1/2): ") else {
            io.say("You flee from the battle.");
            return FightOutcome::Fled;
        };
        match CombatAction::parse(&raw) {
            Some(CombatAction::Attack) => {
                let round = attack_round(monster, monster_hp, player, rng);
                monster_hp = round.monster_hp;
                io.say(&format!(
                    "You deal {} damage to the {}. Monster HP is now {}.",
                    round.player_damage, monster.name, monster_hp
                ));
                if let Some(dmg) = round.counter_damage {
                    io.say(&format!(
                        "The {} strikes back for {} damage! Your HP is now {}.",
                        monster.name, dmg, player.hp
                    ));
                }
                for name in &round.broken {
                    io.say(&format!("Your {} breaks!", name));
                }
            }
            Some(CombatAction::Flee) => {
                io.say("You flee from the battle.");
                log::info!("adventure: fled from {}", monster.name);
                return FightOutcome::Fled;
            }
            None => io.say("Invalid action, please choose again."),
        }
    }

    if player.hp <= 0 {
        player.hp = 0;
        io.say("You have been defeated. Game over!");
        log::info!("adventure: defeated by {}", monster.name);
        return FightOutcome::Defeat;
    }
    let reward = monster.reward();
    player.gold = player.gold.saturating_add(reward);
    if reward > 0 {
        io.say(&format!(
            "You defeated the {}! You find {} gold.",
            monster.name, reward
        ));
    } else {
        io.say(&format!("You defeated the {}!", monster.name));
    }
    log::info!("adventure: defeated {} (+{} gold)", monster.name, reward);
    FightOutcome::Victory { reward }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adventure::testing::ScriptedPrompter;
    use crate::adventure::types::{Effect, Item, MAGIC_POTION};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn brute(health: i32, power: i32) -> Monster {
        Monster {
            name: "Orc".into(),
            description: "A big brute with a club.".into(),
            health,
            power,
            money: Some(12.5),
        }
    }

    #[test]
    fn parse_actions() {
        assert_eq!(CombatAction::parse(" 1 "), Some(CombatAction::Attack));
        assert_eq!(CombatAction::parse("2"), Some(CombatAction::Flee));
        assert_eq!(CombatAction::parse("attack"), None);
        assert_eq!(CombatAction::parse(""), None);
    }

    #[test]
    fn attack_damage_includes_weapon_bonus() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut p = PlayerState::default();
        p.inventory.push(Item::weapon("Sword", 50, 5, 100).unwrap());
        crate::adventure::inventory::equip(&mut p, "Sword");
        let m = brute(1000, 4);
        for _ in 0..50 {
            let hp_before = p.hp;
            let round = attack_round(&m, 1000, &mut p, &mut rng);
            assert!((6..=10).contains(&round.player_damage));
            assert_eq!(round.monster_hp, 1000 - round.player_damage);
            assert_eq!(p.hp, hp_before - 4);
            p.hp = 30;
        }
    }

    #[test]
    fn huge_weapon_bonus_saturates() {
        use crate::adventure::types::ItemKind;
        let mut rng = StdRng::seed_from_u64(3);
        let mut p = PlayerState::default();
        p.inventory.push(Item {
            name: "Cannon".into(),
            cost: 1,
            kind: ItemKind::Weapon {
                damage: u32::MAX,
                durability: 5,
                max_durability: 5,
            },
        });
        crate::adventure::inventory::equip(&mut p, "Cannon");
        let round = attack_round(&brute(40, 3), 40, &mut p, &mut rng);
        assert_eq!(round.player_damage, i32::MAX);
        assert!(round.monster_hp <= 0);
        assert_eq!(round.counter_damage, None);
    }

    #[test]
    fn no_counter_when_monster_dies() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut p = PlayerState::default();
        let round = attack_round(&brute(1, 50), 1, &mut p, &mut rng);
        assert_eq!(round.counter_damage, None);
        assert_eq!(p.hp, 30);
    }

    #[test]
    fn invalid_input_does_not_spend_a_turn() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut p = PlayerState::default();
        let mut io = ScriptedPrompter::new(["x", "9", "2"]);
        let out = fight_monster(&brute(50, 3), &mut p, &mut io, &mut rng);
        assert_eq!(out, FightOutcome::Fled);
        assert_eq!(p.hp, 30);
        assert_eq!(io.asked, 3);
        assert!(io.saw("Invalid action"));
    }

    #[test]
    fn victory_credits_reward() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut p = PlayerState::default();
        let mut io = ScriptedPrompter::new(["1"; 10]);
        let out = fight_monster(&brute(1, 3), &mut p, &mut io, &mut rng);
        assert_eq!(out, FightOutcome::Victory { reward: 12 });
        assert_eq!(p.gold, 112);
    }

    #[test]
    fn defeat_clamps_hp() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut p = PlayerState::default();
        p.hp = 5;
        let mut io = ScriptedPrompter::new(["1"; 10]);
        let out = fight_monster(&brute(500, 40), &mut p, &mut io, &mut rng);
        assert_eq!(out, FightOutcome::Defeat);
        assert_eq!(p.hp, 0);
        assert!(io.saw("Game over"));
    }

    #[test]
    fn declined_potion_falls_through_to_combat() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut p = PlayerState::default();
        p.inventory
            .push(Item::consumable(MAGIC_POTION, 75, Effect::Vanquish).unwrap());
        let mut io = ScriptedPrompter::new(["n", "2"]);
        let out = fight_monster(&brute(50, 3), &mut p, &mut io, &mut rng);
        assert_eq!(out, FightOutcome::Fled);
        assert!(find_magic_potion(&p).is_some());
    }

    #[test]
    fn out_of_input_flees() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut p = PlayerState::default();
        let mut io = ScriptedPrompter::new(Vec::<String>::new());
        assert_eq!(
            fight_monster(&brute(50, 3), &mut p, &mut io, &mut rng),
            FightOutcome::Fled
        );
    }
}
