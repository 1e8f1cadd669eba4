//! Adventure game core: player state, items, monsters, combat, the shop, save files and
//! the grid overworld. Everything here talks to the player through [`prompt::Prompter`],
//! so the console binary and scripted tests drive the same code.

pub mod combat;
pub mod errors;
pub mod grid;
pub mod inventory;
pub mod monster;
pub mod prompt;
pub mod session;
pub mod shop;
pub mod storage;
pub mod testing;
pub mod types;

pub use combat::{attack_round, fight_monster, roll_damage, CombatAction, FightOutcome, Round};
pub use errors::AdventureError;
pub use grid::{Direction, GridEvent, GridInput, GridWorld, WanderingMonster};
pub use inventory::{
    consume, consume_magic_potions, equip, find_magic_potion, format_inventory, unequip, use_item,
    wear_equipped, EquipOutcome, UseOutcome, Wear,
};
pub use monster::{random_monster, species_named, Species, SPECIES};
pub use prompt::Prompter;
pub use session::{welcome_banner, MenuChoice, Session, TurnResult};
pub use shop::{
    buy, default_catalog, format_catalog, format_price_board, purchase_item, visit_shop,
    ShopOutcome,
};
pub use storage::{load_game, save_game, save_path, LoadOutcome, LoadSource};
pub use types::*;
