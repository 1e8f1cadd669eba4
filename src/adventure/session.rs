//! One character's play session: the overworld menu, the grid front end, and the glue
//! between player input and the combat, shop, inventory and save modules.

use rand::Rng;
use std::path::{Path, PathBuf};

use super::combat::{fight_monster, FightOutcome};
use super::errors::AdventureError;
use super::grid::{GridEvent, GridInput, GridWorld};
use super::inventory::{equip, format_inventory, use_item, EquipOutcome, UseOutcome};
use super::monster::random_monster;
use super::prompt::Prompter;
use super::shop::{default_catalog, format_price_board, visit_shop, ShopOutcome};
use super::storage::{load_game, save_game, save_path, LoadSource};
use super::types::{Item, ItemKind, Monster, PlayerState};
use crate::config::{GameConfig, GridConfig};
use crate::validation::{escape_log, validate_character_name};

const MENU: &str = "\nWhat would you like to do?\n\
1) Fight a monster\n\
2) Sleep (restore HP)\n\
3) Visit the shop\n\
4) Manage inventory\n\
5) Save and quit";

/// `Hello, <name>!` centred in a field of `width` columns.
///
/// An odd margin puts the extra column on the left when `width` is odd and on the
/// right when it is even.
pub fn welcome_banner(name: &str, width: usize) -> String {
    let message = format!("Hello, {}!", name);
    let margin = width.saturating_sub(message.chars().count());
    let left = margin / 2 + (margin & width & 1);
    let right = margin - left;
    format!("{}{}{}", " ".repeat(left), message, " ".repeat(right))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Fight,
    Sleep,
    Shop,
    Inventory,
    SaveQuit,
}

impl MenuChoice {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "1" => Some(MenuChoice::Fight),
            "2" => Some(MenuChoice::Sleep),
            "3" => Some(MenuChoice::Shop),
            "4" => Some(MenuChoice::Inventory),
            "5" => Some(MenuChoice::SaveQuit),
            _ => None,
        }
    }
}

/// Whether the game loop keeps going after a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnResult {
    Continue,
    /// The player saved (or tried to) and left.
    Quit,
    /// HP hit 0. Nothing is saved.
    GameOver,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub name: String,
    pub player: PlayerState,
    pub catalog: Vec<Item>,
    pub settings: GameConfig,
    pub save_path: PathBuf,
}

impl Session {
    /// Fresh character. The name is validated and picks the save file under
    /// `settings.save_dir`.
    pub fn new(name: &str, settings: GameConfig) -> Result<Self, AdventureError> {
        let name = validate_character_name(name)?;
        let save_path = save_path(Path::new(&settings.save_dir), &name);
        Ok(Session {
            player: PlayerState::new(settings.starting_gold, settings.starting_hp),
            catalog: default_catalog(),
            name,
            settings,
            save_path,
        })
    }

    /// Use an explicit save file instead of the per-character one.
    pub fn with_save_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_path = path.into();
        self
    }

    fn fresh_player(&self) -> PlayerState {
        PlayerState::new(self.settings.starting_gold, self.settings.starting_hp)
    }

    /// Replace the player with the saved state. A missing or unreadable save leaves a
    /// fresh character. Returns where the state came from and the notice to show.
    pub fn load(&mut self) -> (LoadSource, String) {
        let outcome = load_game(&self.save_path);
        let notice = outcome.notice(&self.save_path);
        self.player = match outcome.source {
            LoadSource::Loaded => outcome.state,
            _ => self.fresh_player(),
        };
        (outcome.source, notice)
    }

    pub fn save(&self) -> Result<(), AdventureError> {
        save_game(&self.save_path, &self.player)
    }

    pub fn status_line(&self) -> String {
        format!("{}: {}", self.name, self.player.summary())
    }

    /// Fight a freshly rolled monster.
    pub fn fight<P, R>(&mut self, io: &mut P, rng: &mut R) -> FightOutcome
    where
        P: Prompter + ?Sized,
        R: Rng + ?Sized,
    {
        let monster = random_monster(rng);
        self.fight_monster(&monster, io, rng)
    }

    pub fn fight_monster<P, R>(&mut self, monster: &Monster, io: &mut P, rng: &mut R) -> FightOutcome
    where
        P: Prompter + ?Sized,
        R: Rng + ?Sized,
    {
        fight_monster(monster, &mut self.player, io, rng)
    }

    /// Full rest. Returns the new HP.
    pub fn sleep(&mut self) -> i32 {
        self.player.hp = self.settings.rest_hp;
        log::info!("adventure: {} rested to {} hp", self.name, self.player.hp);
        self.player.hp
    }

    pub fn shop<P: Prompter + ?Sized>(&mut self, io: &mut P) -> ShopOutcome {
        io.say(&format_price_board(&self.catalog));
        visit_shop(&mut self.player, &self.catalog, io)
    }

    pub fn equip(&mut self, name: &str) -> EquipOutcome {
        equip(&mut self.player, name)
    }

    /// Show the inventory and equip or use one item by name. Blank input goes back.
    pub fn inventory<P: Prompter + ?Sized>(&mut self, io: &mut P) {
        io.say(&format_inventory(&self.player));
        if self.player.inventory.is_empty() {
            return;
        }
        let Some(raw) = io.ask("Enter an item name to equip or use (blank to go back): ") else {
            return;
        };
        let name = raw.trim();
        if name.is_empty() {
            return;
        }
        log::debug!("adventure: inventory request {}", escape_log(name));

        let is_consumable = self
            .player
            .inventory
            .iter()
            .find(|i| i.name == name)
            .map(|i| matches!(i.kind, ItemKind::Consumable { .. }));
        if is_consumable == Some(true) {
            let outcome = use_item(
                &mut self.player,
                name,
                self.settings.heal_amount,
                self.settings.rest_hp,
            );
            io.say(&match outcome {
                UseOutcome::Healed { amount, hp } => {
                    format!("You use the {} and recover {} HP. HP is now {}.", name, amount, hp)
                }
                UseOutcome::AlreadyConsumed => format!("Your {} has already been used.", name),
                UseOutcome::CombatOnly => {
                    format!("The {} can only be used at the start of a fight.", name)
                }
                UseOutcome::NotUsable { kind } => format!("You can't use a {}.", kind),
                UseOutcome::NotFound => format!("You don't have a {}.", name),
            });
            return;
        }

        io.say(&match self.equip(name) {
            EquipOutcome::Equipped { .. } => format!("You equipped the {}.", name),
            EquipOutcome::NotFound => format!("You don't have a {}.", name),
            EquipOutcome::NotEquippable { kind } => {
                format!("You can't equip the {}: it is a {} item.", name, kind)
            }
        });
    }

    /// Save and report the result. A failed save is shown but not fatal.
    fn save_and_report<P: Prompter + ?Sized>(&self, io: &mut P) -> bool {
        match self.save() {
            Ok(()) => {
                io.say(&format!("Game saved to {}.", self.save_path.display()));
                true
            }
            Err(e) => {
                log::warn!("adventure: save failed for {}: {}", self.name, e);
                io.say(&format!("Could not save the game: {}", e));
                false
            }
        }
    }

    fn after_fight(outcome: &FightOutcome) -> TurnResult {
        match outcome {
            FightOutcome::Defeat => TurnResult::GameOver,
            _ => TurnResult::Continue,
        }
    }

    pub fn handle_choice<P, R>(&mut self, choice: MenuChoice, io: &mut P, rng: &mut R) -> TurnResult
    where
        P: Prompter + ?Sized,
        R: Rng + ?Sized,
    {
        match choice {
            MenuChoice::Fight => {
                let outcome = self.fight(io, rng);
                Self::after_fight(&outcome)
            }
            MenuChoice::Sleep => {
                let hp = self.sleep();
                io.say(&format!("You sleep soundly. HP restored to {}.", hp));
                TurnResult::Continue
            }
            MenuChoice::Shop => {
                self.shop(io);
                TurnResult::Continue
            }
            MenuChoice::Inventory => {
                self.inventory(io);
                TurnResult::Continue
            }
            MenuChoice::SaveQuit => {
                if self.save_and_report(io) {
                    TurnResult::Quit
                } else {
                    TurnResult::Continue
                }
            }
        }
    }

    /// Show the menu once and act on the answer. End of input saves and quits.
    fn menu_turn<P, R>(&mut self, io: &mut P, rng: &mut R) -> TurnResult
    where
        P: Prompter + ?Sized,
        R: Rng + ?Sized,
    {
        io.say(MENU);
        let Some(raw) = io.ask("Enter your choice (1-5): ") else {
            self.save_and_report(io);
            return TurnResult::Quit;
        };
        match MenuChoice::parse(&raw) {
            Some(choice) => self.handle_choice(choice, io, rng),
            None => {
                io.say("Invalid choice.");
                TurnResult::Continue
            }
        }
    }

    /// Text menu loop until the player quits or dies.
    pub fn run<P, R>(&mut self, io: &mut P, rng: &mut R) -> TurnResult
    where
        P: Prompter + ?Sized,
        R: Rng + ?Sized,
    {
        loop {
            io.say(&format!("\n{}", self.status_line()));
            match self.menu_turn(io, rng) {
                TurnResult::Continue => {}
                done => return done,
            }
        }
    }

    /// A new board laid out around the player's current position.
    pub fn grid_world<R: Rng + ?Sized>(&self, config: &GridConfig, rng: &mut R) -> GridWorld {
        GridWorld::new(config, self.player.position, rng)
    }

    /// Grid loop: walk with w/a/s/d, `m` opens the menu, `q` saves and quits.
    pub fn run_grid<P, R>(&mut self, world: &mut GridWorld, io: &mut P, rng: &mut R) -> TurnResult
    where
        P: Prompter + ?Sized,
        R: Rng + ?Sized,
    {
        loop {
            io.say(&format!("\n{}\n{}", world.render(), self.status_line()));
            let Some(raw) = io.ask("Move (w/a/s/d), m for menu, q to quit: ") else {
                self.save_and_report(io);
                return TurnResult::Quit;
            };
            let dir = match GridInput::parse(&raw) {
                GridInput::Move(dir) => dir,
                GridInput::Menu => match self.menu_turn(io, rng) {
                    TurnResult::Continue => continue,
                    done => return done,
                },
                GridInput::Quit => {
                    self.save_and_report(io);
                    return TurnResult::Quit;
                }
                GridInput::Unknown => continue,
            };

            let event = world.step(dir, rng);
            self.player.position = world.player();
            let result = match event {
                GridEvent::Shop => {
                    io.say("You entered the shop!");
                    self.shop(io);
                    TurnResult::Continue
                }
                GridEvent::Encounter => {
                    io.say("A wild monster appeared!");
                    let outcome = self.fight(io, rng);
                    Self::after_fight(&outcome)
                }
                GridEvent::Monsters { removed } => {
                    let mut result = TurnResult::Continue;
                    for _ in 0..removed {
                        io.say("You ran into a wandering monster! Fighting...");
                        let outcome = self.fight(io, rng);
                        result = Self::after_fight(&outcome);
                        if result != TurnResult::Continue {
                            break;
                        }
                    }
                    result
                }
                GridEvent::Nothing => TurnResult::Continue,
            };
            if result != TurnResult::Continue {
                return result;
            }
        }
    }
}
