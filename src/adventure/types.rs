//! Core data model: items, monsters, grid positions and the player's state.
//!
//! Items are a closed set of tagged variants. On disk they keep the flat save-file shape
//! (`{"name": .., "cost": .., "type": "weapon", "damage": ..}`) by
//! flattening the variant into the item record.

use serde::{Deserialize, Serialize};

use super::errors::AdventureError;

/// Gold granted to a brand new character (and to the fallback state on a failed load).
pub const DEFAULT_GOLD: u32 = 100;
/// Starting HP, also the value a full rest resets HP to.
pub const DEFAULT_HP: i32 = 30;
/// The consumable that offers an instant win at the start of a fight.
pub const MAGIC_POTION: &str = "Magic Potion";
/// Largest weapon damage bonus accepted on construction or load.
pub const MAX_WEAPON_DAMAGE: u32 = 1_000;

fn default_durability() -> u32 {
    10
}

/// What a consumable does when used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    /// Restores HP when used from the inventory screen.
    #[default]
    Heal,
    /// Only usable at the start of a fight; defeats the monster outright.
    Vanquish,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemKind {
    Weapon {
        damage: u32,
        #[serde(default = "default_durability")]
        durability: u32,
        #[serde(default = "default_durability")]
        max_durability: u32,
    },
    Shield {
        #[serde(default = "default_durability")]
        durability: u32,
        #[serde(default = "default_durability")]
        max_durability: u32,
    },
    Consumable {
        #[serde(default)]
        effect: Effect,
        #[serde(default)]
        consumed: bool,
    },
    Misc,
}

impl ItemKind {
    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Weapon { .. } => "weapon",
            ItemKind::Shield { .. } => "shield",
            ItemKind::Consumable { .. } => "consumable",
            ItemKind::Misc => "misc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub cost: u32,
    #[serde(flatten)]
    pub kind: ItemKind,
}

impl Item {
    /// Build and validate an item.
    pub fn new(name: impl Into<String>, cost: u32, kind: ItemKind) -> Result<Self, AdventureError> {
        let item = Item {
            name: name.into(),
            cost,
            kind,
        };
        item.validate()?;
        Ok(item)
    }

    /// Compiled-in templates; covered by the catalog validation test.
    pub(crate) fn template(name: &str, cost: u32, kind: ItemKind) -> Self {
        Item {
            name: name.to_string(),
            cost,
            kind,
        }
    }

    pub fn weapon(
        name: impl Into<String>,
        cost: u32,
        damage: u32,
        durability: u32,
    ) -> Result<Self, AdventureError> {
        Item::new(
            name,
            cost,
            ItemKind::Weapon {
                damage,
                durability,
                max_durability: durability,
            },
        )
    }

    pub fn shield(name: impl Into<String>, cost: u32, durability: u32) -> Result<Self, AdventureError> {
        Item::new(
            name,
            cost,
            ItemKind::Shield {
                durability,
                max_durability: durability,
            },
        )
    }

    pub fn consumable(name: impl Into<String>, cost: u32, effect: Effect) -> Result<Self, AdventureError> {
        Item::new(
            name,
            cost,
            ItemKind::Consumable {
                effect,
                consumed: false,
            },
        )
    }

    pub fn misc(name: impl Into<String>, cost: u32) -> Result<Self, AdventureError> {
        Item::new(name, cost, ItemKind::Misc)
    }

    /// Check the per-variant field constraints.
    pub fn validate(&self) -> Result<(), AdventureError> {
        let invalid = |reason: &str| AdventureError::InvalidItem {
            name: self.name.clone(),
            reason: reason.to_string(),
        };
        if self.name.trim().is_empty() {
            return Err(invalid("name must not be empty"));
        }
        match self.kind {
            ItemKind::Weapon {
                damage,
                durability,
                max_durability,
            } => {
                if damage == 0 {
                    return Err(invalid("weapon damage must be at least 1"));
                }
                if damage > MAX_WEAPON_DAMAGE {
                    return Err(invalid("weapon damage too large"));
                }
                if max_durability == 0 || durability > max_durability {
                    return Err(invalid("durability out of range"));
                }
            }
            ItemKind::Shield {
                durability,
                max_durability,
            } => {
                if max_durability == 0 || durability > max_durability {
                    return Err(invalid("durability out of range"));
                }
            }
            ItemKind::Consumable { .. } | ItemKind::Misc => {}
        }
        Ok(())
    }

    /// Weapons and shields can be bound to the equipment slot.
    pub fn is_equippable(&self) -> bool {
        matches!(self.kind, ItemKind::Weapon { .. } | ItemKind::Shield { .. })
    }

    /// Bonus damage this item adds to an attack when equipped.
    pub fn damage(&self) -> u32 {
        match self.kind {
            ItemKind::Weapon { damage, .. } => damage,
            _ => 0,
        }
    }

    pub fn durability(&self) -> Option<(u32, u32)> {
        match self.kind {
            ItemKind::Weapon {
                durability,
                max_durability,
                ..
            }
            | ItemKind::Shield {
                durability,
                max_durability,
            } => Some((durability, max_durability)),
            _ => None,
        }
    }

    pub fn is_consumed(&self) -> bool {
        matches!(self.kind, ItemKind::Consumable { consumed: true, .. })
    }

    /// An unused Magic Potion, eligible for the instant-win offer.
    pub fn is_fresh_magic_potion(&self) -> bool {
        self.name == MAGIC_POTION && matches!(self.kind, ItemKind::Consumable { consumed: false, .. })
    }

    /// One-line description for inventory and shop listings.
    pub fn describe(&self) -> String {
        match &self.kind {
            ItemKind::Weapon {
                damage,
                durability,
                max_durability,
            } => format!(
                "{} (weapon, +{} dmg, {}/{})",
                self.name, damage, durability, max_durability
            ),
            ItemKind::Shield {
                durability,
                max_durability,
            } => format!("{} (shield, {}/{})", self.name, durability, max_durability),
            ItemKind::Consumable { consumed, .. } => {
                if *consumed {
                    format!("{} (consumable, used)", self.name)
                } else {
                    format!("{} (consumable)", self.name)
                }
            }
            ItemKind::Misc => format!("{} (misc)", self.name),
        }
    }
}

/// A single encounter's opponent. Lives only for one fight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Monster {
    pub name: String,
    pub description: String,
    pub health: i32,
    pub power: i32,
    /// Reward in fractional gold, rounded to 2 places at generation time.
    pub money: Option<f64>,
}

impl Monster {
    /// Whole gold credited on victory.
    pub fn reward(&self) -> u32 {
        self.money
            .filter(|m| m.is_finite() && *m > 0.0)
            .map(|m| m.floor() as u32)
            .unwrap_or(0)
    }
}

/// Grid coordinate; stored on disk as a two-element array `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[usize; 2]", into = "[usize; 2]")]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Position { x, y }
    }
}

impl From<[usize; 2]> for Position {
    fn from(v: [usize; 2]) -> Self {
        Position { x: v[0], y: v[1] }
    }
}

impl From<Position> for [usize; 2] {
    fn from(p: Position) -> Self {
        [p.x, p.y]
    }
}

/// Everything that survives between turns for one character.
///
/// The equipment slot is an index into `inventory`; it is kept private so every
/// mutation goes through methods that keep it pointing at an equippable item.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub hp: i32,
    pub gold: u32,
    pub inventory: Vec<Item>,
    equipped: Option<usize>,
    pub position: Position,
}

impl Default for PlayerState {
    fn default() -> Self {
        PlayerState::new(DEFAULT_GOLD, DEFAULT_HP)
    }
}

impl PlayerState {
    pub fn new(gold: u32, hp: i32) -> Self {
        PlayerState {
            hp,
            gold,
            inventory: Vec::new(),
            equipped: None,
            position: Position::default(),
        }
    }

    pub fn equipped_index(&self) -> Option<usize> {
        self.equipped
    }

    pub fn equipped_item(&self) -> Option<&Item> {
        self.equipped.and_then(|i| self.inventory.get(i))
    }

    pub(crate) fn equipped_item_mut(&mut self) -> Option<&mut Item> {
        match self.equipped {
            Some(i) => self.inventory.get_mut(i),
            None => None,
        }
    }

    /// Bind the equipment slot. Returns false (and changes nothing) when the index
    /// does not point at an equippable inventory item.
    pub(crate) fn set_equipped(&mut self, index: usize) -> bool {
        match self.inventory.get(index) {
            Some(item) if item.is_equippable() => {
                self.equipped = Some(index);
                true
            }
            _ => false,
        }
    }

    pub fn clear_equipped(&mut self) -> Option<usize> {
        self.equipped.take()
    }

    /// Remove an inventory entry, keeping the equipment slot pointing at the same item.
    pub fn remove_item(&mut self, index: usize) -> Option<Item> {
        if index >= self.inventory.len() {
            return None;
        }
        let removed = self.inventory.remove(index);
        self.equipped = match self.equipped {
            Some(e) if e == index => None,
            Some(e) if e > index => Some(e - 1),
            other => other,
        };
        Some(removed)
    }

    /// Damage bonus from the equipped item, 0 when bare-handed or holding a shield.
    pub fn weapon_bonus(&self) -> u32 {
        self.equipped_item().map(Item::damage).unwrap_or(0)
    }

    pub fn is_defeated(&self) -> bool {
        self.hp <= 0
    }

    pub fn summary(&self) -> String {
        let gear = self
            .equipped_item()
            .map(|i| i.name.as_str())
            .unwrap_or("nothing");
        format!(
            "HP {} | Gold {} | Items {} | Equipped: {}",
            self.hp,
            self.gold,
            self.inventory.len(),
            gear
        )
    }
}
