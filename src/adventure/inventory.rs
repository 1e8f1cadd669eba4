//! Equipment and inventory operations on a player's state

use super::types::{Effect, Item, ItemKind, PlayerState};

// ============================================================================
// Equipment
// ============================================================================

/// Result of an equip request. Neither failure is exceptional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EquipOutcome {
    /// The inventory item at `index` is now equipped.
    Equipped { index: usize },
    /// No inventory item carries that exact name.
    NotFound,
    /// The first match is not a weapon or shield.
    NotEquippable { kind: &'static str },
}

/// Equip the first inventory item whose name matches exactly.
///
/// The slot refers to the inventory entry itself, so durability changes during combat
/// show up in the inventory.
pub fn equip(player: &mut PlayerState, name: &str) -> EquipOutcome {
    let Some(index) = player.inventory.iter().position(|i| i.name == name) else {
        return EquipOutcome::NotFound;
    };
    if !player.set_equipped(index) {
        return EquipOutcome::NotEquippable {
            kind: player.inventory[index].kind.label(),
        };
    }
    log::info!("adventure: equipped {}", player.inventory[index].name);
    EquipOutcome::Equipped { index }
}

/// Empty the equipment slot, returning the name of what was held.
pub fn unequip(player: &mut PlayerState) -> Option<String> {
    let index = player.clear_equipped()?;
    player.inventory.get(index).map(|i| i.name.clone())
}

/// Which side of a combat round wears the equipped item down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wear {
    /// The player attacked; an equipped weapon loses durability.
    Strike,
    /// The monster hit back; an equipped shield loses durability.
    Block,
}

/// Apply one point of wear to the equipped item if it matches `wear`.
///
/// When durability hits zero the item breaks: it is unequipped and removed from the
/// inventory, and returned to the caller for reporting.
pub fn wear_equipped(player: &mut PlayerState, wear: Wear) -> Option<Item> {
    let index = player.equipped_index()?;
    let broken = {
        let item = player.equipped_item_mut()?;
        let durability = match (&mut item.kind, wear) {
            (ItemKind::Weapon { durability, .. }, Wear::Strike) => durability,
            (ItemKind::Shield { durability, .. }, Wear::Block) => durability,
            _ => return None,
        };
        *durability = durability.saturating_sub(1);
        *durability == 0
    };
    if !broken {
        return None;
    }
    let item = player.remove_item(index)?;
    log::info!("adventure: {} broke", item.name);
    Some(item)
}

// ============================================================================
// Consumables
// ============================================================================

/// Index of the first unused Magic Potion, if any.
pub fn find_magic_potion(player: &PlayerState) -> Option<usize> {
    player.inventory.iter().position(Item::is_fresh_magic_potion)
}

/// Mark every unused Magic Potion as consumed. Returns how many were spent.
pub fn consume_magic_potions(player: &mut PlayerState) -> usize {
    let mut spent = 0;
    for item in player.inventory.iter_mut() {
        if !item.is_fresh_magic_potion() {
            continue;
        }
        if let ItemKind::Consumable { consumed, .. } = &mut item.kind {
            *consumed = true;
            spent += 1;
        }
    }
    spent
}

/// Flip a consumable's `consumed` flag. Returns false if it was not an unused consumable.
pub fn consume(player: &mut PlayerState, index: usize) -> bool {
    match player.inventory.get_mut(index).map(|i| &mut i.kind) {
        Some(ItemKind::Consumable { consumed, .. }) if !*consumed => {
            *consumed = true;
            true
        }
        _ => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UseOutcome {
    Healed { amount: i32, hp: i32 },
    /// Every item with that name has already been used.
    AlreadyConsumed,
    /// Vanquish items only work when a fight starts.
    CombatOnly,
    /// Not a consumable at all.
    NotUsable { kind: &'static str },
    NotFound,
}

/// Use the first unused consumable with this name outside of combat.
///
/// Healing never pushes HP above `hp_cap`, but also never lowers HP that is already
/// above it.
pub fn use_item(player: &mut PlayerState, name: &str, heal_amount: i32, hp_cap: i32) -> UseOutcome {
    let mut first_match: Option<usize> = None;
    let mut fresh: Option<usize> = None;
    for (i, item) in player.inventory.iter().enumerate() {
        if item.name != name {
            continue;
        }
        first_match.get_or_insert(i);
        if matches!(item.kind, ItemKind::Consumable { consumed: false, .. }) {
            fresh = Some(i);
            break;
        }
    }
    let Some(first) = first_match else {
        return UseOutcome::NotFound;
    };
    let Some(index) = fresh else {
        return match player.inventory[first].kind {
            ItemKind::Consumable { .. } => UseOutcome::AlreadyConsumed,
            ref other => UseOutcome::NotUsable { kind: other.label() },
        };
    };
    match player.inventory[index].kind {
        ItemKind::Consumable {
            effect: Effect::Vanquish,
            ..
        } => UseOutcome::CombatOnly,
        _ => {
            consume(player, index);
            let before = player.hp;
            player.hp = player.hp.max((player.hp + heal_amount).min(hp_cap));
            UseOutcome::Healed {
                amount: player.hp - before,
                hp: player.hp,
            }
        }
    }
}

// ============================================================================
// Display
// ============================================================================

/// Multi-line inventory listing with the equipped item marked.
pub fn format_inventory(player: &PlayerState) -> String {
    if player.inventory.is_empty() {
        return "Your inventory is empty.".to_string();
    }
    let mut out = String::from("Inventory:\n");
    for (i, item) in player.inventory.iter().enumerate() {
        let marker = if player.equipped_index() == Some(i) {
            " [equipped]"
        } else {
            ""
        };
        out.push_str(&format!("{:>2}) {}{}\n", i + 1, item.describe(), marker));
    }
    out
}
