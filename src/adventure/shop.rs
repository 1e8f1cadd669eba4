//! Shop catalog and purchasing.
//!
//! The catalog is read-only: a purchase appends a clone of the template, so wear on a
//! bought sword never leaks back into the shop's copy.

use super::prompt::Prompter;
use super::types::{Effect, Item, ItemKind, PlayerState, MAGIC_POTION};

/// Items for sale, in display order.
pub fn default_catalog() -> Vec<Item> {
    vec![
        Item::template(
            "Sword",
            50,
            ItemKind::Weapon {
                damage: 5,
                durability: 12,
                max_durability: 12,
            },
        ),
        Item::template(
            "Wooden Shield",
            30,
            ItemKind::Shield {
                durability: 8,
                max_durability: 8,
            },
        ),
        Item::template(
            "Health Potion",
            20,
            ItemKind::Consumable {
                effect: Effect::Heal,
                consumed: false,
            },
        ),
        Item::template(
            MAGIC_POTION,
            75,
            ItemKind::Consumable {
                effect: Effect::Vanquish,
                consumed: false,
            },
        ),
        Item::template("Lucky Charm", 10, ItemKind::Misc),
    ]
}

/// Buy up to `quantity` items at `price` with `money`.
///
/// When the full quantity is unaffordable, buys as many as fit. Returns the quantity
/// bought and the money left, which is never negative.
pub fn purchase_item(price: f64, money: f64, quantity: u32) -> (u32, f64) {
    let money = money.max(0.0);
    let mut quantity = quantity;
    let mut total = price * quantity as f64;
    if total > money {
        quantity = if price > 0.0 {
            (money / price).floor() as u32
        } else {
            quantity
        };
        total = price * quantity as f64;
    }
    (quantity, (money - total).max(0.0))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShopOutcome {
    Purchased { name: String, cost: u32 },
    NotEnoughGold { name: String, cost: u32 },
    /// A number that does not match any catalog entry.
    InvalidChoice,
    /// Non-numeric input or end of input.
    Left,
}

/// Buy catalog entry `index` (0-based) if the player can afford it.
pub fn buy(player: &mut PlayerState, catalog: &[Item], index: usize) -> ShopOutcome {
    let Some(template) = catalog.get(index) else {
        return ShopOutcome::InvalidChoice;
    };
    if player.gold < template.cost {
        return ShopOutcome::NotEnoughGold {
            name: template.name.clone(),
            cost: template.cost,
        };
    }
    player.gold -= template.cost;
    player.inventory.push(template.clone());
    log::info!(
        "adventure: bought {} for {} gold ({} left)",
        template.name,
        template.cost,
        player.gold
    );
    ShopOutcome::Purchased {
        name: template.name.clone(),
        cost: template.cost,
    }
}

/// Numbered listing: `1) Sword - Cost: 50 Gold`.
pub fn format_catalog(catalog: &[Item]) -> String {
    catalog
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}) {} - Cost: {} Gold", i + 1, item.name, item.cost))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Bordered price board shown above the listing.
pub fn format_price_board(catalog: &[Item]) -> String {
    let mut out = String::from("/----------------------\\\n");
    for item in catalog {
        out.push_str(&format!("| {:<12} ${:>6.2} |\n", item.name, item.cost as f64));
    }
    out.push_str("\\----------------------/");
    out
}

/// Interactive visit: list the catalog, read one selection, apply it.
pub fn visit_shop<P: Prompter + ?Sized>(
    player: &mut PlayerState,
    catalog: &[Item],
    io: &mut P,
) -> ShopOutcome {
    io.say("Welcome to the shop! Here are the available items:");
    io.say(&format_catalog(catalog));
    io.say(&format!("You have {} gold.", player.gold));
    let Some(raw) = io.ask("Enter the number of the item you want to purchase (or 'q' to quit): ")
    else {
        return ShopOutcome::Left;
    };
    let choice = raw.trim();
    if choice.is_empty() || !choice.chars().all(|c| c.is_ascii_digit()) {
        io.say("Exiting shop.");
        return ShopOutcome::Left;
    }
    let outcome = match choice.parse::<usize>() {
        Ok(n) if n >= 1 => buy(player, catalog, n - 1),
        _ => ShopOutcome::InvalidChoice,
    };
    match &outcome {
        ShopOutcome::Purchased { name, .. } => io.say(&format!("Purchased {}!", name)),
        ShopOutcome::NotEnoughGold { .. } => io.say("Not enough gold to buy this item."),
        ShopOutcome::InvalidChoice => io.say("Invalid choice."),
        ShopOutcome::Left => {}
    }
    outcome
}
