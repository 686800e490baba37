//! Inventory operations over the world/player item split.
//!
//! Both collections are plain insertion-order-preserving vectors of item
//! instances; there is no stacking, so N instances of one id occupy N slots.
//! Every operation touches only the collections passed in.

use crate::game::errors::GameError;
use crate::game::types::Item;

/// Append an item instance to a collection. Always succeeds.
pub fn add_item(items: &mut Vec<Item>, item: Item) {
    items.push(item);
}

/// Remove and return the first instance matching `id`, in insertion order.
/// Repeated calls drain duplicate ids one at a time.
pub fn remove_item_by_id(items: &mut Vec<Item>, id: &str) -> Option<Item> {
    let index = items.iter().position(|item| item.id == id)?;
    Some(items.remove(index))
}

/// Move the first matching instance from world to player. Returns the moved
/// item's display name, or `NotFound` with both collections untouched.
pub fn take_item(
    world: &mut Vec<Item>,
    player: &mut Vec<Item>,
    id: &str,
) -> Result<String, GameError> {
    match remove_item_by_id(world, id) {
        Some(item) => {
            let name = item.name.clone();
            add_item(player, item);
            Ok(name)
        }
        None => Err(GameError::NotFound(id.to_string())),
    }
}

/// Inverse of `take_item`: move the first matching instance from player to
/// world.
pub fn drop_item(
    player: &mut Vec<Item>,
    world: &mut Vec<Item>,
    id: &str,
) -> Result<String, GameError> {
    match remove_item_by_id(player, id) {
        Some(item) => {
            let name = item.name.clone();
            add_item(world, item);
            Ok(name)
        }
        None => Err(GameError::NotFound(id.to_string())),
    }
}

/// Format a collection for display, one numbered line per instance.
pub fn format_item_list(items: &[Item]) -> Vec<String> {
    if items.is_empty() {
        return vec!["Empty".to_string()];
    }
    items
        .iter()
        .enumerate()
        .map(|(idx, item)| format!("{}. {} [{}]", idx + 1, item.name, item.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> Item {
        Item::new(id, &id.to_uppercase())
    }

    #[test]
    fn remove_takes_first_match_in_insertion_order() {
        let mut items = vec![item("rock"), item("stick"), item("rock")];
        let removed = remove_item_by_id(&mut items, "rock").expect("first rock");
        assert_eq!(removed.id, "rock");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "stick");
        // Second call drains the duplicate
        assert!(remove_item_by_id(&mut items, "rock").is_some());
        assert!(remove_item_by_id(&mut items, "rock").is_none());
    }

    #[test]
    fn take_moves_between_collections() {
        let mut world = vec![item("rope")];
        let mut player = Vec::new();

        let name = take_item(&mut world, &mut player, "rope").expect("take");
        assert_eq!(name, "ROPE");
        assert!(world.is_empty());
        assert_eq!(player.len(), 1);
        assert_eq!(player[0].id, "rope");
    }

    #[test]
    fn take_missing_id_leaves_both_unchanged() {
        let mut world = vec![item("rope")];
        let mut player = vec![item("flint")];

        let result = take_item(&mut world, &mut player, "nonexistent_id");
        assert!(matches!(result, Err(GameError::NotFound(_))));
        assert_eq!(world.len(), 1);
        assert_eq!(player.len(), 1);
    }

    #[test]
    fn take_then_drop_round_trips() {
        let mut world = vec![item("rope"), item("flint")];
        let mut player = Vec::new();

        take_item(&mut world, &mut player, "flint").expect("take");
        drop_item(&mut player, &mut world, "flint").expect("drop");

        let mut world_ids: Vec<&str> = world.iter().map(|i| i.id.as_str()).collect();
        world_ids.sort_unstable();
        assert_eq!(world_ids, vec!["flint", "rope"]);
        assert!(player.is_empty());
    }

    #[test]
    fn format_empty_and_nonempty() {
        assert_eq!(format_item_list(&[]), vec!["Empty".to_string()]);
        let lines = format_item_list(&[item("rock"), item("rock")]);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("1. "));
        assert!(lines[1].starts_with("2. "));
    }
}
