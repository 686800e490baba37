//! Crafting engine with all-or-nothing component consumption.
//!
//! A craft attempt stages removals through a `ConsumptionBatch` and only
//! commits once every component pair is satisfied. Any shortfall rolls the
//! whole batch back, so a failed craft is never observable as partial
//! consumption — the player inventory is exactly as it was.

use crate::game::errors::GameError;
use crate::game::inventory::{add_item, remove_item_by_id};
use crate::game::registry::ContentRegistry;
use crate::game::types::Item;
use log::debug;

/// Staged removals for one craft attempt. Phase 1 stages instances out of
/// the inventory one at a time; phase 2 either commits (drops the batch) or
/// rolls back (returns every staged instance).
#[derive(Debug, Default)]
struct ConsumptionBatch {
    staged: Vec<Item>,
}

impl ConsumptionBatch {
    /// Stage one instance of `id` out of `items`. False when none is left.
    fn stage(&mut self, items: &mut Vec<Item>, id: &str) -> bool {
        match remove_item_by_id(items, id) {
            Some(item) => {
                self.staged.push(item);
                true
            }
            None => false,
        }
    }

    /// Return every staged instance to `items`, undoing the attempt.
    fn rollback(self, items: &mut Vec<Item>) {
        for item in self.staged {
            add_item(items, item);
        }
    }

    /// Consume the staged instances for good.
    fn commit(self) {
        debug!("consumed {} component instance(s)", self.staged.len());
    }
}

/// Resolve `recipe_id` against the player's inventory.
///
/// Component pairs are processed in listed order; a recipe naming the same
/// component twice is two independent requirements. On success the produced
/// item is a copy of the result's definition, or a synthesized placeholder
/// when the result id has no definition — only missing components fail a
/// craft, never a missing result item.
pub fn craft(
    registry: &ContentRegistry,
    player_items: &mut Vec<Item>,
    recipe_id: &str,
) -> Result<Item, GameError> {
    let recipe = registry
        .recipe(recipe_id)
        .ok_or_else(|| GameError::NotFound(recipe_id.to_string()))?;

    let mut batch = ConsumptionBatch::default();
    for component in &recipe.components {
        for _ in 0..component.quantity {
            if !batch.stage(player_items, &component.item_id) {
                let missing = component.item_id.clone();
                batch.rollback(player_items);
                return Err(GameError::InsufficientComponents {
                    recipe: recipe.id.clone(),
                    component: missing,
                });
            }
        }
    }
    batch.commit();

    let produced = registry
        .item(&recipe.result)
        .cloned()
        .unwrap_or_else(|| Item::placeholder(&recipe.result));
    add_item(player_items, produced.clone());
    Ok(produced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::{Monster, Recipe};

    fn registry() -> ContentRegistry {
        ContentRegistry::from_parts(
            vec![
                Item::new("stick", "Stick"),
                Item::new("coal", "Coal"),
                Item::new("torch", "Torch"),
            ],
            Vec::<Monster>::new(),
            vec![
                Recipe::new("torch", "torch")
                    .with_component("stick", 2)
                    .with_component("coal", 1),
                Recipe::new("oddity", "unknown_result").with_component("stick", 1),
                Recipe::new("twice", "torch")
                    .with_component("stick", 1)
                    .with_component("stick", 1),
            ],
        )
    }

    fn held(ids: &[&str]) -> Vec<Item> {
        ids.iter().map(|id| Item::new(id, id)).collect()
    }

    #[test]
    fn craft_consumes_components_and_produces_result() {
        let registry = registry();
        let mut items = held(&["stick", "stick", "coal"]);

        let produced = craft(&registry, &mut items, "torch").expect("craft");
        assert_eq!(produced.id, "torch");
        assert_eq!(produced.name, "Torch");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "torch");
    }

    #[test]
    fn shortfall_rolls_back_everything() {
        let registry = registry();
        // One stick short of the two required
        let mut items = held(&["stick", "coal"]);

        let result = craft(&registry, &mut items, "torch");
        match result {
            Err(GameError::InsufficientComponents { recipe, component }) => {
                assert_eq!(recipe, "torch");
                assert_eq!(component, "stick");
            }
            other => panic!("expected InsufficientComponents, got {:?}", other),
        }

        let mut ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec!["coal", "stick"]);
    }

    #[test]
    fn unknown_recipe_reports_not_found() {
        let registry = registry();
        let mut items = held(&["stick"]);
        assert!(matches!(
            craft(&registry, &mut items, "chainmail"),
            Err(GameError::NotFound(_))
        ));
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn missing_result_definition_synthesizes_placeholder() {
        let registry = registry();
        let mut items = held(&["stick"]);

        let produced = craft(&registry, &mut items, "oddity").expect("craft");
        assert_eq!(produced.id, "unknown_result");
        assert_eq!(produced.name, "unknown_result");
    }

    #[test]
    fn duplicate_component_entries_are_sequential_requirements() {
        let registry = registry();

        // Two entries of one stick each: needs two sticks total
        let mut enough = held(&["stick", "stick"]);
        assert!(craft(&registry, &mut enough, "twice").is_ok());

        let mut short = held(&["stick"]);
        assert!(matches!(
            craft(&registry, &mut short, "twice"),
            Err(GameError::InsufficientComponents { .. })
        ));
        assert_eq!(short.len(), 1);
        assert_eq!(short[0].id, "stick");
    }
}
