//! Entity registry: the three id-keyed lookup tables produced from content
//! files. A registry is explicitly constructed and passed around — there is
//! no ambient global table — and is read-only after load; all later item
//! state lives in inventories as copies of these definitions.

use crate::game::scanner::{quoted_int_pair, scan_item_fields, scan_records};
use crate::game::types::{Item, Monster, Recipe, RecipeComponent};
use log::{debug, warn};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Locations of the three content files one registry loads from.
#[derive(Debug, Clone)]
pub struct ContentPaths {
    pub items: PathBuf,
    pub monsters: PathBuf,
    pub recipes: PathBuf,
}

impl ContentPaths {
    /// Conventional file names under a content directory.
    pub fn under<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            items: dir.join("items.txt"),
            monsters: dir.join("monsters.txt"),
            recipes: dir.join("recipes.txt"),
        }
    }
}

/// Read-only lookup tables for items, monsters, and recipes, keyed by id,
/// with load order retained for listing commands.
#[derive(Debug, Default)]
pub struct ContentRegistry {
    items: HashMap<String, Item>,
    item_order: Vec<String>,
    monsters: HashMap<String, Monster>,
    monster_order: Vec<String>,
    recipes: HashMap<String, Recipe>,
    recipe_order: Vec<String>,
}

impl ContentRegistry {
    /// Load all three tables. A file that is unreadable or yields zero valid
    /// records leaves its table empty; that is not an error, and lookups
    /// against the empty table report not-found later.
    pub fn load(paths: &ContentPaths) -> Self {
        let items = load_items_from_file(&paths.items);
        let monsters = load_monsters_from_file(&paths.monsters);
        let recipes = load_recipes_from_file(&paths.recipes);
        Self::from_parts(items, monsters, recipes)
    }

    /// Build a registry from already-parsed entities. Used by `load` and by
    /// tests that want fixture content without touching the filesystem.
    pub fn from_parts(items: Vec<Item>, monsters: Vec<Monster>, recipes: Vec<Recipe>) -> Self {
        let mut registry = Self::default();
        for item in items {
            if !registry.items.contains_key(&item.id) {
                registry.item_order.push(item.id.clone());
            }
            registry.items.insert(item.id.clone(), item);
        }
        for monster in monsters {
            if !registry.monsters.contains_key(&monster.id) {
                registry.monster_order.push(monster.id.clone());
            }
            registry.monsters.insert(monster.id.clone(), monster);
        }
        for recipe in recipes {
            if !registry.recipes.contains_key(&recipe.id) {
                registry.recipe_order.push(recipe.id.clone());
            }
            registry.recipes.insert(recipe.id.clone(), recipe);
        }
        registry
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn monster(&self, id: &str) -> Option<&Monster> {
        self.monsters.get(id)
    }

    pub fn recipe(&self, id: &str) -> Option<&Recipe> {
        self.recipes.get(id)
    }

    /// Items in load order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.item_order.iter().filter_map(|id| self.items.get(id))
    }

    /// Monsters in load order.
    pub fn monsters(&self) -> impl Iterator<Item = &Monster> {
        self.monster_order
            .iter()
            .filter_map(|id| self.monsters.get(id))
    }

    /// Recipes in load order.
    pub fn recipes(&self) -> impl Iterator<Item = &Recipe> {
        self.recipe_order
            .iter()
            .filter_map(|id| self.recipes.get(id))
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn monster_count(&self) -> usize {
        self.monsters.len()
    }

    pub fn recipe_count(&self) -> usize {
        self.recipes.len()
    }
}

fn read_lines(path: &Path) -> Option<Vec<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => Some(contents.lines().map(|l| l.to_string()).collect()),
        Err(e) => {
            warn!("content source {} unreadable: {}", path.display(), e);
            None
        }
    }
}

/// Load item definitions. Items use the simplified delimiterless record
/// variant: each record flushes once both its id and name have been seen.
pub fn load_items_from_file<P: AsRef<Path>>(path: P) -> Vec<Item> {
    match read_lines(path.as_ref()) {
        Some(lines) => items_from_lines(lines),
        None => Vec::new(),
    }
}

pub fn items_from_lines<I>(lines: I) -> Vec<Item>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    scan_item_fields(lines)
        .into_iter()
        .map(|(id, name)| Item::new(&id, &name))
        .collect()
}

/// Load monster templates from delimited records. A record needs an id to be
/// kept; a missing display name falls back to the id, and absent integer
/// fields default to 0.
pub fn load_monsters_from_file<P: AsRef<Path>>(path: P) -> Vec<Monster> {
    match read_lines(path.as_ref()) {
        Some(lines) => monsters_from_lines(lines),
        None => Vec::new(),
    }
}

pub fn monsters_from_lines<I>(lines: I) -> Vec<Monster>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    scan_records(lines)
        .into_iter()
        .filter_map(|record| {
            let id = match record.string_field("id") {
                Some(id) => id,
                None => {
                    debug!("dropping monster record with no id");
                    return None;
                }
            };
            let name = record.string_field("str").unwrap_or_else(|| id.clone());
            Some(
                Monster::new(&id, &name)
                    .with_hp(record.int_field("hp"))
                    .with_melee(
                        record.int_field("melee_dice"),
                        record.int_field("melee_dice_sides"),
                    )
                    .with_armor(record.int_field("armor")),
            )
        })
        .collect()
}

/// Load recipes from delimited records. A record needs both an id and a
/// result to be kept; component entries are the (quoted id, quantity)
/// pairings inside the record, in listed order, and malformed entries are
/// skipped individually.
pub fn load_recipes_from_file<P: AsRef<Path>>(path: P) -> Vec<Recipe> {
    match read_lines(path.as_ref()) {
        Some(lines) => recipes_from_lines(lines),
        None => Vec::new(),
    }
}

pub fn recipes_from_lines<I>(lines: I) -> Vec<Recipe>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    scan_records(lines)
        .into_iter()
        .filter_map(|record| {
            let id = record.string_field("id");
            let result = record.string_field("result");
            let (id, result) = match (id, result) {
                (Some(id), Some(result)) => (id, result),
                _ => {
                    debug!("dropping recipe record missing id or result");
                    return None;
                }
            };
            let components = record
                .lines()
                .iter()
                // Field lines carry a colon; component entries do not
                .filter(|line| !line.contains(':'))
                .filter_map(|line| quoted_int_pair(line))
                .map(|(item_id, quantity)| RecipeComponent { item_id, quantity })
                .collect();
            Some(Recipe {
                id,
                result,
                components,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monster_without_id_is_dropped() {
        let lines = ["{", r#"  "name": { "str": "Nameless" },"#, r#"  "hp": 99"#, "}"];
        assert!(monsters_from_lines(lines).is_empty());
    }

    #[test]
    fn monster_optional_fields_default_to_zero() {
        let lines = ["{", r#"  "id": "slime","#, r#"  "hp": 4"#, "}"];
        let monsters = monsters_from_lines(lines);
        assert_eq!(monsters.len(), 1);
        let slime = &monsters[0];
        assert_eq!(slime.hp, 4);
        assert_eq!(slime.melee_dice, 0);
        assert_eq!(slime.melee_dice_sides, 0);
        assert_eq!(slime.armor, 0);
        // Missing display name falls back to the id
        assert_eq!(slime.name, "slime");
    }

    #[test]
    fn recipe_needs_id_and_result() {
        let lines = [
            "{",
            r#"  "id": "no_result","#,
            r#"  [ "stick", 1 ]"#,
            "}",
            "{",
            r#"  "id": "torch","#,
            r#"  "result": "torch","#,
            r#"  "components": ["#,
            r#"    [ "stick", 1 ],"#,
            r#"    [ "coal", 2 ]"#,
            "  ]",
            "}",
        ];
        let recipes = recipes_from_lines(lines);
        assert_eq!(recipes.len(), 1);
        let torch = &recipes[0];
        assert_eq!(torch.id, "torch");
        assert_eq!(torch.result, "torch");
        assert_eq!(torch.components.len(), 2);
        assert_eq!(torch.components[0].item_id, "stick");
        assert_eq!(torch.components[1].item_id, "coal");
        assert_eq!(torch.components[1].quantity, 2);
    }

    #[test]
    fn registry_lookups_and_order() {
        let registry = ContentRegistry::from_parts(
            vec![Item::new("b", "B"), Item::new("a", "A")],
            vec![Monster::new("wolf", "Wolf").with_hp(10)],
            vec![Recipe::new("r", "a")],
        );
        assert_eq!(registry.item("a").unwrap().name, "A");
        assert!(registry.item("missing").is_none());
        assert_eq!(registry.monster("wolf").unwrap().hp, 10);
        assert_eq!(registry.recipe("r").unwrap().result, "a");

        let order: Vec<&str> = registry.items().map(|i| i.id.as_str()).collect();
        assert_eq!(order, vec!["b", "a"]);
    }

    #[test]
    fn unreadable_file_yields_empty_collection() {
        assert!(load_items_from_file("does/not/exist.txt").is_empty());
        assert!(load_monsters_from_file("does/not/exist.txt").is_empty());
        assert!(load_recipes_from_file("does/not/exist.txt").is_empty());
    }
}
