//! Survival game core: content loading, inventory, crafting, and combat.
//! The record scanner and registry turn hand-authored content files into
//! read-only lookup tables; the session layer owns all mutable play state
//! and exposes the surface the interactive dispatcher drives.

pub mod combat;
pub mod commands;
pub mod crafting;
pub mod errors;
pub mod inventory;
pub mod registry;
pub mod scanner;
pub mod types;

pub use combat::{resolve, CombatOutcome, CombatState, Encounter, LiveMonster};
pub use commands::{handle_command, parse_command, GameCommand, GameSession};
pub use crafting::craft;
pub use errors::GameError;
pub use inventory::{add_item, drop_item, format_item_list, remove_item_by_id, take_item};
pub use registry::{
    load_items_from_file, load_monsters_from_file, load_recipes_from_file, ContentPaths,
    ContentRegistry,
};
pub use types::{Item, Monster, Player, Recipe, RecipeComponent, PLAYER_START_HP};
