//! Command parsing and the session facade the interactive dispatcher drives.
//!
//! The dispatcher itself is a thin loop (read a line, call `handle_command`,
//! print the lines); everything stateful lives in `GameSession`, which owns
//! the registry, the world/player item split, the player, and the roster of
//! monsters still roaming the world.

use crate::game::combat::{self, CombatOutcome};
use crate::game::crafting;
use crate::game::errors::GameError;
use crate::game::inventory::{drop_item, format_item_list, take_item};
use crate::game::registry::ContentRegistry;
use crate::game::types::{Item, Player};
use log::info;

/// One parsed player command: a verb plus an optional id argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameCommand {
    Help,
    WorldItems,          // ITEMS - list items lying in the world
    Inventory,           // I, INV - list carried items
    Take(String),        // TAKE <item id>
    Drop(String),        // DROP <item id>
    Craft(String),       // CRAFT <recipe id>
    Monsters,            // MONSTERS - list monsters still roaming
    Fight(String),       // FIGHT <monster id>
    Status,              // STATUS - player hit points
    Quit,                // QUIT
    Unknown(String),
}

/// Tokenize one input line into a command. The verb is case-insensitive;
/// everything after the first whitespace run is the argument. A verb that
/// needs an id but got none is `EmptyArgument`, reported without any state
/// change.
pub fn parse_command(input: &str) -> Result<GameCommand, GameError> {
    let input = input.trim();
    let (verb, arg) = match input.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (input, ""),
    };

    let require_arg = |what: &'static str| -> Result<String, GameError> {
        if arg.is_empty() {
            Err(GameError::EmptyArgument(what))
        } else {
            Ok(arg.to_string())
        }
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "help" | "h" | "?" => GameCommand::Help,
        "items" => GameCommand::WorldItems,
        "inv" | "inventory" | "i" => GameCommand::Inventory,
        "take" | "t" => GameCommand::Take(require_arg("item id")?),
        "drop" | "d" => GameCommand::Drop(require_arg("item id")?),
        "craft" | "c" => GameCommand::Craft(require_arg("recipe id")?),
        "monsters" | "m" => GameCommand::Monsters,
        "fight" | "f" => GameCommand::Fight(require_arg("monster id")?),
        "status" | "hp" => GameCommand::Status,
        "quit" | "q" | "exit" => GameCommand::Quit,
        other => GameCommand::Unknown(other.to_string()),
    };
    Ok(command)
}

/// All mutable play state for one run. Content is loaded once into the
/// registry; afterwards the registry is read-only and every change happens
/// here.
#[derive(Debug)]
pub struct GameSession {
    registry: ContentRegistry,
    pub world_items: Vec<Item>,
    pub player_items: Vec<Item>,
    pub player: Player,
    /// Ids of monsters still available to fight. Defeated monsters are
    /// removed; they are one-time encounters.
    pub world_monsters: Vec<String>,
    /// Set when the player is permanently defeated; there is no respawn.
    pub over: bool,
}

impl GameSession {
    /// Seed a session from loaded content: one world instance of every item
    /// definition, every monster roaming.
    pub fn new(registry: ContentRegistry, player_hp: i32) -> Self {
        let world_items: Vec<Item> = registry.items().cloned().collect();
        let world_monsters: Vec<String> = registry.monsters().map(|m| m.id.clone()).collect();
        info!(
            "session start: {} item(s), {} monster(s), {} recipe(s)",
            world_items.len(),
            world_monsters.len(),
            registry.recipe_count()
        );
        Self {
            registry,
            world_items,
            player_items: Vec::new(),
            player: Player::new(player_hp),
            world_monsters,
            over: false,
        }
    }

    pub fn registry(&self) -> &ContentRegistry {
        &self.registry
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn list_world_items(&self) -> Vec<String> {
        format_item_list(&self.world_items)
    }

    pub fn list_inventory(&self) -> Vec<String> {
        format_item_list(&self.player_items)
    }

    pub fn take(&mut self, id: &str) -> Result<String, GameError> {
        let name = take_item(&mut self.world_items, &mut self.player_items, id)?;
        Ok(format!("Taken: {}", name))
    }

    pub fn drop(&mut self, id: &str) -> Result<String, GameError> {
        let name = drop_item(&mut self.player_items, &mut self.world_items, id)?;
        Ok(format!("Dropped: {}", name))
    }

    pub fn craft(&mut self, recipe_id: &str) -> Result<String, GameError> {
        let produced = crafting::craft(&self.registry, &mut self.player_items, recipe_id)?;
        Ok(format!("Crafted: {}", produced.name))
    }

    pub fn list_monsters(&self) -> Vec<String> {
        if self.world_monsters.is_empty() {
            return vec!["No monsters remain.".to_string()];
        }
        self.world_monsters
            .iter()
            .enumerate()
            .map(|(idx, id)| match self.registry.monster(id) {
                Some(monster) => format!(
                    "{}. {} [{}] ({} hp)",
                    idx + 1,
                    monster.name,
                    monster.id,
                    monster.hp
                ),
                None => format!("{}. {}", idx + 1, id),
            })
            .collect()
    }

    /// Fight a roaming monster to a terminal outcome. A win removes the
    /// monster from the world; a loss ends the session for good.
    pub fn fight(&mut self, monster_id: &str) -> Result<Vec<String>, GameError> {
        if !self.world_monsters.iter().any(|id| id == monster_id) {
            return Err(GameError::NotFound(monster_id.to_string()));
        }
        let (outcome, mut transcript) = combat::resolve(
            &self.registry,
            monster_id,
            &mut self.player,
            &self.player_items,
        )?;
        match outcome {
            CombatOutcome::MonsterDefeated => {
                self.world_monsters.retain(|id| id != monster_id);
                transcript.push(format!("You have {} hp left.", self.player.display_hp()));
            }
            CombatOutcome::PlayerDefeated => {
                self.over = true;
                transcript.push("Game over.".to_string());
            }
        }
        Ok(transcript)
    }

    pub fn status(&self) -> Vec<String> {
        vec![format!(
            "HP: {}  carrying: {}  monsters left: {}",
            self.player.display_hp(),
            self.player_items.len(),
            self.world_monsters.len()
        )]
    }
}

fn help_lines() -> Vec<String> {
    vec![
        "Commands:".to_string(),
        "  items              list items in the world".to_string(),
        "  inv                list carried items".to_string(),
        "  take <item id>     pick up an item".to_string(),
        "  drop <item id>     put an item down".to_string(),
        "  craft <recipe id>  craft from carried components".to_string(),
        "  monsters           list monsters still roaming".to_string(),
        "  fight <monster id> fight a monster".to_string(),
        "  status             show hit points".to_string(),
        "  quit               leave the game".to_string(),
    ]
}

/// Route one input line through the session. Failures come back as
/// printable lines; nothing here is fatal, and a `Quit` is signalled by the
/// `quit` flag in the returned pair.
pub fn handle_command(session: &mut GameSession, input: &str) -> (Vec<String>, bool) {
    let command = match parse_command(input) {
        Ok(command) => command,
        Err(e) => return (vec![e.to_string()], false),
    };

    let lines = match command {
        GameCommand::Help => help_lines(),
        GameCommand::WorldItems => session.list_world_items(),
        GameCommand::Inventory => session.list_inventory(),
        GameCommand::Take(id) => one_line(session.take(&id)),
        GameCommand::Drop(id) => one_line(session.drop(&id)),
        GameCommand::Craft(id) => one_line(session.craft(&id)),
        GameCommand::Monsters => session.list_monsters(),
        GameCommand::Fight(id) => match session.fight(&id) {
            Ok(lines) => lines,
            Err(e) => vec![e.to_string()],
        },
        GameCommand::Status => session.status(),
        GameCommand::Quit => return (vec!["Goodbye.".to_string()], true),
        GameCommand::Unknown(verb) => vec![format!("Unknown command: {} (try 'help')", verb)],
    };
    (lines, false)
}

fn one_line(result: Result<String, GameError>) -> Vec<String> {
    match result {
        Ok(line) => vec![line],
        Err(e) => vec![e.to_string()],
    }
}
