//! Turn-based combat resolution.
//!
//! An encounter clones the monster template into a detached `LiveMonster`
//! snapshot, then alternates player and monster turns until one side's hit
//! points reach zero. Damage is fully deterministic: the player deals a
//! fixed armed/unarmed value, the monster deals dice × sides with a floor of
//! 1, so every turn strictly decreases someone's hit points and the loop
//! always terminates.

use crate::game::errors::GameError;
use crate::game::registry::ContentRegistry;
use crate::game::types::{Item, Monster, Player, ARMED_DAMAGE, UNARMED_DAMAGE};
use log::debug;

/// Encounter state machine. `PlayerTurn` always precedes `MonsterTurn`
/// within a round; the two defeated states are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatState {
    Engaging,
    PlayerTurn,
    MonsterTurn,
    PlayerDefeated,
    MonsterDefeated,
}

/// The live combat participant: a by-value snapshot of a monster template.
/// Damage lands here and never leaks back into the registry's template; the
/// snapshot is discarded when the encounter ends.
#[derive(Debug, Clone)]
pub struct LiveMonster {
    pub id: String,
    pub name: String,
    pub hp: i32,
    pub melee_dice: i32,
    pub melee_dice_sides: i32,
}

impl LiveMonster {
    pub fn from_template(template: &Monster) -> Self {
        Self {
            id: template.id.clone(),
            name: template.name.clone(),
            hp: template.hp,
            melee_dice: template.melee_dice,
            melee_dice_sides: template.melee_dice_sides,
        }
    }

    pub fn display_hp(&self) -> i32 {
        self.hp.max(0)
    }

    pub fn is_defeated(&self) -> bool {
        self.hp <= 0
    }

    /// Deterministic melee damage: dice × sides, floored at 1 so even a
    /// template with zero dice still threatens the player.
    pub fn melee_damage(&self) -> i32 {
        (self.melee_dice * self.melee_dice_sides).max(1)
    }
}

/// Terminal result of a resolved encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatOutcome {
    MonsterDefeated,
    PlayerDefeated,
}

/// One encounter between the player and a live monster.
#[derive(Debug)]
pub struct Encounter {
    pub monster: LiveMonster,
    pub state: CombatState,
    pub round: u32,
}

impl Encounter {
    /// Look up the template and snapshot it. `NotFound` if the id is absent.
    pub fn start(registry: &ContentRegistry, monster_id: &str) -> Result<Self, GameError> {
        let template = registry
            .monster(monster_id)
            .ok_or_else(|| GameError::NotFound(monster_id.to_string()))?;
        debug!("engaging {} (hp {})", template.id, template.hp);
        Ok(Self {
            monster: LiveMonster::from_template(template),
            state: CombatState::Engaging,
            round: 0,
        })
    }

    /// Damage the player deals this turn: a fixed value while holding any
    /// item (the first held item is the notional weapon), else the unarmed
    /// value. Item identity deliberately does not affect the number.
    pub fn player_damage(player_items: &[Item]) -> i32 {
        if player_items.is_empty() {
            UNARMED_DAMAGE
        } else {
            ARMED_DAMAGE
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(
            self.state,
            CombatState::PlayerDefeated | CombatState::MonsterDefeated
        )
    }

    /// Play one round: player turn, then — only if the monster survived —
    /// the monster turn. Returns the round's transcript lines.
    pub fn play_round(&mut self, player: &mut Player, player_items: &[Item]) -> Vec<String> {
        if self.is_over() {
            return Vec::new();
        }
        self.round += 1;
        let mut lines = Vec::new();

        self.state = CombatState::PlayerTurn;
        let damage = Self::player_damage(player_items);
        let weapon = player_items
            .first()
            .map(|item| item.name.as_str())
            .unwrap_or("bare hands");
        self.monster.hp -= damage;
        lines.push(format!(
            "You hit the {} with your {} for {} damage ({} hp left).",
            self.monster.name,
            weapon,
            damage,
            self.monster.display_hp()
        ));
        if self.monster.is_defeated() {
            // Killing blow ends the round; no reciprocal monster turn
            self.state = CombatState::MonsterDefeated;
            lines.push(format!("The {} is defeated!", self.monster.name));
            return lines;
        }

        self.state = CombatState::MonsterTurn;
        let damage = self.monster.melee_damage();
        player.hp -= damage;
        lines.push(format!(
            "The {} hits you for {} damage ({} hp left).",
            self.monster.name,
            damage,
            player.display_hp()
        ));
        if player.is_defeated() {
            self.state = CombatState::PlayerDefeated;
            lines.push("You have been slain.".to_string());
        } else {
            self.state = CombatState::PlayerTurn;
        }
        lines
    }
}

/// Run an encounter to a terminal state and return the outcome with the full
/// transcript. The live monster is discarded either way; removing a defeated
/// monster from the world list is the caller's job.
pub fn resolve(
    registry: &ContentRegistry,
    monster_id: &str,
    player: &mut Player,
    player_items: &[Item],
) -> Result<(CombatOutcome, Vec<String>), GameError> {
    let mut encounter = Encounter::start(registry, monster_id)?;
    let mut transcript = vec![format!("You engage the {}!", encounter.monster.name)];

    while !encounter.is_over() {
        transcript.extend(encounter.play_round(player, player_items));
    }

    let outcome = match encounter.state {
        CombatState::MonsterDefeated => CombatOutcome::MonsterDefeated,
        _ => CombatOutcome::PlayerDefeated,
    };
    debug!(
        "encounter with {} resolved after {} round(s): {:?}",
        monster_id, encounter.round, outcome
    );
    Ok((outcome, transcript))
}
