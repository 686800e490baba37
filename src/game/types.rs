//! Core domain types for the survival simulation.
//!
//! Registry-owned definitions (`Item`, `Monster`, `Recipe`) are templates:
//! immutable once parsed. Anything that changes during play is a copy —
//! item instances held in an inventory, or the live monster snapshot used
//! during a fight (`combat::LiveMonster`).

/// Starting hit points for a fresh player.
pub const PLAYER_START_HP: i32 = 100;

/// Damage per player turn while holding at least one item.
/// The held item's identity does not change the value; this mirrors the
/// original placeholder formula and is the seam to replace if weapons ever
/// get individual damage stats.
pub const ARMED_DAMAGE: i32 = 5;

/// Damage per player turn with an empty inventory.
pub const UNARMED_DAMAGE: i32 = 1;

/// An item definition. Instances in inventories are clones of these;
/// two instances with the same id are interchangeable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: String,
    pub name: String,
}

impl Item {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    /// Item synthesized for a craft result that has no content definition:
    /// id and display name both equal the result identifier.
    pub fn placeholder(id: &str) -> Self {
        Self::new(id, id)
    }
}

/// A monster template. Combat never mutates these; `combat::LiveMonster`
/// takes a snapshot when a fight starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monster {
    pub id: String,
    pub name: String,
    pub hp: i32,
    pub melee_dice: i32,
    pub melee_dice_sides: i32,
    /// Part of the content schema; not yet used in damage calculation.
    pub armor: i32,
}

impl Monster {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            hp: 0,
            melee_dice: 0,
            melee_dice_sides: 0,
            armor: 0,
        }
    }

    pub fn with_hp(mut self, hp: i32) -> Self {
        self.hp = hp;
        self
    }

    pub fn with_melee(mut self, dice: i32, sides: i32) -> Self {
        self.melee_dice = dice;
        self.melee_dice_sides = sides;
        self
    }

    pub fn with_armor(mut self, armor: i32) -> Self {
        self.armor = armor;
        self
    }
}

/// One required ingredient of a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeComponent {
    pub item_id: String,
    pub quantity: u32,
}

/// A crafting recipe. Components are ordered; a recipe listing the same
/// component id twice is two independent requirements applied in listed
/// order, not a merged quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: String,
    /// Item id produced on success. A missing item definition for this id
    /// never fails a craft; a placeholder item is synthesized instead.
    pub result: String,
    pub components: Vec<RecipeComponent>,
}

impl Recipe {
    pub fn new(id: &str, result: &str) -> Self {
        Self {
            id: id.to_string(),
            result: result.to_string(),
            components: Vec::new(),
        }
    }

    pub fn with_component(mut self, item_id: &str, quantity: u32) -> Self {
        self.components.push(RecipeComponent {
            item_id: item_id.to_string(),
            quantity,
        });
        self
    }
}

/// The player. Hit points may go negative mid-turn; `display_hp` clamps for
/// rendering while defeat checks use the raw value.
#[derive(Debug, Clone)]
pub struct Player {
    pub hp: i32,
}

impl Player {
    pub fn new(hp: i32) -> Self {
        Self { hp }
    }

    pub fn display_hp(&self) -> i32 {
        self.hp.max(0)
    }

    pub fn is_defeated(&self) -> bool {
        self.hp <= 0
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(PLAYER_START_HP)
    }
}
