use thiserror::Error;

/// Errors that can arise while driving the survival game core.
#[derive(Debug, Error)]
pub enum GameError {
    /// Returned when a requested item, monster, or recipe id is absent.
    #[error("not found: {0}")]
    NotFound(String),

    /// Returned when a craft attempt runs out of a required component.
    /// The player inventory is guaranteed untouched when this is returned.
    #[error("insufficient components for '{recipe}': missing {component}")]
    InsufficientComponents { recipe: String, component: String },

    /// Returned when a command that needs an id argument was issued without one.
    #[error("missing argument: {0}")]
    EmptyArgument(&'static str),
}
