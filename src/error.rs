use bevy_ecs::entity::Entity;

/// Alias for `Result<T, DialogueError>`.
pub type DialogueResult<T> = Result<T, DialogueError>;

/// Errors raised at the boundary of the dialogue API.
///
/// Misuse the player can absorb, like skipping while no dialogue is
/// running, is ignored rather than reported.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DialogueError {
    /// The player was asked to replay its attached script, but has none.
    #[error("no dialogue script is attached to the player")]
    MissingScript,

    /// The entity does not carry a [`DialoguePlayer`](crate::player::DialoguePlayer).
    #[error("entity {0} has no dialogue player")]
    NoPlayer(Entity),

    /// Typing speed outside of `1..=60` frames per character.
    #[error("frames between characters must be within 1..=60, got {0}")]
    InvalidFrames(u32),

    /// Auto-skip delay that is negative or not finite.
    #[error("time until skip must be finite and non-negative, got {0}")]
    InvalidSkipDelay(f32),

    /// No player is registered for the requested role.
    #[error("no dialogue player is registered for role \"{0}\"")]
    UnknownRole(String),
}
