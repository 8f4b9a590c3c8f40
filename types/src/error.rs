use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown format: {0}")]
    Format(String),

    #[error("Expected Play or Draw, got: {0}")]
    PlayDraw(String),

    #[error("Expected Pre-Sideboard or Post-Sideboard, got: {0}")]
    SideboardStatus(String),

    #[error("Game score must look like <wins>-<losses>, got: {0}")]
    GameScore(String),
}
