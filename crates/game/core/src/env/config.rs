use crate::config::GameConfig;

/// Source of engine tunables.
pub trait ConfigOracle: Send + Sync {
    fn game_config(&self) -> &GameConfig;
}

impl ConfigOracle for GameConfig {
    fn game_config(&self) -> &GameConfig {
        self
    }
}
