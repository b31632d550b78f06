//! Traits describing data owned by subsystems outside the engine.
//!
//! Oracles expose the room graph (exits and range checks), production and
//! building definitions, engine tunables, and deterministic randomness. The
//! [`Env`] aggregate bundles them so actions and the combat resolver can reach
//! everything they need without coupling to concrete implementations.
mod config;
mod error;
mod map;
mod production;
mod rng;

pub use config::ConfigOracle;
pub use error::OracleError;
pub use map::MapOracle;
pub use production::{
    Building, BuildingId, Production, ProductionId, ProductionOracle, Profession, Requirements,
};
pub use rng::{Dice, PcgRng, RngOracle, compute_seed};
#[cfg(test)]
pub(crate) use rng::ScriptedRng;

/// Aggregates read-only oracles required by actions and combat.
#[derive(Clone, Copy, Debug)]
pub struct Env<'a, M, P, C, R>
where
    M: MapOracle + ?Sized,
    P: ProductionOracle + ?Sized,
    C: ConfigOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    map: Option<&'a M>,
    productions: Option<&'a P>,
    config: Option<&'a C>,
    rng: Option<&'a R>,
}

pub type GameEnv<'a> = Env<
    'a,
    dyn MapOracle + 'a,
    dyn ProductionOracle + 'a,
    dyn ConfigOracle + 'a,
    dyn RngOracle + 'a,
>;

impl<'a, M, P, C, R> Env<'a, M, P, C, R>
where
    M: MapOracle + ?Sized,
    P: ProductionOracle + ?Sized,
    C: ConfigOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(
        map: Option<&'a M>,
        productions: Option<&'a P>,
        config: Option<&'a C>,
        rng: Option<&'a R>,
    ) -> Self {
        Self {
            map,
            productions,
            config,
            rng,
        }
    }

    pub fn with_all(map: &'a M, productions: &'a P, config: &'a C, rng: &'a R) -> Self {
        Self::new(Some(map), Some(productions), Some(config), Some(rng))
    }

    pub fn empty() -> Self {
        Self {
            map: None,
            productions: None,
            config: None,
            rng: None,
        }
    }

    /// Returns the MapOracle, or an error if not available.
    pub fn map(&self) -> Result<&'a M, OracleError> {
        self.map.ok_or(OracleError::MapNotAvailable)
    }

    /// Returns the ProductionOracle, or an error if not available.
    pub fn productions(&self) -> Result<&'a P, OracleError> {
        self.productions.ok_or(OracleError::ProductionsNotAvailable)
    }

    /// Returns the ConfigOracle, or an error if not available.
    pub fn config(&self) -> Result<&'a C, OracleError> {
        self.config.ok_or(OracleError::ConfigNotAvailable)
    }

    /// Returns the RngOracle, or an error if not available.
    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }
}

impl<'a, M, P, C, R> Env<'a, M, P, C, R>
where
    M: MapOracle + 'a,
    P: ProductionOracle + 'a,
    C: ConfigOracle + 'a,
    R: RngOracle + 'a,
{
    /// Converts this environment into a trait-object based `GameEnv`.
    pub fn as_game_env(&self) -> GameEnv<'a> {
        let map: Option<&'a dyn MapOracle> = self.map.map(|map| map as _);
        let productions: Option<&'a dyn ProductionOracle> =
            self.productions.map(|productions| productions as _);
        let config: Option<&'a dyn ConfigOracle> = self.config.map(|config| config as _);
        let rng: Option<&'a dyn RngOracle> = self.rng.map(|rng| rng as _);
        Env::new(map, productions, config, rng)
    }
}
