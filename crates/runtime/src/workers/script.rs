//! Worker that feeds fight hooks to the configured script.

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::api::{FightHook, FightScript, RuntimeHandle};

pub struct ScriptWorker {
    script: Box<dyn FightScript>,
    hook_rx: mpsc::Receiver<FightHook>,
    handle: RuntimeHandle,
}

impl ScriptWorker {
    pub fn new(
        script: Box<dyn FightScript>,
        hook_rx: mpsc::Receiver<FightHook>,
        handle: RuntimeHandle,
    ) -> Self {
        Self {
            script,
            hook_rx,
            handle,
        }
    }

    /// Runs until the simulation worker drops its hook sender.
    pub async fn run(mut self) {
        while let Some(hook) = self.hook_rx.recv().await {
            if let Err(error) = self.script.on_fight(hook, &self.handle).await {
                warn!(actor = %hook.actor, opponent = %hook.opponent, %error, "fight script failed");
            }
        }
        info!("ScriptWorker stopped");
    }
}
