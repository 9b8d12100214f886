//! One match: the controller plus the engine process that serves it.

use std::path::PathBuf;

use engine::{EngineConfig, EngineEvent, StockfishEngine};

use crate::controller::MatchController;
use crate::shell::MatchSetup;

pub struct PlaySession {
    pub controller: MatchController,
    engine: Option<StockfishEngine>,
}

impl PlaySession {
    /// Build the controller and spawn an engine at the profile's skill
    /// level. An engine that fails to start leaves the match playable
    /// without replies.
    pub async fn start(
        setup: MatchSetup,
        engine_path: Option<PathBuf>,
    ) -> Result<Self, chess::GameError> {
        let mut controller = match setup.detected_fen.as_deref() {
            Some(fen) => MatchController::from_detected(setup.profile.clone(), fen)?,
            None => MatchController::new_standard(setup.profile.clone()),
        };

        let config = EngineConfig {
            path: engine_path,
            skill_level: Some(setup.profile.skill_level()),
        };
        let engine = match StockfishEngine::spawn_with_config(config).await {
            Ok(engine) => Some(engine),
            Err(e) => {
                controller.set_engine_offline(format!("Engine unavailable: {}", e));
                None
            }
        };

        let mut session = Self { controller, engine };
        session.flush_engine_commands().await;
        Ok(session)
    }

    /// Without an engine process. Used when no engine is wanted at all.
    pub fn offline(controller: MatchController) -> Self {
        Self {
            controller,
            engine: None,
        }
    }

    /// Forward queued controller commands to the engine, in order.
    pub async fn flush_engine_commands(&mut self) {
        let commands = self.controller.drain_engine_commands();
        let Some(engine) = self.engine.as_ref() else {
            return;
        };
        let mut failure = None;
        for command in commands {
            if let Err(e) = engine.send_command(command).await {
                failure = Some(e);
                break;
            }
        }
        if let Some(e) = failure {
            self.engine = None;
            self.controller
                .set_engine_offline(format!("Engine connection lost: {}", e));
        }
    }

    /// Feed one engine event to the controller. `None` means the engine's
    /// output closed.
    pub async fn handle_engine_event(&mut self, event: Option<EngineEvent>) {
        match event {
            Some(event) => {
                self.controller.on_engine_event(event);
                self.flush_engine_commands().await;
            }
            None => {
                self.engine = None;
                self.controller.set_engine_offline("Engine stopped responding");
            }
        }
    }

    pub async fn shutdown(mut self) {
        if let Some(engine) = self.engine.take() {
            engine.shutdown().await;
        }
    }
}

/// Next event from the session's engine. Pending forever when there is no
/// session or no engine, so it can sit in a `select!` arm unconditionally.
pub async fn next_engine_event(session: &mut Option<PlaySession>) -> Option<EngineEvent> {
    match session.as_mut().and_then(|s| s.engine.as_mut()) {
        Some(engine) => engine.recv_event().await,
        None => std::future::pending().await,
    }
}
