//! Application state and composition.

use std::sync::Arc;

use metallic_guardian_domain::{GameSystem, MetallicGuardianSystem};

use crate::infrastructure::{
    config::EngineConfig,
    ports::{ActorRepo, RandomPort},
    random::ThreadRandom,
};
use crate::use_cases;

/// Main application state.
///
/// Holds the actor store and all use cases.
pub struct App {
    pub repo: Arc<dyn ActorRepo>,
    pub system: Arc<dyn GameSystem>,
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub preparation: Arc<use_cases::Preparation>,
    pub guardian_sheet: use_cases::GuardianSheet,
    pub combat: use_cases::CombatTracker,
    pub checks: use_cases::CheckRolls,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(repo: Arc<dyn ActorRepo>, config: &EngineConfig) -> Self {
        Self::with_random(repo, Arc::new(ThreadRandom::new()), config)
    }

    /// Same as [`App::new`] with an explicit dice source.
    pub fn with_random(
        repo: Arc<dyn ActorRepo>,
        random: Arc<dyn RandomPort>,
        config: &EngineConfig,
    ) -> Self {
        let system: Arc<dyn GameSystem> = Arc::new(MetallicGuardianSystem::new());

        let preparation = Arc::new(use_cases::Preparation::new(repo.clone(), system.clone()));
        let use_cases = UseCases {
            guardian_sheet: use_cases::GuardianSheet::new(repo.clone(), preparation.clone()),
            combat: use_cases::CombatTracker::new(repo.clone(), config.initiative),
            checks: use_cases::CheckRolls::new(repo.clone(), random, config.check_dice),
            preparation,
        };

        tracing::debug!(
            system = system.system_id(),
            tie_break = config.initiative.tie_break,
            check_dice = %config.check_dice,
            "App composed"
        );

        Self {
            repo,
            system,
            use_cases,
        }
    }
}
