//! Game system implementations.
//!
//! A game system turns an actor's raw fields into derived combat numbers.
//! Each system implements the traits defined in `traits.rs`; cross-actor
//! reads go through the resolver in `resolver.rs`.

pub mod metallic_guardian;
mod resolver;
mod traits;

pub use metallic_guardian::{
    CheckTarget, DamageSlot, InitiativeInput, InitiativeRules, MetallicGuardianSystem,
};
pub use resolver::{ActorResolver, NoActors, PilotSnapshot};
pub use traits::{CalculationEngine, GameSystem};
