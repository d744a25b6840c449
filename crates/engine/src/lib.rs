//! Metallic Guardian Engine library.
//!
//! Runs the rule system against a store of actors: derived-data
//! preparation, guardian sheet actions, the combat tracker and check rolls.
//!
//! ## Structure
//!
//! - `use_cases/` - User story orchestration over the actor store
//! - `infrastructure/` - Ports, adapters, configuration and roster files
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
