//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific area of the sheet or the
//! turn tracker. Use cases orchestrate the actor store and the domain rules.

pub mod check_roll;
pub mod combat;
pub mod guardian_sheet;
pub mod preparation;

// Re-export main types
pub use check_roll::{CheckRollError, CheckRollOutcome, CheckRolls, DamageRollOutcome};
pub use combat::{CombatError, CombatTracker, TurnEntry};
pub use guardian_sheet::{GuardianSheet, GuardianSheetError};
pub use preparation::{Preparation, PreparationError};
