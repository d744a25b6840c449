//! NPC derivation.

use crate::entities::NpcData;
use crate::game_systems::traits::CalculationEngine;

/// `xp` follows `cr` when a challenge rating is set; otherwise it is left as is.
pub fn prepare_npc(engine: &dyn CalculationEngine, data: &mut NpcData) {
    if let Some(cr) = data.cr {
        data.xp = Some(engine.challenge_xp(cr));
    }
}
