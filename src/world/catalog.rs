//! Static data tables shared by a level's controllers.

use crate::combat::Arsenal;
use crate::enemies::MonsterRegistry;

/// Weapons, spells, and species, loaded once and shared read-only.
#[derive(Debug, Clone, Default)]
pub struct GameCatalog {
    pub arsenal: Arsenal,
    pub monsters: MonsterRegistry,
}
