use serde::{Deserialize, Serialize};

use crate::entity::{EntityId, EntityKind};
use crate::world::WorldState;

/// Which triggering entities a rule responds to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interaction {
    /// Exactly one entity.
    WithId(EntityId),
    /// Any declared item.
    WithAnyItem,
    /// Any declared location.
    WithAnyLocation,
    /// Any declared character.
    WithAnyCharacter,
    /// Any id at all, declared or not.
    WithAnything,
}

impl Interaction {
    /// True if an interaction with `trigger` falls under this matcher.
    pub fn matches(&self, world: &WorldState, trigger: &EntityId) -> bool {
        match self {
            Self::WithId(id) => id == trigger,
            Self::WithAnyItem => world.entities.kind_of(trigger) == Some(EntityKind::Item),
            Self::WithAnyLocation => world.entities.kind_of(trigger) == Some(EntityKind::Location),
            Self::WithAnyCharacter => {
                world.entities.kind_of(trigger) == Some(EntityKind::Character)
            }
            Self::WithAnything => true,
        }
    }
}
