//! Conditions a rule places on the world before it may fire.

use serde::{Deserialize, Serialize};

use crate::entity::{EntityId, EntityKind, EntityState};
use crate::world::WorldState;

/// A predicate over a world state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// The player is in the given location.
    CurrentLocationIs(EntityId),
    /// The player is not in the given location.
    CurrentLocationIsNot(EntityId),
    /// The given scene is active.
    CurrentSceneIs(String),
    /// A character is in a location.
    CharacterIsInLocation {
        /// The character.
        character: EntityId,
        /// The location.
        location: EntityId,
    },
    /// A character is not in a location.
    CharacterIsNotInLocation {
        /// The character.
        character: EntityId,
        /// The location.
        location: EntityId,
    },
    /// An item is in a location.
    ItemIsInLocation {
        /// The item.
        item: EntityId,
        /// The location.
        location: EntityId,
    },
    /// An item is not in a location.
    ItemIsNotInLocation {
        /// The item.
        item: EntityId,
        /// The location.
        location: EntityId,
    },
    /// The player carries an item.
    ItemIsInInventory(EntityId),
    /// The player does not carry an item.
    ItemIsNotInInventory(EntityId),
    /// The player has interacted with the given entity before.
    HasPreviouslyInteractedWith(EntityId),
    /// The player has never interacted with the given entity.
    HasNotPreviouslyInteractedWith(EntityId),
}

impl Condition {
    /// Evaluate the condition against `world`.
    pub fn matches(&self, world: &WorldState) -> bool {
        match self {
            Self::CurrentLocationIs(location) => world.current_location.as_ref() == Some(location),
            Self::CurrentLocationIsNot(location) => {
                world.current_location.as_ref() != Some(location)
            }
            Self::CurrentSceneIs(scene) => &world.current_scene == scene,
            Self::CharacterIsInLocation {
                character,
                location,
            } => is_at(world, character, EntityKind::Character, location),
            Self::CharacterIsNotInLocation {
                character,
                location,
            } => !is_at(world, character, EntityKind::Character, location),
            Self::ItemIsInLocation { item, location } => {
                is_at(world, item, EntityKind::Item, location)
            }
            Self::ItemIsNotInLocation { item, location } => {
                !is_at(world, item, EntityKind::Item, location)
            }
            Self::ItemIsInInventory(item) => is_carried(world, item),
            Self::ItemIsNotInInventory(item) => !is_carried(world, item),
            Self::HasPreviouslyInteractedWith(id) => world.has_interacted_with(id),
            Self::HasNotPreviouslyInteractedWith(id) => !world.has_interacted_with(id),
        }
    }

    /// True for conditions that scope a rule to a scene.
    pub fn is_scene_condition(&self) -> bool {
        matches!(self, Self::CurrentSceneIs(_))
    }
}

fn is_at(world: &WorldState, id: &EntityId, kind: EntityKind, location: &EntityId) -> bool {
    world
        .entities
        .get(id)
        .is_some_and(|state| state.kind() == kind && state.is_at(location))
}

fn is_carried(world: &WorldState, id: &EntityId) -> bool {
    world
        .entities
        .get(id)
        .is_some_and(EntityState::is_in_inventory)
}

/// True if every condition holds. An empty list always holds.
pub fn conditions_hold(world: &WorldState, conditions: &[Condition]) -> bool {
    conditions.iter().all(|condition| condition.matches(world))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change::{Change, change_world};
    use crate::entity::Entities;

    fn garden() -> WorldState {
        let ids = |names: &[&str]| names.iter().map(|n| EntityId::from(*n)).collect::<Vec<_>>();
        let world = WorldState::new(Entities::initialize(
            &ids(&["Harry"]),
            &ids(&["Note", "Lantern"]),
            &ids(&["Garden", "Marsh"]),
        ));
        change_world(
            &[
                Change::SetCurrentLocation("Garden".into()),
                Change::LoadScene("learnOfMystery".to_string()),
                Change::MoveCharacterToLocation {
                    character: "Harry".into(),
                    location: "Garden".into(),
                },
                Change::MoveItemToLocation {
                    item: "Lantern".into(),
                    location: "Marsh".into(),
                },
                Change::MoveItemToInventory("Note".into()),
            ],
            world,
        )
    }

    #[test]
    fn current_location() {
        let world = garden();
        assert!(Condition::CurrentLocationIs("Garden".into()).matches(&world));
        assert!(!Condition::CurrentLocationIs("Marsh".into()).matches(&world));
        assert!(Condition::CurrentLocationIsNot("Marsh".into()).matches(&world));
        assert!(!Condition::CurrentLocationIsNot("Garden".into()).matches(&world));
    }

    #[test]
    fn unset_location_is_not_anywhere() {
        let none: Vec<EntityId> = Vec::new();
        let world = WorldState::new(Entities::initialize(
            &none,
            &none,
            &[EntityId::from("Garden")],
        ));
        assert!(!Condition::CurrentLocationIs("Garden".into()).matches(&world));
        assert!(Condition::CurrentLocationIsNot("Garden".into()).matches(&world));
    }

    #[test]
    fn current_scene() {
        let world = garden();
        let scene = Condition::CurrentSceneIs("learnOfMystery".to_string());
        assert!(scene.matches(&world));
        assert!(scene.is_scene_condition());
        assert!(!Condition::CurrentSceneIs("finale".to_string()).matches(&world));
    }

    #[test]
    fn placements() {
        let world = garden();
        assert!(
            Condition::CharacterIsInLocation {
                character: "Harry".into(),
                location: "Garden".into()
            }
            .matches(&world)
        );
        assert!(
            Condition::CharacterIsNotInLocation {
                character: "Harry".into(),
                location: "Marsh".into()
            }
            .matches(&world)
        );
        assert!(
            Condition::ItemIsInLocation {
                item: "Lantern".into(),
                location: "Marsh".into()
            }
            .matches(&world)
        );
        assert!(
            !Condition::ItemIsNotInLocation {
                item: "Lantern".into(),
                location: "Marsh".into()
            }
            .matches(&world)
        );
        assert!(Condition::ItemIsInInventory("Note".into()).matches(&world));
        assert!(Condition::ItemIsNotInInventory("Lantern".into()).matches(&world));
    }

    #[test]
    fn wrong_kind_never_matches_positive_form() {
        let world = garden();
        // Harry is a character, not an item.
        let item_check = Condition::ItemIsInLocation {
            item: "Harry".into(),
            location: "Garden".into(),
        };
        assert!(!item_check.matches(&world));
        assert!(
            Condition::ItemIsNotInLocation {
                item: "Harry".into(),
                location: "Garden".into()
            }
            .matches(&world)
        );
        assert!(!Condition::ItemIsInInventory("Ghost".into()).matches(&world));
    }

    #[test]
    fn history() {
        let world = garden().interacted_with(&"Harry".into());
        assert!(Condition::HasPreviouslyInteractedWith("Harry".into()).matches(&world));
        assert!(!Condition::HasNotPreviouslyInteractedWith("Harry".into()).matches(&world));
        assert!(Condition::HasNotPreviouslyInteractedWith("Note".into()).matches(&world));
    }

    #[test]
    fn conjunction() {
        let world = garden();
        assert!(conditions_hold(&world, &[]));
        assert!(conditions_hold(
            &world,
            &[
                Condition::CurrentLocationIs("Garden".into()),
                Condition::ItemIsInInventory("Note".into()),
            ]
        ));
        assert!(!conditions_hold(
            &world,
            &[
                Condition::CurrentLocationIs("Garden".into()),
                Condition::ItemIsInInventory("Lantern".into()),
            ]
        ));
    }
}
