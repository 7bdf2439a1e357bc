use serde::{Deserialize, Serialize};

use crate::entity::{CharacterPlacement, EntityId, EntityKind, EntityState, ItemPlacement};
use crate::world::WorldState;

/// A single update to the story world.
///
/// Every change is total: when it addresses an undeclared id, or an id of
/// the wrong kind, it leaves the world unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Change {
    /// Place a character in a location.
    MoveCharacterToLocation {
        /// The character to move.
        character: EntityId,
        /// Where the character goes.
        location: EntityId,
    },
    /// Remove a character from the world.
    MoveCharacterOffScreen(EntityId),
    /// Place an item in a location where the player may pick it up.
    MoveItemToLocation {
        /// The item to move.
        item: EntityId,
        /// Where the item goes.
        location: EntityId,
    },
    /// Place an item in a location where it stays put.
    MoveItemToLocationFixed {
        /// The item to move.
        item: EntityId,
        /// Where the item goes.
        location: EntityId,
    },
    /// Put an item in the player's inventory.
    MoveItemToInventory(EntityId),
    /// Remove an item from the world.
    MoveItemOffScreen(EntityId),
    /// Make a location visible.
    RevealLocation(EntityId),
    /// Hide a location. Hiding the current location has no effect.
    HideLocation(EntityId),
    /// Move the player to a location, revealing it.
    SetCurrentLocation(EntityId),
    /// Switch to another scene.
    LoadScene(String),
    /// End the story with the given label.
    EndStory(String),
}

impl Change {
    /// Apply this change to `world`, returning the updated world.
    pub fn apply(&self, mut world: WorldState) -> WorldState {
        match self {
            Self::MoveCharacterToLocation {
                character,
                location,
            } => place_character(
                &mut world,
                character,
                CharacterPlacement::AtLocation(location.clone()),
            ),
            Self::MoveCharacterOffScreen(character) => {
                place_character(&mut world, character, CharacterPlacement::OffScreen)
            }
            Self::MoveItemToLocation { item, location } => place_item(
                &mut world,
                item,
                ItemPlacement::AtLocation(location.clone()),
                false,
            ),
            Self::MoveItemToLocationFixed { item, location } => place_item(
                &mut world,
                item,
                ItemPlacement::AtLocation(location.clone()),
                true,
            ),
            Self::MoveItemToInventory(item) => {
                place_item(&mut world, item, ItemPlacement::InInventory, false)
            }
            Self::MoveItemOffScreen(item) => {
                place_item(&mut world, item, ItemPlacement::OffScreen, false)
            }
            Self::RevealLocation(location) => set_visible(&mut world, location, true),
            Self::HideLocation(location) => {
                if world.current_location.as_ref() != Some(location) {
                    set_visible(&mut world, location, false);
                }
            }
            Self::SetCurrentLocation(location) => {
                if world.entities.kind_of(location) == Some(EntityKind::Location) {
                    set_visible(&mut world, location, true);
                    world.current_location = Some(location.clone());
                }
            }
            Self::LoadScene(scene) => world.current_scene = scene.clone(),
            Self::EndStory(ending) => world.ending = Some(ending.clone()),
        }
        world
    }
}

fn place_character(world: &mut WorldState, id: &EntityId, to: CharacterPlacement) {
    world.entities.update(id, |state| {
        if let EntityState::Character { placement } = state {
            *placement = to;
        }
    });
}

fn place_item(world: &mut WorldState, id: &EntityId, to: ItemPlacement, fix: bool) {
    world.entities.update(id, |state| {
        if let EntityState::Item { fixed, placement } = state {
            *fixed = fix;
            *placement = to;
        }
    });
}

fn set_visible(world: &mut WorldState, id: &EntityId, to: bool) {
    world.entities.update(id, |state| {
        if let EntityState::Location { visible } = state {
            *visible = to;
        }
    });
}

/// Apply a list of changes to `world`.
///
/// The list is folded from its last element to its first, so when two
/// changes set the same field the one listed earlier wins.
pub fn change_world(changes: &[Change], world: WorldState) -> WorldState {
    changes
        .iter()
        .rev()
        .fold(world, |world, change| change.apply(world))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entities;
    use proptest::prelude::*;

    fn world() -> WorldState {
        let ids = |names: &[&str]| names.iter().map(|n| EntityId::from(*n)).collect::<Vec<_>>();
        WorldState::new(Entities::initialize(
            &ids(&["Harry"]),
            &ids(&["Note", "Well"]),
            &ids(&["Garden", "Marsh"]),
        ))
    }

    #[test]
    fn move_character() {
        let world = Change::MoveCharacterToLocation {
            character: "Harry".into(),
            location: "Marsh".into(),
        }
        .apply(world());
        assert!(world.entities.get(&"Harry".into()).unwrap().is_at(&"Marsh".into()));

        let world = Change::MoveCharacterOffScreen("Harry".into()).apply(world);
        assert_eq!(
            world.entities.get(&"Harry".into()),
            Some(&EntityState::Character {
                placement: CharacterPlacement::OffScreen
            })
        );
    }

    #[test]
    fn fixed_flag_follows_the_last_placement() {
        let world = Change::MoveItemToLocationFixed {
            item: "Well".into(),
            location: "Garden".into(),
        }
        .apply(world());
        assert!(world.entities.get(&"Well".into()).unwrap().is_fixed_item());

        let world = Change::MoveItemToInventory("Well".into()).apply(world);
        let well = world.entities.get(&"Well".into()).unwrap();
        assert!(well.is_in_inventory());
        assert!(!well.is_fixed_item());
    }

    #[test]
    fn wrong_kind_is_noop() {
        let before = world();
        let after = change_world(
            &[
                Change::MoveItemToInventory("Harry".into()),
                Change::RevealLocation("Note".into()),
                Change::MoveCharacterOffScreen("Garden".into()),
                Change::SetCurrentLocation("Note".into()),
                Change::MoveItemOffScreen("Nobody".into()),
            ],
            before.clone(),
        );
        assert_eq!(after, before);
    }

    #[test]
    fn set_current_location_reveals_it() {
        let world = Change::SetCurrentLocation("Garden".into()).apply(world());
        assert_eq!(world.current_location, Some("Garden".into()));
        assert!(world.entities.get(&"Garden".into()).unwrap().is_visible_location());
    }

    #[test]
    fn current_location_cannot_be_hidden() {
        let world = change_world(
            &[
                Change::HideLocation("Garden".into()),
                Change::HideLocation("Marsh".into()),
                Change::SetCurrentLocation("Garden".into()),
                Change::RevealLocation("Marsh".into()),
            ],
            world(),
        );
        let visible: Vec<&EntityId> = world.visible_locations().collect();
        assert_eq!(visible, vec![&EntityId::from("Garden")]);
    }

    #[test]
    fn earlier_change_wins() {
        let world = change_world(
            &[
                Change::LoadScene("first".to_string()),
                Change::LoadScene("second".to_string()),
            ],
            world(),
        );
        assert_eq!(world.current_scene, "first");

        let world = change_world(
            &[
                Change::SetCurrentLocation("Marsh".into()),
                Change::SetCurrentLocation("Garden".into()),
            ],
            world,
        );
        assert_eq!(world.current_location, Some("Marsh".into()));
    }

    #[test]
    fn end_story_sets_ending() {
        let world = Change::EndStory("solved".to_string()).apply(world());
        assert_eq!(world.ending.as_deref(), Some("solved"));
    }

    #[test]
    fn serde_uses_snake_case_tags() {
        let change: Change = serde_json::from_str(
            r#"{ "move_item_to_location": { "item": "Note", "location": "Marsh" } }"#,
        )
        .unwrap();
        assert_eq!(
            change,
            Change::MoveItemToLocation {
                item: "Note".into(),
                location: "Marsh".into()
            }
        );

        let change: Change = serde_json::from_str(r#"{ "load_scene": "intro" }"#).unwrap();
        assert_eq!(change, Change::LoadScene("intro".to_string()));
    }

    proptest! {
        #[test]
        fn first_listed_scene_wins(scenes in proptest::collection::vec("[a-z]{1,8}", 1..6)) {
            let changes: Vec<Change> = scenes.iter().cloned().map(Change::LoadScene).collect();
            let world = change_world(&changes, world());
            prop_assert_eq!(&world.current_scene, &scenes[0]);
        }
    }
}
