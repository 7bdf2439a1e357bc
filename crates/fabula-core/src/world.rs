use serde::Serialize;

use crate::entity::{Entities, EntityId, EntityKind, EntityState};

/// A complete snapshot of the story world.
///
/// World states are values: every interaction produces a new one from the
/// previous state instead of editing it in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorldState {
    /// The location the player is in. Once set, always a visible location.
    pub current_location: Option<EntityId>,
    /// The active scene. Empty until a scene is loaded.
    pub current_scene: String,
    /// Every id the player has interacted with, oldest first.
    pub history: Vec<EntityId>,
    /// State of every declared entity.
    pub entities: Entities,
    /// Set once the story has reached an ending.
    pub ending: Option<String>,
}

impl WorldState {
    /// A fresh world with no location, no scene and no history.
    pub fn new(entities: Entities) -> Self {
        Self {
            current_location: None,
            current_scene: String::new(),
            history: Vec::new(),
            entities,
            ending: None,
        }
    }

    /// True once an ending has been reached.
    pub fn is_ended(&self) -> bool {
        self.ending.is_some()
    }

    /// True if `id` appears anywhere in the interaction history.
    pub fn has_interacted_with(&self, id: &EntityId) -> bool {
        self.history.contains(id)
    }

    /// Returns this world with `id` appended to the history.
    pub fn interacted_with(mut self, id: &EntityId) -> Self {
        self.history.push(id.clone());
        self
    }

    /// True if `state` is a character or item standing in the current location.
    fn is_present(&self, state: &EntityState) -> bool {
        self.current_location
            .as_ref()
            .is_some_and(|here| state.is_at(here))
    }

    /// Characters and items in the current location, in declaration order.
    pub fn present(&self) -> impl Iterator<Item = &EntityId> {
        self.entities
            .iter()
            .filter(|(_, state)| self.is_present(state))
            .map(|(id, _)| id)
    }

    /// Items the player is carrying, in declaration order.
    pub fn inventory(&self) -> impl Iterator<Item = &EntityId> {
        self.entities
            .iter()
            .filter(|(_, state)| state.is_in_inventory())
            .map(|(id, _)| id)
    }

    /// Locations the player can see, in declaration order.
    pub fn visible_locations(&self) -> impl Iterator<Item = &EntityId> {
        self.entities
            .iter()
            .filter(|(_, state)| state.is_visible_location())
            .map(|(id, _)| id)
    }

    /// Every entity the player may interact with right now.
    ///
    /// Characters in the current location come first, then items in the
    /// current location or the inventory, then visible locations. Within
    /// each group ids follow declaration order, so the enumeration is
    /// identical across runs.
    pub fn interactables(&self) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|(_, state)| match state.kind() {
                EntityKind::Character => self.is_present(state),
                EntityKind::Item => self.is_present(state) || state.is_in_inventory(),
                EntityKind::Location => state.is_visible_location(),
            })
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// The externally observable part of this world.
    pub fn observe(&self) -> Observation {
        Observation {
            current_location: self.current_location.clone(),
            current_scene: self.current_scene.clone(),
            present: self.present().cloned().collect(),
            inventory: self.inventory().cloned().collect(),
            visible_locations: self.visible_locations().cloned().collect(),
            ending: self.ending.clone(),
        }
    }
}

/// What the player can observe of a world state.
///
/// Two worlds with equal observations are interchangeable for exploration,
/// even if they were reached through different interactions. History and
/// the placement of entities outside the current location are left out.
/// The id lists follow declaration order, which makes list equality the
/// same as set equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Observation {
    /// The location the player is in.
    pub current_location: Option<EntityId>,
    /// The active scene.
    pub current_scene: String,
    /// Characters and items in the current location.
    pub present: Vec<EntityId>,
    /// Items the player is carrying.
    pub inventory: Vec<EntityId>,
    /// Locations the player can see.
    pub visible_locations: Vec<EntityId>,
    /// The ending, if one was reached.
    pub ending: Option<String>,
}
