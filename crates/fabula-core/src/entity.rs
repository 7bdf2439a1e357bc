use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a character, item or location.
///
/// Ids are unique across all three kinds: no character may share an id with
/// an item or a location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Create an id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// The kind of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A person or creature that can appear in a location.
    Character,
    /// An object that can lie in a location or be carried.
    Item,
    /// A place the player can visit.
    Location,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Character => write!(f, "character"),
            Self::Item => write!(f, "item"),
            Self::Location => write!(f, "location"),
        }
    }
}

/// Where a character currently is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterPlacement {
    /// Not present anywhere in the story world.
    OffScreen,
    /// Standing in the given location.
    AtLocation(EntityId),
}

/// Where an item currently is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemPlacement {
    /// Not present anywhere in the story world.
    OffScreen,
    /// Carried by the player.
    InInventory,
    /// Lying in the given location.
    AtLocation(EntityId),
}

/// The mutable state of a single entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityState {
    /// State of a character.
    Character {
        /// Current placement.
        placement: CharacterPlacement,
    },
    /// State of an item.
    Item {
        /// A fixed item is never picked up by the default take action.
        fixed: bool,
        /// Current placement.
        placement: ItemPlacement,
    },
    /// State of a location.
    Location {
        /// Whether the player can currently travel here.
        visible: bool,
    },
}

impl EntityState {
    /// The kind of entity this state belongs to.
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Character { .. } => EntityKind::Character,
            Self::Item { .. } => EntityKind::Item,
            Self::Location { .. } => EntityKind::Location,
        }
    }

    /// True if this is a character or item placed at `location`.
    pub fn is_at(&self, location: &EntityId) -> bool {
        match self {
            Self::Character {
                placement: CharacterPlacement::AtLocation(at),
            }
            | Self::Item {
                placement: ItemPlacement::AtLocation(at),
                ..
            } => at == location,
            _ => false,
        }
    }

    /// True if this is an item in the player's inventory.
    pub fn is_in_inventory(&self) -> bool {
        matches!(
            self,
            Self::Item {
                placement: ItemPlacement::InInventory,
                ..
            }
        )
    }

    /// True if this is a location the player can see.
    pub fn is_visible_location(&self) -> bool {
        matches!(self, Self::Location { visible: true })
    }

    /// True if this is an item marked as fixed.
    pub fn is_fixed_item(&self) -> bool {
        matches!(self, Self::Item { fixed: true, .. })
    }
}

/// The entity store: every declared entity and its current state.
///
/// The set of ids is fixed when the store is initialized. Updates replace
/// the state of an existing id and ignore ids that were never declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entities {
    states: BTreeMap<EntityId, EntityState>,
    /// Characters, then items, then locations, each in declaration order.
    #[serde(skip)]
    order: Vec<EntityId>,
}

impl Entities {
    /// Build the initial store.
    ///
    /// Characters start off-screen, items start off-screen and not fixed,
    /// and locations start hidden. When an id is listed twice the first
    /// declaration wins; [`crate::Story::new`] rejects such content before
    /// it gets here.
    pub fn initialize<'a>(
        characters: impl IntoIterator<Item = &'a EntityId>,
        items: impl IntoIterator<Item = &'a EntityId>,
        locations: impl IntoIterator<Item = &'a EntityId>,
    ) -> Self {
        let mut entities = Self {
            states: BTreeMap::new(),
            order: Vec::new(),
        };

        for id in characters {
            entities.declare(
                id,
                EntityState::Character {
                    placement: CharacterPlacement::OffScreen,
                },
            );
        }
        for id in items {
            entities.declare(
                id,
                EntityState::Item {
                    fixed: false,
                    placement: ItemPlacement::OffScreen,
                },
            );
        }
        for id in locations {
            entities.declare(id, EntityState::Location { visible: false });
        }

        entities
    }

    fn declare(&mut self, id: &EntityId, state: EntityState) {
        if !self.states.contains_key(id) {
            self.states.insert(id.clone(), state);
            self.order.push(id.clone());
        }
    }

    /// Get the state of an entity.
    pub fn get(&self, id: &EntityId) -> Option<&EntityState> {
        self.states.get(id)
    }

    /// Get the kind of an entity, if it was declared.
    pub fn kind_of(&self, id: &EntityId) -> Option<EntityKind> {
        self.states.get(id).map(EntityState::kind)
    }

    /// Update the state of `id` in place.
    ///
    /// Undeclared ids leave the store unchanged.
    pub fn update(&mut self, id: &EntityId, update: impl FnOnce(&mut EntityState)) {
        if let Some(state) = self.states.get_mut(id) {
            update(state);
        }
    }

    /// Iterate over all entities in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&EntityId, &EntityState)> {
        self.order
            .iter()
            .filter_map(|id| self.states.get(id).map(|state| (id, state)))
    }

    /// Iterate over the ids of one kind in declaration order.
    pub fn ids_of_kind(&self, kind: EntityKind) -> impl Iterator<Item = &EntityId> {
        self.iter()
            .filter(move |(_, state)| state.kind() == kind)
            .map(|(id, _)| id)
    }

    /// Number of declared entities.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True if nothing was declared.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
