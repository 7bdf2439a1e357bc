//! Static checks over story content.
//!
//! The engine silently ignores conditions and changes that point at an
//! undeclared id or at an entity of the wrong kind. Such references are
//! almost always authoring mistakes, so this module reports them up front.

use std::fmt;

use crate::change::Change;
use crate::condition::Condition;
use crate::entity::{Entities, EntityId, EntityKind};
use crate::interaction::Interaction;
use crate::rule::RuleId;
use crate::story::Story;

/// Where in the content a reference was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Site {
    /// The n-th change of the start list (0-based).
    Start(usize),
    /// The interaction matcher of a rule.
    Interaction(RuleId),
    /// The n-th condition of a rule (0-based).
    Condition(RuleId, usize),
    /// The n-th change of a rule (0-based).
    Change(RuleId, usize),
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start(n) => write!(f, "start change {}", n + 1),
            Self::Interaction(rule) => write!(f, "rule {rule} interaction"),
            Self::Condition(rule, n) => write!(f, "rule {rule} condition {}", n + 1),
            Self::Change(rule, n) => write!(f, "rule {rule} change {}", n + 1),
        }
    }
}

/// A reference that the engine will treat as a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintWarning {
    /// Where the reference appears.
    pub site: Site,
    /// The referenced id.
    pub id: EntityId,
    /// The kind the reference requires, or `None` if any kind will do.
    pub expected: Option<EntityKind>,
    /// The declared kind of the id, or `None` if it was never declared.
    pub found: Option<EntityKind>,
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.expected, self.found) {
            (_, None) => write!(f, "{}: \"{}\" is not declared", self.site, self.id),
            (Some(expected), Some(found)) => write!(
                f,
                "{}: \"{}\" is {}, expected {}",
                self.site,
                self.id,
                with_article(found),
                with_article(expected)
            ),
            (None, Some(_)) => write!(f, "{}: \"{}\"", self.site, self.id),
        }
    }
}

fn with_article(kind: EntityKind) -> String {
    match kind {
        EntityKind::Item => format!("an {kind}"),
        EntityKind::Character | EntityKind::Location => format!("a {kind}"),
    }
}

type Reference<'a> = (&'a EntityId, Option<EntityKind>);

fn condition_references(condition: &Condition) -> Vec<Reference<'_>> {
    use EntityKind::{Character, Item, Location};

    match condition {
        Condition::CurrentLocationIs(location) | Condition::CurrentLocationIsNot(location) => {
            vec![(location, Some(Location))]
        }
        Condition::CurrentSceneIs(_) => Vec::new(),
        Condition::CharacterIsInLocation {
            character,
            location,
        }
        | Condition::CharacterIsNotInLocation {
            character,
            location,
        } => vec![(character, Some(Character)), (location, Some(Location))],
        Condition::ItemIsInLocation { item, location }
        | Condition::ItemIsNotInLocation { item, location } => {
            vec![(item, Some(Item)), (location, Some(Location))]
        }
        Condition::ItemIsInInventory(item) | Condition::ItemIsNotInInventory(item) => {
            vec![(item, Some(Item))]
        }
        Condition::HasPreviouslyInteractedWith(id)
        | Condition::HasNotPreviouslyInteractedWith(id) => vec![(id, None)],
    }
}

fn change_references(change: &Change) -> Vec<Reference<'_>> {
    use EntityKind::{Character, Item, Location};

    match change {
        Change::MoveCharacterToLocation {
            character,
            location,
        } => vec![(character, Some(Character)), (location, Some(Location))],
        Change::MoveCharacterOffScreen(character) => vec![(character, Some(Character))],
        Change::MoveItemToLocation { item, location }
        | Change::MoveItemToLocationFixed { item, location } => {
            vec![(item, Some(Item)), (location, Some(Location))]
        }
        Change::MoveItemToInventory(item) | Change::MoveItemOffScreen(item) => {
            vec![(item, Some(Item))]
        }
        Change::RevealLocation(location)
        | Change::HideLocation(location)
        | Change::SetCurrentLocation(location) => vec![(location, Some(Location))],
        Change::LoadScene(_) | Change::EndStory(_) => Vec::new(),
    }
}

/// Check every reference in `story` against its declarations.
pub fn lint(story: &Story) -> Vec<LintWarning> {
    let entities = Entities::initialize(story.characters(), story.items(), story.locations());
    let mut warnings = Vec::new();

    let mut check = |site: Site, (id, expected): Reference<'_>| {
        let found = entities.kind_of(id);
        let wrong_kind = matches!((expected, found), (Some(e), Some(f)) if e != f);
        if found.is_none() || wrong_kind {
            warnings.push(LintWarning {
                site,
                id: id.clone(),
                expected,
                found,
            });
        }
    };

    for (n, change) in story.start().iter().enumerate() {
        for reference in change_references(change) {
            check(Site::Start(n), reference);
        }
    }

    for (rule_id, rule) in story.rules().iter() {
        if let Interaction::WithId(id) = &rule.interaction {
            check(Site::Interaction(rule_id), (id, None));
        }
        for (n, condition) in rule.conditions.iter().enumerate() {
            for reference in condition_references(condition) {
                check(Site::Condition(rule_id, n), reference);
            }
        }
        for (n, change) in rule.changes.iter().enumerate() {
            for reference in change_references(change) {
                check(Site::Change(rule_id, n), reference);
            }
        }
    }

    warnings
}
