//! Rule resolution: choosing the single rule that answers an interaction.

use fabula_core::{
    Change, Condition, EntityId, EntityKind, Interaction, Rule, RuleBook, RuleId, WorldState,
    change_world,
};

/// Bonus for rules scoped to a scene.
const SCENE_WEIGHT: u32 = 300;
/// Bonus for rules that name their trigger exactly.
const EXACT_ID_WEIGHT: u32 = 200;
/// Bonus for rules that match a whole entity kind.
const ANY_KIND_WEIGHT: u32 = 100;

/// The outcome of one interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The world after the interaction.
    pub world: WorldState,
    /// The rule that fired, or `None` if the default action was taken.
    pub rule: Option<RuleId>,
}

fn matcher_weight(interaction: &Interaction) -> u32 {
    match interaction {
        Interaction::WithId(_) => EXACT_ID_WEIGHT,
        Interaction::WithAnyItem | Interaction::WithAnyLocation | Interaction::WithAnyCharacter => {
            ANY_KIND_WEIGHT
        }
        Interaction::WithAnything => 0,
    }
}

/// How specific a rule is. Higher scores win.
///
/// Every condition counts one point, a scene condition adds 300, and the
/// matcher adds 200 for an exact id or 100 for a whole kind.
pub fn specificity(rule: &Rule) -> u32 {
    let scene = if rule.conditions.iter().any(Condition::is_scene_condition) {
        SCENE_WEIGHT
    } else {
        0
    };
    rule.conditions.len() as u32 + scene + matcher_weight(&rule.interaction)
}

/// Ids of every rule that matches `trigger` in `world`, in declaration order.
pub fn candidates(world: &WorldState, trigger: &EntityId, rules: &RuleBook) -> Vec<RuleId> {
    rules
        .iter()
        .filter(|(_, rule)| rule.matches(world, trigger))
        .map(|(id, _)| id)
        .collect()
}

/// Pick the most specific matching rule.
///
/// Among equally specific rules the one declared last wins.
pub fn select(world: &WorldState, trigger: &EntityId, rules: &RuleBook) -> Option<RuleId> {
    // `max_by_key` returns the last of several equal maxima.
    rules
        .iter()
        .filter(|(_, rule)| rule.matches(world, trigger))
        .max_by_key(|(_, rule)| specificity(rule))
        .map(|(id, _)| id)
}

/// The changes applied when no rule answers an interaction.
///
/// Visiting a location moves the player there and touching a loose item
/// picks it up. Characters, fixed items and unknown ids do nothing.
pub fn default_changes(world: &WorldState, trigger: &EntityId) -> Vec<Change> {
    match world.entities.get(trigger) {
        Some(state) => match state.kind() {
            EntityKind::Location => vec![Change::SetCurrentLocation(trigger.clone())],
            EntityKind::Item if !state.is_fixed_item() => {
                vec![Change::MoveItemToInventory(trigger.clone())]
            }
            EntityKind::Item | EntityKind::Character => Vec::new(),
        },
        None => Vec::new(),
    }
}

/// Resolve an interaction with `trigger` against `rules`.
///
/// Never fails: if no rule matches, the default action for the trigger's
/// kind is applied instead. Either way the trigger is appended to the
/// history of the resulting world.
pub fn resolve(world: &WorldState, trigger: &EntityId, rules: &RuleBook) -> Resolution {
    let selected = select(world, trigger, rules).and_then(|id| rules.get(id).map(|rule| (id, rule)));

    let (next, rule) = match selected {
        Some((id, rule)) => {
            tracing::trace!(%trigger, rule = %id, summary = %rule.summary, "rule matched");
            (change_world(&rule.changes, world.clone()), Some(id))
        }
        None => {
            tracing::trace!(%trigger, "no rule matched, applying default action");
            let changes = default_changes(world, trigger);
            (change_world(&changes, world.clone()), None)
        }
    };

    Resolution {
        world: next.interacted_with(trigger),
        rule,
    }
}
