//! # Action Resolver
//!
//! Maps an action keyword to the direction and element kind used for the
//! `up` method, and to the plan used for the `down` method.
//!
//! | keyword           | up               | down                 |
//! |-------------------|------------------|----------------------|
//! | `create`          | Add · Column     | whole-table drop     |
//! | `create_function` | Add · Function   | Drop · Function      |
//! | `create_trigger`  | Add · Trigger    | Drop · Trigger       |
//! | `update`          | Add · Column     | Drop · Column        |
//! | `remove`          | Drop · Column    | Drop · Column        |
//!
//! The two halves are checked separately; either can reject a keyword.

use stubsmith_core::{Action, Direction, ElementKind, EngineError, EngineResult};

/// How the `down` method body is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownPlan {
    /// Render every field in the given direction
    Fields(Direction),
    /// Replace the body with a single drop of the whole table
    DropTable,
}

/// Both halves of a resolved action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub action: Action,
    pub kind: ElementKind,
    pub up: Direction,
    pub down: DownPlan,
}

/// Resolve the `up` half: direction and element kind
pub fn resolve_up(keyword: &str) -> EngineResult<(Action, Direction, ElementKind)> {
    let action = Action::parse(keyword).ok_or_else(|| EngineError::unsupported_action(keyword, "up"))?;
    let kind = element_kind(action, keyword, "up")?;
    let direction = if action.verb() == "remove" {
        Direction::Drop
    } else {
        Direction::Add
    };
    Ok((action, direction, kind))
}

/// Resolve the `down` half
pub fn resolve_down(keyword: &str) -> EngineResult<DownPlan> {
    let action =
        Action::parse(keyword).ok_or_else(|| EngineError::unsupported_action(keyword, "down"))?;
    if action.is_table_create() {
        return Ok(DownPlan::DropTable);
    }
    element_kind(action, keyword, "down")?;
    Ok(DownPlan::Fields(Direction::Drop))
}

/// Resolve both halves; the `up` half is checked first
pub fn resolve(keyword: &str) -> EngineResult<Resolution> {
    let (action, up, kind) = resolve_up(keyword)?;
    let down = resolve_down(keyword)?;
    Ok(Resolution {
        action,
        kind,
        up,
        down,
    })
}

fn element_kind(action: Action, keyword: &str, path: &str) -> EngineResult<ElementKind> {
    ElementKind::from_noun(action.noun()).ok_or_else(|| EngineError::unsupported_action(keyword, path))
}

// ============================================================================
// Tests
// ============================================================================
