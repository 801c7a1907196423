//! Tactical condition evaluation.
//!
//! Up to two [`TacticalCondition`]s per skill slot may veto the slot, narrow
//! its candidate pool, or reorder it.
mod condition;
mod evaluate;
mod registry;

pub use condition::{
    ConditionKind, ConditionMetadata, History, Operator, Side, SortDirection, StatusQuery,
    TacticalCondition, ValueType,
};
pub use evaluate::{TacticOutcome, evaluate_skill_slot_tactics};
pub use registry::{
    CompareHandler, FilterHandler, SkipHandler, SortHandler, TacticContext, compare_handler,
    filter_handler, skip_handler, sort_handler,
};
