//! Combat resolution.
//!
//! Pure functions for classifying attacks and resolving damage rolls. All
//! randomness is drawn from the caller's [`crate::env::RngOracle`].
//!
//! # Core Functions
//!
//! - `skill_attack_type` / `damage_type`: attack and damage classification
//! - `calculate_hit_chance`: accuracy vs evasion, scaled by hit rate
//! - `calculate_skill_damage`: one hit (hit, crit, guard, effectiveness)
//! - `calculate_multi_hit_damage`: independent repeated hits

pub mod classify;
pub mod damage;
pub mod hit;
pub mod result;

pub use classify::{
    AttackType, DamageType, damage_type, is_ally_only_skill, is_counter_skill,
    is_damage_skill, is_hostile_skill, is_pursuit_skill, skill_attack_type,
};
pub use damage::{calculate_multi_hit_damage, calculate_skill_damage, effectiveness_percent};
pub use hit::{calculate_hit_chance, crit_chance, guard_reduction_percent, roll_check};
pub use result::{DamageBreakdown, DamageResult, total_damage};
