//! Per-target effect application.

use std::collections::BTreeMap;

use crate::combat::{DamageResult, calculate_multi_hit_damage, total_damage};
use crate::config::BattleConfig;
use crate::env::{RngOracle, SkillDefinition, SkillEffect};
use crate::state::{BattleContext, BattlefieldState, UnitId};
use crate::stats::StatKind;

use super::event::{HitRecord, TargetResult};

/// Working copies of the contexts an action touches.
///
/// Contexts are cloned out of the state on first write only, so the final
/// state replaces exactly the units that changed.
pub(super) struct Scratch<'s> {
    state: &'s BattlefieldState,
    touched: BTreeMap<UnitId, BattleContext>,
}

impl<'s> Scratch<'s> {
    pub(super) fn new(state: &'s BattlefieldState) -> Self {
        Self {
            state,
            touched: BTreeMap::new(),
        }
    }

    pub(super) fn get(&self, id: &UnitId) -> Option<&BattleContext> {
        self.touched.get(id).or_else(|| self.state.unit(id))
    }

    pub(super) fn get_mut(&mut self, id: &UnitId) -> Option<&mut BattleContext> {
        if !self.touched.contains_key(id) {
            let ctx = self.state.unit(id)?.clone();
            self.touched.insert(id.clone(), ctx);
        }
        self.touched.get_mut(id)
    }

    pub(super) fn into_contexts(self) -> impl Iterator<Item = BattleContext> {
        self.touched.into_values()
    }
}

/// Everything one target experiences from one skill use.
pub(super) struct EffectContext<'a> {
    /// Snapshot of the caster after paying the skill cost.
    pub caster: &'a BattleContext,
    pub skill: &'a SkillDefinition,
    pub config: &'a BattleConfig,
}

impl EffectContext<'_> {
    /// Applies every effect of the skill to `target`.
    ///
    /// Damage effects resolve first. The remaining effects then apply in
    /// declaration order, with debuffs and afflictions gated on at least one
    /// landed hit when the skill deals damage.
    pub(super) fn apply(
        &self,
        target: &mut BattleContext,
        rng: &mut (impl RngOracle + ?Sized),
    ) -> TargetResult {
        let mut rolls: Vec<DamageResult> = Vec::new();

        for damage in self.skill.damage_effects() {
            if !target.is_alive() {
                continue;
            }
            let results = calculate_multi_hit_damage(
                self.caster,
                target,
                damage,
                self.skill.flags,
                self.config,
                rng,
            );
            let dealt = i32::try_from(total_damage(&results)).unwrap_or(i32::MAX);
            target.take_damage(dealt);
            target.last_attacker = Some(self.caster.id().clone());
            rolls.extend(results);
        }

        let deals_damage = self.skill.damage_effects().next().is_some();
        let landed = !deals_damage || rolls.iter().any(|roll| roll.hit);

        for effect in &self.skill.effects {
            match effect {
                SkillEffect::Damage(_) => {}
                SkillEffect::Heal { potency } => {
                    let matk = f64::from(self.caster.effective_stat(StatKind::Matk));
                    let amount = (matk * f64::from(*potency) / 100.0).round().max(1.0);
                    target.heal(amount as i32);
                }
                SkillEffect::Buff(modifier) => target.status.add_buff(*modifier),
                SkillEffect::Debuff(modifier) => {
                    if landed {
                        target.status.add_debuff(*modifier);
                    }
                }
                SkillEffect::Inflict(affliction) => {
                    if landed && target.is_alive() {
                        target.status.afflict(*affliction);
                    }
                }
                SkillEffect::Cleanse => target.status.cleanse(),
                SkillEffect::RestoreAp(amount) => target.restore_ap(*amount),
                SkillEffect::RestorePp(amount) => target.restore_pp(*amount),
            }
        }

        TargetResult {
            target_id: target.id().clone(),
            target_name: target.name().to_owned(),
            hits: rolls.iter().map(HitRecord::from).collect(),
            total_damage: total_damage(&rolls),
        }
    }
}
