//! Runtime combat state of one unit.

use std::sync::Arc;

use crate::config::BattleConfig;
use crate::env::{Class, CombatantType, GameEnv};
use crate::stats::{CombatStats, StatKind, resolve_combat_stats};

use super::{Affliction, ContextFlags, Position, StatusEffects, Team, Unit, UnitId};

/// A unit placed on a team's formation grid.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Deployment {
    pub unit: Unit,
    pub position: Position,
}

impl Deployment {
    pub fn new(unit: Unit, position: Position) -> Self {
        Self { unit, position }
    }
}

/// Runtime combat state of one unit.
///
/// Contexts are shared through `Arc` inside [`crate::state::BattlefieldState`];
/// a transition that changes a unit clones its context, edits the clone and
/// stores a new `Arc`, so unchanged units keep pointer identity.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleContext {
    pub unit: Arc<Unit>,
    pub team: Team,
    pub position: Position,
    pub combat_stats: CombatStats,
    pub current_hp: i32,
    pub current_ap: u8,
    pub current_pp: u8,
    pub status: StatusEffects,
    /// Restrictions set directly by the status subsystem. Affliction-implied
    /// flags are merged in by [`BattleContext::active_flags`].
    pub flags: ContextFlags,
    /// Movement type first, then class traits.
    pub combatant_types: Vec<CombatantType>,
    pub has_acted_this_round: bool,
    /// Actions this unit has taken in the battle.
    pub actions_taken: u32,
    pub last_target: Option<UnitId>,
    pub last_attacker: Option<UnitId>,
}

impl BattleContext {
    /// Fresh context at full HP with AP/PP taken from the combat stats.
    pub fn new(
        unit: Arc<Unit>,
        team: Team,
        position: Position,
        combat_stats: CombatStats,
        combatant_types: Vec<CombatantType>,
    ) -> Self {
        let cap = i32::from(BattleConfig::RESOURCE_CAP);
        Self {
            unit,
            team,
            position,
            current_hp: combat_stats.hp.max(0),
            current_ap: combat_stats.ap.clamp(0, cap) as u8,
            current_pp: combat_stats.pp.clamp(0, cap) as u8,
            combat_stats,
            status: StatusEffects::default(),
            flags: ContextFlags::empty(),
            combatant_types,
            has_acted_this_round: false,
            actions_taken: 0,
            last_target: None,
            last_attacker: None,
        }
    }

    pub fn id(&self) -> &UnitId {
        &self.unit.id
    }

    pub fn name(&self) -> &str {
        &self.unit.name
    }

    pub fn class(&self) -> Class {
        self.unit.class
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    pub fn is_front_row(&self) -> bool {
        self.position.is_front_row()
    }

    pub fn max_hp(&self) -> i32 {
        self.combat_stats.hp
    }

    /// Current HP as a percentage of max HP, in `[0, 100]`.
    pub fn hp_percent(&self) -> f64 {
        if self.combat_stats.hp <= 0 {
            return 0.0;
        }
        f64::from(self.current_hp) * 100.0 / f64::from(self.combat_stats.hp)
    }

    pub fn is_full_hp(&self) -> bool {
        self.current_hp >= self.combat_stats.hp
    }

    /// Guard strength contributed by equipment.
    pub fn equipment_guard_eff(&self) -> i32 {
        self.combat_stats.guard_eff
    }

    pub fn has_type(&self, tag: CombatantType) -> bool {
        self.combatant_types.contains(&tag)
    }

    pub fn has_affliction(&self, affliction: Affliction) -> bool {
        self.status.has_affliction(affliction)
    }

    pub fn active_flags(&self) -> ContextFlags {
        self.flags | self.status.affliction_flags()
    }

    /// Alive, has AP, and is not prevented from acting.
    pub fn can_act(&self) -> bool {
        self.is_alive()
            && self.current_ap > 0
            && !self.active_flags().contains(ContextFlags::CANNOT_ACT)
    }

    pub fn can_guard(&self) -> bool {
        !self.active_flags().contains(ContextFlags::CANNOT_GUARD)
    }

    /// Combat stat after buff/debuff percentages, floored at 0.
    ///
    /// ```text
    /// effective = stat × (100 + Σ modifier%) / 100
    /// ```
    ///
    /// EVA is 0 while the unit cannot evade.
    pub fn effective_stat(&self, stat: StatKind) -> i32 {
        if stat == StatKind::Eva && self.active_flags().contains(ContextFlags::CANNOT_EVADE) {
            return 0;
        }
        let base = self.combat_stats.get(stat);
        let percent = 100 + self.status.modifier_percent(stat);
        (base * percent).div_euclid(100).max(0)
    }

    /// Applies damage and returns the HP actually removed.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let dealt = amount.clamp(0, self.current_hp);
        self.current_hp -= dealt;
        dealt
    }

    /// Restores HP up to max and returns the HP actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let restored = amount.clamp(0, (self.combat_stats.hp - self.current_hp).max(0));
        self.current_hp += restored;
        restored
    }

    pub fn restore_ap(&mut self, amount: u8) {
        self.current_ap = self
            .current_ap
            .saturating_add(amount)
            .min(BattleConfig::RESOURCE_CAP);
    }

    pub fn restore_pp(&mut self, amount: u8) {
        self.current_pp = self
            .current_pp
            .saturating_add(amount)
            .min(BattleConfig::RESOURCE_CAP);
    }
}

/// Creates the battle context for one unit.
///
/// Combat stats are resolved here, once. An unknown class is logged and
/// treated as plain infantry.
pub fn create_battle_context(
    unit: &Unit,
    team: Team,
    position: Position,
    env: &GameEnv<'_>,
) -> BattleContext {
    let combat_stats = resolve_combat_stats(unit, env);
    let combatant_types = match env.class_definition(unit.class) {
        Ok(definition) => definition.combatant_types(),
        Err(err) => {
            tracing::warn!(unit = %unit.id, %err, "treating unit as infantry");
            vec![CombatantType::Infantry]
        }
    };
    BattleContext::new(
        Arc::new(unit.clone()),
        team,
        position,
        combat_stats,
        combatant_types,
    )
}

/// Creates contexts for both teams, player units first.
pub fn create_all_battle_contexts(
    player: &[Deployment],
    enemy: &[Deployment],
    env: &GameEnv<'_>,
) -> Vec<BattleContext> {
    player
        .iter()
        .map(|deployment| (Team::Player, deployment))
        .chain(enemy.iter().map(|deployment| (Team::Enemy, deployment)))
        .map(|(team, deployment)| {
            create_battle_context(&deployment.unit, team, deployment.position, env)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{ClassDefinition, ClassTier, GrowthDefinition, GrowthType, MovementType, TablesSnapshot};
    use crate::state::StatModifier;

    fn context() -> BattleContext {
        BattleContext::new(
            Arc::new(Unit::new("u1", "Unit", Class::Fighter, 1)),
            Team::Player,
            Position::front(0),
            CombatStats {
                hp: 80,
                ap: 2,
                pp: 1,
                patk: 50,
                eva: 30,
                ..CombatStats::default()
            },
            vec![CombatantType::Infantry],
        )
    }

    #[test]
    fn effective_stats_apply_modifiers() {
        let mut ctx = context();
        ctx.status.add_buff(StatModifier::new(StatKind::Patk, 20));
        assert_eq!(ctx.effective_stat(StatKind::Patk), 60);

        ctx.status.afflict(Affliction::Freeze);
        assert_eq!(ctx.effective_stat(StatKind::Eva), 0);
        assert!(!ctx.can_guard());
    }

    #[test]
    fn hp_is_bounded() {
        let mut ctx = context();
        assert_eq!(ctx.take_damage(100), 80);
        assert!(!ctx.is_alive());
        assert_eq!(ctx.heal(500), 80);
        assert!(ctx.is_full_hp());
    }

    #[test]
    fn creation_resolves_types_and_stats() {
        let tables = TablesSnapshot::new()
            .with_level(5, CombatStats { hp: 120, init: 20, ..CombatStats::default() })
            .with_growth(GrowthDefinition::neutral(GrowthType::Balanced))
            .with_class(
                ClassDefinition::new(Class::Archer, ClassTier::Base, MovementType::Infantry)
                    .with_traits([CombatantType::Archer]),
            );
        let config = BattleConfig::default();
        let env = GameEnv::from_tables(&tables, &config);

        let player = [Deployment::new(Unit::new("a", "Archer", Class::Archer, 5), Position::back(1))];
        let enemy = [Deployment::new(Unit::new("b", "Rogue", Class::Rogue, 5), Position::front(0))];
        let contexts = create_all_battle_contexts(&player, &enemy, &env);

        assert_eq!(contexts.len(), 2);
        assert_eq!(contexts[0].team, Team::Player);
        assert_eq!(contexts[0].current_hp, 120);
        assert_eq!(contexts[0].current_ap, 1);
        assert!(contexts[0].has_type(CombatantType::Archer));
        assert_eq!(contexts[1].combatant_types, vec![CombatantType::Infantry]);
    }
}
