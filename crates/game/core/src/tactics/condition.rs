//! Tactical conditions and their metadata.
//!
//! A [`TacticalCondition`] is a closed set of keys. Everything the evaluator
//! needs is read from [`TacticalCondition::metadata`]; handlers dispatch on
//! [`ValueType`] only.

use crate::env::CombatantType;
use crate::state::{Affliction, Row};
use crate::stats::StatKind;

/// Declarative tactic attached to a skill slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TacticalCondition {
    // Target HP
    LowestHpPercent,
    HighestHpPercent,
    HpBelowPercent(u8),
    HpAtLeastPercent(u8),
    HpFull,
    LowestHp,
    HighestHp,
    AllyAverageHpBelowPercent(u8),

    // Target resources
    HighestAp,
    LowestAp,
    ApAtLeast(u8),
    ApAtMost(u8),
    HighestPp,
    LowestPp,
    PpAtLeast(u8),
    PpAtMost(u8),

    // Acting unit
    OwnHpBelowPercent(u8),
    OwnHpAtLeastPercent(u8),
    OwnApAtLeast(u8),
    OwnPpAtLeast(u8),
    OwnPpAtMost(u8),

    // Target tags and status
    Prioritize(CombatantType),
    Only(CombatantType),
    Exclude(CombatantType),
    /// `None` matches any affliction.
    Afflicted(Option<Affliction>),
    NotAfflicted,
    Buffed,
    Debuffed,

    // Formation
    FrontRow,
    BackRow,
    PrioritizeFrontRow,
    PrioritizeBackRow,

    // Battlefield
    EnemyPresent(CombatantType),
    EnemyAbsent(CombatantType),
    EnemiesAtLeast(u8),
    EnemiesAtMost(u8),
    AlliesAtLeast(u8),
    AlliesAtMost(u8),

    // Acting unit status and history
    UserAfflicted,
    UserNotAfflicted,
    UserBuffed,
    FirstAction,
    SecondActionOrLater,

    // Stats
    HighestStat(StatKind),
    LowestStat(StatKind),

    LastTarget,
    LastAttacker,
}

/// Whether a tactic narrows or reorders the pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConditionKind {
    Filter,
    Sort,
}

/// Dispatch axis of the handler registries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum ValueType {
    HpPercent,
    HpRaw,
    HpAverage,
    Ap,
    Pp,
    OwnHpPercent,
    OwnAp,
    OwnPp,
    CombatantType,
    Status,
    Formation,
    EnemyPresence,
    UnitCount,
    UserCondition,
    ActionNumber,
    StatHigh,
    StatLow,
    AttackHistory,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Lt,
    Lte,
    Gt,
    Gte,
    Eq,
}

impl Operator {
    pub fn holds<T: PartialOrd>(self, value: T, threshold: T) -> bool {
        match self {
            Self::Lt => value < threshold,
            Self::Lte => value <= threshold,
            Self::Gt => value > threshold,
            Self::Gte => value >= threshold,
            Self::Eq => value == threshold,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Status query of status-type conditions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatusQuery {
    Afflicted(Option<Affliction>),
    Buffed,
    Debuffed,
}

/// Which side a unit-count condition counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Allies,
    Enemies,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum History {
    LastTarget,
    LastAttacker,
}

/// Static description of one tactical condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConditionMetadata {
    pub kind: ConditionKind,
    pub value_type: ValueType,
    pub operator: Option<Operator>,
    pub threshold: Option<i32>,
    pub direction: SortDirection,
    /// Inverts a filter's predicate.
    pub negate: bool,
    pub combatant_type: Option<CombatantType>,
    pub status: Option<StatusQuery>,
    pub stat: Option<StatKind>,
    pub row: Option<Row>,
    pub side: Option<Side>,
    pub history: Option<History>,
}

impl ConditionMetadata {
    const fn new(kind: ConditionKind, value_type: ValueType) -> Self {
        Self {
            kind,
            value_type,
            operator: None,
            threshold: None,
            direction: SortDirection::Ascending,
            negate: false,
            combatant_type: None,
            status: None,
            stat: None,
            row: None,
            side: None,
            history: None,
        }
    }

    const fn filter(value_type: ValueType) -> Self {
        Self::new(ConditionKind::Filter, value_type)
    }

    const fn sort(value_type: ValueType, direction: SortDirection) -> Self {
        let mut meta = Self::new(ConditionKind::Sort, value_type);
        meta.direction = direction;
        meta
    }

    const fn compare(mut self, operator: Operator, threshold: u8) -> Self {
        self.operator = Some(operator);
        self.threshold = Some(threshold as i32);
        self
    }

    const fn negated(mut self) -> Self {
        self.negate = true;
        self
    }

    const fn tagged(mut self, tag: CombatantType) -> Self {
        self.combatant_type = Some(tag);
        self
    }

    const fn status(mut self, query: StatusQuery) -> Self {
        self.status = Some(query);
        self
    }

    const fn row(mut self, row: Row) -> Self {
        self.row = Some(row);
        self
    }

    const fn side(mut self, side: Side) -> Self {
        self.side = Some(side);
        self
    }

    pub const fn is_sort(&self) -> bool {
        matches!(self.kind, ConditionKind::Sort)
    }
}

impl TacticalCondition {
    pub const fn metadata(self) -> ConditionMetadata {
        use ConditionMetadata as M;
        use Operator::*;
        use SortDirection::*;
        use ValueType as V;

        match self {
            Self::LowestHpPercent => M::sort(V::HpPercent, Ascending),
            Self::HighestHpPercent => M::sort(V::HpPercent, Descending),
            Self::HpBelowPercent(n) => M::filter(V::HpPercent).compare(Lt, n),
            Self::HpAtLeastPercent(n) => M::filter(V::HpPercent).compare(Gte, n),
            Self::HpFull => M::filter(V::HpPercent).compare(Gte, 100),
            Self::LowestHp => M::sort(V::HpRaw, Ascending),
            Self::HighestHp => M::sort(V::HpRaw, Descending),
            Self::AllyAverageHpBelowPercent(n) => M::filter(V::HpAverage).compare(Lt, n),

            Self::HighestAp => M::sort(V::Ap, Descending),
            Self::LowestAp => M::sort(V::Ap, Ascending),
            Self::ApAtLeast(n) => M::filter(V::Ap).compare(Gte, n),
            Self::ApAtMost(n) => M::filter(V::Ap).compare(Lte, n),
            Self::HighestPp => M::sort(V::Pp, Descending),
            Self::LowestPp => M::sort(V::Pp, Ascending),
            Self::PpAtLeast(n) => M::filter(V::Pp).compare(Gte, n),
            Self::PpAtMost(n) => M::filter(V::Pp).compare(Lte, n),

            Self::OwnHpBelowPercent(n) => M::filter(V::OwnHpPercent).compare(Lt, n),
            Self::OwnHpAtLeastPercent(n) => M::filter(V::OwnHpPercent).compare(Gte, n),
            Self::OwnApAtLeast(n) => M::filter(V::OwnAp).compare(Gte, n),
            Self::OwnPpAtLeast(n) => M::filter(V::OwnPp).compare(Gte, n),
            Self::OwnPpAtMost(n) => M::filter(V::OwnPp).compare(Lte, n),

            Self::Prioritize(tag) => M::sort(V::CombatantType, Descending).tagged(tag),
            Self::Only(tag) => M::filter(V::CombatantType).tagged(tag),
            Self::Exclude(tag) => M::filter(V::CombatantType).tagged(tag).negated(),
            Self::Afflicted(affliction) => {
                M::filter(V::Status).status(StatusQuery::Afflicted(affliction))
            }
            Self::NotAfflicted => M::filter(V::Status)
                .status(StatusQuery::Afflicted(None))
                .negated(),
            Self::Buffed => M::filter(V::Status).status(StatusQuery::Buffed),
            Self::Debuffed => M::filter(V::Status).status(StatusQuery::Debuffed),

            Self::FrontRow => M::filter(V::Formation).row(Row::Front),
            Self::BackRow => M::filter(V::Formation).row(Row::Back),
            Self::PrioritizeFrontRow => M::sort(V::Formation, Descending).row(Row::Front),
            Self::PrioritizeBackRow => M::sort(V::Formation, Ascending).row(Row::Back),

            Self::EnemyPresent(tag) => M::filter(V::EnemyPresence).tagged(tag),
            Self::EnemyAbsent(tag) => M::filter(V::EnemyPresence).tagged(tag).negated(),
            Self::EnemiesAtLeast(n) => M::filter(V::UnitCount).side(Side::Enemies).compare(Gte, n),
            Self::EnemiesAtMost(n) => M::filter(V::UnitCount).side(Side::Enemies).compare(Lte, n),
            Self::AlliesAtLeast(n) => M::filter(V::UnitCount).side(Side::Allies).compare(Gte, n),
            Self::AlliesAtMost(n) => M::filter(V::UnitCount).side(Side::Allies).compare(Lte, n),

            Self::UserAfflicted => {
                M::filter(V::UserCondition).status(StatusQuery::Afflicted(None))
            }
            Self::UserNotAfflicted => M::filter(V::UserCondition)
                .status(StatusQuery::Afflicted(None))
                .negated(),
            Self::UserBuffed => M::filter(V::UserCondition).status(StatusQuery::Buffed),
            Self::FirstAction => M::filter(V::ActionNumber).compare(Lt, 1),
            Self::SecondActionOrLater => M::filter(V::ActionNumber).compare(Gte, 1),

            Self::HighestStat(stat) => {
                let mut meta = M::sort(V::StatHigh, Descending);
                meta.stat = Some(stat);
                meta
            }
            Self::LowestStat(stat) => {
                let mut meta = M::sort(V::StatLow, Ascending);
                meta.stat = Some(stat);
                meta
            }

            Self::LastTarget => {
                let mut meta = M::sort(V::AttackHistory, Descending);
                meta.history = Some(History::LastTarget);
                meta
            }
            Self::LastAttacker => {
                let mut meta = M::sort(V::AttackHistory, Descending);
                meta.history = Some(History::LastAttacker);
                meta
            }
        }
    }
}
