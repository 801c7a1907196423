use std::collections::BTreeMap;

/// Stable identifier of an equipment definition.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EquipmentId(pub String);

impl EquipmentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for EquipmentId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

pub trait EquipmentOracle: Send + Sync {
    fn equipment(&self, id: &EquipmentId) -> Option<&EquipmentDefinition>;
}

/// Equipment category. Informational except through [`DualWieldTag`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EquipmentKind {
    Sword,
    Axe,
    Spear,
    Bow,
    Staff,
    Shield,
    Accessory,
}

/// Pair category used by the dual-equipment rule.
///
/// Two pieces carrying the same tag on a dual-equipment class are combined:
/// the stronger piece applies in full and the weaker one at half strength for
/// the tag's paired stats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DualWieldTag {
    /// Paired stats: PATK, MATK.
    Weapon,
    /// Paired stats: PDEF, GRD. `GuardEff` takes only the higher value.
    Shield,
}

/// Equipment definition.
///
/// `stats` keeps the raw stat keys as authored in content tables. Keys are
/// interpreted by [`crate::stats::equipment_bonus`]: direct stat names,
/// combinators (`Attack`, `Defense`, `AllStats`), percentage keys (`PATK%`),
/// and non-stat metadata that is ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipmentDefinition {
    pub id: EquipmentId,
    pub name: String,
    pub kind: EquipmentKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub dual_tag: Option<DualWieldTag>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stats: BTreeMap<String, i32>,
}

impl EquipmentDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: EquipmentKind) -> Self {
        Self {
            id: EquipmentId::new(id),
            name: name.into(),
            kind,
            dual_tag: None,
            stats: BTreeMap::new(),
        }
    }

    pub fn with_stat(mut self, key: impl Into<String>, value: i32) -> Self {
        self.stats.insert(key.into(), value);
        self
    }

    pub fn with_dual_tag(mut self, tag: DualWieldTag) -> Self {
        self.dual_tag = Some(tag);
        self
    }

    pub fn stat(&self, key: &str) -> i32 {
        self.stats.get(key).copied().unwrap_or(0)
    }
}
