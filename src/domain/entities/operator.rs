use std::collections::BTreeMap;

use chrono::{DateTime, Local};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CharId(pub String);

impl CharId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_custom(&self) -> bool {
        self.0.contains("custom")
    }
}

impl From<String> for CharId {
    fn from(value: String) -> Self {
        CharId(value)
    }
}

impl From<CharId> for String {
    fn from(value: CharId) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EliteCost {
    pub total_cost: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Skill {
    pub char_id: CharId,
    pub operator_name: String,
    pub name: String,
    pub icon_id: String,
    pub total_cost: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModuleEquip {
    pub char_id: CharId,
    pub operator_name: String,
    pub uni_equip_name: String,
    pub type_name: String,
    pub total_cost: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Operator {
    pub char_id: CharId,
    pub name: String,
    pub rarity: u8,
    pub sub_profession_id: String,
    pub elite: EliteCost,
    pub skills: Vec<Skill>,
    pub mods: Vec<ModuleEquip>,
    pub total_cost: f64,
}

/// Per-rarity cost lookup tables. Sorted descending, deduplicated; never
/// mutated after the dataset is shaped.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RarityCosts {
    pub elite_costs: Vec<f64>,
    pub skill_costs: Vec<f64>,
    pub mod_costs: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OperatorDataset {
    pub operators: Vec<Operator>,
    pub cost_tables: BTreeMap<u8, RarityCosts>,
    pub fetched_at: DateTime<Local>,
}

impl OperatorDataset {
    pub fn find_operator(&self, char_id: &CharId) -> Option<&Operator> {
        self.operators.iter().find(|op| &op.char_id == char_id)
    }

    /// Distinct sub-profession ids, sorted, for the filter dropdown.
    pub fn sub_professions(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .operators
            .iter()
            .map(|op| op.sub_profession_id.clone())
            .filter(|id| !id.is_empty())
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }
}
