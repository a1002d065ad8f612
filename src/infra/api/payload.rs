use std::collections::BTreeMap;

use chrono::Local;
use serde::Deserialize;

use crate::domain::entities::operator::{
    CharId, EliteCost, ModuleEquip, Operator, OperatorDataset, RarityCosts, Skill,
};

/// The backend wraps the payload twice: `{ "data": { "data": [...] } }`.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    pub data: EnvelopeData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnvelopeData {
    pub data: Vec<RawOperator>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOperator {
    pub char_id: String,
    pub name: String,
    pub rarity: u8,
    #[serde(default)]
    pub sub_profession_id: String,
    #[serde(default)]
    pub elite: RawCost,
    #[serde(default)]
    pub skills: Vec<RawSkill>,
    #[serde(default)]
    pub mods: Vec<RawModule>,
    #[serde(default)]
    pub total_cost: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCost {
    #[serde(default)]
    pub total_cost: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSkill {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub icon_id: String,
    #[serde(default)]
    pub total_cost: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawModule {
    #[serde(default)]
    pub uni_equip_name: String,
    #[serde(default, rename = "typeName2")]
    pub type_name: String,
    #[serde(default)]
    pub total_cost: f64,
}

/// Shapes raw records into the domain dataset: fills the skill/module
/// back-references and derives the per-rarity cost tables.
pub fn build_dataset(payload: Vec<RawOperator>) -> OperatorDataset {
    let operators: Vec<Operator> = payload.into_iter().map(shape_operator).collect();
    let cost_tables = build_cost_tables(&operators);

    OperatorDataset {
        operators,
        cost_tables,
        fetched_at: Local::now(),
    }
}

fn shape_operator(raw: RawOperator) -> Operator {
    let char_id = CharId(raw.char_id);

    let skills = raw
        .skills
        .into_iter()
        .map(|skill| Skill {
            char_id: char_id.clone(),
            operator_name: raw.name.clone(),
            name: skill.name,
            icon_id: skill.icon_id,
            total_cost: skill.total_cost,
        })
        .collect();

    let mods = raw
        .mods
        .into_iter()
        .map(|module| ModuleEquip {
            char_id: char_id.clone(),
            operator_name: raw.name.clone(),
            uni_equip_name: module.uni_equip_name,
            type_name: module.type_name,
            total_cost: module.total_cost,
        })
        .collect();

    Operator {
        char_id,
        name: raw.name,
        rarity: raw.rarity,
        sub_profession_id: raw.sub_profession_id,
        elite: EliteCost {
            total_cost: raw.elite.total_cost,
        },
        skills,
        mods,
        total_cost: raw.total_cost,
    }
}

/// Only rarities above 3 carry detail breakdowns, so only they get lookup
/// tables. Position 1 is the most expensive entry; equal costs collapse to
/// one rank.
fn build_cost_tables(operators: &[Operator]) -> BTreeMap<u8, RarityCosts> {
    let mut tables: BTreeMap<u8, RarityCosts> = BTreeMap::new();

    for op in operators.iter().filter(|op| op.rarity > 3) {
        let entry = tables.entry(op.rarity).or_default();
        entry.elite_costs.push(op.elite.total_cost);
        entry
            .skill_costs
            .extend(op.skills.iter().map(|skill| skill.total_cost));
        entry
            .mod_costs
            .extend(op.mods.iter().map(|module| module.total_cost));
    }

    for table in tables.values_mut() {
        sort_desc_dedup(&mut table.elite_costs);
        sort_desc_dedup(&mut table.skill_costs);
        sort_desc_dedup(&mut table.mod_costs);
    }

    tables
}

fn sort_desc_dedup(costs: &mut Vec<f64>) {
    costs.sort_by(|a, b| b.total_cmp(a));
    costs.dedup();
}
