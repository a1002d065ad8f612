use crate::domain::entities::detail::{DetailRow, IconStyle, OperatorDetail, Rank};
use crate::domain::entities::operator::{Operator, OperatorDataset, RarityCosts};
use crate::ui::layout::{icon_base_info, offset_top, IconSlot, BAR_HEIGHT, BAR_WIDTH};

/// Detailed cost breakdowns exist only above this rarity.
pub const DETAIL_RARITY_FLOOR: u8 = 3;

/// 1-based rank of the first exact cost match, or `None` when the cost does
/// not appear in the table.
pub fn rank_in(costs: &[f64], total_cost: f64) -> Option<Rank> {
    costs
        .iter()
        .position(|cost| *cost == total_cost)
        .map(|idx| Rank {
            position: idx + 1,
            total: costs.len(),
        })
}

pub struct DetailService;

impl DetailService {
    /// Builds the detail view for a clicked operator. Rarities at or below
    /// the floor get an empty row list; the dialog still opens on them.
    pub fn build(dataset: &OperatorDataset, operator: &Operator) -> OperatorDetail {
        let rows = if operator.rarity > DETAIL_RARITY_FLOOR {
            dataset
                .cost_tables
                .get(&operator.rarity)
                .map(|costs| build_rows(operator, costs))
                .unwrap_or_default()
        } else {
            Vec::new()
        };

        OperatorDetail {
            operator: operator.clone(),
            rows,
        }
    }
}

fn build_rows(operator: &Operator, costs: &RarityCosts) -> Vec<DetailRow> {
    let custom = operator.char_id.is_custom();
    let mut rows = Vec::new();

    let char_icon = if custom {
        "char-icon bg-custom".to_string()
    } else {
        format!("char-icon bg-{}", operator.char_id.as_str())
    };
    rows.push(icon_row(
        "精英化二".to_string(),
        char_icon,
        operator.elite.total_cost,
        &costs.elite_costs,
        IconSlot::Char,
    ));

    for (idx, skill) in operator.skills.iter().enumerate() {
        let label = if custom {
            skill.name.clone()
        } else {
            format!("{}技能：{}", idx + 1, skill.name)
        };
        rows.push(icon_row(
            label,
            format!("skill-icon bg-skill_icon_{}", skill.icon_id),
            skill.total_cost,
            &costs.skill_costs,
            IconSlot::Skill,
        ));
    }

    for item in &operator.mods {
        let label = if custom {
            item.type_name.clone()
        } else {
            format!("{}模組：{}", item.type_name, item.uni_equip_name)
        };
        rows.push(icon_row(
            label,
            String::new(),
            item.total_cost,
            &costs.mod_costs,
            IconSlot::Module,
        ));
    }

    rows
}

fn icon_row(
    label: String,
    icon_class: String,
    total_cost: f64,
    costs: &[f64],
    slot: IconSlot,
) -> DetailRow {
    let base = icon_base_info(slot);
    let rank = rank_in(costs, total_cost);
    let marker_top = rank.map(|rank| offset_top(rank.position, rank.total, BAR_HEIGHT, BAR_WIDTH));

    DetailRow {
        label,
        icon_class,
        total_cost,
        rank,
        icon: IconStyle {
            top: base.position,
            left: base.position,
            scale: base.scale,
            size: base.size,
        },
        marker_top,
    }
}
