use crate::domain::entities::operator::Operator;

/// 1-based position inside a rarity cost table. Produced only for exact
/// cost matches, so "first place" can never be confused with "not found".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rank {
    pub position: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconStyle {
    pub top: f64,
    pub left: f64,
    pub scale: f64,
    pub size: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailRow {
    pub label: String,
    pub icon_class: String,
    pub total_cost: f64,
    pub rank: Option<Rank>,
    pub icon: IconStyle,
    /// Pixel offset of the rank marker along the bar; absent when the cost
    /// has no exact match in its rarity table.
    pub marker_top: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OperatorDetail {
    pub operator: Operator,
    pub rows: Vec<DetailRow>,
}
