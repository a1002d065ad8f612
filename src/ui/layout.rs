/// Rank-bar geometry. A detail row's icon is CSS-scaled to fit the bar
/// width and its rank marker sits proportionally along the bar height.
pub const BAR_WIDTH: f64 = 40.0;
pub const BAR_HEIGHT: f64 = 420.0;

pub const CHAR_ICON_BASE_SIZE: f64 = 180.0;
pub const SKILL_ICON_BASE_SIZE: f64 = 128.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconSlot {
    Char,
    Skill,
    Module,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconBase {
    pub position: f64,
    pub scale: f64,
    pub size: f64,
}

pub fn zoom_scale(bar_width: f64, base_size: f64) -> f64 {
    bar_width / base_size
}

/// Offset that re-centers an icon after `transform: scale(...)` shrinks it
/// around its own center.
pub fn base_position(scale: f64, base_size: f64) -> f64 {
    -(base_size * (1.0 - scale)) / 2.0
}

/// Marker offset along the bar: proportional to the 1-based rank, pulled
/// back by half the bar width so the marker centers on its point.
pub fn offset_top(position: usize, total: usize, bar_height: f64, bar_width: f64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    bar_height * position as f64 / total as f64 - bar_width / 2.0
}

pub fn icon_base_info(slot: IconSlot) -> IconBase {
    match slot {
        IconSlot::Char => {
            let scale = zoom_scale(BAR_WIDTH, CHAR_ICON_BASE_SIZE);
            IconBase {
                position: base_position(scale, CHAR_ICON_BASE_SIZE),
                scale,
                size: CHAR_ICON_BASE_SIZE,
            }
        }
        IconSlot::Skill => {
            let scale = zoom_scale(BAR_WIDTH, SKILL_ICON_BASE_SIZE);
            IconBase {
                position: base_position(scale, SKILL_ICON_BASE_SIZE),
                scale,
                size: SKILL_ICON_BASE_SIZE,
            }
        }
        IconSlot::Module => IconBase {
            position: 0.0,
            scale: 1.0,
            size: BAR_WIDTH,
        },
    }
}

/// Zero and non-finite values render as `-`, everything else with the
/// given number of decimal places.
pub fn format_number(value: f64, suffix: &str, decimal_places: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return "-".to_string();
    }
    format!("{value:.decimal_places$}{suffix}")
}

pub fn format_cost(value: f64) -> String {
    format_number(value, "", 1)
}

pub fn format_percent(value: f64) -> String {
    format_number(value * 100.0, "%", 1)
}

pub fn table_container_style() -> String {
    "max-height: 70vh; overflow: auto; border: 1px solid #bbb;".to_string()
}

pub fn table_header_cell_style() -> String {
    "border: 1px solid #bbb; padding: 6px; background: #f2f2f2; position: sticky; top: 0;"
        .to_string()
}

pub fn table_cell_style() -> &'static str {
    "border: 1px solid #bbb; padding: 6px;"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_scale_fits_icon_to_bar_width() {
        let scale = zoom_scale(BAR_WIDTH, CHAR_ICON_BASE_SIZE);
        assert!((scale - 40.0 / 180.0).abs() < f64::EPSILON);
        assert!((CHAR_ICON_BASE_SIZE * scale - BAR_WIDTH).abs() < 1e-9);
    }

    #[test]
    fn base_position_recenters_the_scaled_icon() {
        let scale = zoom_scale(BAR_WIDTH, SKILL_ICON_BASE_SIZE);
        let position = base_position(scale, SKILL_ICON_BASE_SIZE);
        assert!(position < 0.0, "shrunken icon moves up and left");
        assert!((position - -(SKILL_ICON_BASE_SIZE - BAR_WIDTH) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn offset_top_is_proportional_to_rank() {
        let first = offset_top(1, 10, BAR_HEIGHT, BAR_WIDTH);
        let last = offset_top(10, 10, BAR_HEIGHT, BAR_WIDTH);
        assert!(first < last);
        assert!((last - (BAR_HEIGHT - BAR_WIDTH / 2.0)).abs() < 1e-9);
        assert_eq!(offset_top(1, 0, BAR_HEIGHT, BAR_WIDTH), 0.0);
    }

    #[test]
    fn format_number_renders_dash_for_zero() {
        assert_eq!(format_number(0.0, "", 1), "-");
        assert_eq!(format_number(f64::NAN, "", 1), "-");
        assert_eq!(format_cost(30.26), "30.3");
        assert_eq!(format_percent(0.5), "50.0%");
    }
}
