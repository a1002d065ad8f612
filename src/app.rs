use std::collections::BTreeSet;
use std::sync::Arc;

use dioxus::prelude::*;
use tracing::warn;

use crate::domain::entities::query::{SearchParams, SortDirection, SortSpec, TableKind};
use crate::infra::api::client::OperatorApi;
use crate::platform::desktop::blocking::run_blocking;
use crate::ui::layout::{
    format_cost, format_percent, table_cell_style, table_container_style,
    table_header_cell_style, BAR_HEIGHT, BAR_WIDTH,
};
use crate::ui::state::app_state::AppState;
use crate::usecase::ports::provider::OperatorProvider;
use crate::usecase::services::detail_service::DetailService;
use crate::usecase::services::query_service::QueryService;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DropdownId {
    Sort,
    Profession,
}

#[derive(Clone, Debug, PartialEq)]
struct DropdownOption {
    value: String,
    label: String,
}

fn dropdown_label(options: &[DropdownOption], selected: Option<&str>) -> String {
    selected
        .and_then(|value| options.iter().find(|opt| opt.value == value))
        .map(|opt| opt.label.clone())
        .unwrap_or_else(|| "(未選擇)".to_string())
}

fn sort_options(kind: TableKind) -> Vec<DropdownOption> {
    let fields: &[(&str, &str)] = match kind {
        TableKind::Operators => &[
            ("rarity", "星級"),
            ("elite.total_cost", "精英化成本"),
            ("total_cost", "養成總成本"),
        ],
        TableKind::Skills => &[("total_cost", "技能總成本")],
        TableKind::Mods => &[("total_cost", "模組總成本")],
    };
    fields
        .iter()
        .map(|(value, label)| DropdownOption {
            value: value.to_string(),
            label: label.to_string(),
        })
        .collect()
}

#[component]
fn DropdownSelect(
    id: DropdownId,
    label: &'static str,
    options: Vec<DropdownOption>,
    selected: Option<String>,
    mut open_dropdown: Signal<Option<DropdownId>>,
    mut dropdown_pos: Signal<Option<(f64, f64)>>,
    on_select: EventHandler<String>,
) -> Element {
    let is_open = open_dropdown() == Some(id);
    let selected_label = dropdown_label(&options, selected.as_deref());
    let (left, top) = dropdown_pos().unwrap_or((0.0, 0.0));

    rsx! {
        div {
            style: "position: relative; display: inline-flex; align-items: center; gap: 6px;",
            span { "{label}" }
            button {
                style: "border: 1px solid #bbb; background: #fff; padding: 4px 10px; border-radius: 6px; cursor: pointer;",
                onclick: move |event| {
                    event.stop_propagation();
                    if open_dropdown() == Some(id) {
                        open_dropdown.set(None);
                        return;
                    }
                    let point = event.client_coordinates();
                    dropdown_pos.set(Some((point.x, point.y + 24.0)));
                    open_dropdown.set(Some(id));
                },
                "{selected_label}"
            }
        }

        if is_open {
            div {
                style: "position: fixed; left: {left}px; top: {top}px; min-width: 200px; max-height: 320px; overflow-y: auto; background: #fff; border: 1px solid #bbb; border-radius: 8px; box-shadow: 0 10px 24px rgba(0,0,0,0.15); z-index: 1200;",
                onclick: move |event| event.stop_propagation(),
                {options.iter().map(|opt| {
                    let value = opt.value.clone();
                    let label = opt.label.clone();
                    let is_selected = selected.as_deref() == Some(value.as_str());
                    let background = if is_selected { "#eef4ff" } else { "transparent" };
                    rsx!(
                        div {
                            style: "padding: 8px 10px; cursor: pointer; background: {background};",
                            onclick: move |_| {
                                on_select.call(value.clone());
                                open_dropdown.set(None);
                            },
                            "{label}"
                        }
                    )
                })}
            }
        }
    }
}

#[component]
fn ProfessionDropdown(
    id: DropdownId,
    label: &'static str,
    options: Vec<String>,
    selected: BTreeSet<String>,
    mut open_dropdown: Signal<Option<DropdownId>>,
    mut dropdown_pos: Signal<Option<(f64, f64)>>,
    on_toggle: EventHandler<(String, bool)>,
) -> Element {
    let is_open = open_dropdown() == Some(id);
    let (left, top) = dropdown_pos().unwrap_or((0.0, 0.0));
    let summary = if selected.is_empty() {
        "全部職業".to_string()
    } else {
        format!("已選 {} 種", selected.len())
    };

    rsx! {
        div {
            style: "position: relative; display: inline-flex; align-items: center; gap: 6px;",
            span { "{label}" }
            button {
                style: "border: 1px solid #bbb; background: #fff; padding: 4px 10px; border-radius: 6px; cursor: pointer;",
                onclick: move |event| {
                    event.stop_propagation();
                    if open_dropdown() == Some(id) {
                        open_dropdown.set(None);
                        return;
                    }
                    let point = event.client_coordinates();
                    dropdown_pos.set(Some((point.x, point.y + 24.0)));
                    open_dropdown.set(Some(id));
                },
                "{summary}"
            }
        }

        if is_open {
            div {
                style: "position: fixed; left: {left}px; top: {top}px; min-width: 220px; max-height: 320px; overflow-y: auto; background: #fff; border: 1px solid #bbb; border-radius: 8px; box-shadow: 0 10px 24px rgba(0,0,0,0.15); z-index: 1200; padding: 6px;",
                onclick: move |event| event.stop_propagation(),
                {options.iter().map(|profession| {
                    let checked = selected.contains(profession);
                    let profession = profession.clone();
                    rsx!(
                        label {
                            style: "display: flex; align-items: center; gap: 8px; padding: 6px 4px; cursor: pointer;",
                            input {
                                r#type: "checkbox",
                                checked: checked,
                                onclick: move |_| {
                                    on_toggle.call((profession.clone(), !checked));
                                }
                            }
                            span { "{profession}" }
                        }
                    )
                })}
            }
        }
    }
}

#[component]
pub fn App() -> Element {
    let AppState {
        mut query,
        mut search_params,
        mut active_tab,
        mut sort_field,
        mut sort_desc,
        mut detail,
        mut show_detail,
        mut busy,
        mut status,
    } = AppState::new();

    let mut open_dropdown = use_signal(|| None::<DropdownId>);
    let dropdown_pos = use_signal(|| None::<(f64, f64)>);

    let api = Arc::new(OperatorApi::from_env());
    let api_for_init = api.clone();
    let api_for_refresh = api.clone();

    use_effect(move || {
        *busy.write() = true;
        let fetch_result = run_blocking(|| api_for_init.fetch_dataset());
        match fetch_result {
            Ok(dataset) => {
                let fetched_at = dataset.fetched_at.format("%H:%M:%S").to_string();
                let count = dataset.operators.len();
                *query.write() = Some(QueryService::new(dataset, &SearchParams::default()));
                *status.write() = format!("已載入 {count} 名幹員（{fetched_at}）");
            }
            Err(err) => {
                warn!(error = %err, "dataset fetch failed");
                *query.write() = None;
                *status.write() = format!("載入資料失敗：{err}");
            }
        }
        *busy.write() = false;
    });

    let params_snapshot = search_params();
    let tab_snapshot = active_tab();
    let service_snapshot = query();

    let professions = service_snapshot
        .as_ref()
        .map(|service| service.dataset().sub_professions())
        .unwrap_or_default();

    let (current_total, more_available) = service_snapshot
        .as_ref()
        .map(|service| {
            (
                service.pagination(tab_snapshot).total,
                service.has_more(tab_snapshot),
            )
        })
        .unwrap_or((0, false));

    let operator_rows = if tab_snapshot == TableKind::Operators {
        service_snapshot
            .as_ref()
            .map(|service| service.operators().visible().to_vec())
            .unwrap_or_default()
    } else {
        Vec::new()
    };
    let skill_rows = if tab_snapshot == TableKind::Skills {
        service_snapshot
            .as_ref()
            .map(|service| service.skills().visible().to_vec())
            .unwrap_or_default()
    } else {
        Vec::new()
    };
    let mod_rows = if tab_snapshot == TableKind::Mods {
        service_snapshot
            .as_ref()
            .map(|service| service.mods().visible().to_vec())
            .unwrap_or_default()
    } else {
        Vec::new()
    };

    let detail_snapshot = detail();
    let sort_opts = sort_options(tab_snapshot);
    let tabs = [
        (TableKind::Operators, "幹員"),
        (TableKind::Skills, "技能"),
        (TableKind::Mods, "模組"),
    ];

    rsx! {
        div {
            style: "font-family: system-ui, sans-serif; padding: 12px;",
            onclick: move |_| open_dropdown.set(None),

            nav {
                style: "display: flex; gap: 12px; align-items: center; flex-wrap: wrap; padding: 8px 0;",
                button {
                    disabled: busy(),
                    onclick: move |_| {
                        if busy() {
                            return;
                        }
                        *busy.write() = true;
                        *status.write() = "正在重新載入資料".to_string();

                        let fetch_result = run_blocking(|| api_for_refresh.fetch_dataset());
                        match fetch_result {
                            Ok(dataset) => {
                                let fetched_at = dataset.fetched_at.format("%H:%M:%S").to_string();
                                let count = dataset.operators.len();
                                let params = search_params();
                                *query.write() = Some(QueryService::new(dataset, &params));
                                *status.write() = format!("已載入 {count} 名幹員（{fetched_at}）");
                            }
                            Err(err) => {
                                warn!(error = %err, "dataset refresh failed");
                                *status.write() = format!("載入資料失敗：{err}");
                            }
                        }

                        *busy.write() = false;
                    },
                    "重新整理"
                }
                span { " {status}" }
            }

            div {
                style: "display: flex; gap: 12px; align-items: center; flex-wrap: wrap; padding: 4px 0;",
                span { "星級" }
                for rarity in 1u8..=6u8 {
                    label {
                        style: "display: inline-flex; align-items: center; gap: 4px; cursor: pointer;",
                        input {
                            r#type: "checkbox",
                            disabled: busy(),
                            checked: params_snapshot.rarities.contains(&rarity),
                            onclick: move |_| {
                                let mut params = search_params();
                                if !params.rarities.remove(&rarity) {
                                    params.rarities.insert(rarity);
                                }
                                *search_params.write() = params.clone();
                                if let Some(service) = query.write().as_mut() {
                                    service.rebuild(&params);
                                }
                                *status.write() = "已更新星級篩選".to_string();
                            },
                        }
                        "{rarity}★"
                    }
                }

                ProfessionDropdown {
                    id: DropdownId::Profession,
                    label: "子職業",
                    options: professions.clone(),
                    selected: params_snapshot.professions.clone(),
                    open_dropdown,
                    dropdown_pos,
                    on_toggle: move |(profession, checked): (String, bool)| {
                        let mut params = search_params();
                        if checked {
                            params.professions.insert(profession);
                        } else {
                            params.professions.remove(&profession);
                        }
                        *search_params.write() = params.clone();
                        if let Some(service) = query.write().as_mut() {
                            service.rebuild(&params);
                        }
                        *status.write() = "已更新職業篩選".to_string();
                    },
                }

                label { "搜尋 " }
                input {
                    disabled: busy(),
                    value: search_params().search_key,
                    placeholder: "幹員／技能／模組名稱",
                    onchange: move |event| {
                        let mut params = search_params();
                        params.search_key = event.value();
                        *search_params.write() = params.clone();
                        if let Some(service) = query.write().as_mut() {
                            service.rebuild(&params);
                        }
                        *status.write() = "已套用搜尋".to_string();
                    },
                }
            }

            div {
                style: "display: flex; gap: 6px; margin: 8px 0; align-items: center;",
                for (kind, label) in tabs {
                    button {
                        disabled: busy(),
                        onclick: move |_| {
                            active_tab.set(kind);
                            sort_field.set(None);
                        },
                        if tab_snapshot == kind {
                            "[{label}]"
                        } else {
                            "{label}"
                        }
                    }
                }

                DropdownSelect {
                    id: DropdownId::Sort,
                    label: "排序",
                    options: sort_opts.clone(),
                    selected: sort_field(),
                    open_dropdown,
                    dropdown_pos,
                    on_select: move |value: String| {
                        sort_field.set(Some(value.clone()));
                        let spec = SortSpec {
                            field: value,
                            direction: if sort_desc() {
                                SortDirection::Desc
                            } else {
                                SortDirection::Asc
                            },
                        };
                        let params = search_params();
                        if let Some(service) = query.write().as_mut() {
                            service.apply_sort(active_tab(), &spec, &params);
                        }
                        *status.write() = "已更新排序欄位".to_string();
                    },
                }

                button {
                    disabled: busy(),
                    onclick: move |_| {
                        let next_desc = !sort_desc();
                        sort_desc.set(next_desc);
                        if let Some(field) = sort_field() {
                            let spec = SortSpec {
                                field,
                                direction: if next_desc {
                                    SortDirection::Desc
                                } else {
                                    SortDirection::Asc
                                },
                            };
                            let params = search_params();
                            if let Some(service) = query.write().as_mut() {
                                service.apply_sort(active_tab(), &spec, &params);
                            }
                        }
                        *status.write() = "已更新排序方向".to_string();
                    },
                    if sort_desc() { "降冪" } else { "升冪" }
                }
            }

            div {
                span { "共 {current_total} 筆" }
            }

            if tab_snapshot == TableKind::Operators {
                div {
                    style: "{table_container_style()}",
                    table { style: "border-collapse: collapse; width: 100%; background: #fff;",
                        thead {
                            tr {
                                th { style: "{table_header_cell_style()}", "#" }
                                th { style: "{table_header_cell_style()}", "名稱" }
                                th { style: "{table_header_cell_style()}", "星級" }
                                th { style: "{table_header_cell_style()}", "子職業" }
                                th { style: "{table_header_cell_style()}", "精英化成本" }
                                th { style: "{table_header_cell_style()}", "精英化占比" }
                                th { style: "{table_header_cell_style()}", "養成總成本" }
                            }
                        }
                        tbody {
                            if operator_rows.is_empty() {
                                tr {
                                    td { style: "{table_cell_style()}", colspan: "7", "無資料" }
                                }
                            } else {
                                {operator_rows.iter().map(|entry| {
                                    let op = entry.row.clone();
                                    let char_id = op.char_id.clone();
                                    let index = entry.index;
                                    let elite_cost = format_cost(op.elite.total_cost);
                                    let elite_share = format_percent(op.elite.total_cost / op.total_cost);
                                    let total_cost = format_cost(op.total_cost);
                                    rsx!(
                                        tr {
                                            style: "cursor: pointer;",
                                            onclick: move |_| {
                                                let Some(service) = query() else {
                                                    return;
                                                };
                                                let Some(op) = service.dataset().find_operator(&char_id).cloned() else {
                                                    return;
                                                };
                                                let built = DetailService::build(service.dataset(), &op);
                                                detail.set(Some(built));
                                                show_detail.set(true);
                                            },
                                            td { style: "{table_cell_style()}", "{index}" }
                                            td { style: "{table_cell_style()}", "{op.name}" }
                                            td { style: "{table_cell_style()}", "{op.rarity}★" }
                                            td { style: "{table_cell_style()}", "{op.sub_profession_id}" }
                                            td { style: "{table_cell_style()}", "{elite_cost}" }
                                            td { style: "{table_cell_style()}", "{elite_share}" }
                                            td { style: "{table_cell_style()}", "{total_cost}" }
                                        }
                                    )
                                })}
                            }
                        }
                    }
                }
            }

            if tab_snapshot == TableKind::Skills {
                div {
                    style: "{table_container_style()}",
                    table { style: "border-collapse: collapse; width: 100%; background: #fff;",
                        thead {
                            tr {
                                th { style: "{table_header_cell_style()}", "#" }
                                th { style: "{table_header_cell_style()}", "幹員" }
                                th { style: "{table_header_cell_style()}", "技能" }
                                th { style: "{table_header_cell_style()}", "技能總成本" }
                            }
                        }
                        tbody {
                            if skill_rows.is_empty() {
                                tr {
                                    td { style: "{table_cell_style()}", colspan: "4", "無資料" }
                                }
                            } else {
                                {skill_rows.iter().map(|entry| {
                                    let skill = entry.row.clone();
                                    let char_id = skill.char_id.clone();
                                    let index = entry.index;
                                    let total_cost = format_cost(skill.total_cost);
                                    rsx!(
                                        tr {
                                            style: "cursor: pointer;",
                                            onclick: move |_| {
                                                let Some(service) = query() else {
                                                    return;
                                                };
                                                let Some(op) = service.dataset().find_operator(&char_id).cloned() else {
                                                    return;
                                                };
                                                let built = DetailService::build(service.dataset(), &op);
                                                detail.set(Some(built));
                                                show_detail.set(true);
                                            },
                                            td { style: "{table_cell_style()}", "{index}" }
                                            td { style: "{table_cell_style()}", "{skill.operator_name}" }
                                            td { style: "{table_cell_style()}", "{skill.name}" }
                                            td { style: "{table_cell_style()}", "{total_cost}" }
                                        }
                                    )
                                })}
                            }
                        }
                    }
                }
            }

            if tab_snapshot == TableKind::Mods {
                div {
                    style: "{table_container_style()}",
                    table { style: "border-collapse: collapse; width: 100%; background: #fff;",
                        thead {
                            tr {
                                th { style: "{table_header_cell_style()}", "#" }
                                th { style: "{table_header_cell_style()}", "幹員" }
                                th { style: "{table_header_cell_style()}", "模組" }
                                th { style: "{table_header_cell_style()}", "類型" }
                                th { style: "{table_header_cell_style()}", "模組總成本" }
                            }
                        }
                        tbody {
                            if mod_rows.is_empty() {
                                tr {
                                    td { style: "{table_cell_style()}", colspan: "5", "無資料" }
                                }
                            } else {
                                {mod_rows.iter().map(|entry| {
                                    let module = entry.row.clone();
                                    let char_id = module.char_id.clone();
                                    let index = entry.index;
                                    let total_cost = format_cost(module.total_cost);
                                    rsx!(
                                        tr {
                                            style: "cursor: pointer;",
                                            onclick: move |_| {
                                                let Some(service) = query() else {
                                                    return;
                                                };
                                                let Some(op) = service.dataset().find_operator(&char_id).cloned() else {
                                                    return;
                                                };
                                                let built = DetailService::build(service.dataset(), &op);
                                                detail.set(Some(built));
                                                show_detail.set(true);
                                            },
                                            td { style: "{table_cell_style()}", "{index}" }
                                            td { style: "{table_cell_style()}", "{module.operator_name}" }
                                            td { style: "{table_cell_style()}", "{module.uni_equip_name}" }
                                            td { style: "{table_cell_style()}", "{module.type_name}" }
                                            td { style: "{table_cell_style()}", "{total_cost}" }
                                        }
                                    )
                                })}
                            }
                        }
                    }
                }
            }

            div {
                style: "display: flex; justify-content: center; padding: 10px 0;",
                button {
                    disabled: busy() || !more_available,
                    onclick: move |_| {
                        let params = search_params();
                        if let Some(service) = query.write().as_mut() {
                            if service.load_more(active_tab(), &params) {
                                *status.write() = "已載入更多".to_string();
                            } else {
                                *status.write() = "已載入全部資料".to_string();
                            }
                        }
                    },
                    "載入更多"
                }
            }

            if show_detail() {
                if let Some(current) = detail_snapshot.clone() {
                    div {
                        style: "position: fixed; inset: 0; background: rgba(0,0,0,0.35); display: flex; align-items: center; justify-content: center; z-index: 1100;",
                        onclick: move |_| show_detail.set(false),
                        div {
                            style: "background: #fff; padding: 16px; border: 1px solid #999; min-width: 640px; max-width: 80vw; max-height: 85vh; overflow: auto;",
                            onclick: move |event| event.stop_propagation(),
                            div {
                                style: "display: flex; justify-content: space-between; align-items: center; margin-bottom: 8px;",
                                span {
                                    style: "font-weight: 600;",
                                    "{current.operator.name}（{current.operator.rarity}★）"
                                }
                                button {
                                    onclick: move |_| show_detail.set(false),
                                    "關閉"
                                }
                            }
                            if current.rows.is_empty() {
                                p { "三星以下幹員沒有養成成本分析。" }
                            } else {
                                div {
                                    style: "display: flex; gap: 24px; flex-wrap: wrap; align-items: flex-start; padding-top: 8px;",
                                    {current.rows.iter().map(|row| {
                                        let bar_style = format!(
                                            "position: relative; overflow: hidden; width: {BAR_WIDTH}px; height: {BAR_HEIGHT}px; background: linear-gradient(#dde6f5, #f7f9fc); border: 1px solid #bbb; border-radius: 6px;"
                                        );
                                        let icon_style = format!(
                                            "position: absolute; top: {}px; left: {}px; width: {}px; height: {}px; transform: scale({}); border-radius: 50%; border: 2px solid #678; background: #eef4ff;",
                                            row.icon.top, row.icon.left, row.icon.size, row.icon.size, row.icon.scale
                                        );
                                        let marker_style = row.marker_top.map(|top| format!(
                                            "position: absolute; top: {top}px; right: 0; width: 100%; border-top: 2px solid #d24;"
                                        ));
                                        let rank_text = match row.rank {
                                            Some(rank) => format!("第 {}/{} 名", rank.position, rank.total),
                                            None => "—".to_string(),
                                        };
                                        let cost_text = format_cost(row.total_cost);
                                        let label = row.label.clone();
                                        let icon_class = row.icon_class.clone();
                                        rsx!(
                                            div {
                                                style: "display: flex; flex-direction: column; align-items: center; width: 120px;",
                                                div {
                                                    style: "{bar_style}",
                                                    div { class: "{icon_class}", style: "{icon_style}" }
                                                    if let Some(marker) = marker_style {
                                                        div { style: "{marker}" }
                                                    }
                                                }
                                                div {
                                                    style: "margin-top: 6px; font-size: 12px; text-align: center;",
                                                    div { "{label}" }
                                                    div { "消耗 {cost_text}" }
                                                    div { "{rank_text}" }
                                                }
                                            }
                                        )
                                    })}
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
