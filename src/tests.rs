use serde_json::json;

use crate::domain::entities::operator::CharId;
use crate::domain::entities::query::{SearchParams, SortDirection, SortSpec, TableKind, PAGE_SIZE};
use crate::infra::api::payload::{build_dataset, Envelope};
use crate::usecase::services::detail_service::DetailService;
use crate::usecase::services::query_service::QueryService;

fn decode(body: String) -> Envelope {
    serde_json::from_str(&body).expect("should decode the backend envelope")
}

fn sample_body() -> String {
    json!({
        "data": {
            "data": [
                {
                    "charId": "char_101_sora",
                    "name": "空弦",
                    "rarity": 6,
                    "subProfessionId": "sniper",
                    "elite": { "totalCost": 200.0 },
                    "skills": [
                        { "name": "箭雨", "iconId": "sora_1", "totalCost": 95.0 },
                        { "name": "貫穿", "iconId": "sora_2", "totalCost": 80.0 }
                    ],
                    "mods": [
                        { "uniEquipName": "遠望", "typeName2": "MAR", "totalCost": 64.0 }
                    ],
                    "totalCost": 439.0
                },
                {
                    "charId": "char_102_yumo",
                    "name": "餘墨",
                    "rarity": 6,
                    "subProfessionId": "guard",
                    "elite": { "totalCost": 180.0 },
                    "skills": [
                        { "name": "潑墨", "iconId": "yumo_1", "totalCost": 70.0 }
                    ],
                    "mods": [
                        { "uniEquipName": "留白", "typeName2": "REA", "totalCost": 58.0 }
                    ],
                    "totalCost": 308.0
                },
                {
                    "charId": "char_103_hibi",
                    "name": "芙蓉",
                    "rarity": 3,
                    "subProfessionId": "physician",
                    "elite": { "totalCost": 20.0 },
                    "skills": [],
                    "mods": [],
                    "totalCost": 20.0
                }
            ]
        }
    })
    .to_string()
}

#[test]
fn payload_flows_into_paginated_tables() {
    let envelope = decode(sample_body());
    let dataset = build_dataset(envelope.data.data);
    let service = QueryService::new(dataset, &SearchParams::default());

    assert_eq!(service.operators().pagination().total, 3);
    assert_eq!(service.skills().pagination().total, 3);
    assert_eq!(service.mods().pagination().total, 2);

    let skill_costs: Vec<f64> = service
        .skills()
        .visible()
        .iter()
        .map(|entry| entry.row.total_cost)
        .collect();
    assert_eq!(skill_costs, vec![95.0, 80.0, 70.0], "flattened and pre-sorted");
}

#[test]
fn skill_row_click_resolves_the_owning_operator() {
    let envelope = decode(sample_body());
    let dataset = build_dataset(envelope.data.data);
    let service = QueryService::new(dataset, &SearchParams::default());

    let clicked = &service.skills().visible()[2].row;
    assert_eq!(clicked.name, "潑墨");

    let owner = service
        .dataset()
        .find_operator(&clicked.char_id)
        .expect("skill row should resolve to its operator");
    assert_eq!(owner.name, "餘墨");

    let detail = DetailService::build(service.dataset(), owner);
    assert_eq!(detail.rows.len(), 3, "elite + one skill + one module");

    let elite_rank = detail.rows[0].rank.expect("elite cost should rank");
    assert_eq!(
        (elite_rank.position, elite_rank.total),
        (2, 2),
        "180 ranks below 200 among six-stars"
    );

    let skill_rank = detail.rows[1].rank.expect("skill cost should rank");
    assert_eq!((skill_rank.position, skill_rank.total), (3, 3));
}

#[test]
fn low_rarity_operator_opens_an_empty_detail() {
    let envelope = decode(sample_body());
    let dataset = build_dataset(envelope.data.data);
    let service = QueryService::new(dataset, &SearchParams::default());

    let owner = service
        .dataset()
        .find_operator(&CharId("char_103_hibi".to_string()))
        .expect("operator should exist");
    let detail = DetailService::build(service.dataset(), owner);

    assert_eq!(detail.operator.name, "芙蓉");
    assert!(detail.rows.is_empty());
}

#[test]
fn filter_sort_and_detail_agree_on_the_top_cost_operator() {
    let envelope = decode(sample_body());
    let dataset = build_dataset(envelope.data.data);

    let mut params = SearchParams::default();
    params.rarities.insert(6);
    let mut service = QueryService::new(dataset, &params);

    let spec = SortSpec {
        field: "elite.total_cost".to_string(),
        direction: SortDirection::Desc,
    };
    service.apply_sort(TableKind::Operators, &spec, &params);

    let top = service.operators().visible()[0].row.clone();
    assert_eq!(top.name, "空弦");

    let detail = DetailService::build(service.dataset(), &top);
    let elite_rank = detail.rows[0].rank.expect("elite cost should rank");
    assert_eq!(
        elite_rank.position, 1,
        "the most expensive elite cost ranks first"
    );
}

#[test]
fn the_120_operator_example_paginates_in_three_windows() {
    let operators: Vec<serde_json::Value> = (0..120)
        .map(|idx| {
            json!({
                "charId": format!("char_{idx:03}"),
                "name": format!("幹員{idx}"),
                "rarity": 4,
                "subProfessionId": "caster",
                "elite": { "totalCost": 60.0 },
                "skills": [
                    { "name": format!("技能{idx}"), "iconId": "sk", "totalCost": 30.0 + idx as f64 }
                ],
                "mods": [],
                "totalCost": 90.0 + idx as f64
            })
        })
        .collect();
    let body = json!({ "data": { "data": operators } }).to_string();

    let envelope = decode(body);
    let dataset = build_dataset(envelope.data.data);
    let params = SearchParams::default();
    let mut service = QueryService::new(dataset, &params);

    assert_eq!(service.operators().visible().len(), 50);
    assert_eq!(service.operators().pagination().total, 120);

    assert!(service.load_more(TableKind::Operators, &params));
    assert_eq!(service.operators().visible().len(), 100);

    assert!(service.load_more(TableKind::Operators, &params));
    assert_eq!(service.operators().visible().len(), 120);

    assert!(!service.load_more(TableKind::Operators, &params));
    assert!(!service.load_more(TableKind::Operators, &params));
    assert_eq!(service.operators().visible().len(), 120);

    let pagination = service.operators().pagination();
    assert!(pagination.current * PAGE_SIZE <= pagination.total);
}

#[test]
fn refiltering_resets_every_view_cursor() {
    let operators: Vec<serde_json::Value> = (0..80)
        .map(|idx| {
            json!({
                "charId": format!("char_{idx:03}"),
                "name": format!("幹員{idx}"),
                "rarity": if idx % 2 == 0 { 6 } else { 4 },
                "subProfessionId": "caster",
                "elite": { "totalCost": 60.0 },
                "skills": [
                    { "name": format!("技能{idx}"), "iconId": "sk", "totalCost": 30.0 + idx as f64 }
                ],
                "mods": [],
                "totalCost": 90.0 + idx as f64
            })
        })
        .collect();
    let body = json!({ "data": { "data": operators } }).to_string();

    let envelope = decode(body);
    let dataset = build_dataset(envelope.data.data);
    let params = SearchParams::default();
    let mut service = QueryService::new(dataset, &params);

    assert!(service.load_more(TableKind::Operators, &params));
    assert_eq!(service.operators().pagination().current, 1);

    let mut narrowed = SearchParams::default();
    narrowed.rarities.insert(6);
    service.rebuild(&narrowed);

    assert_eq!(service.operators().pagination().current, 0);
    assert_eq!(service.operators().pagination().total, 40);
    assert_eq!(service.operators().visible().len(), 40);
    assert_eq!(service.skills().pagination().current, 0);
    assert_eq!(service.mods().pagination().current, 0);
}
