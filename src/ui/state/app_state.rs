use dioxus::prelude::{use_signal, Signal};

use crate::domain::entities::detail::OperatorDetail;
use crate::domain::entities::query::{SearchParams, TableKind};
use crate::usecase::services::query_service::QueryService;

pub struct AppState {
    pub query: Signal<Option<QueryService>>,
    pub search_params: Signal<SearchParams>,
    pub active_tab: Signal<TableKind>,
    pub sort_field: Signal<Option<String>>,
    pub sort_desc: Signal<bool>,
    pub detail: Signal<Option<OperatorDetail>>,
    pub show_detail: Signal<bool>,
    pub busy: Signal<bool>,
    pub status: Signal<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            query: use_signal(|| None::<QueryService>),
            search_params: use_signal(SearchParams::default),
            active_tab: use_signal(|| TableKind::Operators),
            sort_field: use_signal(|| None::<String>),
            sort_desc: use_signal(|| false),
            detail: use_signal(|| None::<OperatorDetail>),
            show_detail: use_signal(|| false),
            busy: use_signal(|| false),
            status: use_signal(|| "就緒".to_string()),
        }
    }
}
