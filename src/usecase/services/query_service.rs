use crate::domain::entities::operator::{ModuleEquip, Operator, OperatorDataset, Skill};
use crate::domain::entities::query::{Pagination, SearchParams, SortSpec, TableKind, PAGE_SIZE};

/// A record that can live in one of the three table views.
pub trait TableRow: Clone {
    /// Free-text match against the view-specific fields. An empty key
    /// matches everything.
    fn matches(&self, key: &str) -> bool;

    /// Numeric value at a dot-separated field path. `None` reads as 0 when
    /// sorting.
    fn numeric_field(&self, path: &str) -> Option<f64>;
}

impl TableRow for Operator {
    fn matches(&self, key: &str) -> bool {
        self.name.contains(key)
    }

    fn numeric_field(&self, path: &str) -> Option<f64> {
        match path {
            "rarity" => Some(f64::from(self.rarity)),
            "total_cost" => Some(self.total_cost),
            "elite.total_cost" => Some(self.elite.total_cost),
            _ => None,
        }
    }
}

impl TableRow for Skill {
    fn matches(&self, key: &str) -> bool {
        self.operator_name.contains(key) || self.name.contains(key)
    }

    fn numeric_field(&self, path: &str) -> Option<f64> {
        match path {
            "total_cost" => Some(self.total_cost),
            _ => None,
        }
    }
}

impl TableRow for ModuleEquip {
    fn matches(&self, key: &str) -> bool {
        self.operator_name.contains(key) || self.uni_equip_name.contains(key)
    }

    fn numeric_field(&self, path: &str) -> Option<f64> {
        match path {
            "total_cost" => Some(self.total_cost),
            _ => None,
        }
    }
}

/// A backing-list row paired with its 1-based position in the full sorted
/// list. Indices are assigned before the free-text filter, so a filtered
/// view keeps the original numbering.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedRow<R> {
    pub index: usize,
    pub row: R,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableView<R: TableRow> {
    rows: Vec<R>,
    pagination: Pagination,
    visible: Vec<IndexedRow<R>>,
}

impl<R: TableRow> TableView<R> {
    fn new() -> Self {
        Self {
            rows: Vec::new(),
            pagination: Pagination::default(),
            visible: Vec::new(),
        }
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn visible(&self) -> &[IndexedRow<R>] {
        &self.visible
    }

    pub fn has_more(&self) -> bool {
        self.pagination.has_more()
    }

    fn replace_rows(&mut self, rows: Vec<R>, search_key: &str) {
        self.rows = rows;
        self.pagination = Pagination::default();
        self.refresh(search_key);
    }

    /// Stable numeric sort by the requested field path; direction is a
    /// sign flip. Resets the cursor and replaces the visible window.
    pub fn apply_sort(&mut self, spec: &SortSpec, search_key: &str) {
        let sign = spec.direction.sign();
        self.rows.sort_by(|a, b| {
            let left = sign * a.numeric_field(&spec.field).unwrap_or(0.0);
            let right = sign * b.numeric_field(&spec.field).unwrap_or(0.0);
            left.total_cmp(&right)
        });
        self.pagination = Pagination::default();
        self.refresh(search_key);
    }

    /// Recomputes the visible window: index, free-text filter, count, then
    /// the `[current * 50, (current + 1) * 50)` slice. Page 0 replaces the
    /// visible list, later pages append to it.
    fn refresh(&mut self, search_key: &str) {
        let matched: Vec<IndexedRow<R>> = self
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| IndexedRow {
                index: idx + 1,
                row: row.clone(),
            })
            .filter(|entry| entry.row.matches(search_key))
            .collect();

        self.pagination.total = matched.len();

        let start = (self.pagination.current * PAGE_SIZE).min(matched.len());
        let end = ((self.pagination.current + 1) * PAGE_SIZE).min(matched.len());
        let window = matched[start..end].to_vec();

        if self.pagination.current == 0 {
            self.visible = window;
        } else {
            self.visible.extend(window);
        }
    }

    /// Appends the next window. Advances only while another full or partial
    /// page exists, which keeps `current * PAGE_SIZE <= total`; exhausted
    /// calls are no-ops and return false.
    pub fn load_more(&mut self, search_key: &str) -> bool {
        if !self.pagination.has_more() {
            return false;
        }
        self.pagination.current += 1;
        self.refresh(search_key);
        true
    }
}

/// Owns the fetched dataset and derives the three table views. The views
/// are always recomputed together on a filter change, never independently.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryService {
    dataset: OperatorDataset,
    operators: TableView<Operator>,
    skills: TableView<Skill>,
    mods: TableView<ModuleEquip>,
}

impl QueryService {
    pub fn new(dataset: OperatorDataset, params: &SearchParams) -> Self {
        let mut service = Self {
            dataset,
            operators: TableView::new(),
            skills: TableView::new(),
            mods: TableView::new(),
        };
        service.rebuild(params);
        service
    }

    pub fn dataset(&self) -> &OperatorDataset {
        &self.dataset
    }

    pub fn operators(&self) -> &TableView<Operator> {
        &self.operators
    }

    pub fn skills(&self) -> &TableView<Skill> {
        &self.skills
    }

    pub fn mods(&self) -> &TableView<ModuleEquip> {
        &self.mods
    }

    pub fn pagination(&self, kind: TableKind) -> Pagination {
        match kind {
            TableKind::Operators => self.operators.pagination(),
            TableKind::Skills => self.skills.pagination(),
            TableKind::Mods => self.mods.pagination(),
        }
    }

    pub fn has_more(&self, kind: TableKind) -> bool {
        match kind {
            TableKind::Operators => self.operators.has_more(),
            TableKind::Skills => self.skills.has_more(),
            TableKind::Mods => self.mods.has_more(),
        }
    }

    /// Re-filters the operator list by rarity/profession and rebuilds all
    /// three views: operators keep dataset order, skills and mods are
    /// flattened from the filtered operators and pre-sorted by total cost
    /// descending. Cursors reset to page 0.
    pub fn rebuild(&mut self, params: &SearchParams) {
        let filtered: Vec<Operator> = self
            .dataset
            .operators
            .iter()
            .filter(|op| params.passes(op))
            .cloned()
            .collect();

        let mut skills: Vec<Skill> = filtered
            .iter()
            .flat_map(|op| op.skills.iter().cloned())
            .collect();
        skills.sort_by(|a, b| b.total_cost.total_cmp(&a.total_cost));

        let mut mods: Vec<ModuleEquip> = filtered
            .iter()
            .flat_map(|op| op.mods.iter().cloned())
            .collect();
        mods.sort_by(|a, b| b.total_cost.total_cmp(&a.total_cost));

        self.operators.replace_rows(filtered, &params.search_key);
        self.skills.replace_rows(skills, &params.search_key);
        self.mods.replace_rows(mods, &params.search_key);
    }

    pub fn apply_sort(&mut self, kind: TableKind, spec: &SortSpec, params: &SearchParams) {
        match kind {
            TableKind::Operators => self.operators.apply_sort(spec, &params.search_key),
            TableKind::Skills => self.skills.apply_sort(spec, &params.search_key),
            TableKind::Mods => self.mods.apply_sort(spec, &params.search_key),
        }
    }

    pub fn load_more(&mut self, kind: TableKind, params: &SearchParams) -> bool {
        match kind {
            TableKind::Operators => self.operators.load_more(&params.search_key),
            TableKind::Skills => self.skills.load_more(&params.search_key),
            TableKind::Mods => self.mods.load_more(&params.search_key),
        }
    }
}
