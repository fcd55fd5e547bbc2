// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{
    Caret, CellValue, ChangeObserver, ColumnSet, DeriveRule, DraftRow, Key, KeyInput, NavIntent,
    RowId, RowIdSource, RowStore, resolve_key,
};
use anyhow::{Result, bail};
use std::collections::BTreeMap;

/// Rows seeded when add mode starts.
const SEED_BATCH: usize = 3;
/// Rows appended when the user reaches the trailing edge.
const EXPANSION_BATCH: usize = 2;

/// The cell that currently owns keyboard input. Transient: recomputed
/// on every navigation action, never stored in the row store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusRef {
    pub row: usize,
    pub ring_index: usize,
}

/// Everything the external search surface needs to open.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    pub row: usize,
    pub column: String,
    pub snapshot: DraftRow,
}

/// Work the host must run on the next event-loop tick, after the
/// current frame has mounted newly grown rows.
#[derive(Debug, Clone, PartialEq)]
pub enum Deferred {
    FocusCell { row: usize, ring_index: usize },
    OpenSearch(SearchRequest),
}

/// Host-visible outcome of a controller operation, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    RowsChanged,
    FocusCell { row: usize, ring_index: usize },
    OpenSearch(SearchRequest),
    Defer(Deferred),
}

#[derive(Debug, Clone, PartialEq)]
struct PendingSearch {
    row: usize,
    column: String,
    snapshot: DraftRow,
}

/// Composition (IME) session state. An Enter that arrives while a
/// session is open is parked as `PendingSearch` and only acted on once
/// the session ends and the committed text is known.
#[derive(Debug, Clone, PartialEq)]
enum ImeState {
    Idle,
    Composing,
    PendingSearch(PendingSearch),
}

#[derive(Debug, Clone, PartialEq)]
struct SearchSession {
    column: String,
    next_insert: usize,
    populated: Vec<usize>,
}

/// The add-row editing state machine: focus and ring navigation, row
/// expansion, IME-safe Enter handling, and the search-dialog handoff,
/// all layered over a [`RowStore`] it owns exclusively.
#[derive(Debug)]
pub struct GridController {
    columns: ColumnSet,
    store: RowStore,
    adding: bool,
    focus: Option<FocusRef>,
    last_expanded: Option<RowId>,
    ime: ImeState,
    search: Option<SearchSession>,
}

impl GridController {
    pub fn new(
        columns: ColumnSet,
        defaults: &BTreeMap<String, CellValue>,
        ids: RowIdSource,
    ) -> Self {
        let template = columns.template(defaults);
        Self {
            columns,
            store: RowStore::new(template, ids),
            adding: false,
            focus: None,
            last_expanded: None,
            ime: ImeState::Idle,
            search: None,
        }
    }

    pub fn push_derive_rule(&mut self, rule: DeriveRule) {
        self.store.push_derive_rule(rule);
    }

    pub fn set_on_change(&mut self, observer: ChangeObserver) {
        self.store.set_on_change(observer);
    }

    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    pub fn rows(&self) -> &[DraftRow] {
        self.store.snapshot()
    }

    /// The blank-row shape, host defaults included. A draft row whose
    /// values equal this is untouched, even when defaults are
    /// non-empty.
    pub fn blank_row(&self) -> &BTreeMap<String, CellValue> {
        self.store.template()
    }

    pub fn row_count(&self) -> usize {
        self.store.len()
    }

    pub fn is_adding(&self) -> bool {
        self.adding
    }

    pub fn focus(&self) -> Option<FocusRef> {
        self.focus
    }

    pub fn search_open(&self) -> bool {
        self.search.is_some()
    }

    pub fn composing(&self) -> bool {
        !matches!(self.ime, ImeState::Idle)
    }

    /// Turns add mode on and seeds a fresh batch. Focus lands on the
    /// first new row's first ring column once the rows are mounted.
    pub fn start_add_mode(&mut self) -> Vec<Effect> {
        self.adding = true;
        let first_new = self.store.len();
        self.store.seed(SEED_BATCH);
        vec![
            Effect::RowsChanged,
            Effect::Defer(Deferred::FocusCell {
                row: first_new,
                ring_index: 0,
            }),
        ]
    }

    /// Records focus and, when the focused cell sits on the last row
    /// of a store longer than two rows, appends two more rows. The
    /// expansion fires once per last-row id: tabbing across the same
    /// last row's columns must not keep appending.
    pub fn on_cell_focus(&mut self, row: usize, key: &str) -> Result<Vec<Effect>> {
        let ring_index = self.ensure_cell(row, key)?;
        self.focus = Some(FocusRef { row, ring_index });

        let mut effects = Vec::new();
        if row + 1 == self.store.len() && self.store.len() > 2 {
            let id = self.store.row(row)?.id();
            if self.last_expanded != Some(id) {
                self.store.seed(EXPANSION_BATCH);
                self.last_expanded = Some(id);
                effects.push(Effect::RowsChanged);
            }
        }
        Ok(effects)
    }

    pub fn on_cell_blur(&mut self) {
        self.focus = None;
    }

    pub fn on_cell_change(&mut self, row: usize, key: &str, value: CellValue) -> Result<Vec<Effect>> {
        self.ensure_cell(row, key)?;
        self.store.set_cell(row, key, value)?;
        Ok(vec![Effect::RowsChanged])
    }

    /// Keyboard entry point. `current_text` is the live widget text,
    /// which feeds the search query on the non-IME path.
    pub fn on_key(
        &mut self,
        row: usize,
        key: &str,
        input: KeyInput,
        caret: Caret,
        current_text: &str,
    ) -> Result<Vec<Effect>> {
        let ring_index = self.ensure_cell(row, key)?;

        if self.composing() {
            // Mid-composition the widget text is not final: park Enter
            // on searchable columns, swallow everything else.
            if input.key == Key::Enter && self.columns.is_searchable(key) {
                let snapshot = self.store.row(row)?.clone();
                self.ime = ImeState::PendingSearch(PendingSearch {
                    row,
                    column: key.to_owned(),
                    snapshot,
                });
            }
            return Ok(Vec::new());
        }

        match resolve_key(input, caret) {
            NavIntent::MoveNext => self.move_next(row, ring_index),
            NavIntent::MovePrev => Ok(self.move_prev(row, ring_index)),
            NavIntent::MoveUp => Ok(self.move_up(row, ring_index)),
            NavIntent::MoveDown => self.move_down(row, ring_index),
            NavIntent::TriggerSearch => self.trigger_search(row, key, current_text),
            NavIntent::None => Ok(Vec::new()),
        }
    }

    pub fn composition_started(&mut self) {
        if matches!(self.ime, ImeState::Idle) {
            self.ime = ImeState::Composing;
        }
    }

    /// Ends the composition session. `committed_text` must be read
    /// from the live widget, not from the store: the store update for
    /// the final character may not have landed yet. A parked Enter
    /// becomes a deferred search handoff carrying that committed text.
    pub fn composition_ended(&mut self, committed_text: &str) -> Vec<Effect> {
        match std::mem::replace(&mut self.ime, ImeState::Idle) {
            ImeState::PendingSearch(pending) => {
                self.search = Some(SearchSession {
                    column: pending.column.clone(),
                    next_insert: pending.row,
                    populated: Vec::new(),
                });
                vec![Effect::Defer(Deferred::OpenSearch(SearchRequest {
                    query: committed_text.trim().to_owned(),
                    row: pending.row,
                    column: pending.column,
                    snapshot: pending.snapshot,
                }))]
            }
            ImeState::Composing | ImeState::Idle => Vec::new(),
        }
    }

    /// Merges one picked record into the session's insertion row,
    /// growing the store when the last row was populated, and advances
    /// the insertion point so repeated picks from the same open dialog
    /// land in successive rows.
    pub fn apply_pick(&mut self, fields: &BTreeMap<String, CellValue>) -> Result<Vec<Effect>> {
        let base = match &self.search {
            Some(session) => session.next_insert,
            None => bail!("search pick without an open search session"),
        };

        while self.store.len() <= base {
            self.store.seed(1);
        }
        self.store.merge(base, fields)?;
        let was_last = base + 1 == self.store.len();
        if was_last {
            self.store.seed(EXPANSION_BATCH);
        }

        if let Some(session) = self.search.as_mut() {
            if !session.populated.contains(&base) {
                session.populated.push(base);
            }
            session.next_insert = base + 1;
        }
        Ok(vec![Effect::RowsChanged])
    }

    /// Closes the dialog. Without a pick this changes nothing; after
    /// picks, focus returns to the last populated row's first ring
    /// column once the grown rows are mounted.
    pub fn close_search(&mut self) -> Vec<Effect> {
        let Some(session) = self.search.take() else {
            return Vec::new();
        };
        match session.populated.iter().max() {
            Some(&last) => vec![Effect::Defer(Deferred::FocusCell {
                row: last,
                ring_index: 0,
            })],
            None => Vec::new(),
        }
    }

    /// Hands every draft row to the sink (hosts skip untouched rows by
    /// comparing values against [`Self::blank_row`]), then resets
    /// values in place so the grid stays usable for the next batch.
    pub fn commit(&mut self, sink: &mut dyn FnMut(&DraftRow) -> Result<()>) -> Result<Vec<Effect>> {
        let rows = self.store.snapshot().to_vec();
        for row in &rows {
            sink(row)?;
        }
        self.store.clear_all();
        self.focus = None;
        Ok(vec![Effect::RowsChanged])
    }

    pub fn clear_row(&mut self, row: usize) -> Result<Vec<Effect>> {
        self.store.clear_one(row)?;
        Ok(vec![Effect::RowsChanged])
    }

    pub fn clear_all(&mut self) -> Vec<Effect> {
        self.store.clear_all();
        self.focus = None;
        vec![Effect::RowsChanged]
    }

    /// Leaves add mode entirely: rows removed, focus dropped, IME and
    /// search state reset. Ids are never reused by a later batch.
    pub fn cancel(&mut self) -> Vec<Effect> {
        self.adding = false;
        self.store.cancel_all();
        self.focus = None;
        self.last_expanded = None;
        self.ime = ImeState::Idle;
        self.search = None;
        vec![Effect::RowsChanged]
    }

    fn move_next(&mut self, row: usize, ring_index: usize) -> Result<Vec<Effect>> {
        if ring_index + 1 < self.columns.ring_len() {
            return Ok(vec![Effect::FocusCell {
                row,
                ring_index: ring_index + 1,
            }]);
        }
        let next = row + 1;
        if next >= self.store.len() {
            self.expand_after(row)?;
            return Ok(vec![
                Effect::RowsChanged,
                Effect::Defer(Deferred::FocusCell {
                    row: next,
                    ring_index: 0,
                }),
            ]);
        }
        Ok(vec![Effect::FocusCell {
            row: next,
            ring_index: 0,
        }])
    }

    fn move_prev(&self, row: usize, ring_index: usize) -> Vec<Effect> {
        if ring_index > 0 {
            return vec![Effect::FocusCell {
                row,
                ring_index: ring_index - 1,
            }];
        }
        if row > 0 {
            return vec![Effect::FocusCell {
                row: row - 1,
                ring_index: self.columns.ring_len() - 1,
            }];
        }
        // first ring column of row 0: nowhere to go
        Vec::new()
    }

    fn move_up(&self, row: usize, ring_index: usize) -> Vec<Effect> {
        if row > 0 {
            return vec![Effect::FocusCell {
                row: row - 1,
                ring_index,
            }];
        }
        Vec::new()
    }

    fn move_down(&mut self, row: usize, ring_index: usize) -> Result<Vec<Effect>> {
        let next = row + 1;
        if next >= self.store.len() {
            self.expand_after(row)?;
            return Ok(vec![
                Effect::RowsChanged,
                Effect::Defer(Deferred::FocusCell {
                    row: next,
                    ring_index,
                }),
            ]);
        }
        Ok(vec![Effect::FocusCell {
            row: next,
            ring_index,
        }])
    }

    fn trigger_search(&mut self, row: usize, key: &str, text: &str) -> Result<Vec<Effect>> {
        if !self.columns.is_searchable(key) {
            // value is already live via on_cell_change; nothing to do
            return Ok(Vec::new());
        }
        let snapshot = self.store.row(row)?.clone();
        self.search = Some(SearchSession {
            column: key.to_owned(),
            next_insert: row,
            populated: Vec::new(),
        });
        Ok(vec![Effect::OpenSearch(SearchRequest {
            query: text.trim().to_owned(),
            row,
            column: key.to_owned(),
            snapshot,
        })])
    }

    fn expand_after(&mut self, row: usize) -> Result<()> {
        let id = self.store.row(row)?.id();
        self.store.seed(EXPANSION_BATCH);
        self.last_expanded = Some(id);
        Ok(())
    }

    fn ensure_cell(&self, row: usize, key: &str) -> Result<usize> {
        if row >= self.store.len() {
            bail!(
                "row index {row} out of range for {} draft rows",
                self.store.len()
            );
        }
        match self.columns.ring_index_of(key) {
            Some(ring_index) => Ok(ring_index),
            None => bail!("column {key:?} is not a navigable grid column"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Deferred, Effect, GridController};
    use crate::{Caret, CellValue, Column, ColumnSet, Key, KeyInput, RowIdSource};
    use std::collections::BTreeMap;

    const END: Caret = Caret {
        at_start: false,
        at_end: true,
    };
    const MID: Caret = Caret {
        at_start: false,
        at_end: false,
    };

    fn order_columns() -> ColumnSet {
        ColumnSet::new(vec![
            Column::identity("seq", "#"),
            Column::text("item_number", "Item no.").searchable(),
            Column::text("item_name", "Item name"),
            Column::text("qty", "Qty"),
            Column::text("unit_price", "Unit price"),
        ])
        .expect("valid column set")
    }

    fn controller() -> GridController {
        GridController::new(order_columns(), &BTreeMap::new(), RowIdSource::new())
    }

    fn adding_controller() -> GridController {
        let mut grid = controller();
        grid.start_add_mode();
        grid
    }

    fn fields(pairs: &[(&str, &str)]) -> BTreeMap<String, CellValue> {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), CellValue::text(*value)))
            .collect()
    }

    #[test]
    fn start_add_mode_seeds_batch_and_defers_first_focus() {
        let mut grid = controller();
        let effects = grid.start_add_mode();

        assert!(grid.is_adding());
        assert_eq!(grid.row_count(), 3);
        assert_eq!(
            effects,
            vec![
                Effect::RowsChanged,
                Effect::Defer(Deferred::FocusCell {
                    row: 0,
                    ring_index: 0,
                }),
            ],
        );
    }

    #[test]
    fn focusing_the_last_row_expands_once_per_row_identity() {
        let mut grid = adding_controller();

        for key in ["item_number", "item_name", "qty", "unit_price"] {
            grid.on_cell_focus(2, key).expect("focus last row");
        }
        assert_eq!(grid.row_count(), 5, "repeated focus appends exactly once");

        grid.on_cell_focus(4, "item_number").expect("focus new last row");
        assert_eq!(grid.row_count(), 7);
    }

    #[test]
    fn focusing_inner_rows_never_expands() {
        let mut grid = adding_controller();
        grid.on_cell_focus(0, "item_name").expect("focus");
        grid.on_cell_focus(1, "qty").expect("focus");
        assert_eq!(grid.row_count(), 3);
    }

    #[test]
    fn tab_walks_the_ring_then_wraps_to_the_next_row() {
        let mut grid = adding_controller();

        let effects = grid
            .on_key(0, "item_number", KeyInput::plain(Key::Tab), END, "")
            .expect("tab");
        assert_eq!(
            effects,
            vec![Effect::FocusCell {
                row: 0,
                ring_index: 1,
            }],
        );

        let effects = grid
            .on_key(0, "unit_price", KeyInput::plain(Key::Tab), END, "")
            .expect("tab at last column");
        assert_eq!(
            effects,
            vec![Effect::FocusCell {
                row: 1,
                ring_index: 0,
            }],
        );
    }

    #[test]
    fn tab_past_the_last_cell_grows_then_defers_focus() {
        let mut grid = adding_controller();
        assert_eq!(grid.row_count(), 3);

        let effects = grid
            .on_key(2, "unit_price", KeyInput::plain(Key::Tab), END, "")
            .expect("tab at trailing edge");

        assert_eq!(grid.row_count(), 5);
        assert_eq!(
            effects,
            vec![
                Effect::RowsChanged,
                Effect::Defer(Deferred::FocusCell {
                    row: 3,
                    ring_index: 0,
                }),
            ],
        );
    }

    #[test]
    fn shift_tab_at_the_origin_stays_put() {
        let mut grid = adding_controller();
        let effects = grid
            .on_key(0, "item_number", KeyInput::shifted(Key::Tab), END, "")
            .expect("shift tab");
        assert!(effects.is_empty());
        assert_eq!(grid.row_count(), 3);
    }

    #[test]
    fn shift_tab_wraps_to_previous_row_last_column() {
        let mut grid = adding_controller();
        let effects = grid
            .on_key(1, "item_number", KeyInput::shifted(Key::Tab), END, "")
            .expect("shift tab");
        assert_eq!(
            effects,
            vec![Effect::FocusCell {
                row: 0,
                ring_index: 3,
            }],
        );
    }

    #[test]
    fn arrow_right_only_navigates_from_the_text_end() {
        let mut grid = adding_controller();

        let effects = grid
            .on_key(0, "item_name", KeyInput::plain(Key::Right), MID, "abc")
            .expect("arrow in-field");
        assert!(effects.is_empty(), "caret not at end stays in the field");

        let effects = grid
            .on_key(0, "item_name", KeyInput::plain(Key::Right), END, "abc")
            .expect("arrow at boundary");
        assert_eq!(
            effects,
            vec![Effect::FocusCell {
                row: 0,
                ring_index: 2,
            }],
        );
    }

    #[test]
    fn arrow_down_on_the_last_row_grows_first() {
        let mut grid = adding_controller();
        let effects = grid
            .on_key(2, "item_name", KeyInput::plain(Key::Down), MID, "")
            .expect("arrow down");

        assert_eq!(grid.row_count(), 5);
        assert_eq!(
            effects,
            vec![
                Effect::RowsChanged,
                Effect::Defer(Deferred::FocusCell {
                    row: 3,
                    ring_index: 1,
                }),
            ],
        );
    }

    #[test]
    fn arrow_up_from_the_top_row_is_inert() {
        let mut grid = adding_controller();
        let effects = grid
            .on_key(0, "qty", KeyInput::plain(Key::Up), MID, "")
            .expect("arrow up");
        assert!(effects.is_empty());
    }

    #[test]
    fn enter_on_a_searchable_column_opens_search_with_the_typed_text() {
        let mut grid = adding_controller();
        grid.on_cell_change(1, "item_number", CellValue::text("ax"))
            .expect("live edit");

        let effects = grid
            .on_key(1, "item_number", KeyInput::plain(Key::Enter), END, " ax ")
            .expect("enter");

        assert_eq!(effects.len(), 1);
        let Effect::OpenSearch(request) = &effects[0] else {
            panic!("expected an open-search effect, got {effects:?}");
        };
        assert_eq!(request.query, "ax");
        assert_eq!(request.row, 1);
        assert_eq!(request.column, "item_number");
        assert_eq!(request.snapshot.get("item_number"), Some(&CellValue::text("ax")));
        assert!(grid.search_open());
    }

    #[test]
    fn enter_on_a_plain_column_does_nothing() {
        let mut grid = adding_controller();
        let effects = grid
            .on_key(0, "qty", KeyInput::plain(Key::Enter), END, "3")
            .expect("enter");
        assert!(effects.is_empty());
        assert!(!grid.search_open());
    }

    #[test]
    fn composition_defers_enter_until_the_committed_text_is_known() {
        let mut grid = adding_controller();
        grid.composition_started();

        // two keystrokes land while composing; values are intermediate
        grid.on_cell_change(0, "item_number", CellValue::text("a"))
            .expect("edit");
        grid.on_cell_change(0, "item_number", CellValue::text("ab"))
            .expect("edit");

        let effects = grid
            .on_key(0, "item_number", KeyInput::plain(Key::Enter), END, "ab")
            .expect("enter mid-composition");
        assert!(effects.is_empty(), "no search while composing");

        let effects = grid.composition_ended("abc");
        assert_eq!(effects.len(), 1);
        let Effect::Defer(Deferred::OpenSearch(request)) = &effects[0] else {
            panic!("expected a deferred open-search, got {effects:?}");
        };
        assert_eq!(request.query, "abc", "query is the committed text, not the cached value");
        assert_eq!(request.row, 0);

        // the session ended; a second composition end emits nothing
        assert!(grid.composition_ended("abc").is_empty());
    }

    #[test]
    fn composition_without_a_parked_enter_ends_quietly() {
        let mut grid = adding_controller();
        grid.composition_started();
        grid.on_cell_change(0, "item_number", CellValue::text("x"))
            .expect("edit");
        assert!(grid.composition_ended("x").is_empty());
        assert!(!grid.composing());
    }

    #[test]
    fn navigation_keys_are_swallowed_while_composing() {
        let mut grid = adding_controller();
        grid.composition_started();

        let tab = grid
            .on_key(0, "item_name", KeyInput::plain(Key::Tab), END, "")
            .expect("tab");
        let down = grid
            .on_key(2, "item_name", KeyInput::plain(Key::Down), MID, "")
            .expect("down");
        assert!(tab.is_empty());
        assert!(down.is_empty());
        assert_eq!(grid.row_count(), 3, "no growth mid-composition");
    }

    #[test]
    fn picking_into_the_last_row_merges_and_grows() {
        let mut grid = adding_controller();
        grid.on_key(2, "item_number", KeyInput::plain(Key::Enter), END, "wid")
            .expect("open search");

        let effects = grid
            .apply_pick(&fields(&[("item_number", "X1"), ("item_name", "Widget")]))
            .expect("pick");

        assert_eq!(effects, vec![Effect::RowsChanged]);
        assert_eq!(grid.row_count(), 5);
        let row = &grid.rows()[2];
        assert_eq!(row.get("item_number"), Some(&CellValue::text("X1")));
        assert_eq!(row.get("item_name"), Some(&CellValue::text("Widget")));
        assert_eq!(row.get("qty"), Some(&CellValue::text("")));
    }

    #[test]
    fn repeated_picks_land_in_successive_rows() {
        let mut grid = adding_controller();
        grid.on_key(0, "item_number", KeyInput::plain(Key::Enter), END, "")
            .expect("open search");

        grid.apply_pick(&fields(&[("item_number", "A")])).expect("pick");
        grid.apply_pick(&fields(&[("item_number", "B")])).expect("pick");
        grid.apply_pick(&fields(&[("item_number", "C")])).expect("pick");

        assert_eq!(grid.rows()[0].get("item_number"), Some(&CellValue::text("A")));
        assert_eq!(grid.rows()[1].get("item_number"), Some(&CellValue::text("B")));
        assert_eq!(grid.rows()[2].get("item_number"), Some(&CellValue::text("C")));
        assert_eq!(grid.row_count(), 5, "third pick hit the last row and grew");

        let effects = grid.close_search();
        assert_eq!(
            effects,
            vec![Effect::Defer(Deferred::FocusCell {
                row: 2,
                ring_index: 0,
            })],
        );
        assert!(!grid.search_open());
    }

    #[test]
    fn closing_search_without_a_pick_changes_nothing() {
        let mut grid = adding_controller();
        let rows_before = grid.rows().to_vec();
        grid.on_key(1, "item_number", KeyInput::plain(Key::Enter), END, "q")
            .expect("open search");

        let effects = grid.close_search();
        assert!(effects.is_empty());
        assert_eq!(grid.rows(), rows_before.as_slice());
        assert!(!grid.search_open());
    }

    #[test]
    fn pick_without_a_session_fails_fast() {
        let mut grid = adding_controller();
        assert!(grid.apply_pick(&fields(&[("item_name", "X")])).is_err());
    }

    #[test]
    fn commit_hands_every_row_to_the_sink_then_resets_values() {
        let mut grid = adding_controller();
        grid.on_cell_change(0, "item_name", CellValue::text("Widget"))
            .expect("edit");

        let mut committed = Vec::new();
        grid.commit(&mut |row| {
            if row.has_values() {
                committed.push(row.clone());
            }
            Ok(())
        })
        .expect("commit");

        assert_eq!(committed.len(), 1);
        assert_eq!(grid.row_count(), 3, "rows stay mounted after commit");
        assert!(grid.rows().iter().all(|row| !row.has_values()));
    }

    #[test]
    fn cancel_empties_the_store_and_a_new_batch_gets_fresh_ids() {
        let mut grid = adding_controller();
        let old_ids = grid
            .rows()
            .iter()
            .map(|row| row.id())
            .collect::<Vec<_>>();

        grid.cancel();
        assert!(!grid.is_adding());
        assert_eq!(grid.row_count(), 0);

        grid.start_add_mode();
        let new_ids = grid
            .rows()
            .iter()
            .map(|row| row.id())
            .collect::<Vec<_>>();
        assert_eq!(new_ids.len(), 3);
        assert!(new_ids.iter().all(|id| !old_ids.contains(id)));
    }

    #[test]
    fn clear_row_keeps_identity_and_position() {
        let mut grid = adding_controller();
        grid.on_cell_change(1, "item_name", CellValue::text("Gear"))
            .expect("edit");
        let id = grid.rows()[1].id();

        grid.clear_row(1).expect("clear row");

        assert_eq!(grid.rows()[1].id(), id);
        assert!(!grid.rows()[1].has_values());
    }

    #[test]
    fn desynchronized_references_fail_fast() {
        let mut grid = adding_controller();
        assert!(grid.on_cell_focus(9, "item_name").is_err());
        assert!(grid.on_cell_focus(0, "seq").is_err(), "identity columns are not navigable");
        assert!(
            grid.on_key(0, "ghost", KeyInput::plain(Key::Tab), END, "")
                .is_err()
        );
        assert!(grid.on_cell_change(7, "qty", CellValue::text("1")).is_err());
    }
}
