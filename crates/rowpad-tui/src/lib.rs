// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table};
use rowpad_grid::{
    CellValue, Deferred, DraftRow, EditKind, Effect, GridController, Key, KeyInput, SearchRequest,
    SelectOption, parse_date,
};
use std::collections::BTreeMap;
use std::io;
use std::time::Duration;
use time::OffsetDateTime;

const MAX_SEARCH_HITS: usize = 24;
const CARET_MARK: &str = "\u{2038}";
const DIRTY_MARK: &str = "*";

/// One selectable result in the search overlay. `fields` is what a
/// pick back-fills into the target draft row.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub label: String,
    pub fields: BTreeMap<String, CellValue>,
}

/// Everything the grid needs from its surroundings: a lookup catalog
/// for searchable columns and a sink for committed rows.
pub trait GridRuntime {
    fn search(&mut self, column: &str, query: &str) -> Result<Vec<SearchHit>>;
    fn commit_row(&mut self, values: &BTreeMap<String, CellValue>) -> Result<()>;
    fn committed(&mut self) -> Result<Vec<BTreeMap<String, CellValue>>>;
}

/// Text editor for the focused cell. Cursor is a char offset; the
/// grid core only ever sees the boundary flags.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct CellEditor {
    text: String,
    cursor: usize,
}

impl CellEditor {
    fn load(value: &CellValue) -> Self {
        let text = value.display();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn caret(&self) -> rowpad_grid::Caret {
        rowpad_grid::Caret::at(self.cursor, self.char_len())
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(offset, _)| offset)
            .unwrap_or(self.text.len())
    }

    fn insert(&mut self, ch: char) {
        let offset = self.byte_offset(self.cursor);
        self.text.insert(offset, ch);
        self.cursor += 1;
    }

    fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let offset = self.byte_offset(self.cursor - 1);
        self.text.remove(offset);
        self.cursor -= 1;
        true
    }

    fn delete(&mut self) -> bool {
        if self.cursor >= self.char_len() {
            return false;
        }
        let offset = self.byte_offset(self.cursor);
        self.text.remove(offset);
        true
    }

    fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_len());
    }

    fn move_home(&mut self) {
        self.cursor = 0;
    }

    fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    fn set_text(&mut self, text: String) {
        self.cursor = text.chars().count();
        self.text = text;
    }

    /// Text with a caret mark inserted, for the focused cell.
    fn display_with_caret(&self) -> String {
        let offset = self.byte_offset(self.cursor);
        let mut rendered = self.text.clone();
        rendered.insert_str(offset, CARET_MARK);
        rendered
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
struct SearchUiState {
    visible: bool,
    column: String,
    query: String,
    hits: Vec<SearchHit>,
    cursor: usize,
    picked: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
struct ViewData {
    committed: Vec<BTreeMap<String, CellValue>>,
    editor: CellEditor,
    search: SearchUiState,
    help_visible: bool,
    status: Option<String>,
    deferred: Vec<Deferred>,
}

pub fn run_app<R: GridRuntime>(grid: &mut GridController, runtime: &mut R) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::default();
    if let Err(error) = refresh_committed(runtime, &mut view_data) {
        view_data.status = Some(format!("load failed: {error}"));
    }

    let mut result = Ok(());
    loop {
        if let Err(error) = terminal.draw(|frame| render(frame, grid, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        // Grown rows are on screen now; pending focus/search moves may
        // run against them.
        if let Err(error) = process_deferred(grid, runtime, &mut view_data) {
            result = Err(error);
            break;
        }

        let has_event = event::poll(Duration::from_millis(120)).context("poll event")?;
        if has_event {
            match event::read().context("read event")? {
                Event::Key(key) => match handle_key_event(grid, runtime, &mut view_data, key) {
                    Ok(true) => break,
                    Ok(false) => {}
                    Err(error) => {
                        result = Err(error);
                        break;
                    }
                },
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

/// Runs queued deferred effects. Called once per event-loop tick,
/// after the frame that mounted any newly grown rows.
fn process_deferred<R: GridRuntime>(
    grid: &mut GridController,
    runtime: &mut R,
    view_data: &mut ViewData,
) -> Result<()> {
    let queued = std::mem::take(&mut view_data.deferred);
    for deferred in queued {
        match deferred {
            Deferred::FocusCell { row, ring_index } => {
                apply_focus(grid, runtime, view_data, row, ring_index)?;
            }
            Deferred::OpenSearch(request) => {
                open_search(runtime, view_data, &request)?;
            }
        }
    }
    Ok(())
}

fn handle_effects<R: GridRuntime>(
    grid: &mut GridController,
    runtime: &mut R,
    view_data: &mut ViewData,
    effects: Vec<Effect>,
) -> Result<()> {
    for effect in effects {
        match effect {
            Effect::RowsChanged => {}
            Effect::FocusCell { row, ring_index } => {
                apply_focus(grid, runtime, view_data, row, ring_index)?;
            }
            Effect::OpenSearch(request) => {
                open_search(runtime, view_data, &request)?;
            }
            Effect::Defer(deferred) => view_data.deferred.push(deferred),
        }
    }
    Ok(())
}

/// Moves keyboard focus to a cell: notifies the controller (which may
/// expand the store), loads the cell text into the editor with the
/// caret at the end, and seeds empty date cells with today.
fn apply_focus<R: GridRuntime>(
    grid: &mut GridController,
    runtime: &mut R,
    view_data: &mut ViewData,
    row: usize,
    ring_index: usize,
) -> Result<()> {
    let Some(column) = grid.columns().ring_column(ring_index) else {
        return Ok(());
    };
    let key = column.key.clone();
    let is_date = matches!(column.kind, EditKind::Date);

    let effects = grid.on_cell_focus(row, &key)?;
    handle_effects(grid, runtime, view_data, effects)?;

    if is_date && grid.rows()[row].get(&key).is_none_or(CellValue::is_empty) {
        let seeded = CellValue::Date(today());
        let effects = grid.on_cell_change(row, &key, seeded)?;
        handle_effects(grid, runtime, view_data, effects)?;
    }

    let value = grid.rows()[row].get(&key).cloned().unwrap_or_default();
    view_data.editor = CellEditor::load(&value);
    Ok(())
}

fn open_search<R: GridRuntime>(
    runtime: &mut R,
    view_data: &mut ViewData,
    request: &SearchRequest,
) -> Result<()> {
    // catalog errors keep the grid alive; the overlay just never opens
    let mut hits = match runtime.search(&request.column, &request.query) {
        Ok(hits) => hits,
        Err(error) => {
            view_data.status = Some(format!("search failed: {error}"));
            return Ok(());
        }
    };
    hits.truncate(MAX_SEARCH_HITS);
    view_data.search = SearchUiState {
        visible: true,
        column: request.column.clone(),
        query: request.query.clone(),
        hits,
        cursor: 0,
        picked: 0,
    };
    Ok(())
}

fn refresh_committed<R: GridRuntime>(runtime: &mut R, view_data: &mut ViewData) -> Result<()> {
    view_data.committed = runtime.committed()?;
    Ok(())
}

/// Returns true when the app should quit.
fn handle_key_event<R: GridRuntime>(
    grid: &mut GridController,
    runtime: &mut R,
    view_data: &mut ViewData,
    key: KeyEvent,
) -> Result<bool> {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Ok(true);
    }

    if view_data.help_visible {
        if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
            view_data.help_visible = false;
        }
        return Ok(false);
    }

    if view_data.search.visible {
        handle_search_key(grid, runtime, view_data, key)?;
        return Ok(false);
    }

    if !grid.is_adding() {
        match key.code {
            KeyCode::Char('i') => {
                let effects = grid.start_add_mode();
                handle_effects(grid, runtime, view_data, effects)?;
                view_data.status = Some("add mode: type across cells, Ctrl+S saves".to_owned());
            }
            KeyCode::Char('?') => {
                view_data.help_visible = true;
            }
            _ => {}
        }
        return Ok(false);
    }

    handle_grid_key(grid, runtime, view_data, key)?;
    Ok(false)
}

fn handle_grid_key<R: GridRuntime>(
    grid: &mut GridController,
    runtime: &mut R,
    view_data: &mut ViewData,
    key: KeyEvent,
) -> Result<()> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('s') => return commit_drafts(grid, runtime, view_data),
            KeyCode::Char('l') => {
                let effects = grid.clear_all();
                handle_effects(grid, runtime, view_data, effects)?;
                view_data.editor = CellEditor::default();
                view_data.status = Some("all draft values cleared".to_owned());
                return Ok(());
            }
            KeyCode::Char('d') => {
                if let Some(focus) = grid.focus() {
                    let effects = grid.clear_row(focus.row)?;
                    handle_effects(grid, runtime, view_data, effects)?;
                    apply_focus(grid, runtime, view_data, focus.row, focus.ring_index)?;
                    view_data.status = Some(format!("row {} cleared", focus.row + 1));
                }
                return Ok(());
            }
            KeyCode::Char('x') => {
                let effects = grid.cancel();
                handle_effects(grid, runtime, view_data, effects)?;
                view_data.editor = CellEditor::default();
                view_data.status = Some("add mode canceled".to_owned());
                return Ok(());
            }
            _ => return Ok(()),
        }
    }

    let Some(focus) = grid.focus() else {
        return Ok(());
    };
    let Some(column) = grid.columns().ring_column(focus.ring_index) else {
        return Ok(());
    };
    let column_key = column.key.clone();
    let column_kind = column.kind.clone();

    if let Some(input) = to_key_input(key) {
        let caret = view_data.editor.caret();
        let text = view_data.editor.text.clone();
        let effects = grid.on_key(focus.row, &column_key, input, caret, &text)?;
        if effects.is_empty() {
            // the key stays inside the field
            match input.key {
                Key::Left => view_data.editor.move_left(),
                Key::Right => view_data.editor.move_right(),
                _ => {}
            }
        } else {
            handle_effects(grid, runtime, view_data, effects)?;
        }
        return Ok(());
    }

    match column_kind {
        EditKind::Select(options) => {
            handle_select_edit(grid, runtime, view_data, focus.row, &column_key, &options, key)
        }
        EditKind::Text | EditKind::Date => {
            handle_text_edit(grid, runtime, view_data, focus.row, &column_key, &column_kind, key)
        }
    }
}

fn handle_text_edit<R: GridRuntime>(
    grid: &mut GridController,
    runtime: &mut R,
    view_data: &mut ViewData,
    row: usize,
    column_key: &str,
    kind: &EditKind,
    key: KeyEvent,
) -> Result<()> {
    let edited = match key.code {
        KeyCode::Char(ch) => {
            view_data.editor.insert(ch);
            true
        }
        KeyCode::Backspace => view_data.editor.backspace(),
        KeyCode::Delete => view_data.editor.delete(),
        KeyCode::Home => {
            view_data.editor.move_home();
            false
        }
        KeyCode::End => {
            view_data.editor.move_end();
            false
        }
        _ => false,
    };

    if edited {
        let value = cell_value_for(kind, &view_data.editor.text);
        let effects = grid.on_cell_change(row, column_key, value)?;
        handle_effects(grid, runtime, view_data, effects)?;
    }
    Ok(())
}

fn handle_select_edit<R: GridRuntime>(
    grid: &mut GridController,
    runtime: &mut R,
    view_data: &mut ViewData,
    row: usize,
    column_key: &str,
    options: &[SelectOption],
    key: KeyEvent,
) -> Result<()> {
    let current = view_data.editor.text.clone();
    let next = match key.code {
        KeyCode::Char(' ') => next_select_value(options, &current, 1),
        KeyCode::Char(ch) => select_value_for_initial(options, ch),
        KeyCode::Backspace | KeyCode::Delete => Some(String::new()),
        _ => None,
    };

    if let Some(value) = next {
        view_data.editor.set_text(value.clone());
        let effects = grid.on_cell_change(row, column_key, CellValue::Text(value))?;
        handle_effects(grid, runtime, view_data, effects)?;
    }
    Ok(())
}

fn handle_search_key<R: GridRuntime>(
    grid: &mut GridController,
    runtime: &mut R,
    view_data: &mut ViewData,
    key: KeyEvent,
) -> Result<()> {
    match key.code {
        KeyCode::Esc => {
            let picked = view_data.search.picked;
            view_data.search = SearchUiState::default();
            let effects = grid.close_search();
            handle_effects(grid, runtime, view_data, effects)?;
            if picked > 0 {
                view_data.status = Some(format!("search filled {picked} row(s)"));
            }
        }
        KeyCode::Up => {
            view_data.search.cursor = view_data.search.cursor.saturating_sub(1);
        }
        KeyCode::Down => {
            let max = view_data.search.hits.len().saturating_sub(1);
            view_data.search.cursor = (view_data.search.cursor + 1).min(max);
        }
        KeyCode::Enter => {
            let Some(hit) = view_data.search.hits.get(view_data.search.cursor).cloned() else {
                return Ok(());
            };
            let effects = grid.apply_pick(&hit.fields)?;
            handle_effects(grid, runtime, view_data, effects)?;
            view_data.search.picked += 1;
            view_data.status = Some(format!("picked {}", hit.label));
            // the dialog stays open for multi-pick
        }
        KeyCode::Backspace => {
            view_data.search.query.pop();
            requery_search(runtime, view_data)?;
        }
        KeyCode::Char(ch) => {
            view_data.search.query.push(ch);
            requery_search(runtime, view_data)?;
        }
        _ => {}
    }
    Ok(())
}

fn requery_search<R: GridRuntime>(runtime: &mut R, view_data: &mut ViewData) -> Result<()> {
    let mut hits = match runtime.search(&view_data.search.column, &view_data.search.query) {
        Ok(hits) => hits,
        Err(error) => {
            view_data.status = Some(format!("search failed: {error}"));
            return Ok(());
        }
    };
    hits.truncate(MAX_SEARCH_HITS);
    view_data.search.hits = hits;
    view_data.search.cursor = 0;
    Ok(())
}

fn commit_drafts<R: GridRuntime>(
    grid: &mut GridController,
    runtime: &mut R,
    view_data: &mut ViewData,
) -> Result<()> {
    let blank = grid.blank_row().clone();
    let mut saved = 0usize;
    let outcome = grid.commit(&mut |row: &DraftRow| {
        // untouched rows (defaults only) are filtered here, not in the store
        if row.values() != &blank {
            runtime.commit_row(row.values())?;
            saved += 1;
        }
        Ok(())
    });
    // a failing sink returns before the store resets, so the drafts
    // stay on screen for a retry
    let effects = match outcome {
        Ok(effects) => effects,
        Err(error) => {
            view_data.status = Some(format!("save failed: {error}"));
            return Ok(());
        }
    };
    handle_effects(grid, runtime, view_data, effects)?;
    view_data.editor = CellEditor::default();
    view_data.status = Some(format!("saved {saved} row(s)"));
    if let Err(error) = refresh_committed(runtime, view_data) {
        view_data.status = Some(format!("load failed: {error}"));
    }
    Ok(())
}

fn to_key_input(key: KeyEvent) -> Option<KeyInput> {
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    let input = match key.code {
        KeyCode::Tab => KeyInput { key: Key::Tab, shift },
        KeyCode::BackTab => KeyInput::shifted(Key::Tab),
        KeyCode::Left => KeyInput { key: Key::Left, shift },
        KeyCode::Right => KeyInput { key: Key::Right, shift },
        KeyCode::Up => KeyInput { key: Key::Up, shift },
        KeyCode::Down => KeyInput { key: Key::Down, shift },
        KeyCode::Enter => KeyInput { key: Key::Enter, shift },
        KeyCode::Esc => KeyInput { key: Key::Escape, shift },
        _ => return None,
    };
    Some(input)
}

fn cell_value_for(kind: &EditKind, text: &str) -> CellValue {
    match kind {
        EditKind::Date => match parse_date(text) {
            Some(date) => CellValue::Date(date),
            None => CellValue::text(text),
        },
        EditKind::Text | EditKind::Select(_) => CellValue::text(text),
    }
}

fn next_select_value(options: &[SelectOption], current: &str, step: usize) -> Option<String> {
    if options.is_empty() {
        return None;
    }
    let position = options.iter().position(|option| option.value == current);
    let next = match position {
        Some(index) => (index + step) % options.len(),
        None => 0,
    };
    Some(options[next].value.clone())
}

fn select_value_for_initial(options: &[SelectOption], initial: char) -> Option<String> {
    let wanted = initial.to_ascii_lowercase();
    options
        .iter()
        .find(|option| {
            option
                .label
                .chars()
                .next()
                .is_some_and(|ch| ch.to_ascii_lowercase() == wanted)
        })
        .map(|option| option.value.clone())
}

fn today() -> time::Date {
    OffsetDateTime::now_utc().date()
}

fn render(frame: &mut ratatui::Frame<'_>, grid: &GridController, view_data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(frame.area());

    let title = if grid.is_adding() {
        format!("rowpad - add mode ({} draft rows)", grid.row_count())
    } else {
        format!("rowpad - {} committed rows", view_data.committed.len())
    };
    let header = Paragraph::new(title).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, layout[0]);

    if grid.is_adding() {
        render_draft_grid(frame, layout[1], grid, view_data);
    } else {
        render_committed_table(frame, layout[1], grid, view_data);
    }

    let status = Paragraph::new(status_text(grid, view_data))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, layout[2]);

    if view_data.search.visible {
        let area = centered_rect(64, 58, frame.area());
        frame.render_widget(Clear, area);
        let overlay = Paragraph::new(render_search_overlay_text(&view_data.search)).block(
            Block::default()
                .title(format!("search: {}", view_data.search.column))
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::Cyan)),
        );
        frame.render_widget(overlay, area);
    }

    if view_data.help_visible {
        let area = centered_rect(70, 64, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn render_committed_table(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    grid: &GridController,
    view_data: &ViewData,
) {
    let ring = grid.columns().ring_columns().collect::<Vec<_>>();
    let widths = vec![Constraint::Min(8); ring.len() + 1];

    let mut header_cells = vec![Cell::from("#")];
    header_cells.extend(ring.iter().map(|column| {
        Cell::from(column.label.clone()).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    }));

    let rows = view_data.committed.iter().enumerate().map(|(index, row)| {
        let mut cells = vec![Cell::from((index + 1).to_string())];
        cells.extend(ring.iter().map(|column| {
            let text = row
                .get(&column.key)
                .map(CellValue::display)
                .unwrap_or_default();
            Cell::from(text)
        }));
        Row::new(cells)
    });

    let table = Table::new(rows, widths)
        .header(Row::new(header_cells))
        .column_spacing(1)
        .block(Block::default().title("committed").borders(Borders::ALL));
    frame.render_widget(table, area);
}

fn render_draft_grid(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    grid: &GridController,
    view_data: &ViewData,
) {
    let ring = grid.columns().ring_columns().collect::<Vec<_>>();
    let widths = vec![Constraint::Min(8); ring.len() + 1];
    let focus = grid.focus();

    let mut header_cells = vec![Cell::from("#")];
    header_cells.extend(ring.iter().map(|column| {
        Cell::from(column.label.clone()).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    }));

    let committed_count = view_data.committed.len();
    let blank = grid.blank_row();
    let rows = grid.rows().iter().enumerate().map(|(row_index, row)| {
        let gutter = draft_gutter_text(committed_count, row_index, row.values() != blank);
        let mut cells = vec![Cell::from(gutter)];
        cells.extend(ring.iter().enumerate().map(|(ring_index, column)| {
            let focused = focus
                .is_some_and(|f| f.row == row_index && f.ring_index == ring_index);
            let text = if focused {
                view_data.editor.display_with_caret()
            } else {
                row.get(&column.key).map(CellValue::display).unwrap_or_default()
            };
            let style = if focused {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Cell::from(text).style(style)
        }));
        Row::new(cells)
    });

    let table = Table::new(rows, widths)
        .header(Row::new(header_cells))
        .column_spacing(1)
        .block(Block::default().title("draft rows").borders(Borders::ALL));
    frame.render_widget(table, area);
}

/// Sequence numbers continue after the committed rows, with a dirty
/// mark on rows that hold entered data.
fn draft_gutter_text(committed_count: usize, row_index: usize, dirty: bool) -> String {
    let sequence = committed_count + row_index + 1;
    if dirty {
        format!("{sequence}{DIRTY_MARK}")
    } else {
        sequence.to_string()
    }
}

fn render_search_overlay_text(search: &SearchUiState) -> String {
    let mut lines = vec![format!("query: {}", search.query), String::new()];
    if search.hits.is_empty() {
        lines.push("no matches".to_owned());
    }
    for (index, hit) in search.hits.iter().enumerate() {
        let marker = if index == search.cursor { "> " } else { "  " };
        lines.push(format!("{marker}{}", hit.label));
    }
    lines.push(String::new());
    lines.push("Enter picks (dialog stays open) | Esc closes".to_owned());
    lines.join("\n")
}

fn status_text(grid: &GridController, view_data: &ViewData) -> String {
    if let Some(status) = &view_data.status {
        return status.clone();
    }
    if grid.is_adding() {
        "Tab/arrows move | Enter searches | Ctrl+S save | Ctrl+L clear | Ctrl+X cancel".to_owned()
    } else {
        "i add rows | ? help | Ctrl+Q quit".to_owned()
    }
}

fn help_overlay_text() -> String {
    [
        "rowpad keys",
        "",
        "  i          start add mode",
        "  Tab / Shift+Tab   next / previous cell",
        "  Arrows     move between cells (left/right at text edges)",
        "  Enter      search catalog on item columns",
        "  Space      cycle options in a select cell",
        "  Ctrl+D     clear the focused row",
        "  Ctrl+L     clear all draft values",
        "  Ctrl+S     save non-empty rows",
        "  Ctrl+X     cancel add mode",
        "  Ctrl+Q     quit",
    ]
    .join("\n")
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}
