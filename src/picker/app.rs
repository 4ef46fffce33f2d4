//! Picker state and input handling.

use indexmap::IndexMap;

use crate::compile::DocEntry;
use crate::filter::filter_candidates;

/// Group assigned to scripts that declare none.
pub const DEFAULT_GROUP: &str = "other";

/// One selectable script in the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerEntry {
    /// Script name, the value returned on selection.
    pub name: String,
    /// Optional one-line description.
    pub description: Option<String>,
    /// Group the entry is listed under.
    pub group: String,
    /// The `"name - description"` string the filter runs against.
    pub display: String,
}

impl PickerEntry {
    fn new(name: &str, docs: Option<&DocEntry>) -> Self {
        let description = docs.and_then(|d| d.description.clone());
        let group = docs
            .and_then(|d| d.group.clone())
            .unwrap_or_else(|| DEFAULT_GROUP.to_string());
        let display = match &description {
            Some(desc) => format!("{name} - {desc}"),
            None => name.to_string(),
        };

        Self {
            name: name.to_string(),
            description,
            group,
            display,
        }
    }
}

/// Build picker entries from the scripts and docs tables.
///
/// Every compiled script appears, described and grouped when the docs table
/// knows it; entries are ordered by group, then by name, so the grouped
/// listing is stable.
pub fn build_entries(
    scripts: &IndexMap<String, String>,
    docs: &IndexMap<String, DocEntry>,
) -> Vec<PickerEntry> {
    let mut entries: Vec<PickerEntry> = scripts
        .keys()
        .map(|name| PickerEntry::new(name, docs.get(name)))
        .collect();

    entries.sort_by(|a, b| a.group.cmp(&b.group).then(a.name.cmp(&b.name)));
    entries
}

/// One row of the rendered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    /// Non-selectable group header.
    Header(String),
    /// Index into the entries vector.
    Entry(usize),
}

/// Picker state: entries, the live query, and the cursor.
pub struct PickerApp {
    entries: Vec<PickerEntry>,
    query: String,
    rows: Vec<Row>,
    cursor: usize,
}

impl PickerApp {
    /// Create the app over a set of entries.
    pub fn new(entries: Vec<PickerEntry>) -> Self {
        let mut app = Self {
            entries,
            query: String::new(),
            rows: Vec::new(),
            cursor: 0,
        };
        app.refilter();
        app
    }

    /// The live query string.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The rows to render, headers included.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// The entry behind a row.
    pub fn entry(&self, index: usize) -> &PickerEntry {
        &self.entries[index]
    }

    /// The row the cursor is on.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The currently selected entry, if any row is selectable.
    pub fn selected(&self) -> Option<&PickerEntry> {
        match self.rows.get(self.cursor) {
            Some(Row::Entry(index)) => Some(&self.entries[*index]),
            _ => None,
        }
    }

    /// Append a character to the query.
    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
        self.refilter();
    }

    /// Delete the last query character.
    pub fn pop_char(&mut self) {
        self.query.pop();
        self.refilter();
    }

    /// Move the cursor to the previous selectable row.
    pub fn move_up(&mut self) {
        let mut i = self.cursor;
        while i > 0 {
            i -= 1;
            if matches!(self.rows[i], Row::Entry(_)) {
                self.cursor = i;
                return;
            }
        }
    }

    /// Move the cursor to the next selectable row.
    pub fn move_down(&mut self) {
        let mut i = self.cursor;
        while i + 1 < self.rows.len() {
            i += 1;
            if matches!(self.rows[i], Row::Entry(_)) {
                self.cursor = i;
                return;
            }
        }
    }

    /// Rebuild the rows for the current query.
    ///
    /// An empty query shows the grouped listing with headers; a non-empty
    /// query shows a flat list ranked by match score.
    fn refilter(&mut self) {
        self.rows.clear();

        if self.query.is_empty() {
            let mut current_group: Option<&str> = None;
            for (index, entry) in self.entries.iter().enumerate() {
                if current_group != Some(entry.group.as_str()) {
                    current_group = Some(entry.group.as_str());
                    self.rows.push(Row::Header(entry.group.clone()));
                }
                self.rows.push(Row::Entry(index));
            }
        } else {
            let candidates: Vec<String> =
                self.entries.iter().map(|e| e.display.clone()).collect();
            for (index, _score) in filter_candidates(&self.query, &candidates) {
                self.rows.push(Row::Entry(index));
            }
        }

        self.cursor = self
            .rows
            .iter()
            .position(|row| matches!(row, Row::Entry(_)))
            .unwrap_or(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(description: &str, group: &str) -> DocEntry {
        DocEntry {
            long_name: None,
            description: Some(description.to_string()),
            group: Some(group.to_string()),
        }
    }

    fn sample_app() -> PickerApp {
        let mut scripts = IndexMap::new();
        scripts.insert("dev".to_string(), "vite".to_string());
        scripts.insert("build".to_string(), "vite build".to_string());
        scripts.insert("deploy".to_string(), "ship".to_string());

        let mut table = IndexMap::new();
        table.insert("dev".to_string(), docs("Start dev server", "serve"));
        table.insert("build".to_string(), docs("Production build", "build"));

        PickerApp::new(build_entries(&scripts, &table))
    }

    #[test]
    fn test_entries_grouped_and_sorted() {
        let app = sample_app();
        let groups: Vec<_> = app
            .rows()
            .iter()
            .filter_map(|row| match row {
                Row::Header(group) => Some(group.clone()),
                _ => None,
            })
            .collect();

        // "deploy" has no docs entry and lands in the default group.
        assert_eq!(groups, vec!["build", "other", "serve"]);
    }

    #[test]
    fn test_cursor_starts_on_first_entry() {
        let app = sample_app();
        assert_eq!(app.selected().unwrap().name, "build");
    }

    #[test]
    fn test_navigation_skips_headers() {
        let mut app = sample_app();
        app.move_down();
        assert_eq!(app.selected().unwrap().name, "deploy");
        app.move_down();
        assert_eq!(app.selected().unwrap().name, "dev");
        app.move_up();
        assert_eq!(app.selected().unwrap().name, "deploy");
    }

    #[test]
    fn test_filtering_flattens_and_ranks() {
        let mut app = sample_app();
        app.push_char('d');
        app.push_char('e');
        app.push_char('v');

        assert!(app.rows().iter().all(|row| matches!(row, Row::Entry(_))));
        assert_eq!(app.selected().unwrap().name, "dev");
    }

    #[test]
    fn test_filter_matches_description_text() {
        let mut app = sample_app();
        for c in "Production".chars() {
            app.push_char(c);
        }
        assert_eq!(app.selected().unwrap().name, "build");
    }

    #[test]
    fn test_backspace_restores_grouped_view() {
        let mut app = sample_app();
        app.push_char('x');
        app.push_char('q');
        assert!(app.selected().is_none());

        app.pop_char();
        app.pop_char();
        assert!(app.rows().iter().any(|row| matches!(row, Row::Header(_))));
        assert!(app.selected().is_some());
    }

    #[test]
    fn test_no_match_yields_no_selection() {
        let mut app = sample_app();
        app.push_char('z');
        app.push_char('z');
        app.push_char('z');
        assert!(app.rows().is_empty());
        assert!(app.selected().is_none());
    }
}
