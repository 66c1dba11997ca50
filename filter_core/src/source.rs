use crate::{ColumnIdx, RowIdx, RowUid};

/// Positional read access to the text cells of one row.
pub trait RowCells {
    /// `None` if the row has no cell at `column`.
    fn cell(&self, column: ColumnIdx) -> Option<&str>;

    /// Cell text at `column`, or empty text if the row is too short.
    fn cell_or_empty(&self, column: ColumnIdx) -> &str {
        self.cell(column).unwrap_or("")
    }
}

impl<S: AsRef<str>> RowCells for [S] {
    fn cell(&self, column: ColumnIdx) -> Option<&str> {
        self.get(column.0).map(|c| c.as_ref())
    }
}

impl<S: AsRef<str>> RowCells for Vec<S> {
    fn cell(&self, column: ColumnIdx) -> Option<&str> {
        self.as_slice().cell(column)
    }
}

/// A table of already loaded rows whose visibility can be toggled.
///
/// Only the filter evaluator and the clear action change visibility, a row's cells
/// are never modified through this trait.
pub trait RowSource {
    /// Total row count, hidden rows included.
    fn row_count(&self) -> usize;
    /// Map index from `0..row_count()` to the row's unique id.
    fn row_uid(&self, row_idx: RowIdx) -> Option<RowUid>;
    /// Text of the cell, `None` for unknown rows and rows shorter than `column`.
    fn cell_text(&self, row_uid: RowUid, column: ColumnIdx) -> Option<&str>;

    fn is_row_visible(&self, row_uid: RowUid) -> bool;
    fn set_row_visible(&mut self, row_uid: RowUid, visible: bool);

    /// Returns one shot flags, cleared when the frontend takes them.
    fn one_shot_flags(&self) -> &OneShotFlags;
    fn one_shot_flags_mut(&mut self) -> &mut OneShotFlags;

    fn visible_count(&self) -> usize {
        (0..self.row_count())
            .filter_map(|idx| self.row_uid(RowIdx(idx)))
            .filter(|uid| self.is_row_visible(*uid))
            .count()
    }
}

/// Borrowed view of one row of a [`RowSource`].
pub struct SourceRow<'a, S: ?Sized> {
    pub source: &'a S,
    pub row_uid: RowUid,
}

impl<S: RowSource + ?Sized> RowCells for SourceRow<'_, S> {
    fn cell(&self, column: ColumnIdx) -> Option<&str> {
        self.source.cell_text(self.row_uid, column)
    }
}

/// One shot flags: all flags are reset to false after they are taken.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
pub struct OneShotFlags {
    /// Set once after rows were added or removed.
    pub row_set_updated: bool,
    /// Set once when visible row set was changed (after filtering or clearing filters).
    pub visibility_changed: bool,
    /// Set once when clear() is called.
    pub cleared: bool,
}

impl OneShotFlags {
    pub fn take(&mut self) -> OneShotFlags {
        core::mem::take(self)
    }
}

/// In-memory row source. Rows keep the width they were pushed with.
#[derive(Default, Debug)]
pub struct RowSet {
    rows: Vec<Row>,
    next_row_uid: RowUid,
    one_shot_flags: OneShotFlags,
}

#[derive(Debug)]
struct Row {
    uid: RowUid,
    cells: Vec<String>,
    visible: bool,
}

impl RowSet {
    pub fn new() -> Self {
        RowSet::default()
    }

    pub fn push_row<S: Into<String>>(&mut self, cells: impl IntoIterator<Item = S>) -> RowUid {
        let uid = self.next_row_uid;
        self.rows.push(Row {
            uid,
            cells: cells.into_iter().map(Into::into).collect(),
            visible: true,
        });
        self.next_row_uid = RowUid(uid.0 + 1);
        self.one_shot_flags.row_set_updated = true;
        uid
    }

    /// Drop all rows.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.next_row_uid = RowUid(0);
        self.one_shot_flags.row_set_updated = true;
        self.one_shot_flags.cleared = true;
    }

    pub fn cells(&self, row_uid: RowUid) -> Option<&[String]> {
        self.find(row_uid).map(|r| r.cells.as_slice())
    }

    /// Ids of visible rows, in insertion order.
    pub fn visible_rows(&self) -> impl Iterator<Item = RowUid> + '_ {
        self.rows.iter().filter(|r| r.visible).map(|r| r.uid)
    }

    /// Widest row, useful to size the table.
    pub fn max_row_len(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0)
    }

    fn find(&self, row_uid: RowUid) -> Option<&Row> {
        // Uids are handed out in increasing order, so rows stay sorted by uid.
        self.rows
            .binary_search_by_key(&row_uid, |r| r.uid)
            .ok()
            .map(|idx| &self.rows[idx])
    }

    fn find_mut(&mut self, row_uid: RowUid) -> Option<&mut Row> {
        self.rows
            .binary_search_by_key(&row_uid, |r| r.uid)
            .ok()
            .map(|idx| &mut self.rows[idx])
    }
}

impl RowSource for RowSet {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn row_uid(&self, row_idx: RowIdx) -> Option<RowUid> {
        self.rows.get(row_idx.0).map(|r| r.uid)
    }

    fn cell_text(&self, row_uid: RowUid, column: ColumnIdx) -> Option<&str> {
        self.cells(row_uid)?.cell(column)
    }

    fn is_row_visible(&self, row_uid: RowUid) -> bool {
        self.find(row_uid).map(|r| r.visible).unwrap_or(false)
    }

    fn set_row_visible(&mut self, row_uid: RowUid, visible: bool) {
        let Some(row) = self.find_mut(row_uid) else {
            return;
        };
        if row.visible != visible {
            row.visible = visible;
            self.one_shot_flags.visibility_changed = true;
        }
    }

    fn one_shot_flags(&self) -> &OneShotFlags {
        &self.one_shot_flags
    }

    fn one_shot_flags_mut(&mut self) -> &mut OneShotFlags {
        &mut self.one_shot_flags
    }

    fn visible_count(&self) -> usize {
        self.rows.iter().filter(|r| r.visible).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_read() {
        let mut rows = RowSet::new();
        let a = rows.push_row(["", "SN1", "ModelX"]);
        let b = rows.push_row(vec![String::from("x")]);
        assert_eq!(rows.row_count(), 2);
        assert_eq!(rows.row_uid(RowIdx(1)), Some(b));
        assert_eq!(rows.row_uid(RowIdx(2)), None);
        assert_eq!(rows.cell_text(a, ColumnIdx(1)), Some("SN1"));
        assert_eq!(rows.cell_text(b, ColumnIdx(1)), None);
        assert_eq!(rows.cell_text(RowUid(42), ColumnIdx(0)), None);
        assert_eq!(rows.max_row_len(), 3);
        assert!(rows.one_shot_flags().row_set_updated);
    }

    #[test]
    fn short_rows_read_as_empty() {
        let mut rows = RowSet::new();
        let a = rows.push_row(["", "SN123", "ModelX"]);
        let row = SourceRow {
            source: &rows,
            row_uid: a,
        };
        assert_eq!(row.cell_or_empty(ColumnIdx(1)), "SN123");
        assert_eq!(row.cell_or_empty(ColumnIdx(7)), "");
        let missing = SourceRow {
            source: &rows,
            row_uid: RowUid(9),
        };
        assert_eq!(missing.cell_or_empty(ColumnIdx(0)), "");
        let empty: [String; 0] = [];
        assert_eq!(empty[..].cell_or_empty(ColumnIdx(0)), "");
    }

    #[test]
    fn visibility_flags() {
        let mut rows = RowSet::new();
        let a = rows.push_row(["a"]);
        let b = rows.push_row(["b"]);
        rows.one_shot_flags_mut().take();

        rows.set_row_visible(a, true);
        assert!(!rows.one_shot_flags().visibility_changed);

        rows.set_row_visible(a, false);
        assert!(!rows.is_row_visible(a));
        assert!(rows.is_row_visible(b));
        assert_eq!(rows.visible_count(), 1);
        assert_eq!(rows.visible_rows().collect::<Vec<_>>(), [b]);
        assert!(rows.one_shot_flags_mut().take().visibility_changed);
        assert!(!rows.one_shot_flags().visibility_changed);
    }

    #[test]
    fn clear_restarts_uids() {
        let mut rows = RowSet::new();
        rows.push_row(["a"]);
        rows.clear();
        assert_eq!(rows.row_count(), 0);
        assert!(rows.one_shot_flags().cleared);
        assert_eq!(rows.push_row(["b"]), RowUid(0));
    }
}
