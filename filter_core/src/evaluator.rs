use crate::clause::fold_case;
use crate::filter_set::{FilterSet, PreparedClause};
use crate::mapping::FieldMapping;
use crate::source::{RowCells, RowSource, SourceRow};
use crate::RowIdx;
use log::{debug, trace};

/// Decides row visibility for a [`FilterSet`].
///
/// Cost of a pass is O(rows × active clauses).
#[derive(Copy, Clone, Debug, Default)]
pub struct Evaluator {
    mapping: FieldMapping,
}

impl Evaluator {
    pub fn new(mapping: FieldMapping) -> Self {
        Evaluator { mapping }
    }

    /// True when the row satisfies every clause. Stops at the first failing clause.
    pub fn matches<R: RowCells + ?Sized>(&self, row: &R, filter_set: &FilterSet) -> bool {
        filter_set
            .iter()
            .all(|clause| self.matches_clause(row, clause))
    }

    pub fn matches_clause<R: RowCells + ?Sized>(&self, row: &R, clause: &PreparedClause) -> bool {
        let column = self.mapping.column(clause.field);
        let cell = fold_case(row.cell_or_empty(column));
        clause.operator.apply(&cell, &clause.needle)
    }

    /// Set every row's visibility to its match result, returns the visible row count.
    pub fn apply(&self, filter_set: &FilterSet, source: &mut dyn RowSource) -> usize {
        let mut visible_count = 0;
        for idx in 0..source.row_count() {
            let Some(row_uid) = source.row_uid(RowIdx(idx)) else {
                continue;
            };
            let is_match = self.matches(
                &SourceRow {
                    source: &*source,
                    row_uid,
                },
                filter_set,
            );
            trace!("row {row_uid:?}: {is_match}");
            source.set_row_visible(row_uid, is_match);
            if is_match {
                visible_count += 1;
            }
        }
        visible_count
    }

    /// Apply one filter set to several tables, returns the visible row count over all of them.
    pub fn apply_all(&self, filter_set: &FilterSet, sources: &mut [&mut dyn RowSource]) -> usize {
        debug!("applying filters: {filter_set}");
        let mut visible_count = 0;
        let mut row_count = 0;
        for source in sources.iter_mut() {
            row_count += source.row_count();
            visible_count += self.apply(filter_set, &mut **source);
        }
        debug!("{visible_count} of {row_count} rows visible");
        visible_count
    }

    /// Make every row visible without evaluating anything, returns the row count.
    pub fn show_all(sources: &mut [&mut dyn RowSource]) -> usize {
        let mut shown = 0;
        for source in sources.iter_mut() {
            for idx in 0..source.row_count() {
                if let Some(row_uid) = source.row_uid(RowIdx(idx)) {
                    source.set_row_visible(row_uid, true);
                    shown += 1;
                }
            }
        }
        shown
    }
}
