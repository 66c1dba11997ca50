use crate::clause::FilterClause;
use crate::error::FilterError;
use crate::evaluator::Evaluator;
use crate::filter_set::FilterSet;
use crate::mapping::FieldMapping;
use crate::notification::Notification;
use crate::source::RowSource;
use indexmap::IndexMap;
use log::{debug, warn};
use std::fmt;

/// Identity of one clause row, unique within its [`ClauseList`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ClauseId(pub u32);

impl fmt::Display for ClauseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Editable clause rows in insertion order. Never empty.
#[derive(Clone, Debug)]
pub struct ClauseList {
    clauses: IndexMap<ClauseId, FilterClause>,
    next_id: u32,
}

impl Default for ClauseList {
    fn default() -> Self {
        ClauseList::new()
    }
}

impl ClauseList {
    /// A list holding one default clause.
    pub fn new() -> Self {
        let mut list = ClauseList {
            clauses: IndexMap::new(),
            next_id: 0,
        };
        list.add_clause();
        list
    }

    /// Append a default clause and return its id. Ids are not reused.
    pub fn add_clause(&mut self) -> ClauseId {
        let id = ClauseId(self.next_id);
        self.next_id += 1;
        self.clauses.insert(id, FilterClause::default());
        id
    }

    /// Remove a clause row. The last remaining row cannot be removed.
    pub fn remove_clause(&mut self, id: ClauseId) -> Result<FilterClause, FilterError> {
        if !self.clauses.contains_key(&id) {
            return Err(FilterError::UnknownClause(id));
        }
        if self.clauses.len() == 1 {
            return Err(FilterError::LastClause);
        }
        self.clauses
            .shift_remove(&id)
            .ok_or(FilterError::UnknownClause(id))
    }

    pub fn clause(&self, id: ClauseId) -> Option<&FilterClause> {
        self.clauses.get(&id)
    }

    pub fn clause_mut(&mut self, id: ClauseId) -> Option<&mut FilterClause> {
        self.clauses.get_mut(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClauseId, &FilterClause)> {
        self.clauses.iter().map(|(id, c)| (*id, c))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ClauseId, &mut FilterClause)> {
        self.clauses.iter_mut().map(|(id, c)| (*id, c))
    }

    pub fn ids(&self) -> Vec<ClauseId> {
        self.clauses.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Always false, a clause list holds at least one clause.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Drop every clause but the first and reset it to defaults.
    pub fn reset(&mut self) {
        self.clauses.truncate(1);
        match self.clauses.first_mut() {
            Some((_, first)) => *first = FilterClause::default(),
            None => {
                self.add_clause();
            }
        }
    }

    /// Snapshot of the active clauses, see [`FilterSet::from_clauses`].
    pub fn filter_set(&self) -> Result<FilterSet, FilterError> {
        FilterSet::from_clauses(self.clauses.values())
    }
}

/// Commands issued by whatever UI binds to the clause editor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FilterCommand {
    AddClause,
    RemoveClause(ClauseId),
    ApplyAll,
    ClearAll,
}

/// Clause editor state plus the evaluator that applies it to row sources.
#[derive(Clone, Debug, Default)]
pub struct FilterController {
    clauses: ClauseList,
    evaluator: Evaluator,
}

impl FilterController {
    pub fn new(mapping: FieldMapping) -> Self {
        FilterController {
            clauses: ClauseList::new(),
            evaluator: Evaluator::new(mapping),
        }
    }

    pub fn clauses(&self) -> &ClauseList {
        &self.clauses
    }

    pub fn clauses_mut(&mut self) -> &mut ClauseList {
        &mut self.clauses
    }

    /// Run a command, returning feedback for the user if there is any.
    pub fn dispatch(
        &mut self,
        command: FilterCommand,
        sources: &mut [&mut dyn RowSource],
    ) -> Option<Notification> {
        debug!("filter command: {command:?}");
        match command {
            FilterCommand::AddClause => {
                self.clauses.add_clause();
                None
            }
            FilterCommand::RemoveClause(id) => match self.clauses.remove_clause(id) {
                Ok(_) => None,
                Err(e) => {
                    warn!("{e}");
                    Some(e.into())
                }
            },
            FilterCommand::ApplyAll => Some(match self.apply_all(sources) {
                Ok(count) => Notification::records_found(count),
                Err(e) => e.into(),
            }),
            FilterCommand::ClearAll => Some(Notification::filters_cleared(self.clear_all(sources))),
        }
    }

    /// Build a filter set from the current clauses and apply it to every source.
    ///
    /// Without any active clause nothing is changed and `NoActiveClauses` is returned.
    pub fn apply_all(&mut self, sources: &mut [&mut dyn RowSource]) -> Result<usize, FilterError> {
        let filter_set = self.clauses.filter_set()?;
        Ok(self.evaluator.apply_all(&filter_set, sources))
    }

    /// Re-run the current clauses after row data changed, or clear if none is active.
    pub fn reapply(&mut self, sources: &mut [&mut dyn RowSource]) -> Notification {
        match self.apply_all(sources) {
            Ok(count) => Notification::records_found(count),
            Err(_) => Notification::filters_cleared(self.clear_all(sources)),
        }
    }

    /// Reset the clauses and show every row.
    pub fn clear_all(&mut self, sources: &mut [&mut dyn RowSource]) -> usize {
        self.clauses.reset();
        let shown = Evaluator::show_all(sources);
        debug!("filters cleared, {shown} rows visible");
        shown
    }
}
