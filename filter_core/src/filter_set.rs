use crate::clause::{Field, FilterClause, Operator};
use crate::error::FilterError;
use itertools::Itertools;
use std::fmt;

/// Active clauses captured at the moment filters are applied, in editor order.
///
/// Rows match a filter set when they match every clause in it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterSet {
    clauses: Vec<PreparedClause>,
}

/// Clause with its comparison value normalized once per apply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedClause {
    pub field: Field,
    pub operator: Operator,
    pub needle: String,
}

impl FilterSet {
    /// Collect the active clauses. Blank clauses are skipped, and a set without any
    /// active clause is rejected rather than matching everything.
    pub fn from_clauses<'a>(
        clauses: impl IntoIterator<Item = &'a FilterClause>,
    ) -> Result<Self, FilterError> {
        let clauses: Vec<PreparedClause> = clauses
            .into_iter()
            .filter(|c| c.is_active())
            .map(|c| PreparedClause {
                field: c.field,
                operator: c.operator,
                needle: c.normalized_value(),
            })
            .collect();
        if clauses.is_empty() {
            return Err(FilterError::NoActiveClauses);
        }
        Ok(FilterSet { clauses })
    }

    pub fn iter(&self) -> impl Iterator<Item = &PreparedClause> {
        self.clauses.iter()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Always false for a successfully built set.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

impl fmt::Display for PreparedClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {:?}", self.field, self.operator, self.needle)
    }
}

impl fmt::Display for FilterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.clauses.iter().join(" AND "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_active_clauses_in_order() {
        let clauses = [
            FilterClause::new(Field::Model, Operator::StartsWith, "Model"),
            FilterClause::new(Field::Dealer, Operator::Contains, "   "),
            FilterClause::new(Field::Status, Operator::Equals, " Active "),
        ];
        let set = FilterSet::from_clauses(&clauses).unwrap();
        assert_eq!(set.len(), 2);
        let fields: Vec<Field> = set.iter().map(|c| c.field).collect();
        assert_eq!(fields, [Field::Model, Field::Status]);
        assert_eq!(set.iter().nth(1).unwrap().needle, "active");
    }

    #[test]
    fn no_active_clauses_is_rejected() {
        let clauses = [
            FilterClause::default(),
            FilterClause::new(Field::Date, Operator::EndsWith, " "),
        ];
        assert_eq!(
            FilterSet::from_clauses(&clauses),
            Err(FilterError::NoActiveClauses)
        );
        assert_eq!(
            FilterSet::from_clauses(std::iter::empty()),
            Err(FilterError::NoActiveClauses)
        );
    }

    #[test]
    fn display_joins_with_and() {
        let clauses = [
            FilterClause::new(Field::Status, Operator::Equals, "Active"),
            FilterClause::new(Field::Dealer, Operator::Contains, "acme"),
        ];
        let set = FilterSet::from_clauses(&clauses).unwrap();
        assert_eq!(
            set.to_string(),
            "status equals \"active\" AND dealer contains \"acme\""
        );
    }
}
