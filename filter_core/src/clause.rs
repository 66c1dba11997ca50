use serde::{Deserialize, Serialize};
use std::fmt;

/// Which column of a row supplies the comparison value.
#[derive(
    strum::EnumIter,
    strum::Display,
    strum::IntoStaticStr,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Copy,
    Clone,
    Default,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Field {
    #[default]
    Status,
    Dealer,
    Model,
    Serial,
    Date,
}

impl Field {
    /// Text shown in the field selector.
    pub fn label(&self) -> &'static str {
        match self {
            Field::Status => "Status",
            Field::Dealer => "Dealer",
            Field::Model => "Model",
            Field::Serial => "Serial number",
            Field::Date => "Created",
        }
    }
}

#[derive(
    strum::EnumIter,
    strum::Display,
    strum::IntoStaticStr,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Copy,
    Clone,
    Default,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    #[default]
    Equals,
    Contains,
    StartsWith,
    EndsWith,
}

impl Operator {
    pub fn label(&self) -> &'static str {
        match self {
            Operator::Equals => "equals",
            Operator::Contains => "contains",
            Operator::StartsWith => "starts with",
            Operator::EndsWith => "ends with",
        }
    }

    /// Compare already case-folded cell text against an already normalized needle.
    pub fn apply(&self, cell: &str, needle: &str) -> bool {
        match self {
            Operator::Equals => cell == needle,
            Operator::Contains => cell.contains(needle),
            Operator::StartsWith => cell.starts_with(needle),
            Operator::EndsWith => cell.ends_with(needle),
        }
    }
}

/// One user specified criterion: `field operator value`.
///
/// A clause with a blank value is inactive and imposes no constraint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterClause {
    pub field: Field,
    pub operator: Operator,
    pub value: String,
}

impl FilterClause {
    pub fn new(field: Field, operator: Operator, value: impl Into<String>) -> Self {
        FilterClause {
            field,
            operator,
            value: value.into(),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.value.trim().is_empty()
    }

    /// Trimmed and lowercased value, folded the same way as cell text.
    pub fn normalized_value(&self) -> String {
        fold_case(self.value.trim())
    }
}

impl fmt::Display for FilterClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {:?}", self.field, self.operator, self.value.trim())
    }
}

/// Case folding shared by clause values and extracted cell text.
///
/// Folds char by char through upper then lower case, so the result does not depend on
/// a char's position in the word (final `ς` and `Σ` both fold to `σ`).
pub fn fold_case(text: &str) -> String {
    text.chars()
        .flat_map(char::to_uppercase)
        .flat_map(char::to_lowercase)
        .collect()
}
