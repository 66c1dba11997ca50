use serde::{Deserialize, Serialize};

pub mod clause;
pub mod editor;
pub mod error;
pub mod evaluator;
pub mod filter_set;
pub mod mapping;
pub mod notification;
pub mod source;

pub use clause::{Field, FilterClause, Operator};
pub use editor::{ClauseId, ClauseList, FilterCommand, FilterController};
pub use error::FilterError;
pub use evaluator::Evaluator;
pub use filter_set::FilterSet;
pub use mapping::FieldMapping;
pub use notification::{Notification, Severity};
pub use source::{RowSet, RowSource};

/// Positional index of a column inside a row.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct ColumnIdx(pub usize);

/// Identifies a row inside one row source.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct RowUid(pub u32);

/// Index in `0..row_count()` of a row source.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct RowIdx(pub usize);
