use crate::clause::Field;
use crate::ColumnIdx;
use serde::{Deserialize, Serialize};

/// Binds every [`Field`] to a column position of the request table.
///
/// The table source must lay its columns out accordingly, for all rows.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    pub status: ColumnIdx,
    pub dealer: ColumnIdx,
    pub model: ColumnIdx,
    pub serial: ColumnIdx,
    pub date: ColumnIdx,
}

impl Default for FieldMapping {
    /// Layout of the request list: `[_, serial, model, _, dealer, status, _, date]`.
    fn default() -> Self {
        FieldMapping {
            status: ColumnIdx(5),
            dealer: ColumnIdx(4),
            model: ColumnIdx(2),
            serial: ColumnIdx(1),
            date: ColumnIdx(7),
        }
    }
}

impl FieldMapping {
    pub fn column(&self, field: Field) -> ColumnIdx {
        match field {
            Field::Status => self.status,
            Field::Dealer => self.dealer,
            Field::Model => self.model,
            Field::Serial => self.serial,
            Field::Date => self.date,
        }
    }

    pub fn with_column(mut self, field: Field, column: ColumnIdx) -> Self {
        let slot = match field {
            Field::Status => &mut self.status,
            Field::Dealer => &mut self.dealer,
            Field::Model => &mut self.model,
            Field::Serial => &mut self.serial,
            Field::Date => &mut self.date,
        };
        *slot = column;
        self
    }
}
