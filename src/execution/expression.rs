use crate::common::{Error, Result};
use crate::errinput;
use crate::storage::tuple::Row;
use crate::types::field::Field;
use crate::types::Table;
use serde::{Deserialize, Serialize};

/// An expression evaluated against a row, producing a field value.
/// Operators project and filter through this surface.
///
/// Only leaf shapes exist so far. Join evaluation and child access belong
/// to interior shapes (comparisons, arithmetic) and fail loudly here
/// rather than silently producing a zero value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// References the `col_index`-th column of an input row.
    /// `tuple_index` selects the join side the row comes from (0 = left,
    /// 1 = right); single-source evaluation ignores it.
    Column { tuple_index: u32, col_index: u32 },
    /// A literal value.
    Constant(Field),
}

impl Expression {
    pub fn column(tuple_index: u32, col_index: u32) -> Self {
        Expression::Column {
            tuple_index,
            col_index,
        }
    }

    pub fn constant(value: Field) -> Self {
        Expression::Constant(value)
    }

    /// Evaluates the expression against `row`, using `schema` to validate
    /// column references.
    pub fn evaluate(&self, row: &Row, schema: &Table) -> Result<Field> {
        match self {
            Expression::Column { col_index, .. } => {
                let index = *col_index as usize;
                if index >= schema.col_count() {
                    return errinput!(
                        "column index {index} out of range for schema {}",
                        schema.to_string()
                    );
                }
                let field = row.get_field(index)?;
                let column_type = schema.get_column(index).get_data_type();
                if field != Field::Null && field.get_type() != column_type {
                    return Err(Error::InvalidData(format!(
                        "row value {field} is not a {column_type}, as column {index} of schema {} requires",
                        schema.to_string()
                    )));
                }
                Ok(field)
            }
            Expression::Constant(value) => Ok(value.clone()),
        }
    }

    /// Evaluates the expression against a joined pair of rows. No current
    /// shape supports this.
    pub fn evaluate_join(
        &self,
        _left: &Row,
        _left_schema: &Table,
        _right: &Row,
        _right_schema: &Table,
    ) -> Result<Field> {
        Err(Error::NotImplemented(format!(
            "join evaluation of {self:?}"
        )))
    }

    /// Returns the `child_index`-th subexpression. Leaf shapes have no
    /// children.
    pub fn child_at(&self, child_index: u32) -> Result<&Expression> {
        Err(Error::NotImplemented(format!(
            "child {child_index} of leaf expression {self:?}"
        )))
    }
}
