use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(PartialEq, Eq, Hash, Clone, Debug, Copy, Serialize, Deserialize)]
pub enum DataType {
    Bool,
    Int,
    Float,
    Text,
    Invalid,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Bool => write!(f, "bool"),
            DataType::Int => write!(f, "int"),
            DataType::Float => write!(f, "float"),
            DataType::Text => write!(f, "varchar"),
            DataType::Invalid => write!(f, "invalid"),
        }
    }
}

#[derive(PartialEq, Eq, Hash, Clone, Debug, Serialize, Deserialize)]
pub struct Column {
    /// Column name. Can't be empty.
    name: String,
    /// Column datatype.
    data_type: DataType,
    /// Upper bound on the character count of a Text column; 0 otherwise.
    max_str_len: u16,
}

impl Column {
    pub fn builder() -> ColumnBuilder {
        ColumnBuilder::new()
    }

    pub fn get_data_type(&self) -> DataType {
        self.data_type
    }

    pub fn to_string(&self) -> String {
        let base = format!("{}:{}", self.name, self.data_type);
        if self.data_type == DataType::Text {
            format!("{}({})", base, self.max_str_len)
        } else {
            base
        }
    }
}

pub struct ColumnBuilder {
    name: Option<String>,
    data_type: Option<DataType>,
    max_str_len: Option<u16>,
}

impl ColumnBuilder {
    fn new() -> Self {
        Self {
            name: None,
            data_type: None,
            max_str_len: None,
        }
    }

    pub fn name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    pub fn data_type(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }

    pub fn max_str_len(mut self, max_str_len: u16) -> Self {
        self.max_str_len = Some(max_str_len);
        self
    }

    pub fn build(self) -> Column {
        Column {
            name: self.name.expect("name must be specified before building."),
            data_type: self
                .data_type
                .expect("data_type must be specified before building."),
            max_str_len: self.max_str_len.unwrap_or(0),
        }
    }
}

#[derive(PartialEq, Eq, Hash, Clone, Debug, Serialize, Deserialize)]
pub struct Table {
    /// The name of the table
    name: String,
    /// The column definitions of the table
    columns: Vec<Column>,
}

impl Table {
    pub fn new(table_name: &str) -> Table {
        Table {
            name: table_name.to_string(),
            columns: Vec::new(),
        }
    }

    pub fn add_column(&mut self, column: &Column) {
        self.columns.push(column.clone());
    }

    pub fn with_columns(&mut self, columns: Vec<Column>) {
        for column in columns {
            self.add_column(&column);
        }
    }

    pub fn get_column(&self, index: usize) -> &Column {
        &self.columns[index]
    }

    pub fn col_count(&self) -> usize {
        self.columns.len()
    }

    pub fn to_string(&self) -> String {
        let mut result = format!("{}(", self.name);
        if self.columns.is_empty() {
            return result + ")";
        }

        result.push_str(&self.columns[0].to_string());

        for i in 1..self.columns.len() {
            result.push_str(", ");
            result.push_str(&self.columns[i].to_string());
        }
        result + ")"
    }
}
