//! Column Table
//! Column-oriented numeric table keyed by header name.

/// A named column of numeric values.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<f64>,
}

/// Mapping from column name to equally long value sequences.
///
/// Columns keep the order in which their names first appeared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnTable {
    columns: Vec<Column>,
}

impl ColumnTable {
    /// Build a table from `(name, values)` pairs.
    ///
    /// A repeated name replaces the earlier values but keeps the earlier position.
    /// Returns `None` when the columns differ in length.
    pub fn from_columns<I, S>(columns: I) -> Option<Self>
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: Into<String>,
    {
        let mut table = Self::default();
        for (name, values) in columns {
            table.insert(name.into(), values);
        }

        let rows = table.row_count();
        table
            .columns
            .iter()
            .all(|c| c.values.len() == rows)
            .then_some(table)
    }

    pub(crate) fn insert(&mut self, name: String, values: Vec<f64>) {
        match self.columns.iter_mut().find(|c| c.name == name) {
            Some(existing) => existing.values = values,
            None => self.columns.push(Column { name, values }),
        }
    }

    /// Column names in table order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows; zero for a table without columns.
    pub fn row_count(&self) -> usize {
        self.columns.first().map(|c| c.values.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_columns_keeps_order() {
        let table =
            ColumnTable::from_columns([("value", vec![1.0, 2.0]), ("time", vec![0.0, 1.0])])
                .unwrap();
        assert_eq!(table.column_names(), vec!["value", "time"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column("time"), Some(&[0.0, 1.0][..]));
        assert_eq!(table.column("missing"), None);
    }

    #[test]
    fn test_duplicate_name_replaces_values_in_place() {
        let table = ColumnTable::from_columns([
            ("a", vec![1.0]),
            ("b", vec![2.0]),
            ("a", vec![3.0]),
        ])
        .unwrap();
        assert_eq!(table.column_names(), vec!["a", "b"]);
        assert_eq!(table.column("a"), Some(&[3.0][..]));
    }

    #[test]
    fn test_ragged_columns_rejected() {
        assert!(ColumnTable::from_columns([("a", vec![1.0]), ("b", vec![])]).is_none());
    }

    #[test]
    fn test_empty_table() {
        let table = ColumnTable::default();
        assert!(table.is_empty());
        assert_eq!(table.column_count(), 0);
    }
}
