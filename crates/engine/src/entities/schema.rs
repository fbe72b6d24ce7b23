//! Column probing.
//!
//! The store's schema is not documented anywhere this system can read, so
//! columns are discovered by fetching one row of a table.

use std::sync::Arc;

use crate::infrastructure::ports::{RepoError, TableQuery, TableStore};

/// Columns observed on a table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableColumns {
    pub table: String,
    /// Column names, sorted. Empty when the table has no rows visible to
    /// the current credential.
    pub columns: Vec<String>,
}

impl TableColumns {
    pub fn is_unknown(&self) -> bool {
        self.columns.is_empty()
    }
}

pub struct Schema {
    store: Arc<dyn TableStore>,
}

impl Schema {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    pub async fn columns_of(&self, table: &str) -> Result<TableColumns, RepoError> {
        let rows = self.store.select(&TableQuery::on(table).limit(1)).await?;
        let columns = match rows.first() {
            Some(serde_json::Value::Object(row)) => row.keys().cloned().collect(),
            Some(other) => {
                return Err(RepoError::serialization(format!(
                    "expected an object row from {table}, got {other}"
                )))
            }
            None => Vec::new(),
        };

        Ok(TableColumns {
            table: table.to_string(),
            columns,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockTableStore;
    use serde_json::json;

    #[tokio::test]
    async fn columns_of_lists_keys_of_first_row() {
        let mut store = MockTableStore::new();
        store
            .expect_select()
            .withf(|q| q.table == "items" && q.limit == Some(1) && q.columns.is_empty())
            .returning(|_| Ok(vec![json!({"id": 1, "name": "Rope", "base_price": 2})]));

        let columns = Schema::new(Arc::new(store)).columns_of("items").await.unwrap();
        let mut names = columns.columns.clone();
        names.sort();
        assert_eq!(names, vec!["base_price", "id", "name"]);
    }

    #[tokio::test]
    async fn empty_table_has_unknown_columns() {
        let mut store = MockTableStore::new();
        store.expect_select().returning(|_| Ok(vec![]));

        let columns = Schema::new(Arc::new(store)).columns_of("party_members").await.unwrap();
        assert!(columns.is_unknown());
    }
}
