//! Entity modules - one per world-store table.
//!
//! Each module wraps the queries issued against one table and decodes rows
//! into domain records. Every method is exactly one store request.

pub mod history;
pub mod item;
pub mod location;
pub mod nation;
pub mod npc;
pub mod party;
pub mod scenario;
pub mod schema;

pub use history::History;
pub use item::Item;
pub use location::Location;
pub use nation::Nation;
pub use npc::{Npc, NpcImageUpdate};
pub use party::Party;
pub use scenario::Scenario;
pub use schema::{Schema, TableColumns};

use serde_json::Value;
use wayfarer_domain::{decode_row, decode_rows, StoreRecord};

use crate::infrastructure::ports::{RepoError, TableQuery, TableStore};

/// Run a read and decode every row.
pub(crate) async fn fetch_all<T: StoreRecord>(
    store: &dyn TableStore,
    query: &TableQuery,
) -> Result<Vec<T>, RepoError> {
    let rows = store.select(query).await?;
    Ok(decode_rows(rows)?)
}

/// Run a single-row read and decode it.
pub(crate) async fn fetch_one<T: StoreRecord>(
    store: &dyn TableStore,
    query: &TableQuery,
) -> Result<T, RepoError> {
    let rows = store.select(query).await?;
    let row = exactly_one(&query.table, rows)?;
    Ok(decode_row(row)?)
}

fn exactly_one(table: &str, rows: Vec<Value>) -> Result<Value, RepoError> {
    let count = rows.len();
    let mut rows = rows.into_iter();
    match (rows.next(), count) {
        (Some(row), 1) => Ok(row),
        _ => Err(RepoError::serialization(format!(
            "expected exactly one {table} row, store returned {count}"
        ))),
    }
}
