mod lookup;
mod models;
mod schema;
mod store;
mod trait_def;

pub use lookup::{lookup_song, SongQuery};
pub use models::*;
pub use schema::WAREHOUSE_VERSIONED_SCHEMAS;
pub use store::{SqliteWarehouse, TableCounts, WarehouseTransaction};
pub use trait_def::WarehouseWriter;
