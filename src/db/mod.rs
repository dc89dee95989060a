//! Database module: connection handle and row insertion.
//!
//! Layout:
//! - `uri.rs`: connection URI built from a credential record
//! - `engine.rs`: the autocommit connection handle and the executor seam
//! - `statement.rs`: INSERT statement text and parameters
//! - `table.rs`: chunked inserts with a selectable insert method

pub mod engine;
pub mod statement;
pub mod table;
pub mod uri;

pub use engine::{Engine, StatementExecutor};
pub use statement::InsertStatement;
pub use table::{InsertMethod, InsertOptions, SqlTable};
pub use uri::connection_uri;
