/// Database Module
///
/// This module provides the persistence surface of dbkeep, organized into
/// focused submodules:
///
/// - **Connection Management** (`connection.rs`): Database file creation and
///   the process-wide connection lifecycle
/// - **Schema Operations** (`schema.rs`): Table creation, identifier
///   validation, and `sqlite_master` introspection
/// - **Record Operations** (`record.rs`): Ordered column/value records and
///   parameterized row mutations
/// - **Query Execution** (`query.rs`): Generic statement execution and fetch
///   operations
///
/// ## Error Handling
///
/// All database operations use the standardized `DbKeepError` type for
/// consistent error propagation; failures are logged at the call site and
/// returned, never raised past the module boundary.
pub mod connection;
pub mod query;
pub mod record;
pub mod schema;

pub use connection::*;
pub use query::*;
pub use record::*;
pub use schema::*;
