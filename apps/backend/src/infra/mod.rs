//! Infrastructure layer - database, state assembly, and DB error mapping.

pub mod db;
pub mod db_errors;
pub mod state;
