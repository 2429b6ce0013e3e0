//! Credential store implementations.

pub mod memory_users;
pub mod users;

pub use memory_users::MemoryUserStore;
pub use users::{NewUser, SeaUserStore, User, UserStore};
