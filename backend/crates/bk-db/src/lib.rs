pub mod account_field;
pub mod connection;
pub mod error;
pub mod identity_store;
pub mod repositories;

pub use account_field::AccountField;
pub use connection::database::{connect, connect_in_memory, run_migrations};
pub use error::{DbError, Result};
pub use identity_store::{FindOrInsert, IdentityStore, SqliteIdentityStore};
pub use repositories::account_repository::AccountRepository;
pub use repositories::provider_link_repository::ProviderLinkRepository;
