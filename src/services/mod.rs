pub mod bug_registry;
pub use bug_registry::{BugError, BugRegistry};

pub mod bug_registry_impl;
pub use bug_registry_impl::SeaOrmBugRegistry;

pub mod credential_store;
pub use credential_store::{CredentialError, CredentialStore};

pub mod credential_store_impl;
pub use credential_store_impl::SeaOrmCredentialStore;

pub mod export;
pub use export::export_csv;

pub mod session;
pub use session::{SessionAuthority, SessionError, SessionToken};
