mod auth_port;
mod row_store_port;
mod session_storage_port;

pub use auth_port::{AuthPort, SignUpOutcome};
pub use row_store_port::{Row, RowStorePort, decode, decode_all};
pub use session_storage_port::SessionStoragePort;
