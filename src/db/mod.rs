pub mod contacts;
pub mod init;
pub mod migrations;
pub mod settings;

pub use contacts::ContactStore;
pub use init::{get_db_stats, init_db, init_memory_db, DbStats};
pub use settings::OperatorProfile;
