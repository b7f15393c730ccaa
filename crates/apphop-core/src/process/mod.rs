pub mod inventory;
pub mod operations;
pub mod types;

pub use operations::{find_process_ids, parse_process_id_lines};
pub use types::{ProcessId, ProcessIdSet};
