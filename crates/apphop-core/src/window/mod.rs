pub mod parsing;
pub mod types;

pub use parsing::{format_helper_line, parse_helper_list, parse_tasklist_csv};
pub use types::{TaskListing, WindowDescriptor, WindowHandle};
