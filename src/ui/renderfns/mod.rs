pub mod header;
pub mod status;
pub mod utils;

pub use header::draw_header;
pub use status::draw_status;
pub use utils::{border_color, format_timestamp, result_count_label, truncate};
