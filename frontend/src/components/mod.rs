pub mod header;
pub mod mode_selector;
pub mod preview_area;
pub mod results;
pub mod upload_section;
pub mod utils;
