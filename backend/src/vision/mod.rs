pub mod formatter;
pub mod models;
pub mod vision_client;
