pub mod bank;
pub mod manifest;
