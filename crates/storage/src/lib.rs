pub mod db;
pub mod errors;
pub mod in_memory;
pub mod store;
pub mod tables;
