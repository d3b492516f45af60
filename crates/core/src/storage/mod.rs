pub mod backup;
pub mod encryption;
pub mod manager;
pub mod store;
