pub mod file_key_value_store;
pub mod memory_key_value_store;
