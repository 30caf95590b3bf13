// Application layer - services orchestrating the domain over the store port
pub mod dto;
pub mod errors;
pub mod services;
