// Domain layer - core models and the ports implemented by infrastructure
pub mod errors;
pub mod models;
pub mod repositories;
