pub mod roster;
pub mod student;
