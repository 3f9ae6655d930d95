pub mod distance;
pub mod helper;
pub mod predicates;
pub mod types;
