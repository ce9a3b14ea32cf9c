// Domain layer - Core trim types, error taxonomy and range rules

pub mod errors;
pub mod model;
pub mod rules;
