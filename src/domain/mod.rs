// Domain layer - Core clip types and policies

pub mod model;
pub mod rules;
