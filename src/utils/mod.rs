pub mod error;
pub mod logger;
pub mod normalize;
pub mod validation;
