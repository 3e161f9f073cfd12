pub mod market;
pub mod position;
