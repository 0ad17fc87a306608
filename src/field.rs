pub mod generator;
pub mod motion;
