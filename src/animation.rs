pub mod ease;
pub mod spring;
pub mod tween;
