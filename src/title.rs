pub mod reveal;
pub mod sequencer;
