//! Tasks that make up the application as well as the resources they use.
pub mod buttons;
pub mod display;
pub mod led_matrix;
pub mod microphone;
pub mod orchestrate;
pub mod resources;
pub mod siren;
