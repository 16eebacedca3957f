//! Key bindings shared by the apps
//!
//! Single-press keys map to [`InputAction`]s; arrows and the mouse are
//! handled by `spacerocks_input`.

mod input_mapper;

pub use input_mapper::{InputAction, InputMapper};
