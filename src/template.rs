//! Layered template rendering: JSON node trees drawn onto a square canvas.

pub mod compositor;
pub mod node;
pub mod source;
pub mod substitute;
