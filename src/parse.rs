//! Request option parsing: option strings, scalar values, and colors.

pub mod color;
pub mod options;
pub mod value;
