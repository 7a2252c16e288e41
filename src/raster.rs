pub mod blur;
pub mod codec;
pub mod pixels;
