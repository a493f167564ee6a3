pub mod frame;
pub mod png_codec;

pub use frame::FrameBuffer;
pub use png_codec::{decode_png, encode_png};
