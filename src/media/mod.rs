pub mod frame;
pub mod image_seq;
pub mod scripted;
pub mod source;
