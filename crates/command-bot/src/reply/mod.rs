//! Reply pipeline: normalize content, pick a target, add addressing.

mod assemble;
mod content;
mod target;

pub use assemble::{assemble, reply_metadata};
pub use content::{float_text, normalize, ReplyInput};
pub use target::{resolve_target, TargetDecision};
