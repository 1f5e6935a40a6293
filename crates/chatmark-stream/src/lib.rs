mod controller;
mod patch;
mod skeleton;
mod target;

pub use controller::{
    ControllerState, FrameOutcome, PollOutcome, PollToken, STREAMING_CLASS, StreamController,
    StreamFrame,
};
pub use patch::{PatchStats, patch_children};
pub use skeleton::{skeleton_block, skeleton_block_with};
pub use target::{PatchMode, RenderTarget};
