use chatmark_core::{Pipeline, RenderError};
use tracing::debug;

use crate::patch::PatchStats;
use crate::skeleton;
use crate::target::{PatchMode, RenderTarget};

/// Class the controller keeps on the target while a stream is live.
pub const STREAMING_CLASS: &str = "Chatmark-streaming";

/// Placeholder text some hosts emit before the first real token arrives.
const ELLIPSIS: &str = "...";

/// Poll budget for the streaming renderer to appear. Past this the stream
/// falls back to default rendering, silently.
const MAX_POLLS: u32 = 50;

/// One partial update from the external streaming source.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StreamFrame {
    pub message_id: u64,
    pub text: String,
    pub is_final: bool,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ControllerState {
    Idle,
    AwaitingProcessor,
    Active { last_stabilized: String },
}

/// Liveness token for one generation's polling loop. A fresh start event
/// invalidates tokens handed out earlier; stale polls self-cancel.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PollToken {
    generation: u64,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PollOutcome {
    /// The token belongs to a superseded generation.
    Cancelled,
    /// Still waiting; poll again on the next tick.
    Waiting,
    /// The streaming renderer appeared; the controller is now active.
    Ready,
    /// Poll budget exhausted; this stream renders without the enhancement.
    Abandoned,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FrameOutcome {
    Rendered(PatchStats),
    /// The stabilized text did not change; no re-render happened.
    Skipped,
}

/// Per-stream state machine wrapping the host's streaming hooks.
///
/// While active it stabilizes each partial frame (dropping the still-growing
/// last line), skips renders that would not change anything visible,
/// optionally appends a skeleton block, and routes the converted HTML through
/// the target's patch step instead of full replacement. Frames are handled
/// strictly in arrival order; the host calls from a single event loop.
pub struct StreamController {
    pipeline: Pipeline,
    state: ControllerState,
    generation: u64,
    polls_remaining: u32,
}

impl StreamController {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline,
            state: ControllerState::Idle,
            generation: 0,
            polls_remaining: 0,
        }
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn pipeline_mut(&mut self) -> &mut Pipeline {
        &mut self.pipeline
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// A generation started: begin waiting for the host's streaming renderer
    /// to come up. Supersedes any poll loop still running.
    pub fn generation_started(&mut self) -> PollToken {
        self.generation += 1;
        self.state = ControllerState::AwaitingProcessor;
        self.polls_remaining = MAX_POLLS;
        PollToken {
            generation: self.generation,
        }
    }

    /// One cooperative poll step. The host calls this on each tick with
    /// whether its streaming renderer exists yet.
    pub fn poll_processor(&mut self, token: PollToken, available: bool) -> PollOutcome {
        if token.generation != self.generation
            || !matches!(self.state, ControllerState::AwaitingProcessor)
        {
            return PollOutcome::Cancelled;
        }
        if available {
            debug!("streaming renderer found");
            self.state = ControllerState::Active {
                last_stabilized: String::new(),
            };
            return PollOutcome::Ready;
        }
        if self.polls_remaining == 0 {
            debug!("streaming renderer never appeared, falling back to default rendering");
            self.state = ControllerState::Idle;
            return PollOutcome::Abandoned;
        }
        self.polls_remaining -= 1;
        PollOutcome::Waiting
    }

    /// Wrapper for the host's start hook: the initial text is rendered right
    /// away as a first non-final frame.
    pub fn start_streaming(
        &mut self,
        message_id: u64,
        text: &str,
        target: &mut RenderTarget,
    ) -> Result<FrameOutcome, RenderError> {
        self.on_frame(
            StreamFrame {
                message_id,
                text: text.to_string(),
                is_final: false,
            },
            target,
        )
    }

    /// Wrapper for the host's progress hook. See the type-level docs.
    pub fn on_frame(
        &mut self,
        frame: StreamFrame,
        target: &mut RenderTarget,
    ) -> Result<FrameOutcome, RenderError> {
        target.set_mode(if self.pipeline.settings().patch_children {
            PatchMode::ChildrenOnly
        } else {
            PatchMode::Replace
        });

        let fade = self.pipeline.settings().fade_paragraphs;
        let use_skeleton = self.pipeline.settings().fade_placeholder;

        let ControllerState::Active { last_stabilized } = &mut self.state else {
            // Not wrapping this stream; plain full-pipeline render.
            let html = self.pipeline.render(&frame.text)?;
            return Ok(FrameOutcome::Rendered(target.set_html(&html)));
        };

        if !fade {
            let html = self.pipeline.render(&frame.text)?;
            return Ok(FrameOutcome::Rendered(target.set_html(&html)));
        }

        if frame.is_final {
            debug!(message_id = frame.message_id, "final frame");
            target.remove_class(STREAMING_CLASS);
            let html = self.pipeline.render(&frame.text)?;
            return Ok(FrameOutcome::Rendered(target.set_html(&html)));
        }

        target.add_class(STREAMING_CLASS);
        let mut text = frame.text.clone();
        if text != ELLIPSIS {
            text = drop_unstable_line(&text);
        }
        if text == *last_stabilized || (*last_stabilized == ELLIPSIS && text.is_empty()) {
            debug!(
                message_id = frame.message_id,
                "stabilized text unchanged, skipping re-render"
            );
            return Ok(FrameOutcome::Skipped);
        }
        *last_stabilized = text.clone();

        if use_skeleton {
            if text == ELLIPSIS {
                text.clear();
            }
            text.push_str("\n\n");
            text.push_str(&skeleton::skeleton_block());
        }

        let html = self.pipeline.render(&text)?;
        Ok(FrameOutcome::Rendered(target.set_html(&html)))
    }

    /// The stream ended or was cancelled; drop per-stream state.
    pub fn stream_ended(&mut self) {
        self.state = ControllerState::Idle;
    }
}

/// The last line of a partial frame may still be growing; everything before
/// it is considered settled.
fn drop_unstable_line(text: &str) -> String {
    let mut lines: Vec<&str> = text.trim().split('\n').collect();
    lines.pop();
    lines.join("\n")
}
