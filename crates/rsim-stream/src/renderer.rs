//! The renderer capability injected into a [`FrameStream`][crate::FrameStream].

use rsim_core::WorldModel;
use rsim_motion::AgentState;

use crate::RenderResult;

/// Read-only state handed to a renderer after each step.
#[derive(Clone, Copy)]
pub struct FrameView<'a> {
    pub world:  &'a WorldModel,
    pub agents: &'a [AgentState],
    /// Value of `step_count` after the step that produced this view.
    pub step:   u64,
}

/// Turns simulation state into an opaque payload (image bytes, vector
/// graphics, a scene description, …).
///
/// Called synchronously on the stepping thread, so a slow renderer slows the
/// frame rate.  An `Err` ends the stream with a single error record.
pub trait Renderer {
    type Payload;

    fn render(&mut self, frame: &FrameView<'_>) -> RenderResult<Self::Payload>;
}

/// A [`Renderer`] backed by a closure.  Build with [`from_fn`].
pub struct FnRenderer<F>(F);

/// Wrap `f(world, agents, step)` as a [`Renderer`].
///
/// ```rust,ignore
/// let renderer = from_fn(|_world, agents, step| Ok((step, agents.len())));
/// ```
pub fn from_fn<P, F>(f: F) -> FnRenderer<F>
where
    F: FnMut(&WorldModel, &[AgentState], u64) -> RenderResult<P>,
{
    FnRenderer(f)
}

impl<P, F> Renderer for FnRenderer<F>
where
    F: FnMut(&WorldModel, &[AgentState], u64) -> RenderResult<P>,
{
    type Payload = P;

    fn render(&mut self, frame: &FrameView<'_>) -> RenderResult<P> {
        (self.0)(frame.world, frame.agents, frame.step)
    }
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    type Payload = R::Payload;

    fn render(&mut self, frame: &FrameView<'_>) -> RenderResult<Self::Payload> {
        (**self).render(frame)
    }
}
