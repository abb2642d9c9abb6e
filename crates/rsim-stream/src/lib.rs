//! `rsim-stream`: pull-driven frame production for the robot_sim framework.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`record`]   | `OutputRecord<P>`: what each pull yields                      |
//! | [`renderer`] | `Renderer` trait, `FrameView`, `FnRenderer` / [`from_fn`]     |
//! | [`stream`]   | `FrameStream`: the `Iterator` that steps and renders          |
//! | [`scene`]    | `SceneRenderer`, `JsonSceneRenderer`: structured scene output |
//! | [`pacer`]    | `Pacer`, `Paced`: real-time playback helpers                  |
//! | [`error`]    | `RenderError`, `RenderResult<T>`                              |
//!
//! # Protocol
//!
//! One pull = at most one engine step.  The sequence is finite and ends
//! right after exactly one terminal record (`Completed`, `Stopped` or
//! `Error`).  While the engine is paused each pull yields a `Paused` record
//! (the default) or sleeps until it is resumed ([`PauseMode::Backoff`]).
//!
//! ```rust,ignore
//! let engine  = EngineBuilder::new(config).build()?;
//! let control = engine.control();                 // give to the UI thread
//! for record in FrameStream::new(engine, JsonSceneRenderer::default()) {
//!     match record {
//!         OutputRecord::Frame { payload, .. } => sink.send(payload)?,
//!         other if other.is_terminal()        => println!("{}", other.status()),
//!         _ => {}
//!     }
//! }
//! ```

pub mod error;
pub mod pacer;
pub mod record;
pub mod renderer;
pub mod scene;
pub mod stream;


pub use error::{RenderError, RenderResult};
pub use pacer::{Paced, Pacer};
pub use record::OutputRecord;
pub use renderer::{FnRenderer, FrameView, Renderer, from_fn};
pub use scene::{JsonSceneRenderer, Scene, SceneObstacle, SceneRenderer, SceneRobot};
pub use stream::{FrameStream, PauseMode};
