#[macro_use]
extern crate bitflags;

mod arc;
mod dash;
mod errors;
mod flatten;
mod math;
mod path;
mod pen;
mod stroker;

pub use dash::{DashSegmenter, PathSink};
pub use errors::*;
pub use math::*;
pub use path::{Path, PathEvent, Verb};
pub use pen::{CapStyle, JoinStyle, Pen, StrokeHints};
pub use stroker::Stroker;
