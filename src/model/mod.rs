//! Data model: input fragments, outline output, and diagnostics.

mod diagnostics;
mod fragment;
mod outline;

pub use diagnostics::Diagnostics;
pub use fragment::{BBox, FontWeight, Fragment};
pub use outline::{HeadingLevel, HeadingNode, Outline};
