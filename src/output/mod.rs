/// Output layer: stream decoration for the command tree's writers.
pub mod prefix;

pub use prefix::{Color, LinePrefixWriter};
