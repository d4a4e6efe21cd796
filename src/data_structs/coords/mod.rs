//! This module defines data structures for representing genomic coordinates.
//!
//! It provides two main structures:
//!
//! - [`OrientedSpan`]: a coordinate pair ordered 5' to 3', which is how every
//!   splice graph edge stores its bounds.
//! - [`Interval`]: an inclusive window on one chromosome, produced by the read
//!   partitioner.

mod interval;
mod span;

pub use interval::Interval;
pub use span::OrientedSpan;

#[cfg(test)]
mod tests;
