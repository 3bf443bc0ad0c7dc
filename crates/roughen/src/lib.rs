//! # roughen
//!
//! Hand-sketched vector drawing: rough lines, shapes, SVG paths and pattern
//! fills, emitted as plain pen operations.
//!
//! ## Rust Lesson #7: Modules
//!
//! Rust modules are like ES6 modules but more explicit:
//! - `mod foo;` = load from `foo.rs` or `foo/mod.rs`
//! - `pub mod foo;` = also export it publicly
//! - `pub use foo::Bar;` = re-export Bar at this level
//!
//! Unlike Node.js, you must explicitly declare every module.

pub mod arc;
pub mod generator;
pub mod geometry;
pub mod hatch;
pub mod ops;
pub mod options;
pub mod path;
pub mod patterns;
pub mod rng;
pub mod sketchy;
pub mod text;

// Re-export common types at crate root for convenience.
pub use generator::Generator;
pub use geometry::{Line, Point};
pub use ops::{Drawable, Op, OpSet, OpSetKind, Shape};
pub use options::{resolve, Fill, Options, ResolvedOptions};
pub use path::{ParsedPath, PathError, Segment};
pub use patterns::FillStyle;
pub use rng::Rng;
pub use text::{Glyph, GlyphSource, TextAlign, TextBaseline};
