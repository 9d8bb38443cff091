//! Multi-channel signed distance field generation for closed Bézier
//! outlines.
//!
//! Given a [`Shape`] made of line, quadratic and cubic Bézier edges,
//! this crate rasterizes bitmaps whose pixels encode the signed distance
//! from each pixel center to the shape's outline, in the shape's own
//! coordinates. The multi-channel variants assign edges to color
//! channels (see [`coloring`]) so that the channel median reconstructs
//! the outline with sharp corners at any magnification.
//!
//! ```
//! use msdfield::{
//!     coloring, generate_msdf, Bitmap, Contour, DistanceMapping, EdgeSegment,
//!     MsdfGeneratorConfig, Projection, Range, SdfTransformation, Shape,
//! };
//! use kurbo::Vec2;
//!
//! let mut contour = Contour::new();
//! contour.add_edge(EdgeSegment::line((0.0, 0.0), (1.0, 0.0)));
//! contour.add_edge(EdgeSegment::line((1.0, 0.0), (1.0, 1.0)));
//! contour.add_edge(EdgeSegment::line((1.0, 1.0), (0.0, 1.0)));
//! contour.add_edge(EdgeSegment::line((0.0, 1.0), (0.0, 0.0)));
//! let mut shape = Shape::new();
//! shape.add_contour(contour);
//!
//! coloring::simple(&mut shape, 3.0, 0);
//!
//! let transformation = SdfTransformation::new(
//!     Projection::new(Vec2::new(16.0, 16.0), Vec2::new(0.5, 0.5)),
//!     DistanceMapping::new(Range::symmetrical(0.5)),
//! );
//! let mut output: Bitmap<3> = Bitmap::new(32, 32);
//! generate_msdf(&mut output, &shape, &transformation, &MsdfGeneratorConfig::default());
//! ```
//!
//! Distances are positive inside the filled region, so with the usual
//! increasing distance mapping the outline sits on the 0.5 isoline.
//! Contours wound counterclockwise (with y up) are filled; holes are
//! contours wound the other way.

#![deny(missing_docs)]

pub mod bitmap;
pub mod color;
pub mod coloring;
pub mod combiner;
pub mod distance;
mod geom;
mod num;
pub mod scanline;
pub mod segment;
pub mod shape;
pub mod selector;
pub mod transform;

mod generator;

pub use bitmap::Bitmap;
pub use color::EdgeColor;
pub use distance::{MultiAndTrueDistance, MultiDistance, SignedDistance};
pub use generator::{
    generate_msdf, generate_mtsdf, generate_psdf, generate_sdf, GeneratorConfig,
    MsdfGeneratorConfig,
};
pub use scanline::{FillRule, Scanline};
pub use segment::{Curve, EdgeSegment};
pub use shape::{Contour, Shape, ValidationError, YAxisOrientation};
pub use transform::{DistanceMapping, Projection, Range, SdfTransformation};
