//! The generator driver: iterate output pixels, query the distance
//! pipeline, map and store the results.

use kurbo::Point;
use serde::{Deserialize, Serialize};

use crate::bitmap::Bitmap;
use crate::combiner::{ContourCombiner, OverlappingContourCombiner, SimpleContourCombiner};
use crate::distance::DistanceValue;
use crate::selector::{
    DistanceSelector, MultiAndTrueDistanceSelector, MultiDistanceSelector,
    PerpendicularDistanceSelector, TrueDistanceSelector,
};
use crate::shape::{Shape, YAxisOrientation};
use crate::transform::SdfTransformation;

/// Configuration shared by all generator variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Correct distance signs against the non-zero winding rule, so
    /// overlapping and self-intersecting contours render as their
    /// union. Costs one scanline per output row.
    pub overlap_support: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            overlap_support: true,
        }
    }
}

/// Configuration for the multi-channel generators.
///
/// Error correction of the generated field is a separate post-pass and
/// is configured there, not here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct MsdfGeneratorConfig {
    /// The base generator configuration.
    pub generator: GeneratorConfig,
}

impl MsdfGeneratorConfig {
    /// Wrap a base configuration.
    pub fn new(generator: GeneratorConfig) -> Self {
        MsdfGeneratorConfig { generator }
    }
}

/// Generate a single-channel true signed distance field.
pub fn generate_sdf(
    output: &mut Bitmap<1>,
    shape: &Shape,
    transformation: &SdfTransformation,
    config: &GeneratorConfig,
) {
    generate::<TrueDistanceSelector, 1>(output, shape, transformation, config);
}

/// Generate a single-channel perpendicular signed distance field.
pub fn generate_psdf(
    output: &mut Bitmap<1>,
    shape: &Shape,
    transformation: &SdfTransformation,
    config: &GeneratorConfig,
) {
    generate::<PerpendicularDistanceSelector, 1>(output, shape, transformation, config);
}

/// Generate a multi-channel signed distance field. The shape's edges
/// must already be colored.
pub fn generate_msdf(
    output: &mut Bitmap<3>,
    shape: &Shape,
    transformation: &SdfTransformation,
    config: &MsdfGeneratorConfig,
) {
    generate::<MultiDistanceSelector, 3>(output, shape, transformation, &config.generator);
}

/// Generate a multi-channel signed distance field with the true
/// distance in the fourth channel.
pub fn generate_mtsdf(
    output: &mut Bitmap<4>,
    shape: &Shape,
    transformation: &SdfTransformation,
    config: &MsdfGeneratorConfig,
) {
    generate::<MultiAndTrueDistanceSelector, 4>(output, shape, transformation, &config.generator);
}

fn generate<S, const N: usize>(
    output: &mut Bitmap<N>,
    shape: &Shape,
    transformation: &SdfTransformation,
    config: &GeneratorConfig,
) where
    S: DistanceSelector,
    S::Distance: DistanceValue<Pixel = [f32; N]>,
{
    if config.overlap_support {
        run_pixels::<OverlappingContourCombiner<S>, N>(output, shape, transformation);
    } else {
        run_pixels::<SimpleContourCombiner<S>, N>(output, shape, transformation);
    }
}

fn run_pixels<C, const N: usize>(
    output: &mut Bitmap<N>,
    shape: &Shape,
    transformation: &SdfTransformation,
) where
    C: ContourCombiner,
    <C::Selector as DistanceSelector>::Distance: DistanceValue<Pixel = [f32; N]>,
{
    let mut combiner = C::default();
    let width = output.width();
    let height = output.height();

    // Serpentine traversal: consecutive samples stay adjacent, so the
    // overlapping combiner's per-row scanline cache is rebuilt exactly
    // once per row.
    let mut right_to_left = false;
    for y in 0..height {
        let row = match shape.y_axis {
            YAxisOrientation::Upward => y,
            YAxisOrientation::Downward => height - 1 - y,
        };
        for column in 0..width {
            let x = if right_to_left {
                width - 1 - column
            } else {
                column
            };
            let p = transformation
                .projection
                .unproject(Point::new(x as f64 + 0.5, y as f64 + 0.5));
            let distance = combiner.measure(shape, p);
            output.set_pixel(x, row, distance.to_pixel(&transformation.distance_mapping));
        }
        right_to_left = !right_to_left;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::tests::unit_square;
    use crate::transform::{DistanceMapping, Projection, Range};
    use kurbo::Vec2;

    // The unit square centered in a 32x32 bitmap at 16 pixels per unit,
    // with a quarter-unit distance range around the outline.
    fn square_transformation() -> SdfTransformation {
        SdfTransformation::new(
            Projection::new(Vec2::new(16.0, 16.0), Vec2::new(0.5, 0.5)),
            DistanceMapping::new(Range::symmetrical(0.5)),
        )
    }

    #[test]
    fn interior_maps_above_half() {
        let shape = unit_square();
        let transformation = square_transformation();
        let mut output: Bitmap<1> = Bitmap::new(32, 32);
        generate_sdf(&mut output, &shape, &transformation, &Default::default());
        // The deep interior lies beyond the range's upper bound; the
        // mapping is affine, not clamped.
        assert!(output.pixel(16, 16)[0] > 1.0);
        // The bitmap corner is far outside.
        assert!(output.pixel(0, 0)[0] < 0.0);
    }

    #[test]
    fn downward_y_axis_flips_rows() {
        let mut shape = unit_square();
        let transformation = square_transformation();
        let mut upward: Bitmap<1> = Bitmap::new(32, 32);
        generate_sdf(&mut upward, &shape, &transformation, &Default::default());

        shape.y_axis = YAxisOrientation::Downward;
        let mut downward: Bitmap<1> = Bitmap::new(32, 32);
        generate_sdf(&mut downward, &shape, &transformation, &Default::default());

        for y in 0..32 {
            for x in 0..32 {
                assert_eq!(upward.pixel(x, y), downward.pixel(x, 31 - y));
            }
        }
    }

    #[test]
    fn empty_shape_is_uniformly_far_outside() {
        let shape = Shape::new();
        let transformation = square_transformation();
        let mut output: Bitmap<1> = Bitmap::new(8, 8);
        generate_sdf(&mut output, &shape, &transformation, &Default::default());
        for value in output.data() {
            assert!(*value < 0.0);
        }
    }

    #[test]
    fn overlap_support_is_a_no_op_without_overlaps() {
        let shape = unit_square();
        let transformation = square_transformation();
        let mut with_overlap: Bitmap<1> = Bitmap::new(16, 16);
        let mut without: Bitmap<1> = Bitmap::new(16, 16);
        generate_sdf(
            &mut with_overlap,
            &shape,
            &transformation,
            &GeneratorConfig {
                overlap_support: true,
            },
        );
        generate_sdf(
            &mut without,
            &shape,
            &transformation,
            &GeneratorConfig {
                overlap_support: false,
            },
        );
        // A plain square has no overlaps, so the two must agree.
        assert_eq!(with_overlap.data(), without.data());
    }
}
