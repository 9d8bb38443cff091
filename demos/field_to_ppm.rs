//! Generate an MSDF for a built-in test glyph and write it as a PPM
//! image, so the channel structure can be eyeballed in any viewer.

use std::path::PathBuf;

use clap::Parser;
use kurbo::{Point, Vec2};
use msdfield::{
    coloring, generate_msdf, Bitmap, Contour, DistanceMapping, EdgeSegment, MsdfGeneratorConfig,
    Projection, Range, SdfTransformation, Shape,
};

#[derive(Parser)]
struct Args {
    output: PathBuf,

    /// Output resolution in pixels (square).
    #[arg(long, default_value_t = 64)]
    size: usize,

    /// Distance range in shape units.
    #[arg(long, default_value_t = 1.0)]
    range: f64,

    /// Edge coloring seed.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Contour {
    let mut contour = Contour::new();
    contour.add_edge(EdgeSegment::line((x0, y0), (x1, y0)));
    contour.add_edge(EdgeSegment::line((x1, y0), (x1, y1)));
    contour.add_edge(EdgeSegment::line((x1, y1), (x0, y1)));
    contour.add_edge(EdgeSegment::line((x0, y1), (x0, y0)));
    contour
}

fn circle(center: (f64, f64), radius: f64, segments: usize) -> Contour {
    let mut contour = Contour::new();
    let k = (std::f64::consts::PI / segments as f64).tan() * radius;
    for i in 0..segments {
        let a0 = 2.0 * std::f64::consts::PI * i as f64 / segments as f64;
        let a1 = 2.0 * std::f64::consts::PI * (i + 1) as f64 / segments as f64;
        let p0 = Point::new(center.0 + radius * a0.cos(), center.1 + radius * a0.sin());
        let p2 = Point::new(center.0 + radius * a1.cos(), center.1 + radius * a1.sin());
        let p1 = Point::new(p0.x - k * a0.sin(), p0.y + k * a0.cos());
        contour.add_edge(EdgeSegment::quadratic(p0, p1, p2));
    }
    contour
}

fn test_glyph() -> Shape {
    let mut shape = Shape::new();
    shape.add_contour(square(0.0, 0.0, 4.0, 4.0));
    let mut hole = circle((2.0, 2.0), 1.0, 8);
    hole.reverse();
    shape.add_contour(hole);
    shape
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut shape = test_glyph();
    coloring::simple(&mut shape, 3.0, args.seed);

    let scale = args.size as f64 / 6.0;
    let transformation = SdfTransformation::new(
        Projection::new(Vec2::new(scale, scale), Vec2::new(1.0, 1.0)),
        DistanceMapping::new(Range::symmetrical(args.range)),
    );

    let mut output: Bitmap<3> = Bitmap::new(args.size, args.size);
    generate_msdf(
        &mut output,
        &shape,
        &transformation,
        &MsdfGeneratorConfig::default(),
    );

    let mut ppm = format!("P3\n{} {}\n255\n", args.size, args.size);
    // PPM rows go top to bottom; the bitmap's first row is the shape's
    // bottom.
    for y in (0..args.size).rev() {
        for x in 0..args.size {
            let [r, g, b] = output.pixel(x, y);
            for channel in [r, g, b] {
                let byte = (channel.clamp(0.0, 1.0) * 255.0).round() as u8;
                ppm.push_str(&format!("{byte} "));
            }
        }
        ppm.push('\n');
    }
    std::fs::write(&args.output, ppm)?;

    eprintln!(
        "wrote {}x{} MSDF to {}",
        args.size,
        args.size,
        args.output.display()
    );
    Ok(())
}
