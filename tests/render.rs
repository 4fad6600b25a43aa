use chrono::{Month, Weekday};
use gheat::heat::Grid;
use gheat::model::{BucketCounts, BucketKey};
use gheat::render::png::heat_color;
use gheat::render::{PngRenderer, Renderer};
use gheat::HeatError;
use image::Rgb;
use tempfile::tempdir;

fn close(a: Rgb<u8>, b: Rgb<u8>) -> bool {
    a.0.iter().zip(b.0.iter()).all(|(x, y)| x.abs_diff(*y) <= 1)
}

fn sample_grid() -> Grid {
    let counts: BucketCounts = [
        (BucketKey::new(Weekday::Mon, Month::January), 8),
        (BucketKey::new(Weekday::Sun, Month::December), 2),
    ]
    .into_iter()
    .collect();
    Grid::from_counts(&counts)
}

#[test]
fn gradient_runs_from_light_to_dark() {
    assert!(close(heat_color(0.0), Rgb([0xff, 0xff, 0xe5])));
    assert!(close(heat_color(1.0), Rgb([0x66, 0x25, 0x06])));
    assert!(close(heat_color(-3.0), heat_color(0.0)));
    assert!(close(heat_color(7.0), heat_color(1.0)));

    let lum = |c: Rgb<u8>| c.0.iter().map(|v| u32::from(*v)).sum::<u32>();
    assert!(lum(heat_color(0.25)) > lum(heat_color(0.75)));
}

#[test]
fn writes_png_with_requested_size() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("repo_heatmap.png");

    PngRenderer::new(800, 400)
        .render(&sample_grid(), "Git Changes in repo by dev", &path)
        .unwrap();

    let image = image::open(&path).unwrap().to_rgb8();
    assert_eq!(image.dimensions(), (800, 400));
}

#[test]
fn busiest_cell_is_darkest() {
    let image = PngRenderer::default().draw(&sample_grid(), "t").unwrap();

    let darkest = heat_color(1.0);
    let found = image.pixels().any(|p| close(*p, darkest));
    assert!(found, "expected a fully saturated cell");

    let lightest = heat_color(0.0);
    assert!(image.pixels().any(|p| close(*p, lightest)));
}

#[test]
fn axis_and_legend_are_labelled_at_the_edges() {
    let ink = Rgb([40, 40, 40]);
    let image = PngRenderer::default().draw(&sample_grid(), "t").unwrap();
    let (width, height) = image.dimensions();

    // Weekday names and legend ticks stay clear of the outer 32px strips,
    // so ink there comes from the rotated axis label and legend caption.
    let inked = |xs: std::ops::Range<u32>| {
        xs.flat_map(|x| (0..height).map(move |y| (x, y)))
            .any(|(x, y)| *image.get_pixel(x, y) == ink)
    };
    assert!(inked(0..32), "missing weekday axis label");
    assert!(inked(width - 32..width), "missing legend caption");
}

#[test]
fn empty_grid_still_renders() {
    let image = PngRenderer::default().draw(&Grid::new(), "nothing").unwrap();
    assert_eq!(image.dimensions(), (1200, 600));
}

#[test]
fn tiny_canvas_is_rejected() {
    let err = PngRenderer::new(40, 20).draw(&sample_grid(), "t").unwrap_err();
    assert!(matches!(err, HeatError::Render(_)));
}

#[test]
fn unwritable_path_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing").join("x.png");
    assert!(PngRenderer::default()
        .render(&sample_grid(), "t", &path)
        .is_err());
}
