//! Render a Sample Document
//!
//! Writes a two-page PDF exercising every drawing operation: lines,
//! polylines, polygons, rectangles, text and 8/24-bit images.
//!
//! Usage:
//!   cargo run --bin render_sample
//!   cargo run --bin render_sample -- out/sample.pdf --compress-images --compress-content

use pdf_plotter::geometry::{Color, Point, Rect};
use pdf_plotter::writer::{Document, FillStyle, ImagePlacement, LineStyle, TextStyle};
use pdf_plotter::WriterConfig;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

const PAGE_WIDTH: f64 = 612.0;
const PAGE_HEIGHT: f64 = 792.0;

struct SampleConfig {
    output: PathBuf,
    compress_images: bool,
    compress_content: bool,
}

impl SampleConfig {
    fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();
        let mut output = PathBuf::from("test.pdf");
        let mut compress_images = false;
        let mut compress_content = false;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--compress-images" => compress_images = true,
                "--compress-content" => compress_content = true,
                "--compress" | "-z" => {
                    compress_images = true;
                    compress_content = true;
                },
                other if !other.starts_with('-') => output = PathBuf::from(other),
                other => eprintln!("Ignoring unknown option {}", other),
            }
            i += 1;
        }

        Self {
            output,
            compress_images,
            compress_content,
        }
    }
}

fn draw_caption<W: Write>(doc: &mut Document<W>, x: f64, y: f64, text: &str) -> pdf_plotter::Result<()> {
    doc.set_text_style(TextStyle::new(10.0, Color::black()))?;
    doc.draw_text(Point::new(x, y), text)
}

fn draw_corner_marks<W: Write>(doc: &mut Document<W>) -> pdf_plotter::Result<()> {
    doc.set_line_style(LineStyle::solid(Color::gray(0.2), 0.0))?;
    doc.draw_line(Point::new(0.0, PAGE_HEIGHT), Point::new(50.0, PAGE_HEIGHT - 50.0))?;
    doc.draw_line(
        Point::new(PAGE_WIDTH, PAGE_HEIGHT),
        Point::new(PAGE_WIDTH - 50.0, PAGE_HEIGHT - 50.0),
    )?;
    doc.draw_line(Point::new(0.0, 0.0), Point::new(50.0, 50.0))?;
    doc.draw_line(Point::new(PAGE_WIDTH, 0.0), Point::new(PAGE_WIDTH - 50.0, 50.0))
}

fn draw_lines<W: Write>(doc: &mut Document<W>) -> pdf_plotter::Result<()> {
    for i in 0..10 {
        let t = f64::from(i);
        doc.set_line_style(LineStyle::solid(Color::new(1.0 - t * 0.1, 0.0, t * 0.1), t * 0.5))?;
        doc.draw_line(
            Point::new(100.0, 450.0 - t * 10.0),
            Point::new(200.0 + t * 5.0, 470.0 - t * 10.0),
        )?;
    }
    draw_caption(doc, 100.0, 470.0, "Lines")
}

fn draw_polyline<W: Write>(doc: &mut Document<W>) -> pdf_plotter::Result<()> {
    doc.set_line_style(LineStyle::solid(Color::new(0.0, 0.0, 0.8), 2.0))?;
    doc.draw_polyline(&[
        Point::new(250.0, 450.0),
        Point::new(350.0, 450.0),
        Point::new(280.0, 440.0),
        Point::new(300.0, 375.0),
        Point::new(260.0, 440.0),
    ])?;
    draw_caption(doc, 250.0, 470.0, "Polyline")
}

fn draw_polygon<W: Write>(doc: &mut Document<W>) -> pdf_plotter::Result<()> {
    doc.set_line_style(LineStyle::solid(Color::new(0.8, 0.0, 0.0), 4.0))?;
    doc.set_fill_style(FillStyle::solid(Color::new(0.0, 0.8, 0.0)))?;
    doc.draw_polygon(&[
        Point::new(400.0, 450.0),
        Point::new(500.0, 450.0),
        Point::new(430.0, 440.0),
        Point::new(450.0, 375.0),
    ])?;
    draw_caption(doc, 400.0, 470.0, "Polygon")
}

fn draw_gray_image<W: Write>(doc: &mut Document<W>) -> pdf_plotter::Result<()> {
    #[rustfmt::skip]
    let pixels: [u8; 24] = [
        0x40, 0x40, 0x40, 0x40,
        0x50, 0x00, 0x00, 0x50,
        0x60, 0x77, 0x77, 0x60,
        0x60, 0xCC, 0xCC, 0x60,
        0x70, 0x00, 0x00, 0x70,
        0x80, 0x80, 0x80, 0x80,
    ];
    doc.draw_image_from_slice(&pixels, 4, 6, 8, 4, ImagePlacement::new(250.0, 150.0, 100.0, 150.0))?;
    draw_caption(doc, 250.0, 310.0, "8-bit Image (4 x 6 px)")
}

fn draw_rgb_image<W: Write>(doc: &mut Document<W>) -> pdf_plotter::Result<()> {
    #[rustfmt::skip]
    let pixels: [u8; 72] = [
        0x40, 0x00, 0x00, 0x40, 0x00, 0x00, 0x40, 0x00, 0x00, 0x40, 0x00, 0x00,
        0x00, 0x50, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x50, 0x00,
        0x60, 0x00, 0x00, 0x00, 0x00, 0x77, 0x00, 0x00, 0x77, 0x60, 0x00, 0x00,
        0x60, 0x00, 0x00, 0x00, 0x00, 0xCC, 0x00, 0x00, 0xCC, 0x60, 0x00, 0x00,
        0x00, 0x70, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x70, 0x00,
        0x80, 0x00, 0x00, 0x80, 0x00, 0x00, 0x80, 0x00, 0x00, 0x80, 0x00, 0x00,
    ];
    doc.draw_image_from_slice(&pixels, 4, 6, 24, 12, ImagePlacement::new(400.0, 150.0, 100.0, 150.0))?;
    draw_caption(doc, 400.0, 310.0, "24-bit Image (4 x 6 px)")
}

fn draw_text<W: Write>(doc: &mut Document<W>) -> pdf_plotter::Result<()> {
    for i in 0..10 {
        let t = f64::from(i);
        doc.set_text_style(TextStyle::new(10.0 + t, Color::new(0.0, 1.0 - t * 0.1, t * 0.1)))?;
        doc.draw_text(Point::new(100.0, 290.0 - t * 15.0), "Testing 123.")?;
    }
    draw_caption(doc, 100.0, 310.0, "Text")
}

fn draw_big_text<W: Write>(doc: &mut Document<W>) -> pdf_plotter::Result<()> {
    // Drawn twice, offset, for a drop shadow.
    doc.set_text_style(TextStyle::new(75.0, Color::gray(0.3)))?;
    doc.draw_text(Point::new(100.0, PAGE_HEIGHT - 200.0), "* pdf_plotter *")?;
    doc.set_text_style(TextStyle::new(75.0, Color::new(0.3, 0.7, 0.3)))?;
    doc.draw_text(Point::new(103.0, PAGE_HEIGHT - 203.0), "* pdf_plotter *")
}

fn draw_rectangles<W: Write>(doc: &mut Document<W>) -> pdf_plotter::Result<()> {
    for i in 0..10 {
        let t = f64::from(i);
        doc.set_line_style(LineStyle::solid(Color::new(1.0 - t * 0.1, 0.0, t * 0.1), t * 0.5))?;
        doc.set_fill_style(FillStyle::solid(Color::new(0.4, 1.0 - t * 0.1, t * 0.1)))?;
        doc.draw_rectangle(Rect::from_coords(
            175.0 + t * 10.0,
            200.0 + t * 10.0,
            475.0 - t * 10.0,
            300.0 + t * 15.0,
        ))?;
    }
    draw_caption(doc, 300.0, 450.0, "Rectangles")
}

fn render(config: &SampleConfig) -> pdf_plotter::Result<()> {
    let writer_config = WriterConfig::default()
        .with_image_compression(config.compress_images)
        .with_content_compression(config.compress_content);
    let page = Rect::from_coords(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT);
    let mut doc = Document::create(&config.output, writer_config, page)?;

    draw_corner_marks(&mut doc)?;
    draw_lines(&mut doc)?;
    draw_polyline(&mut doc)?;
    draw_polygon(&mut doc)?;
    draw_gray_image(&mut doc)?;
    draw_rgb_image(&mut doc)?;
    draw_text(&mut doc)?;
    draw_big_text(&mut doc)?;

    doc.next_page()?;

    draw_corner_marks(&mut doc)?;
    draw_rectangles(&mut doc)?;
    doc.set_text_style(TextStyle::new(30.0, Color::new(0.8, 0.3, 0.6)))?;
    doc.draw_text(Point::new(150.0, 500.0), "This is the second page.")?;

    println!("Closing '{}'", config.output.display());
    doc.close()?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let config = SampleConfig::from_args();
    println!("Creating '{}'", config.output.display());

    match render(&config) {
        Ok(()) => {
            println!("Completed.");
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        },
    }
}
