//! Chart renderer: plotters layout, printpdf output.

use std::fs;
use std::path::Path;

use plotters::coord::ranged1d::{BoldPoints, Ranged};
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color as PdfColor, IndirectFontRef, Line, LineDashPattern, Mm, PdfDocument,
    PdfLayerReference, Point, Polygon, Pt, Rgb, TextMatrix,
};
use serde::Deserialize;
use stouchtool_core::{
    application::{ApplicationError, ports::ChartRenderer},
    domain::{SParameterChart, format_mhz},
    error::StouchResult,
};
use thiserror::Error;
use tracing::{debug, instrument};

use super::pdf_backend::{Dash, Primitive, Recording, RecordingBackend, Rgba};

const X_LABELS: usize = 10;
const Y_LABELS: usize = 8;

/// Matplotlib "tab10" cycle.
const PALETTE: [RGBColor; 10] = [
    RGBColor(0x1f, 0x77, 0xb4),
    RGBColor(0xff, 0x7f, 0x0e),
    RGBColor(0x2c, 0xa0, 0x2c),
    RGBColor(0xd6, 0x27, 0x28),
    RGBColor(0x94, 0x67, 0xbd),
    RGBColor(0x8c, 0x56, 0x4b),
    RGBColor(0xe3, 0x77, 0xc2),
    RGBColor(0x7f, 0x7f, 0x7f),
    RGBColor(0xbc, 0xbd, 0x22),
    RGBColor(0x17, 0xbe, 0xcf),
];

#[derive(Debug, Error)]
enum ChartError {
    #[error("drawing failed: {0}")]
    Drawing(String),

    #[error("PDF encoding failed: {0}")]
    Pdf(#[from] printpdf::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for ChartError {
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        Self::Drawing(e.to_string())
    }
}

/// Page size in PDF points (1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PageSize {
    pub width_pt: f64,
    pub height_pt: f64,
}

impl Default for PageSize {
    /// 10 x 7 inches.
    fn default() -> Self {
        Self {
            width_pt: 720.0,
            height_pt: 504.0,
        }
    }
}

/// Renders [`SParameterChart`]s as single-page vector PDFs.
#[derive(Debug, Clone, Copy)]
pub struct PdfChartRenderer {
    page: PageSize,
    line_width: u32,
}

impl Default for PdfChartRenderer {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}

impl PdfChartRenderer {
    pub fn new(page: PageSize) -> Self {
        Self {
            page,
            line_width: 1,
        }
    }

    pub fn with_line_width(mut self, line_width: u32) -> Self {
        self.line_width = line_width.max(1);
        self
    }

    fn size(&self) -> (u32, u32) {
        (
            self.page.width_pt.round().max(1.0) as u32,
            self.page.height_pt.round().max(1.0) as u32,
        )
    }

    fn draw(&self, chart: &SParameterChart) -> Result<Vec<Primitive>, ChartError> {
        let recording = Recording::default();
        let root = RecordingBackend::new(self.size(), recording.clone()).into_drawing_area();
        root.fill(&WHITE)?;

        let (f_lo, f_hi) = chart.frequency_range();
        let (m_lo, m_hi) = chart.magnitude_range();

        let mut ctx = ChartBuilder::on(&root)
            .caption(chart.title(), ("sans-serif", 18))
            .margin(16)
            .x_label_area_size(44)
            .y_label_area_size(56)
            .build_cartesian_2d(f_lo..f_hi, m_lo..m_hi)?;

        // Grid below everything else.
        {
            let mut grid = recording.borrow_mut();
            let mut line = |from: (f64, f64), to: (f64, f64), dash: Dash| {
                let a = ctx.backend_coord(&from);
                let b = ctx.backend_coord(&to);
                grid.push(Primitive::Polyline {
                    points: vec![
                        (f64::from(a.0), f64::from(a.1)),
                        (f64::from(b.0), f64::from(b.1)),
                    ],
                    color: Rgba::opaque(SParameterChart::GRID_RGB),
                    width: 0.5,
                    dash,
                });
            };
            for x in SParameterChart::minor_ticks((f_lo, f_hi), SParameterChart::MINOR_HZ_STEP) {
                line((x, m_lo), (x, m_hi), Dash::Dotted);
            }
            for y in SParameterChart::minor_ticks((m_lo, m_hi), SParameterChart::MINOR_DB_STEP) {
                line((f_lo, y), (f_hi, y), Dash::Dotted);
            }
            for x in RangedCoordf64::from(f_lo..f_hi).key_points(BoldPoints(X_LABELS)) {
                line((x, m_lo), (x, m_hi), Dash::Dashed);
            }
            for y in RangedCoordf64::from(m_lo..m_hi).key_points(BoldPoints(Y_LABELS)) {
                line((f_lo, y), (f_hi, y), Dash::Dashed);
            }
        }

        ctx.configure_mesh()
            .disable_mesh()
            .x_labels(X_LABELS)
            .y_labels(Y_LABELS)
            .x_label_formatter(&|x| format_mhz(*x))
            .y_label_formatter(&|y| format!("{y:.0}"))
            .x_desc(SParameterChart::X_LABEL)
            .y_desc(SParameterChart::Y_LABEL)
            .label_style(("sans-serif", 11))
            .axis_desc_style(("sans-serif", 13))
            .draw()?;

        for (trace, color) in chart.traces().iter().zip(PALETTE.iter().cycle()) {
            let color = *color;
            ctx.draw_series(LineSeries::new(
                trace.points().iter().copied(),
                color.stroke_width(self.line_width),
            ))?
            .label(trace.label())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
        }

        ctx.plotting_area().draw(&Rectangle::new(
            [(f_lo, m_lo), (f_hi, m_hi)],
            BLACK.stroke_width(1),
        ))?;

        if !chart.traces().is_empty() {
            ctx.configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .margin(8)
                .label_font(("sans-serif", 11))
                .draw()?;
        }

        root.present()?;
        drop(ctx);
        drop(root);
        Ok(recording.take())
    }

    fn encode(&self, title: &str, primitives: &[Primitive]) -> Result<Vec<u8>, ChartError> {
        let (doc, page, layer) = PdfDocument::new(
            title,
            Mm::from(Pt(self.page.width_pt as f32)),
            Mm::from(Pt(self.page.height_pt as f32)),
            "chart",
        );
        let layer = doc.get_page(page).get_layer(layer);
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
        let height = self.page.height_pt;

        for primitive in primitives {
            match primitive {
                Primitive::Polyline {
                    points,
                    color,
                    width,
                    dash,
                } => {
                    layer.set_outline_color(pdf_color(*color));
                    layer.set_outline_thickness(*width as f32);
                    layer.set_line_dash_pattern(dash_pattern(*dash));
                    layer.add_line(Line {
                        points: points.iter().map(|&p| (page_point(p, height), false)).collect(),
                        is_closed: false,
                    });
                }
                Primitive::Polygon { points, color } => {
                    layer.set_fill_color(pdf_color(*color));
                    layer.add_polygon(Polygon {
                        rings: vec![points.iter().map(|&p| (page_point(p, height), false)).collect()],
                        mode: PaintMode::Fill,
                        winding_order: WindingOrder::NonZero,
                    });
                }
                Primitive::Text {
                    text,
                    pos,
                    size,
                    color,
                    rotation_deg,
                    bold: is_bold,
                } => {
                    let font = if *is_bold { &bold } else { &regular };
                    write_text(&layer, font, text, *pos, *size, *color, *rotation_deg, height);
                }
            }
        }

        Ok(doc.save_to_bytes()?)
    }

    fn render_to(&self, chart: &SParameterChart, path: &Path) -> Result<(), ChartError> {
        let primitives = self.draw(chart)?;
        debug!(primitives = primitives.len(), "Chart laid out");
        let bytes = self.encode(chart.title(), &primitives)?;
        fs::write(path, bytes)?;
        Ok(())
    }
}

impl ChartRenderer for PdfChartRenderer {
    #[instrument(skip(self, chart), fields(traces = chart.traces().len()))]
    fn render(&self, chart: &SParameterChart, path: &Path) -> StouchResult<()> {
        self.render_to(chart, path).map_err(|e| {
            ApplicationError::RenderFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}

fn page_point((x, y): (f64, f64), height: f64) -> Point {
    Point::new(
        Mm::from(Pt(x as f32)),
        Mm::from(Pt((height - y) as f32)),
    )
}

fn pdf_color(color: Rgba) -> PdfColor {
    let (r, g, b) = color.over_white();
    PdfColor::Rgb(Rgb::new(r, g, b, None))
}

fn dash_pattern(dash: Dash) -> LineDashPattern {
    match dash {
        Dash::Solid => LineDashPattern::default(),
        Dash::Dashed => LineDashPattern {
            dash_1: Some(4),
            gap_1: Some(2),
            ..Default::default()
        },
        Dash::Dotted => LineDashPattern {
            dash_1: Some(1),
            gap_1: Some(2),
            ..Default::default()
        },
    }
}

#[allow(clippy::too_many_arguments)]
fn write_text(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    text: &str,
    (x, y): (f64, f64),
    size: f64,
    color: Rgba,
    rotation_deg: f64,
    height: f64,
) {
    layer.begin_text_section();
    layer.set_font(font, size as f32);
    layer.set_fill_color(pdf_color(color));
    layer.set_text_matrix(TextMatrix::TranslateRotate(
        Pt(x as f32),
        Pt((height - y) as f32),
        rotation_deg as f32,
    ));
    layer.write_text(text, font);
    layer.end_text_section();
}
