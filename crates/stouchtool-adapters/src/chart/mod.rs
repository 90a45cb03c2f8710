//! PDF charts of S-parameter magnitudes.

mod pdf_backend;
mod renderer;

pub use renderer::{PageSize, PdfChartRenderer};
