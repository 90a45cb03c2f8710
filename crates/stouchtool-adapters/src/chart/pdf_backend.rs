//! A plotters backend that records vector primitives for the PDF encoder.
//!
//! Coordinates are page points with the origin at the top left, the
//! convention plotters draws in. The encoder flips them.

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use plotters_backend::{
    BackendColor, BackendCoord, BackendStyle, BackendTextStyle, DrawingBackend, DrawingErrorKind,
    FontStyle, FontTransform,
    text_anchor::{HPos, VPos},
};

/// Color with straight alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Rgba {
    pub rgb: (u8, u8, u8),
    pub alpha: f64,
}

impl Rgba {
    pub const fn opaque(rgb: (u8, u8, u8)) -> Self {
        Self { rgb, alpha: 1.0 }
    }

    /// Composite over a white page.
    pub fn over_white(self) -> (f32, f32, f32) {
        let blend = |c: u8| (self.alpha * f64::from(c) / 255.0 + (1.0 - self.alpha)) as f32;
        (blend(self.rgb.0), blend(self.rgb.1), blend(self.rgb.2))
    }
}

impl From<BackendColor> for Rgba {
    fn from(color: BackendColor) -> Self {
        Self {
            rgb: color.rgb,
            alpha: color.alpha,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Dash {
    Solid,
    Dashed,
    Dotted,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Primitive {
    Polyline {
        points: Vec<(f64, f64)>,
        color: Rgba,
        width: f64,
        dash: Dash,
    },
    Polygon {
        points: Vec<(f64, f64)>,
        color: Rgba,
    },
    /// `pos` is the left end of the baseline; `rotation_deg` turns the text
    /// counter-clockwise on the page.
    Text {
        text: String,
        pos: (f64, f64),
        size: f64,
        color: Rgba,
        rotation_deg: f64,
        bold: bool,
    },
}

pub(crate) type Recording = Rc<RefCell<Vec<Primitive>>>;

/// Plotters backend writing into a shared [`Recording`].
pub(crate) struct RecordingBackend {
    size: (u32, u32),
    primitives: Recording,
}

impl RecordingBackend {
    pub fn new(size: (u32, u32), primitives: Recording) -> Self {
        Self { size, primitives }
    }

    fn push(&self, primitive: Primitive) {
        self.primitives.borrow_mut().push(primitive);
    }

    fn stroke<S: BackendStyle>(&self, points: Vec<(f64, f64)>, style: &S) {
        let color = style.color();
        if color.alpha == 0.0 || points.len() < 2 {
            return;
        }
        self.push(Primitive::Polyline {
            points,
            color: color.into(),
            width: f64::from(style.stroke_width().max(1)),
            dash: Dash::Solid,
        });
    }

    fn fill(&self, points: Vec<(f64, f64)>, color: BackendColor) {
        if color.alpha == 0.0 || points.len() < 3 {
            return;
        }
        self.push(Primitive::Polygon {
            points,
            color: color.into(),
        });
    }
}

fn to_f64(coord: BackendCoord) -> (f64, f64) {
    (f64::from(coord.0), f64::from(coord.1))
}

/// Advance width of a Helvetica glyph in em.
fn helvetica_advance(c: char) -> f64 {
    match c {
        'i' | 'j' | 'l' | '\'' | '|' => 0.222,
        ' ' | '.' | ',' | ':' | ';' | '!' | 'f' | 't' | '/' | '[' | ']' | 'I' => 0.278,
        'r' | '-' | '(' | ')' => 0.333,
        'm' | 'M' => 0.833,
        'w' => 0.722,
        'W' => 0.944,
        '0'..='9' | 'a'..='z' | '_' | '+' | '=' | '?' | '$' => 0.556,
        'A'..='Z' => 0.7,
        _ => 0.6,
    }
}

/// Width and height in points of `text` set in Helvetica at `size`.
pub(crate) fn text_extent(text: &str, size: f64, bold: bool) -> (f64, f64) {
    let em: f64 = text.chars().map(helvetica_advance).sum();
    let weight = if bold { 1.06 } else { 1.0 };
    (em * size * weight, size)
}

/// Counter-clockwise page rotation and the matching screen-space rotation of
/// an offset, for each plotters transform.
fn rotation(transform: &FontTransform, dx: f64, dy: f64) -> (f64, (f64, f64)) {
    match transform {
        FontTransform::None => (0.0, (dx, dy)),
        FontTransform::Rotate90 => (270.0, (-dy, dx)),
        FontTransform::Rotate180 => (180.0, (-dx, -dy)),
        FontTransform::Rotate270 => (90.0, (dy, -dx)),
    }
}

impl DrawingBackend for RecordingBackend {
    type ErrorType = Infallible;

    fn get_size(&self) -> (u32, u32) {
        self.size
    }

    fn ensure_prepared(&mut self) -> Result<(), DrawingErrorKind<Infallible>> {
        Ok(())
    }

    fn present(&mut self) -> Result<(), DrawingErrorKind<Infallible>> {
        Ok(())
    }

    fn draw_pixel(
        &mut self,
        point: BackendCoord,
        color: BackendColor,
    ) -> Result<(), DrawingErrorKind<Infallible>> {
        let (x, y) = to_f64(point);
        self.fill(vec![(x, y), (x + 1.0, y), (x + 1.0, y + 1.0), (x, y + 1.0)], color);
        Ok(())
    }

    fn draw_line<S: BackendStyle>(
        &mut self,
        from: BackendCoord,
        to: BackendCoord,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Infallible>> {
        self.stroke(vec![to_f64(from), to_f64(to)], style);
        Ok(())
    }

    fn draw_rect<S: BackendStyle>(
        &mut self,
        upper_left: BackendCoord,
        bottom_right: BackendCoord,
        style: &S,
        fill: bool,
    ) -> Result<(), DrawingErrorKind<Infallible>> {
        let (x0, y0) = to_f64(upper_left);
        let (x1, y1) = to_f64(bottom_right);
        let corners = vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1)];
        if fill {
            self.fill(corners, style.color());
        } else {
            let mut closed = corners;
            closed.push((x0, y0));
            self.stroke(closed, style);
        }
        Ok(())
    }

    fn draw_path<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        path: I,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Infallible>> {
        self.stroke(path.into_iter().map(to_f64).collect(), style);
        Ok(())
    }

    fn fill_polygon<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        vert: I,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Infallible>> {
        self.fill(vert.into_iter().map(to_f64).collect(), style.color());
        Ok(())
    }

    fn draw_text<TStyle: BackendTextStyle>(
        &mut self,
        text: &str,
        style: &TStyle,
        pos: BackendCoord,
    ) -> Result<(), DrawingErrorKind<Infallible>> {
        let color = style.color();
        if color.alpha == 0.0 || text.is_empty() {
            return Ok(());
        }
        let size = style.size();
        let bold = matches!(style.style(), FontStyle::Bold);
        let (width, _) = text_extent(text, size, bold);

        let anchor = style.anchor();
        let dx = match anchor.h_pos {
            HPos::Left => 0.0,
            HPos::Center => -width / 2.0,
            HPos::Right => -width,
        };
        // Baseline relative to the anchor point, screen y pointing down.
        let dy = match anchor.v_pos {
            VPos::Top => 0.8 * size,
            VPos::Center => 0.3 * size,
            VPos::Bottom => -0.2 * size,
        };
        let (rotation_deg, (ox, oy)) = rotation(&style.transform(), dx, dy);
        let (x, y) = to_f64(pos);

        self.push(Primitive::Text {
            text: text.to_string(),
            pos: (x + ox, y + oy),
            size,
            color: color.into(),
            rotation_deg,
            bold,
        });
        Ok(())
    }

    fn estimate_text_size<TStyle: BackendTextStyle>(
        &self,
        text: &str,
        style: &TStyle,
    ) -> Result<(u32, u32), DrawingErrorKind<Infallible>> {
        let (w, h) = text_extent(text, style.size(), matches!(style.style(), FontStyle::Bold));
        Ok((w.ceil() as u32, h.ceil() as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotters::prelude::*;
    use plotters_backend::text_anchor::Pos;

    fn record(draw: impl FnOnce(&DrawingArea<RecordingBackend, plotters::coord::Shift>)) -> Vec<Primitive> {
        let recording = Recording::default();
        let root = RecordingBackend::new((200, 100), recording.clone()).into_drawing_area();
        draw(&root);
        recording.take()
    }

    #[test]
    fn filled_rect_becomes_polygon() {
        let primitives = record(|root| root.fill(&WHITE).unwrap());
        assert_eq!(primitives.len(), 1);
        assert!(matches!(
            &primitives[0],
            Primitive::Polygon { points, color } if points.len() == 4 && color.rgb == (255, 255, 255)
        ));
    }

    #[test]
    fn text_is_recorded_with_its_anchor() {
        let primitives = record(|root| {
            let style = ("sans-serif", 10)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(HPos::Right, VPos::Top));
            root.draw(&Text::new("100", (50, 20), style)).unwrap();
        });
        let Some(Primitive::Text { text, pos, size, .. }) = primitives.first() else {
            panic!("expected text, got {primitives:?}");
        };
        assert_eq!(text, "100");
        assert_eq!(*size, 10.0);
        assert!((pos.0 - (50.0 - 3.0 * 0.556 * 10.0)).abs() < 1e-9);
        assert!((pos.1 - 28.0).abs() < 1e-9);
    }

    #[test]
    fn transparent_strokes_are_dropped() {
        let primitives = record(|root| {
            root.draw(&PathElement::new(vec![(0, 0), (10, 10)], TRANSPARENT))
                .unwrap();
        });
        assert!(primitives.is_empty());
    }

    #[test]
    fn rotated_offsets() {
        assert_eq!(rotation(&FontTransform::Rotate270, 1.0, 2.0), (90.0, (2.0, -1.0)));
        assert_eq!(rotation(&FontTransform::None, 1.0, 2.0), (0.0, (1.0, 2.0)));
    }

    #[test]
    fn white_blend() {
        let half = Rgba {
            rgb: (0, 0, 0),
            alpha: 0.5,
        };
        assert_eq!(half.over_white(), (0.5, 0.5, 0.5));
        assert_eq!(Rgba::opaque((255, 0, 0)).over_white(), (1.0, 0.0, 0.0));
    }
}
