//! Dual-plane canvas
//!
//! [`Composer`] draws onto two independent [`InkMask`]s, one per ink plane,
//! both [`WIDTH`] × [`HEIGHT`]. Every operation names the plane it draws on
//! and never touches the other one. Overlap is left alone: the panel shows red
//! where both planes carry ink, and [`Composer::preview`] renders the same
//! rule.
//!
//! ## Example
//!
//! ```
//! use embedded_graphics::prelude::{Point, Size};
//! use epd2in7b::composer::{Composer, LabelStyle, ProgressBar};
//! use epd2in7b::Plane;
//!
//! let mut canvas = Composer::new();
//! canvas.text_centered(4, "STATUS", 20, Plane::Black);
//! canvas.hline(28, Plane::Black);
//! canvas.label_value(Point::new(4, 36), "CPU", "91%", &LabelStyle::default());
//! canvas.progress_bar(&ProgressBar::new(Point::new(4, 52), Size::new(120, 10), 91.0));
//!
//! let (black, red) = canvas.result();
//! assert!(!black.is_blank());
//! assert!(!red.is_blank());
//! ```

use alloc::vec::Vec;

use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Ellipse, Line, PrimitiveStyle, Rectangle},
};

use crate::color::{Color, Plane};
use crate::config::{HEIGHT, WIDTH};
use crate::error::InputError;
use crate::font::{Glyphs, MonoGlyphs};
use crate::mask::InkMask;

/// Fill percentage at which a progress bar escalates to red
pub const DEFAULT_CRITICAL_THRESHOLD: f32 = 85.0;

/// Gap between right-aligned text and the canvas edge
pub const DEFAULT_RIGHT_MARGIN: i32 = 4;

/// Inset of a default horizontal divider from each canvas edge
pub const DIVIDER_INSET: i32 = 4;

/// Placement of a label/value pair
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelStyle {
    /// Glyph size of the label
    pub label_size: u32,
    /// Glyph size of the value
    pub value_size: u32,
    /// Plane the label is drawn on
    pub label_plane: Plane,
    /// Plane the value is drawn on
    pub value_plane: Plane,
    /// Pixels between label and value
    pub gap: i32,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            label_size: 10,
            value_size: 10,
            label_plane: Plane::Red,
            value_plane: Plane::Black,
            gap: 3,
        }
    }
}

/// A progress bar to draw
///
/// The outline always goes on the black plane. The fill goes on `plane`, or
/// on the red plane once `percent` reaches `critical_threshold`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressBar {
    /// Top-left corner of the outline
    pub top_left: Point,
    /// Outline extent; the outline spans `size + 1` pixels in each axis
    pub size: Size,
    /// Fill level, clamped to at most 100
    pub percent: f32,
    /// Plane for a non-critical fill
    pub plane: Plane,
    /// Escalation threshold
    pub critical_threshold: f32,
}

impl ProgressBar {
    /// Bar on the black plane with the default threshold
    pub fn new(top_left: Point, size: Size, percent: f32) -> Self {
        Self {
            top_left,
            size,
            percent,
            plane: Plane::Black,
            critical_threshold: DEFAULT_CRITICAL_THRESHOLD,
        }
    }

    /// Set the plane for a non-critical fill
    pub fn plane(mut self, plane: Plane) -> Self {
        self.plane = plane;
        self
    }

    /// Set the escalation threshold
    pub fn critical_threshold(mut self, threshold: f32) -> Self {
        self.critical_threshold = threshold;
        self
    }

    /// Plane the fill lands on
    pub fn fill_plane(&self) -> Plane {
        if self.percent >= self.critical_threshold {
            Plane::Red
        } else {
            self.plane
        }
    }

    /// Width of the fill in pixels
    pub fn fill_width(&self) -> i32 {
        let inner = self.size.width as f32 - 2.0;
        ((inner * self.percent.min(100.0) / 100.0) as i32).max(0)
    }
}

/// Canvas holding the black and red ink planes
pub struct Composer<G: Glyphs = MonoGlyphs> {
    black: InkMask,
    red: InkMask,
    glyphs: G,
}

impl Composer<MonoGlyphs> {
    /// Blank canvas using the built-in font
    pub fn new() -> Self {
        Self::with_glyphs(MonoGlyphs)
    }
}

impl Default for Composer<MonoGlyphs> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Glyphs> Composer<G> {
    /// Blank canvas using `glyphs` for text
    pub fn with_glyphs(glyphs: G) -> Self {
        Self {
            black: InkMask::new(WIDTH, HEIGHT),
            red: InkMask::new(WIDTH, HEIGHT),
            glyphs,
        }
    }

    /// Read one plane
    pub fn plane(&self, plane: Plane) -> &InkMask {
        match plane {
            Plane::Black => &self.black,
            Plane::Red => &self.red,
        }
    }

    /// Mutable access to one plane, for drawing with embedded-graphics directly
    pub fn plane_mut(&mut self, plane: Plane) -> &mut InkMask {
        match plane {
            Plane::Black => &mut self.black,
            Plane::Red => &mut self.red,
        }
    }

    /// Remove all ink from both planes
    pub fn clear(&mut self) {
        self.black.fill(false);
        self.red.fill(false);
    }

    /// Ink a single pixel
    pub fn point(&mut self, at: Point, plane: Plane) {
        self.draw(Pixel(at, BinaryColor::On), plane);
    }

    /// Line between two points, `width` pixels thick
    pub fn line(&mut self, start: Point, end: Point, width: u32, plane: Plane) {
        let style = PrimitiveStyle::with_stroke(BinaryColor::On, width.max(1));
        self.draw(Line::new(start, end).into_styled(style), plane);
    }

    /// Rectangle spanning both corners inclusively
    pub fn rect(&mut self, corner: Point, opposite: Point, plane: Plane, fill: bool) {
        let style = shape_style(fill);
        self.draw(Rectangle::with_corners(corner, opposite).into_styled(style), plane);
    }

    /// Ellipse inscribed in the rectangle spanning both corners inclusively
    pub fn ellipse(&mut self, corner: Point, opposite: Point, plane: Plane, fill: bool) {
        let bounds = Rectangle::with_corners(corner, opposite);
        let style = shape_style(fill);
        self.draw(Ellipse::new(bounds.top_left, bounds.size).into_styled(style), plane);
    }

    /// Full-width divider, inset from both edges
    pub fn hline(&mut self, y: i32, plane: Plane) {
        self.hline_span(y, DIVIDER_INSET, WIDTH as i32 - DIVIDER_INSET, plane);
    }

    /// Divider between two columns
    pub fn hline_span(&mut self, y: i32, x0: i32, x1: i32, plane: Plane) {
        self.line(Point::new(x0, y), Point::new(x1, y), 1, plane);
    }

    /// Width of `text` at `size`
    pub fn text_width(&self, text: &str, size: u32) -> u32 {
        self.glyphs.measure(text, size).unwrap_or_else(|e| {
            log::warn!("Glyph measurement failed ({e}), using built-in font");
            MonoGlyphs::width(text, size)
        })
    }

    /// Text with its top-left corner at `origin`
    pub fn text(&mut self, origin: Point, text: &str, size: u32, plane: Plane) {
        let target = match plane {
            Plane::Black => &mut self.black,
            Plane::Red => &mut self.red,
        };
        if let Err(e) = self.glyphs.rasterize(text, origin, size, target) {
            log::warn!("Glyph rendering failed ({e}), using built-in font");
            MonoGlyphs::draw(text, origin, size, target);
        }
    }

    /// Text centered horizontally on the canvas
    pub fn text_centered(&mut self, y: i32, text: &str, size: u32, plane: Plane) {
        let x = (WIDTH as i32 - self.text_width(text, size) as i32).div_euclid(2);
        self.text(Point::new(x, y), text, size, plane);
    }

    /// Text flush right with the default margin
    pub fn text_right(&mut self, y: i32, text: &str, size: u32, plane: Plane) {
        self.text_right_margin(y, text, size, plane, DEFAULT_RIGHT_MARGIN);
    }

    /// Text flush right, `margin` pixels from the edge
    pub fn text_right_margin(
        &mut self,
        y: i32,
        text: &str,
        size: u32,
        plane: Plane,
        margin: i32,
    ) {
        let x = WIDTH as i32 - self.text_width(text, size) as i32 - margin;
        self.text(Point::new(x, y), text, size, plane);
    }

    /// Label followed by its value, each on its own plane
    pub fn label_value(&mut self, origin: Point, label: &str, value: &str, style: &LabelStyle) {
        self.text(origin, label, style.label_size, style.label_plane);
        let offset = self.text_width(label, style.label_size) as i32 + style.gap;
        self.text(
            origin + Point::new(offset, 0),
            value,
            style.value_size,
            style.value_plane,
        );
    }

    /// Outlined bar filled in proportion to its percentage
    pub fn progress_bar(&mut self, bar: &ProgressBar) {
        let Point { x, y } = bar.top_left;
        let w = bar.size.width as i32;
        let h = bar.size.height as i32;

        self.rect(Point::new(x, y), Point::new(x + w, y + h), Plane::Black, false);

        let fill_w = bar.fill_width();
        if fill_w > 0 {
            self.rect(
                Point::new(x + 1, y + 1),
                Point::new(x + 1 + fill_w, y + h - 1),
                bar.fill_plane(),
                true,
            );
        }
    }

    /// Paste a precomputed mask pair with its top-left corner at `origin`
    ///
    /// Covered pixels are replaced on both planes.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::DimensionMismatch`] if the two masks differ in
    /// size. Nothing is pasted.
    pub fn paste(
        &mut self,
        black: &InkMask,
        red: &InkMask,
        origin: Point,
    ) -> Result<(), InputError> {
        let (width, height) = black.size();
        red.check_size(width, height)?;
        self.black.paste(black, origin.x, origin.y);
        self.red.paste(red, origin.x, origin.y);
        Ok(())
    }

    /// Both planes as (black, red)
    pub fn masks(&self) -> (&InkMask, &InkMask) {
        (&self.black, &self.red)
    }

    /// Consume the canvas, yielding (black, red)
    pub fn result(self) -> (InkMask, InkMask) {
        (self.black, self.red)
    }

    /// Row-major colors as the panel would show them
    ///
    /// Red ink wins over black ink at the same pixel.
    pub fn preview(&self) -> Vec<Color> {
        self.black
            .as_slice()
            .iter()
            .zip(self.red.as_slice())
            .map(|(black, red)| match (*black, *red) {
                (_, true) => Color::Red,
                (true, false) => Color::Black,
                (false, false) => Color::White,
            })
            .collect()
    }

    fn draw<D>(&mut self, drawable: D, plane: Plane)
    where
        D: Drawable<Color = BinaryColor>,
    {
        let Ok(_) = drawable.draw(self.plane_mut(plane));
    }
}

fn shape_style(fill: bool) -> PrimitiveStyle<BinaryColor> {
    if fill {
        PrimitiveStyle::with_fill(BinaryColor::On)
    } else {
        PrimitiveStyle::with_stroke(BinaryColor::On, 1)
    }
}
