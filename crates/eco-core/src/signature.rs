//! Handwritten signature capture.
//!
//! A [`SignaturePad`] is a raster surface addressed in display coordinates.
//! It renders at twice the display resolution; callers never see the
//! backing scale. Every finished stroke produces a PNG data URL payload,
//! which is what a record stores as the signature.

use std::io::Cursor;

use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_circle_mut;
use tracing::debug;

use crate::error::SignatureError;
use crate::media::DataUrl;

/// Backing pixels per display pixel.
pub const SCALE: u32 = 2;

/// Stroke width in display pixels.
pub const LINE_WIDTH: f32 = 2.5;

const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Identifies the mouse, pen or finger driving a stroke.
pub type PointerId = u64;

#[derive(Debug, Clone, Copy)]
struct ActiveStroke {
    pointer: PointerId,
    last: (f32, f32),
}

#[derive(Debug, Clone)]
pub struct SignaturePad {
    width: u32,
    height: u32,
    surface: RgbaImage,
    active: Option<ActiveStroke>,
    payload: String,
}

impl SignaturePad {
    /// Blank pad of `width` x `height` display pixels.
    pub fn new(width: u32, height: u32) -> Result<Self, SignatureError> {
        if width == 0 || height == 0 {
            return Err(SignatureError::InvalidSize { width, height });
        }
        Ok(Self {
            width,
            height,
            surface: RgbaImage::new(width * SCALE, height * SCALE),
            active: None,
            payload: String::new(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The backing raster, `SCALE` times the display size.
    pub fn surface(&self) -> &RgbaImage {
        &self.surface
    }

    /// Last emitted payload; empty when unsigned.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn is_drawing(&self) -> bool {
        self.active.is_some()
    }

    /// Whether the surface has no ink at all.
    pub fn is_blank(&self) -> bool {
        self.surface.pixels().all(|pixel| pixel[3] == 0)
    }

    /// Start a stroke at a display point. A new pointer takes over from any
    /// stroke already in progress.
    pub fn begin_stroke(&mut self, pointer: PointerId, x: f32, y: f32) {
        self.active = Some(ActiveStroke {
            pointer,
            last: (x, y),
        });
    }

    /// Extend the active stroke to a display point.
    ///
    /// Returns `false` and draws nothing when `pointer` is not the one
    /// driving the current stroke.
    pub fn move_to(&mut self, pointer: PointerId, x: f32, y: f32) -> bool {
        let Some(stroke) = self.active.as_mut() else {
            return false;
        };
        if stroke.pointer != pointer {
            return false;
        }
        let from = stroke.last;
        stroke.last = (x, y);
        self.draw_segment(from, (x, y));
        true
    }

    /// Finish the stroke and emit the surface as a PNG data URL.
    pub fn end_stroke(&mut self) -> Result<String, SignatureError> {
        self.active = None;
        let mut bytes = Vec::new();
        self.surface
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        self.payload = DataUrl::png(bytes).to_string();
        debug!(bytes = self.payload.len(), "signature stroke captured");
        Ok(self.payload.clone())
    }

    /// Wipe the surface. Returns the empty payload.
    pub fn clear(&mut self) -> String {
        self.surface = RgbaImage::new(self.width * SCALE, self.height * SCALE);
        self.active = None;
        self.payload.clear();
        String::new()
    }

    /// Re-render an existing payload, scaled to this pad.
    ///
    /// An empty payload clears the pad.
    pub fn seed(&mut self, payload: &str) -> Result<(), SignatureError> {
        if payload.is_empty() {
            self.clear();
            return Ok(());
        }
        let url = DataUrl::parse(payload)?;
        let decoded = image::load_from_memory(&url.data)?.to_rgba8();
        self.surface = imageops::resize(
            &decoded,
            self.width * SCALE,
            self.height * SCALE,
            FilterType::Triangle,
        );
        self.active = None;
        self.payload = payload.to_string();
        Ok(())
    }

    fn draw_segment(&mut self, from: (f32, f32), to: (f32, f32)) {
        let scale = SCALE as f32;
        let radius = (LINE_WIDTH * scale / 2.0).floor() as i32;
        // Discs centred further out than `radius` leave no ink.
        let margin = radius as f32 + 1.0;
        let bounds = (
            (-margin, -margin),
            (self.surface.width() as f32 + margin, self.surface.height() as f32 + margin),
        );
        let Some(((x0, y0), (x1, y1))) = clip_segment(
            (from.0 * scale, from.1 * scale),
            (to.0 * scale, to.1 * scale),
            bounds,
        ) else {
            return;
        };

        // Round caps and joins: stamp a disc at every backing pixel step.
        let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0) as u32;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = x0 + (x1 - x0) * t;
            let y = y0 + (y1 - y0) * t;
            draw_filled_circle_mut(
                &mut self.surface,
                (x.round() as i32, y.round() as i32),
                radius,
                INK,
            );
        }
    }
}

type Point = (f32, f32);

/// Liang-Barsky clip of the segment `from`-`to` to the rectangle
/// `(min, max)`. `None` when nothing of it lies inside, or when an endpoint
/// is not finite.
fn clip_segment(from: Point, to: Point, (min, max): (Point, Point)) -> Option<(Point, Point)> {
    if ![from.0, from.1, to.0, to.1].iter().all(|v| v.is_finite()) {
        return None;
    }
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let (mut enter, mut exit) = (0.0_f32, 1.0_f32);
    for (p, q) in [
        (-dx, from.0 - min.0),
        (dx, max.0 - from.0),
        (-dy, from.1 - min.1),
        (dy, max.1 - from.1),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            enter = enter.max(t);
        } else {
            exit = exit.min(t);
        }
    }
    if enter > exit {
        return None;
    }
    Some((
        (from.0 + dx * enter, from.1 + dy * enter),
        (from.0 + dx * exit, from.1 + dy * exit),
    ))
}
