//! Retained raster surface that the animation loop draws onto.
//!
//! Lines are clipped to the surface and rasterized into an egui
//! [`ColorImage`]. Presented regions are queued so the viewer can upload only
//! the changed parts of the texture.

use egui::{Color32, ColorImage};
use glam::{DVec2, UVec2};
use lorenz_core::{
    animation::drain_events,
    display::{Display, Event, Poll},
    error::DisplayError,
    types::{Pixel, Region, Rgb},
};

/// What the texture needs after a frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Upload {
    Nothing,
    /// The whole image changed (first frame or resize).
    Full,
    Regions(Vec<Region>),
}

pub struct Canvas {
    image: ColorImage,
    background: Color32,
    events: Vec<Event>,
    closed: bool,
    needs_full_upload: bool,
    pending: Vec<Region>,
}

impl Canvas {
    pub fn new(size: UVec2, background: Color32) -> Self {
        Self {
            image: ColorImage::filled([size.x as usize, size.y as usize], background),
            background,
            events: Vec::new(),
            closed: false,
            needs_full_upload: true,
            pending: Vec::new(),
        }
    }

    /// Changes the surface size, keeping the overlapping part of the trace.
    pub fn resize(&mut self, size: UVec2) {
        if size == self.size() {
            return;
        }
        let [old_w, old_h] = self.image.size;
        let [new_w, new_h] = [size.x as usize, size.y as usize];
        let mut image = ColorImage::filled([new_w, new_h], self.background);
        for y in 0..old_h.min(new_h) {
            let w = old_w.min(new_w);
            image.pixels[y * new_w..y * new_w + w]
                .copy_from_slice(&self.image.pixels[y * old_w..y * old_w + w]);
        }
        self.image = image;
        self.needs_full_upload = true;
        self.pending.clear();
    }

    pub fn push_event(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Marks the event source as closed; the next poll reports it.
    pub fn mark_closed(&mut self) {
        self.closed = true;
    }

    pub fn image(&self) -> &ColorImage {
        &self.image
    }

    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> Color32 {
        self.image.pixels[y as usize * self.image.size[0] + x as usize]
    }

    /// Copies `region` out of the raster. `region` must lie on the surface.
    pub fn sub_image(&self, region: &Region) -> ColorImage {
        let [w, h] = [region.width() as usize, region.height() as usize];
        let stride = self.image.size[0];
        let (x0, y0) = (region.min.x as usize, region.min.y as usize);

        let mut sub = ColorImage::filled([w, h], self.background);
        for row in 0..h {
            let src = (y0 + row) * stride + x0;
            sub.pixels[row * w..(row + 1) * w].copy_from_slice(&self.image.pixels[src..src + w]);
        }
        sub
    }

    /// Returns and clears what must be sent to the texture.
    pub fn take_upload(&mut self) -> Upload {
        if self.needs_full_upload {
            self.needs_full_upload = false;
            self.pending.clear();
            Upload::Full
        } else if self.pending.is_empty() {
            Upload::Nothing
        } else {
            Upload::Regions(std::mem::take(&mut self.pending))
        }
    }

    fn plot(&mut self, x: i32, y: i32, color: Color32) {
        let idx = y as usize * self.image.size[0] + x as usize;
        self.image.pixels[idx] = color;
    }
}

impl Display for Canvas {
    fn size(&self) -> UVec2 {
        UVec2::new(self.image.size[0] as u32, self.image.size[1] as u32)
    }

    fn draw_line(&mut self, from: Pixel, to: Pixel, color: Rgb) -> Option<Region> {
        let (a, b) = clip_segment(from, to, self.size())?;
        let color = Color32::from_rgb(color.0, color.1, color.2);
        for_each_line_pixel(a, b, |x, y| self.plot(x, y, color));
        Some(Region::spanning(a, b))
    }

    fn present(&mut self, regions: &[Region]) -> Result<(), DisplayError> {
        self.pending.extend_from_slice(regions);
        Ok(())
    }

    fn poll_events(&mut self) -> Poll {
        drain_events(&mut self.events, self.closed)
    }

    fn close(&mut self) {
        self.events.clear();
        self.pending.clear();
    }
}

/// Clips the segment `a`–`b` to `[0, size)` using Liang–Barsky.
///
/// Returns `None` when no part of the segment is on the surface.
pub fn clip_segment(a: Pixel, b: Pixel, size: UVec2) -> Option<(Pixel, Pixel)> {
    if size.x == 0 || size.y == 0 {
        return None;
    }
    let max = (size - UVec2::ONE).as_dvec2();
    let (pa, pb) = (a.as_dvec2(), b.as_dvec2());
    let d = pb - pa;

    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    for (p, q) in [
        (-d.x, pa.x),
        (d.x, max.x - pa.x),
        (-d.y, pa.y),
        (d.y, max.y - pa.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    let at = |t: f64| (pa + d * t).round().clamp(DVec2::ZERO, max).as_ivec2();
    Some((at(t0), at(t1)))
}

/// Visits every pixel of the line from `a` to `b` (Bresenham), endpoints included.
pub fn for_each_line_pixel(a: Pixel, b: Pixel, mut visit: impl FnMut(i32, i32)) {
    let dx = (b.x - a.x).abs();
    let dy = -(b.y - a.y).abs();
    let sx = if a.x < b.x { 1 } else { -1 };
    let sy = if a.y < b.y { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (a.x, a.y);

    loop {
        visit(x, y);
        if x == b.x && y == b.y {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BG: Color32 = Color32::BLACK;
    const ORANGE: Rgb = Rgb(255, 165, 0);

    fn line_pixels(a: Pixel, b: Pixel) -> Vec<(i32, i32)> {
        let mut out = Vec::new();
        for_each_line_pixel(a, b, |x, y| out.push((x, y)));
        out
    }

    #[test]
    fn bresenham_horizontal_diagonal_and_point() {
        assert_eq!(
            line_pixels(Pixel::new(0, 0), Pixel::new(3, 0)),
            vec![(0, 0), (1, 0), (2, 0), (3, 0)]
        );
        assert_eq!(
            line_pixels(Pixel::new(2, 2), Pixel::new(0, 0)),
            vec![(2, 2), (1, 1), (0, 0)]
        );
        assert_eq!(line_pixels(Pixel::new(5, 5), Pixel::new(5, 5)), vec![(5, 5)]);
    }

    #[test]
    fn bresenham_steep_line_is_connected() {
        let pts = line_pixels(Pixel::new(0, 0), Pixel::new(2, 7));
        assert_eq!(pts.len(), 8);
        for w in pts.windows(2) {
            assert!((w[1].0 - w[0].0).abs() <= 1);
            assert_eq!(w[1].1 - w[0].1, 1);
        }
    }

    #[test]
    fn clip_keeps_inside_segments() {
        let size = UVec2::new(10, 10);
        let (a, b) = (Pixel::new(1, 2), Pixel::new(8, 9));
        assert_eq!(clip_segment(a, b, size), Some((a, b)));
    }

    #[test]
    fn clip_trims_to_surface() {
        let size = UVec2::new(10, 10);
        assert_eq!(
            clip_segment(Pixel::new(-5, 5), Pixel::new(20, 5), size),
            Some((Pixel::new(0, 5), Pixel::new(9, 5)))
        );
        assert_eq!(
            clip_segment(Pixel::new(5, 5), Pixel::new(5, 1000), size),
            Some((Pixel::new(5, 5), Pixel::new(5, 9)))
        );
    }

    #[test]
    fn clip_rejects_offscreen_segments() {
        let size = UVec2::new(10, 10);
        assert_eq!(clip_segment(Pixel::new(-5, -5), Pixel::new(-1, 20), size), None);
        assert_eq!(clip_segment(Pixel::new(10, 0), Pixel::new(10, 9), size), None);
        assert_eq!(clip_segment(Pixel::new(3, 3), Pixel::new(3, 3), UVec2::ZERO), None);
    }

    #[test]
    fn clip_handles_saturated_coordinates() {
        let size = UVec2::new(100, 100);
        let clipped = clip_segment(Pixel::new(50, 50), Pixel::new(i32::MAX, 50), size);
        assert_eq!(clipped, Some((Pixel::new(50, 50), Pixel::new(99, 50))));
        assert_eq!(
            clip_segment(Pixel::new(i32::MIN, i32::MIN), Pixel::new(i32::MIN, 0), size),
            None
        );
    }

    #[test]
    fn draw_line_paints_and_reports_region() {
        let mut canvas = Canvas::new(UVec2::new(8, 8), BG);
        let region = canvas.draw_line(Pixel::new(1, 1), Pixel::new(4, 1), ORANGE);

        assert_eq!(region, Some(Region::spanning(Pixel::new(1, 1), Pixel::new(4, 1))));
        let orange = Color32::from_rgb(255, 165, 0);
        for x in 1..=4 {
            assert_eq!(canvas.pixel(x, 1), orange);
        }
        assert_eq!(canvas.pixel(0, 1), BG);
        assert_eq!(canvas.pixel(5, 1), BG);
    }

    #[test]
    fn offscreen_line_draws_nothing() {
        let mut canvas = Canvas::new(UVec2::new(8, 8), BG);
        assert_eq!(canvas.draw_line(Pixel::new(-10, -10), Pixel::new(-1, -3), ORANGE), None);
        assert!(canvas.image().pixels.iter().all(|&p| p == BG));
    }

    #[test]
    fn upload_is_full_first_then_partial() {
        let mut canvas = Canvas::new(UVec2::new(8, 8), BG);
        assert_eq!(canvas.take_upload(), Upload::Full);
        assert_eq!(canvas.take_upload(), Upload::Nothing);

        let r = canvas
            .draw_line(Pixel::new(0, 0), Pixel::new(2, 2), ORANGE)
            .unwrap();
        canvas.present(&[r]).unwrap();
        assert_eq!(canvas.take_upload(), Upload::Regions(vec![r]));
        assert_eq!(canvas.take_upload(), Upload::Nothing);
    }

    #[test]
    fn sub_image_copies_region() {
        let mut canvas = Canvas::new(UVec2::new(6, 6), BG);
        let r = canvas
            .draw_line(Pixel::new(2, 3), Pixel::new(4, 3), ORANGE)
            .unwrap();
        let sub = canvas.sub_image(&r);
        assert_eq!(sub.size, [3, 1]);
        assert!(sub.pixels.iter().all(|&p| p == Color32::from_rgb(255, 165, 0)));
    }

    #[test]
    fn resize_preserves_overlap_and_requests_full_upload() {
        let mut canvas = Canvas::new(UVec2::new(4, 4), BG);
        canvas.take_upload();
        canvas.draw_line(Pixel::new(0, 0), Pixel::new(3, 3), ORANGE);

        canvas.resize(UVec2::new(6, 2));
        assert_eq!(canvas.size(), UVec2::new(6, 2));
        let orange = Color32::from_rgb(255, 165, 0);
        assert_eq!(canvas.pixel(0, 0), orange);
        assert_eq!(canvas.pixel(1, 1), orange);
        assert_eq!(canvas.pixel(5, 1), BG);
        assert_eq!(canvas.take_upload(), Upload::Full);
    }

    #[test]
    fn events_are_drained_then_closed() {
        let mut canvas = Canvas::new(UVec2::new(2, 2), BG);
        assert_eq!(canvas.poll_events(), Poll::Events(Vec::new()));

        canvas.push_event(Event::Other);
        canvas.push_event(Event::KeyPress);
        canvas.mark_closed();
        assert_eq!(
            canvas.poll_events(),
            Poll::Events(vec![Event::Other, Event::KeyPress])
        );
        assert_eq!(canvas.poll_events(), Poll::Closed);
    }
}
