/// ASCII rasterizer for morph frames
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use morph3d_core::{Camera, MorphedTriangle, NormalSegment};
use nalgebra::{Matrix4, Point3, Vector3};
use std::io::Write;

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Glyph used for normal-visualization segments
const NORMAL_GLYPH: char = '|';

/// Point light in world space
const LIGHT_POSITION: [f32; 3] = [0.0, 5.0, 5.0];
const AMBIENT: f32 = 0.25;
const DIFFUSE: f32 = 0.95;

/// Lets segments lying on their own face win the depth test
const SEGMENT_DEPTH_BIAS: f32 = 1e-3;

/// z-buffered character canvas
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.char_buffer.fill(' ');
    }

    pub fn render_frame(
        &mut self,
        frame: &[MorphedTriangle],
        model_matrix: &Matrix4<f32>,
        camera: &Camera,
    ) {
        for triangle in frame {
            self.render_triangle(triangle, model_matrix, camera);
        }
    }

    pub fn render_segments(
        &mut self,
        segments: &[NormalSegment],
        model_matrix: &Matrix4<f32>,
        camera: &Camera,
    ) {
        for segment in segments {
            let from = self.project(&segment.from, model_matrix, camera);
            let to = self.project(&segment.to, model_matrix, camera);
            if let (Some(from), Some(to)) = (from, to) {
                self.rasterize_line(from, to);
            }
        }
    }

    fn project(
        &self,
        point: &Point3<f32>,
        model_matrix: &Matrix4<f32>,
        camera: &Camera,
    ) -> Option<(f32, f32, f32)> {
        camera.project_to_screen(point, model_matrix, self.width as u32, self.height as u32)
    }

    fn render_triangle(
        &mut self,
        triangle: &MorphedTriangle,
        model_matrix: &Matrix4<f32>,
        camera: &Camera,
    ) {
        let mut screen_coords = [(0.0, 0.0, 0.0); 3];
        for (coords, point) in screen_coords.iter_mut().zip(&triangle.points) {
            match self.project(point, model_matrix, camera) {
                Some(projected) => *coords = projected,
                None => return, // Triangle is clipped
            }
        }

        let world_centroid = model_matrix.transform_point(&triangle.centroid());
        let world_normal = model_matrix.transform_vector(&triangle.normal);
        let character = shade(&world_normal, &world_centroid);

        self.rasterize_triangle(&screen_coords, character);
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32, f32); 3], character: char) {
        let [v0, v1, v2] = *coords;

        // Bounding box, clipped to the screen
        let min_x = (v0.0.min(v1.0).min(v2.0).floor() as i32).max(0);
        let max_x = (v0.0.max(v1.0).max(v2.0).ceil() as i32).min(self.width as i32 - 1);
        let min_y = (v0.1.min(v1.1).min(v2.1).floor() as i32).max(0);
        let max_y = (v0.1.max(v1.1).max(v2.1).ceil() as i32).min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                let Some((w0, w1, w2)) =
                    barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py))
                else {
                    continue;
                };

                if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                    let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                    self.plot(x as usize, y as usize, depth, character);
                }
            }
        }
    }

    /// Walk the segment one cell at a time, interpolating depth
    fn rasterize_line(&mut self, from: (f32, f32, f32), to: (f32, f32, f32)) {
        let dx = to.0 - from.0;
        let dy = to.1 - from.1;
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;

        for i in 0..=steps {
            let s = i as f32 / steps as f32;
            let x = from.0 + dx * s;
            let y = from.1 + dy * s;
            if x < 0.0 || y < 0.0 {
                continue;
            }
            let (x, y) = (x as usize, y as usize);
            if x >= self.width || y >= self.height {
                continue;
            }
            let depth = from.2 + (to.2 - from.2) * s - SEGMENT_DEPTH_BIAS;
            self.plot(x, y, depth, NORMAL_GLYPH);
        }
    }

    fn plot(&mut self, x: usize, y: usize, depth: f32, character: char) {
        let idx = y * self.width + x;
        if depth < self.depth_buffer[idx] {
            self.depth_buffer[idx] = depth;
            self.char_buffer[idx] = character;
        }
    }

    /// Character currently stored at a cell
    pub fn glyph(&self, x: usize, y: usize) -> Option<char> {
        if x < self.width && y < self.height {
            Some(self.char_buffer[y * self.width + x])
        } else {
            None
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current = None;
        for y in 0..self.height {
            for x in 0..self.width {
                let c = self.char_buffer[y * self.width + x];
                let color = glyph_color(c);
                if current != Some(color) {
                    writer.queue(SetForegroundColor(color))?;
                    current = Some(color);
                }
                writer.queue(Print(c))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Ambient plus Lambert shading mapped onto the luminosity ramp
fn shade(normal: &Vector3<f32>, position: &Point3<f32>) -> char {
    let light = Point3::from(LIGHT_POSITION);
    let to_light = (light - position).normalize();
    let lambert = normal.normalize().dot(&to_light).max(0.0);
    let brightness = (AMBIENT + DIFFUSE * lambert).clamp(0.0, 1.0);

    let index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32) as usize;
    LUMINOSITY_RAMP[index.min(LUMINOSITY_RAMP.len() - 1)]
}

fn glyph_color(c: char) -> Color {
    match c {
        NORMAL_GLYPH => Color::Blue,
        ' ' | '.' | ':' => Color::DarkGrey,
        '-' | '=' => Color::Grey,
        '+' | '*' => Color::White,
        '#' | '%' | '@' => Color::Cyan,
        _ => Color::White,
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facing_camera(z: f32) -> MorphedTriangle {
        MorphedTriangle {
            points: [
                Point3::new(-0.8, -0.8, z),
                Point3::new(0.8, -0.8, z),
                Point3::new(0.0, 0.8, z),
            ],
            normal: Vector3::z(),
            source_face: 0,
            target_face: None,
        }
    }

    fn count(renderer: &AsciiRenderer, glyph: char) -> usize {
        renderer.char_buffer.iter().filter(|&&c| c == glyph).count()
    }

    #[test]
    fn test_triangle_covers_screen_center() {
        let mut renderer = AsciiRenderer::new(40, 20);
        renderer.render_frame(&[facing_camera(0.0)], &Matrix4::identity(), &Camera::new(2.0));
        assert_ne!(renderer.glyph(20, 10), Some(' '));
        assert_eq!(renderer.glyph(0, 0), Some(' '));
    }

    #[test]
    fn test_nearer_triangle_wins_depth_test() {
        let camera = Camera::new(2.0);
        let model = Matrix4::identity();

        let mut lit_front = facing_camera(0.5);
        lit_front.normal = Vector3::new(0.0, 0.0, -1.0);
        let back = facing_camera(-0.5);

        let mut renderer = AsciiRenderer::new(40, 20);
        renderer.render_frame(&[lit_front, back], &model, &camera);
        let front_glyph = renderer.glyph(20, 10);

        let mut reversed = AsciiRenderer::new(40, 20);
        reversed.render_frame(&[back, lit_front], &model, &camera);
        assert_eq!(reversed.glyph(20, 10), front_glyph);
    }

    #[test]
    fn test_faces_turned_away_get_ambient_only() {
        let toward = shade(&Vector3::new(0.0, 1.0, 1.0), &Point3::origin());
        let away = shade(&Vector3::new(0.0, -1.0, -1.0), &Point3::origin());
        assert_eq!(away, ':');
        let rank = |c: char| LUMINOSITY_RAMP.iter().position(|&r| r == c).unwrap();
        assert!(rank(toward) > rank(away));
    }

    #[test]
    fn test_segments_draw_normal_glyph() {
        let mut renderer = AsciiRenderer::new(40, 20);
        let segment = NormalSegment {
            from: Point3::new(-0.5, 0.0, 0.0),
            to: Point3::new(0.5, 0.0, 0.0),
        };
        renderer.render_segments(&[segment], &Matrix4::identity(), &Camera::new(2.0));
        assert!(count(&renderer, NORMAL_GLYPH) >= 3);
    }

    #[test]
    fn test_clear_resets_buffers() {
        let mut renderer = AsciiRenderer::new(10, 6);
        renderer.render_frame(&[facing_camera(0.0)], &Matrix4::identity(), &Camera::new(1.0));
        renderer.clear();
        assert_eq!(count(&renderer, ' '), 60);
        assert!(renderer.depth_buffer.iter().all(|d| d.is_infinite()));
    }

    #[test]
    fn test_draw_writes_every_cell() {
        let renderer = AsciiRenderer::new(4, 2);
        let mut out = Vec::new();
        renderer.draw(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("    \r\n"));
    }

    #[test]
    fn test_degenerate_screen_triangle_has_no_coverage() {
        assert!(barycentric((0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (0.5, 0.5)).is_none());
    }
}
