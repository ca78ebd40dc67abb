//! PNG rendering of sampled point sets.
use std::path::Path;

use anyhow::Context;
use glam::Vec2;
use image::{Rgb, RgbImage};

/// Output image layout and colors.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Size of one tile in pixels.
    pub tile_size: (u32, u32),
    /// Number of tile repetitions along x and y.
    pub tiles: (u32, u32),
    pub background: [u8; 3],
    pub point_color: [u8; 3],
    /// Dot radius in pixels.
    pub point_radius: u32,
    /// Color of the one-pixel lines along tile borders, if drawn.
    pub tile_borders: Option<[u8; 3]>,
}

impl RenderConfig {
    pub fn new(tile_size: (u32, u32)) -> Self {
        Self {
            tile_size,
            tiles: (1, 1),
            background: [245, 245, 240],
            point_color: [30, 30, 30],
            point_radius: 2,
            tile_borders: None,
        }
    }

    pub fn with_tiles(mut self, x: u32, y: u32) -> Self {
        self.tiles = (x.max(1), y.max(1));
        self
    }

    pub fn with_point_style(mut self, color: [u8; 3], radius: u32) -> Self {
        self.point_color = color;
        self.point_radius = radius;
        self
    }

    pub fn with_tile_borders(mut self, color: [u8; 3]) -> Self {
        self.tile_borders = Some(color);
        self
    }

    fn image_size(&self) -> (u32, u32) {
        (
            self.tile_size.0 * self.tiles.0,
            self.tile_size.1 * self.tiles.1,
        )
    }
}

/// Renders points from the unit square, repeated over the configured tiles.
///
/// Dots wrap around the image edges, so the picture itself tiles.
pub fn render_unit_points_to_png(
    points: &[Vec2],
    config: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let (w, h) = config.image_size();
    let mut img = RgbImage::from_pixel(w, h, Rgb(config.background));

    let tile = Vec2::new(config.tile_size.0 as f32, config.tile_size.1 as f32);
    for ty in 0..config.tiles.1 {
        for tx in 0..config.tiles.0 {
            let origin = Vec2::new(tx as f32, ty as f32) * tile;
            for p in points {
                draw_disc(
                    &mut img,
                    origin + *p * tile,
                    config.point_radius,
                    config.point_color,
                );
            }
        }
    }

    if let Some(color) = config.tile_borders {
        draw_tile_borders(&mut img, config, color);
    }

    let path = path.as_ref();
    img.save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Renders points from a centered domain of the given extent into one tile.
pub fn render_domain_points_to_png(
    points: &[Vec2],
    domain_extent: Vec2,
    config: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let unit: Vec<Vec2> = points
        .iter()
        .map(|p| *p / domain_extent + Vec2::splat(0.5))
        .collect();
    render_unit_points_to_png(&unit, config, path)
}

fn draw_disc(img: &mut RgbImage, center: Vec2, radius: u32, color: [u8; 3]) {
    let (w, h) = (img.width() as i64, img.height() as i64);
    let r = radius as i64;
    let cx = center.x.floor() as i64;
    let cy = center.y.floor() as i64;

    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy > r * r {
                continue;
            }
            let x = (cx + dx).rem_euclid(w) as u32;
            let y = (cy + dy).rem_euclid(h) as u32;
            img.put_pixel(x, y, Rgb(color));
        }
    }
}

fn draw_tile_borders(img: &mut RgbImage, config: &RenderConfig, color: [u8; 3]) {
    let (w, h) = (img.width(), img.height());
    for tx in 1..config.tiles.0 {
        let x = tx * config.tile_size.0;
        for y in 0..h {
            img.put_pixel(x, y, Rgb(color));
        }
    }
    for ty in 1..config.tiles.1 {
        let y = ty * config.tile_size.1;
        for x in 0..w {
            img.put_pixel(x, y, Rgb(color));
        }
    }
}
