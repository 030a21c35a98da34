//! Terrain debug renderers: colour-ramped heightmap and RGB normal map.

use super::image::DebugImage;
use crate::generator::Terrain;

/// Render the terrain's heights as a colour-coded elevation map.
///
/// Heights are normalized against the terrain's own [`HeightRange`], and
/// height zero is drawn as sea level: deep blue (ocean) → green (plains) →
/// brown (mountains) → white (snow peaks).
///
/// [`HeightRange`]: crate::HeightRange
pub fn render_heightmap_debug(terrain: &Terrain) -> DebugImage {
    let heights = &terrain.heights;
    let mut image = DebugImage::new(heights.columns() as u32, heights.rows() as u32);
    let sea_level = terrain.range.normalize(0.0);

    for (x, z, h) in heights.iter() {
        let color = height_to_color(terrain.range.normalize(h), sea_level);
        image.set_rgb(x as u32, z as u32, color);
    }

    image
}

/// Render the terrain's normals with each component mapped from `[-1, 1]`
/// into `[0, 255]`.
pub fn render_normal_map_debug(terrain: &Terrain) -> DebugImage {
    let normals = &terrain.normals;
    let mut image = DebugImage::new(normals.columns() as u32, normals.rows() as u32);
    let encode = |c: f32| ((c * 0.5 + 0.5).clamp(0.0, 1.0) * 255.0).round() as u8;

    for z in 0..normals.rows() {
        for x in 0..normals.columns() {
            let n = normals.get(x, z);
            image.set_rgb(x as u32, z as u32, (encode(n.x), encode(n.y), encode(n.z)));
        }
    }

    image
}

/// Map a normalized height `[0, 1]` to an RGB color, with `sea_level` the
/// normalized height of the shoreline.
///
/// Color bands: deep ocean → shallow ocean → beach → plains → mountains → snow.
pub fn height_to_color(normalized: f32, sea_level: f32) -> (u8, u8, u8) {
    if normalized < sea_level * 0.5 {
        // Deep ocean: dark blue
        (0, 0, 128)
    } else if normalized < sea_level {
        // Shallow ocean: blue
        (30, 80, 200)
    } else if normalized < sea_level + 0.02 {
        // Beach: sandy yellow
        (220, 200, 130)
    } else if normalized < 0.55 {
        let t = ((normalized - sea_level) / (0.55 - sea_level)).clamp(0.0, 1.0);
        (
            (30.0 + t * 80.0) as u8,
            (160.0 - t * 40.0) as u8,
            (30.0 + t * 20.0) as u8,
        )
    } else if normalized < 0.75 {
        let t = (normalized - 0.55) / 0.2;
        (
            (110.0 + t * 40.0) as u8,
            (120.0 - t * 50.0) as u8,
            (50.0 + t * 20.0) as u8,
        )
    } else {
        let t = ((normalized - 0.75) / 0.25).min(1.0);
        let base = 150.0 + t * 105.0;
        (base as u8, base as u8, base as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::Algorithm;
    use crate::generator::TerrainGenerator;
    use crate::params::GenerationParams;

    fn terrain(algorithm: Algorithm) -> Terrain {
        let mut generator =
            TerrainGenerator::new(32, 32, algorithm, GenerationParams::default(), 21).unwrap();
        generator.generate().unwrap().clone()
    }

    #[test]
    fn test_heightmap_one_pixel_per_vertex() {
        let image = render_heightmap_debug(&terrain(Algorithm::DiamondSquare));
        assert_eq!(image.dimensions(), (33, 33));
        assert!(image.pixels.chunks_exact(4).all(|p| p[3] == 255));
    }

    #[test]
    fn test_heightmap_has_several_bands() {
        let image = render_heightmap_debug(&terrain(Algorithm::MidpointDisplacement));
        assert!(
            image.unique_color_count() > 5,
            "expected a varied heightmap, got {} colors",
            image.unique_color_count()
        );
    }

    #[test]
    fn test_height_to_color_bands() {
        assert_eq!(height_to_color(0.0, 0.4), (0, 0, 128));
        assert_eq!(height_to_color(0.3, 0.4), (30, 80, 200));
        assert_eq!(height_to_color(0.41, 0.4), (220, 200, 130));
        assert_eq!(height_to_color(1.0, 0.4), (255, 255, 255));
    }

    #[test]
    fn test_flat_normal_map_is_uniform_up() {
        let mut params = GenerationParams::default();
        params.displacement.initial_range = 0.0;
        let mut generator =
            TerrainGenerator::new(8, 8, Algorithm::MidpointDisplacement, params, 0).unwrap();
        let image = render_normal_map_debug(generator.generate().unwrap());
        assert_eq!(image.unique_color_count(), 1);
        assert_eq!(image.get_pixel(4, 4), (128, 255, 128, 255));
    }
}
