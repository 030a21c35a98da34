//! PNG export of debug images.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use relief_terrain::DebugImage;

/// Errors from writing an image to disk.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("failed to create {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: png::EncodingError,
    },
}

/// Write `image` as an 8-bit RGBA PNG, creating parent directories as needed.
pub fn write_png(path: &Path, image: &DebugImage) -> Result<(), OutputError> {
    let io_err = |source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    };
    let encode_err = |source| OutputError::Encode {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }

    let file = File::create(path).map_err(io_err)?;
    let (width, height) = image.dimensions();
    let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header().map_err(encode_err)?;
    writer.write_image_data(&image.pixels).map_err(encode_err)?;
    writer.finish().map_err(encode_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_round_trips_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("maps").join("height.png");
        let mut image = DebugImage::new(3, 2);
        image.set_rgb(2, 1, (200, 100, 50));

        write_png(&path, &image).unwrap();

        let decoder = png::Decoder::new(File::open(&path).unwrap());
        let mut reader = decoder.read_info().unwrap();
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).unwrap();
        assert_eq!((info.width, info.height), (3, 2));
        assert_eq!(&buf[..info.buffer_size()], image.pixels.as_slice());
    }
}
