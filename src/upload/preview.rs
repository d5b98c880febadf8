//! Image preview decoding
//!
//! Runs off the event loop on the blocking pool. The result carries the
//! full file as a `data:` URL plus a small RGB grid the TUI draws with
//! half-block characters (two pixel rows per terminal row).

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use std::path::PathBuf;

/// Thumbnail bounds in pixels
pub const THUMB_COLS: u32 = 32;
pub const THUMB_ROWS: u32 = 16;

/// Downscaled RGB pixels, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[u8; 3]>,
}

impl Thumbnail {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }
}

/// Decoded preview of an accepted image
#[derive(Debug, Clone)]
pub struct Preview {
    pub width: u32,
    pub height: u32,
    pub format: &'static str,
    pub data_url: String,
    pub thumbnail: Thumbnail,
}

/// Read and decode `path` on the blocking pool
pub async fn load(path: PathBuf) -> Result<Preview> {
    tokio::task::spawn_blocking(move || {
        let bytes =
            std::fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
        decode(&bytes)
    })
    .await
    .context("preview task panicked")?
}

/// Decode image bytes into a preview
pub fn decode(bytes: &[u8]) -> Result<Preview> {
    let format = image::guess_format(bytes).context("unrecognized image format")?;
    let img = image::load_from_memory_with_format(bytes, format).context("decoding image")?;

    let thumb = img.thumbnail(THUMB_COLS, THUMB_ROWS).to_rgb8();
    let thumbnail = Thumbnail {
        width: thumb.width(),
        height: thumb.height(),
        pixels: thumb.pixels().map(|p| p.0).collect(),
    };

    Ok(Preview {
        width: img.width(),
        height: img.height(),
        format: format_label(format),
        data_url: format!("data:{};base64,{}", format.to_mime_type(), BASE64.encode(bytes)),
        thumbnail,
    })
}

fn format_label(format: image::ImageFormat) -> &'static str {
    match format {
        image::ImageFormat::Png => "PNG",
        image::ImageFormat::Jpeg => "JPEG",
        image::ImageFormat::Gif => "GIF",
        image::ImageFormat::WebP => "WebP",
        _ => "image",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red_png(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::from_pixel(width, height, image::Rgb([235, 27, 38]));
        let mut buf = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_decode_png() {
        let bytes = red_png(64, 16);
        let preview = decode(&bytes).unwrap();

        assert_eq!(preview.width, 64);
        assert_eq!(preview.height, 16);
        assert_eq!(preview.format, "PNG");
        assert!(preview.data_url.starts_with("data:image/png;base64,"));

        // Aspect ratio kept inside the bounds
        assert_eq!(preview.thumbnail.width, THUMB_COLS);
        assert_eq!(preview.thumbnail.height, 8);
        assert_eq!(preview.thumbnail.pixel(0, 0), Some([235, 27, 38]));
        assert_eq!(preview.thumbnail.pixel(THUMB_COLS, 0), None);
    }

    #[test]
    fn test_decode_rejects_non_images() {
        assert!(decode(b"%PDF-1.7 not an image").is_err());
        assert!(decode(&[]).is_err());
    }

    #[tokio::test]
    async fn test_load_from_disk() {
        let path = std::env::temp_dir().join(format!("luxscale-preview-{}.png", std::process::id()));
        std::fs::write(&path, red_png(4, 4)).unwrap();

        let preview = load(path.clone()).await.unwrap();
        assert_eq!((preview.width, preview.height), (4, 4));

        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let err = load(PathBuf::from("/no/such/sketch.png")).await.unwrap_err();
        assert!(err.to_string().contains("reading"));
    }
}
