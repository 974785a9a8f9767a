// flora_admin/src/services/images.rs

use crate::config::AppConfig;
use anyhow::Context as AnyhowContext;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;

pub const MAIN_JPEG_QUALITY: u8 = 82;
pub const THUMB_JPEG_QUALITY: u8 = 78;

#[derive(Debug, Clone, Copy)]
pub struct ImageSettings {
  pub main_max_width: u32,
  pub thumbnail_size: u32,
}

impl From<&AppConfig> for ImageSettings {
  fn from(config: &AppConfig) -> Self {
    Self {
      main_max_width: config.main_image_max_width,
      thumbnail_size: config.thumbnail_size,
    }
  }
}

/// JPEG-encoded renditions of one upload.
#[derive(Debug)]
pub struct ImageVariants {
  pub main: Vec<u8>,
  pub thumb: Vec<u8>,
}

fn encode_jpeg(image: &DynamicImage, quality: u8) -> anyhow::Result<Vec<u8>> {
  // JPEG has no alpha channel.
  let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
  let mut buf = Vec::new();
  rgb
    .write_with_encoder(JpegEncoder::new_with_quality(&mut buf, quality))
    .context("encoding JPEG")?;
  Ok(buf)
}

/// Decodes `bytes` and produces the main image (at most `main_max_width`
/// wide, never enlarged) and a square thumbnail cropped from the center.
///
/// CPU-bound; run it on a blocking thread.
pub fn optimize(bytes: &[u8], settings: &ImageSettings) -> anyhow::Result<ImageVariants> {
  let original = image::load_from_memory(bytes).context("decoding uploaded image")?;

  let main = if original.width() > settings.main_max_width {
    original.resize(settings.main_max_width, u32::MAX, FilterType::Lanczos3)
  } else {
    original.clone()
  };
  let thumb = original.resize_to_fill(settings.thumbnail_size, settings.thumbnail_size, FilterType::Lanczos3);

  Ok(ImageVariants {
    main: encode_jpeg(&main, MAIN_JPEG_QUALITY)?,
    thumb: encode_jpeg(&thumb, THUMB_JPEG_QUALITY)?,
  })
}
