use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat};
use shared::{ImagePreview, accepted_extension};

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("Unsupported file type for {0}; upload a JPG, JPEG or PNG image")]
    UnsupportedFormat(String),
    #[error("Uploaded file is empty")]
    Empty,
    #[error("Could not decode image: {0}")]
    Decode(#[source] image::ImageError),
    #[error("Could not render preview: {0}")]
    Preview(#[source] image::ImageError),
}

/// An upload that passed the extension check and decoded cleanly.
pub struct UploadedImage {
    bytes: Vec<u8>,
    pixels: DynamicImage,
}

impl UploadedImage {
    pub fn decode(file_name: &str, bytes: Vec<u8>) -> Result<Self, IntakeError> {
        let extension = accepted_extension(file_name)
            .ok_or_else(|| IntakeError::UnsupportedFormat(file_name.to_string()))?;
        if bytes.is_empty() {
            return Err(IntakeError::Empty);
        }

        let pixels = image::load_from_memory(&bytes).map_err(IntakeError::Decode)?;
        log::info!(
            "Decoded {} ({}, {} bytes, {}x{})",
            file_name,
            extension,
            bytes.len(),
            pixels.width(),
            pixels.height()
        );

        Ok(Self { bytes, pixels })
    }

    /// The original upload, untouched.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Half-scale copy, rounded down and never smaller than 1x1.
    pub fn preview(&self) -> DynamicImage {
        let (width, height) = preview_dimensions(self.pixels.width(), self.pixels.height());
        self.pixels
            .resize_exact(width, height, FilterType::CatmullRom)
    }

    pub fn preview_payload(&self) -> Result<ImagePreview, IntakeError> {
        let preview = self.preview();
        let mut png = Cursor::new(Vec::new());
        preview
            .write_to(&mut png, ImageFormat::Png)
            .map_err(IntakeError::Preview)?;

        let (width, height) = self.dimensions();
        Ok(ImagePreview {
            width,
            height,
            preview_width: preview.width(),
            preview_height: preview.height(),
            data_url: format!("data:image/png;base64,{}", STANDARD.encode(png.into_inner())),
        })
    }
}

pub fn preview_dimensions(width: u32, height: u32) -> (u32, u32) {
    ((width / 2).max(1), (height / 2).max(1))
}
