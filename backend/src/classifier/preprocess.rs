use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, ImageFormat, ImageReader};
use ndarray::Array4;
use std::io::Cursor;

use super::error::ClassifierError;

/// A decoded upload, ready to be fed to the network.
#[derive(Debug, Clone)]
pub struct PreparedImage {
    /// `[1, size, size, 3]`, channels-last, values in `[0, 1]`.
    pub tensor: Array4<f32>,
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
}

pub fn decode(bytes: &[u8]) -> Result<(DynamicImage, ImageFormat), ClassifierError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| ClassifierError::Decode(e.to_string()))?;

    let format = match reader.format() {
        Some(format @ (ImageFormat::Png | ImageFormat::Jpeg)) => format,
        Some(other) => {
            return Err(ClassifierError::Decode(format!(
                "unsupported image format {:?}, expected JPEG or PNG",
                other
            )));
        }
        None => {
            return Err(ClassifierError::Decode(
                "data is not a recognizable image".to_string(),
            ));
        }
    };

    let decoded = reader.decode()?;
    Ok((decoded, format))
}

/// Decodes, coerces to RGB, resizes straight to `size`x`size` (no crop or
/// padding) and scales every channel by 1/255.
pub fn prepare(bytes: &[u8], size: u32) -> Result<PreparedImage, ClassifierError> {
    let (decoded, format) = decode(bytes)?;
    let (width, height) = decoded.dimensions();

    let rgb = decoded.to_rgb8();
    let resized = imageops::resize(&rgb, size, size, FilterType::CatmullRom);

    let side = size as usize;
    let tensor = Array4::from_shape_fn((1, side, side, 3), |(_, y, x, c)| {
        resized.get_pixel(x as u32, y as u32)[c] as f32 / 255.0
    });

    Ok(PreparedImage {
        tensor,
        width,
        height,
        format,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{encode, png_bytes};
    use image::{GrayImage, Luma, Rgb, RgbImage};

    #[test]
    fn single_pixel_png_is_upscaled_to_input_size() {
        let prepared = prepare(&png_bytes(1, 1, [255, 0, 0]), 150).unwrap();

        assert_eq!(prepared.tensor.shape(), &[1, 150, 150, 3]);
        assert_eq!((prepared.width, prepared.height), (1, 1));
        assert_eq!(prepared.format, ImageFormat::Png);
        assert!(prepared.tensor[[0, 75, 75, 0]] > 0.99);
        assert!(prepared.tensor[[0, 75, 75, 1]] < 0.01);
        assert!(prepared.tensor[[0, 149, 0, 2]] < 0.01);
    }

    #[test]
    fn values_are_scaled_into_unit_range() {
        let mut img = RgbImage::new(7, 3);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            *pixel = Rgb([(x * 36) as u8, (y * 120) as u8, 255]);
        }
        let bytes = encode(DynamicImage::ImageRgb8(img), ImageFormat::Png);
        let prepared = prepare(&bytes, 16).unwrap();

        assert!(prepared.tensor.iter().all(|v| (0.0..=1.0).contains(v)));
        assert!(prepared.tensor.iter().any(|v| *v > 0.9));
    }

    #[test]
    fn aspect_ratio_is_not_preserved() {
        // Red left half, blue right half. A crop or letterbox would move the
        // edge columns away from these colours.
        let img = RgbImage::from_fn(40, 10, |x, _| {
            if x < 20 {
                Rgb([255, 0, 0])
            } else {
                Rgb([0, 0, 255])
            }
        });
        let bytes = encode(DynamicImage::ImageRgb8(img), ImageFormat::Png);
        let prepared = prepare(&bytes, 32).unwrap();

        assert_eq!(prepared.tensor.shape(), &[1, 32, 32, 3]);
        assert_eq!((prepared.width, prepared.height), (40, 10));
        for y in 0..32 {
            let left = prepared.tensor[[0, y, 0, 0]];
            let right = prepared.tensor[[0, y, 31, 2]];
            assert!(left > 0.99 && prepared.tensor[[0, y, 0, 2]] < 0.01, "row {}", y);
            assert!(right > 0.99 && prepared.tensor[[0, y, 31, 0]] < 0.01, "row {}", y);
        }
    }

    #[test]
    fn grayscale_is_coerced_to_three_channels() {
        let gray = GrayImage::from_pixel(4, 4, Luma([128]));
        let bytes = encode(DynamicImage::ImageLuma8(gray), ImageFormat::Png);
        let prepared = prepare(&bytes, 8).unwrap();

        let expected = 128.0 / 255.0;
        for c in 0..3 {
            assert!((prepared.tensor[[0, 3, 3, c]] - expected).abs() < 0.01);
        }
    }

    #[test]
    fn jpeg_uploads_are_accepted() {
        let bytes = encode(
            DynamicImage::ImageRgb8(RgbImage::from_pixel(20, 20, Rgb([0, 200, 0]))),
            ImageFormat::Jpeg,
        );
        let prepared = prepare(&bytes, 10).unwrap();
        assert_eq!(prepared.format, ImageFormat::Jpeg);
        assert!(prepared.tensor[[0, 5, 5, 1]] > 0.7);
    }

    #[test]
    fn text_renamed_to_jpg_is_a_decode_error() {
        let err = prepare(b"just some notes, definitely not a picture\n", 150).unwrap_err();
        assert!(matches!(err, ClassifierError::Decode(_)));
    }

    #[test]
    fn empty_upload_is_a_decode_error() {
        assert!(matches!(prepare(&[], 150), Err(ClassifierError::Decode(_))));
    }

    #[test]
    fn truncated_png_is_a_decode_error() {
        let bytes = png_bytes(16, 16, [1, 2, 3]);
        let err = prepare(&bytes[..bytes.len() / 2], 150).unwrap_err();
        assert!(matches!(err, ClassifierError::Decode(_)));
    }

    #[test]
    fn other_raster_formats_are_rejected() {
        let bytes = encode(
            DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, Rgb([9, 9, 9]))),
            ImageFormat::Bmp,
        );
        let err = prepare(&bytes, 150).unwrap_err();
        assert!(matches!(err, ClassifierError::Decode(msg) if msg.contains("Bmp")));
    }
}
