//! PNG logo decoding into an RGB image XObject

use crate::error::RenderError;
use lopdf::{dictionary, Stream};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// XObject resource name of the logo
pub const LOGO_RESOURCE: &str = "Logo";

/// Decoded 8-bit RGB pixels; alpha is composited onto white
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoImage {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

impl LogoImage {
    pub fn from_path(path: &Path) -> Result<Self, RenderError> {
        let fail = |message: String| RenderError::Logo {
            path: path.to_path_buf(),
            message,
        };

        let file = File::open(path).map_err(|e| fail(e.to_string()))?;
        Self::decode(BufReader::new(file)).map_err(fail)
    }

    pub fn decode<R: std::io::Read>(reader: R) -> Result<Self, String> {
        let mut decoder = png::Decoder::new(reader);
        decoder.set_transformations(png::Transformations::normalize_to_color8());
        let mut reader = decoder.read_info().map_err(|e| e.to_string())?;

        let mut buffer = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buffer).map_err(|e| e.to_string())?;
        let pixels = &buffer[..info.buffer_size()];

        let rgb = match info.color_type {
            png::ColorType::Rgb => pixels.to_vec(),
            png::ColorType::Rgba => pixels
                .chunks_exact(4)
                .flat_map(|p| [over_white(p[0], p[3]), over_white(p[1], p[3]), over_white(p[2], p[3])])
                .collect(),
            png::ColorType::Grayscale => pixels.iter().flat_map(|&g| [g, g, g]).collect(),
            png::ColorType::GrayscaleAlpha => pixels
                .chunks_exact(2)
                .flat_map(|p| {
                    let g = over_white(p[0], p[1]);
                    [g, g, g]
                })
                .collect(),
            png::ColorType::Indexed => {
                return Err("indexed color was not expanded".to_string());
            }
        };

        if info.width == 0 || info.height == 0 {
            return Err("image has no pixels".to_string());
        }

        Ok(Self {
            width: info.width,
            height: info.height,
            rgb,
        })
    }

    /// Size that fits in `max_width` x `max_height`, keeping the aspect ratio
    pub fn fit(&self, max_width: f32, max_height: f32) -> (f32, f32) {
        let scale = (max_width / self.width as f32).min(max_height / self.height as f32);
        (self.width as f32 * scale, self.height as f32 * scale)
    }

    pub fn to_stream(&self) -> Stream {
        Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => self.width as i64,
                "Height" => self.height as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
            },
            self.rgb.clone(),
        )
    }
}

fn over_white(channel: u8, alpha: u8) -> u8 {
    let a = alpha as u32;
    ((channel as u32 * a + 255 * (255 - a)) / 255) as u8
}
