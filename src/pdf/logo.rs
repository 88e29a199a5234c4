//! Logo loading and embedding
//!
//! The logo is decoded with the `image` crate and stored as a DeviceRGB
//! image XObject. Transparency goes into a separate DeviceGray soft mask.

use std::path::PathBuf;
use std::time::Duration;

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use tracing::debug;

use crate::error::{Error, Result};
use crate::fetch::{build_http_client, parse_url};

/// Logo shown in the report header when no other source is configured
pub const DEFAULT_LOGO_URL: &str =
    "https://upload.wikimedia.org/wikipedia/commons/e/e8/Tenet_Health_logo.png";

/// Where the report logo comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoSource {
    /// Download over HTTP(S)
    Url(String),
    /// Read a local PNG or JPEG
    File(PathBuf),
    /// Leave the logo out
    None,
}

impl Default for LogoSource {
    fn default() -> Self {
        LogoSource::Url(DEFAULT_LOGO_URL.to_string())
    }
}

/// Decoded logo pixels
#[derive(Debug, Clone)]
pub struct LogoImage {
    pub width: u32,
    pub height: u32,
    /// Packed 8-bit RGB samples
    pub rgb: Vec<u8>,
    /// 8-bit alpha samples, present only when some pixel is not opaque
    pub alpha: Option<Vec<u8>>,
}

impl LogoImage {
    /// Decode PNG or JPEG bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = rgba.dimensions();

        let pixel_count = (width as usize) * (height as usize);
        let mut rgb = Vec::with_capacity(pixel_count * 3);
        let mut alpha = Vec::with_capacity(pixel_count);
        for pixel in rgba.pixels() {
            let [r, g, b, a] = pixel.0;
            rgb.extend_from_slice(&[r, g, b]);
            alpha.push(a);
        }
        let alpha = if alpha.iter().all(|&a| a == u8::MAX) { None } else { Some(alpha) };

        Ok(Self { width, height, rgb, alpha })
    }

    /// Load the logo from `source`; `Ok(None)` when the source is `None`
    ///
    /// Download and decode failures are returned as errors so the export
    /// stops, matching how a missing logo aborts the report.
    pub fn load(source: &LogoSource, timeout: Duration) -> Result<Option<Self>> {
        match source {
            LogoSource::None => Ok(None),
            LogoSource::File(path) => {
                if !path.exists() {
                    return Err(Error::FileNotFound(path.clone()));
                }
                debug!(path = %path.display(), "reading logo");
                let bytes = std::fs::read(path)?;
                Self::from_bytes(&bytes).map(Some)
            }
            LogoSource::Url(raw) => {
                let url = parse_url(raw)?;
                debug!(%url, "downloading logo");
                let bytes = build_http_client(timeout)?
                    .get(url)
                    .send()?
                    .error_for_status()?
                    .bytes()?;
                Self::from_bytes(&bytes).map(Some)
            }
        }
    }

    /// Add the image (and its soft mask) to `doc`, returning the XObject id
    pub fn add_to_document(&self, doc: &mut Document) -> ObjectId {
        let mut dict = image_dict(self.width, self.height, b"DeviceRGB");

        if let Some(ref alpha) = self.alpha {
            let mask_dict = image_dict(self.width, self.height, b"DeviceGray");
            let mask_id = doc.add_object(Stream::new(mask_dict, alpha.clone()));
            dict.set("SMask", Object::Reference(mask_id));
        }

        doc.add_object(Stream::new(dict, self.rgb.clone()))
    }
}

fn image_dict(width: u32, height: u32, color_space: &[u8]) -> Dictionary {
    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"XObject".to_vec()));
    dict.set("Subtype", Object::Name(b"Image".to_vec()));
    dict.set("Width", Object::Integer(i64::from(width)));
    dict.set("Height", Object::Integer(i64::from(height)));
    dict.set("ColorSpace", Object::Name(color_space.to_vec()));
    dict.set("BitsPerComponent", Object::Integer(8));
    dict
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    /// Encode a small PNG; `transparent` makes the top-left pixel see-through
    pub(crate) fn sample_png(transparent: bool) -> Vec<u8> {
        let mut img = RgbaImage::from_pixel(4, 2, Rgba([128, 0, 128, 255]));
        if transparent {
            img.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
        }
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("encode png");
        bytes
    }

    #[test]
    fn test_decode_opaque_png_has_no_mask() {
        let logo = LogoImage::from_bytes(&sample_png(false)).expect("decode");
        assert_eq!((logo.width, logo.height), (4, 2));
        assert_eq!(logo.rgb.len(), 4 * 2 * 3);
        assert_eq!(&logo.rgb[..3], &[128, 0, 128]);
        assert!(logo.alpha.is_none());
    }

    #[test]
    fn test_decode_transparent_png_keeps_alpha() {
        let logo = LogoImage::from_bytes(&sample_png(true)).expect("decode");
        let alpha = logo.alpha.expect("alpha channel");
        assert_eq!(alpha.len(), 8);
        assert_eq!(alpha[0], 0);
        assert_eq!(alpha[1], 255);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let result = LogoImage::from_bytes(b"definitely not an image");
        assert!(matches!(result, Err(Error::Image(_))));
    }

    #[test]
    fn test_load_none_and_missing_file() {
        let timeout = Duration::from_secs(1);
        assert!(LogoImage::load(&LogoSource::None, timeout).expect("none").is_none());

        let missing = LogoSource::File(PathBuf::from("no-such-logo.png"));
        assert!(matches!(LogoImage::load(&missing, timeout), Err(Error::FileNotFound(_))));
    }

    #[test]
    fn test_add_to_document_links_soft_mask() {
        let mut doc = Document::with_version("1.5");
        let logo = LogoImage::from_bytes(&sample_png(true)).expect("decode");
        let id = logo.add_to_document(&mut doc);

        let stream = doc.get_object(id).and_then(Object::as_stream).expect("image stream");
        assert!(stream.dict.get(b"SMask").is_ok());
        assert_eq!(stream.dict.get(b"Width").and_then(Object::as_i64).expect("width"), 4);
    }
}
