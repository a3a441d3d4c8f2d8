/// Content digests over decoded pixel buffers
///
/// Matching is exact, not perceptual: two images match if and only if
/// their decoded pixel buffers are byte-identical. The digest is computed
/// over the raw decoded buffer in the image's native color layout, never
/// over the compressed file bytes, filename, or metadata.

use image::DynamicImage;
use std::fmt;

/// MD5 digest of a decoded pixel buffer
///
/// Fixed-width so the reference index holds 16 bytes per entry instead of
/// the pixel buffer itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentDigest([u8; 16]);

impl ContentDigest {
    /// Digest the raw decoded pixel buffer of an image
    pub fn of_pixels(image: &DynamicImage) -> Self {
        ContentDigest(md5::compute(image.as_bytes()).0)
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// Decode raw file bytes into pixels
///
/// The single decode path shared by the index builder and the classifier.
/// Digest equality only holds when both sides decode identically, so
/// neither side may decode through anything else.
pub fn decode_image(bytes: &[u8]) -> image::ImageResult<DynamicImage> {
    image::load_from_memory(bytes)
}
