//! Image loading for charts and pilot photos

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::sync::Arc;

use crate::error::AssetError;
use crate::model::ImageRef;

/// A fully decoded image: row-major RGB8 pixels plus their dimensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedImage {
    pub name: String,
    pub pixels: Arc<[u8]>,
    pub width: u32,
    pub height: u32,
}

/// Source of image bytes and metadata.
///
/// Called before an image block is built because layout needs the
/// intrinsic size.
pub trait ImageResolver {
    fn load(&self, image: &ImageRef) -> Result<LoadedImage, AssetError>;
}

/// Reads paths from disk and inline buffers from memory, then decodes them
#[derive(Debug, Clone, Copy, Default)]
pub struct FsImageResolver;

impl FsImageResolver {
    pub fn new() -> Self {
        Self
    }
}

/// Decode encoded image bytes (PNG or JPEG) into an RGB8 raster.
///
/// The whole image is decoded, so corrupt pixel data behind a valid header
/// fails here rather than when the document is painted.
pub fn decode_image(name: &str, data: &[u8]) -> Result<LoadedImage, AssetError> {
    let decoded = image::load_from_memory(data).map_err(|e| AssetError::Decode {
        name: name.to_string(),
        reason: e.to_string(),
    })?;
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();
    if width == 0 || height == 0 {
        return Err(AssetError::EmptyImage {
            name: name.to_string(),
        });
    }
    Ok(LoadedImage {
        name: name.to_string(),
        pixels: rgb.into_raw().into(),
        width,
        height,
    })
}

impl ImageResolver for FsImageResolver {
    fn load(&self, image: &ImageRef) -> Result<LoadedImage, AssetError> {
        let name = image.name();
        match image {
            ImageRef::Path(path) => {
                let data = fs::read(path).map_err(|source| AssetError::Read {
                    name: name.clone(),
                    source,
                })?;
                decode_image(&name, &data)
            }
            ImageRef::Inline { data, .. } => decode_image(&name, data),
        }
    }
}

/// An image registered for this run, addressed by a stable key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedImage {
    pub key: String,
    pub image: LoadedImage,
}

/// Per-run memo of resolved images.
///
/// Keys are assigned in first-use order (`img0`, `img1`, ...) so the same
/// input always produces the same keys. Failures are remembered too, and
/// each failing reference is reported once.
pub struct ImageCache<'a> {
    resolver: &'a dyn ImageResolver,
    entries: HashMap<ImageRef, Option<CachedImage>>,
    images: BTreeMap<String, LoadedImage>,
}

impl<'a> ImageCache<'a> {
    pub fn new(resolver: &'a dyn ImageResolver) -> Self {
        Self {
            resolver,
            entries: HashMap::new(),
            images: BTreeMap::new(),
        }
    }

    /// Resolve an image, returning `None` (after logging) when it cannot be used
    pub fn get(&mut self, image: &ImageRef) -> Option<CachedImage> {
        if let Some(entry) = self.entries.get(image) {
            return entry.clone();
        }

        let entry = match self.resolver.load(image) {
            Ok(loaded) => {
                let key = format!("img{}", self.images.len());
                log::debug!(
                    "Loaded image {} as {} ({}x{} px)",
                    loaded.name,
                    key,
                    loaded.width,
                    loaded.height
                );
                self.images.insert(key.clone(), loaded.clone());
                Some(CachedImage { key, image: loaded })
            }
            Err(e) => {
                log::warn!("{}; using a placeholder instead", e);
                None
            }
        };
        self.entries.insert(image.clone(), entry.clone());
        entry
    }

    /// Images referenced by the layout, keyed for the backend
    pub fn into_images(self) -> BTreeMap<String, LoadedImage> {
        self.images
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::Cell;
    use std::io::Cursor;

    /// Encode a solid PNG of the given size
    pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::from_pixel(width, height, image::Rgb([200, 30, 30]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    /// PNG with an intact header whose compressed pixel data is scrambled
    pub(crate) fn corrupt_png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = png_bytes(width, height);
        let idat = bytes
            .windows(4)
            .position(|w| w == b"IDAT")
            .expect("encoded PNG has an IDAT chunk");
        let len = u32::from_be_bytes([
            bytes[idat - 4],
            bytes[idat - 3],
            bytes[idat - 2],
            bytes[idat - 1],
        ]) as usize;
        for byte in &mut bytes[idat + 4..idat + 4 + len] {
            *byte ^= 0x5A;
        }
        bytes
    }

    struct CountingResolver {
        calls: Cell<usize>,
    }

    impl ImageResolver for CountingResolver {
        fn load(&self, image: &ImageRef) -> Result<LoadedImage, AssetError> {
            self.calls.set(self.calls.get() + 1);
            FsImageResolver.load(image)
        }
    }

    #[test]
    fn test_inline_png_dimensions() {
        let image = ImageRef::inline("chart.png", png_bytes(40, 20));
        let loaded = FsImageResolver::new().load(&image).unwrap();
        assert_eq!((loaded.width, loaded.height), (40, 20));
        assert_eq!(loaded.name, "chart.png");
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let image = ImageRef::inline("broken.png", vec![1, 2, 3, 4]);
        assert!(matches!(
            FsImageResolver::new().load(&image),
            Err(AssetError::Decode { .. })
        ));
    }

    #[test]
    fn test_inline_png_is_decoded_to_rgb() {
        let image = ImageRef::inline("chart.png", png_bytes(4, 3));
        let loaded = FsImageResolver::new().load(&image).unwrap();
        assert_eq!(loaded.pixels.len(), 4 * 3 * 3);
        assert_eq!(&loaded.pixels[..3], &[200, 30, 30]);
    }

    #[test]
    fn test_corrupt_pixel_data_is_decode_error() {
        let bytes = corrupt_png_bytes(800, 400);
        // the header alone still reads fine
        let dims = image::ImageReader::new(Cursor::new(&bytes))
            .with_guessed_format()
            .unwrap()
            .into_dimensions()
            .unwrap();
        assert_eq!(dims, (800, 400));

        let image = ImageRef::inline("chart.png", bytes);
        assert!(matches!(
            FsImageResolver::new().load(&image),
            Err(AssetError::Decode { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let image = ImageRef::Path("/nonexistent/photo.png".into());
        assert!(matches!(
            FsImageResolver::new().load(&image),
            Err(AssetError::Read { .. })
        ));
    }

    #[test]
    fn test_cache_memoises_and_keys_in_order() {
        let resolver = CountingResolver {
            calls: Cell::new(0),
        };
        let mut cache = ImageCache::new(&resolver);
        let a = ImageRef::inline("a.png", png_bytes(10, 10));
        let b = ImageRef::inline("b.png", png_bytes(20, 10));

        assert_eq!(cache.get(&a).unwrap().key, "img0");
        assert_eq!(cache.get(&b).unwrap().key, "img1");
        assert_eq!(cache.get(&a).unwrap().key, "img0");
        assert_eq!(resolver.calls.get(), 2);
        assert_eq!(cache.into_images().len(), 2);
    }

    #[test]
    fn test_cache_remembers_failures() {
        let resolver = CountingResolver {
            calls: Cell::new(0),
        };
        let mut cache = ImageCache::new(&resolver);
        let broken = ImageRef::inline("broken.png", vec![0; 8]);
        assert!(cache.get(&broken).is_none());
        assert!(cache.get(&broken).is_none());
        assert_eq!(resolver.calls.get(), 1);
        assert!(cache.into_images().is_empty());
    }
}
