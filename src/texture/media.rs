use std::cell::{Cell, Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use thiserror::Error;

use crate::backend::TextureId;

/// Error that can happen when building a media source.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MediaError {
    /// The pixel buffer doesn't hold `width * height` RGBA pixels.
    #[error("expected {expected} bytes of RGBA pixels for the dimensions, got {actual}")]
    WrongPixelCount {
        /// `width * height * 4`.
        expected: usize,
        /// Length of the buffer.
        actual: usize,
    },
}

/// The texture attached to a media source.
///
/// Created lazily, the first time the source is used as a texture, and reused afterwards.
#[derive(Debug, Default)]
pub struct TextureRecord {
    texture: Cell<Option<TextureId>>,
}

impl TextureRecord {
    /// Returns true if a texture was created for the source.
    #[inline]
    pub fn is_texture(&self) -> bool {
        self.texture.get().is_some()
    }

    /// Returns the texture created for the source.
    #[inline]
    pub fn texture(&self) -> Option<TextureId> {
        self.texture.get()
    }

    #[inline]
    pub(crate) fn set(&self, texture: Option<TextureId>) {
        self.texture.set(texture);
    }
}

/// A decoded image: dimensions plus RGBA pixels, 8 bits per channel, rows top to bottom.
///
/// Once bound, the top row is sampled at texture coordinate `t = 1`.
pub struct StaticImage {
    width: u32,
    height: u32,
    pixels: RefCell<Vec<u8>>,
    record: TextureRecord,
}

impl StaticImage {
    /// Builds an image, checking that `pixels` holds exactly `width * height` RGBA pixels.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<StaticImage, MediaError> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(MediaError::WrongPixelCount { expected, actual: pixels.len() });
        }

        Ok(StaticImage {
            width,
            height,
            pixels: RefCell::new(pixels),
            record: TextureRecord::default(),
        })
    }

    /// Returns `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the current pixels.
    #[inline]
    pub fn pixels(&self) -> Ref<'_, [u8]> {
        Ref::map(self.pixels.borrow(), |p| p.as_slice())
    }

    /// Replaces the pixels. The next texture bind uploads them.
    pub fn update_pixels(&self, pixels: Vec<u8>) -> Result<(), MediaError> {
        let expected = self.width as usize * self.height as usize * 4;
        if pixels.len() != expected {
            return Err(MediaError::WrongPixelCount { expected, actual: pixels.len() });
        }

        *self.pixels.borrow_mut() = pixels;
        Ok(())
    }

    /// Returns the texture record of this image.
    #[inline]
    pub fn texture_record(&self) -> &TextureRecord {
        &self.record
    }
}

impl fmt::Debug for StaticImage {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        formatter.debug_struct("StaticImage")
                 .field("width", &self.width)
                 .field("height", &self.height)
                 .field("texture", &self.record.texture())
                 .finish()
    }
}

/// A video-like source whose frames arrive over time.
///
/// The video is ready once both its metadata and its current frame are loaded.
#[derive(Default)]
pub struct VideoFrame {
    metadata: Cell<Option<(u32, u32)>>,
    frame: RefCell<Option<Vec<u8>>>,
    record: TextureRecord,
}

impl VideoFrame {
    /// Builds a video with nothing loaded.
    #[inline]
    pub fn new() -> VideoFrame {
        VideoFrame::default()
    }

    /// Records the dimensions of the video, once its metadata is known.
    #[inline]
    pub fn set_metadata(&self, width: u32, height: u32) {
        self.metadata.set(Some((width, height)));
    }

    /// Records the pixels of the current frame, RGBA with 8 bits per channel.
    #[inline]
    pub fn set_frame(&self, pixels: Vec<u8>) {
        *self.frame.borrow_mut() = Some(pixels);
    }

    /// Forgets the current frame, for example while seeking.
    #[inline]
    pub fn clear_frame(&self) {
        *self.frame.borrow_mut() = None;
    }

    /// Returns `(width, height)` if the metadata is loaded.
    #[inline]
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.metadata.get()
    }

    /// Returns the current frame, if loaded.
    pub fn frame(&self) -> Option<Ref<'_, [u8]>> {
        Ref::filter_map(self.frame.borrow(), |f| f.as_deref()).ok()
    }

    /// Returns the readiness of the video.
    pub fn readiness(&self) -> Readiness {
        if self.metadata.get().is_none() {
            Readiness::MetadataPending
        } else if self.frame.borrow().is_none() {
            Readiness::FramePending
        } else {
            Readiness::Ready
        }
    }

    /// Returns the texture record of this video.
    #[inline]
    pub fn texture_record(&self) -> &TextureRecord {
        &self.record
    }
}

impl fmt::Debug for VideoFrame {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        formatter.debug_struct("VideoFrame")
                 .field("dimensions", &self.metadata.get())
                 .field("readiness", &self.readiness())
                 .field("texture", &self.record.texture())
                 .finish()
    }
}

/// Whether a media source can be uploaded now.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Readiness {
    /// The pixels are available.
    Ready,
    /// The dimensions of the video are not known yet.
    MetadataPending,
    /// The current frame of the video is not loaded yet.
    FramePending,
    /// The kind of source can't be used as a texture.
    Unsupported,
}

/// Something that can be sampled as a texture.
#[derive(Clone)]
pub enum MediaSource {
    /// A decoded image.
    Image(Rc<StaticImage>),
    /// A video and its current frame.
    Video(Rc<VideoFrame>),
    /// A kind of source that can't be used as a texture yet, such as a 2D drawing surface.
    ///
    /// Binding it does nothing.
    Unsupported(&'static str),
}

impl MediaSource {
    /// Returns the readiness of the source.
    pub fn readiness(&self) -> Readiness {
        match *self {
            MediaSource::Image(_) => Readiness::Ready,
            MediaSource::Video(ref video) => video.readiness(),
            MediaSource::Unsupported(_) => Readiness::Unsupported,
        }
    }

    /// Returns true if the source can be uploaded now.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.readiness() == Readiness::Ready
    }

    /// Returns the dimensions of the source, if known.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        match *self {
            MediaSource::Image(ref image) => Some(image.dimensions()),
            MediaSource::Video(ref video) => video.dimensions(),
            MediaSource::Unsupported(_) => None,
        }
    }

    /// Returns the texture record of the source, if it has one.
    pub fn texture_record(&self) -> Option<&TextureRecord> {
        match *self {
            MediaSource::Image(ref image) => Some(image.texture_record()),
            MediaSource::Video(ref video) => Some(video.texture_record()),
            MediaSource::Unsupported(_) => None,
        }
    }
}

impl fmt::Debug for MediaSource {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match *self {
            MediaSource::Image(ref image) => fmt::Debug::fmt(&**image, formatter),
            MediaSource::Video(ref video) => fmt::Debug::fmt(&**video, formatter),
            MediaSource::Unsupported(kind) => write!(formatter, "Unsupported({})", kind),
        }
    }
}

/// Two sources are equal if they are the same instance.
impl PartialEq for MediaSource {
    fn eq(&self, other: &MediaSource) -> bool {
        match (self, other) {
            (MediaSource::Image(a), MediaSource::Image(b)) => Rc::ptr_eq(a, b),
            (MediaSource::Video(a), MediaSource::Video(b)) => Rc::ptr_eq(a, b),
            (MediaSource::Unsupported(a), MediaSource::Unsupported(b)) => a == b,
            _ => false,
        }
    }
}

impl From<StaticImage> for MediaSource {
    #[inline]
    fn from(image: StaticImage) -> MediaSource {
        MediaSource::Image(Rc::new(image))
    }
}

impl From<Rc<StaticImage>> for MediaSource {
    #[inline]
    fn from(image: Rc<StaticImage>) -> MediaSource {
        MediaSource::Image(image)
    }
}

impl From<Rc<VideoFrame>> for MediaSource {
    #[inline]
    fn from(video: Rc<VideoFrame>) -> MediaSource {
        MediaSource::Video(video)
    }
}

#[cfg(feature = "image")]
mod image_impls {
    use super::StaticImage;

    impl From<image::RgbaImage> for StaticImage {
        fn from(image: image::RgbaImage) -> StaticImage {
            let (width, height) = image.dimensions();
            StaticImage {
                width,
                height,
                pixels: std::cell::RefCell::new(image.into_raw()),
                record: Default::default(),
            }
        }
    }

    impl From<image::DynamicImage> for StaticImage {
        #[inline]
        fn from(image: image::DynamicImage) -> StaticImage {
            StaticImage::from(image.into_rgba8())
        }
    }
}
