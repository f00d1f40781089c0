/*!
Textures created from media sources.

A `MediaSource` is turned into a texture the first time it is bound, and the same texture is
reused by every later bind. Each bind uploads the current pixels of the source, so an updated
image or a new video frame shows up without extra work.

Sampling parameters depend on the dimensions of the source. OpenGL ES 2.0 only supports
mipmaps and repeating wrap modes for textures whose width and height are both powers of two:

 - A power-of-two source gets a mipmap chain, and keeps the default sampling parameters.
 - Any other source gets linear filtering and clamp-to-edge wrapping on both axes.

Sources are never resized.

Pixels are given top row first, like image files store them. Rows are flipped on upload so
that the top row of the source ends up at texture coordinate `t = 1`, where the GL convention
expects it.

*/
use crate::backend::TextureId;
use crate::context::RenderContext;
use crate::uniforms::{MagnifySamplerFilter, MinifySamplerFilter, SamplerWrapFunction};

pub use self::media::{MediaError, MediaSource, Readiness, StaticImage, TextureRecord, VideoFrame};

mod media;

/// A sampling parameter of a texture.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TextureParameter {
    /// `GL_TEXTURE_MAG_FILTER`.
    MagnifyFilter(MagnifySamplerFilter),
    /// `GL_TEXTURE_MIN_FILTER`.
    MinifyFilter(MinifySamplerFilter),
    /// `GL_TEXTURE_WRAP_S`.
    WrapS(SamplerWrapFunction),
    /// `GL_TEXTURE_WRAP_T`.
    WrapT(SamplerWrapFunction),
}

/// Parameters set on textures whose dimensions are not both powers of two.
const NON_POWER_OF_TWO_PARAMETERS: [TextureParameter; 4] = [
    TextureParameter::MagnifyFilter(MagnifySamplerFilter::Linear),
    TextureParameter::MinifyFilter(MinifySamplerFilter::Linear),
    TextureParameter::WrapS(SamplerWrapFunction::Clamp),
    TextureParameter::WrapT(SamplerWrapFunction::Clamp),
];

/// Returns true if `n` has at most one bit set.
///
/// Zero counts as a power of two. Callers must handle empty sources themselves.
#[inline]
pub fn is_power_of_two(n: u32) -> bool {
    n & n.wrapping_sub(1) == 0
}

/// Returns the smallest power of two greater than or equal to `n`.
///
/// Returns `0` for `0` and for values above `2^31`, which have no such power in a `u32`.
pub fn next_highest_power_of_two(n: u32) -> u32 {
    let mut n = n.wrapping_sub(1);
    n |= n >> 1;
    n |= n >> 2;
    n |= n >> 4;
    n |= n >> 8;
    n |= n >> 16;
    n.wrapping_add(1)
}

/// Returns true if `media` can be bound right now.
///
/// That is, the source is ready and holds exactly `width * height * 4` bytes of pixels for
/// non-zero dimensions. Invalid pixel buffers are reported with `log::warn!`.
pub fn can_bind(media: &MediaSource) -> bool {
    match *media {
        MediaSource::Image(ref image) => {
            let (width, height) = image.dimensions();
            check_pixels(width, height, image.pixels().len())
        },
        MediaSource::Video(ref video) => match (video.dimensions(), video.frame()) {
            (Some((width, height)), Some(frame)) => check_pixels(width, height, frame.len()),
            _ => false,
        },
        MediaSource::Unsupported(_) => false,
    }
}

/// Makes `media` the texture bound on texture unit 0, uploading its current pixels.
///
/// Returns `None` and leaves every binding untouched if the source isn't ready, is of an
/// unsupported kind, or has invalid pixels.
pub fn bind_texture(ctxt: &mut RenderContext, media: &MediaSource) -> Option<TextureId> {
    match *media {
        MediaSource::Image(ref image) => {
            let (width, height) = image.dimensions();
            upload(ctxt, image.texture_record(), width, height, &image.pixels())
        },

        MediaSource::Video(ref video) => {
            let (dimensions, frame) = match (video.dimensions(), video.frame()) {
                (Some(dimensions), Some(frame)) => (dimensions, frame),
                _ => {
                    log::trace!("skipping video texture: {:?}", video.readiness());
                    return None;
                },
            };
            upload(ctxt, video.texture_record(), dimensions.0, dimensions.1, &frame)
        },

        MediaSource::Unsupported(kind) => {
            log::trace!("skipping texture from unsupported source `{}`", kind);
            None
        },
    }
}

fn check_pixels(width: u32, height: u32, len: usize) -> bool {
    if width == 0 || height == 0 {
        log::warn!("skipping texture upload of an empty {}x{} source", width, height);
        return false;
    }

    let expected = width as usize * height as usize * 4;
    if len != expected {
        log::warn!("skipping texture upload: {}x{} needs {} bytes, got {}", width, height,
                   expected, len);
        return false;
    }

    true
}

/// Returns `pixels` with its rows in reverse order.
fn flip_rows(pixels: &[u8], width: u32) -> Vec<u8> {
    pixels.chunks(width as usize * 4).rev().flat_map(|row| row.iter().cloned()).collect()
}

fn upload(ctxt: &mut RenderContext, record: &TextureRecord, width: u32, height: u32,
          pixels: &[u8]) -> Option<TextureId>
{
    if !check_pixels(width, height, pixels.len()) {
        return None;
    }

    ctxt.active_texture(0);

    let texture = match record.texture() {
        Some(texture) => texture,
        None => {
            let texture = ctxt.backend.create_texture();
            record.set(Some(texture));
            log::debug!("created texture {:?}", texture);
            texture
        },
    };

    ctxt.bind_texture(texture);
    ctxt.backend.tex_image_2d(width, height, &flip_rows(pixels, width));

    if is_power_of_two(width) && is_power_of_two(height) {
        ctxt.backend.generate_mipmap();
    } else {
        for &parameter in NON_POWER_OF_TWO_PARAMETERS.iter() {
            ctxt.backend.tex_parameter(parameter);
        }
    }

    Some(texture)
}

/// Destroys the texture created for `media`, if any.
///
/// The next bind creates a new texture.
pub fn release_texture(ctxt: &mut RenderContext, media: &MediaSource) {
    if let Some(record) = media.texture_record() {
        if let Some(texture) = record.texture() {
            ctxt.delete_texture(texture);
            record.set(None);
            log::debug!("released texture {:?}", texture);
        }
    }
}
