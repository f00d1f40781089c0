/*!
Conversion of loosely-typed color arguments into normalized colors.

Material calls accept the same argument shapes as a sketching API: a gray level, a gray level
and an alpha, three or four channels, a CSS hex string, or an already normalized `Color`. A
`ColorModel` turns those arguments into four floats between `0.0` and `1.0`.

```
use pigment::color::{ColorArgs, ColorModel, RgbColorModel};

let model = RgbColorModel::default();
let red = model.normalize(&(255, 0, 0).into_color_args()).unwrap();
assert_eq!(red.to_array(), [1.0, 0.0, 0.0, 1.0]);
```

*/
use smallvec::SmallVec;
use thiserror::Error;

/// A color with four channels between `0.0` and `1.0`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color([f32; 4]);

impl Color {
    /// Builds a color from normalized channels, clamping them into `[0.0, 1.0]`.
    #[inline]
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Color {
        Color([clamp(r), clamp(g), clamp(b), clamp(a)])
    }

    /// Returns `[r, g, b, a]`.
    #[inline]
    pub fn to_array(&self) -> [f32; 4] {
        self.0
    }

    /// Returns the alpha channel.
    #[inline]
    pub fn alpha(&self) -> f32 {
        self.0[3]
    }

    /// Returns true if the alpha channel is below `1.0`.
    #[inline]
    pub fn is_translucent(&self) -> bool {
        self.0[3] < 1.0
    }

    #[inline]
    fn with_alpha(self, a: f32) -> Color {
        Color([self.0[0], self.0[1], self.0[2], clamp(a)])
    }
}

impl From<[f32; 4]> for Color {
    #[inline]
    fn from(c: [f32; 4]) -> Color {
        Color::new(c[0], c[1], c[2], c[3])
    }
}

#[inline]
fn clamp(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.max(0.0).min(1.0) }
}

/// One color argument.
#[derive(Clone, Debug, PartialEq)]
pub enum ColorArg {
    /// A channel or gray level, in the range of the color model.
    Number(f32),
    /// A color string, such as `"#ff8000"`.
    Str(String),
    /// A normalized color, used as is.
    Color(Color),
}

macro_rules! number_arg {
    ($($t:ty),+) => {
        $(
            impl From<$t> for ColorArg {
                #[inline]
                fn from(v: $t) -> ColorArg {
                    ColorArg::Number(v as f32)
                }
            }

            impl ColorArgs for $t {
                #[inline]
                fn into_color_args(self) -> SmallVec<[ColorArg; 4]> {
                    smallvec::smallvec![ColorArg::from(self)]
                }
            }
        )+
    };
}

number_arg!(u8, i32, u32, f32, f64);

impl<'a> From<&'a str> for ColorArg {
    #[inline]
    fn from(s: &'a str) -> ColorArg {
        ColorArg::Str(s.to_owned())
    }
}

impl From<String> for ColorArg {
    #[inline]
    fn from(s: String) -> ColorArg {
        ColorArg::Str(s)
    }
}

impl From<Color> for ColorArg {
    #[inline]
    fn from(c: Color) -> ColorArg {
        ColorArg::Color(c)
    }
}

/// Values that can be passed as the arguments of a color.
pub trait ColorArgs {
    /// Returns the list of arguments.
    fn into_color_args(self) -> SmallVec<[ColorArg; 4]>;
}

impl<'a> ColorArgs for &'a str {
    #[inline]
    fn into_color_args(self) -> SmallVec<[ColorArg; 4]> {
        smallvec::smallvec![ColorArg::from(self)]
    }
}

impl ColorArgs for String {
    #[inline]
    fn into_color_args(self) -> SmallVec<[ColorArg; 4]> {
        smallvec::smallvec![ColorArg::from(self)]
    }
}

impl ColorArgs for Color {
    #[inline]
    fn into_color_args(self) -> SmallVec<[ColorArg; 4]> {
        smallvec::smallvec![ColorArg::Color(self)]
    }
}

impl ColorArgs for ColorArg {
    #[inline]
    fn into_color_args(self) -> SmallVec<[ColorArg; 4]> {
        smallvec::smallvec![self]
    }
}

impl<'a> ColorArgs for &'a [ColorArg] {
    #[inline]
    fn into_color_args(self) -> SmallVec<[ColorArg; 4]> {
        self.iter().cloned().collect()
    }
}

impl ColorArgs for Vec<ColorArg> {
    #[inline]
    fn into_color_args(self) -> SmallVec<[ColorArg; 4]> {
        self.into_iter().collect()
    }
}

impl<A, B> ColorArgs for (A, B) where A: Into<ColorArg>, B: Into<ColorArg> {
    #[inline]
    fn into_color_args(self) -> SmallVec<[ColorArg; 4]> {
        smallvec::smallvec![self.0.into(), self.1.into()]
    }
}

impl<A, B, C> ColorArgs for (A, B, C)
    where A: Into<ColorArg>, B: Into<ColorArg>, C: Into<ColorArg>
{
    #[inline]
    fn into_color_args(self) -> SmallVec<[ColorArg; 4]> {
        smallvec::smallvec![self.0.into(), self.1.into(), self.2.into()]
    }
}

impl<A, B, C, D> ColorArgs for (A, B, C, D)
    where A: Into<ColorArg>, B: Into<ColorArg>, C: Into<ColorArg>, D: Into<ColorArg>
{
    #[inline]
    fn into_color_args(self) -> SmallVec<[ColorArg; 4]> {
        smallvec::smallvec![self.0.into(), self.1.into(), self.2.into(), self.3.into()]
    }
}

/// Error that can happen when normalizing color arguments.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ColorError {
    /// A color takes between one and four arguments.
    #[error("a color takes 1 to 4 arguments, got {0}")]
    WrongArgumentCount(usize),

    /// The arguments have a shape the color model doesn't accept.
    #[error("unexpected color argument at position {0}")]
    UnexpectedArgument(usize),

    /// A string isn't a color the model understands.
    #[error("unrecognized color string `{0}`")]
    UnrecognizedString(String),
}

/// Converts color arguments into a normalized color.
pub trait ColorModel {
    /// Normalizes a list of arguments.
    fn normalize(&self, args: &[ColorArg]) -> Result<Color, ColorError>;
}

/// The RGB color model, with configurable channel ranges.
///
/// - One number is a gray level.
/// - Two numbers are a gray level and an alpha.
/// - Three numbers are red, green and blue.
/// - Four numbers are red, green, blue and alpha.
/// - A string is a CSS hex color: `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`.
/// - A string or a `Color` followed by a number overrides the alpha.
///
/// Numbers are divided by the maximum of their channel, then clamped into `[0.0, 1.0]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RgbColorModel {
    maxes: [f32; 4],
}

impl RgbColorModel {
    /// Builds a model whose red, green, blue and alpha channels range from zero to `maxes`.
    #[inline]
    pub fn with_maxes(maxes: [f32; 4]) -> RgbColorModel {
        RgbColorModel { maxes }
    }

    /// Returns the channel maxima.
    #[inline]
    pub fn maxes(&self) -> [f32; 4] {
        self.maxes
    }

    fn channel(&self, index: usize, value: f32) -> f32 {
        value / self.maxes[index]
    }

    fn single(&self, arg: &ColorArg) -> Result<Color, ColorError> {
        match *arg {
            ColorArg::Number(gray) => Ok(self.gray(gray, self.maxes[3])),
            ColorArg::Str(ref s) => parse_hex(s),
            ColorArg::Color(c) => Ok(c),
        }
    }

    fn gray(&self, gray: f32, alpha: f32) -> Color {
        Color::new(self.channel(0, gray), self.channel(1, gray), self.channel(2, gray),
                   self.channel(3, alpha))
    }
}

impl Default for RgbColorModel {
    #[inline]
    fn default() -> RgbColorModel {
        RgbColorModel::with_maxes([255.0; 4])
    }
}

impl ColorModel for RgbColorModel {
    fn normalize(&self, args: &[ColorArg]) -> Result<Color, ColorError> {
        let number = |i: usize| match args[i] {
            ColorArg::Number(v) => Ok(v),
            _ => Err(ColorError::UnexpectedArgument(i)),
        };

        match args.len() {
            1 => self.single(&args[0]),
            2 => {
                let alpha = number(1)?;
                match args[0] {
                    ColorArg::Number(gray) => Ok(self.gray(gray, alpha)),
                    ref other => Ok(self.single(other)?.with_alpha(self.channel(3, alpha))),
                }
            },
            3 => Ok(Color::new(self.channel(0, number(0)?), self.channel(1, number(1)?),
                               self.channel(2, number(2)?), 1.0)),
            4 => Ok(Color::new(self.channel(0, number(0)?), self.channel(1, number(1)?),
                               self.channel(2, number(2)?), self.channel(3, number(3)?))),
            n => Err(ColorError::WrongArgumentCount(n)),
        }
    }
}

/// Parses `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`.
fn parse_hex(s: &str) -> Result<Color, ColorError> {
    let unrecognized = || ColorError::UnrecognizedString(s.to_owned());

    let digits = s.trim().strip_prefix('#').ok_or_else(unrecognized)?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(unrecognized());
    }

    let nibble = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).map_err(|_| unrecognized());
    let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| unrecognized());

    let channels: [u8; 4] = match digits.len() {
        3 | 4 => {
            let mut c = [255u8; 4];
            for (i, channel) in c.iter_mut().enumerate().take(digits.len()) {
                *channel = nibble(i)? * 17;
            }
            c
        },
        6 | 8 => {
            let mut c = [255u8; 4];
            for (i, channel) in c.iter_mut().enumerate().take(digits.len() / 2) {
                *channel = byte(i * 2)?;
            }
            c
        },
        _ => return Err(unrecognized()),
    };

    Ok(Color::new(channels[0] as f32 / 255.0, channels[1] as f32 / 255.0,
                  channels[2] as f32 / 255.0, channels[3] as f32 / 255.0))
}
