/*!
The built-in shader sources, and the tools to build variants of them.

Every material of the crate draws with one of the sources listed in `ShaderKey`. They are
GLSL ES 1.00 and compile unchanged on OpenGL ES 2.0, WebGL 1 and desktop contexts that accept
`#version 100`.

Variants of a source are built by injecting preprocessor defines into it:

```
use pigment::shaders::ShaderSource;

let source = ShaderSource::new("// lit\nvoid main() {}").define("IS_SPECULAR", true);
assert_eq!(source.compose(), "// lit\n#define IS_SPECULAR\nvoid main() {}");
```

*/
use fnv::FnvHashMap;

use crate::program::ShaderStage;

pub use self::source::{DefineValue, Defines, ShaderSource};

mod source;

/// Identifies one of the built-in shader sources.
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShaderKey {
    ImmediateVert,
    VertexColorVert,
    VertexColorFrag,
    NormalVert,
    NormalFrag,
    BasicFrag,
    LightVert,
    LightFrag,
    LightTextureFrag,
}

impl ShaderKey {
    /// Every key, in declaration order.
    pub const ALL: [ShaderKey; 9] = [
        ShaderKey::ImmediateVert,
        ShaderKey::VertexColorVert,
        ShaderKey::VertexColorFrag,
        ShaderKey::NormalVert,
        ShaderKey::NormalFrag,
        ShaderKey::BasicFrag,
        ShaderKey::LightVert,
        ShaderKey::LightFrag,
        ShaderKey::LightTextureFrag,
    ];

    /// Returns the canonical name of the source, for example `"normalVert"`.
    pub fn name(&self) -> &'static str {
        match *self {
            ShaderKey::ImmediateVert => "immediateVert",
            ShaderKey::VertexColorVert => "vertexColorVert",
            ShaderKey::VertexColorFrag => "vertexColorFrag",
            ShaderKey::NormalVert => "normalVert",
            ShaderKey::NormalFrag => "normalFrag",
            ShaderKey::BasicFrag => "basicFrag",
            ShaderKey::LightVert => "lightVert",
            ShaderKey::LightFrag => "lightFrag",
            ShaderKey::LightTextureFrag => "lightTextureFrag",
        }
    }

    /// Looks a key up by its canonical name.
    pub fn from_name(name: &str) -> Option<ShaderKey> {
        ShaderKey::ALL.iter().copied().find(|k| k.name() == name)
    }

    /// Returns the stage the source is written for.
    pub fn stage(&self) -> ShaderStage {
        match *self {
            ShaderKey::ImmediateVert | ShaderKey::VertexColorVert | ShaderKey::NormalVert |
            ShaderKey::LightVert => ShaderStage::Vertex,
            _ => ShaderStage::Fragment,
        }
    }

    /// Returns the built-in source text.
    pub fn default_source(&self) -> &'static str {
        match *self {
            ShaderKey::ImmediateVert => include_str!("glsl/immediate.vert"),
            ShaderKey::VertexColorVert => include_str!("glsl/vertex_color.vert"),
            ShaderKey::VertexColorFrag => include_str!("glsl/vertex_color.frag"),
            ShaderKey::NormalVert => include_str!("glsl/normal.vert"),
            ShaderKey::NormalFrag => include_str!("glsl/normal.frag"),
            ShaderKey::BasicFrag => include_str!("glsl/basic.frag"),
            ShaderKey::LightVert => include_str!("glsl/light.vert"),
            ShaderKey::LightFrag => include_str!("glsl/light.frag"),
            ShaderKey::LightTextureFrag => include_str!("glsl/light_texture.frag"),
        }
    }
}

/// The source text of each `ShaderKey`, with optional overrides.
#[derive(Clone, Debug, Default)]
pub struct ShaderLibrary {
    overrides: FnvHashMap<ShaderKey, String>,
}

impl ShaderLibrary {
    /// Builds a library with the built-in sources.
    #[inline]
    pub fn new() -> ShaderLibrary {
        ShaderLibrary::default()
    }

    /// Returns the current source of a key.
    #[inline]
    pub fn source(&self, key: ShaderKey) -> &str {
        self.overrides.get(&key).map(|s| s.as_str()).unwrap_or_else(|| key.default_source())
    }

    /// Replaces the source of a key.
    #[inline]
    pub fn set_source<S>(&mut self, key: ShaderKey, source: S) where S: Into<String> {
        self.overrides.insert(key, source.into());
    }

    /// Restores the built-in source of a key.
    #[inline]
    pub fn reset(&mut self, key: ShaderKey) {
        self.overrides.remove(&key);
    }

    /// Returns true if the source of `key` was replaced.
    #[inline]
    pub fn is_overridden(&self, key: ShaderKey) -> bool {
        self.overrides.contains_key(&key)
    }
}
