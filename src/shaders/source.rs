use std::collections::BTreeMap;
use std::fmt;

/// Value of a preprocessor define.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DefineValue {
    /// `true` emits `#define NAME`, `false` emits nothing.
    Flag(bool),
    /// Emits `#define NAME text`.
    Text(String),
}

impl From<bool> for DefineValue {
    #[inline]
    fn from(flag: bool) -> DefineValue {
        DefineValue::Flag(flag)
    }
}

impl<'a> From<&'a str> for DefineValue {
    #[inline]
    fn from(text: &'a str) -> DefineValue {
        DefineValue::Text(text.to_owned())
    }
}

impl From<String> for DefineValue {
    #[inline]
    fn from(text: String) -> DefineValue {
        DefineValue::Text(text)
    }
}

impl From<i32> for DefineValue {
    #[inline]
    fn from(value: i32) -> DefineValue {
        DefineValue::Text(value.to_string())
    }
}

/// A set of preprocessor defines.
///
/// Defines are kept sorted by name, so the composed source doesn't depend on the order in which
/// they were set.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Defines {
    values: BTreeMap<String, DefineValue>,
}

impl Defines {
    /// Builds an empty set.
    #[inline]
    pub fn new() -> Defines {
        Defines::default()
    }

    /// Builder-style version of `set`.
    #[inline]
    pub fn with<V>(mut self, name: &str, value: V) -> Defines where V: Into<DefineValue> {
        self.set(name, value);
        self
    }

    /// Sets a define, replacing any previous value.
    #[inline]
    pub fn set<V>(&mut self, name: &str, value: V) where V: Into<DefineValue> {
        self.values.insert(name.to_owned(), value.into());
    }

    /// Returns the value of a define.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&DefineValue> {
        self.values.get(name)
    }

    /// Removes a define.
    #[inline]
    pub fn remove(&mut self, name: &str) -> Option<DefineValue> {
        self.values.remove(name)
    }

    /// Returns true if no define is set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over the defines, sorted by name.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DefineValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the `#define` lines for this set.
    pub fn to_directives(&self) -> String {
        let mut out = String::new();

        for (name, value) in self.iter() {
            match *value {
                DefineValue::Flag(false) => (),
                DefineValue::Flag(true) => {
                    out.push_str("#define ");
                    out.push_str(name);
                    out.push('\n');
                },
                DefineValue::Text(ref text) => {
                    out.push_str("#define ");
                    out.push_str(name);
                    out.push(' ');
                    out.push_str(text);
                    out.push('\n');
                },
            }
        }

        out
    }

    /// Injects the defines into `base`, after its leading comments and `#version` directive.
    ///
    /// The rest of the source is preserved byte for byte. A set that emits nothing returns
    /// `base` unchanged.
    pub fn compose(&self, base: &str) -> String {
        let directives = self.to_directives();
        if directives.is_empty() {
            return base.to_owned();
        }

        let split = preamble_len(base);
        let (head, tail) = base.split_at(split);

        let mut out = String::with_capacity(base.len() + directives.len() + 1);
        out.push_str(head);
        if !head.is_empty() && !head.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(&directives);
        out.push_str(tail);
        out
    }
}

impl fmt::Debug for Defines {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        formatter.debug_map().entries(self.values.iter()).finish()
    }
}

/// Returns the length of the leading comments, blank lines and `#version` directive of a
/// GLSL source.
///
/// A block comment followed by code on the same line ends the preamble right after its `*/`.
fn preamble_len(source: &str) -> usize {
    let mut offset = 0;

    loop {
        let rest = &source[offset..];
        let trimmed = rest.trim_start();
        let skipped = rest.len() - trimmed.len();

        let len = if trimmed.starts_with("//") || trimmed.starts_with("#version") {
            line_len(trimmed)
        } else if let Some(comment) = trimmed.strip_prefix("/*") {
            let close = match comment.find("*/") {
                Some(close) => close + 4,
                // unterminated, the whole source is a comment
                None => return source.len(),
            };

            // swallow the end of the line, unless code follows the comment
            let after = &trimmed[close..];
            let end = line_len(after);
            if after[..end].trim().is_empty() { close + end } else { close }
        } else {
            // keep the indentation of the first line of code
            return offset + rest[..skipped].rfind('\n').map_or(0, |i| i + 1);
        };

        offset += skipped + len;
    }
}

/// Length of the first line of `text`, including its `\n`.
#[inline]
fn line_len(text: &str) -> usize {
    text.find('\n').map_or(text.len(), |i| i + 1)
}

/// Source code of a shader, plus defines to inject into it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ShaderSource {
    base: String,
    defines: Defines,
}

impl ShaderSource {
    /// Builds a source without defines.
    #[inline]
    pub fn new<S>(base: S) -> ShaderSource where S: Into<String> {
        ShaderSource {
            base: base.into(),
            defines: Defines::new(),
        }
    }

    /// Builds a source with a set of defines.
    #[inline]
    pub fn with_defines<S>(base: S, defines: Defines) -> ShaderSource where S: Into<String> {
        ShaderSource {
            base: base.into(),
            defines,
        }
    }

    /// Builder-style version of `set_define`.
    #[inline]
    pub fn define<V>(mut self, name: &str, value: V) -> ShaderSource where V: Into<DefineValue> {
        self.defines.set(name, value);
        self
    }

    /// Sets a define, replacing any previous value.
    #[inline]
    pub fn set_define<V>(&mut self, name: &str, value: V) where V: Into<DefineValue> {
        self.defines.set(name, value);
    }

    /// Returns the source without its defines.
    #[inline]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Returns the defines.
    #[inline]
    pub fn defines(&self) -> &Defines {
        &self.defines
    }

    /// Returns the final source text.
    #[inline]
    pub fn compose(&self) -> String {
        self.defines.compose(&self.base)
    }
}
