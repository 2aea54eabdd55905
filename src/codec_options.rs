/// Options that control envelope encoding and decoding.
///
/// `CodecOptions` uses the builder pattern. The default settings are equivalent to
///
/// ```rust
/// use mapmsg::CodecOptions;
///
/// # fn default_codec_options() -> CodecOptions {
/// CodecOptions::default()
///     .max_depth(64)
/// # }
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodecOptions {
    pub(crate) max_depth: usize,
}

impl Default for CodecOptions {
    // NOTE: If we change this, make sure to change the doc comment above.
    fn default() -> Self {
        CodecOptions { max_depth: 64 }
    }
}

impl CodecOptions {
    /// Sets the deepest nesting of maps and lists that will be encoded or decoded. The root map
    /// counts as depth 1, so a value of 1 only allows flat maps of scalars. Encoding a deeper
    /// tree fails with an encoding error; decoding one fails with a corrupt envelope error.
    ///
    /// Decoding recurses once per nesting level, so this also bounds stack usage when decoding
    /// untrusted input.
    pub fn max_depth(self, max_depth: usize) -> Self {
        CodecOptions { max_depth }
    }
}
