/// Byte-size comparison of a transform's input and output, as shown to
/// the user after a successful run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformStats {
    pub original_bytes: usize,
    pub transformed_bytes: usize,
}

impl TransformStats {
    pub fn measure(original: &str, transformed: &str) -> Self {
        Self {
            original_bytes: original.len(),
            transformed_bytes: transformed.len(),
        }
    }

    /// Percentage saved relative to the original; negative when the
    /// output grew.
    pub fn compression_percent(&self) -> f64 {
        if self.original_bytes == 0 {
            return 0.0;
        }
        (1.0 - self.transformed_bytes as f64 / self.original_bytes as f64) * 100.0
    }
}
