pub mod mask;

pub use mask::{color_mask, mask_count, ColorBand, ProbabilityClass};
