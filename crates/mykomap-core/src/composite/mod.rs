pub mod aggregate;
pub mod config;
pub mod render;

pub use aggregate::{aggregate_surfaces, ProbabilitySurface};
pub use config::{AggregationConfig, RenderConfig};
pub use render::{build_composite, darken_factor, render_composite};
