#![forbid(unsafe_code)]

mod rendering;

pub use rendering::{render_domain_points_to_png, render_unit_points_to_png, RenderConfig};
