/// Export backends — heightmap/legend PNGs, diagnostic noise maps and JSON.
pub mod json;
pub mod noise_maps;
pub mod png;

pub use json::export_json;
pub use noise_maps::export_noise_maps;
pub use png::{export_legend_png, export_png};
