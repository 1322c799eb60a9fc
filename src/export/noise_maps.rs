/// Export every noise layer the terrain is built from as a false-colour PNG.
///
/// The maps produced are:
///
/// | File              | Range    | Description                                 |
/// |-------------------|----------|---------------------------------------------|
/// | noise_base.png    | [-1, 1]  | Raw 3D simplex at the first octave's scale  |
/// | noise_base_2d.png | [-1, 1]  | 2D slice of the same gradient table         |
/// | noise_ridge.png   | [ 0, 1]  | Ridge transform of the base field           |
/// | noise_fractal.png | [ 0, 1]  | Full fractal sum (the displacement values)  |
///
/// Colour encoding
/// ───────────────
/// All maps share the same "jet" ramp:
///   blue (low) → cyan → green → yellow → red (high)
///
/// Signed maps are linearly rescaled so that 0.0 → green, -1.0 → blue, +1.0 → red.
/// Unsigned maps are rescaled so that 0.0 → blue and 1.0 → red.
use crate::mesh::TerrainMesh;
use crate::noise::{NoiseField, Ridge, SimplexSource, fractal_noise3};
use image::{Rgb, RgbImage};

// ── Colour map ────────────────────────────────────────────────────────────────

/// "Jet" ramp: blue → cyan → green → yellow → red.
/// `t` ∈ [0.0, 1.0].
fn jet(t: f32) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    // Piecewise linear hat functions shifted to R, G, B channels.
    let r = (1.5 - (4.0 * t - 3.0).abs()).clamp(0.0, 1.0);
    let g = (1.5 - (4.0 * t - 2.0).abs()).clamp(0.0, 1.0);
    let b = (1.5 - (4.0 * t - 1.0).abs()).clamp(0.0, 1.0);
    [(r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8]
}

/// Colourize a signed value v ∈ [-1.0, 1.0] → jet(0.0 … 1.0).
#[inline]
fn diverge(v: f32) -> [u8; 3] {
    jet((v.clamp(-1.0, 1.0) + 1.0) * 0.5)
}

/// Colourize an unsigned value v ∈ [0.0, 1.0] → jet(0.0 … 1.0).
#[inline]
fn sequential(v: f32) -> [u8; 3] {
    jet(v.clamp(0.0, 1.0))
}

// ── PNG writer ────────────────────────────────────────────────────────────────

/// Writes `data` (length == side², row-major: index = row*side + col) to a
/// PNG at `path` using the provided colorizer.
fn save_map(data: &[f32], side: u32, path: &str, colorize: impl Fn(f32) -> [u8; 3]) {
    assert_eq!(data.len(), (side * side) as usize);
    let mut img = RgbImage::new(side, side);
    for (i, &v) in data.iter().enumerate() {
        let col = (i as u32) % side;
        let row = (i as u32) / side;
        img.put_pixel(col, row, Rgb(colorize(v)));
    }
    img.save(path)
        .unwrap_or_else(|e| eprintln!("[noise] failed to save {path}: {e}"));
    println!("[noise] wrote {path}");
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Re-samples every noise layer over the mesh's vertex grid and writes them
/// as false-colour PNGs into `dir/`. `source` must be the generator the mesh
/// was displaced with so the maps correspond to the actual terrain output.
pub fn export_noise_maps(mesh: &TerrainMesh, source: &SimplexSource, dir: &str) {
    let side = mesh.side();
    let n = (side * side) as usize;

    // Flat buffers (row-major: index = row*side + col)
    let mut base_buf = vec![0.0f32; n];
    let mut base_2d_buf = vec![0.0f32; n];
    let mut ridge_buf = vec![0.0f32; n];
    let mut fractal_buf = vec![0.0f32; n];

    let ridge = Ridge::new(source);
    let freq = mesh.options.frequency;

    for row in 0..side {
        for col in 0..side {
            let idx = (row * side + col) as usize;
            let v = mesh.at(col, row);
            let (x, z) = (v.x as f64, v.z as f64);

            // First-octave coordinates, matching what the fractal sum sees.
            base_buf[idx] = source.sample(x * freq, 0.0, z * freq) as f32;
            base_2d_buf[idx] = source.sample2(x * freq, z * freq) as f32;
            ridge_buf[idx] = ridge.sample(x * freq, 0.0, z * freq) as f32;

            // The displacement pass samples flat vertices, so y = 0 here too.
            fractal_buf[idx] = fractal_noise3(x, 0.0, z, &ridge, &mesh.options) as f32;
        }
    }

    // Persist each map
    save_map(&base_buf, side, &format!("{dir}/noise_base.png"), diverge);
    save_map(&base_2d_buf, side, &format!("{dir}/noise_base_2d.png"), diverge);
    save_map(&ridge_buf, side, &format!("{dir}/noise_ridge.png"), sequential);
    save_map(&fractal_buf, side, &format!("{dir}/noise_fractal.png"), sequential);
}
