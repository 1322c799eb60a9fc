mod export;
mod mesh;
mod noise;

use export::{export_json, export_legend_png, export_noise_maps, export_png};
use mesh::TerrainMesh;
use crate::noise::{NoiseOptions, Ridge, SimplexSource};

fn main() {
    // frequency: 0.2 = broad features across the 32-unit plane; raise for busier terrain
    // persistence: 0.1 = detail octaves fade fast, keeping the big ridges dominant
    let options = NoiseOptions {
        octaves: 3,
        amplitude: 1.0,
        frequency: 0.2,
        persistence: 0.1,
    };

    let seed: u32 = rand::random();
    let source = SimplexSource::new(seed);

    let mut mesh = TerrainMesh::plane(32.0, 256, seed, options);
    mesh.displace_heights(&Ridge::new(&source));

    let dir = format!("terrain/{}", mesh.seed);
    std::fs::create_dir_all(&dir).expect("failed to create output directory");

    export_png(&mesh, &format!("{dir}/heightmap.png"));
    export_legend_png(&mesh, &format!("{dir}/legend.png"));
    export_noise_maps(&mesh, &source, &dir);
    export_json(&mesh, &format!("{dir}/mesh.json"));

    println!("Terrain generated → {}/", dir);
}
