use crate::mesh::TerrainMesh;
use std::fs::File;
use std::io::Write;

pub fn export_json(mesh: &TerrainMesh, path: &str) {
    let json = serde_json::to_string_pretty(mesh).unwrap();
    let mut file = File::create(path).unwrap();
    file.write_all(json.as_bytes()).unwrap();
}
