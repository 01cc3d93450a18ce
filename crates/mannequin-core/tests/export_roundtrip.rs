//! End-to-end export tests: full rigged character out to disk and back.

use glam::Vec3;
use image::GenericImageView as _;
use mannequin_core::prelude::*;

fn temp_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("mannequin_it_{}", name));
    std::fs::remove_dir_all(&dir).ok();
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn rigged_model(texture: Option<std::path::PathBuf>) -> CharacterModel {
    let mesh = Mesh {
        vertices: vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ],
        normals: vec![[0.0, 0.0, 1.0]; 4],
        uvs: vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
        faces: vec![[0, 1, 2], [0, 2, 3]],
    };

    let mut skeleton = Skeleton::new();
    let spine = skeleton.add_bone(Bone::new(
        "spine",
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(0.0, 0.6, 0.0),
    ));
    skeleton.add_bone(
        Bone::new("head", Vec3::new(0.0, 0.7, 0.0), Vec3::new(0.0, 1.0, 0.0))
            .with_parent(spine),
    );

    let mut weights = VertexWeights::new(4);
    for v in 0..2 {
        weights.add(v, 0, 1.0);
    }
    for v in 2..4 {
        weights.add(v, 0, 0.25);
        weights.add(v, 1, 0.75);
    }

    let mut material = Material::new("body");
    material.diffuse_texture = texture;

    CharacterModel::new("hero", mesh)
        .with_materials(vec![material])
        .with_skeleton(skeleton)
        .with_weights(weights)
        .with_license(LicenseInfo {
            author: "test suite".to_string(),
            license: "CC0".to_string(),
            homepage: None,
        })
}

#[test]
fn export_writes_document_and_materials() {
    let dir = temp_dir("document");
    let model = rigged_model(None);

    let report = export_model(&model, &ExportOptions::new(&dir)).expect("export");

    assert_eq!(report.vertex_count, 4);
    assert_eq!(report.triangle_count, 2);
    assert_eq!(report.bone_count, 4);
    assert!(report.json_path.ends_with("hero.json"));
    assert!(report.json_path.exists());
    assert_eq!(report.mtl_paths.len(), 1);
    assert!(report.mtl_paths[0].exists());

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn exported_document_is_valid_flat_json() {
    let dir = temp_dir("flat_json");
    let model = rigged_model(None);

    export_model(&model, &ExportOptions::new(&dir)).expect("export");
    let text = std::fs::read_to_string(dir.join("hero.json")).expect("read document");

    // the flat style still parses as ordinary JSON
    let doc: serde_json::Value = serde_json::from_str(&text).expect("parse document");
    assert_eq!(doc["vertices"].as_array().map(Vec::len), Some(12));
    assert_eq!(doc["bones"].as_array().map(Vec::len), Some(4));
    assert_eq!(doc["skinIndices"].as_array().map(Vec::len), Some(16));
    assert_eq!(doc["materials"][0], serde_json::json!("body"));
    assert_eq!(doc["license"]["license"], serde_json::json!("CC0"));

    // each array sits on a single line (modulo the member separator)
    let vertices_line = text
        .lines()
        .find(|l| l.contains("\"vertices\""))
        .expect("vertices line");
    assert!(vertices_line.trim_end().trim_end_matches(',').ends_with(']'));
    let bones_line = text.lines().find(|l| l.contains("\"bones\"")).expect("bones line");
    assert!(bones_line.contains("spine____head"));
    assert!(bones_line.trim_end().trim_end_matches(',').ends_with(']'));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn exported_skin_arrays_reference_split_bones() {
    let dir = temp_dir("skin");
    let model = rigged_model(None);

    export_model(&model, &ExportOptions::new(&dir)).expect("export");
    let text = std::fs::read_to_string(dir.join("hero.json")).expect("read document");
    let doc: serde_json::Value = serde_json::from_str(&text).expect("parse document");

    // vertex 2's strongest influence is source bone 1, doubled to 2
    let indices = doc["skinIndices"].as_array().expect("skinIndices");
    assert_eq!(indices[8], serde_json::json!(2));
    let weights = doc["skinWeights"].as_array().expect("skinWeights");
    assert_eq!(weights[8], serde_json::json!(0.75));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn export_copies_and_resizes_textures() {
    let dir = temp_dir("textures");
    let src = dir.join("body_diffuse.png");
    image::RgbaImage::new(600, 800)
        .save(&src)
        .expect("write source texture");

    let model = rigged_model(Some(src));
    export_model(&model, &ExportOptions::new(&dir)).expect("export");

    let mtl = std::fs::read_to_string(dir.join("body.mtl")).expect("read mtl");
    assert!(mtl.contains("newmtl body"));
    assert!(mtl.contains("map_Kd textures/body_diffuse.png"));
    // diffuse texture forces full opacity
    assert!(mtl.contains("d 1\n"));

    let copied = image::open(dir.join("textures/body_diffuse.png")).expect("open copy");
    assert_eq!((copied.width(), copied.height()), (512, 682));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn missing_texture_is_skipped_not_fatal() {
    let dir = temp_dir("missing_tex");
    let model = rigged_model(Some(dir.join("does_not_exist.png")));

    let report = export_model(&model, &ExportOptions::new(&dir)).expect("export");
    assert!(report.mtl_paths[0].exists());

    // the mtl still references the path the copy would have produced
    let mtl = std::fs::read_to_string(&report.mtl_paths[0]).expect("read mtl");
    assert!(mtl.contains("map_Kd textures/does_not_exist.png"));

    std::fs::remove_dir_all(&dir).ok();
}
