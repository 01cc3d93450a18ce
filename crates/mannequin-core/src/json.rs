//! Flat-array JSON document writer
//!
//! The target engine's model loader expects a document where objects are
//! pretty-printed but arrays sit on a single line with no interior
//! whitespace, however deeply their contents nest. A stock pretty-printer
//! spreads a 50k-entry vertex array over 50k lines; this writer keeps the
//! document diffable without bloating it.

use crate::Result;
use crate::model::CharacterModel;
use crate::skeleton::split_bones;
use serde_json::{Map, Value, json};
use std::io;

/// Default indent width for object members
pub const DEFAULT_INDENT: usize = 2;

/// Render a JSON value in the flat-array style with the default indent
pub fn write_flat(value: &Value) -> String {
    write_flat_indent(value, DEFAULT_INDENT)
}

/// Render a JSON value: objects indented, arrays compact on one line
pub fn write_flat_indent(value: &Value, indent: usize) -> String {
    let mut buf = Vec::new();
    // writing into a Vec cannot fail
    fmt_value(&mut buf, value, 0, indent).ok();
    String::from_utf8_lossy(&buf).into_owned()
}

/// Stream a JSON value in the flat-array style straight to a writer,
/// without materializing the document as a `String` first
pub fn to_flat_writer<W: io::Write>(mut writer: W, value: &Value) -> Result<()> {
    fmt_value(&mut writer, value, 0, DEFAULT_INDENT)?;
    Ok(())
}

fn fmt_value<W: io::Write>(
    out: &mut W,
    value: &Value,
    level: usize,
    indent: usize,
) -> io::Result<()> {
    match value {
        // Everything inside an array renders compact, nested objects
        // included. Value's Display impl is exactly that.
        Value::Array(_) => write!(out, "{}", value),
        Value::Object(map) if map.is_empty() => out.write_all(b"{}"),
        Value::Object(map) => {
            out.write_all(b"{\n")?;
            let pad = " ".repeat((level + 1) * indent);
            for (i, (key, val)) in map.iter().enumerate() {
                write!(out, "{}{}: ", pad, Value::String(key.clone()))?;
                fmt_value(out, val, level + 1, indent)?;
                if i + 1 < map.len() {
                    out.write_all(b",")?;
                }
                out.write_all(b"\n")?;
            }
            write!(out, "{}}}", " ".repeat(level * indent))
        }
        other => write!(out, "{}", other),
    }
}

/// Round a geometry component to 5 decimal places, as an exact-ish f64
fn round5(v: f32) -> f64 {
    (f64::from(v) * 100_000.0).round() / 100_000.0
}

fn flat_f32(values: impl IntoIterator<Item = f32>) -> Value {
    Value::Array(values.into_iter().map(|v| json!(round5(v))).collect())
}

/// Assemble the full model document for a character.
///
/// Geometry components are rounded to 5 decimal places; skin weights to 4
/// (see [`crate::skin::VertexWeights::compile`]). Rig sections are present
/// only when the model carries a skeleton and weights. A skeleton whose
/// bones are not stored parent-before-child is rejected.
pub fn model_document(model: &CharacterModel, influences_per_vertex: usize) -> Result<Value> {
    if let Some(skeleton) = &model.skeleton {
        if !skeleton.is_ordered() {
            return Err(crate::Error::InvalidModel(
                "skeleton bones must be stored parent-before-child".to_string(),
            ));
        }
    }

    let mut doc = Map::new();

    doc.insert(
        "metadata".into(),
        json!({
            "formatVersion": 3.1,
            "generator": "mannequin",
            "version": env!("CARGO_PKG_VERSION"),
        }),
    );

    doc.insert(
        "vertices".into(),
        flat_f32(model.mesh.vertices.iter().flatten().copied()),
    );
    doc.insert(
        "normals".into(),
        flat_f32(model.mesh.normals.iter().flatten().copied()),
    );
    doc.insert(
        "uvs".into(),
        flat_f32(model.mesh.uvs.iter().flatten().copied()),
    );
    doc.insert(
        "faces".into(),
        Value::Array(
            model
                .mesh
                .faces
                .iter()
                .flatten()
                .map(|&i| json!(i))
                .collect(),
        ),
    );

    doc.insert(
        "materials".into(),
        Value::Array(
            model
                .materials
                .iter()
                .map(|m| json!(m.name.clone()))
                .collect(),
        ),
    );

    if let Some(skeleton) = &model.skeleton {
        let bones: Vec<Value> = split_bones(skeleton)
            .iter()
            .map(|b| {
                let pos: Vec<f64> = b.pos.iter().map(|&v| round5(v)).collect();
                json!({
                    "name": b.name,
                    "pos": pos,
                    "rotq": b.rotq,
                    "scl": b.scl,
                    "parent": b.parent,
                })
            })
            .collect();
        doc.insert("bones".into(), Value::Array(bones));
    }

    if let Some(weights) = &model.weights {
        let (indices, skin_weights) = weights.compile(influences_per_vertex);
        doc.insert("influencesPerVertex".into(), json!(influences_per_vertex));
        doc.insert(
            "skinIndices".into(),
            Value::Array(indices.into_iter().map(|i| json!(i)).collect()),
        );
        doc.insert(
            "skinWeights".into(),
            Value::Array(
                skin_weights
                    .into_iter()
                    .map(|w| json!((f64::from(w) * 10_000.0).round() / 10_000.0))
                    .collect(),
            ),
        );
    }

    if let Some(license) = &model.license {
        doc.insert("license".into(), serde_json::to_value(license)?);
    }

    Ok(Value::Object(doc))
}
