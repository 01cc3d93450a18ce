//! Wavefront `.mtl` material writer

#![allow(clippy::uninlined_format_args)]

use crate::Result;
use crate::model::{Color, Material};
use crate::texture::{TextureOptions, copy_texture};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Write one material to `{out_dir}/{material.name}.mtl`.
///
/// Texture maps are copied (and resized) into `textures/` under `tex_dir`
/// before their paths are written; pass `None` to keep textures next to
/// the `.mtl` file. Returns the path of the written file.
pub fn write_mtl(
    material: &Material,
    out_dir: &Path,
    tex_dir: Option<&Path>,
    opts: &TextureOptions,
) -> Result<PathBuf> {
    let tex_dir = tex_dir.unwrap_or(out_dir);
    fs::create_dir_all(out_dir)?;
    fs::create_dir_all(tex_dir)?;

    let path = out_dir.join(format!("{}.mtl", material.name));
    let file = File::create(&path)?;
    let mut writer = BufWriter::new(file);

    write_material(&mut writer, material, tex_dir, opts)?;
    writer.flush()?;

    Ok(path)
}

/// Write the material body to any writer
pub fn write_material<W: Write>(
    writer: &mut W,
    material: &Material,
    tex_dir: &Path,
    opts: &TextureOptions,
) -> Result<()> {
    writeln!(writer, "newmtl {}", material.name)?;

    write_color(writer, "Kd", material.diffuse_color)?;
    write_color(writer, "Ks", material.specular_color)?;
    write_color(writer, "Ka", material.ambient_color)?;
    write_color(writer, "Ke", material.emissive_color)?;
    writeln!(writer, "d {}", g4(material.export_alpha()))?;
    writeln!(writer, "wireframe {}", u8::from(material.wireframe))?;
    writeln!(writer, "Ns {}", g4(material.shininess))?;

    write_map(writer, "map_Kd", material.diffuse_texture.as_deref(), tex_dir, opts)?;
    write_map(writer, "map_Ks", material.specular_texture.as_deref(), tex_dir, opts)?;
    write_map(writer, "bump", material.bump_texture.as_deref(), tex_dir, opts)?;
    write_map(writer, "map_ao", material.ao_texture.as_deref(), tex_dir, opts)?;
    write_map(writer, "map_norm", material.normal_texture.as_deref(), tex_dir, opts)?;
    write_map(writer, "disp", material.displacement_texture.as_deref(), tex_dir, opts)?;
    // the loader reads the specular exponent map under its own key
    write_map(writer, "map_Ns", material.specular_texture.as_deref(), tex_dir, opts)?;

    Ok(())
}

fn write_color<W: Write>(writer: &mut W, key: &str, color: Color) -> Result<()> {
    writeln!(writer, "{} {} {} {}", key, g4(color.r), g4(color.g), g4(color.b))?;
    Ok(())
}

fn write_map<W: Write>(
    writer: &mut W,
    key: &str,
    texture: Option<&Path>,
    tex_dir: &Path,
    opts: &TextureOptions,
) -> Result<()> {
    let Some(texture) = texture else {
        return Ok(());
    };

    let copied = copy_texture(texture, tex_dir, opts);
    writeln!(writer, "{} {}", key, copied.display())?;
    Ok(())
}

/// Format a value with 4 significant digits, trailing zeros trimmed
/// (the `.mtl` convention for numeric fields).
///
/// Always fixed notation. Material scalars are colors, alphas and
/// specular exponents, all well below 10^4; magnitudes at or above that
/// print every digit instead of switching to scientific notation.
fn g4(v: f32) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    let exponent = v.abs().log10().floor() as i32;
    let decimals = (3 - exponent).max(0) as usize;
    let s = format!("{:.*}", decimals, v);
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_g4_formatting() {
        assert_eq!(g4(0.0), "0");
        assert_eq!(g4(1.0), "1");
        assert_eq!(g4(0.8), "0.8");
        assert_eq!(g4(0.123_456), "0.1235");
        assert_eq!(g4(25.0), "25");
        assert_eq!(g4(-0.5), "-0.5");
    }

    #[test]
    fn test_g4_stays_fixed_notation_for_large_values() {
        assert_eq!(g4(1000.0), "1000");
        assert_eq!(g4(25000.0), "25000");
    }

    fn render(material: &Material) -> String {
        let mut buf = Vec::new();
        let tex_dir = std::env::temp_dir();
        write_material(&mut buf, material, &tex_dir, &TextureOptions::default())
            .expect("write material");
        String::from_utf8(buf).expect("utf8")
    }

    #[test]
    fn test_basic_material_body() {
        let mut mat = Material::new("skin");
        mat.diffuse_color = Color::new(0.8, 0.6, 0.5);
        mat.shininess = 25.0;
        let text = render(&mat);

        assert!(text.starts_with("newmtl skin\n"));
        assert!(text.contains("Kd 0.8 0.6 0.5\n"));
        assert!(text.contains("d 1\n"));
        assert!(text.contains("wireframe 0\n"));
        assert!(text.contains("Ns 25\n"));
        // no texture channels, no map lines
        assert!(!text.contains("map_"));
    }

    #[test]
    fn test_opacity_without_texture() {
        let mat = Material::new("glass").with_opacity(0.25);
        let text = render(&mat);
        assert!(text.contains("d 0.25\n"));
    }

    #[test]
    fn test_write_mtl_creates_file() {
        let mat = Material::new("mannequin_mtl_test");
        let out_dir = std::env::temp_dir().join("mannequin_mtl_test");
        let path = write_mtl(&mat, &out_dir, None, &TextureOptions::default())
            .expect("write mtl");

        assert!(path.exists());
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("mannequin_mtl_test.mtl"));
        std::fs::remove_dir_all(&out_dir).ok();
    }
}
