//! Mannequin CLI - export rigged character models from the command line

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mannequin_core::prelude::*;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "mannequin")]
#[command(about = "Rigged character model export", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a model to JSON, MTL and texture files
    Export {
        /// Input model file (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory
        #[arg(short, long)]
        out: PathBuf,

        /// Directory for texture copies (defaults to the output directory)
        #[arg(long)]
        tex_dir: Option<PathBuf>,

        /// Cap on the smaller texture edge, in pixels
        #[arg(long, default_value = "512")]
        texture_size: u32,

        /// Bone influences per vertex
        #[arg(long, default_value = "4")]
        influences: usize,

        /// Reference textures by absolute path
        #[arg(long)]
        absolute_paths: bool,
    },

    /// Print a summary of a model file
    Inspect {
        /// Input model file (JSON)
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Export {
            input,
            out,
            tex_dir,
            texture_size,
            influences,
            absolute_paths,
        } => {
            run_export(
                &input,
                out,
                tex_dir,
                texture_size,
                influences,
                absolute_paths,
            )?;
        }
        Commands::Inspect { input } => {
            run_inspect(&input)?;
        }
    }

    Ok(())
}

fn load_model(input: &Path) -> Result<CharacterModel> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("reading model file {}", input.display()))?;
    let model = serde_json::from_str(&text)
        .with_context(|| format!("parsing model file {}", input.display()))?;
    Ok(model)
}

fn run_export(
    input: &Path,
    out: PathBuf,
    tex_dir: Option<PathBuf>,
    texture_size: u32,
    influences: usize,
    absolute_paths: bool,
) -> Result<()> {
    println!("Exporting {}...", input.display());

    let model = load_model(input)?;

    let mut options = ExportOptions::new(out)
        .with_texture_size(texture_size)
        .with_influences_per_vertex(influences);
    if let Some(tex_dir) = tex_dir {
        options = options.with_tex_dir(tex_dir);
    }
    if absolute_paths {
        options = options.with_absolute_paths();
    }

    let report = export_model(&model, &options)?;
    println!("{}", report);

    Ok(())
}

fn run_inspect(input: &Path) -> Result<()> {
    let model = load_model(input)?;

    println!("Model: {}", model.name);
    println!("  vertices:  {}", model.mesh.vertex_count());
    println!("  triangles: {}", model.mesh.triangle_count());
    println!("  materials: {}", model.materials.len());
    for material in &model.materials {
        let textured = if material.diffuse_texture.is_some() {
            " (textured)"
        } else {
            ""
        };
        println!("    - {}{}", material.name, textured);
    }
    match &model.skeleton {
        Some(skeleton) => println!(
            "  bones:     {} ({} after splitting)",
            skeleton.bone_count(),
            skeleton.bone_count() * 2
        ),
        None => println!("  bones:     none"),
    }
    if let Some(weights) = &model.weights {
        println!(
            "  weights:   {} vertices, up to {} influences",
            weights.vertex_count(),
            weights.max_influences()
        );
    }
    if let Some(license) = &model.license {
        println!("  license:   {} ({})", license.license, license.author);
    }

    Ok(())
}
