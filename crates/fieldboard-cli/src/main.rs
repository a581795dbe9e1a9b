//! Fieldboard CLI - pack, validate and export saved layouts.

#![allow(
    clippy::needless_pass_by_value,
    clippy::uninlined_format_args,
    clippy::too_many_lines,
    clippy::module_name_repetitions,
    clippy::single_match_else,
    clippy::items_after_statements
)]

use clap::{Parser, Subcommand};
use fieldboard_core::{Color, GridSpec, Size};
use fieldboard_data::{LayoutFile, SavedRegion};
use fieldboard_layout::{cells_of, AutoPacker, Board};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fieldboard")]
#[command(about = "Grid-constrained form-region layout CLI")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Auto-place every field that has no region yet
    Pack {
        /// Path to the layout file
        layout: PathBuf,

        /// Canvas size as WIDTHxHEIGHT
        #[arg(short, long, default_value = "600x600", value_parser = parse_canvas)]
        canvas: Size,

        /// Grid unit in device units
        #[arg(short, long, default_value_t = 20.0)]
        unit: f32,

        /// Extra comma-separated field names to append to the catalog
        #[arg(short, long)]
        fields: Option<String>,

        /// Outline color for packed regions (hex, e.g. #0064ff)
        #[arg(long)]
        color: Option<String>,

        /// Write the result here instead of back to the input file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check a layout against the structural invariants
    Validate {
        /// Path to the layout file
        layout: PathBuf,

        /// Grid unit in device units
        #[arg(short, long, default_value_t = 20.0)]
        unit: f32,
    },

    /// Print the placed regions
    Export {
        /// Path to the layout file
        layout: PathBuf,

        /// Output format (tsv, json)
        #[arg(short, long, default_value = "tsv")]
        format: String,
    },

    /// List catalog fields and their placement state
    Fields {
        /// Path to the layout file
        layout: PathBuf,

        /// Grid unit in device units
        #[arg(short, long, default_value_t = 20.0)]
        unit: f32,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Pack {
            layout,
            canvas,
            unit,
            fields,
            color,
            output,
        } => pack(&layout, canvas, unit, fields.as_deref(), color.as_deref(), output),
        Commands::Validate { layout, unit } => validate(&layout, unit),
        Commands::Export { layout, format } => export(&layout, &format),
        Commands::Fields { layout, unit } => list_fields(&layout, unit),
    };

    if let Err(message) = result {
        eprintln!("error: {message}");
        std::process::exit(1);
    }
}

fn parse_canvas(value: &str) -> Result<Size, String> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{value}'"))?;
    let width: f32 = w.parse().map_err(|_| format!("invalid width '{w}'"))?;
    let height: f32 = h.parse().map_err(|_| format!("invalid height '{h}'"))?;
    if width <= 0.0 || height <= 0.0 {
        return Err("canvas dimensions must be positive".to_string());
    }
    Ok(Size::new(width, height))
}

fn pack(
    path: &PathBuf,
    canvas: Size,
    unit: f32,
    extra_fields: Option<&str>,
    color: Option<&str>,
    output: Option<PathBuf>,
) -> Result<(), String> {
    let mut layout = LayoutFile::load(path).map_err(|e| e.to_string())?;
    if let Some(extra) = extra_fields {
        layout.fields.extend(
            extra
                .split(',')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(String::from),
        );
    }

    let mut board = layout.into_board(GridSpec::new(unit));
    if let Some(hex) = color {
        let parsed = Color::from_hex(hex).map_err(|e| format!("--color: {e}"))?;
        board.set_region_color(parsed);
    }

    let report = AutoPacker::new().pack(&mut board, canvas);
    for region in &report.placed {
        println!(
            "placed {} at ({}, {}) {}x{}",
            region.field_id,
            region.bounds.x,
            region.bounds.y,
            region.bounds.width,
            region.bounds.height
        );
    }
    for field in &report.failed {
        eprintln!("warning: no space left for '{field}'");
    }

    let destination = output.unwrap_or_else(|| path.clone());
    LayoutFile::from_board(&board)
        .save(&destination)
        .map_err(|e| e.to_string())?;
    println!(
        "{} placed, {} failed -> {}",
        report.placed.len(),
        report.failed.len(),
        destination.display()
    );
    Ok(())
}

fn validate(path: &PathBuf, unit: f32) -> Result<(), String> {
    let layout = LayoutFile::load(path).map_err(|e| e.to_string())?;
    let grid = GridSpec::new(unit);
    let mut violations = Vec::new();

    for (i, lhs) in layout.rects.iter().enumerate() {
        let lhs_cells = cells_of(&lhs.rect(), grid.unit());
        for rhs in &layout.rects[i + 1..] {
            if !lhs_cells.is_disjoint(&cells_of(&rhs.rect(), grid.unit())) {
                violations.push(format!("'{}' overlaps '{}'", lhs.field, rhs.field));
            }
        }
    }

    for saved in &layout.rects {
        let rect = saved.rect();
        if grid.intersects_frozen(&rect) {
            violations.push(format!("'{}' intrudes on the frozen rows", saved.field));
        }
        if rect.is_empty() {
            violations.push(format!("'{}' has a degenerate rectangle", saved.field));
        }
        let aligned = [saved.x, saved.y, saved.width, saved.height]
            .iter()
            .all(|v| v % grid.unit() == 0.0);
        if !aligned {
            violations.push(format!("'{}' is not aligned to the grid", saved.field));
        }
        if !layout.fields.contains(&saved.field) {
            violations.push(format!("'{}' is not in the field catalog", saved.field));
        }
    }

    if violations.is_empty() {
        println!(
            "ok: {} regions, {} fields",
            layout.rects.len(),
            layout.fields.len()
        );
        Ok(())
    } else {
        for violation in &violations {
            eprintln!("invalid: {violation}");
        }
        Err(format!("{} violation(s)", violations.len()))
    }
}

fn export(path: &PathBuf, format: &str) -> Result<(), String> {
    let layout = LayoutFile::load(path).map_err(|e| e.to_string())?;
    match format {
        "tsv" => {
            for SavedRegion {
                field,
                x,
                y,
                width,
                height,
            } in &layout.rects
            {
                println!("{field}\t{x}\t{y}\t{width}\t{height}");
            }
            Ok(())
        }
        "json" => {
            let json = serde_json::to_string_pretty(&layout.rects).map_err(|e| e.to_string())?;
            println!("{json}");
            Ok(())
        }
        other => Err(format!("unknown format '{other}' (expected tsv or json)")),
    }
}

fn list_fields(path: &PathBuf, unit: f32) -> Result<(), String> {
    let layout = LayoutFile::load(path).map_err(|e| e.to_string())?;
    let board: Board = layout.into_board(GridSpec::new(unit));
    for field in board.catalog().fields() {
        let marker = if board.catalog().is_used(field) {
            "[x]"
        } else {
            "[ ]"
        };
        println!("{marker} {field}");
    }
    Ok(())
}
