//! Swoop CLI
//!
//! Inspect navigation bar outlines and simulate selection transitions.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fmt::Write;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use swoop_core::tessellate;
use swoop_navbar::{
    slot_centers, BarGeometry, CornerMode, CutoutPathBuilder, NavBar, NavBarFrame, NavItems,
};

mod config;

/// Upper bound on frames simulated for a single transition
const MAX_TRANSITION_FRAMES: usize = 10_000;

#[derive(Parser)]
#[command(name = "swoop")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Swoop navigation bar CLI", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every subcommand
#[derive(clap::Args, Debug)]
struct BarArgs {
    /// Style file (TOML)
    #[arg(short, long)]
    style: Option<PathBuf>,

    /// Comma-separated items as `id[:icon]`
    #[arg(short, long)]
    items: Option<String>,

    /// Bar width in pixels
    #[arg(short, long, default_value = "400")]
    width: f32,

    /// Bar height in pixels (defaults to the style's height)
    #[arg(long)]
    height: Option<f32>,

    /// Draw rounded top corners instead of sharp ones
    #[arg(long)]
    rounded: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the outline as SVG path data
    Outline {
        #[command(flatten)]
        bar: BarArgs,

        /// Item (id or index) the notch sits under
        #[arg(long, default_value = "0")]
        select: String,

        /// Explicit notch centre in pixels, overriding --select
        #[arg(long)]
        offset: Option<f32>,

        /// Also report the triangle count of the filled outline
        #[arg(long)]
        mesh: bool,
    },

    /// Step through a selection sequence, printing one JSON line per frame
    Simulate {
        #[command(flatten)]
        bar: BarArgs,

        /// Items (ids or indices) to navigate to, in order
        #[arg(required = true, value_delimiter = ',')]
        sequence: Vec<String>,

        /// Frames per second
        #[arg(long, default_value = "60")]
        fps: u32,
    },

    /// Render one frame of a transition as a standalone SVG
    Svg {
        #[command(flatten)]
        bar: BarArgs,

        /// Item (id or index) selected before the transition
        #[arg(long, default_value = "0")]
        from: String,

        /// Item (id or index) to navigate to
        #[arg(long)]
        to: Option<String>,

        /// Time into the transition, in milliseconds (settled if omitted)
        #[arg(long)]
        at_ms: Option<f32>,

        /// Output path (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List slot centres
    Slots {
        #[command(flatten)]
        bar: BarArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over --verbose
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Outline {
            bar,
            select,
            offset,
            mesh,
        } => cmd_outline(&bar, &select, offset, mesh),

        Commands::Simulate { bar, sequence, fps } => cmd_simulate(&bar, &sequence, fps),

        Commands::Svg {
            bar,
            from,
            to,
            at_ms,
            output,
        } => cmd_svg(&bar, &from, to.as_deref(), at_ms, output),

        Commands::Slots { bar } => cmd_slots(&bar),
    }
}

/// Bar built from the shared arguments, laid out and settled on `select`
fn build_bar(args: &BarArgs, select: &str) -> Result<NavBar> {
    let mut style = config::load_style(args.style.as_deref())?;
    if args.rounded {
        style.corner_mode = CornerMode::Rounded;
    }
    let items = config::parse_items(args.items.as_deref())?;
    let index = config::resolve_item(&items, select)?;

    let height = args.height.unwrap_or(style.bar_height * style.density);
    let mut bar = NavBar::new(items, style)?;

    // Select before layout so the first frame lands in place
    bar.navigate_to_index(index);
    bar.set_geometry(BarGeometry::new(args.width, height));

    debug!(
        width = args.width,
        height,
        selected = index,
        "bar laid out"
    );
    Ok(bar)
}

fn cmd_outline(args: &BarArgs, select: &str, offset: Option<f32>, mesh: bool) -> Result<()> {
    let bar = build_bar(args, select)?;
    let offset = offset.unwrap_or_else(|| bar.motion().offset());

    let builder = CutoutPathBuilder::from_metrics(bar.metrics());
    let geometry = builder.geometry(offset);
    let outline = builder.build(offset, bar.geometry().size());

    info!(
        "Notch at {:.1}px: radius {:.1}, spans {:.1}..{:.1}",
        geometry.offset, geometry.cutout_radius, geometry.left_x, geometry.right_x
    );
    println!("{}", outline.to_svg_data());

    if mesh {
        let fill = tessellate::tessellate_fill(&outline);
        println!(
            "{} vertices, {} triangles",
            fill.vertices.len(),
            fill.triangle_count()
        );
    }
    Ok(())
}

/// One simulated frame, as printed by `simulate`
#[derive(Debug, Serialize)]
struct FrameRecord {
    frame: usize,
    time_ms: f32,
    selected: String,
    offset: f32,
    target: f32,
    indicator: [f32; 2],
    icon_opacities: Vec<f32>,
    animating: bool,
}

fn cmd_simulate(args: &BarArgs, sequence: &[String], fps: u32) -> Result<()> {
    if fps == 0 {
        anyhow::bail!("--fps must be at least 1");
    }
    let dt = 1.0 / fps as f32;
    let mut bar = build_bar(args, "0")?;
    let mut frame_number = 0;

    for key in sequence {
        let index = config::resolve_item(bar.items(), key)?;
        bar.navigate_to_index(index);
        info!("Navigating to {}", key);

        for _ in 0..MAX_TRANSITION_FRAMES {
            let frame = bar.frame(dt);
            frame_number += 1;

            let record = FrameRecord {
                frame: frame_number,
                time_ms: frame_number as f32 * dt * 1000.0,
                selected: frame.indicator.item_id.clone(),
                offset: bar.motion().offset(),
                target: bar.motion().target_offset(),
                indicator: [frame.indicator.top_left.x, frame.indicator.top_left.y],
                icon_opacities: frame.icon_opacities,
                animating: frame.animating,
            };
            println!(
                "{}",
                serde_json::to_string(&record).context("Failed to serialize frame")?
            );

            if !record.animating {
                break;
            }
        }
    }
    Ok(())
}

fn cmd_svg(
    args: &BarArgs,
    from: &str,
    to: Option<&str>,
    at_ms: Option<f32>,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut bar = build_bar(args, from)?;
    if let Some(to) = to {
        let index = config::resolve_item(bar.items(), to)?;
        bar.navigate_to_index(index);
    }

    let frame = match at_ms {
        Some(ms) => advance_for(&mut bar, ms / 1000.0),
        None => settle(&mut bar),
    };
    let svg = render_svg(&frame, bar.geometry(), bar.items())?;

    match output {
        Some(path) => {
            fs::write(&path, svg)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => print!("{}", svg),
    }
    Ok(())
}

fn cmd_slots(args: &BarArgs) -> Result<()> {
    let bar = build_bar(args, "0")?;
    let items = bar.items();
    for (item, center) in items
        .iter()
        .zip(slot_centers(items.len(), bar.geometry().width_px))
    {
        println!("{:<12} {:>8.2}", item.id, center);
    }
    Ok(())
}

/// Advance in 60 fps steps for `seconds` and return the last frame
///
/// Stops early once the bar settles, and never runs more than
/// `MAX_TRANSITION_FRAMES` steps.
fn advance_for(bar: &mut NavBar, seconds: f32) -> NavBarFrame {
    let dt = 1.0 / 60.0;
    let steps = (seconds / dt)
        .round()
        .clamp(0.0, MAX_TRANSITION_FRAMES as f32) as usize;
    let mut frame = bar.frame(0.0);
    for _ in 0..steps {
        if !frame.animating {
            break;
        }
        frame = bar.frame(dt);
    }
    frame
}

fn settle(bar: &mut NavBar) -> NavBarFrame {
    let mut frame = bar.frame(0.0);
    for _ in 0..MAX_TRANSITION_FRAMES {
        if !frame.animating {
            break;
        }
        frame = bar.frame(1.0 / 60.0);
    }
    frame
}

/// Escape text for use in SVG element content and attribute values
fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn render_svg(frame: &NavBarFrame, geometry: BarGeometry, items: &NavItems) -> Result<String> {
    let mut svg = String::new();
    write_svg(&mut svg, frame, geometry, items).context("Failed to render SVG")?;
    Ok(svg)
}

fn write_svg(
    out: &mut impl Write,
    frame: &NavBarFrame,
    geometry: BarGeometry,
    items: &NavItems,
) -> std::fmt::Result {
    let indicator = &frame.indicator;
    let top = indicator.top_left.y.min(0.0);
    let height = geometry.height_px - top;

    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 {} {} {}">"#,
        top, geometry.width_px, height
    )?;
    writeln!(
        out,
        r##"  <path d="{}" fill="#6200ee"/>"##,
        frame.outline.to_svg_data()
    )?;
    writeln!(
        out,
        r##"  <path d="{}" fill="#03dac5"/>"##,
        indicator.shape.to_svg_data()
    )?;

    let centers = slot_centers(items.len(), geometry.width_px);
    let label_y = geometry.height_px * 0.6;
    for ((item, center), opacity) in items.iter().zip(centers).zip(&frame.icon_opacities) {
        writeln!(
            out,
            r##"  <text x="{}" y="{}" text-anchor="middle" fill="#ffffff" opacity="{:.3}">{}</text>"##,
            center,
            label_y,
            opacity,
            escape_xml(&item.label)
        )?;
    }
    writeln!(
        out,
        r##"  <text x="{}" y="{}" text-anchor="middle" fill="#000000">{}</text>"##,
        indicator.center.x,
        indicator.center.y,
        escape_xml(indicator.icon.as_str())
    )?;
    writeln!(out, "</svg>")
}
