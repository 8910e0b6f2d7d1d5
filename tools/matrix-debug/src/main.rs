//! Matrix Debug Tools
//!
//! Host-side companion for the `led-matrix` engine. Everything is drawn
//! against the simulated controller, then decoded back from the registers
//! it received, so previews show exactly what a panel would display.
//!
//! # Usage
//!
//! ```bash
//! # List supported panels
//! matrix-debug devices list
//!
//! # Show wiring details for a panel
//! matrix-debug devices show leds9x16
//!
//! # Render text (with icon markup) and dump the bus traffic
//! matrix-debug render text "Hi {Heart}" --device leds16x9 --dump
//!
//! # Plot a shape
//! matrix-debug render shape rect 1 1 13 6
//!
//! # Pan a viewport over a 40x20 world
//! matrix-debug world --width 40 --height 20 --x 12 --y 4
//!
//! # Scroll text in real time
//! matrix-debug scroll "Hello {Happy}" --delay 60 --frames
//!
//! # Write and check a settings file
//! matrix-debug config generate --device leds9x16 -o matrix.toml
//! matrix-debug --config matrix.toml config check
//! ```

mod config;
mod devices;
mod preview;
mod scroll;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::ErrorKind;
use led_matrix::{Direction, Matrix, MatrixConfig, Shape, SimBus, Symbol};
use std::path::PathBuf;

use devices::{get_profile, profile_for, profile_names, DeviceProfile};
use preview::Snapshot;
use scroll::PlaybackConfig;

/// Matrix Debug Tools
///
/// Previews and settings for IS31FL3731 LED matrices
#[derive(Parser)]
#[command(name = "matrix-debug")]
#[command(author = "Prasanna Gautam")]
#[command(version = "0.1.0")]
#[command(about = "Preview and configuration toolkit for charlieplexed LED matrices")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Device profile operations
    #[command(subcommand)]
    Devices(DeviceCommands),

    /// Draw on a simulated panel and print the result
    #[command(subcommand)]
    Render(RenderCommands),

    /// Draw into a world and show a viewport of it
    World {
        /// Panel profile (overrides the settings file)
        #[arg(short, long)]
        device: Option<String>,

        /// World width in pixels
        #[arg(long, default_value_t = 32)]
        width: u16,

        /// World height in pixels
        #[arg(long, default_value_t = 16)]
        height: u16,

        /// Viewport left edge
        #[arg(long, default_value_t = 0)]
        x: i32,

        /// Viewport top edge
        #[arg(long, default_value_t = 0)]
        y: i32,

        /// Overlay live pixels on the world window
        #[arg(long, conflicts_with = "no_overlay")]
        overlay: bool,

        /// Show world pixels only
        #[arg(long)]
        no_overlay: bool,

        /// Text drawn on the live planes
        #[arg(long)]
        text: Option<String>,

        /// Viewport moves applied after positioning (e.g. "rrdd")
        #[arg(long)]
        moves: Option<String>,
    },

    /// Scroll text across a simulated panel
    Scroll {
        /// Text to scroll; `{Name}` inserts an icon
        text: String,

        /// Panel profile (overrides the settings file)
        #[arg(short, long)]
        device: Option<String>,

        /// Milliseconds between frames
        #[arg(long)]
        delay: Option<u32>,

        /// Top row of the text
        #[arg(long)]
        row: Option<i32>,

        /// Times to play the text
        #[arg(long, default_value_t = 1)]
        repeat: u32,

        /// Print every frame
        #[arg(long)]
        frames: bool,
    },

    /// Settings file operations
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum DeviceCommands {
    /// List all supported panels
    List,

    /// Show detailed information about a panel
    Show {
        /// Profile name or alias (e.g., leds16x9, 16x6, columns)
        device: String,
    },
}

#[derive(Subcommand)]
enum RenderCommands {
    /// Draw text with `{Name}` icon markup
    Text {
        text: String,

        #[arg(short, long)]
        device: Option<String>,

        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        x: i32,

        #[arg(long, default_value_t = 1, allow_hyphen_values = true)]
        y: i32,

        /// Make every lit pixel blink
        #[arg(long)]
        blink: bool,

        /// Invert the picture after drawing
        #[arg(long)]
        invert: bool,

        /// Print the bus transactions of the final update
        #[arg(long)]
        dump: bool,
    },

    /// Plot a line, filled box or rectangle outline
    Shape {
        #[arg(value_enum)]
        kind: ShapeKind,

        #[arg(allow_hyphen_values = true)]
        x0: i32,
        #[arg(allow_hyphen_values = true)]
        y0: i32,
        #[arg(allow_hyphen_values = true)]
        x1: i32,
        #[arg(allow_hyphen_values = true)]
        y1: i32,

        #[arg(short, long)]
        device: Option<String>,

        /// Shift the picture afterwards (up, down, left, right; repeatable)
        #[arg(long, value_enum)]
        shift: Vec<ShiftArg>,

        #[arg(long)]
        dump: bool,
    },

    /// Draw one icon or arrow by name
    Icon {
        /// Symbol name or markup key (e.g. Heart, SmallH, NorthEast)
        name: String,

        #[arg(short, long)]
        device: Option<String>,

        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        x: i32,

        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        y: i32,
    },

    /// List the built-in icons and arrows
    Icons,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Generate a commented settings file
    Generate {
        #[arg(short, long, default_value = "leds16x9")]
        device: String,

        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate the settings file given with --config
    Check,
}

#[derive(Clone, Copy, ValueEnum)]
enum ShapeKind {
    Line,
    Box,
    Rect,
}

impl From<ShapeKind> for Shape {
    fn from(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Line => Shape::Line,
            ShapeKind::Box => Shape::Box,
            ShapeKind::Rect => Shape::Rect,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ShiftArg {
    Up,
    Down,
    Left,
    Right,
}

impl From<ShiftArg> for Direction {
    fn from(arg: ShiftArg) -> Self {
        match arg {
            ShiftArg::Up => Direction::Up,
            ShiftArg::Down => Direction::Down,
            ShiftArg::Left => Direction::Left,
            ShiftArg::Right => Direction::Right,
        }
    }
}

/// Blocking delay for the reset sequence
struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }
}

/// Bus errors from the simulated controller
pub(crate) fn bus_error(kind: ErrorKind) -> anyhow::Error {
    anyhow::anyhow!("bus error: {:?}", kind)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    let filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let settings = match &cli.config {
        Some(path) => config::load(path)?,
        None => MatrixConfig::default(),
    };

    match cli.command {
        Commands::Devices(cmd) => handle_devices(cmd),
        Commands::Render(cmd) => handle_render(cmd, &settings),
        Commands::World {
            device,
            width,
            height,
            x,
            y,
            overlay,
            no_overlay,
            text,
            moves,
        } => {
            let overlay = match (overlay, no_overlay) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let view = WorldView { width, height, x, y, overlay, text, moves };
            handle_world(device.as_deref(), &view, &settings)
        }
        Commands::Scroll {
            text,
            device,
            delay,
            row,
            repeat,
            frames,
        } => {
            let playback = PlaybackConfig {
                delay_ms: delay.unwrap_or(settings.scroll_delay_ms),
                row: row.unwrap_or(settings.scroll_row),
                repeat,
                show_frames: frames,
            };
            handle_scroll(&text, device.as_deref(), &playback, &settings).await
        }
        Commands::Config(cmd) => handle_config(cmd, cli.config.as_deref(), &settings),
    }
}

/// Settings with the panel swapped for `device`, when given
fn resolve(device: Option<&str>, settings: &MatrixConfig) -> Result<MatrixConfig> {
    let mut settings = settings.clone();
    if let Some(name) = device {
        settings.variant = lookup(name)?.variant;
    }
    Ok(settings)
}

fn lookup(name: &str) -> Result<&'static DeviceProfile> {
    get_profile(name).ok_or_else(|| {
        anyhow::anyhow!(
            "Unknown device profile: {}. Use 'matrix-debug devices list' to see available profiles.",
            name
        )
    })
}

/// A reset engine on a fresh simulated controller
fn open_matrix(settings: &MatrixConfig) -> Result<Matrix<SimBus>> {
    let mut matrix = Matrix::from_config(SimBus::new(), settings)
        .map_err(|e| anyhow::anyhow!("{}", e))
        .with_context(|| "Invalid matrix settings")?;
    matrix.reset(&mut StdDelay).map_err(bus_error)?;
    log::debug!(
        "{} ready at 0x{:02X}",
        settings.variant.name(),
        settings.address
    );
    Ok(matrix)
}

/// Push the picture, print it and optionally the traffic it caused
fn show(matrix: &mut Matrix<SimBus>, dump: bool) -> Result<()> {
    matrix.bus_mut().clear_log();
    matrix.show().map_err(bus_error)?;
    Snapshot::capture(matrix.bus(), matrix.layout()).print();
    if dump {
        preview::print_transactions(matrix.bus().transactions());
    }
    Ok(())
}

fn handle_devices(cmd: DeviceCommands) -> Result<()> {
    match cmd {
        DeviceCommands::List => {
            println!("{}", "=".repeat(60));
            println!("{}", "Supported Panels".cyan().bold());
            println!("{}", "=".repeat(60));

            for name in profile_names() {
                if let Some(profile) = get_profile(name) {
                    let layout = profile.layout();
                    println!("\n  {}: {}", name.white().bold(), profile.description);
                    println!(
                        "    LEDs: {}x{} ({} total)",
                        layout.physical_width,
                        layout.physical_height,
                        profile.led_count()
                    );
                    println!("    Default address: 0x{:02X}", profile.address);
                }
            }

            println!("\n{}", "=".repeat(60));
            println!(
                "Use {} to see detailed profile information",
                "matrix-debug devices show <device>".cyan()
            );
        }

        DeviceCommands::Show { device } => {
            print_device_profile(lookup(&device)?);
        }
    }

    Ok(())
}

fn print_device_profile(profile: &DeviceProfile) {
    let layout = profile.layout();

    println!("{}", "=".repeat(70));
    println!("{}", format!("Panel Profile: {}", profile.name).cyan().bold());
    println!("{}", "=".repeat(70));

    println!("\n{}", "Basic Information:".white().bold());
    println!("  ID: {}", profile.id);
    println!("  Description: {}", profile.description);
    println!("  Default address: 0x{:02X}", profile.address);

    println!("\n{}", "Geometry:".white().bold());
    println!("  Physical: {}x{}", layout.physical_width, layout.physical_height);
    println!("  Addressable: {}x{}", layout.width, layout.height);
    println!("  Packing: {:?}", layout.packing);
    println!("  LED-control registers per frame: {}", layout.frame_registers);
    println!("  Lowest glyph row: {}", layout.glyph_row_max);
    println!("  World overlay default: {}", profile.world_overlay);

    println!("\n{}", "Wiring:".white().bold());
    for note in &profile.notes {
        println!("  {} - {}", note.topic.cyan(), note.detail);
    }

    println!("\n{}", "=".repeat(70));
}

fn handle_render(cmd: RenderCommands, settings: &MatrixConfig) -> Result<()> {
    match cmd {
        RenderCommands::Text {
            text,
            device,
            x,
            y,
            blink,
            invert,
            dump,
        } => {
            let settings = resolve(device.as_deref(), settings)?;
            let mut matrix = open_matrix(&settings)?;
            matrix.draw_text(&text, x, y);
            if invert {
                matrix.invert();
            }
            if blink {
                matrix.enable_blink(true).map_err(bus_error)?;
                mark_lit_blinking(&mut matrix);
            }
            println!(
                "{} {:?} is {} columns wide",
                "[*]".cyan().bold(),
                text,
                matrix.measure_text(&text)
            );
            show(&mut matrix, dump)?;
        }

        RenderCommands::Shape {
            kind,
            x0,
            y0,
            x1,
            y1,
            device,
            shift,
            dump,
        } => {
            let settings = resolve(device.as_deref(), settings)?;
            let mut matrix = open_matrix(&settings)?;
            matrix.plot(kind.into(), x0, y0, x1, y1, true);
            for direction in shift {
                matrix.shift(direction.into());
            }
            show(&mut matrix, dump)?;
        }

        RenderCommands::Icon { name, device, x, y } => {
            let symbol = find_symbol(&name)
                .ok_or_else(|| anyhow::anyhow!("Unknown icon: {}. Use 'matrix-debug render icons'.", name))?;
            let settings = resolve(device.as_deref(), settings)?;
            let mut matrix = open_matrix(&settings)?;
            matrix.draw_symbol(symbol, x, y);
            show(&mut matrix, false)?;
        }

        RenderCommands::Icons => {
            println!("{}", "=".repeat(60));
            println!("{}", "Built-in Icons and Arrows".cyan().bold());
            println!("{}", "=".repeat(60));
            for &symbol in Symbol::ALL {
                let kind = if symbol.is_arrow() { "arrow" } else { "icon" };
                println!(
                    "  {:>2}  {:<14} {{{}}}  {}",
                    symbol.index(),
                    format!("{:?}", symbol).white(),
                    symbol.key(),
                    kind.dimmed()
                );
            }
            println!("{}", "=".repeat(60));
        }
    }

    Ok(())
}

fn find_symbol(name: &str) -> Option<Symbol> {
    Symbol::ALL
        .iter()
        .copied()
        .find(|s| format!("{:?}", s).eq_ignore_ascii_case(name))
        .or_else(|| Symbol::from_key(name))
}

fn mark_lit_blinking(matrix: &mut Matrix<SimBus>) {
    for y in 0..=matrix.max_y() {
        for x in 0..=matrix.max_x() {
            if matrix.is_pixel(x, y) {
                matrix.set_blink(x, y, true);
            }
        }
    }
}

struct WorldView {
    width: u16,
    height: u16,
    x: i32,
    y: i32,
    overlay: Option<bool>,
    text: Option<String>,
    moves: Option<String>,
}

fn handle_world(device: Option<&str>, view: &WorldView, settings: &MatrixConfig) -> Result<()> {
    let settings = resolve(device, settings)?;
    let mut matrix = open_matrix(&settings)?;

    match view.overlay {
        Some(overlay) => matrix.world_create_with_overlay(view.width, view.height, overlay),
        None => matrix.world_create(view.width, view.height),
    }

    // border, both diagonals and a filled block in the middle
    let (w, h) = (i32::from(view.width) - 1, i32::from(view.height) - 1);
    matrix.world_plot(Shape::Rect, 0, 0, w, h, true);
    matrix.world_plot(Shape::Line, 0, 0, w, h, true);
    matrix.world_plot(Shape::Line, 0, h, w, 0, true);
    matrix.world_plot(Shape::Box, w / 2 - 2, h / 2 - 1, w / 2 + 2, h / 2 + 1, true);

    if let Some(text) = &view.text {
        matrix.draw_text(text, 0, 1);
    }

    matrix.world_position_frame(view.x, view.y);
    for step in view.moves.as_deref().unwrap_or("").chars() {
        let direction = match step.to_ascii_lowercase() {
            'u' => Direction::Up,
            'd' => Direction::Down,
            'l' => Direction::Left,
            'r' => Direction::Right,
            other => anyhow::bail!("Unknown move '{}': use u, d, l or r", other),
        };
        matrix.world_move_frame(direction);
    }

    let (fx, fy) = matrix.world_frame_position();
    let (mx, my) = matrix.world_frame_max();
    println!(
        "{} world {}x{}, viewport at ({}, {}) of ({}, {}), overlay {}",
        "[*]".cyan().bold(),
        view.width,
        view.height,
        fx,
        fy,
        mx,
        my,
        matrix.world().is_some_and(|w| w.overlay())
    );
    show(&mut matrix, false)
}

async fn handle_scroll(
    text: &str,
    device: Option<&str>,
    playback: &PlaybackConfig,
    settings: &MatrixConfig,
) -> Result<()> {
    let settings = resolve(device, settings)?;
    let mut matrix = open_matrix(&settings)?;

    let stats = scroll::play(&mut matrix, text, playback).await?;
    println!(
        "{} scrolled {} columns in {} frames",
        "[OK]".green().bold(),
        stats.text_width,
        stats.frames
    );
    Ok(())
}

fn handle_config(cmd: ConfigCommands, path: Option<&std::path::Path>, settings: &MatrixConfig) -> Result<()> {
    match cmd {
        ConfigCommands::Generate { device, output } => {
            let profile = lookup(&device)?;
            let text = config::generate(profile)?;

            if let Some(path) = output {
                std::fs::write(&path, &text)
                    .with_context(|| format!("Failed to write settings: {}", path.display()))?;
                println!(
                    "{} Settings written to {}",
                    "[OK]".green().bold(),
                    path.display()
                );
            } else {
                println!("{}", text);
            }
        }

        ConfigCommands::Check => {
            let Some(path) = path else {
                anyhow::bail!("No settings file given; pass one with --config <path>");
            };
            // load() already validated it
            let profile = profile_for(settings.variant);
            println!("{} {} is valid", "[OK]".green().bold(), path.display());
            println!("  Panel: {} ({})", profile.name, profile.description);
            println!("  Address: 0x{:02X}", settings.address);
            println!("  Brightness: {}", settings.brightness);
            println!("  Blink frequency: {}", settings.blink_frequency);
            println!(
                "  Scroll: {} ms/frame at row {}",
                settings.scroll_delay_ms, settings.scroll_row
            );
            match settings.world_overlay {
                Some(overlay) => println!("  World overlay: {}", overlay),
                None => println!("  World overlay: panel default ({})", profile.world_overlay),
            }
        }
    }

    Ok(())
}
