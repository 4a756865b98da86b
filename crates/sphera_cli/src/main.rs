//! sphera - color harmony palettes in the terminal
//!
//! Generates palettes from a base color and a harmony scheme, and runs an
//! interactive session that drives the same engine a graphical front end
//! would.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use sphera_palette::{HarmonyInputs, HarmonyScheme, HexColor, PaletteState};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod init;
mod session;
mod terminal;

use config::SpheraConfig;
use session::Session;
use terminal::Screen;

#[derive(Parser)]
#[command(name = "sphera")]
#[command(about = "Color harmony palette generator")]
#[command(version)]
struct Cli {
    /// Path to sphera.toml (defaults to ./sphera.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a palette from harmony parameters
    Generate {
        /// Harmony scheme (id or display name)
        #[arg(short, long)]
        scheme: Option<HarmonyScheme>,

        /// Base hue in degrees
        #[arg(long)]
        hue: Option<f32>,

        /// Base saturation in percent
        #[arg(long)]
        saturation: Option<f32>,

        /// Base brightness in percent
        #[arg(long)]
        brightness: Option<f32>,

        /// Spread between neighbors in degrees
        #[arg(long)]
        spread: Option<f32>,

        /// Base color as hex; overrides hue, saturation and brightness
        #[arg(short, long, conflicts_with_all = ["hue", "saturation", "brightness"])]
        primary: Option<HexColor>,

        #[arg(short, long, value_enum, default_value_t = Format::Plain)]
        format: Format,
    },

    /// Generate a palette from a random vivid base color
    Random {
        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Harmony scheme (id or display name)
        #[arg(short, long)]
        scheme: Option<HarmonyScheme>,

        #[arg(short, long, value_enum, default_value_t = Format::Plain)]
        format: Format,
    },

    /// Show a color as hex, RGB and HSL
    Convert {
        /// Hex color (#RGB or #RRGGBB, `#` optional)
        color: HexColor,
    },

    /// List harmony schemes
    Schemes,

    /// Interactive session reading commands from stdin
    Session,

    /// Write a default sphera.toml
    Init {
        /// Directory to write into
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Swatches and hex codes
    Plain,
    /// CSS custom properties
    Css,
    /// Palette as JSON
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("sphera=info,sphera_palette=warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let ansi = !cli.no_color && io::stdout().is_terminal();

    let config_path = cli.config;
    let load_config = || SpheraConfig::load_or_default(config_path.as_deref());

    match cli.command {
        Commands::Generate {
            scheme,
            hue,
            saturation,
            brightness,
            spread,
            primary,
            format,
        } => {
            let mut state = load_config()?.build_state()?;
            let mut inputs = HarmonyInputs {
                scheme,
                base_hue: hue,
                saturation,
                brightness,
                spread,
            };
            if let Some(primary) = primary {
                let base = primary.to_hsl();
                inputs.base_hue = Some(base.hue);
                inputs.saturation = Some(base.saturation);
                inputs.brightness = Some(base.lightness);
            }
            state
                .set_from_harmony_inputs(inputs)
                .context("Failed to generate palette")?;
            print_palette(&state, format, ansi)
        }

        Commands::Random {
            seed,
            scheme,
            format,
        } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            let mut state = load_config()?.build_state()?;
            if let Some(scheme) = scheme {
                state
                    .set_from_harmony_inputs(HarmonyInputs::scheme(scheme))
                    .context("Failed to select scheme")?;
            }
            state
                .regenerate_colors(&mut rng)
                .context("Failed to generate palette")?;
            print_palette(&state, format, ansi)
        }

        Commands::Convert { color } => {
            let hsl = color.to_hsl();
            let [r, g, b] = color.to_rgb();
            println!("{}", terminal::swatch_row(&[color], ansi));
            println!("rgb({r}, {g}, {b})");
            println!(
                "hsl({:.0}, {:.0}%, {:.0}%)",
                hsl.hue, hsl.saturation, hsl.lightness
            );
            Ok(())
        }

        Commands::Schemes => {
            let engine = load_config()?.engine()?;
            for scheme in HarmonyScheme::all() {
                let marker = if engine.supports(*scheme) { "*" } else { " " };
                let spread = if scheme.uses_spread() { "spread" } else { "" };
                println!(
                    "{marker} {:<20} {:<20} {spread}",
                    scheme.id(),
                    scheme.display_name()
                );
            }
            Ok(())
        }

        Commands::Session => {
            let config = load_config()?;
            let state = config.build_state()?;
            info!(
                scheme = %state.palette().scheme(),
                colors = state.palette().len(),
                "starting session"
            );
            let mut session = Session::new(
                state,
                config.feedback,
                Screen::new(ansi),
                StdRng::from_os_rng(),
            );
            if io::stdin().is_terminal() {
                eprintln!("{}", session::HELP);
            }
            session.run(io::stdin().lock(), io::stdout().lock())?;
            info!(colors = ?session.state().palette().hex_list(), "session ended");
            Ok(())
        }

        Commands::Init { path, force } => init::write_config(&path, force),
    }
}

fn print_palette(state: &PaletteState, format: Format, ansi: bool) -> Result<()> {
    let palette = state.palette();
    match format {
        Format::Plain => {
            println!("{}", terminal::controls_line(palette));
            println!("{}", terminal::swatch_row(palette.colors(), ansi));
        }
        Format::Css => {
            println!(":root {{");
            for (name, value) in state.css_variables() {
                println!("  --{name}: {value};");
            }
            println!("}}");
        }
        Format::Json => {
            let json = serde_json::to_string_pretty(palette).context("Failed to encode palette")?;
            println!("{json}");
        }
    }
    Ok(())
}
