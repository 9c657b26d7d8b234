//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::enums::Format;
use crate::ascii::constants::{MAX_FONT_SIZE, MAX_TARGET_WIDTH};

/// Parse and validate output width (1-2000 characters)
fn parse_width(s: &str) -> Result<u32, String> {
    let width: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid width", s))?;
    if !(1..=MAX_TARGET_WIDTH).contains(&width) {
        return Err(format!(
            "Width must be between 1 and {} characters, got {}",
            MAX_TARGET_WIDTH, width
        ));
    }
    Ok(width)
}

/// Parse and validate font size (greater than 0, at most 200 px)
fn parse_font_size(s: &str) -> Result<f32, String> {
    let size: f32 = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    if !(size > 0.0 && size <= MAX_FONT_SIZE) {
        return Err(format!("Font size must be in (0, {}], got {}", MAX_FONT_SIZE, size));
    }
    Ok(size)
}

/// Convert images into ASCII art text or images
#[derive(Parser, Debug)]
#[command(name = "asciify")]
#[command(version, about = "Convert images to ASCII art", long_about = None)]
#[command(after_help = "EXAMPLES:
    # Render photo.jpg as ASCII art into ascii_art.png
    asciify convert photo.jpg

    # Print the ASCII art to the terminal
    asciify convert photo.jpg --format text

    # Convert a batch in parallel (writes <name>.ascii.png next to each input)
    asciify convert a.png b.jpg c.gif")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert one or more images
    Convert(ConvertArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Args, Debug)]
pub struct ConvertArgs {
    /// Input image(s); several inputs are converted in parallel
    #[arg(required = true, value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,

    /// Output file (single input only; default: ascii_art.png, or stdout for text)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "png")]
    pub format: Format,

    /// ASCII art width in characters (default: 100)
    #[arg(short, long, value_parser = parse_width)]
    pub width: Option<u32>,

    /// Font file for image output (default: search system monospace fonts)
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Font size in pixels (default: 10)
    #[arg(long, value_parser = parse_font_size)]
    pub font_size: Option<f32>,

    /// Custom glyph ramp, darkest first
    #[arg(long)]
    pub ramp: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert_args(args: Args) -> ConvertArgs {
        match args.command {
            Command::Convert(c) => c,
            other => panic!("Expected Convert subcommand, got {:?}", other),
        }
    }

    #[test]
    fn test_convert_defaults() {
        let args = Args::parse_from(["asciify", "convert", "in.png"]);
        assert!(!args.verbose);
        assert!(args.config.is_none());
        let c = convert_args(args);
        assert_eq!(c.inputs, vec![PathBuf::from("in.png")]);
        assert!(c.output.is_none());
        assert_eq!(c.format, Format::Png);
        assert!(c.width.is_none());
        assert!(c.font.is_none());
        assert!(c.font_size.is_none());
        assert!(c.ramp.is_none());
    }

    #[test]
    fn test_convert_requires_input() {
        assert!(Args::try_parse_from(["asciify", "convert"]).is_err());
    }

    #[test]
    fn test_convert_multiple_inputs() {
        let c = convert_args(Args::parse_from(["asciify", "convert", "a.png", "b.jpg"]));
        assert_eq!(c.inputs.len(), 2);
    }

    #[test]
    fn test_convert_format_values() {
        let c = convert_args(Args::parse_from(["asciify", "convert", "a.png", "-f", "text"]));
        assert_eq!(c.format, Format::Text);
        let c = convert_args(Args::parse_from(["asciify", "convert", "a.png", "--format", "png"]));
        assert_eq!(c.format, Format::Png);
        assert!(Args::try_parse_from(["asciify", "convert", "a.png", "-f", "gif"]).is_err());
    }

    #[test]
    fn test_width_validation() {
        let c = convert_args(Args::parse_from(["asciify", "convert", "a.png", "-w", "80"]));
        assert_eq!(c.width, Some(80));
        assert!(Args::try_parse_from(["asciify", "convert", "a.png", "-w", "0"]).is_err());
        assert!(Args::try_parse_from(["asciify", "convert", "a.png", "-w", "5000"]).is_err());
        assert!(Args::try_parse_from(["asciify", "convert", "a.png", "-w", "wide"]).is_err());
    }

    #[test]
    fn test_font_size_validation() {
        let c = convert_args(Args::parse_from([
            "asciify", "convert", "a.png", "--font-size", "12.5",
        ]));
        assert_eq!(c.font_size, Some(12.5));
        assert!(Args::try_parse_from(["asciify", "convert", "a.png", "--font-size", "0"]).is_err());
        assert!(Args::try_parse_from(["asciify", "convert", "a.png", "--font-size", "NaN"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::parse_from(["asciify", "convert", "a.png", "-v", "-c", "/tmp/c.toml"]);
        assert!(args.verbose);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/c.toml")));
    }

    #[test]
    fn test_combined_options() {
        let c = convert_args(Args::parse_from([
            "asciify",
            "convert",
            "photo.jpg",
            "--output",
            "out.txt",
            "--format",
            "text",
            "--width",
            "60",
            "--font",
            "/fonts/Mono.ttf",
            "--ramp",
            "@#. ",
        ]));
        assert_eq!(c.output, Some(PathBuf::from("out.txt")));
        assert_eq!(c.format, Format::Text);
        assert_eq!(c.width, Some(60));
        assert_eq!(c.font, Some(PathBuf::from("/fonts/Mono.ttf")));
        assert_eq!(c.ramp.as_deref(), Some("@#. "));
    }

    #[test]
    fn test_config_show_subcommand() {
        let args = Args::parse_from(["asciify", "config", "show"]);
        match args.command {
            Command::Config {
                action: ConfigAction::Show,
            } => (),
            _ => panic!("Expected Config Show subcommand"),
        }
    }

    #[test]
    fn test_config_init_subcommand() {
        let args = Args::parse_from(["asciify", "config", "init"]);
        match args.command {
            Command::Config {
                action: ConfigAction::Init,
            } => (),
            _ => panic!("Expected Config Init subcommand"),
        }
    }
}
