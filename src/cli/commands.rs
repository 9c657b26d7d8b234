//! Subcommand handlers for convert and config actions.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::args::{ConfigAction, ConvertArgs};
use crate::ascii::GlyphRamp;
use crate::codec::PngCodec;
use crate::config::{default_path, Config, DEFAULT_CONFIG_TOML};
use crate::error::ConversionError;
use crate::pipeline::{ConvertOptions, Converter, OutputFormat};
use crate::render::{FontdueShaper, MonospaceFont, TextStyle};

/// Merge CLI flags over config values.
pub fn convert_options(args: &ConvertArgs, config: &Config) -> Result<ConvertOptions, ConversionError> {
    let ramp = match args.ramp.as_deref().or(config.convert.ramp.as_deref()) {
        Some(chars) => GlyphRamp::new(chars)?,
        None => GlyphRamp::reference(),
    };
    Ok(ConvertOptions {
        target_width: args.width.unwrap_or(config.convert.width),
        ramp,
        style: TextStyle {
            size: args.font_size.unwrap_or(config.render.font_size),
        },
    })
}

/// Build a converter; a font is only resolved when images are rendered.
pub fn build_converter(
    args: &ConvertArgs,
    config: &Config,
) -> Result<Converter, ConversionError> {
    let options = convert_options(args, config)?;
    let converter = Converter::new(options, Arc::new(PngCodec));

    if OutputFormat::from(args.format) == OutputFormat::Text {
        return Ok(converter);
    }

    let font = match args.font.as_deref().or(config.render.font_path.as_deref()) {
        Some(path) => MonospaceFont::load(path)?,
        None => MonospaceFont::discover(&config.render.font_family)?,
    };
    log::info!("Rendering with font '{}'", font.name());
    Ok(converter.with_shaper(Arc::new(FontdueShaper::new(font))))
}

/// Run the convert subcommand.
pub fn run_convert(args: &ConvertArgs, config: &Config) -> Result<(), String> {
    let format = OutputFormat::from(args.format);
    let converter = build_converter(args, config).map_err(|e| e.to_string())?;

    if let [input] = args.inputs.as_slice() {
        return convert_single(&converter, input, args.output.as_deref(), format, config);
    }

    if args.output.is_some() {
        log::warn!("--output is ignored when converting several inputs");
    }

    let results = converter.convert_files(&args.inputs, format);
    let mut failures = 0;
    for (input, result) in args.inputs.iter().zip(results) {
        match result {
            Ok(output) => println!("{} -> {}", input.display(), output.display()),
            Err(e) => {
                failures += 1;
                eprintln!("{}: {}", input.display(), e);
            }
        }
    }

    if failures > 0 {
        Err(format!("{} of {} conversions failed", failures, args.inputs.len()))
    } else {
        Ok(())
    }
}

fn convert_single(
    converter: &Converter,
    input: &Path,
    output: Option<&Path>,
    format: OutputFormat,
    config: &Config,
) -> Result<(), String> {
    let output: Option<PathBuf> = match (output, format) {
        (Some(path), _) => Some(path.to_path_buf()),
        (None, OutputFormat::Png) => Some(PathBuf::from(&config.output.filename)),
        (None, OutputFormat::Text) => None,
    };

    match output {
        Some(path) => {
            converter
                .convert_file(input, &path, format)
                .map_err(|e| e.to_string())?;
            if format == OutputFormat::Png {
                println!("Wrote {}", path.display());
            }
            Ok(())
        }
        None => {
            let bytes = std::fs::read(input).map_err(|e| {
                ConversionError::Io {
                    path: input.to_path_buf(),
                    source: e,
                }
                .to_string()
            })?;
            let text = converter
                .convert(&bytes, format)
                .map_err(|e| e.to_string())?;
            std::io::stdout()
                .write_all(&text)
                .map_err(|e| format!("Error writing to stdout: {}", e))
        }
    }
}

/// Handle config subcommand actions.
pub fn handle_config_action(action: ConfigAction, config_path: Option<&Path>) -> Result<(), String> {
    let path = config_path.map(PathBuf::from).unwrap_or_else(default_path);

    match action {
        ConfigAction::Show => {
            let config = Config::load(Some(&path)).map_err(|e| e.to_string())?;
            println!("Current configuration:");
            println!("  Width: {}", config.convert.width);
            println!(
                "  Ramp: {}",
                config
                    .convert
                    .ramp
                    .as_deref()
                    .map(|r| format!("{:?}", r))
                    .unwrap_or_else(|| "built-in".to_string())
            );
            match &config.render.font_path {
                Some(font) => println!("  Font: {}", font.display()),
                None => println!("  Font: {} (system search)", config.render.font_family),
            }
            println!("  Font size: {}", config.render.font_size);
            println!("  Output: {}", config.output.filename);
            println!();

            if path.exists() {
                println!("Config file: {} (exists)", path.display());
            } else {
                println!("Config file: {} (not found)", path.display());
            }
            Ok(())
        }
        ConfigAction::Init => {
            if path.exists() {
                return Err(format!(
                    "Config file already exists: {}\nUse 'asciify config show' to view current settings.",
                    path.display()
                ));
            }

            // Create parent directories if needed
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| format!("Error creating config directory: {}", e))?;
            }

            std::fs::write(&path, DEFAULT_CONFIG_TOML)
                .map_err(|e| format!("Error writing config file: {}", e))?;

            println!("Created config file: {}", path.display());
            Ok(())
        }
    }
}
