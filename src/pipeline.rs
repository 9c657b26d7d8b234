//! Conversion pipeline: decode, downsample, map to glyphs, render, encode.
//!
//! [`Converter`] wires the pure stages in [`crate::ascii`] and
//! [`crate::render`] to the two boundary capabilities, an [`ImageCodec`]
//! and a [`TextShaper`]. It holds no mutable state, so one converter can
//! serve any number of threads.

use std::num::NonZeroUsize;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use crate::ascii::constants::DEFAULT_TARGET_WIDTH;
use crate::ascii::{downsample, to_ascii_grid, AsciiGrid, GlyphRamp, PixelBuffer};
use crate::codec::ImageCodec;
use crate::error::{ConversionError, Result};
use crate::render::{render_text, TextShaper, TextStyle};

/// What a conversion produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Text rendered to an image and encoded by the codec (PNG)
    #[default]
    Png,
    /// The grid as UTF-8 text, one line per row
    Text,
}

impl OutputFormat {
    /// Suffix used for outputs written next to their input.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "ascii.png",
            OutputFormat::Text => "ascii.txt",
        }
    }
}

/// Parameters of a conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    /// Width of the downsampled image, one character per pixel
    pub target_width: u32,
    /// Glyphs ordered darkest to lightest
    pub ramp: GlyphRamp,
    /// Font parameters for the rendered image
    pub style: TextStyle,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            target_width: DEFAULT_TARGET_WIDTH,
            ramp: GlyphRamp::reference(),
            style: TextStyle::default(),
        }
    }
}

/// Runs conversions with a fixed set of options and collaborators.
pub struct Converter {
    options: ConvertOptions,
    codec: Arc<dyn ImageCodec>,
    shaper: Option<Arc<dyn TextShaper>>,
    workers: usize,
}

impl Converter {
    /// Create a converter that can produce text output.
    ///
    /// Image output additionally needs a shaper, see [`Converter::with_shaper`].
    pub fn new(options: ConvertOptions, codec: Arc<dyn ImageCodec>) -> Self {
        Self {
            options,
            codec,
            shaper: None,
            workers: default_workers(),
        }
    }

    /// Attach the shaper used to render text into images.
    pub fn with_shaper(mut self, shaper: Arc<dyn TextShaper>) -> Self {
        self.shaper = Some(shaper);
        self
    }

    /// Cap the number of threads used by batch conversions (at least 1).
    ///
    /// Defaults to [`std::thread::available_parallelism`].
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Upper bound on threads used by batch conversions.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Downsample decoded pixels and map them onto the ramp.
    pub fn grid_from_pixels(&self, source: &PixelBuffer) -> Result<AsciiGrid> {
        let small = downsample(source, self.options.target_width)?;
        Ok(to_ascii_grid(&small, &self.options.ramp))
    }

    /// Decode image bytes and convert them into a grid.
    pub fn grid_from_bytes(&self, bytes: &[u8]) -> Result<AsciiGrid> {
        let source = self.codec.decode(bytes)?;
        self.grid_from_pixels(&source)
    }

    /// Rasterize a grid with the configured shaper.
    ///
    /// # Errors
    /// Returns [`ConversionError::RenderFailure`] if no shaper is attached
    /// or rendering fails.
    pub fn render(&self, grid: &AsciiGrid) -> Result<PixelBuffer> {
        let shaper = self.shaper.as_deref().ok_or_else(|| {
            ConversionError::RenderFailure("no text shaper configured".to_string())
        })?;
        render_text(grid, &self.options.style, shaper)
    }

    /// Run the full pipeline on encoded image bytes.
    pub fn convert(&self, bytes: &[u8], format: OutputFormat) -> Result<Vec<u8>> {
        let grid = self.grid_from_bytes(bytes)?;
        match format {
            OutputFormat::Text => Ok(grid.to_text().into_bytes()),
            OutputFormat::Png => {
                let image = self.render(&grid)?;
                self.codec.encode(&image)
            }
        }
    }

    /// Convert the file at `input` and write the result to `output`.
    pub fn convert_file(&self, input: &Path, output: &Path, format: OutputFormat) -> Result<()> {
        let bytes = std::fs::read(input).map_err(|source| ConversionError::Io {
            path: input.to_path_buf(),
            source,
        })?;
        let converted = self.convert(&bytes, format)?;
        std::fs::write(output, converted).map_err(|source| ConversionError::Io {
            path: output.to_path_buf(),
            source,
        })?;
        log::info!("Converted {} -> {}", input.display(), output.display());
        Ok(())
    }

    /// Convert several images in parallel on at most [`Converter::workers`]
    /// threads.
    ///
    /// Results are returned in input order. Each conversion is independent,
    /// so one failure does not affect the others.
    pub fn convert_batch(&self, inputs: &[&[u8]], format: OutputFormat) -> Vec<Result<Vec<u8>>> {
        run_bounded(inputs.len(), self.workers, |i| self.convert(inputs[i], format))
    }

    /// Convert several files in parallel, writing each output next to its
    /// input (see [`batch_output_path`]).
    pub fn convert_files(&self, inputs: &[PathBuf], format: OutputFormat) -> Vec<Result<PathBuf>> {
        run_bounded(inputs.len(), self.workers, |i| {
            let input = &inputs[i];
            let output = batch_output_path(input, format);
            self.convert_file(input, &output, format).map(|()| output)
        })
    }
}

fn default_workers() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Run `job(0..count)` on a pool of at most `workers` scoped threads.
///
/// Workers pull the next index from a shared counter, so at most `workers`
/// jobs run at once. A worker that cannot be spawned is skipped; if none
/// can be spawned the jobs run on the calling thread. A job that panics
/// yields `RenderFailure` for its own index only and its worker carries on.
pub(crate) fn run_bounded<T, F>(count: usize, workers: usize, job: F) -> Vec<Result<T>>
where
    T: Send,
    F: Fn(usize) -> Result<T> + Sync,
{
    let next = AtomicUsize::new(0);
    let slots: Mutex<Vec<Option<Result<T>>>> =
        Mutex::new(std::iter::repeat_with(|| None).take(count).collect());

    let work = || loop {
        let i = next.fetch_add(1, Ordering::Relaxed);
        if i >= count {
            break;
        }
        let result = panic::catch_unwind(AssertUnwindSafe(|| job(i))).unwrap_or_else(|_| {
            Err(ConversionError::RenderFailure(
                "conversion panicked".to_string(),
            ))
        });
        let mut slots = slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        slots[i] = Some(result);
    };

    let wanted = workers.max(1).min(count);
    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(wanted);
        for n in 0..wanted {
            match thread::Builder::new()
                .name(format!("asciify-worker-{}", n))
                .spawn_scoped(scope, work)
            {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    log::warn!("could not start conversion worker {}: {}", n, e);
                    break;
                }
            }
        }
        if handles.is_empty() && count > 0 {
            work();
        }
        // Joined here so a dead worker leaves empty slots instead of
        // propagating its panic out of the scope
        for handle in handles {
            let _ = handle.join();
        }
    });

    slots
        .into_inner()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .into_iter()
        .map(|slot| {
            slot.unwrap_or_else(|| {
                Err(ConversionError::RenderFailure(
                    "conversion worker panicked".to_string(),
                ))
            })
        })
        .collect()
}

/// Output path for a batch input: `photo.jpg` -> `photo.ascii.png`.
pub fn batch_output_path(input: &Path, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    input.with_file_name(format!("{}.{}", stem, format.extension()))
}
