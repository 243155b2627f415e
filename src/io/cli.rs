//! Command-line interface for generating one or more seeded mosaics

use crate::algorithm::executor::generate_from_catalog;
use crate::io::catalog::TileLibrary;
use crate::io::configuration::{OUTPUT_PREFIX, PLAN_SUFFIX, RANDOM_SEED_LENGTH};
use crate::io::error::Result;
use crate::io::image::{export_png, parse_hex_color, render_plan_with};
use crate::io::logging::level_for;
use crate::io::progress::ProgressManager;
use crate::io::settings::{PlanDocument, Settings};
use crate::io::svg::{export_svg, render_svg};
use clap::{Parser, ValueEnum};
use image::Rgba;
use indicatif::MultiProgress;
use log::LevelFilter;
use rand::Rng;
use rand::distr::Alphanumeric;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Which artifacts to write per seed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Raster PNG
    Png,
    /// Self-contained SVG
    Svg,
    /// Both PNG and SVG
    Both,
}

impl OutputFormat {
    /// File extensions written for this format
    pub const fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Png => &["png"],
            Self::Svg => &["svg"],
            Self::Both => &["png", "svg"],
        }
    }
}

#[derive(Parser)]
#[command(name = "seedmosaic")]
#[command(
    author,
    version,
    about = "Compose reproducible tile mosaics from a seed"
)]
/// Command-line arguments for the mosaic generator
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Directory of tile images, each one or two grid units square
    #[arg(value_name = "TILES")]
    pub tiles: PathBuf,

    /// Directory to write mosaics into
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Seed text; repeat to generate several mosaics
    #[arg(short, long = "seed", value_name = "TEXT")]
    pub seeds: Vec<String>,

    /// Also generate this many mosaics from random seeds
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub random_seeds: usize,

    /// Grid rows
    #[arg(short, long)]
    pub rows: Option<usize>,

    /// Grid columns
    #[arg(short, long)]
    pub cols: Option<usize>,

    /// Pixel size of a 1×1 grid cell
    #[arg(short, long)]
    pub unit: Option<u32>,

    /// Background colour showing through empty cells (#rgb, #rrggbb, #rrggbbaa)
    #[arg(short, long)]
    pub background: Option<String>,

    /// Rotate tiles by random quarter turns
    #[arg(long, value_name = "BOOL")]
    pub rotation: Option<bool>,

    /// Mirror tiles horizontally at random
    #[arg(long, value_name = "BOOL")]
    pub flips: Option<bool>,

    /// Leave clustered cells empty
    #[arg(long, value_name = "BOOL")]
    pub clustering: Option<bool>,

    /// Output artifact format
    #[arg(short = 'F', long, value_enum, default_value_t = OutputFormat::Png)]
    pub format: OutputFormat,

    /// Also write the placement plan as JSON
    #[arg(short, long)]
    pub plan: bool,

    /// Load settings from a JSON file before applying flags
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Write the effective settings to a JSON file
    #[arg(long, value_name = "FILE")]
    pub save_settings: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Log per-pass statistics
    #[arg(short, long)]
    pub verbose: bool,

    /// Regenerate even if output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Log level implied by the verbosity flags
    pub const fn log_level(&self) -> LevelFilter {
        level_for(self.quiet, self.verbose)
    }

    /// Merge loaded settings with command-line overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file cannot be loaded.
    pub fn effective_settings(&self) -> Result<Settings> {
        let mut settings = match &self.settings {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };

        if let Some(rows) = self.rows {
            settings.rows = rows;
        }
        if let Some(cols) = self.cols {
            settings.cols = cols;
        }
        if let Some(unit) = self.unit {
            settings.tile_unit_pixels = unit;
        }
        if let Some(background) = &self.background {
            settings.background.clone_from(background);
        }
        if let Some(rotation) = self.rotation {
            settings.options.random_rotation = rotation;
        }
        if let Some(flips) = self.flips {
            settings.options.allow_flips = flips;
        }
        if let Some(clustering) = self.clustering {
            settings.options.enable_clustering = clustering;
        }
        if let Some(seed) = self.seeds.first() {
            settings.seed.clone_from(seed);
        }

        Ok(settings)
    }

    /// Seeds to generate, in order
    ///
    /// Explicit seeds come first, followed by freshly drawn random seeds.
    /// With neither, the settings seed is used.
    pub fn seed_list(&self, settings: &Settings) -> Vec<String> {
        let mut seeds = self.seeds.clone();
        let mut rng = rand::rng();
        seeds.extend((0..self.random_seeds).map(|_| random_seed(&mut rng)));
        if seeds.is_empty() {
            seeds.push(settings.seed.clone());
        }
        seeds
    }
}

/// Draw a random alphanumeric seed string
pub fn random_seed(rng: &mut impl Rng) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(RANDOM_SEED_LENGTH)
        .map(char::from)
        .collect()
}

/// File-name-safe form of a seed
pub fn sanitize_seed(seed: &str) -> String {
    let sanitized: String = seed
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if sanitized.is_empty() {
        "empty".to_string()
    } else {
        sanitized
    }
}

/// Orchestrates catalog loading, generation, and export for every seed
pub struct MosaicProcessor {
    cli: Cli,
    settings: Settings,
    progress_manager: Option<ProgressManager>,
}

impl MosaicProcessor {
    /// Create a processor, resolving settings from file and flags
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file cannot be loaded.
    pub fn new(cli: Cli) -> Result<Self> {
        let settings = cli.effective_settings()?;
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Ok(Self {
            cli,
            settings,
            progress_manager,
        })
    }

    /// Settings in effect after applying flags
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Progress display handle for the logger, if progress is shown
    pub fn progress_handle(&self) -> Option<MultiProgress> {
        self.progress_manager
            .as_ref()
            .map(ProgressManager::multi_progress)
    }

    /// Log level requested on the command line
    pub const fn log_level(&self) -> LevelFilter {
        self.cli.log_level()
    }

    /// Generate and export every requested seed
    ///
    /// Returns the paths written.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid, the tile directory holds
    /// no usable tiles, or any export fails.
    pub fn process(&mut self) -> Result<Vec<PathBuf>> {
        if let Some(path) = &self.cli.save_settings {
            self.settings.save(path)?;
        }

        let library = TileLibrary::load_directory(&self.cli.tiles, self.settings.tile_unit_pixels)?;
        let background = parse_hex_color(&self.settings.background)?;
        let seeds: Vec<String> = self
            .cli
            .seed_list(&self.settings)
            .into_iter()
            .filter(|seed| self.should_process_seed(seed))
            .collect();

        if seeds.is_empty() {
            return Ok(Vec::new());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(seeds.len());
        }

        let mut written = Vec::new();
        for (index, seed) in seeds.iter().enumerate() {
            written.extend(self.process_seed(index, seed, &library, background)?);
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(written)
    }

    fn should_process_seed(&self, seed: &str) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let complete = self.artifact_paths(seed).iter().all(|path| path.exists());
        if complete {
            log::info!("Skipping seed '{seed}' (all outputs exist)");
        }
        !complete
    }

    // Every file a run writes for one seed
    fn artifact_paths(&self, seed: &str) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self
            .cli
            .format
            .extensions()
            .iter()
            .map(|extension| self.output_path(seed, extension))
            .collect();
        if self.cli.plan {
            paths.push(self.plan_path(seed));
        }
        paths
    }

    fn process_seed(
        &mut self,
        index: usize,
        seed: &str,
        library: &TileLibrary,
        background: Rgba<u8>,
    ) -> Result<Vec<PathBuf>> {
        let start_time = Instant::now();
        let grid = self.settings.grid()?;
        let outcome = generate_from_catalog(grid, seed, self.settings.options, library.catalog());

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_seed(index, seed, outcome.placements.len());
        }

        let mut written = Vec::new();
        for extension in self.cli.format.extensions() {
            let path = self.output_path(seed, extension);
            if *extension == "svg" {
                let document = render_svg(&outcome.placements, &grid, library, background)?;
                export_svg(&document, &path)?;
            } else {
                let mut progress = self.progress_manager.as_mut();
                let image = render_plan_with(
                    &outcome.placements,
                    &grid,
                    library,
                    background,
                    |rendered| {
                        if let Some(pm) = progress.as_mut() {
                            pm.update_rendered(index, rendered);
                        }
                    },
                )?;
                export_png(&image, &path)?;
            }
            written.push(path);
        }

        if self.cli.plan {
            let path = self.plan_path(seed);
            PlanDocument::new(seed, grid, &outcome).save(&path)?;
            written.push(path);
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_seed(index);
        }

        log::debug!("seed '{seed}' finished in {:.2?}", start_time.elapsed());

        Ok(written)
    }

    fn output_path(&self, seed: &str, extension: &str) -> PathBuf {
        self.cli
            .output
            .join(format!("{OUTPUT_PREFIX}{}.{extension}", sanitize_seed(seed)))
    }

    fn plan_path(&self, seed: &str) -> PathBuf {
        self.cli
            .output
            .join(format!("{OUTPUT_PREFIX}{}{PLAN_SUFFIX}", sanitize_seed(seed)))
    }

    /// Directory the processor writes into
    pub fn output_directory(&self) -> &Path {
        &self.cli.output
    }
}
