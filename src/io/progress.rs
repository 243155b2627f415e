//! Per-seed render progress with a rolling window for large batches

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static SEED_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix:>24} [{bar:30.green/white}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Mosaics: [{bar:40.green/white}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

#[derive(Debug, Clone, Default)]
struct SeedState {
    label: String,
    rendered: usize,
    placements: usize,
    done: bool,
}

impl SeedState {
    const fn is_started(&self) -> bool {
        !self.label.is_empty()
    }

    fn message(&self) -> String {
        if self.done {
            format!("done, {} tiles", self.placements)
        } else {
            format!("{}/{} tiles", self.rendered, self.placements)
        }
    }
}

/// Progress display for a batch of seeds
///
/// Up to [`MAX_INDIVIDUAL_PROGRESS_BARS`] seed bars show the most recently
/// started seeds, each counting placements rendered. Larger batches also get
/// an overall bar counting finished seeds.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    seed_bars: Vec<ProgressBar>,
    seeds: Vec<SeedState>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a manager with no bars yet
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            seed_bars: Vec::new(),
            seeds: Vec::new(),
        }
    }

    /// Shared display handle, used to print log lines above the bars
    pub fn multi_progress(&self) -> MultiProgress {
        self.multi_progress.clone()
    }

    /// Create the bars for a batch of `seed_count` seeds
    pub fn initialize(&mut self, seed_count: usize) {
        if seed_count > MAX_INDIVIDUAL_PROGRESS_BARS {
            let bar = ProgressBar::new(seed_count as u64).with_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(bar));
        }

        let visible = seed_count.min(MAX_INDIVIDUAL_PROGRESS_BARS);
        self.seed_bars = (0..visible)
            .map(|_| {
                self.multi_progress
                    .add(ProgressBar::new(0).with_style(SEED_STYLE.clone()))
            })
            .collect();
    }

    /// Register a seed whose plan holds `placements` tiles
    pub fn start_seed(&mut self, index: usize, seed: &str, placements: usize) {
        if index >= self.seeds.len() {
            self.seeds.resize_with(index + 1, SeedState::default);
        }
        if let Some(state) = self.seeds.get_mut(index) {
            *state = SeedState {
                label: format!("'{seed}'"),
                placements,
                ..SeedState::default()
            };
        }
        self.redraw();
    }

    /// Report the number of placements rendered so far
    pub fn update_rendered(&mut self, index: usize, rendered: usize) {
        if let Some(state) = self.seeds.get_mut(index) {
            state.rendered = rendered.min(state.placements);
        }
        self.redraw();
    }

    /// Mark a seed finished and advance the batch bar
    pub fn complete_seed(&mut self, index: usize) {
        if let Some(bar) = &self.batch_bar {
            bar.inc(1);
        }
        if let Some(state) = self.seeds.get_mut(index) {
            state.rendered = state.placements;
            state.done = true;
        }
        self.redraw();
    }

    /// Number of seeds started so far
    pub fn seed_count(&self) -> usize {
        self.seeds.iter().filter(|state| state.is_started()).count()
    }

    /// Finish the batch bar and clear the display
    pub fn finish(&self) {
        if let Some(bar) = &self.batch_bar {
            bar.finish_with_message("all seeds rendered");
        }
        let _ = self.multi_progress.clear();
    }

    // Shows the most recently started seeds, blanking unused bars
    fn redraw(&self) {
        let started: Vec<&SeedState> = self
            .seeds
            .iter()
            .filter(|state| state.is_started())
            .collect();
        let skip = started.len().saturating_sub(self.seed_bars.len());

        for (slot, bar) in self.seed_bars.iter().enumerate() {
            match started.get(skip + slot) {
                Some(state) => {
                    bar.set_length(state.placements as u64);
                    bar.set_position(state.rendered as u64);
                    bar.set_prefix(state.label.clone());
                    bar.set_message(state.message());
                }
                None => {
                    bar.set_length(0);
                    bar.set_position(0);
                    bar.set_prefix(String::new());
                    bar.set_message(String::new());
                }
            }
        }
    }
}
