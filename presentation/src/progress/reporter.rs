//! Progress reporting for generation runs

use agentgen_application::{GenerationProgress, GenerationStage};
use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports progress during generation with progress bars
pub struct ProgressReporter {
    multi: MultiProgress,
    stage_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            stage_bar: Mutex::new(None),
        }
    }

    fn stage_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .map(|style| style.progress_chars("=>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
    }

    fn with_bar(&self, f: impl FnOnce(&mut Option<ProgressBar>)) {
        if let Ok(mut bar) = self.stage_bar.lock() {
            f(&mut bar);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationProgress for ProgressReporter {
    fn on_stage_start(&self, stage: GenerationStage, total: usize) {
        let pb = self.multi.add(ProgressBar::new(total as u64));
        pb.set_style(Self::stage_style());
        pb.set_prefix(stage.as_str());
        pb.set_message("Starting...");
        self.with_bar(|bar| *bar = Some(pb));
    }

    fn on_artifact_rendered(&self, _stage: GenerationStage, relative_path: &str) {
        self.with_bar(|bar| {
            if let Some(pb) = bar.as_ref() {
                pb.set_message(format!("{} {}", "v".green(), relative_path));
                pb.inc(1);
            }
        });
    }

    fn on_stage_complete(&self, _stage: GenerationStage) {
        self.with_bar(|bar| {
            if let Some(pb) = bar.take() {
                // Validation has no per-item events
                if pb.position() < pb.length().unwrap_or(0) {
                    pb.set_position(pb.length().unwrap_or(0));
                }
                pb.finish_with_message(format!("{}", "done".green()));
            }
        });
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl GenerationProgress for SimpleProgress {
    fn on_stage_start(&self, stage: GenerationStage, total: usize) {
        eprintln!("{} {} ({} item(s))", "->".cyan(), stage.as_str().bold(), total);
    }

    fn on_artifact_rendered(&self, _stage: GenerationStage, relative_path: &str) {
        eprintln!("  {} {}", "v".green(), relative_path);
    }

    fn on_stage_complete(&self, _stage: GenerationStage) {}
}
