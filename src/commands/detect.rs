//! Detect command - score candidate grammars against a text

use std::path::Path;

use log::info;

use tokenkit::config::Config;
use tokenkit::output::{DetectReport, OutputMode};
use tokenkit::registry::{self, GrammarRegistry};

/// Score every candidate grammar and report the best one
///
/// Candidates come from the command line, else from the config, else every
/// registered grammar.
pub fn detect(
    file: Option<&Path>,
    candidates: &[String],
    config: &Config,
    output_mode: OutputMode,
) -> anyhow::Result<()> {
    let text = super::read_input(file)?;
    let registry = GrammarRegistry::builtin();

    let names: &[String] = if candidates.is_empty() {
        &config.detect.candidates
    } else {
        candidates
    };
    let candidates = registry.candidates(names)?;

    let scored = registry::score_all(&text, &candidates, &config.scan.stop_markers);
    let best = registry::best_of(&scored);
    if let Some(best) = best {
        info!("best grammar: '{}' (score {})", best.info.name(), best.score);
    }

    DetectReport::new(&scored, best).render(output_mode);
    Ok(())
}
