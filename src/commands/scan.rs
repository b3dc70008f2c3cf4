//! Scan command - tokenize a text and print its tokens

use std::path::Path;

use anyhow::bail;
use log::{debug, info};

use tokenkit::config::Config;
use tokenkit::engine::Engine;
use tokenkit::output::{OutputMode, ScanReport};
use tokenkit::registry::{self, GrammarInfo, GrammarRegistry};

/// Arguments of the scan command
#[derive(Debug, Clone, Copy)]
pub struct ScanArgs<'a> {
    /// File to scan, standard input when `None`
    pub file: Option<&'a Path>,
    /// Grammar name, detected when `None`
    pub grammar: Option<&'a str>,
    /// Stop markers given on the command line
    pub stop_markers: &'a [String],
    /// Color human output
    pub color: bool,
}

/// Tokenize a text
///
/// The grammar is the one named, else the first one matching the file name, else
/// the best scoring candidate. A scan halted by a rule error is still printed, then
/// reported as a failure.
pub fn scan(args: &ScanArgs<'_>, config: &Config, output_mode: OutputMode) -> anyhow::Result<()> {
    let text = super::read_input(args.file)?;
    let registry = GrammarRegistry::builtin();

    let mut stop_markers = config.scan.stop_markers.clone();
    stop_markers.extend(args.stop_markers.iter().cloned());

    let info = resolve_grammar(&registry, args, &text, config, &stop_markers)?;
    info!("scanning with grammar '{}'", info.name());

    let mut engine = Engine::new(info.grammar(), &text)?.with_stop_markers(stop_markers);
    let report = ScanReport::collect(&mut engine);
    report.render(output_mode, args.color);

    if report.is_error() {
        bail!("scan stopped on error: {}", report.stop.text);
    }
    Ok(())
}

fn resolve_grammar<'r>(
    registry: &'r GrammarRegistry,
    args: &ScanArgs<'_>,
    text: &str,
    config: &Config,
    stop_markers: &[String],
) -> anyhow::Result<&'r GrammarInfo> {
    if let Some(name) = args.grammar {
        return match registry.by_name(name) {
            Some(info) => Ok(info),
            None => bail!("unknown grammar '{name}'"),
        };
    }

    if let Some(path) = args.file
        && let Some(info) = registry.by_file_name(path).first().copied()
    {
        debug!("grammar '{}' chosen by file name", info.name());
        return Ok(info);
    }

    let candidates = registry.candidates(&config.detect.candidates)?;
    match registry::select_by_score(text, &candidates, stop_markers) {
        Some(best) => {
            debug!("grammar '{}' chosen by score {}", best.info.name(), best.score);
            Ok(best.info)
        },
        None => bail!("no grammar could scan the text"),
    }
}
