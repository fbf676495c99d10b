// Detect the language of a text using a directory of .model files.
//
//   cargo run --example detect -- <model-dir> <text...>
//
// Set LINGRAM_CACHE to reuse an index snapshot between runs.
use anyhow::{bail, Context, Result};
use lingram::locale::locale_tag;
use lingram::logging::init_tracing;
use lingram::{Detector, DetectorConfig};
use std::path::PathBuf;

fn main() -> Result<()> {
    init_tracing();

    let mut args = std::env::args().skip(1);
    let Some(model_dir) = args.next() else {
        bail!("usage: detect <model-dir> <text...>");
    };
    let text = args.collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        bail!("no text given");
    }

    let cfg = DetectorConfig {
        model_dir: Some(PathBuf::from(&model_dir)),
        cache_path: std::env::var_os("LINGRAM_CACHE").map(PathBuf::from),
        ..DetectorConfig::default()
    };
    let detector = Detector::from_config(&cfg)
        .with_context(|| format!("loading models from {}", model_dir))?;

    let detection = detector.detect(&text);
    println!("Detected language: {}", locale_tag(&detection.language));
    println!("  score:    {:.4}", detection.score);
    println!("  fallback: {}", detection.fallback);
    Ok(())
}
