//! Lip analysis over every image in a directory.

use anyhow::{Context, Result};
use rand::Rng;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use stylist_core::sampling;
use stylist_core::{ColorReport, ColorVoter, Season};

const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "bmp", "gif"];

/// Per-image outcome written to the results file.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Entry {
    Ok(ColorReport),
    Failed { error: String },
}

/// Summary of one batch run.
#[derive(Debug, Default)]
pub struct Summary {
    pub total: usize,
    pub succeeded: usize,
    pub by_season: BTreeMap<Season, usize>,
}

/// Image files directly inside `dir`, sorted by name.
pub fn find_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut images: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("reading directory {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && has_image_extension(path))
        .collect();
    images.sort();
    Ok(images)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Analyse every image; a failing image is recorded and does not stop the run.
pub fn run<R: Rng>(
    images: &[PathBuf],
    sample_size: usize,
    rng: &mut R,
) -> (BTreeMap<String, Entry>, Summary) {
    let voter = ColorVoter::default();
    let mut results = BTreeMap::new();
    let mut summary = Summary {
        total: images.len(),
        ..Summary::default()
    };

    for (i, path) in images.iter().enumerate() {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        tracing::info!(image = %name, index = i + 1, total = images.len(), "analysing");

        let analysis = sampling::pixels_from_path(path)
            .map(|pixels| sampling::sample(&pixels, sample_size, rng))
            .map_err(anyhow::Error::from)
            .and_then(|samples| Ok(voter.classify(&samples)?));

        let entry = match analysis {
            Ok(classification) => {
                summary.succeeded += 1;
                *summary.by_season.entry(classification.season).or_default() += 1;
                Entry::Ok(ColorReport::lip(&classification))
            }
            Err(e) => {
                tracing::warn!(image = %name, error = %e, "analysis failed");
                Entry::Failed {
                    error: e.to_string(),
                }
            }
        };
        results.insert(name, entry);
    }

    (results, summary)
}

pub fn write_results(path: &Path, results: &BTreeMap<String, Entry>) -> Result<()> {
    let json = serde_json::to_string_pretty(results)?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

pub fn print_summary(summary: &Summary) {
    println!("Images:     {}", summary.total);
    println!("Succeeded:  {}", summary.succeeded);
    println!("Failed:     {}", summary.total - summary.succeeded);

    if summary.succeeded == 0 {
        return;
    }
    let mut seasons: Vec<_> = summary.by_season.iter().collect();
    seasons.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
    println!("Lip color distribution:");
    for (season, count) in seasons {
        let pct = *count as f64 / summary.succeeded as f64 * 100.0;
        println!("  {season}: {count} ({pct:.1}%)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("stylist-batch-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_extension_filter() {
        assert!(has_image_extension(Path::new("a/face.JPG")));
        assert!(has_image_extension(Path::new("lips.png")));
        assert!(!has_image_extension(Path::new("results.json")));
        assert!(!has_image_extension(Path::new("README")));
    }

    #[test]
    fn test_batch_records_failures_and_successes() {
        let dir = scratch_dir("mixed");
        RgbImage::from_pixel(6, 6, image::Rgb([255, 127, 80]))
            .save(dir.join("coral.png"))
            .unwrap();
        RgbImage::new(6, 6).save(dir.join("masked.png")).unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();
        std::fs::write(dir.join("broken.jpg"), "not a jpeg").unwrap();

        let images = find_images(&dir).unwrap();
        assert_eq!(images.len(), 3);

        let (results, summary) = run(&images, 40, &mut StdRng::seed_from_u64(5));
        assert_eq!(summary.total, 3);
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.by_season.get(&Season::Spring), Some(&1));
        assert!(matches!(results["coral.png"], Entry::Ok(ref r) if r.result == 1));
        assert!(matches!(results["masked.png"], Entry::Failed { .. }));
        assert!(matches!(results["broken.jpg"], Entry::Failed { .. }));

        let out = dir.join("results.json");
        write_results(&out, &results).unwrap();
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(written["coral.png"]["season"], "Spring");
        assert!(written["broken.jpg"]["error"].is_string());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
