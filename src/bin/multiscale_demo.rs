use particle_locator::config::multiscale::load_config;
use particle_locator::image::io::{load_grayscale_image, write_json_file};
use particle_locator::{Blob, MultiscaleFinder2D, MultiscaleReport};
use serde::Serialize;
use std::env;
use std::path::Path;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BlobSummary {
    width: usize,
    height: usize,
    blob_count: usize,
    blobs: Vec<Blob<2>>,
    report: MultiscaleReport,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let image = load_grayscale_image(&config.input)?;
    let mut finder = MultiscaleFinder2D::new(image.dims, config.finder);
    let (blobs, report) = finder.detect_with_report(&image).map_err(|e| e.to_string())?;

    let summary = BlobSummary {
        width: image.width(),
        height: image.height(),
        blob_count: blobs.len(),
        blobs,
        report,
    };
    write_json_file(&config.output.blobs_json, &summary)?;

    println!(
        "Found {} blobs over {} octaves in {:.3} ms",
        summary.blob_count,
        finder.n_octaves(),
        summary.report.total_ms
    );
    println!("Saved blobs to {}", config.output.blobs_json.display());
    Ok(())
}

fn usage() -> String {
    "Usage: multiscale_demo <config.json>".to_string()
}
