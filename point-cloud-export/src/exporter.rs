/// Export pipeline orchestration: sample, classify, encode, persist
use crate::bounds::PointCloudBounds;
use crate::constants::{COORD_SCALE, HEADER_SIZE, RECORD_STRIDE, ROOT_CELL_SIZE, ROOT_CENTRE};
use crate::encoder::encode_cloud;
use crate::generator::PointGenerator;
use crate::index::CloudIndex;
use crate::point::CloudPoint;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::PathBuf;

/// Drives a complete export run. All file output happens strictly after the
/// byte buffer is complete; the octree itself is discarded once flattened.
pub struct CloudExporter {
    output_path: PathBuf,
    point_count: usize,
    seed: Option<u64>,
}

impl CloudExporter {
    pub fn new(output_path: &str, point_count: usize, seed: Option<u64>) -> Self {
        Self {
            output_path: PathBuf::from(output_path),
            point_count,
            seed,
        }
    }

    /// Execute the pipeline: generate the batch, insert it sequentially,
    /// flatten the tree, encode and write the container plus a JSON
    /// metadata sidecar.
    pub fn export(&self) -> Result<(), Box<dyn std::error::Error>> {
        println!(
            "Sampling {} points in a cube of side {} centred at the origin...",
            self.point_count, ROOT_CELL_SIZE
        );

        let mut generator = match self.seed {
            Some(seed) => PointGenerator::with_seed(seed),
            None => PointGenerator::new(),
        };
        let positions = generator.sample_positions(self.point_count);

        let mut index = CloudIndex::new(ROOT_CENTRE, ROOT_CELL_SIZE, &mut generator)?;

        // Insert in input order with progress tracking.
        let pb = ProgressBar::new(positions.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{bar:40.green/blue}] {pos}/{len} points ({percent}%) {msg}")
                .unwrap()
                .progress_chars("▉▊▋▌▍▎▏ "),
        );
        pb.set_message("Classifying points");

        for chunk in positions.chunks(1024) {
            index.insert_batch(chunk, &mut generator);
            pb.inc(chunk.len() as u64);
        }
        pb.finish_with_message("Points classified");

        let cloud = index.flatten();
        let bounds = calculate_bounds(&cloud);
        self.print_stats(&index, &cloud, &bounds);

        let buffer = encode_cloud(&cloud)?;
        std::fs::write(&self.output_path, &buffer)?;
        println!("Saved {} ({} bytes)", self.output_path.display(), buffer.len());

        self.save_metadata(&index, &cloud, &bounds)?;

        println!("Export complete!");
        Ok(())
    }

    /// Save run metadata as a JSON sidecar next to the container
    fn save_metadata(
        &self,
        index: &CloudIndex,
        cloud: &[CloudPoint],
        bounds: &PointCloudBounds,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let metadata = serde_json::json!({
            "generated_points": self.point_count,
            "accepted_points": index.accepted(),
            "dropped_points": index.dropped(),
            "buffered_points": cloud.len(),
            "node_count": index.node_count(),
            "seed": self.seed,
            "bounds": bounds,
            "layout": {
                "header_size": HEADER_SIZE,
                "record_stride": RECORD_STRIDE,
                "coordinate_scale": COORD_SCALE,
            },
        });

        let metadata_path = self.output_path.with_extension("json");
        std::fs::write(&metadata_path, metadata.to_string())?;
        println!("Saved {}", metadata_path.display());

        Ok(())
    }

    /// Print classification statistics and bounds for verification
    fn print_stats(&self, index: &CloudIndex, cloud: &[CloudPoint], bounds: &PointCloudBounds) {
        println!("Classification complete:");
        println!(
            "  Accepted: {} of {} sampled ({:.1}%)",
            index.accepted(),
            self.point_count,
            (index.accepted() as f64 / self.point_count as f64) * 100.0
        );
        println!(
            "  Dropped: {} (outside every containment sphere)",
            index.dropped()
        );
        println!(
            "  Buffered: {} points across {} nodes (centre seeds included)",
            cloud.len(),
            index.node_count()
        );
        println!("Bounds:");
        println!("  X: {:.2} to {:.2}", bounds.min_x, bounds.max_x);
        println!("  Y: {:.2} to {:.2}", bounds.min_y, bounds.max_y);
        println!("  Z: {:.2} to {:.2}", bounds.min_z, bounds.max_z);

        let (dx, dy, dz) = bounds.dimensions();
        println!("  Dimensions: {:.2} x {:.2} x {:.2}", dx, dy, dz);
    }
}

/// Chunked parallel bounds reduction over the flattened cloud
fn calculate_bounds(cloud: &[CloudPoint]) -> PointCloudBounds {
    cloud
        .par_chunks(25_000)
        .map(|chunk| {
            let mut local = PointCloudBounds::new();
            for point in chunk {
                local.update(point.position);
            }
            local
        })
        .reduce(PointCloudBounds::new, PointCloudBounds::merge)
}
