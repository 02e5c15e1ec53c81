use std::f64::consts::TAU;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Normal sample via the Box-Muller transform.
fn gauss(rng: &mut StdRng, mean: f64, std_dev: f64) -> f64 {
    let u1: f64 = rng.gen::<f64>().max(1e-15);
    let u2: f64 = rng.gen();
    mean + std_dev * (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}

/// Shape of one synthetic tree, in metres.
struct Tree {
    trunk_radius: f64,
    crown_base: f64,
    crown_top: f64,
    crown_radius: f64,
}

/// Scan-like samples: a noisy trunk cylinder up to `crown_base`, then an
/// ellipsoidal crown shell up to `crown_top`.
fn sample_tree(tree: &Tree, n_points: usize, rng: &mut StdRng) -> Vec<[f64; 3]> {
    let trunk_share = 0.3;
    let n_trunk = (n_points as f64 * trunk_share) as usize;

    let mut points = Vec::with_capacity(n_points);
    for _ in 0..n_trunk {
        let angle = rng.gen_range(0.0..TAU);
        let r = tree.trunk_radius + gauss(rng, 0.0, 0.01);
        let z = rng.gen_range(0.0..tree.crown_base);
        points.push([r * angle.cos(), r * angle.sin(), z]);
    }

    let centre = (tree.crown_base + tree.crown_top) / 2.0;
    let half_height = (tree.crown_top - tree.crown_base) / 2.0;
    for _ in n_trunk..n_points {
        let angle = rng.gen_range(0.0..TAU);
        let t: f64 = rng.gen_range(-1.0..1.0);
        let ring = (1.0 - t * t).sqrt();
        let jitter = 1.0 + gauss(rng, 0.0, 0.08);
        points.push([
            tree.crown_radius * ring * angle.cos() * jitter,
            tree.crown_radius * ring * angle.sin() * jitter,
            centre + half_height * t * jitter,
        ]);
    }
    points
}

fn write_tree(path: &Path, points: &[[f64; 3]]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for p in points {
        writer
            .write_record(p.iter().map(|v| format!("{v:.3}")))
            .with_context(|| format!("writing {}", path.display()))?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(42);
    let output_root = Path::new("sample_trees");

    let plots = ["plot_a", "plot_b"];
    let trees_per_plot = 3;
    let mut written = 0;

    for plot in &plots {
        let dir = output_root.join(plot);
        fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

        for i in 1..=trees_per_plot {
            let crown_base = rng.gen_range(2.0..6.0);
            let tree = Tree {
                trunk_radius: rng.gen_range(0.1..0.35),
                crown_base,
                crown_top: crown_base + rng.gen_range(3.0..9.0),
                crown_radius: rng.gen_range(1.5..4.0),
            };
            let points = sample_tree(&tree, 3000, &mut rng);
            let path = dir.join(format!("tree_{i:02}.csv"));
            write_tree(&path, &points)?;
            println!(
                "Wrote {} points to {} (crown base {:.2} m)",
                points.len(),
                path.display(),
                tree.crown_base
            );
            written += 1;
        }
    }

    println!("Wrote {written} trees under {}", output_root.display());
    Ok(())
}
