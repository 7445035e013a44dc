use agglo::{HierarchicalClustering, Linkage};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Six points on a line: two tight groups and an outlier.
    let points = [0.0_f64, 0.3, 0.5, 9.0, 9.4, 30.0];
    let condensed: Vec<f64> = (0..points.len())
        .flat_map(|i| ((i + 1)..points.len()).map(move |j| (points[i] - points[j]).abs()))
        .collect();

    let history =
        HierarchicalClustering::new(Linkage::Average).fit_condensed(points.len(), &condensed)?;

    for k in 1..=3 {
        println!("k = {k}: {:?}", history.cut_to_k(k)?);
    }
    println!("cut at 1.0: {:?}", history.cut_at_height(1.0));

    println!("linkage matrix (a, b, height, size):");
    for m in history.dendrogram().merges() {
        println!("  {:>2} {:>2} {:>8.3} {:>2}", m.cluster_a, m.cluster_b, m.distance, m.size);
    }

    Ok(())
}
