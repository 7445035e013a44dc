use agglo::{Agglomerator, DissimilarityMatrix, Linkage, MergeHistory};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Pairwise dissimilarities between five observations, computed elsewhere.
    let rows = vec![
        vec![0.0, 8.408169, 7.185479, 6.622472, 9.008004],
        vec![8.408169, 0.0, 14.097252, 11.136869, 12.764842],
        vec![7.185479, 14.097252, 0.0, 8.643471, 11.994746],
        vec![6.622472, 11.136869, 8.643471, 0.0, 10.388818],
        vec![9.008004, 12.764842, 11.994746, 10.388818, 0.0],
    ];

    let linkage: Linkage = std::env::args()
        .nth(1)
        .as_deref()
        .unwrap_or("complete")
        .parse()?;

    let matrix = DissimilarityMatrix::new(rows)?;
    let mut history = MergeHistory::new(matrix.size());
    Agglomerator::new(matrix, linkage).cluster(&mut history)?;

    println!("linkage: {linkage}");
    for (step, (row, d)) in history
        .assignments()
        .iter()
        .zip(history.distances())
        .enumerate()
    {
        println!("step {step}: {row:?}  height {d:.6}");
    }

    Ok(())
}
