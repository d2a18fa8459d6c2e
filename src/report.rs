//! Console report for a finished run

use crate::correlation::FEATURES;
use crate::pipeline::PipelineOutput;
use crate::record::Class;

/// Print cleaning, cluster, class and correlation statistics to stdout
pub fn print_report(output: &PipelineOutput) {
    let stats = &output.cleaning_stats;
    println!("\n=== Cleaning ===");
    println!("Input records: {}", stats.input_records);
    println!("Dropped (no rate): {}", stats.missing_rate);
    println!("Dropped (newly listed): {}", stats.new_listings);
    println!("Duplicates removed: {}", stats.duplicates);
    println!("Clean records: {}", stats.output_records);

    print_cluster_statistics(output);
    print_class_distribution(output);
    print_correlations(output);
}

/// Print cluster statistics to console
pub fn print_cluster_statistics(output: &PipelineOutput) {
    let clusters = &output.clusters;
    let total = output.classified.len();
    let scores: Vec<f64> = output
        .classified
        .iter()
        .map(|r| r.scored.normalized_csat)
        .collect();

    println!("\n=== Cluster Statistics ===");
    println!("Number of clusters: {}", clusters.n_clusters);
    println!("Within-cluster sum of squares (Inertia): {:.4}", clusters.inertia);

    let silhouette_score = clusters.compute_silhouette_sample(&scores, 100);
    println!("Silhouette score (sample): {:.3}", silhouette_score);

    println!("\n  Cluster | Size | Share  | Centroid");
    println!("  --------|------|--------|---------");
    for (i, &size) in clusters.cluster_sizes().iter().enumerate() {
        let percentage = (size as f64 / total as f64) * 100.0;
        println!(
            "  {:7} | {:4} | {:5.1}% | {:8.4}",
            i, size, percentage, clusters.centroids[i]
        );
    }

    println!("\nClassification bounds: {}", output.bounds);
}

fn print_class_distribution(output: &PipelineOutput) {
    println!("\n=== Classes ===");
    for (class, count) in output.class_counts() {
        if count > 0 || class != Class::Unknown {
            println!("  {:7}: {}", class.as_str(), count);
        }
    }
}

fn print_correlations(output: &PipelineOutput) {
    println!("\n=== Feature Correlations ===");
    print!("{:>18}", "");
    for feature in FEATURES {
        print!(" {:>16}", feature);
    }
    println!();

    for row in FEATURES {
        print!("{:>18}", row);
        for column in FEATURES {
            let value = output.correlations.get(row, column).unwrap_or(f64::NAN);
            print!(" {:>16.2}", value);
        }
        println!();
    }
}
