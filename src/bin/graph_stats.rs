use anyhow::{Context, Result};

use mailgraph::config::Config;
use mailgraph::graph::{metrics, read_archive_graph};
use mailgraph::report::Summary;

fn main() -> Result<()> {
    mailgraph::logging::init();

    let json = std::env::args().any(|a| a == "--json");
    let cli_archive = std::env::args().skip(1).find(|a| !a.starts_with("--"));

    let config = Config::load();
    let path = config.archive_path(cli_archive.as_deref());

    let graph = read_archive_graph(
        &path,
        config.graph.build_options(),
        config.graph.lowercase_addresses,
    )
    .with_context(|| format!("failed to build graph from {}", path.display()))?;

    let top_degrees = metrics::top_degrees(&graph, config.stats.top_nodes);
    let summary = Summary::compute(&graph, config.stats.allow_disconnected)
        .context("failed to compute graph statistics")?;

    if json {
        let report = serde_json::json!({
            "summary": summary,
            "top_degrees": top_degrees,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Archive: {}", path.display());
    for line in summary.lines() {
        println!("  {}", line);
    }

    println!("\nTop {} by degree:", top_degrees.len());
    for (i, (addr, degree)) in top_degrees.iter().enumerate() {
        println!("  {:2}. {:5}  {}", i + 1, degree, addr);
    }

    println!("\nDegree histogram (degree: nodes):");
    for (degree, count) in metrics::degree_histogram(&graph).iter().enumerate() {
        if *count > 0 {
            println!("  {:5}: {}", degree, count);
        }
    }

    Ok(())
}
