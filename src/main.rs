use anyhow::Context;
use retail_graph::report::{render_enriched, render_segments, render_trending};
use retail_graph::{JsonLinesTable, JsonLinesTransactions, PipelineConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Optional path of a YAML config file
const CONFIG_ENV: &str = "RETAIL_GRAPH_CONFIG";

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Retail Graph Analytics v{}", retail_graph::version());

    let config = match std::env::var_os(CONFIG_ENV) {
        Some(path) => PipelineConfig::from_yaml_file(&path)
            .with_context(|| format!("loading config from {:?}", path))?,
        None => PipelineConfig::default(),
    };

    let mut source = JsonLinesTransactions::new(&config.input_path);
    let mut table = JsonLinesTable::new(&config.output_path);

    let summary = retail_graph::run(&config, &mut source, &mut table)
        .context("graph analytics run failed")?;

    info!("PageRank Results:\n{}", render_trending(&summary.trending));
    info!("Connected Components Results:\n{}", render_segments(&summary.segments));
    info!("Verified metadata:\n{}", render_enriched(&summary.verified));

    Ok(())
}
