//! One batch run of the purchase-graph analytics
//!
//! load -> sample -> map -> build graph -> PageRank -> components ->
//! assemble -> overwrite metadata -> reload and enrich

use crate::algo::{run_connected_components, run_page_rank};
use crate::config::{ConfigError, PipelineConfig};
use crate::graph::{GraphError, GraphStatistics};
use crate::report::{
    customer_segments, enrich, metadata_records, top_articles, CustomerSegment, EnrichedRecord,
    MetadataRecord, TrendingArticle,
};
use crate::schema::{map_rows, MappingStats, SchemaError};
use crate::table::{MetadataSink, MetadataSource, Sampler, TableError, TransactionSource};
use std::time::Instant;
use thiserror::Error;
use tracing::info;

/// Errors that abort a run
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Table error: {0}")]
    Table(#[from] TableError),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),
}

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Everything a run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub sampled_rows: usize,
    pub mapping: MappingStats,
    pub graph: GraphStatistics,
    pub trending: Vec<TrendingArticle>,
    pub segments: Vec<CustomerSegment>,
    pub component_count: usize,
    pub components_converged: bool,
    /// Records handed to the sink
    pub metadata: Vec<MetadataRecord>,
    /// Records read back from the sink and joined with article details
    pub verified: Vec<EnrichedRecord>,
}

fn minutes(since: Instant) -> f64 {
    since.elapsed().as_secs_f64() / 60.0
}

/// Run the pipeline end to end
pub fn run<S, T>(config: &PipelineConfig, source: &mut S, table: &mut T) -> PipelineResult<RunSummary>
where
    S: TransactionSource + ?Sized,
    T: MetadataSink + MetadataSource + ?Sized,
{
    config.validate()?;
    let start = Instant::now();

    info!("Loading and sampling transactions");
    let rows = source.load()?;
    let rows = Sampler::new(config.sample).sample(rows);
    let sampled_rows = rows.len();

    info!("Building graph");
    let mapped = map_rows(rows)?;
    let mapping = mapped.stats;
    let graph = mapped.into_graph()?;
    let stats = graph.statistics();
    info!(
        customers = stats.customer_count,
        articles = stats.article_count,
        edges = stats.edge_count,
        "Graph built in {:.2} minutes",
        minutes(start)
    );

    let analytics_start = Instant::now();

    let pagerank_start = Instant::now();
    let scores = run_page_rank(&graph, config.pagerank);
    let trending = top_articles(&graph, &scores, config.report.top_articles);
    info!("PageRank completed in {:.2} minutes", minutes(pagerank_start));

    let cc_start = Instant::now();
    let labels = run_connected_components(&graph, config.components);
    let segments = customer_segments(&labels, config.report.customer_sample);
    info!(
        components = labels.component_count,
        iterations = labels.iterations,
        "Connected components completed in {:.2} minutes",
        minutes(cc_start)
    );
    info!("Analytics completed in {:.2} minutes", minutes(analytics_start));

    let metadata = metadata_records(&trending, &segments);
    table.overwrite(&metadata)?;
    info!(records = metadata.len(), "Metadata saved");

    let reloaded = table.load()?;
    let verified = enrich(&reloaded, &trending);
    info!("Total runtime: {:.2} minutes", minutes(start));

    Ok(RunSummary {
        sampled_rows,
        mapping,
        graph: stats,
        trending,
        segments,
        component_count: labels.component_count,
        components_converged: labels.converged,
        metadata,
        verified,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::TransactionRow;
    use crate::table::{MemoryTable, MemoryTransactions, SampleConfig};
    use chrono::NaiveDate;

    fn row(customer: &str, article: &str) -> TransactionRow {
        TransactionRow {
            customer_id: Some(customer.into()),
            article_id: Some(article.into()),
            age: Some(35.0),
            prod_name: Some(format!("{} name", article)),
            color_category: Some("Blue".into()),
            t_dat: NaiveDate::from_ymd_opt(2020, 5, 5).unwrap(),
            price: 0.02,
            transaction_year: 2020,
            transaction_month: 5,
        }
    }

    fn config() -> PipelineConfig {
        PipelineConfig {
            sample: SampleConfig::all(1_000),
            ..PipelineConfig::default()
        }
    }

    #[test]
    fn test_run_in_memory() {
        let mut source = MemoryTransactions::new(vec![row("C1", "A1"), row("C2", "A1"), row("C2", "A2")]);
        let mut table = MemoryTable::new();

        let summary = run(&config(), &mut source, &mut table).unwrap();

        assert_eq!(summary.sampled_rows, 3);
        assert_eq!(summary.graph.edge_count, 3);
        assert_eq!(summary.trending[0].article_id.as_str(), "A1");
        assert_eq!(summary.component_count, 1);
        assert!(summary.components_converged);
        assert_eq!(summary.metadata.len(), 4);
        assert_eq!(summary.verified.len(), 4);
        assert_eq!(summary.verified[0].prod_name.as_deref(), Some("A1 name"));
        assert_eq!(table.writes(), 1);
    }

    #[test]
    fn test_invalid_config_aborts_before_io() {
        let mut bad = config();
        bad.pagerank.max_iterations = 0;
        let mut table = MemoryTable::new();

        let result = run(&bad, &mut MemoryTransactions::default(), &mut table);
        assert!(matches!(result, Err(PipelineError::Config(_))));
        assert_eq!(table.writes(), 0);
    }

    #[test]
    fn test_empty_input() {
        let mut table = MemoryTable::new();
        let summary = run(&config(), &mut MemoryTransactions::default(), &mut table).unwrap();
        assert!(summary.trending.is_empty());
        assert!(summary.segments.is_empty());
        assert!(summary.verified.is_empty());
        assert_eq!(table.writes(), 1);
    }
}
