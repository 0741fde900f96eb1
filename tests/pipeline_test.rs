use retail_graph::{
    run, JsonLinesTable, JsonLinesTransactions, MetadataSource, Metric, PipelineConfig,
    SampleConfig, VertexType,
};
use std::fs;
use tempfile::TempDir;

const TRANSACTIONS: &str = r#"{"customer_id":"C1","article_id":"A1","age":29,"prod_name":"Strap top","color_category":"Black","t_dat":"2020-09-01","price":0.0169,"transaction_year":2020,"transaction_month":9}
{"customer_id":"C2","article_id":"A1","age":30,"prod_name":"Strap top","color_category":"Black","t_dat":"2020-09-02","price":0.0169,"transaction_year":2020,"transaction_month":9}
{"customer_id":"C2","article_id":"A2","age":30,"prod_name":"Jade skirt","color_category":"Green","t_dat":"2020-09-02","price":0.0508,"transaction_year":2020,"transaction_month":9}
{"customer_id":"C3","article_id":"A3","age":51,"prod_name":"Sock 3p","color_category":"White","t_dat":"2020-09-03","price":0.0084,"transaction_year":2020,"transaction_month":9}
{"customer_id":null,"article_id":"A4","age":40,"prod_name":"Ghost","color_category":"Grey","t_dat":"2020-09-04","price":0.01,"transaction_year":2020,"transaction_month":9}
"#;

fn setup() -> (TempDir, PipelineConfig) {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("enriched_transactions.jsonl");
    fs::write(&input, TRANSACTIONS).unwrap();

    let config = PipelineConfig {
        input_path: input,
        output_path: dir.path().join("gold").join("graph_metadata.jsonl"),
        sample: SampleConfig::all(100_000),
        ..PipelineConfig::default()
    };
    (dir, config)
}

#[test]
fn test_end_to_end_with_files() {
    let (_dir, config) = setup();
    let mut source = JsonLinesTransactions::new(&config.input_path);
    let mut table = JsonLinesTable::new(&config.output_path);

    let summary = run(&config, &mut source, &mut table).unwrap();

    assert_eq!(summary.sampled_rows, 5);
    assert_eq!(summary.mapping.rejected_rows, 1);
    assert_eq!(summary.graph.customer_count, 3);
    assert_eq!(summary.graph.article_count, 3);
    assert_eq!(summary.graph.edge_count, 4);
    assert_eq!(summary.component_count, 2);

    // A1 is bought by two customers
    assert_eq!(summary.trending[0].article_id.as_str(), "A1");
    assert_eq!(summary.trending[0].prod_name.as_deref(), Some("Strap top"));
    assert_eq!(summary.trending.len(), 3);

    let communities: Vec<_> = summary
        .segments
        .iter()
        .map(|s| (s.customer_id.as_str(), s.community.as_str()))
        .collect();
    assert_eq!(communities, vec![("C1", "A1"), ("C2", "A1"), ("C3", "A3")]);

    // What was written is what was verified
    let stored = table.load().unwrap();
    assert_eq!(stored, summary.metadata);
    assert_eq!(summary.verified.len(), stored.len());

    for record in &summary.verified {
        match record.entity_type {
            VertexType::Article => {
                assert_eq!(record.metric, Metric::PageRank);
                assert!(record.prod_name.is_some());
            }
            VertexType::Customer => {
                assert_eq!(record.metric, Metric::Community);
                assert!(record.prod_name.is_none());
                assert!(record.color_category.is_none());
            }
        }
    }
}

#[test]
fn test_rerun_overwrites_output() {
    let (_dir, mut config) = setup();
    let mut table = JsonLinesTable::new(&config.output_path);

    run(&config, &mut JsonLinesTransactions::new(&config.input_path), &mut table).unwrap();
    let first = table.load().unwrap();

    config.report.top_articles = 1;
    config.report.customer_sample = 1;
    run(&config, &mut JsonLinesTransactions::new(&config.input_path), &mut table).unwrap();
    let second = table.load().unwrap();

    assert_eq!(first.len(), 6);
    assert_eq!(second.len(), 2);
}

#[test]
fn test_same_input_same_output() {
    let (_dir, config) = setup();
    let mut table = JsonLinesTable::new(&config.output_path);

    let a = run(&config, &mut JsonLinesTransactions::new(&config.input_path), &mut table).unwrap();
    let b = run(&config, &mut JsonLinesTransactions::new(&config.input_path), &mut table).unwrap();

    assert_eq!(a.metadata, b.metadata);
    assert_eq!(a.verified, b.verified);
}
