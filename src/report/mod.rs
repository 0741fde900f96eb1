//! Result assembly
//!
//! Turns the raw algorithm outputs into the reporting records:
//! - trending articles (top-k PageRank over Article vertices)
//! - a bounded sample of customer communities
//! - flat entity/metric/value metadata records
//! - the verification join of metadata back onto article descriptions

use crate::algo::{ComponentLabels, RankScore};
use crate::graph::{PurchaseGraph, VertexId, VertexType};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::fmt::Write as _;

/// A top-ranked article with its descriptive attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingArticle {
    pub article_id: VertexId,
    pub prod_name: Option<String>,
    pub color_category: Option<String>,
    pub score: f64,
}

/// A customer and the community it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSegment {
    pub customer_id: VertexId,
    pub community: VertexId,
    pub community_ordinal: u64,
}

/// Metric name of a metadata record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    PageRank,
    Community,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::PageRank => f.write_str("PageRank"),
            Metric::Community => f.write_str("Community"),
        }
    }
}

/// Flat output record written to the metadata table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataRecord {
    pub entity_id: VertexId,
    pub entity_type: VertexType,
    pub metric: Metric,
    pub value: f64,
}

/// Metadata record joined with article descriptions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    pub entity_id: VertexId,
    pub entity_type: VertexType,
    pub metric: Metric,
    pub value: f64,
    pub prod_name: Option<String>,
    pub color_category: Option<String>,
}

/// Highest-scoring articles, descending by score, ties by id ascending
pub fn top_articles(graph: &PurchaseGraph, scores: &[RankScore], k: usize) -> Vec<TrendingArticle> {
    let mut ranked: Vec<&RankScore> = scores
        .iter()
        .filter(|s| s.vertex_type == VertexType::Article)
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.vertex_id.cmp(&b.vertex_id))
    });

    ranked
        .into_iter()
        .take(k)
        .map(|s| {
            let vertex = graph.vertex(&s.vertex_id);
            TrendingArticle {
                article_id: s.vertex_id.clone(),
                prod_name: vertex.and_then(|v| v.prod_name()).map(str::to_string),
                color_category: vertex.and_then(|v| v.color_category()).map(str::to_string),
                score: s.score,
            }
        })
        .collect()
}

/// First `limit` customers by id with their community
///
/// Truncation happens only here; `labels` must cover the whole graph.
pub fn customer_segments(labels: &ComponentLabels, limit: usize) -> Vec<CustomerSegment> {
    let mut customers: Vec<_> = labels
        .labels
        .iter()
        .filter(|l| l.vertex_type == VertexType::Customer)
        .collect();
    customers.sort_by(|a, b| a.vertex_id.cmp(&b.vertex_id));

    customers
        .into_iter()
        .take(limit)
        .map(|l| CustomerSegment {
            customer_id: l.vertex_id.clone(),
            community: l.component_id.clone(),
            community_ordinal: l.component_ordinal,
        })
        .collect()
}

/// Flatten both reports into metadata records, articles first
///
/// A community is written as its ordinal, the numeric encoding of the
/// component's smallest vertex id.
pub fn metadata_records(
    articles: &[TrendingArticle],
    segments: &[CustomerSegment],
) -> Vec<MetadataRecord> {
    let pagerank = articles.iter().map(|a| MetadataRecord {
        entity_id: a.article_id.clone(),
        entity_type: VertexType::Article,
        metric: Metric::PageRank,
        value: a.score,
    });
    let community = segments.iter().map(|s| MetadataRecord {
        entity_id: s.customer_id.clone(),
        entity_type: VertexType::Customer,
        metric: Metric::Community,
        value: s.community_ordinal as f64,
    });
    pagerank.chain(community).collect()
}

/// Left outer join of metadata onto the trending article descriptions
///
/// Every metadata record is kept. Article rows without a matching ranking
/// entry, and all customer rows, carry no descriptive fields. Article rows
/// come first, then customer rows, each in their input order.
pub fn enrich(metadata: &[MetadataRecord], articles: &[TrendingArticle]) -> Vec<EnrichedRecord> {
    let by_id: HashMap<&VertexId, &TrendingArticle> =
        articles.iter().map(|a| (&a.article_id, a)).collect();

    let plain = |record: &MetadataRecord| EnrichedRecord {
        entity_id: record.entity_id.clone(),
        entity_type: record.entity_type,
        metric: record.metric,
        value: record.value,
        prod_name: None,
        color_category: None,
    };

    let article_rows = metadata
        .iter()
        .filter(|r| r.entity_type == VertexType::Article)
        .map(|r| {
            let mut row = plain(r);
            if let Some(article) = by_id.get(&r.entity_id) {
                row.prod_name = article.prod_name.clone();
                row.color_category = article.color_category.clone();
            }
            row
        });
    let customer_rows = metadata
        .iter()
        .filter(|r| r.entity_type == VertexType::Customer)
        .map(plain);

    article_rows.chain(customer_rows).collect()
}

fn cell(value: Option<&str>) -> &str {
    value.unwrap_or("null")
}

/// Tab-separated rendering for console output
pub fn render_trending(articles: &[TrendingArticle]) -> String {
    let mut out = String::from("article_id\tprod_name\tcolor_category\tpagerank\n");
    for a in articles {
        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{:.6}",
            a.article_id,
            cell(a.prod_name.as_deref()),
            cell(a.color_category.as_deref()),
            a.score
        );
    }
    out
}

pub fn render_segments(segments: &[CustomerSegment]) -> String {
    let mut out = String::from("customer_id\tcommunity\n");
    for s in segments {
        let _ = writeln!(out, "{}\t{}", s.customer_id, s.community);
    }
    out
}

pub fn render_enriched(records: &[EnrichedRecord]) -> String {
    let mut out = String::from("entity_id\tentity_type\tmetric\tvalue\tprod_name\tcolor_category\n");
    for r in records {
        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}",
            r.entity_id,
            r.entity_type,
            r.metric,
            r.value,
            cell(r.prod_name.as_deref()),
            cell(r.color_category.as_deref())
        );
    }
    out
}
