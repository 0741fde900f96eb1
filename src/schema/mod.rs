//! Schema mapping from transaction rows to graph records
//!
//! Each accepted row contributes one purchase edge, one customer vertex and
//! one article vertex. Vertices are deduplicated by id, and when the same id
//! shows up with different properties the first row seen wins.

use crate::graph::{Edge, GraphError, GraphResult, PurchaseGraph, Vertex, VertexId};
use chrono::NaiveDate;
use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Schema mapping errors
#[derive(Error, Debug, PartialEq)]
pub enum SchemaError {
    /// The same id names both a customer and an article
    #[error("Id {0} is used by both a customer and an article")]
    IdTypeConflict(VertexId),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),
}

pub type SchemaResult<T> = Result<T, SchemaError>;

/// One row of the enriched transactions table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRow {
    pub customer_id: Option<String>,
    pub article_id: Option<String>,
    /// Numeric and nullable upstream, so integral floats such as `24.0` occur
    pub age: Option<f64>,
    pub prod_name: Option<String>,
    pub color_category: Option<String>,
    pub t_dat: NaiveDate,
    pub price: f64,
    pub transaction_year: i32,
    pub transaction_month: u32,
}

/// Customer age bracket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeBracket {
    Youth,
    Adult,
    Senior,
}

impl AgeBracket {
    /// `< 30` Youth, `30..=50` Adult, anything else Senior
    pub fn from_age(age: f64) -> Self {
        if age < 30.0 {
            AgeBracket::Youth
        } else if age <= 50.0 {
            AgeBracket::Adult
        } else {
            AgeBracket::Senior
        }
    }

    /// A missing age falls through to Senior, like any age above 50
    pub fn from_optional_age(age: Option<f64>) -> Self {
        age.map_or(AgeBracket::Senior, AgeBracket::from_age)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeBracket::Youth => "Youth",
            AgeBracket::Adult => "Adult",
            AgeBracket::Senior => "Senior",
        }
    }
}

impl fmt::Display for AgeBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Row and deduplication counters from one mapping pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MappingStats {
    pub input_rows: usize,
    pub accepted_rows: usize,
    /// Rows without a customer id or an article id
    pub rejected_rows: usize,
    /// Customer ids seen again with a different age bracket
    pub customer_conflicts: usize,
    /// Article ids seen again with a different name or colour
    pub article_conflicts: usize,
}

/// Mapper output: deduplicated vertices plus one edge per accepted row
#[derive(Debug, Clone, Default)]
pub struct MappedGraph {
    /// Customers in first-seen order, then articles in first-seen order
    pub vertices: Vec<Vertex>,
    pub edges: Vec<Edge>,
    pub stats: MappingStats,
}

impl MappedGraph {
    /// Load the mapped records into a frozen graph store
    pub fn into_graph(self) -> GraphResult<PurchaseGraph> {
        PurchaseGraph::build(self.vertices, self.edges)
    }
}

/// Trimmed id, or `None` when absent or blank
fn present(id: Option<&str>) -> Option<&str> {
    id.map(str::trim).filter(|s| !s.is_empty())
}

/// Map transaction rows to vertices and edges
pub fn map_rows<I>(rows: I) -> SchemaResult<MappedGraph>
where
    I: IntoIterator<Item = TransactionRow>,
{
    let mut customers: IndexMap<VertexId, Vertex> = IndexMap::new();
    let mut articles: IndexMap<VertexId, Vertex> = IndexMap::new();
    let mut edges = Vec::new();
    let mut stats = MappingStats::default();

    for row in rows {
        stats.input_rows += 1;

        let (customer_id, article_id) = match (
            present(row.customer_id.as_deref()),
            present(row.article_id.as_deref()),
        ) {
            (Some(c), Some(a)) => (VertexId::new(c), VertexId::new(a)),
            _ => {
                debug!(
                    row = stats.input_rows,
                    customer_id = ?row.customer_id,
                    article_id = ?row.article_id,
                    "Rejecting row without customer or article id"
                );
                stats.rejected_rows += 1;
                continue;
            }
        };

        let bracket = Some(AgeBracket::from_optional_age(row.age).as_str().to_string());
        match customers.entry(customer_id.clone()) {
            Entry::Occupied(seen) => {
                if seen.get().property1 != bracket {
                    stats.customer_conflicts += 1;
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(Vertex::customer(customer_id.clone(), bracket)?);
            }
        }

        match articles.entry(article_id.clone()) {
            Entry::Occupied(seen) => {
                let seen = seen.get();
                if seen.property1 != row.prod_name || seen.property2 != row.color_category {
                    stats.article_conflicts += 1;
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(Vertex::article(
                    article_id.clone(),
                    row.prod_name,
                    row.color_category,
                )?);
            }
        }

        edges.push(Edge::purchase(
            customer_id,
            article_id,
            row.t_dat,
            row.price,
            row.transaction_year,
            row.transaction_month,
        ));
        stats.accepted_rows += 1;
    }

    if let Some(id) = customers.keys().find(|id| articles.contains_key(*id)) {
        return Err(SchemaError::IdTypeConflict(id.clone()));
    }

    if stats.customer_conflicts + stats.article_conflicts > 0 {
        warn!(
            customers = stats.customer_conflicts,
            articles = stats.article_conflicts,
            "Conflicting vertex properties resolved by first-seen row"
        );
    }
    info!(
        rows = stats.input_rows,
        rejected = stats.rejected_rows,
        customers = customers.len(),
        articles = articles.len(),
        edges = edges.len(),
        "Mapped transaction rows"
    );

    let vertices = customers.into_values().chain(articles.into_values()).collect();

    Ok(MappedGraph {
        vertices,
        edges,
        stats,
    })
}
