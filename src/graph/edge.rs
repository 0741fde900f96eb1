//! Edge implementation for the purchase graph
//!
//! Edges are directed customer -> article purchases. Two edges may share
//! the same endpoints; each one stands for a separate transaction.

use super::types::{EdgeType, VertexId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A directed purchase edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Customer that made the purchase
    pub src: VertexId,

    /// Article that was bought
    pub dst: VertexId,

    /// Transaction date
    pub date: NaiveDate,

    pub price: f64,

    pub year: i32,

    pub month: u32,

    pub relationship: EdgeType,
}

impl Edge {
    /// Create a new purchase edge
    pub fn purchase(
        src: impl Into<VertexId>,
        dst: impl Into<VertexId>,
        date: NaiveDate,
        price: f64,
        year: i32,
        month: u32,
    ) -> Self {
        Edge {
            src: src.into(),
            dst: dst.into(),
            date,
            price,
            year,
            month,
            relationship: EdgeType::Purchase,
        }
    }
}
