//! Vertex implementation for the purchase graph

use super::store::{GraphError, GraphResult};
use super::types::{VertexId, VertexType};
use serde::{Deserialize, Serialize};

/// A vertex in the purchase graph
///
/// The two property slots are shared by both vertex types:
/// - Customer: `property1` = age bracket, `property2` absent
/// - Article: `property1` = product name, `property2` = colour category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    /// Unique identifier, never empty
    pub id: VertexId,

    #[serde(rename = "type")]
    pub vertex_type: VertexType,

    pub property1: Option<String>,

    pub property2: Option<String>,
}

impl Vertex {
    /// Create a vertex, rejecting an empty id
    pub fn new(
        id: impl Into<VertexId>,
        vertex_type: VertexType,
        property1: Option<String>,
        property2: Option<String>,
    ) -> GraphResult<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(GraphError::EmptyVertexId(vertex_type));
        }
        Ok(Vertex {
            id,
            vertex_type,
            property1,
            property2,
        })
    }

    /// Create a customer vertex with an optional age bracket
    pub fn customer(id: impl Into<VertexId>, age_bracket: Option<String>) -> GraphResult<Self> {
        Self::new(id, VertexType::Customer, age_bracket, None)
    }

    /// Create an article vertex
    pub fn article(
        id: impl Into<VertexId>,
        prod_name: Option<String>,
        color_category: Option<String>,
    ) -> GraphResult<Self> {
        Self::new(id, VertexType::Article, prod_name, color_category)
    }

    pub fn is_customer(&self) -> bool {
        self.vertex_type == VertexType::Customer
    }

    pub fn is_article(&self) -> bool {
        self.vertex_type == VertexType::Article
    }

    /// Age bracket of a customer
    pub fn age_bracket(&self) -> Option<&str> {
        match self.vertex_type {
            VertexType::Customer => self.property1.as_deref(),
            VertexType::Article => None,
        }
    }

    /// Product name of an article
    pub fn prod_name(&self) -> Option<&str> {
        match self.vertex_type {
            VertexType::Article => self.property1.as_deref(),
            VertexType::Customer => None,
        }
    }

    /// Colour category of an article
    pub fn color_category(&self) -> Option<&str> {
        match self.vertex_type {
            VertexType::Article => self.property2.as_deref(),
            VertexType::Customer => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_vertex() {
        let v = Vertex::customer("c1", Some("Adult".to_string())).unwrap();
        assert!(v.is_customer());
        assert_eq!(v.age_bracket(), Some("Adult"));
        assert_eq!(v.prod_name(), None);
        assert_eq!(v.property2, None);
    }

    #[test]
    fn test_article_vertex() {
        let v = Vertex::article("a1", Some("Strap top".into()), Some("Black".into())).unwrap();
        assert!(v.is_article());
        assert_eq!(v.prod_name(), Some("Strap top"));
        assert_eq!(v.color_category(), Some("Black"));
        assert_eq!(v.age_bracket(), None);
    }

    #[test]
    fn test_empty_id_rejected() {
        let err = Vertex::customer("", None).unwrap_err();
        assert_eq!(err, GraphError::EmptyVertexId(VertexType::Customer));
    }

    #[test]
    fn test_serializes_type_field() {
        let v = Vertex::customer("c1", None).unwrap();
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["type"], "Customer");
        assert_eq!(json["id"], "c1");
    }
}
