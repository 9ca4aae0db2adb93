//! Output types for the app's JavaScript layer.
//!
//! These structs are serialized to JSON and handed to the renderer, which
//! draws nodes at `x`/`y` and edges between them.

use serde::Serialize;

use crate::error::InputError;
use crate::layout::{LayoutConfig, LayoutResult, RectF};

/// A placed node, with screen geometry already resolved
#[derive(Debug, Clone, Serialize)]
pub struct NodeOutput {
    pub id: String,
    pub ring: u32,
    pub angle: f64,
    pub radius_offset: f64,
    /// Base ring radius plus offset
    pub radius: f64,
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connected_to_profile_id: Option<String>,
}

/// An edge from a node to its resolved parent
#[derive(Debug, Clone, Serialize)]
pub struct EdgeOutput {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub message: String,
}

/// The combined output sent to the app
#[derive(Debug, Clone, Serialize)]
pub struct TreeOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<NodeOutput>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub edges: Vec<EdgeOutput>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unplaced: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<RectF>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl TreeOutput {
    pub fn from_layout(result: &LayoutResult, cfg: &LayoutConfig) -> Self {
        let nodes = result
            .nodes
            .iter()
            .map(|n| {
                let pos = n.position(cfg);
                NodeOutput {
                    id: n.id.0.clone(),
                    ring: n.ring,
                    angle: n.angle,
                    radius_offset: n.radius_offset,
                    radius: n.radius(cfg),
                    x: pos.x,
                    y: pos.y,
                    connected_to_profile_id: n.connected_to_profile_id.as_ref().map(|id| id.0.clone()),
                }
            })
            .collect();

        let edges = result
            .edges()
            .into_iter()
            .map(|(from, to)| EdgeOutput { from: from.0.clone(), to: to.0.clone() })
            .collect();

        TreeOutput {
            focus: result.focus.as_ref().map(|id| id.0.clone()),
            root: result.root.as_ref().map(|id| id.0.clone()),
            nodes,
            edges,
            unplaced: result.unplaced.iter().map(|id| id.0.clone()).collect(),
            bounds: result.bounds(cfg),
            error: None,
        }
    }

    pub fn from_error(err: &InputError) -> Self {
        TreeOutput {
            focus: None,
            root: None,
            nodes: vec![],
            edges: vec![],
            unplaced: vec![],
            bounds: None,
            error: Some(ErrorInfo { message: err.to_string() }),
        }
    }
}
