//! Hand-off of the finished layer chain to the training side.

use crate::error::{EditorError, Result};
use crate::layer::Activation;
use crate::scene::Scene;
use log::info;
use serde::{Deserialize, Serialize};

/// One intermediate dense layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenseLayerSpec {
    pub name: String,
    pub units: u32,
    pub activation: Option<Activation>,
}

/// Network definition consumed by the training engine.
///
/// Input size comes from the first layer, output size from the last, and
/// every layer in between becomes a dense layer, in order. No compatibility
/// checks are made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub input_size: u32,
    pub output_size: u32,
    pub hidden: Vec<DenseLayerSpec>,
}

impl NetworkSpec {
    pub fn from_scene(scene: &Scene) -> Self {
        // A scene always holds at least [Input, Output].
        let layers = scene.layers();
        let n = layers.len();

        let spec = Self {
            input_size: layers[0].node_count(),
            output_size: layers[n - 1].node_count(),
            hidden: layers[1..n - 1]
                .iter()
                .map(|layer| DenseLayerSpec {
                    name: layer.name().to_string(),
                    units: layer.node_count(),
                    activation: layer.activation(),
                })
                .collect(),
        };
        info!(
            "Built network spec: {} -> {} hidden -> {}",
            spec.input_size,
            spec.hidden.len(),
            spec.output_size
        );
        spec
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(EditorError::Serialize)
    }
}
