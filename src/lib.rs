//! Maximum flow through a directed capacitated network by repeated augmentation
//! along residual paths.
//!
//! ```
//! use flow_network::FlowNetwork;
//!
//! let mut network = FlowNetwork::new();
//! network.add_edge(&"s", &"a", 3);
//! network.add_edge(&"a", &"t", 2);
//! assert!(network.set_source(&"s"));
//! assert!(network.set_sink(&"t"));
//! assert_eq!(network.max_flow().unwrap(), 2);
//! ```

pub mod augmenting_path;
pub mod common;
pub mod network;
pub mod vertex_store;

pub use augmenting_path::Augmentation;
pub use common::{Capacity, Label, MissingEdgeError, Result, VertexId};
pub use network::FlowNetwork;
pub use vertex_store::{Vertex, VertexStore};
