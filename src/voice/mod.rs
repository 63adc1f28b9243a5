mod graph;
mod load;
mod parse;

pub use graph::{Node, NodeKind, VoiceGraph};
pub use load::load_voice_graph;

#[cfg(test)]
pub(crate) use graph::fixtures;
