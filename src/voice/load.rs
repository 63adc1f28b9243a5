use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::graph::VoiceGraph;
use super::parse::parse_graph_json;

pub fn load_voice_graph(path: &Path) -> Result<VoiceGraph> {
    info!(path = %path.display(), "loading voice graph");

    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read graph data from {}", path.display()))?;
    let parsed = parse_graph_json(&raw)
        .with_context(|| format!("failed to parse graph data from {}", path.display()))?;
    let graph = VoiceGraph::from_raw(parsed);

    info!(
        nodes = graph.node_count(),
        links = graph.link_count(),
        dropped_links = graph.dropped_links,
        "voice graph loaded"
    );
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn loads_graph_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"{{"nodes": [
                {{"id": "A1", "label": "Actor", "type": "actor"}},
                {{"id": "W1", "label": "Work", "type": "work", "medium": "game"}}
            ], "links": [{{"source": "A1", "target": "W1"}}]}}"#
        )
        .expect("write payload");

        let graph = load_voice_graph(file.path()).expect("graph loads");
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.link_count(), 1);
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("voice_graph.json");

        let error = load_voice_graph(&path).expect_err("file does not exist");
        assert!(format!("{error:#}").contains("voice_graph.json"));
    }

    #[test]
    fn malformed_json_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "{{\"nodes\": [").expect("write payload");

        let error = load_voice_graph(file.path()).expect_err("truncated JSON");
        assert!(format!("{error:#}").contains("invalid voice graph JSON"));
    }

    #[test]
    fn bundled_sample_loads_cleanly() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/voice_graph.json");

        let graph = load_voice_graph(&path).expect("sample graph loads");
        assert_eq!(graph.dropped_links, 0);
        assert_eq!(
            graph.mediums(),
            vec!["anime television series", "film", "video game"]
        );
    }
}
