//! Object-set snapshots: MessagePack for in-memory copies, JSON for hosts.
//!
//! A snapshot is the shape tree without graph indices, so restoring one
//! always produces a fresh `ObjectSet`.

use crate::model::{ObjectSet, Shape};
use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};

/// A shape and its nested children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeRecord {
    #[serde(flatten)]
    pub shape: Shape,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ShapeRecord>,
}

/// Capture the shape tree below the root.
pub fn capture(objects: &ObjectSet) -> Vec<ShapeRecord> {
    objects
        .top_level()
        .into_iter()
        .map(|idx| capture_node(objects, idx))
        .collect()
}

fn capture_node(objects: &ObjectSet, idx: NodeIndex) -> ShapeRecord {
    ShapeRecord {
        shape: objects.graph[idx].clone(),
        children: objects
            .children(idx)
            .into_iter()
            .map(|child| capture_node(objects, child))
            .collect(),
    }
}

/// Build a new object set from records, preserving order.
pub fn restore(records: &[ShapeRecord]) -> ObjectSet {
    let mut objects = ObjectSet::new();
    let root = objects.root;
    restore_into(&mut objects, root, records);
    log::debug!("snapshot: restored {} shapes", objects.len());
    objects
}

fn restore_into(objects: &mut ObjectSet, parent: NodeIndex, records: &[ShapeRecord]) {
    for record in records {
        let idx = objects.add_child(parent, record.shape.clone());
        restore_into(objects, idx, &record.children);
    }
}

/// # Errors
/// Returns the encoder error as a string.
pub fn to_bytes(objects: &ObjectSet) -> Result<Vec<u8>, String> {
    rmp_serde::to_vec_named(&capture(objects)).map_err(|e| format!("snapshot encode: {e}"))
}

/// # Errors
/// Returns the decoder error as a string.
pub fn from_bytes(bytes: &[u8]) -> Result<ObjectSet, String> {
    let records: Vec<ShapeRecord> =
        rmp_serde::from_slice(bytes).map_err(|e| format!("snapshot decode: {e}"))?;
    Ok(restore(&records))
}

/// # Errors
/// Returns the serializer error as a string.
pub fn to_json(objects: &ObjectSet) -> Result<String, String> {
    serde_json::to_string(&capture(objects)).map_err(|e| format!("snapshot encode: {e}"))
}

/// Parse a JSON array of shapes, e.g.
/// `[{"name":"clip","kind":{"Rect":{"width":400,"height":300}}}]`.
///
/// # Errors
/// Returns the parser error as a string.
pub fn from_json(json: &str) -> Result<ObjectSet, String> {
    let records: Vec<ShapeRecord> =
        serde_json::from_str(json).map_err(|e| format!("snapshot decode: {e}"))?;
    Ok(restore(&records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ShapeKind;
    use pretty_assertions::assert_eq;

    fn sample() -> ObjectSet {
        let mut set = ObjectSet::new();
        set.add(Shape::rect(0.0, 0.0, 400.0, 300.0).named("clip"));
        let group = set.add(Shape::new(ShapeKind::Group {
            width: 50.0,
            height: 50.0,
        }));
        set.add_child(group, Shape::ellipse(5.0, 5.0, 10.0, 10.0));
        set
    }

    #[test]
    fn messagepack_preserves_tree() {
        let set = sample();
        let restored = from_bytes(&to_bytes(&set).unwrap()).unwrap();
        assert_eq!(capture(&restored), capture(&set));
        assert_eq!(restored.len(), 3);
        assert!(restored.find_by_name("clip").is_some());
    }

    #[test]
    fn json_fills_in_defaults() {
        let set = from_json(
            r#"[{"name":"clip","kind":{"Rect":{"width":400,"height":300}},"left":10}]"#,
        )
        .unwrap();
        let idx = set.find_by_name("clip").unwrap();
        let shape = set.get(idx).unwrap();
        assert_eq!(shape.left, 10.0);
        assert_eq!(shape.top, 0.0);
        assert_eq!(shape.scale_x, 1.0);
    }

    #[test]
    fn bad_input_is_an_error() {
        assert!(from_json("{").is_err());
        assert!(from_bytes(&[0xc1]).is_err());
    }
}
