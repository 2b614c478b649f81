//! Recursive property access with dotted paths.
//!
//! [`RecursiveObjectReader`] flattens a value tree into `a.b.0.c` style paths.
//! Object graphs may be cyclic, so traversal tracks the objects currently being
//! visited and stops descending at a fixed ceiling (100 by default).

use std::sync::Arc;

use crate::reader;
use crate::value::{AnyValue, DynObject, effective_value};

/// Default traversal ceiling.
pub const DEFAULT_MAX_DEPTH: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecursiveObjectReader {
    max_depth: usize,
}

impl Default for RecursiveObjectReader {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl RecursiveObjectReader {
    /// A ceiling of zero is raised to one so the root is always read.
    #[must_use]
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth: max_depth.max(1),
        }
    }

    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// All leaf values keyed by dotted path, in traversal order.
    ///
    /// Empty containers contribute nothing. A value that is already being
    /// visited higher up the path is skipped. A container reached at the
    /// ceiling is reported as a leaf.
    #[must_use]
    pub fn get_properties(&self, value: &AnyValue) -> Vec<(String, AnyValue)> {
        let mut result = Vec::new();
        let mut in_flight = Vec::new();
        self.collect(value, "", &mut result, &mut in_flight);
        result
    }

    #[must_use]
    pub fn get_property_names(&self, value: &AnyValue) -> Vec<String> {
        self.get_properties(value)
            .into_iter()
            .map(|(path, _)| path)
            .collect()
    }

    /// Resolve a dotted path. An empty path yields nothing.
    #[must_use]
    pub fn get_property(&self, value: &AnyValue, path: &str) -> Option<AnyValue> {
        if path.is_empty() {
            return None;
        }
        let mut current = effective_value(value).into_owned();
        for (depth, segment) in path.split('.').enumerate() {
            if depth >= self.max_depth {
                return None;
            }
            current = reader::get_property(&current, segment)?;
        }
        Some(current)
    }

    #[must_use]
    pub fn has_property(&self, value: &AnyValue, path: &str) -> bool {
        self.get_property(value, path).is_some()
    }

    fn collect(
        &self,
        value: &AnyValue,
        path: &str,
        result: &mut Vec<(String, AnyValue)>,
        in_flight: &mut Vec<usize>,
    ) {
        let value = effective_value(value);
        let Some(properties) = reader::get_properties(&value) else {
            if !path.is_empty() {
                result.push((path.to_string(), value.into_owned()));
            }
            return;
        };

        let identity = value.as_object().map(object_identity);
        if let Some(id) = identity {
            if in_flight.contains(&id) {
                tracing::trace!(path, "skipping object already on the traversal path");
                return;
            }
        }

        if in_flight.len() >= self.max_depth {
            tracing::warn!(
                path,
                ceiling = self.max_depth,
                "traversal ceiling reached; reporting value as a leaf"
            );
            if !path.is_empty() {
                result.push((path.to_string(), value.into_owned()));
            }
            return;
        }

        in_flight.push(identity.unwrap_or(0));
        for (key, child) in properties {
            let child_path = if path.is_empty() {
                key
            } else {
                format!("{path}.{key}")
            };
            self.collect(&child, &child_path, result, in_flight);
        }
        in_flight.pop();
    }
}

fn object_identity(object: &Arc<dyn DynObject>) -> usize {
    Arc::as_ptr(object).cast::<()>() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::PropertyEnumerable;
    use crate::value::Record;
    use pretty_assertions::assert_eq;
    use std::any::Any;
    use std::sync::OnceLock;

    /// Object whose `next` can point back at itself.
    #[derive(Debug)]
    struct Node {
        name: String,
        next: OnceLock<AnyValue>,
    }

    impl PropertyEnumerable for Node {
        fn properties_of(&self) -> Vec<(String, AnyValue)> {
            vec![
                ("name".into(), AnyValue::from(self.name.as_str())),
                ("next".into(), self.next.get().cloned().unwrap_or_default()),
            ]
        }
    }

    impl DynObject for Node {
        fn type_name(&self) -> &str {
            "Node"
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn nested() -> AnyValue {
        AnyValue::map([
            ("id", AnyValue::from("1")),
            (
                "owner",
                AnyValue::object(
                    Record::new("Person")
                        .with_field("name", "ABC")
                        .with_field("tags", vec!["a", "b"]),
                ),
            ),
            ("empty", AnyValue::Map(Vec::new())),
        ])
    }

    #[test]
    fn flattens_nested_values() {
        let reader = RecursiveObjectReader::default();
        assert_eq!(
            reader.get_property_names(&nested()),
            vec!["id", "owner.name", "owner.tags.0", "owner.tags.1"]
        );
    }

    #[test]
    fn resolves_dotted_paths() {
        let reader = RecursiveObjectReader::default();
        let value = nested();
        assert_eq!(
            reader.get_property(&value, "owner.tags.1"),
            Some(AnyValue::from("b"))
        );
        assert!(reader.has_property(&value, "owner.name"));
        assert!(!reader.has_property(&value, "owner.Name"));
        assert!(!reader.has_property(&value, ""));
    }

    #[test]
    fn self_reference_terminates() {
        let node = Arc::new(Node {
            name: "a".into(),
            next: OnceLock::new(),
        });
        let value = AnyValue::Object(node.clone());
        node.next.set(value.clone()).unwrap();

        let names = RecursiveObjectReader::default().get_property_names(&value);
        assert_eq!(names, vec!["name"]);
    }

    #[test]
    fn ceiling_reports_deep_values_as_leaves() {
        let mut value = AnyValue::from("leaf");
        for _ in 0..5 {
            value = AnyValue::map([("n", value)]);
        }
        let reader = RecursiveObjectReader::new(2);
        let props = reader.get_properties(&value);
        assert_eq!(props.len(), 1);
        assert_eq!(props[0].0, "n.n");
        assert!(matches!(props[0].1, AnyValue::Map(_)));

        let full = RecursiveObjectReader::default().get_properties(&value);
        assert_eq!(full, vec![("n.n.n.n.n".to_string(), AnyValue::from("leaf"))]);
    }

    #[test]
    fn zero_ceiling_is_raised_to_one() {
        assert_eq!(RecursiveObjectReader::new(0).max_depth(), 1);
    }
}
