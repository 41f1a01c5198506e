//! Generic iteration with early exit.

use std::collections::BTreeMap;

/// Visitor verdict controlling iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Keep visiting.
    Continue,
    /// End iteration before the next item.
    Stop,
}

/// Visits each item of a sequence together with its index.
///
/// Returning [`Step::Stop`] from the visitor ends iteration immediately;
/// already-visited items are unaffected.
pub fn each_values<T>(items: &[T], mut visit: impl FnMut(&T, usize) -> Step) {
    for (index, item) in items.iter().enumerate() {
        if visit(item, index) == Step::Stop {
            break;
        }
    }
}

/// Visits each entry of a mapping together with its key, in key order.
///
/// Returning [`Step::Stop`] from the visitor ends iteration immediately.
pub fn each_entries<V>(entries: &BTreeMap<String, V>, mut visit: impl FnMut(&V, &str) -> Step) {
    for (key, value) in entries {
        if visit(value, key) == Step::Stop {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{each_entries, each_values, Step};
    use std::collections::BTreeMap;

    #[test]
    fn visits_full_sequence_in_order() {
        let items = ["a", "b", "c", "d", "e"];
        let mut seen = Vec::new();
        each_values(&items, |value, _| {
            seen.push(*value);
            Step::Continue
        });
        assert_eq!(seen, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn stops_before_matching_item() {
        let items = ["a", "b", "c", "d", "e"];
        let mut seen = Vec::new();
        each_values(&items, |value, _| {
            if *value == "d" {
                return Step::Stop;
            }
            seen.push(*value);
            Step::Continue
        });
        assert_eq!(seen, vec!["a", "b", "c"]);
    }

    #[test]
    fn passes_sequence_indices() {
        let items = [10, 20, 30];
        let mut indices = Vec::new();
        each_values(&items, |_, index| {
            indices.push(index);
            Step::Continue
        });
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn visits_every_mapping_entry() {
        let mut entries = BTreeMap::new();
        entries.insert("foo".to_string(), true);
        entries.insert("bar".to_string(), false);
        entries.insert("baz".to_string(), true);

        let mut collected = BTreeMap::new();
        each_entries(&entries, |value, key| {
            collected.insert(key.to_string(), *value);
            Step::Continue
        });
        assert_eq!(collected, entries);
    }

    #[test]
    fn stops_mapping_iteration_early() {
        let mut entries = BTreeMap::new();
        entries.insert("a".to_string(), 1);
        entries.insert("b".to_string(), 2);
        entries.insert("c".to_string(), 3);

        let mut seen = Vec::new();
        each_entries(&entries, |value, key| {
            seen.push((key.to_string(), *value));
            if key == "b" {
                Step::Stop
            } else {
                Step::Continue
            }
        });
        assert_eq!(
            seen,
            vec![("a".to_string(), 1), ("b".to_string(), 2)]
        );
    }
}
