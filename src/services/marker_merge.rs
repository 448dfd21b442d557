use std::collections::HashSet;

use crate::models::Marker;

/// Merge two normalized marker lists, deduplicating by id.
///
/// On an id collision the entry seen first wins, so everything in `first`
/// beats `second`. Output is in first-seen order. Markers without an id
/// cannot collide and are always kept.
pub fn merge_markers(first: Vec<Marker>, second: Vec<Marker>) -> Vec<Marker> {
    let mut seen = HashSet::new();
    let mut merged = Vec::with_capacity(first.len() + second.len());
    for marker in first.into_iter().chain(second) {
        let fresh = match &marker.id {
            Some(id) => seen.insert(id.merge_key()),
            None => true,
        };
        if fresh {
            merged.push(marker);
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MarkerId;

    fn marker(id: Option<MarkerId>, title: &str) -> Marker {
        Marker {
            id,
            title: title.to_string(),
            lat: 6.5,
            lng: 3.3,
            icon: None,
            slug: None,
            category: None,
            description: None,
        }
    }

    fn num(n: i64) -> Option<MarkerId> {
        Some(MarkerId::Number(n.into()))
    }

    #[test]
    fn first_source_wins_and_order_is_kept() {
        let a = vec![marker(num(1), "A1"), marker(num(2), "A2")];
        let b = vec![marker(num(2), "B-version"), marker(num(3), "B3")];
        let merged = merge_markers(a, b);
        let titles: Vec<_> = merged.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["A1", "A2", "B3"]);
    }

    #[test]
    fn numeric_and_text_ids_do_not_collide() {
        let merged = merge_markers(
            vec![marker(num(7), "number")],
            vec![marker(Some(MarkerId::Text("7".into())), "text")],
        );
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn duplicates_inside_one_source_collapse() {
        let merged = merge_markers(vec![marker(num(1), "first"), marker(num(1), "again")], vec![]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].title, "first");
    }

    #[test]
    fn id_less_markers_are_kept() {
        let merged = merge_markers(vec![marker(None, "a")], vec![marker(None, "b")]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn empty_inputs_give_empty_vec() {
        assert!(merge_markers(vec![], vec![]).is_empty());
    }
}
