// ChainedList public API checks. Positional edge cases live with the
// module's unit tests; these cover what the map relies on.
use chained_hashmap::{ChainedList, ListError};

#[test]
fn insert_at_shifts_later_nodes() {
    let mut list: ChainedList<&str, ()> = ["A", "B", "C"].into_iter().map(|k| (k, ())).collect();
    list.insert_at(1, "X", ()).unwrap();
    let order: Vec<_> = list.iter().map(|n| *n.key()).collect();
    assert_eq!(order, vec!["A", "X", "B", "C"]);
    assert_eq!(list.to_string(), "( A ) => ( X ) => ( B ) => ( C )");
}

#[test]
fn insert_at_rejects_out_of_range() {
    let mut list: ChainedList<&str, ()> = ChainedList::new();
    let err = list.insert_at(1, "X", ()).unwrap_err();
    assert_eq!(err, ListError::IndexOutOfRange { index: 1, len: 0 });
    assert_eq!(
        err.to_string(),
        "index 1 out of range for insert into list of length 0"
    );
}

#[test]
fn remove_from_empty_list_is_quiet() {
    let mut list: ChainedList<String, i32> = ChainedList::default();
    assert!(list.remove_at(0).is_none());
    assert!(list.pop().is_none());
    assert_eq!(list.len(), 0);
    assert!(list.head().is_none());
    assert!(list.tail().is_none());
    assert_eq!(list.to_string(), "");
}

#[test]
fn traverse_finds_first_match() {
    let mut list: ChainedList<String, i32> = ChainedList::new();
    list.append("x".to_string(), 1);
    list.append("y".to_string(), 2);
    list.append("z".to_string(), 3);
    let found = list.traverse(|n| (n.key() == "y").then(|| *n.value()));
    assert_eq!(found, Some(2));
    assert_eq!(list.find("z"), Some(2));
    assert_eq!(list.find("w"), None);
    assert_eq!(list.at(0).map(|n| n.key().as_str()), Some("x"));
}
