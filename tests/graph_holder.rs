use callmap::core::graph::{CallGraphHolder, UNRESOLVED_KIND};
use petgraph::graph::NodeIndex;

#[test]
fn add_node_is_idempotent_on_identity_first_call_wins() {
    let mut holder = CallGraphHolder::new();

    let first = holder.add_node("bucket", "wf", UNRESOLVED_KIND, false);
    let second = holder.add_node("bucket", "wf", "workflow", true);

    assert_eq!(first, second);
    assert_eq!(holder.node_count(), 1);

    let node = holder.node(first).unwrap();
    assert_eq!(node.kind, UNRESOLVED_KIND);
    assert!(!node.exists);
}

#[test]
fn nodes_deduplicate_across_roles_and_buckets() {
    let mut holder = CallGraphHolder::new();

    let a = holder.add_node("bucket", "A", "workflow", true);
    let b = holder.add_node("bucket", "B", "workflow", true);
    // Same object name in another bucket is a distinct identity.
    let b1 = holder.add_node("bucket1", "B", "workflow", true);
    // Re-sighting B as a dependency target changes nothing.
    let b_again = holder.add_node("bucket", "B", "rule", false);

    assert_eq!(b, b_again);
    assert_ne!(b, b1);
    assert_eq!(holder.node_count(), 3);

    holder.add_depends_on_edge(a, b).unwrap();
    holder.add_depends_on_edge(a, b1).unwrap();
    assert_eq!(holder.edge_count(), 2);
}

#[test]
fn self_loop_edges_are_preserved() {
    let mut holder = CallGraphHolder::new();
    let a = holder.add_node("bucket", "A", "workflow", true);

    holder.add_depends_on_edge(a, a).unwrap();

    assert_eq!(holder.edge_count(), 1);
    let edges = holder.edges();
    assert_eq!(edges[0].from, a);
    assert_eq!(edges[0].to, a);
}

#[test]
fn duplicate_edges_are_not_deduplicated() {
    let mut holder = CallGraphHolder::new();
    let a = holder.add_node("bucket", "A", "workflow", true);
    let b = holder.add_node("bucket", "B", "workflow", true);

    holder.add_depends_on_edge(a, b).unwrap();
    holder.add_depends_on_edge(a, b).unwrap();

    assert_eq!(holder.edge_count(), 2);
}

#[test]
fn edge_with_unregistered_endpoint_fails_fast() {
    let mut holder = CallGraphHolder::new();
    let a = holder.add_node("bucket", "A", "workflow", true);
    let unknown = NodeIndex::new(17);

    assert!(holder.add_depends_on_edge(a, unknown).is_err());
    assert!(holder.add_depends_on_edge(unknown, a).is_err());
    // The failed calls must not have appended anything.
    assert_eq!(holder.edge_count(), 0);
}

#[test]
fn aggregate_sets_are_insertion_order_independent() {
    let mut forward = CallGraphHolder::new();
    forward.add_node("alpha", "one", "workflow", true);
    forward.add_node("beta", "two", "workflow", true);
    forward.add_node("alpha", "three", "rule", true);

    let mut reverse = CallGraphHolder::new();
    reverse.add_node("alpha", "three", "rule", true);
    reverse.add_node("beta", "two", "workflow", true);
    reverse.add_node("alpha", "one", "workflow", true);

    assert_eq!(forward.bucket_set(), reverse.bucket_set());
    assert_eq!(forward.object_set(), reverse.object_set());
    assert_eq!(
        forward.bucket_set().into_iter().collect::<Vec<_>>(),
        vec!["alpha".to_string(), "beta".to_string()]
    );
}
