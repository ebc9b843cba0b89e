use callmap::core::catalog::{CatalogObjectMetadata, InMemoryCatalog, MetadataEntry};
use callmap::core::graph::UNRESOLVED_KIND;
use callmap::core::resolver::{DependencyResolver, DEPENDS_ON_LABEL};

fn object(bucket: &str, name: &str, depends_on: &[&str]) -> CatalogObjectMetadata {
    let mut object = CatalogObjectMetadata::new(bucket, name, "workflow");
    for reference in depends_on {
        object = object.with_metadata(MetadataEntry::new(DEPENDS_ON_LABEL, reference));
    }
    object
}

#[test]
fn objects_without_dependencies_are_not_registered() {
    let objects = vec![object("bucket", "standalone", &[])];
    let lookup = InMemoryCatalog::from_objects(&objects);

    let holder = DependencyResolver::new()
        .build_call_graph(&objects, &lookup)
        .unwrap();

    assert_eq!(holder.node_count(), 0);
    assert_eq!(holder.edge_count(), 0);
}

#[test]
fn dangling_reference_yields_unresolved_node_and_edge() {
    let objects = vec![object("bucket", "A", &["bucket/ghost"])];
    let lookup = InMemoryCatalog::from_objects(&objects);

    let holder = DependencyResolver::new()
        .build_call_graph(&objects, &lookup)
        .unwrap();

    assert_eq!(holder.node_count(), 2);
    assert_eq!(holder.edge_count(), 1);

    let ghost = holder.node(holder.node_index("bucket", "ghost").unwrap()).unwrap();
    assert!(!ghost.exists);
    assert_eq!(ghost.kind, UNRESOLVED_KIND);

    let caller = holder.node(holder.node_index("bucket", "A").unwrap()).unwrap();
    assert!(caller.exists);
    assert_eq!(caller.kind, "workflow");
}

#[test]
fn resolved_target_carries_its_catalog_kind() {
    let mut target = CatalogObjectMetadata::new("bucket", "B", "rule");
    target = target.with_content_type("application/xml");
    let objects = vec![object("bucket", "A", &["bucket/B"]), target];
    let lookup = InMemoryCatalog::from_objects(&objects);

    let holder = DependencyResolver::new()
        .build_call_graph(&objects, &lookup)
        .unwrap();

    let called = holder.node(holder.node_index("bucket", "B").unwrap()).unwrap();
    assert!(called.exists);
    assert_eq!(called.kind, "rule");
}

#[test]
fn self_reference_produces_a_self_loop() {
    let objects = vec![object("bucket", "A", &["bucket/A"])];
    let lookup = InMemoryCatalog::from_objects(&objects);

    let holder = DependencyResolver::new()
        .build_call_graph(&objects, &lookup)
        .unwrap();

    assert_eq!(holder.node_count(), 1);
    assert_eq!(holder.edge_count(), 1);
    let edges = holder.edges();
    assert_eq!(edges[0].from, edges[0].to);
}

#[test]
fn malformed_reference_is_skipped_and_build_continues() {
    let objects = vec![object(
        "bucket",
        "A",
        &["no-separator-here", "bucket/B", "a/b/c"],
    )];
    let lookup = InMemoryCatalog::from_objects(&objects);

    let holder = DependencyResolver::new()
        .build_call_graph(&objects, &lookup)
        .unwrap();

    // Only the well-formed reference survives.
    assert_eq!(holder.node_count(), 2);
    assert_eq!(holder.edge_count(), 1);
    assert!(holder.node_index("bucket", "B").is_some());
}

#[test]
fn node_count_equals_distinct_identities_seen() {
    let objects = vec![
        object("bucket", "A", &["bucket/B", "bucket1/B"]),
        object("bucket", "B", &["bucket/C"]),
        object("bucket1", "B", &["bucket/C"]),
    ];
    let lookup = InMemoryCatalog::from_objects(&objects);

    let holder = DependencyResolver::new()
        .build_call_graph(&objects, &lookup)
        .unwrap();

    // Identities: bucket/A, bucket/B, bucket1/B, bucket/C.
    assert_eq!(holder.node_count(), 4);
    assert_eq!(holder.edge_count(), 4);
}

#[test]
fn two_bucket_chain_fixture_builds_full_graph() {
    let objects = vec![
        object("bucket", "A_Workflow", &["bucket/B_Workflow"]),
        object("bucket", "B_Workflow", &["bucket/C_Workflow"]),
        object("bucket", "C_Workflow", &["bucket/D_Workflow"]),
        object("bucket", "D_Workflow", &["bucket/E_Workflow"]),
        object("bucket", "E_Workflow", &[]),
        object("bucket1", "F_Workflow", &["bucket1/G_Workflow"]),
        object("bucket1", "G_Workflow", &["bucket1/H_Workflow"]),
        object("bucket1", "H_Workflow", &[]),
    ];
    let lookup = InMemoryCatalog::from_objects(&objects);

    let holder = DependencyResolver::new()
        .build_call_graph(&objects, &lookup)
        .unwrap();

    assert_eq!(holder.node_count(), 8);
    assert_eq!(holder.edge_count(), 6);
    assert_eq!(holder.bucket_set().len(), 2);
    assert!(holder.node_set().iter().all(|node| node.exists));
}
