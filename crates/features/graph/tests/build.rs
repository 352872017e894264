use bootcfg_graph::{GraphBuilder, GraphError, RelationshipGraph};
use bootcfg_kernel::domain::{
    CatalogSpec, FlagDescriptor, FlagId, FlagKind, RelationKind, RelationKinds, Relationship,
};
use bootcfg_registry::{FlagRegistry, RegistryError};

fn registry(ids: &[&str]) -> FlagRegistry {
    FlagRegistry::from_descriptors(ids.iter().map(|id| FlagDescriptor::new(*id, FlagKind::Presence)))
        .expect("registry fixture")
}

fn usb_builder() -> GraphBuilder {
    GraphBuilder::new(registry(&["usb", "usb_gadget", "usb_storage", "dwc3", "gadget_controller"]))
}

fn ids<'a>(iter: impl Iterator<Item = &'a FlagId>) -> Vec<&'a str> {
    iter.map(FlagId::as_str).collect()
}

#[test]
fn unknown_endpoint_is_rejected() {
    let mut builder = usb_builder();

    let err = builder.add_relationship(RelationKind::Requires, "usb_gadget", "usb3").unwrap_err();
    assert!(matches!(err, GraphError::UnknownFlag { ref flag } if flag.as_str() == "usb3"));

    let err = builder.add_relationship(RelationKind::Requires, "musb", "usb").unwrap_err();
    assert!(matches!(err, GraphError::UnknownFlag { ref flag } if flag.as_str() == "musb"));
}

#[test]
fn exact_duplicate_is_rejected() {
    let mut builder = usb_builder();
    builder.add_relationship(RelationKind::Requires, "usb_gadget", "usb").unwrap();

    let err = builder.add_relationship(RelationKind::Requires, "usb_gadget", "usb").unwrap_err();
    assert!(matches!(
        err,
        GraphError::DuplicateRelationship { ref relationship }
            if *relationship == Relationship::requires("usb_gadget", "usb")
    ));

    // Same endpoints, different kind: a distinct triple.
    builder.add_relationship(RelationKind::Provides, "usb_gadget", "usb").unwrap();
}

#[test]
fn mirrored_conflict_counts_as_duplicate() {
    let mut builder = usb_builder();
    builder.add_relationship(RelationKind::Conflicts, "usb_storage", "usb_gadget").unwrap();

    let err =
        builder.add_relationship(RelationKind::Conflicts, "usb_gadget", "usb_storage").unwrap_err();
    assert!(matches!(err, GraphError::DuplicateRelationship { .. }));

    // REQUIRES is directed, so the mirror is a different relationship (and a cycle later).
    builder.add_relationship(RelationKind::Requires, "usb", "dwc3").unwrap();
    builder.add_relationship(RelationKind::Requires, "dwc3", "usb").unwrap();
}

#[test]
fn requires_cycle_fails_build() {
    let mut builder = GraphBuilder::new(registry(&["a", "b"]));
    builder.add_relationship(RelationKind::Requires, "a", "b").unwrap();
    builder.add_relationship(RelationKind::Requires, "b", "a").unwrap();

    match builder.build() {
        Err(GraphError::DependencyCycle { path }) => {
            assert_eq!(ids(path.iter()), ["a", "b", "a"]);
        },
        other => panic!("expected a dependency cycle, got {other:?}"),
    }
}

#[test]
fn mixed_requires_provides_cycle_fails_build() {
    let mut builder = usb_builder();
    builder
        .add_relationship(RelationKind::Requires, "usb_gadget", "gadget_controller")
        .unwrap()
        .add_relationship(RelationKind::Requires, "gadget_controller", "dwc3")
        .unwrap()
        .add_relationship(RelationKind::Provides, "dwc3", "gadget_controller")
        .unwrap();

    let err = builder.build().unwrap_err();
    assert!(matches!(err, GraphError::DependencyCycle { .. }));
    assert_eq!(err.to_string(), "Dependency cycle: dwc3 -> gadget_controller -> dwc3");
}

#[test]
fn conflict_along_requirement_chain_is_contradictory() {
    let mut builder = GraphBuilder::new(registry(&["a", "b", "c"]));
    builder
        .add_relationship(RelationKind::Requires, "a", "b")
        .unwrap()
        .add_relationship(RelationKind::Requires, "b", "c")
        .unwrap()
        .add_relationship(RelationKind::Conflicts, "c", "a")
        .unwrap();

    let err = builder.build().unwrap_err();
    assert!(matches!(
        err,
        GraphError::ContradictoryRelationship { ref first, ref second }
            if first.as_str() == "c" && second.as_str() == "a"
    ));
}

#[test]
fn conflict_with_provided_capability_is_contradictory() {
    let mut builder = usb_builder();
    builder
        .add_relationship(RelationKind::Provides, "dwc3", "gadget_controller")
        .unwrap()
        .add_relationship(RelationKind::Conflicts, "dwc3", "gadget_controller")
        .unwrap();

    assert!(matches!(builder.build(), Err(GraphError::ContradictoryRelationship { .. })));
}

#[test]
fn self_conflict_is_contradictory() {
    let mut builder = usb_builder();
    builder.add_relationship(RelationKind::Conflicts, "usb", "usb").unwrap();
    assert!(matches!(builder.build(), Err(GraphError::ContradictoryRelationship { .. })));
}

#[test]
fn sibling_conflict_is_allowed() {
    let mut builder = usb_builder();
    builder
        .add_relationship(RelationKind::Requires, "usb_gadget", "usb")
        .unwrap()
        .add_relationship(RelationKind::Requires, "usb_storage", "usb")
        .unwrap()
        .add_relationship(RelationKind::Conflicts, "usb_storage", "usb_gadget")
        .unwrap();

    let graph = builder.build().expect("siblings sharing a requirement may conflict");
    assert_eq!(ids(graph.conflicts_of("usb_gadget")), ["usb_storage"]);
    assert_eq!(ids(graph.conflicts_of("usb_storage")), ["usb_gadget"]);

    let pairs: Vec<_> =
        graph.conflict_pairs().map(|(a, b)| (a.as_str(), b.as_str())).collect();
    assert_eq!(pairs, [("usb_storage", "usb_gadget")]);
}

#[test]
fn graph_queries_reflect_declarations() {
    let mut builder = usb_builder();
    builder
        .add_relationship(RelationKind::Requires, "usb_gadget", "usb")
        .unwrap()
        .add_relationship(RelationKind::Requires, "usb_gadget", "gadget_controller")
        .unwrap()
        .add_relationship(RelationKind::Provides, "dwc3", "gadget_controller")
        .unwrap()
        .add_relationship(RelationKind::Conflicts, "usb_storage", "usb_gadget")
        .unwrap();
    let graph = builder.build().unwrap();

    assert_eq!(graph.flag_count(), 5);
    assert_eq!(graph.relation_count(), 4);
    assert_eq!(ids(graph.requirements_of("usb_gadget")), ["gadget_controller", "usb"]);
    assert_eq!(ids(graph.providers_of("gadget_controller")), ["dwc3"]);
    assert_eq!(graph.requirements_of("usb").count(), 0);

    let implications: Vec<_> =
        graph.edges("usb_gadget", RelationKinds::IMPLICATION).map(ToString::to_string).collect();
    assert_eq!(implications, ["REQUIRES(usb_gadget, gadget_controller)", "REQUIRES(usb_gadget, usb)"]);
    assert_eq!(graph.edges("usb_storage", RelationKinds::CONFLICTS).count(), 1);
    assert_eq!(graph.descriptor("dwc3").map(|d| d.kind), Some(FlagKind::Presence));
    assert!(graph.descriptor("usb3").is_none());
}

#[test]
fn catalog_spec_builds_a_graph() {
    let spec = CatalogSpec::new()
        .flag(FlagDescriptor::new("usb", FlagKind::Presence))
        .flag(FlagDescriptor::new("usb_gadget", FlagKind::Presence))
        .relation(Relationship::requires("usb_gadget", "usb"));

    let graph = RelationshipGraph::from_catalog(&spec).expect("catalog graph");
    assert!(graph.contains("usb_gadget"));
    assert_eq!(ids(graph.requirements_of("usb_gadget")), ["usb"]);
}

#[test]
fn catalog_with_duplicate_flag_reports_registry_error() {
    let spec = CatalogSpec::new()
        .flag(FlagDescriptor::new("usb", FlagKind::Presence))
        .flag(FlagDescriptor::new("usb", FlagKind::Integer));

    let err = RelationshipGraph::from_catalog(&spec).unwrap_err();
    assert!(matches!(
        err,
        GraphError::Registry { source: RegistryError::DuplicateFlag { .. }, context: Some(_) }
    ));
}

#[test]
fn graph_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RelationshipGraph>();
}
