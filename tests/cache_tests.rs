// ABOUTME: Integration tests for artifact caching, eviction, and concurrent installs
// ABOUTME: Verifies locals-shape keying, recompilation transparency, and reference validity

use serde_json::json;
use std::sync::Arc;
use std::thread;

use weft::{evict_compiled, Locals, Template};

mod common;
use common::{locals, TestScopeType};

#[test]
fn test_distinct_locals_shapes_compile_independently() {
    let scope_type = TestScopeType::new();
    let template = Template::from_source("Hey #{name}!");

    template
        .render(&scope_type.instance(), &locals(&[("name", json!("Joe"))]))
        .unwrap();
    template
        .render(
            &scope_type.instance(),
            &locals(&[("name", json!("Joe")), ("title", json!("Dr"))]),
        )
        .unwrap();

    assert_eq!(scope_type.site().len(), 2);
    assert_eq!(scope_type.site().compile_count(), 2);
}

#[test]
fn test_same_shape_reuses_artifact_regardless_of_values() {
    let scope_type = TestScopeType::new();
    let template = Template::from_source("Hey #{name}!");

    for name in ["Joe", "Moe", "Zoe"] {
        template
            .render(&scope_type.instance(), &locals(&[("name", json!(name))]))
            .unwrap();
    }

    assert_eq!(scope_type.site().len(), 1);
    assert_eq!(scope_type.site().compile_count(), 1);
}

#[test]
fn test_artifact_name_matches_installed_entry() {
    let scope_type = TestScopeType::new();
    let template = Template::from_source("Hey #{name}!");

    template
        .render(&scope_type.instance(), &locals(&[("name", json!("Joe"))]))
        .unwrap();

    let installed = template.artifact_name_for(["name"]);
    assert!(scope_type.site().contains(&installed));
}

#[test]
fn test_evict_then_render_recompiles_transparently() {
    let scope_type = TestScopeType::new();
    let template = Template::from_source("Hey #{name}!");
    let shape = locals(&[("name", json!("Joe"))]);

    let before = template.render(&scope_type.instance(), &shape).unwrap();
    let name = template.artifact_name_for(["name"]);

    assert!(evict_compiled(scope_type.site(), &name));
    assert!(!scope_type.site().contains(&name));

    let after = template.render(&scope_type.instance(), &shape).unwrap();
    assert_eq!(before, after);
    assert_eq!(scope_type.site().compile_count(), 2);
    assert!(scope_type.site().contains(&name));
}

#[test]
fn test_evict_absent_name_is_swallowed() {
    let scope_type = TestScopeType::new();
    assert!(!evict_compiled(scope_type.site(), "__weft_9999_cafebabe"));
}

#[test]
fn test_evicted_reference_remains_usable() {
    let scope_type = TestScopeType::new();
    let template = Template::from_source("Hey #{name}!");

    template
        .render(&scope_type.instance(), &locals(&[("name", json!("Joe"))]))
        .unwrap();

    let name = template.artifact_name_for(["name"]);
    let held = scope_type.site().get(&name).unwrap();
    scope_type.site().evict(&name);

    // Eviction removes discoverability, not the artifact itself
    assert!(scope_type.site().get(&name).is_none());
    assert_eq!(held.name(), name);
    assert!(held.generated_source().contains("__eval(name)"));
}

#[test]
fn test_independent_scope_types_compile_independently() {
    let first = TestScopeType::new();
    let second = TestScopeType::new();
    let template = Template::from_source("Hey #{name}!");
    let shape = locals(&[("name", json!("Joe"))]);

    template.render(&first.instance(), &shape).unwrap();
    template.render(&second.instance(), &shape).unwrap();

    assert_eq!(first.site().compile_count(), 1);
    assert_eq!(second.site().compile_count(), 1);
}

#[test]
fn test_concurrent_renders_converge_on_one_artifact() {
    common::init_tracing();
    let scope_type = TestScopeType::new();
    let template = Arc::new(Template::from_source("Hey #{name}!"));

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let scope_type = scope_type.clone();
            let template = Arc::clone(&template);
            thread::spawn(move || {
                let shape = locals(&[("name", json!(format!("Worker{worker}")))]);
                template.render(&scope_type.instance(), &shape).unwrap()
            })
        })
        .collect();

    for (worker, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), format!("Hey Worker{worker}!"));
    }

    // Racing misses may compile redundantly, but exactly one artifact installs
    assert_eq!(scope_type.site().len(), 1);
    let name = template.artifact_name_for(["name"]);
    assert!(scope_type.site().contains(&name));
}

#[test]
fn test_failed_compile_is_never_cached() {
    let scope_type = TestScopeType::new();
    let template = Template::from_source("broken #{name");

    assert!(template
        .render(&scope_type.instance(), &Locals::new())
        .is_err());
    assert!(scope_type.site().is_empty());

    // A second attempt fails the same way instead of hitting a cache
    assert!(template
        .render(&scope_type.instance(), &Locals::new())
        .is_err());
    assert!(scope_type.site().is_empty());
}
