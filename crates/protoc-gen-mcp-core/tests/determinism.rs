// crates/protoc-gen-mcp-core/tests/determinism.rs
// ============================================================================
// Module: Generation Determinism Tests
// Description: Byte-stable output for repeated runs on identical descriptors.
// Purpose: Ensure catalogs and payloads do not depend on declaration order.
// ============================================================================

//! ## Overview
//! Repeated generation over the same descriptors must produce identical
//! canonical payloads, and catalog iteration must not depend on the order in
//! which services were declared.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_docs_in_private_items,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use protoc_gen_mcp_core::DescriptorPool;
use protoc_gen_mcp_core::FieldDescriptor;
use protoc_gen_mcp_core::FieldKind;
use protoc_gen_mcp_core::FileArtifact;
use protoc_gen_mcp_core::FileDescriptor;
use protoc_gen_mcp_core::MessageDescriptor;
use protoc_gen_mcp_core::MethodDescriptor;
use protoc_gen_mcp_core::NoRequiredFields;
use protoc_gen_mcp_core::OneofRef;
use protoc_gen_mcp_core::ServiceDescriptor;
use protoc_gen_mcp_core::ToolAssembler;

fn pool() -> DescriptorPool {
    DescriptorPool::new().with_message(MessageDescriptor::new(
        "shop.Query",
        vec![
            FieldDescriptor::new("zeta", FieldKind::String),
            FieldDescriptor::new("sku", FieldKind::String).in_oneof(OneofRef::declared("target")),
            FieldDescriptor::new("alpha", FieldKind::Int64),
            FieldDescriptor::new("region", FieldKind::String).in_oneof(OneofRef::declared("scope")),
            FieldDescriptor::new("name", FieldKind::String).in_oneof(OneofRef::declared("target")),
            FieldDescriptor::map(
                "filters",
                FieldKind::Int32,
                FieldDescriptor::new("value", FieldKind::Bytes),
            ),
        ],
    ))
}

fn method(service: &str, name: &str) -> MethodDescriptor {
    MethodDescriptor {
        name: name.to_string(),
        full_name: format!("shop.{service}.{name}"),
        input_type: "shop.Query".to_string(),
        output_type: "shop.Query".to_string(),
        client_streaming: false,
        server_streaming: false,
        leading_comments: String::new(),
    }
}

fn file(service_order: &[&str]) -> FileDescriptor {
    let services = service_order
        .iter()
        .map(|name| ServiceDescriptor {
            name: (*name).to_string(),
            full_name: format!("shop.{name}"),
            methods: vec![method(name, "Search"), method(name, "Count")],
        })
        .collect();
    FileDescriptor {
        path: "shop.proto".to_string(),
        package: "shop".to_string(),
        module_name: "shop".to_string(),
        generate: true,
        services,
    }
}

fn generate(file: &FileDescriptor) -> FileArtifact {
    let pool = pool();
    ToolAssembler::new(&pool, &NoRequiredFields).generate_file(file).unwrap().expect("artifact")
}

#[test]
fn repeated_runs_produce_identical_payloads() {
    let first = generate(&file(&["Catalog", "Inventory"]));
    let second = generate(&file(&["Catalog", "Inventory"]));
    let payloads = |artifact: &FileArtifact| {
        artifact
            .catalog
            .tools()
            .values()
            .map(|tool| tool.raw_input_schema.clone())
            .collect::<Vec<_>>()
    };
    assert_eq!(payloads(&first), payloads(&second));
    assert_eq!(first.catalog, second.catalog);
}

#[test]
fn catalog_order_ignores_declaration_order() {
    let forward = generate(&file(&["Catalog", "Inventory"]));
    let reverse = generate(&file(&["Inventory", "Catalog"]));
    let keys =
        |artifact: &FileArtifact| artifact.catalog.tools().keys().cloned().collect::<Vec<_>>();
    assert_eq!(keys(&forward), keys(&reverse));
    assert_eq!(
        keys(&forward),
        vec!["Catalog_Count", "Catalog_Search", "Inventory_Count", "Inventory_Search"]
    );
}

#[test]
fn oneof_groups_follow_first_declaration() {
    let artifact = generate(&file(&["Catalog"]));
    let tool = artifact.catalog.tool("Catalog_Search").expect("tool");
    let groups = tool.input_schema["anyOf"].as_array().expect("anyOf");
    let first_required = |index: usize| groups[index]["oneOf"][0]["required"][0].clone();
    assert_eq!(first_required(0), "sku");
    assert_eq!(first_required(1), "region");
    assert_eq!(groups[0]["oneOf"][1]["required"][0], "name");
    assert!(
        tool.raw_input_schema.starts_with(r#"{"anyOf":"#),
        "canonical payload must sort keys: {}",
        tool.raw_input_schema
    );
}
