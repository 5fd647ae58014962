// crates/protoc-gen-mcp-render/tests/render_output.rs
// ============================================================================
// Module: Renderer Integration Tests
// Description: JSON and Rust output for assembled tool catalogs.
// Purpose: Validate output naming, document shape, and collision handling.
// Dependencies: protoc-gen-mcp-render, protoc-gen-mcp-core, jsonschema
// ============================================================================

//! ## Overview
//! Builds catalogs with the core assembler and checks the rendered files.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_docs_in_private_items,
    reason = "Test-only assertions use panic-based helpers for clarity."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use jsonschema::Draft;
use protoc_gen_mcp_config::GeneratorConfig;
use protoc_gen_mcp_config::OutputFormat;
use protoc_gen_mcp_core::DescriptorPool;
use protoc_gen_mcp_core::FieldDescriptor;
use protoc_gen_mcp_core::FieldKind;
use protoc_gen_mcp_core::FileArtifact;
use protoc_gen_mcp_core::FileDescriptor;
use protoc_gen_mcp_core::MessageDescriptor;
use protoc_gen_mcp_core::MethodDescriptor;
use protoc_gen_mcp_core::ServiceDescriptor;
use protoc_gen_mcp_core::ToolAssembler;
use protoc_gen_mcp_render::RenderError;
use protoc_gen_mcp_render::render_file;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

fn method(service: &str, name: &str, comment: &str) -> MethodDescriptor {
    MethodDescriptor {
        name: name.to_string(),
        full_name: format!("helloworld.{service}.{name}"),
        input_type: "helloworld.HelloRequest".to_string(),
        output_type: "helloworld.HelloReply".to_string(),
        client_streaming: false,
        server_streaming: false,
        leading_comments: comment.to_string(),
    }
}

fn artifact(services: Vec<(&str, Vec<MethodDescriptor>)>) -> FileArtifact {
    let pool = DescriptorPool::new().with_message(MessageDescriptor::new(
        "helloworld.HelloRequest",
        vec![
            FieldDescriptor::new("name", FieldKind::String)
                .with_full_name("helloworld.HelloRequest.name"),
        ],
    ));
    let file = FileDescriptor {
        path: "helloworld/greeter.proto".to_string(),
        package: "helloworld".to_string(),
        module_name: "helloworld".to_string(),
        generate: true,
        services: services
            .into_iter()
            .map(|(name, methods)| ServiceDescriptor {
                name: name.to_string(),
                full_name: format!("helloworld.{name}"),
                methods,
            })
            .collect(),
    };
    let required = |field: &FieldDescriptor| field.full_name == "helloworld.HelloRequest.name";
    ToolAssembler::new(&pool, &required).generate_file(&file).unwrap().expect("artifact")
}

fn greeter() -> FileArtifact {
    artifact(vec![("Greeter", vec![method("Greeter", "SayHello", " Sends a \"greeting\".")])])
}

// ============================================================================
// SECTION: JSON
// ============================================================================

#[test]
fn json_catalog_is_named_after_the_source_file() {
    let rendered = render_file(&greeter(), &GeneratorConfig::default()).unwrap();
    assert_eq!(rendered.name, "helloworld/greeter.pb.mcp.json");
    assert!(rendered.content.ends_with("}\n"));
}

#[test]
fn json_catalog_lists_both_indexes_with_digests() {
    let rendered = render_file(&greeter(), &GeneratorConfig::default()).unwrap();
    let document: Value = serde_json::from_str(&rendered.content).unwrap();

    assert_eq!(document["package"], "helloworld");
    assert_eq!(document["source_path"], "helloworld/greeter.proto");
    assert_eq!(document["module_name"], "helloworld");
    assert!(document["generator"].as_str().unwrap().starts_with("protoc-gen-mcp "));

    let tool = &document["tools"]["Greeter_SayHello"];
    assert_eq!(tool, &document["services"]["Greeter"]["SayHello"]);
    assert_eq!(tool["name"], "Greeter_SayHello");
    assert_eq!(tool["description"], "Sends a \"greeting\".");
    assert_eq!(tool["request_type"], "helloworld.HelloRequest");
    assert_eq!(tool["response_type"], "helloworld.HelloReply");
    assert_eq!(tool["input_schema_digest"]["algorithm"], "sha256");
    assert_eq!(tool["input_schema_digest"]["value"].as_str().unwrap().len(), 64);
    assert_eq!(
        tool["input_schema"],
        json!({"type": "object", "properties": {"name": {"type": "string"}}, "required": ["name"]})
    );
}

#[test]
fn json_catalog_schemas_compile_as_draft_2020_12() {
    let rendered = render_file(&greeter(), &GeneratorConfig::default()).unwrap();
    let document: Value = serde_json::from_str(&rendered.content).unwrap();
    let schema = &document["tools"]["Greeter_SayHello"]["input_schema"];
    let validator = jsonschema::options().with_draft(Draft::Draft202012).build(schema).unwrap();
    assert!(validator.is_valid(&json!({"name": "world"})));
    assert!(!validator.is_valid(&json!({})));
}

#[test]
fn json_digest_tracks_canonical_schema() {
    let plain = greeter();
    let reworded = artifact(vec![("Greeter", vec![method("Greeter", "SayHello", " Other words.")])]);
    let digest = |artifact: &FileArtifact| {
        let rendered = render_file(artifact, &GeneratorConfig::default()).unwrap();
        let document: Value = serde_json::from_str(&rendered.content).unwrap();
        document["tools"]["Greeter_SayHello"]["input_schema_digest"]["value"].clone()
    };
    assert_eq!(digest(&plain), digest(&reworded));
}

#[test]
fn custom_suffix_is_applied() {
    let config = GeneratorConfig {
        suffix: Some(".tools.json".to_string()),
        ..GeneratorConfig::default()
    };
    let rendered = render_file(&greeter(), &config).unwrap();
    assert_eq!(rendered.name, "helloworld/greeter.tools.json");
}

// ============================================================================
// SECTION: Rust
// ============================================================================

fn rust_config() -> GeneratorConfig {
    GeneratorConfig {
        format: OutputFormat::Rust,
        ..GeneratorConfig::default()
    }
}

#[test]
fn rust_module_declares_constants_modules_and_index() {
    let rendered = render_file(
        &artifact(vec![
            ("Greeter", vec![method("Greeter", "SayHello", " Sends a \"greeting\".")]),
            ("Admin", Vec::new()),
        ]),
        &rust_config(),
    )
    .unwrap();
    assert_eq!(rendered.name, "helloworld/greeter.pb.mcp.rs");
    let content = rendered.content;

    assert!(content.starts_with("// @generated by protoc-gen-mcp "));
    assert!(content.contains("pub struct McpTool {"));
    assert!(content.contains("pub const GREETER_SAY_HELLO: McpTool = McpTool {\n"));
    assert!(content.contains("    name: \"Greeter_SayHello\",\n"));
    assert!(content.contains("    description: \"Sends a \\\"greeting\\\".\",\n"));
    assert!(content.contains(
        r#"    input_schema: "{\"properties\":{\"name\":{\"type\":\"string\"}},\"required\":[\"name\"],\"type\":\"object\"}","#
    ));
    assert!(content.contains(
        "pub mod greeter {\n    /// Tools keyed by method name.\n    pub const TOOLS: &[(&str, &super::McpTool)] = &[\n        (\"SayHello\", &super::GREETER_SAY_HELLO),\n    ];\n}\n"
    ));
    assert!(content.contains("pub mod admin {\n"));
    assert!(content.contains("pub const TOOLS: &[(&str, &super::McpTool)] = &[];\n"));
    assert!(content.ends_with("pub const TOOLS: &[&McpTool] = &[\n    &GREETER_SAY_HELLO,\n];\n"));
}

#[test]
fn rust_module_rejects_folded_collisions() {
    let artifact = artifact(vec![
        ("FooBar", vec![method("FooBar", "Get", "")]),
        ("Foo_Bar", vec![method("Foo_Bar", "Get", "")]),
    ]);
    let err = render_file(&artifact, &rust_config()).unwrap_err();
    assert!(matches!(err, RenderError::IdentifierCollision(_)), "{err}");
    assert!(err.to_string().contains("FOO_BAR_GET"), "{err}");
}
