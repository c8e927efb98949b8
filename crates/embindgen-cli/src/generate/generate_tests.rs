#![allow(non_snake_case)]

use super::*;
use tempfile::TempDir;

const DEFINITION: &str = r#"{
    "objects": [
        {
            "type": "enum",
            "name": "Color",
            "cppType": "Color",
            "values": [{ "value": "RED", "cppValue": "Color::RED" }]
        },
        { "type": "vector", "name": "VectorInt", "tsType": "number", "cppType": "int" }
    ]
}"#;

const MANIFEST: &str = r#"
[module]
definition = "palette.json"
interface_name = "Palette"
container_name = "PaletteModule"

[[exports]]
type = "ts"
filepath = "Palette.ts"
template = "Palette.ts.in"

[[exports]]
type = "cpp"
filepath = "Palette.cpp"

[[exports]]
type = "md"
filepath = "Palette.md"
"#;

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("palette.json"), DEFINITION).unwrap();
    std::fs::write(dir.path().join("Palette.ts.in"), "// palette\n${DATA}").unwrap();
    std::fs::write(dir.path().join(MANIFEST_FILE), MANIFEST).unwrap();
    dir
}

fn emit_options(dir: &TempDir, kind: &str) -> EmitOptions {
    EmitOptions {
        definition: dir.path().join("palette.json"),
        kind: kind.to_string(),
        output: dir.path().join("out.txt"),
        template: None,
        interface_name: None,
        container_name: "PaletteModule".to_string(),
    }
}

#[tokio::test]
async fn run___manifest___writes_every_export() {
    let dir = project();

    run(Some(dir.path().join(MANIFEST_FILE))).await.unwrap();

    let ts = std::fs::read_to_string(dir.path().join("Palette.ts")).unwrap();
    assert!(ts.starts_with("// palette\nexport const enum Color {"));
    assert!(ts.ends_with("export interface PaletteModule {\n    VectorInt : VectorInt;\n}"));
    let cpp = std::fs::read_to_string(dir.path().join("Palette.cpp")).unwrap();
    assert!(cpp.contains("EMSCRIPTEN_BINDINGS(Palette) {"));
    assert!(dir.path().join("Palette.md").exists());
}

#[tokio::test]
async fn run___missing_manifest___fails() {
    let dir = TempDir::new().unwrap();

    let err = run(Some(dir.path().join(MANIFEST_FILE))).await.unwrap_err();

    assert!(err.to_string().contains("Failed to read manifest"));
}

#[tokio::test]
async fn run___failed_export___reports_error_after_others_finish() {
    let dir = project();
    std::fs::create_dir(dir.path().join("Palette.cpp")).unwrap();

    let err = run(Some(dir.path().join(MANIFEST_FILE))).await.unwrap_err();

    assert_eq!(err.to_string(), "1 of 3 exports failed");
    assert!(dir.path().join("Palette.ts").is_file());
    assert!(dir.path().join("Palette.md").is_file());
}

#[tokio::test]
async fn emit___native___writes_bare_block_with_header() {
    let dir = project();

    emit(emit_options(&dir, "c++")).await.unwrap();

    let cpp = std::fs::read_to_string(dir.path().join("out.txt")).unwrap();
    assert!(cpp.starts_with("// This file was created automatically\n\n"));
    assert!(!cpp.contains("EMSCRIPTEN_BINDINGS"));
}

#[tokio::test]
async fn emit___with_template___substitutes_body() {
    let dir = project();
    let mut options = emit_options(&dir, "typescript");
    options.template = Some(dir.path().join("Palette.ts.in"));

    emit(options).await.unwrap();

    let ts = std::fs::read_to_string(dir.path().join("out.txt")).unwrap();
    assert!(ts.starts_with("// palette\n"));
}

#[tokio::test]
async fn emit___unknown_type___fails_before_writing() {
    let dir = project();

    let err = emit(emit_options(&dir, "java")).await.unwrap_err();

    assert!(err.to_string().contains("Invalid export type: java"));
    assert!(!dir.path().join("out.txt").exists());
}

#[tokio::test]
async fn emit___malformed_definition___fails() {
    let dir = project();
    std::fs::write(dir.path().join("palette.json"), "{ \"objects\": 3 }").unwrap();

    let err = emit(emit_options(&dir, "md")).await.unwrap_err();

    assert!(err.to_string().contains("Failed to load definition"));
    assert!(!dir.path().join("out.txt").exists());
}
