//! End-to-end generation tests
//!
//! Each test writes a definition document to a temporary directory, runs
//! every export against it and inspects the files on disk.

#![allow(non_snake_case)]

use embindgen_core::prelude::*;
use embindgen_core::GenerationReport;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const GEOMETRY: &str = r#"{
    "objects": [
        {
            "type": "enum",
            "name": "Color",
            "cppType": "geo::Color",
            "values": [
                { "value": "RED", "cppValue": "geo::Color::RED" },
                { "value": "GREEN", "cppValue": "geo::Color::GREEN" }
            ]
        },
        {
            "type": "value_object",
            "name": "Point",
            "cppType": "geo::Point",
            "fields": [
                { "name": "y", "tsType": "number", "cppAttribute": "geo::Point::y" },
                { "name": "x", "tsType": "number", "cppAttribute": "geo::Point::x" }
            ]
        },
        { "type": "vector", "name": "VectorPoint", "tsType": "Point", "cppType": "geo::Point" },
        {
            "type": "class",
            "name": "Circle",
            "cppType": "geo::Circle",
            "methods": [
                {
                    "type": "smart_ptr_constructor",
                    "name": "Circle",
                    "cppInterface": "std::make_shared<geo::Circle>",
                    "cppType": "std::shared_ptr<geo::Circle>",
                    "parameters": [{ "name": "radius", "tsType": "number", "cppType": "double" }]
                },
                {
                    "type": "method_const",
                    "name": "area",
                    "tsType": "number",
                    "cppInterface": "geo::Circle::area",
                    "cppType": "double",
                    "parameters": [],
                    "description": "Enclosed area."
                }
            ]
        },
        {
            "type": "function",
            "name": "distance",
            "tsType": "number",
            "cppInterface": "geo::distance",
            "cppType": "double",
            "parameters": [
                { "name": "a", "tsType": "Point", "cppType": "const geo::Point&" },
                { "name": "b", "tsType": "Point", "cppType": "const geo::Point&" }
            ]
        },
        { "type": "comment", "text": "ignored" }
    ]
}"#;

struct Workspace {
    dir: TempDir,
    definition: PathBuf,
}

impl Workspace {
    fn new(definition: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("geometry.json");
        std::fs::write(&path, definition).unwrap();
        Self {
            dir,
            definition: path,
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.path(name)).unwrap()
    }

    async fn generate(&self, specs: Vec<ExportSpec>) -> GenerationReport {
        generate(&self.definition, names(), specs).await.unwrap()
    }
}

fn names() -> ModuleNames {
    ModuleNames::new(Some("Geometry"), "GeometryModule")
}

fn all_exports(workspace: &Workspace) -> Vec<ExportSpec> {
    vec![
        ExportSpec::new(ExportKind::TypeScript, workspace.path("Geometry.ts")),
        ExportSpec::new(ExportKind::Native, workspace.path("Geometry.cpp")),
        ExportSpec::new(ExportKind::Markdown, workspace.path("Geometry.md")),
    ]
}

#[tokio::test]
async fn generate___geometry___typescript_declares_every_entity() {
    let workspace = Workspace::new(GEOMETRY);

    let report = workspace.generate(all_exports(&workspace)).await;

    assert!(report.is_success());
    let ts = workspace.read("Geometry.ts");
    assert!(ts.starts_with("export const enum Color {\n    RED,\n    GREEN\n}\n\n"));
    assert!(ts.contains("export type VectorPoint = EmscriptenArray<Point>;\n\n"));
    assert!(ts.contains("export interface Point {\n    x: number;\n    y: number;\n}\n\n"));
    assert!(ts.contains("export interface Circle {\n    new(): Circle;\n    area() : number;\n}\n\n"));
    assert!(ts.ends_with(concat!(
        "export interface GeometryModule {\n",
        "    VectorPoint : VectorPoint;\n",
        "    Circle : Circle;\n",
        "    distance(a: Point, b: Point) : number;\n",
        "}",
    )));
}

#[tokio::test]
async fn generate___geometry___registration_binds_every_entity() {
    let workspace = Workspace::new(GEOMETRY);

    workspace.generate(all_exports(&workspace)).await;

    let cpp = workspace.read("Geometry.cpp");
    assert!(cpp.starts_with("// This file was created automatically\n\nEMSCRIPTEN_BINDINGS(Geometry) {\n"));
    assert!(cpp.contains(
        "    emscripten::function<double, const geo::Point&, const geo::Point&>(\"distance\", &geo::distance);\n"
    ));
    assert!(cpp.contains("        .value(\"GREEN\", geo::Color::GREEN)\n"));
    assert!(cpp.contains("        .field(\"x\", &geo::Point::x)\n"));
    assert!(cpp.contains("    emscripten::register_vector<geo::Point>(\"VectorPoint\");\n"));
    assert!(cpp.contains(
        "        .smart_ptr_constructor<std::shared_ptr<geo::Circle>, double>(\"Circle\", &std::make_shared<geo::Circle>)\n"
    ));
    assert!(cpp.contains("        .function<double(geo::Circle::*)() const>(\"area\", &geo::Circle::area)\n"));
    assert!(cpp.ends_with("\n}"));
}

#[tokio::test]
async fn generate___geometry___markdown_documents_descriptions() {
    let workspace = Workspace::new(GEOMETRY);

    workspace.generate(all_exports(&workspace)).await;

    let md = workspace.read("Geometry.md");
    assert!(md.starts_with("## Enums\n\n- `Color` : RED, GREEN\n\n"));
    assert!(md.contains("- `VectorPoint` : array of `geo::Point`\n"));
    assert!(md.contains("### `Point`\n\n- `x: number`\n- `y: number`\n\n"));
    assert!(md.contains("methods:\n\n- `area() : number`\n  Enclosed area.\n\n"));
}

#[tokio::test]
async fn generate___native_template___records_provenance() {
    let workspace = Workspace::new(GEOMETRY);
    let template = workspace.write("Geometry.cpp.in", "#include <emscripten/bind.h>\n\n${DATA}\n");

    let report = workspace
        .generate(vec![
            ExportSpec::new(ExportKind::Native, workspace.path("Geometry.cpp")).with_template(&template),
        ])
        .await;

    assert!(report.written[0].templated);
    let cpp = workspace.read("Geometry.cpp");
    let expected_header = format!(
        "// This file was created automatically\n// from {}\n\n#include <emscripten/bind.h>\n\nEMSCRIPTEN_BINDINGS(Geometry) {{\n",
        template.display()
    );
    assert!(cpp.starts_with(&expected_header));
    assert!(cpp.ends_with("\n}\n"));
}

#[tokio::test]
async fn generate___unreadable_template___falls_back_to_body() {
    let workspace = Workspace::new(GEOMETRY);

    let report = workspace
        .generate(vec![
            ExportSpec::new(ExportKind::TypeScript, workspace.path("Geometry.ts"))
                .with_template(workspace.path("missing.ts.in")),
        ])
        .await;

    assert!(report.is_success());
    assert!(!report.written[0].templated);
    assert!(workspace.read("Geometry.ts").starts_with("export const enum Color {"));
}

#[tokio::test]
async fn generate___twice___produces_identical_files() {
    let workspace = Workspace::new(GEOMETRY);

    workspace.generate(all_exports(&workspace)).await;
    let first: Vec<String> = ["Geometry.ts", "Geometry.cpp", "Geometry.md"]
        .iter()
        .map(|name| workspace.read(name))
        .collect();

    workspace.generate(all_exports(&workspace)).await;
    let second: Vec<String> = ["Geometry.ts", "Geometry.cpp", "Geometry.md"]
        .iter()
        .map(|name| workspace.read(name))
        .collect();

    assert_eq!(first, second);
}

#[tokio::test]
async fn generate___failed_export___does_not_block_others() {
    let workspace = Workspace::new(GEOMETRY);
    let blocked = workspace.path("Geometry.ts");
    std::fs::create_dir(&blocked).unwrap();

    let report = workspace.generate(all_exports(&workspace)).await;

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].filepath, blocked);
    assert_eq!(report.written.len(), 2);
    assert!(Path::new(&workspace.path("Geometry.cpp")).exists());
    assert!(Path::new(&workspace.path("Geometry.md")).exists());
}

#[tokio::test]
async fn generate___empty_objects___writes_minimal_files() {
    let workspace = Workspace::new(r#"{ "objects": [] }"#);

    let report = workspace.generate(all_exports(&workspace)).await;

    assert!(report.is_success());
    assert_eq!(workspace.read("Geometry.ts"), "");
    assert_eq!(workspace.read("Geometry.md"), "");
    assert_eq!(
        workspace.read("Geometry.cpp"),
        "// This file was created automatically\n\nEMSCRIPTEN_BINDINGS(Geometry) {\n\n\n\n\n\n\n\n\n}"
    );
}

#[tokio::test]
async fn generate___top_level_array___aborts_run() {
    let workspace = Workspace::new("[1, 2, 3]");

    let err = generate(&workspace.definition, names(), all_exports(&workspace))
        .await
        .unwrap_err();

    assert!(matches!(err, GeneratorError::MalformedDefinition(_)));
    assert!(!workspace.path("Geometry.ts").exists());
}
