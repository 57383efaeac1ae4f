use classmeta_lib::visitor::ModuleVisitor;
use classmeta_lib::{DeserializationConfig, ModuleFileWriter};

use super::error_chain;
use super::module::render_module;

fn module_bytes(version: &[i32]) -> Vec<u8> {
    let mut w = ModuleFileWriter::new();
    w.visit_package_parts(
        "pkg",
        &["pkg/FooKt".to_string(), "other/RenamedKt".to_string()],
        &Default::default(),
    );
    w.visit_end();
    w.write(version).bytes().to_vec()
}

#[test]
fn renders_module() {
    let bytes = module_bytes(&[1, 1, 16]);

    let output = render_module(&bytes, "main.kotlin_module", &DeserializationConfig::default())
        .unwrap();

    insta::assert_snapshot!(output, @r"
    module {
      package pkg {
        pkg/FooKt
        other/RenamedKt
      }
    }
    ");
}

#[test]
fn jvm_package_names_can_be_ignored() {
    let bytes = module_bytes(&[1, 1, 16]);
    let config = DeserializationConfig::new().jvm_package_name_supported(false);

    let output = render_module(&bytes, "main.kotlin_module", &config).unwrap();

    assert!(!output.contains("other/RenamedKt"));
}

#[test]
fn unsupported_version_is_printed() {
    let bytes = module_bytes(&[1, 4, 0]);

    let output = render_module(&bytes, "new.kotlin_module", &DeserializationConfig::default())
        .unwrap();
    assert_eq!(output, "unsupported file\n");

    let config = DeserializationConfig::new().skip_metadata_version_check(true);
    let output = render_module(&bytes, "new.kotlin_module", &config).unwrap();
    assert!(output.contains("pkg/FooKt"));
}

#[test]
fn corrupted_module_reports_source() {
    let err = render_module(&[0, 0, 0, 2], "bad.kotlin_module", &DeserializationConfig::default())
        .unwrap_err();

    assert_eq!(
        error_chain(&err),
        "corrupted module file bad.kotlin_module: truncated input: needed 12 bytes, got 4"
    );
}
