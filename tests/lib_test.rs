//! Library integration tests.

use specguard::SpecGuardError;

#[test]
fn error_types_are_public() {
    let err = SpecGuardError::FixerNotFound {
        rule_id: "naming/x".into(),
    };
    assert!(err.to_string().contains("naming/x"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> specguard::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use specguard::cli::{Cli, Commands};

    let cli = Cli::parse_from(["specguard", "rules", "--json"]);
    if let Commands::Rules(args) = cli.command {
        assert!(args.json);
    } else {
        panic!("Expected Rules command");
    }
}

#[test]
fn document_paths_roundtrip_through_pointer_form() {
    use specguard::document::DocumentPath;

    for path in [
        DocumentPath::operation("/widgets/{id}", "get"),
        DocumentPath::schema("a~b"),
        DocumentPath::schema_property("Widget", "name"),
        DocumentPath::root(),
    ] {
        assert_eq!(DocumentPath::parse(&path.to_json_pointer()), Some(path));
    }
}

#[test]
fn diff_is_public() {
    assert_eq!(specguard::diff::diff("a\n", "a\n"), "");
    assert!(specguard::diff::diff("a\n", "b\n").starts_with("@@ -1,1 +1,1 @@"));
}
