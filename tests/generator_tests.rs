use std::fs;

use tempfile::tempdir;

use rest_scaffold::{
    generator::{
        generate, names::pluralize, registration_hint, GeneratorError, ModuleWriter, Target,
        WriteOutcome,
    },
    loader::{descriptor::discover, route_config::resolve},
};

#[test]
fn pluralization_follows_suffix_rules() {
    for (word, plural) in [
        ("category", "categories"),
        ("equipment", "equipments"),
        ("box", "boxes"),
        ("knife", "knives"),
        ("wolf", "wolves"),
        ("brush", "brushes"),
        ("key", "keys"),
    ] {
        assert_eq!(pluralize(word), plural, "{word}");
    }
}

#[test]
fn module_target_writes_six_files_the_loader_understands() {
    let tmp = tempdir().unwrap();
    let writer = ModuleWriter::new(tmp.path(), true).unwrap();

    let (name, outcomes) = generate(&writer, Target::Module, "Bench").unwrap();
    assert_eq!(name, "bench");
    assert_eq!(outcomes.len(), 6);
    assert!(outcomes.iter().all(|o| matches!(o, WriteOutcome::Created(_))));

    let dir = tmp.path().join("src/modules/bench");
    for file in [
        "bench.model.rs",
        "bench.service.rs",
        "bench.controller.rs",
        "bench.routes.rs",
        "bench.validation.rs",
        "route.config.toml",
    ] {
        assert!(dir.join(file).is_file(), "{file} missing");
    }

    let model = fs::read_to_string(dir.join("bench.model.rs")).unwrap();
    assert!(model.contains("pub struct Bench {"));
    assert!(model.contains("const COLLECTION: &'static str = \"benches\";"));
    let routes = fs::read_to_string(dir.join("bench.routes.rs")).unwrap();
    assert!(routes.contains("pub struct BenchModule;"));
    assert!(routes.contains("#[path = \"bench.controller.rs\"]"));
    assert!(registration_hint(&name).contains("pub mod bench;"));
    assert!(registration_hint(&name).contains(".with(bench::BenchModule)"));

    let modules = discover(&tmp.path().join("src/modules")).unwrap();
    assert_eq!(modules.len(), 1);
    assert!(modules[0].has_routes_entry());
    let config = resolve(&modules[0], None).unwrap();
    assert_eq!(config.path, "/api/benches");
    assert_eq!(config.description, "Bench management endpoints");
    assert!(config.enabled);
}

#[test]
fn single_artifact_targets_write_one_file() {
    let tmp = tempdir().unwrap();
    let writer = ModuleWriter::new(tmp.path(), true).unwrap();

    let (_, outcomes) = generate(&writer, Target::Service, "vessel").unwrap();
    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].path().ends_with("src/modules/vessel/vessel.service.rs"));

    let entries = fs::read_dir(tmp.path().join("src/modules/vessel")).unwrap().count();
    assert_eq!(entries, 1);
}

#[test]
fn no_overwrite_keeps_edited_files() {
    let tmp = tempdir().unwrap();
    let writer = ModuleWriter::new(tmp.path(), true).unwrap();
    generate(&writer, Target::Module, "vessel").unwrap();

    let config = tmp.path().join("src/modules/vessel/route.config.toml");
    fs::write(&config, "path = \"/api/fleet\"\n").unwrap();

    let careful = ModuleWriter::new(tmp.path(), false).unwrap();
    let (_, outcomes) = generate(&careful, Target::Module, "vessel").unwrap();
    assert!(outcomes.iter().all(|o| matches!(o, WriteOutcome::Skipped(_))));
    assert_eq!(fs::read_to_string(&config).unwrap(), "path = \"/api/fleet\"\n");

    let (_, outcomes) = generate(&writer, Target::Module, "vessel").unwrap();
    assert!(outcomes.iter().all(|o| matches!(o, WriteOutcome::Overwritten(_))));
    assert!(fs::read_to_string(&config).unwrap().contains("/api/vessels"));
}

#[test]
fn invalid_names_write_nothing() {
    let tmp = tempdir().unwrap();
    let writer = ModuleWriter::new(tmp.path(), true).unwrap();

    for name in ["order-item", "Box", "type", "self", "match"] {
        let err = generate(&writer, Target::Module, name).unwrap_err();
        assert!(matches!(err, GeneratorError::InvalidName(_)), "{name}");
    }
    assert!(!tmp.path().join("src").exists());
}
