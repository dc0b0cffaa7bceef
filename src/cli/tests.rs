//! Unit tests for CLI commands

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::cli::{run, Cli, Commands};
use clap::Parser;

const CLAIM: &str = "kind: PersistentVolumeClaim\napiVersion: v1\nmetadata:\n  name: data\n  namespace: apps\n  uid: \"1234\"\nspec:\n  accessModes: [ReadWriteOnce]\n";

#[test]
fn test_generate_command_defaults() {
    let cli = Cli::try_parse_from(["kodify", "generate", "--file", "cluster.yaml"]).unwrap();

    match cli.command {
        Commands::Generate {
            file,
            config,
            output,
            name,
            strict,
        } => {
            assert_eq!(file.to_string_lossy(), "cluster.yaml");
            assert!(config.is_none());
            assert!(output.is_none());
            assert_eq!(name, "cluster");
            assert!(!strict);
        }
        _ => panic!("Expected Generate command"),
    }
}

#[test]
fn test_snippets_command_with_flags() {
    let cli = Cli::try_parse_from([
        "kodify",
        "snippets",
        "-f",
        "claim.yaml",
        "--config",
        "kodify.toml",
        "--uninstall",
        "--strict",
    ])
    .unwrap();

    match cli.command {
        Commands::Snippets {
            file,
            config,
            uninstall,
            strict,
        } => {
            assert_eq!(file.to_string_lossy(), "claim.yaml");
            assert_eq!(config.unwrap().to_string_lossy(), "kodify.toml");
            assert!(uninstall);
            assert!(strict);
        }
        _ => panic!("Expected Snippets command"),
    }
}

#[test]
fn test_file_is_required() {
    assert!(Cli::try_parse_from(["kodify", "generate"]).is_err());
}

#[test]
fn test_run_generate_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = dir.path().join("claim.yaml");
    let output = dir.path().join("prod.rs");
    std::fs::write(&manifest, CLAIM).unwrap();

    let cli = Cli::try_parse_from([
        "kodify",
        "generate",
        "--file",
        manifest.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
        "--name",
        "prod-east",
    ])
    .unwrap();
    let mut stdout = Vec::new();
    run(&cli, &mut stdout).unwrap();

    assert!(stdout.is_empty());
    let source = std::fs::read_to_string(&output).unwrap();
    assert!(source.contains("pub struct ProdEast {"));
    assert!(source.contains("let data_persistent_volume_claim = corev1::PersistentVolumeClaim {"));
    assert!(!source.contains("uid"));
}

#[test]
fn test_run_snippets_to_writer() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = dir.path().join("claim.yaml");
    std::fs::write(&manifest, CLAIM).unwrap();

    let cli = Cli::try_parse_from([
        "kodify",
        "snippets",
        "--file",
        manifest.to_str().unwrap(),
        "--uninstall",
    ])
    .unwrap();
    let mut stdout = Vec::new();
    run(&cli, &mut stdout).unwrap();

    let text = String::from_utf8(stdout).unwrap();
    assert!(text.starts_with(
        "use kodify::api::core::v1 as corev1;\nuse kodify::api::meta::v1 as metav1;\n\n// install PersistentVolumeClaim data\n"
    ));
    assert!(text.contains(
        "// uninstall PersistentVolumeClaim data\n        if let Some(client) = client {\n            client.delete(\"PersistentVolumeClaim\", \"apps\", \"data\")?;\n        }\n"
    ));
}

#[test]
fn test_run_with_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = dir.path().join("settings.yaml");
    std::fs::write(
        &manifest,
        "kind: ConfigMap\napiVersion: v1\nmetadata:\n  name: settings\n",
    )
    .unwrap();
    let config = dir.path().join("kodify.toml");
    std::fs::write(
        &config,
        "default_namespace = \"staging\"\n\n[aliases]\n\"kodify::api::core::v1\" = \"k8s\"\n",
    )
    .unwrap();

    let cli = Cli::try_parse_from([
        "kodify",
        "snippets",
        "--file",
        manifest.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ])
    .unwrap();
    let mut stdout = Vec::new();
    run(&cli, &mut stdout).unwrap();

    let text = String::from_utf8(stdout).unwrap();
    assert!(text.starts_with("use kodify::api::core::v1 as k8s;\n\n"));
    assert!(text.contains("let settings_config_map = k8s::ConfigMap {"));
    assert!(text.contains("kodify::api::meta::v1::ObjectMeta {"));
    assert!(text.contains("client.create(\"staging\", &settings_config_map_object)?;"));
}

#[test]
fn test_run_missing_manifest() {
    let cli = Cli::try_parse_from(["kodify", "snippets", "--file", "/nonexistent/x.yaml"]).unwrap();
    let mut stdout = Vec::new();
    let err = run(&cli, &mut stdout).unwrap_err();
    assert!(err.to_string().contains("Failed to read manifest"));
}
