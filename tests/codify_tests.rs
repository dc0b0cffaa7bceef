#![allow(clippy::unwrap_used, clippy::expect_used)]

use kodify::api::core::v1 as corev1;
use kodify::api::meta::v1 as metav1;
use kodify::manifest::{parse_documents, Manifest};
use kodify::{Generator, Registry};

const MESSY_CLAIM: &str = r#"
apiVersion: v1
kind: PersistentVolumeClaim
metadata:
  name: My_Claim!
  namespace: ns1
  uid: d9c1
  resourceVersion: "1200"
  creationTimestamp: "2024-05-01T10:00:00Z"
  managedFields:
    - manager: kubectl
      operation: Apply
      fieldsType: FieldsV1
      fieldsV1:
        f:spec: {}
spec:
  storageClassName: fast
  resources:
    limits:
      storage: 50Gi
    requests:
      storage: 10Gi
status:
  phase: Bound
  capacity:
    storage: 10Gi
"#;

fn single(input: &str) -> Manifest {
    let mut manifests = parse_documents(input).unwrap();
    assert_eq!(manifests.len(), 1);
    manifests.remove(0)
}

#[test]
fn test_captured_claim_round_trips_through_literal() {
    let Manifest::PersistentVolumeClaim(claim) = single(MESSY_CLAIM) else {
        panic!("expected a PersistentVolumeClaim");
    };

    let generator = Generator::default();
    let mut codified = generator.codify(claim);
    let mut registry = Registry::new();
    let snippet = generator.install(&mut codified, &mut registry, None).unwrap();

    let literal = [
        "        let my_claim_persistent_volume_claim = corev1::PersistentVolumeClaim {",
        "            metadata: metav1::ObjectMeta {",
        "                name: Some(\"my-claim\".to_string()),",
        "                namespace: Some(\"ns1\".to_string()),",
        "                ..Default::default()",
        "            },",
        "            spec: Some(corev1::PersistentVolumeClaimSpec {",
        "                storage_class_name: Some(\"fast\".to_string()),",
        "                ..Default::default()",
        "            }),",
        "            ..Default::default()",
        "        };",
    ]
    .join("\n");
    assert!(snippet.text.starts_with(&literal));
    assert!(snippet.diagnostics.is_empty());

    // The same text, compiled.
    let my_claim_persistent_volume_claim = corev1::PersistentVolumeClaim {
        metadata: metav1::ObjectMeta {
            name: Some("my-claim".to_string()),
            namespace: Some("ns1".to_string()),
            ..Default::default()
        },
        spec: Some(corev1::PersistentVolumeClaimSpec {
            storage_class_name: Some("fast".to_string()),
            ..Default::default()
        }),
        ..Default::default()
    };
    assert_eq!(&my_claim_persistent_volume_claim, codified.object());

    assert_eq!(registry.len(), 1);
    let captured = registry.iter().next().unwrap();
    assert_eq!(captured.name, "my-claim");
    assert_eq!(captured.namespace.as_deref(), Some("ns1"));
}

#[test]
fn test_binary_config_map_round_trips_through_literal() {
    let input = "apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: blob\nbinaryData:\n  key: aGk=\nimmutable: true\n";
    let Manifest::ConfigMap(config_map) = single(input) else {
        panic!("expected a ConfigMap");
    };

    let generator = Generator::default();
    let codified = generator.codify(config_map);
    let source = kodify::Literal::encode(
        codified.object(),
        generator.symbols(),
        kodify::ErrorPolicy::Fail,
    )
    .unwrap()
    .source();

    assert_eq!(
        source,
        "kodify::api::core::v1::ConfigMap {
    metadata: kodify::api::meta::v1::ObjectMeta {
        name: Some(\"blob\".to_string()),
        ..Default::default()
    },
    binary_data: Some(std::collections::BTreeMap::from([
        (\"key\".to_string(), kodify::api::core::v1::ByteString(vec![
            104,
            105,
        ])),
    ])),
    immutable: Some(true),
    ..Default::default()
}"
    );

    let rebuilt = kodify::api::core::v1::ConfigMap {
        metadata: kodify::api::meta::v1::ObjectMeta {
            name: Some("blob".to_string()),
            ..Default::default()
        },
        binary_data: Some(std::collections::BTreeMap::from([
            ("key".to_string(), kodify::api::core::v1::ByteString(vec![
                104,
                105,
            ])),
        ])),
        immutable: Some(true),
        ..Default::default()
    };
    assert_eq!(&rebuilt, codified.object());
}

#[test]
fn test_annotations_survive_except_stripped_ones() {
    let input = r#"
apiVersion: v1
kind: ConfigMap
metadata:
  name: settings
  annotations:
    kubectl.kubernetes.io/last-applied-configuration: "{}"
    team: storage
"#;
    let Manifest::ConfigMap(config_map) = single(input) else {
        panic!("expected a ConfigMap");
    };

    let generator = Generator::default();
    let mut codified = generator.codify(config_map);
    let snippet = generator
        .install(&mut codified, &mut Registry::new(), None)
        .unwrap();

    assert!(snippet
        .text
        .contains("(\"team\".to_string(), \"storage\".to_string()),"));
    assert!(!snippet.text.contains("last-applied-configuration"));
}
