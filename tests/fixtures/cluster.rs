// Generated by kodify from cluster.yaml. Do not edit.
use kodify::api::core::v1 as corev1;
use kodify::api::meta::v1 as metav1;

/// Objects captured from cluster.yaml.
#[derive(Debug, Default)]
pub struct Demo {
    pub objects: kodify::Registry,
}

impl Demo {
    /// Build every object into `objects`, creating each through `client` when one is given.
    #[allow(unused_variables)]
    pub fn install(
        &mut self,
        client: Option<&dyn kodify::ResourceClient>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let registry = &mut self.objects;
        let data_persistent_volume_claim = corev1::PersistentVolumeClaim {
            metadata: metav1::ObjectMeta {
                name: Some("data".to_string()),
                namespace: Some("apps".to_string()),
                ..Default::default()
            },
            spec: Some(corev1::PersistentVolumeClaimSpec {
                access_modes: Some(vec![
                    "ReadWriteOnce".to_string(),
                ]),
                storage_class_name: Some("fast".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let data_persistent_volume_claim_object = kodify::DynamicObject::from_resource(&data_persistent_volume_claim)?;
        registry.push(data_persistent_volume_claim_object.clone());

        if let Some(client) = client {
            client.create("apps", &data_persistent_volume_claim_object)?;
        }

        let settings_config_map = corev1::ConfigMap {
            metadata: metav1::ObjectMeta {
                labels: Some(std::collections::BTreeMap::from([
                    ("app".to_string(), "web".to_string()),
                ])),
                name: Some("settings".to_string()),
                namespace: Some("apps".to_string()),
                ..Default::default()
            },
            data: Some(std::collections::BTreeMap::from([
                ("mode".to_string(), "fast".to_string()),
            ])),
            ..Default::default()
        };
        let settings_config_map_object = kodify::DynamicObject::from_resource(&settings_config_map)?;
        registry.push(settings_config_map_object.clone());

        if let Some(client) = client {
            client.create("apps", &settings_config_map_object)?;
        }

        let defaults_config_map = corev1::ConfigMap {
            metadata: metav1::ObjectMeta {
                name: Some("defaults".to_string()),
                ..Default::default()
            },
            immutable: Some(true),
            ..Default::default()
        };
        let defaults_config_map_object = kodify::DynamicObject::from_resource(&defaults_config_map)?;
        registry.push(defaults_config_map_object.clone());

        if let Some(client) = client {
            client.create("default", &defaults_config_map_object)?;
        }

        Ok(())
    }

    /// Delete every object through `client`, in reverse install order.
    #[allow(unused_variables)]
    pub fn uninstall(
        &self,
        client: Option<&dyn kodify::ResourceClient>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(client) = client {
            client.delete("ConfigMap", "default", "defaults")?;
        }

        if let Some(client) = client {
            client.delete("ConfigMap", "apps", "settings")?;
        }

        if let Some(client) = client {
            client.delete("PersistentVolumeClaim", "apps", "data")?;
        }

        Ok(())
    }
}
