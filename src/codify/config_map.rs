use super::Codify;
use crate::api::core::v1::ConfigMap;
use crate::normalize::{clean_object_meta, NormalizeOptions};

impl Codify for ConfigMap {
    const VARIABLE_SUFFIX: &'static str = "config_map";

    fn normalize(&mut self, options: &NormalizeOptions) {
        self.metadata = clean_object_meta(&self.metadata, options);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::core::v1::ByteString;
    use crate::api::meta::v1::ObjectMeta;
    use std::collections::BTreeMap;

    #[test]
    fn test_normalize_keeps_payload() {
        let mut cm = ConfigMap {
            metadata: ObjectMeta {
                name: Some("settings".to_string()),
                resource_version: Some("9".to_string()),
                ..Default::default()
            },
            data: Some(BTreeMap::from([("mode".to_string(), "fast".to_string())])),
            binary_data: Some(BTreeMap::from([(
                "blob".to_string(),
                ByteString(vec![0, 1]),
            )])),
            immutable: Some(true),
        };
        let before = cm.clone();
        cm.normalize(&NormalizeOptions::default());
        assert_eq!(cm.metadata.resource_version, None);
        assert_eq!(cm.metadata.name, before.metadata.name);
        assert_eq!(cm.data, before.data);
        assert_eq!(cm.binary_data, before.binary_data);
        assert_eq!(cm.immutable, Some(true));
    }
}
