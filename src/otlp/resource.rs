//! Static resource metadata attached to every batch.

use serde::{Deserialize, Serialize};

use super::record::Attribute;
use super::value::{AttributeValue, encode_value};
use crate::config::Config;

/// Identifies this forwarder in `telemetry.sdk.name` and the scope name.
pub const SDK_NAME: &str = "posthog-logs";

/// Version reported when the build-time package version is unavailable.
pub const FALLBACK_VERSION: &str = "0.1.0";

/// The resource block of the payload envelope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub attributes: Vec<Attribute>,
}

/// The forwarder's version, resolved once at compile time.
pub fn sdk_version() -> &'static str {
    option_env!("CARGO_PKG_VERSION").unwrap_or(FALLBACK_VERSION)
}

/// Build the resource descriptor for a handler configuration.
///
/// Fixed service and SDK attributes come first, followed by any user-supplied
/// resource attributes run through the standard value encoder. Called once at
/// handler construction; the result is reused for every flush.
pub fn build_resource(config: &Config) -> Resource {
    let mut attributes = vec![
        Attribute::new(
            "service.name",
            AttributeValue::String(config.service_name.clone()),
        ),
        Attribute::new(
            "deployment.environment",
            AttributeValue::String(config.environment.clone()),
        ),
        Attribute::new("telemetry.sdk.name", AttributeValue::String(SDK_NAME.to_owned())),
        Attribute::new("telemetry.sdk.language", AttributeValue::String("rust".to_owned())),
        Attribute::new(
            "telemetry.sdk.version",
            AttributeValue::String(sdk_version().to_owned()),
        ),
    ];

    for (key, value) in &config.resource_attributes {
        attributes.push(Attribute::new(key.clone(), encode_value(value)));
    }

    Resource { attributes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attribute_keys(resource: &Resource) -> Vec<&str> {
        resource.attributes.iter().map(|a| a.key.as_str()).collect()
    }

    #[test]
    fn includes_fixed_attributes() {
        let resource = build_resource(&Config::default());
        let keys = attribute_keys(&resource);
        assert!(keys.contains(&"service.name"));
        assert!(keys.contains(&"deployment.environment"));
        assert!(keys.contains(&"telemetry.sdk.name"));
        assert!(keys.contains(&"telemetry.sdk.language"));
        assert!(keys.contains(&"telemetry.sdk.version"));
    }

    #[test]
    fn appends_custom_attributes_through_encoder() {
        let mut config = Config::default();
        config
            .resource_attributes
            .insert("custom.attr".to_owned(), json!("value"));
        config.resource_attributes.insert("region.id".to_owned(), json!(7));

        let resource = build_resource(&config);
        let custom = resource
            .attributes
            .iter()
            .find(|a| a.key == "custom.attr")
            .expect("custom attribute present");
        assert_eq!(custom.value, AttributeValue::String("value".to_owned()));

        let region = resource
            .attributes
            .iter()
            .find(|a| a.key == "region.id")
            .expect("region attribute present");
        assert_eq!(region.value, AttributeValue::Int("7".to_owned()));
    }

    #[test]
    fn version_is_never_empty() {
        assert!(!sdk_version().is_empty());
    }
}
