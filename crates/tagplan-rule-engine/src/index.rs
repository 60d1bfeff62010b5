//! Per-resource lookup keys
//!
//! A [`ResourceIndex`] wraps one resource with the lower-cased keys used for
//! exact rule lookups. It is derived on the fly and never persisted.

use tagplan_core::Resource;

/// Lower-cased keys a resource answers to, in derivation order.
///
/// Order is identifier, name, type key, service. Duplicates are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchKeySet {
    keys: Vec<String>,
}

impl MatchKeySet {
    fn push(&mut self, key: String) {
        if !self.keys.contains(&key) {
            self.keys.push(key);
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Derive the exact-match keys for a resource.
///
/// The type key is the resource type as-is when it already contains `:`
/// (`ec2:instance`), otherwise `service:type`. Empty inputs are omitted.
pub fn derive_match_keys(
    service: &str,
    resource_type: Option<&str>,
    identifier: &str,
    name: Option<&str>,
) -> MatchKeySet {
    let mut keys = MatchKeySet::default();
    let service = service.to_lowercase();

    if !identifier.is_empty() {
        keys.push(identifier.to_lowercase());
    }
    if let Some(name) = name.filter(|n| !n.is_empty()) {
        keys.push(name.to_lowercase());
    }
    if let Some(resource_type) = resource_type.filter(|t| !t.is_empty()) {
        let resource_type = resource_type.to_lowercase();
        if resource_type.contains(':') {
            keys.push(resource_type);
        } else {
            keys.push(format!("{}:{}", service, resource_type));
        }
    }
    if !service.is_empty() {
        keys.push(service);
    }

    keys
}

/// A resource paired with its derived lookup keys.
#[derive(Debug, Clone)]
pub struct ResourceIndex<'a> {
    pub resource: &'a Resource,
    /// Value of the `Name` tag, if any
    pub name: Option<&'a str>,
    pub keys: MatchKeySet,
}

impl<'a> ResourceIndex<'a> {
    pub fn new(resource: &'a Resource) -> Self {
        let name = resource.name();
        let keys = derive_match_keys(
            &resource.service,
            Some(resource.resource_type.as_str()),
            &resource.identifier,
            name,
        );
        Self {
            resource,
            name,
            keys,
        }
    }

    /// Lower-cased name for substring tests.
    pub fn name_lower(&self) -> Option<String> {
        self.name.filter(|n| !n.is_empty()).map(str::to_lowercase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagplan_core::Tag;

    #[test]
    fn test_bare_type_is_qualified_with_service() {
        let keys = derive_match_keys(
            "EC2",
            Some("Instance"),
            "arn:aws:ec2:us-west-2:1:instance/i-1",
            Some("Web-01"),
        );
        let collected: Vec<&str> = keys.iter().collect();
        assert_eq!(
            collected,
            vec![
                "arn:aws:ec2:us-west-2:1:instance/i-1",
                "web-01",
                "ec2:instance",
                "ec2"
            ]
        );
    }

    #[test]
    fn test_qualified_type_is_kept() {
        let keys = derive_match_keys("ec2", Some("ec2:volume"), "arn:x", None);
        assert!(keys.contains("ec2:volume"));
        assert!(!keys.contains("ec2:ec2:volume"));
        assert_eq!(keys.len(), 3);
    }

    #[test]
    fn test_missing_parts_are_omitted() {
        let keys = derive_match_keys("s3", None, "arn:aws:s3:::bucket", None);
        assert_eq!(keys.iter().collect::<Vec<_>>(), vec!["arn:aws:s3:::bucket", "s3"]);

        let keys = derive_match_keys("s3", Some(""), "arn:aws:s3:::bucket", Some(""));
        assert_eq!(keys.len(), 2);
    }

    #[test]
    fn test_duplicate_keys_collapse() {
        // A resource named after its own service
        let keys = derive_match_keys("s3", Some("bucket"), "arn:aws:s3:::b", Some("S3"));
        assert_eq!(keys.iter().collect::<Vec<_>>(), vec!["arn:aws:s3:::b", "s3", "s3:bucket"]);
    }

    #[test]
    fn test_resource_index_uses_name_tag() {
        let resource = tagplan_core::Resource::new("arn:aws:ec2:us-west-2:1:instance/i-1", "ec2", "instance")
            .with_tags(vec![Tag::new("Name", "Web-01"), Tag::new("Env", "prod")]);
        let index = ResourceIndex::new(&resource);
        assert_eq!(index.name, Some("Web-01"));
        assert_eq!(index.name_lower().as_deref(), Some("web-01"));
        assert!(index.keys.contains("web-01"));
        assert!(index.keys.contains("ec2:instance"));
    }
}
