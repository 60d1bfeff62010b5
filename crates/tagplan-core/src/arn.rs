//! Structured access to `:`-separated resource identifiers.
//!
//! Identifiers follow the shape
//! `arn:<partition>:<service>:<region>:<account>:<resource>`. The resource
//! part may itself contain `:` (e.g. `function:my-fn:alias`), so only the
//! first five separators are significant.

use crate::error::{Error, Result};
use std::fmt;

/// Index of the region field in a `:`-split identifier.
const REGION_FIELD: usize = 3;

/// Parsed form of an ARN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arn {
    pub partition: String,
    pub service: String,
    /// Empty for global resources (S3 buckets, IAM roles, ...)
    pub region: String,
    /// Empty for resources that are not account-scoped
    pub account: String,
    pub resource: String,
}

impl Arn {
    /// Parse an identifier into its fields.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArn`] if the identifier does not start with
    /// `arn:` or has fewer than six fields.
    pub fn parse(identifier: &str) -> Result<Self> {
        let parts: Vec<&str> = identifier.splitn(6, ':').collect();
        if parts.len() < 6 {
            return Err(Error::InvalidArn {
                arn: identifier.to_string(),
                reason: format!("expected 6 ':'-separated fields, found {}", parts.len()),
            });
        }
        if parts[0] != "arn" {
            return Err(Error::InvalidArn {
                arn: identifier.to_string(),
                reason: "must start with 'arn:'".to_string(),
            });
        }

        Ok(Self {
            partition: parts[1].to_string(),
            service: parts[2].to_string(),
            region: parts[3].to_string(),
            account: parts[4].to_string(),
            resource: parts[5].to_string(),
        })
    }

    /// The region, or `None` for global resources.
    pub fn region(&self) -> Option<&str> {
        (!self.region.is_empty()).then_some(self.region.as_str())
    }

    /// The account id, or `None` when the resource is not account-scoped.
    pub fn account(&self) -> Option<&str> {
        (!self.account.is_empty()).then_some(self.account.as_str())
    }
}

impl fmt::Display for Arn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "arn:{}:{}:{}:{}:{}",
            self.partition, self.service, self.region, self.account, self.resource
        )
    }
}

/// Region code carried in the 4th field of an identifier.
///
/// Returns `None` when the field is absent or empty. Unlike [`Arn::parse`]
/// this does not require a well-formed ARN.
pub fn region_of(identifier: &str) -> Option<&str> {
    identifier
        .split(':')
        .nth(REGION_FIELD)
        .filter(|region| !region.is_empty())
}
