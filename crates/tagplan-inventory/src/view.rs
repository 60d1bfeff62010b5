//! View identifier parsing
//!
//! View ARNs look like
//! `arn:aws:resource-explorer-2:<region>:<account>:view/<name>/<uuid>`.

use tagplan_core::Arn;

/// Name of the view encoded in a view ARN.
///
/// The resource part must split on `/` into at least three pieces; the name is
/// the second-to-last one.
pub fn view_name_from_arn(view_arn: &str) -> Option<String> {
    let arn = Arn::parse(view_arn).ok()?;
    let parts: Vec<&str> = arn.resource.split('/').collect();
    if parts.len() < 3 {
        return None;
    }
    Some(parts[parts.len() - 2].to_string())
}

/// First view ARN whose name equals `view_name`.
pub fn find_view<'a, I>(view_arns: I, view_name: &str) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a String>,
{
    view_arns
        .into_iter()
        .find(|arn| view_name_from_arn(arn).as_deref() == Some(view_name))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: &str = "arn:aws:resource-explorer-2:us-west-2:123456789012:view/all-resources-with-tags/0a1b2c3d";

    #[test]
    fn test_view_name_from_arn() {
        assert_eq!(
            view_name_from_arn(VIEW).as_deref(),
            Some("all-resources-with-tags")
        );
        assert_eq!(
            view_name_from_arn("arn:aws:resource-explorer-2:us-west-2:1:view/short"),
            None
        );
        assert_eq!(view_name_from_arn("garbage"), None);
    }

    #[test]
    fn test_find_view() {
        let views = vec![
            "arn:aws:resource-explorer-2:us-west-2:1:view/other/1".to_string(),
            VIEW.to_string(),
        ];
        assert_eq!(find_view(&views, "all-resources-with-tags"), Some(VIEW));
        assert_eq!(find_view(&views, "missing"), None);
    }
}
