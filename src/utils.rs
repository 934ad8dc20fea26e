/// Hides everything after the host so webhook tokens never reach the logs.
pub fn mask_url(url: &str) -> String {
    if let Some(scheme_end) = url.find("://") {
        let rest = &url[scheme_end + 3..];
        let host_end = rest.find(['/', '?']).unwrap_or(rest.len());
        return format!("{}{}/***/", &url[..scheme_end + 3], &rest[..host_end]);
    }
    "***".to_string()
}
