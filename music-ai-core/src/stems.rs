use crate::types::{StemKind, StemReferences, StemSource};

/// Resolves a relative reference against the page the app is served from.
pub trait PageUrlResolver {
    /// `None` when the reference cannot be resolved.
    fn resolve(&self, reference: &str) -> Option<String>;
}

impl<F: Fn(&str) -> Option<String>> PageUrlResolver for F {
    fn resolve(&self, reference: &str) -> Option<String> {
        self(reference)
    }
}

/// Turn a raw stem reference into something an `<audio>` element can play.
///
/// Absolute `http(s)` URLs pass through, root-relative paths are served by
/// the analysis service, anything else is resolved against the page origin
/// and kept raw if that fails.
pub fn resolve_stem(reference: Option<&str>, base_url: &str, page: &impl PageUrlResolver) -> StemSource {
    let Some(value) = reference.map(str::trim).filter(|v| !v.is_empty()) else {
        return StemSource::Absent;
    };
    if value.starts_with("http://") || value.starts_with("https://") {
        return StemSource::Present(value.to_string());
    }
    if value.starts_with('/') {
        return StemSource::Present(format!("{}{}", base_url.trim_end_matches('/'), value));
    }
    StemSource::Present(page.resolve(value).unwrap_or_else(|| value.to_string()))
}

/// All four stems in display order.
pub fn resolve_all(
    stems: &StemReferences,
    base_url: &str,
    page: &impl PageUrlResolver,
) -> Vec<(StemKind, StemSource)> {
    StemKind::ALL
        .iter()
        .map(|&kind| (kind, resolve_stem(stems.raw(kind), base_url, page)))
        .collect()
}
