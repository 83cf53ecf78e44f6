use semver::VersionReq;

const DEFAULT_DIST_TAG: &str = "latest";
const RANGE_PREFIX: &str = "release-";

/// Maps a release channel to an npm dist-tag.
///
/// npm rejects dist-tags that parse as a semver range, so maintenance
/// channels such as `1.x` are published as `release-1.x`.
#[must_use]
pub fn dist_tag(channel: Option<&str>) -> String {
    match channel.filter(|channel| !channel.is_empty()) {
        None => DEFAULT_DIST_TAG.to_string(),
        Some(channel) if is_range(channel) => format!("{RANGE_PREFIX}{channel}"),
        Some(channel) => channel.to_string(),
    }
}

/// Accepts the range grammar npm uses: `||` unions of comparator sets, where a
/// set is a hyphen range or space-separated comparators, versions optionally
/// prefixed with `v`.
fn is_range(channel: &str) -> bool {
    channel
        .split("||")
        .all(|set| is_comparator_set(set.trim()))
}

fn is_comparator_set(set: &str) -> bool {
    if set.is_empty() || VersionReq::parse(set).is_ok() {
        return true;
    }
    if let Some((low, high)) = set.split_once(" - ") {
        return is_partial_version(low.trim()) && is_partial_version(high.trim());
    }

    let comparators: Vec<String> = set.split_whitespace().map(strip_v).collect();
    VersionReq::parse(&comparators.join(", ")).is_ok()
}

fn is_partial_version(version: &str) -> bool {
    let version = strip_v(version);
    !version.starts_with(['<', '>', '=', '~', '^']) && VersionReq::parse(&version).is_ok()
}

/// `>=v1.2` -> `>=1.2`
fn strip_v(comparator: &str) -> String {
    let version = comparator.trim_start_matches(['<', '>', '=', '~', '^']);
    let operator = &comparator[..comparator.len() - version.len()];
    let version = version.strip_prefix(['v', 'V']).unwrap_or(version);
    format!("{operator}{version}")
}
