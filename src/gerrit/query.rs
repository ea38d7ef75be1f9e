use crate::core::ProjectSpec;

use super::types::ChangeStatus;

/// Strip one trailing `/` from the server URL.
pub(crate) fn normalize_host(host: &str) -> &str {
    host.strip_suffix('/').unwrap_or(host)
}

/// Build a `/changes/` query URL.
///
/// Authenticated requests go through the `/a/` prefix.
pub(crate) fn changes_url(
    host: &str,
    authenticated: bool,
    status: ChangeStatus,
    project: &ProjectSpec,
    resume: Option<&str>,
    page_size: usize,
) -> String {
    let prefix = if authenticated { "/a" } else { "" };
    let resume = resume
        .map(|key| format!("+resume_sortkey:{key}"))
        .unwrap_or_default();
    format!(
        "{host}{prefix}/changes/?q={}+{}{resume}&n={page_size}",
        status.operator(),
        project.query_term(),
    )
}

/// Drop the anti-XSSI line (`)]}'`) that precedes every JSON body.
pub(crate) fn strip_xssi_guard(body: &str) -> &str {
    match body.find('\n') {
        Some(pos) => &body[pos + 1..],
        None => body,
    }
}
