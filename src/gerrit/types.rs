use serde::Deserialize;

/// One entry of a `/changes/` response. Only the fields the stats need.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChangeInfo {
    pub(crate) created: String,
    pub(crate) updated: String,
    /// Resumption cursor for the next page
    #[serde(rename = "_sortkey", default)]
    pub(crate) sort_key: Option<String>,
    /// Set on the last entry of a page when more results exist
    #[serde(rename = "_more_changes", default)]
    pub(crate) more_changes: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChangeStatus {
    Merged,
    Open,
}

impl ChangeStatus {
    pub(crate) fn operator(self) -> &'static str {
        match self {
            ChangeStatus::Merged => "is:merged",
            ChangeStatus::Open => "is:open",
        }
    }
}
