//! Filter types for querying roadmaps.

use std::str::FromStr;

use super::RoadmapStatus;

/// Filter options for listing a user's roadmaps.
#[derive(Debug, Clone, Default)]
pub struct RoadmapFilter {
    /// Which lifecycle statuses to include
    pub status: StatusFilter,

    /// Case-insensitive free-text search over goal, title, and subject
    pub search: Option<String>,

    /// Sort order for the result page
    pub sort: SortOrder,

    /// Number of rows to skip
    pub offset: u32,

    /// Maximum number of rows to return; None returns everything after the
    /// offset
    pub limit: Option<u32>,

    /// Include abandoned roadmaps in the result (excluded by default
    /// regardless of the status filter)
    pub include_abandoned: bool,
}

/// Status filter options for listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// Only active roadmaps
    Active,

    /// Only paused roadmaps
    Paused,

    /// Only completed roadmaps
    Completed,

    /// Everything except abandoned (unless explicitly requested)
    #[default]
    All,
}

impl StatusFilter {
    /// The roadmap status this filter pins to, if it pins to one.
    pub fn as_status(&self) -> Option<RoadmapStatus> {
        match self {
            StatusFilter::Active => Some(RoadmapStatus::Active),
            StatusFilter::Paused => Some(RoadmapStatus::Paused),
            StatusFilter::Completed => Some(RoadmapStatus::Completed),
            StatusFilter::All => None,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(StatusFilter::Active),
            "paused" => Ok(StatusFilter::Paused),
            "completed" => Ok(StatusFilter::Completed),
            "all" => Ok(StatusFilter::All),
            _ => Err(format!("Invalid status filter: {s}")),
        }
    }
}

/// Sort order options for listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Most recent activity first
    #[default]
    Recent,

    /// Oldest creation date first
    Oldest,

    /// Highest completion ratio first
    Progress,

    /// Title, case-insensitive ascending
    Name,
}

impl SortOrder {
    /// SQL ORDER BY clause body for this sort order.
    pub(crate) fn order_clause(&self) -> &'static str {
        match self {
            SortOrder::Recent => "last_activity_at DESC",
            SortOrder::Oldest => "created_at ASC",
            SortOrder::Progress => {
                "CAST(completed_steps AS REAL) / MAX(total_steps, 1) DESC, last_activity_at DESC"
            }
            SortOrder::Name => "title COLLATE NOCASE ASC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "recent" => Ok(SortOrder::Recent),
            "oldest" => Ok(SortOrder::Oldest),
            "progress" => Ok(SortOrder::Progress),
            "name" => Ok(SortOrder::Name),
            _ => Err(format!("Invalid sort order: {s}")),
        }
    }
}

impl TryFrom<&crate::params::ListRoadmaps> for RoadmapFilter {
    type Error = crate::TrackerError;

    /// Convert ListRoadmaps parameters into the internal query filter,
    /// parsing the status and sort strings.
    fn try_from(params: &crate::params::ListRoadmaps) -> Result<Self, Self::Error> {
        let status = match &params.status {
            Some(s) => StatusFilter::from_str(s).map_err(|_| {
                crate::TrackerError::invalid_input("status").with_reason(format!(
                    "Invalid status filter: {s}. Must be 'active', 'paused', 'completed', or 'all'"
                ))
            })?,
            None => StatusFilter::All,
        };
        let sort = match &params.sort {
            Some(s) => SortOrder::from_str(s).map_err(|_| {
                crate::TrackerError::invalid_input("sort").with_reason(format!(
                    "Invalid sort order: {s}. Must be 'recent', 'oldest', 'progress', or 'name'"
                ))
            })?,
            None => SortOrder::Recent,
        };

        Ok(Self {
            status,
            search: params.search.clone(),
            sort,
            offset: params.offset,
            limit: params.limit,
            include_abandoned: params.include_abandoned,
        })
    }
}
