use forum_client_shared::types::{PostFilter, SortBy};

/// Listing filter chosen in the top bar.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterState {
    pub query: String,
    pub tags: Vec<String>,
    pub sort_by: SortBy,
    pub hide_query_filter: bool,
    pub hide_tag_filter: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterAction {
    QueryUpdated(String),
    TagsUpdated(Vec<String>),
    SortByUpdated(SortBy),
    /// Resets the query, tags and sort order. Visibility flags are kept.
    Cleared,
    HideTagFilter,
    ShowTagFilter,
    HideBothFilters,
    ShowBothFilters,
}

impl FilterState {
    pub fn apply(&mut self, action: FilterAction) {
        match action {
            FilterAction::QueryUpdated(query) => self.query = query,
            FilterAction::TagsUpdated(tags) => self.tags = tags,
            FilterAction::SortByUpdated(sort_by) => self.sort_by = sort_by,
            FilterAction::Cleared => {
                self.query.clear();
                self.tags.clear();
                self.sort_by = SortBy::default();
            }
            FilterAction::HideTagFilter => self.hide_tag_filter = true,
            FilterAction::ShowTagFilter => self.hide_tag_filter = false,
            FilterAction::HideBothFilters => {
                self.hide_tag_filter = true;
                self.hide_query_filter = true;
            }
            FilterAction::ShowBothFilters => {
                self.hide_tag_filter = false;
                self.hide_query_filter = false;
            }
        }
    }

    /// Parameters of the post listing this filter selects.
    pub fn post_filter(&self) -> PostFilter {
        PostFilter {
            query: self.query.clone(),
            tags: self.tags.clone(),
            sort_by: self.sort_by,
        }
    }
}
