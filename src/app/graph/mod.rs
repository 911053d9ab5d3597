mod categories_view;
mod interaction;
mod relations_view;

/// Control flowing out of a graph view back to the container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) enum GraphAction {
    /// Toggle selection of the clicked node.
    ToggleSelect(String),
    /// Re-center the whole graph on this entity.
    Navigate(String),
}
