use filter_core::RowUid;

#[derive(Default)]
pub(super) struct State {
    /// Rows to draw, refreshed when the backend reports visibility or row set changes.
    pub(super) visible_rows: Vec<RowUid>,
    pub(super) total_rows: usize,
    pub(super) is_initialized: bool,
}
