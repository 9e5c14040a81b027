/// Per-announce traffic contribution of one user, applied by the sync worker
/// as `uploaded = uploaded + delta` in the database.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UserDelta {
    pub user_id: u64,
    pub uploaded_delta: u64,
    pub downloaded_delta: u64,
}
