use crate::tracker::structs::info_hash::InfoHash;

#[derive(Clone, Debug)]
pub struct ScrapeQueryRequest {
    pub info_hashes: Vec<InfoHash>,
}
