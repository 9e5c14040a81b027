use std::net::Ipv4Addr;

/// Extended accounting row: which address a user's session announced from
/// and what it moved. Only produced when `transfer_ips_enabled` is set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransferIpDelta {
    pub user_id: u64,
    pub torrent_id: u64,
    pub ip: Ipv4Addr,
    pub port: u16,
    pub uploaded: u64,
    pub downloaded: u64,
    pub started: u64,
    pub updated: u64,
}
