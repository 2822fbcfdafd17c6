use crate::{error::AppError, AppState};
use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

/// Rejects requests whose peer address is not in the trusted client list.
pub async fn require_trusted_client(
    State(state): State<Arc<AppState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ip = canonical(peer.ip());
    if state.trusted_clients.contains(&ip) {
        Ok(next.run(request).await)
    } else {
        tracing::warn!(client = %ip, path = %request.uri().path(), "Rejected untrusted client.");
        Err(AppError::Forbidden(ip))
    }
}

/// IPv4 peers reaching a dual-stack listener show up as `::ffff:a.b.c.d`.
pub fn canonical(ip: IpAddr) -> IpAddr {
    match ip {
        IpAddr::V6(v6) => v6.to_ipv4_mapped().map(IpAddr::V4).unwrap_or(ip),
        IpAddr::V4(_) => ip,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[test]
    fn ipv4_mapped_addresses_are_unwrapped() {
        let mapped = IpAddr::V6(Ipv4Addr::LOCALHOST.to_ipv6_mapped());
        assert_eq!(canonical(mapped), IpAddr::V4(Ipv4Addr::LOCALHOST));
    }

    #[test]
    fn native_addresses_are_unchanged() {
        assert_eq!(canonical(IpAddr::V6(Ipv6Addr::LOCALHOST)), IpAddr::V6(Ipv6Addr::LOCALHOST));
        let v4 = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 7));
        assert_eq!(canonical(v4), v4);
    }
}
