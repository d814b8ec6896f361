use reqwest::Client;
use std::net::IpAddr;
use std::time::Duration;

/// Build an async reqwest client, optionally bound to a local address.
///
/// `connect_timeout` bounds connection establishment; body inactivity is
/// bounded per chunk by the probe itself.
pub fn build_client(
    connect_timeout: Duration,
    local_addr: Option<IpAddr>,
) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .connect_timeout(connect_timeout)
        .no_proxy()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));

    if let Some(addr) = local_addr {
        builder = builder.local_address(addr);
    }

    builder.build()
}
