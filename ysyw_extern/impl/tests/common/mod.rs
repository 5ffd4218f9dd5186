use std::{net::SocketAddr, time::Duration};

use url::Url;
use ysyw_extern_impl::http::HttpClient;

pub fn http_client() -> HttpClient {
    HttpClient::new(Duration::from_secs(5)).unwrap()
}

pub fn base_url(addr: SocketAddr) -> Url {
    format!("http://{addr}/").parse().unwrap()
}
