#![allow(dead_code)]

pub mod mock_provider;
pub mod test_server;

pub use mock_browser::{MockBrowser, location, query_param};
pub use mock_provider::{CLIENT_ID, ProviderMode};
pub use test_server::TestServer;
