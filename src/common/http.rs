use std::time::Duration;

use reqwest::{Client, Error};

const USER_AGENT: &str = "mediarelay/0.1";

pub struct HttpClient;

impl HttpClient {
  /// Client for signed media API calls, with a bounded request deadline so
  /// an inbound request can never hang on the upstream indefinitely.
  pub fn new() -> Result<Client, Error> {
    Client::builder()
      .user_agent(USER_AGENT)
      .timeout(Duration::from_secs(10)) // 10s timeout
      .build()
  }

  /// Client for piping rendition bytes. Only the connect phase is bounded;
  /// the body copy runs as long as the inbound caller keeps reading.
  pub fn new_streaming() -> Result<Client, Error> {
    Client::builder()
      .user_agent(USER_AGENT)
      .connect_timeout(Duration::from_secs(10))
      .build()
  }
}
