use serde_json::Value;

use crate::error::NetError;

/// JSON request surface components talk to. Implemented by [`HttpClient`]
/// for real traffic; tests and offline demos provide their own.
pub trait Fetch {
    fn get(&self, url: &str) -> Result<Value, NetError>;
    fn post(&self, url: &str, body: &Value) -> Result<Value, NetError>;
    fn put(&self, url: &str, body: &Value) -> Result<Value, NetError>;
    fn delete(&self, url: &str) -> Result<Value, NetError>;
}

pub struct HttpClient {
    agent: ureq::Agent,
    bearer_token: Option<String>,
}

impl HttpClient {
    pub fn new(bearer_token: Option<String>) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
            bearer_token,
        }
    }

    fn request(
        &self,
        method: &'static str,
        url: &str,
        body: Option<&Value>,
        with_bearer: bool,
    ) -> Result<Value, NetError> {
        let mut request = self
            .agent
            .request(method, url)
            .set("Content-Type", "application/json")
            .set("Accept", "application/json")
            .set("Cache-Control", "no-cache");

        if with_bearer && let Some(token) = &self.bearer_token {
            request = request.set("Authorization", &format!("Bearer {token}"));
        }

        log::debug!("{method} {url}");
        let result = match body {
            Some(body) => request.send_string(&body.to_string()),
            None => request.call(),
        };

        // Error statuses still carry a body the caller interprets; only
        // transport failures are errors here.
        let response = match result {
            Ok(response) => response,
            Err(ureq::Error::Status(_, response)) => response,
            Err(ureq::Error::Transport(source)) => {
                return Err(NetError::Transport {
                    method,
                    url: url.to_string(),
                    source: Box::new(source),
                });
            }
        };

        response.into_json().map_err(|source| NetError::Json {
            url: url.to_string(),
            source,
        })
    }
}

impl Fetch for HttpClient {
    fn get(&self, url: &str) -> Result<Value, NetError> {
        self.request("GET", url, None, false)
    }

    fn post(&self, url: &str, body: &Value) -> Result<Value, NetError> {
        self.request("POST", url, Some(body), false)
    }

    /// The one verb that authenticates: attaches the configured bearer
    /// credential when present.
    fn put(&self, url: &str, body: &Value) -> Result<Value, NetError> {
        self.request("PUT", url, Some(body), true)
    }

    fn delete(&self, url: &str) -> Result<Value, NetError> {
        self.request("DELETE", url, None, false)
    }
}
