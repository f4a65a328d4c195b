use thiserror::Error;

#[derive(Debug, Error)]
pub enum NetError {
    #[error("transport failure for {method} {url}: {source}")]
    Transport {
        method: &'static str,
        url: String,
        #[source]
        source: Box<ureq::Transport>,
    },
    #[error("response from {url} is not JSON: {source}")]
    Json {
        url: String,
        #[source]
        source: std::io::Error,
    },
}
