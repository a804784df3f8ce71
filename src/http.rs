use std::thread;
use std::time::Duration;

use log::{debug, warn};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const READ_TIMEOUT: Duration = Duration::from_secs(15);
const ATTEMPTS: usize = 3;
const RETRY_DELAY: Duration = Duration::from_millis(500);

/// A fetch that didn't produce a page body. Transport problems and HTTP
/// status failures are kept apart because they exit with different codes.
#[derive(Debug)]
pub(crate) enum FetchError {
    Transport(String),
    Status(u16),
}

fn should_retry_http_status(status: u16) -> bool {
    status == 408 || status == 429 || (500..=599).contains(&status)
}

/// Fetch the programme page with the default timeouts and retry policy.
pub(crate) fn fetch_page(url: &str) -> Result<String, FetchError> {
    get_text_with_retries(url, CONNECT_TIMEOUT, READ_TIMEOUT, ATTEMPTS, RETRY_DELAY)
}

pub(crate) fn get_text_with_retries(
    url: &str,
    connect_timeout: Duration,
    read_timeout: Duration,
    attempts: usize,
    retry_delay: Duration,
) -> Result<String, FetchError> {
    let attempts = attempts.max(1);

    for attempt in 1..=attempts {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(connect_timeout)
            .timeout_read(read_timeout)
            .timeout_write(read_timeout)
            .build();

        debug!("GET {url} (attempt {attempt}/{attempts})");
        match agent.get(url).call() {
            Ok(response) => match response.into_string() {
                Ok(body) => return Ok(body),
                Err(err) => {
                    return Err(FetchError::Transport(format!(
                        "response decode failed: {err}"
                    )));
                }
            },
            Err(ureq::Error::Status(status, _)) => {
                if should_retry_http_status(status) && attempt < attempts {
                    warn!("HTTP status {status} from {url}; retrying");
                    thread::sleep(retry_delay);
                    continue;
                }
                return Err(FetchError::Status(status));
            }
            Err(ureq::Error::Transport(err)) => {
                if attempt < attempts {
                    warn!("transport error from {url}: {err}; retrying");
                    thread::sleep(retry_delay);
                    continue;
                }
                return Err(FetchError::Transport(err.to_string()));
            }
        }
    }

    Err(FetchError::Transport(
        "exhausted attempts without a concrete error".to_string(),
    ))
}
