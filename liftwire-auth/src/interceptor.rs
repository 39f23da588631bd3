//! Passive network interception on the login page.
//!
//! Listeners are attached strictly before the first navigation so no
//! token or user response can be missed to a registration race. The
//! subscription has a bounded lifetime: the listener tasks are aborted
//! when the flow ends, never left behind for the next attempt.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chromiumoxide::cdp::browser_protocol::network::{
    EnableParams, EventRequestWillBeSent, EventResponseReceived, GetResponseBodyParams,
};
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::capture::{apply_response, CaptureRules, SharedCapture};
use crate::config::WebAuthConfig;
use crate::error::AuthError;

/// Bounded-lifetime network event subscription for one login attempt.
///
/// Holds the spawned listener tasks; dropping (or [`detach`ing](Self::detach))
/// the interceptor aborts them.
#[derive(Debug)]
pub struct NetworkInterceptor {
    tasks: Vec<JoinHandle<()>>,
}

impl NetworkInterceptor {
    /// Attaches request/response listeners to `page`, writing captures
    /// into the attempt's buffer.
    ///
    /// Must be called before the page navigates anywhere.
    pub async fn attach(
        page: &Page,
        config: &WebAuthConfig,
        capture: SharedCapture,
    ) -> Result<Self, AuthError> {
        // Explicitly enable the network domain so events flow even if the
        // page was created without it.
        page.execute(EnableParams::default()).await?;

        let rules = CaptureRules {
            token_path_fragment: config.token_path_fragment.clone(),
            user_path_fragment: config.user_path_fragment.clone(),
            token_ttl: config.default_token_ttl,
        };

        let mut requests = page.event_listener::<EventRequestWillBeSent>().await?;
        let request_task = tokio::spawn(async move {
            while let Some(event) = requests.next().await {
                trace!(
                    method = %event.request.method,
                    url = %event.request.url,
                    "Outgoing request"
                );
            }
        });

        let mut responses = page.event_listener::<EventResponseReceived>().await?;
        let body_page = page.clone();
        let response_task = tokio::spawn(async move {
            while let Some(event) = responses.next().await {
                let url = event.response.url.clone();
                if !rules.matches(&url) {
                    continue;
                }

                // Body retrieval can fail for responses evicted from the
                // browser's buffer; that is not a flow error.
                let params = GetResponseBodyParams::new(event.request_id.clone());
                match body_page.execute(params).await {
                    Ok(response) => {
                        let returns = response.result;
                        let body = if returns.base64_encoded {
                            match BASE64.decode(returns.body.as_bytes()) {
                                Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                                Err(e) => {
                                    trace!(url = %url, error = %e, "Undecodable response body");
                                    continue;
                                }
                            }
                        } else {
                            returns.body
                        };
                        apply_response(&rules, &url, &body, &capture);
                    }
                    Err(e) => {
                        trace!(url = %url, error = %e, "Response body unavailable");
                    }
                }
            }
        });

        debug!("Network interceptor attached");
        Ok(Self {
            tasks: vec![request_task, response_task],
        })
    }

    /// Ends the subscription, aborting the listener tasks.
    pub fn detach(mut self) {
        self.abort_tasks();
        debug!("Network interceptor detached");
    }

    fn abort_tasks(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

impl Drop for NetworkInterceptor {
    fn drop(&mut self) {
        self.abort_tasks();
    }
}
