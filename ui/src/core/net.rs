//! Thin HTTP seam so the rest of the crate is platform-agnostic.
//!
//! Callers get a status code and a text body back for any response the
//! transport produced; only failures *before* a response (DNS, refused
//! connection, aborted fetch) surface as [`NetError`]. Mapping non-2xx
//! statuses into the component error taxonomy happens at the call sites.

use thiserror::Error;

#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, Error)]
pub enum NetError {
    #[error("request failed: {0}")]
    Transport(String),
}

/// GET with `cache: no-store` semantics where the platform can express them.
pub async fn get(url: &str, headers: &[(&str, &str)]) -> Result<HttpReply, NetError> {
    #[cfg(target_arch = "wasm32")]
    {
        use gloo_net::http::Request;

        let mut request = Request::get(url).cache(web_sys::RequestCache::NoStore);
        for (name, value) in headers {
            request = request.header(name, value);
        }
        let response = request
            .send()
            .await
            .map_err(|err| NetError::Transport(err.to_string()))?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Ok(HttpReply { status, body })
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let client = reqwest::Client::new();
        let mut request = client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let response = request
            .send()
            .await
            .map_err(|err| NetError::Transport(err.to_string()))?;
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Ok(HttpReply { status, body })
    }
}

pub async fn post_json(
    url: &str,
    headers: &[(&str, &str)],
    body: &serde_json::Value,
) -> Result<HttpReply, NetError> {
    #[cfg(target_arch = "wasm32")]
    {
        use gloo_net::http::Request;

        let mut request = Request::post(url);
        for (name, value) in headers {
            request = request.header(name, value);
        }
        let response = request
            .json(body)
            .map_err(|err| NetError::Transport(err.to_string()))?
            .send()
            .await
            .map_err(|err| NetError::Transport(err.to_string()))?;
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        Ok(HttpReply { status, body: text })
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let client = reqwest::Client::new();
        let mut request = client.post(url).json(body);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let response = request
            .send()
            .await
            .map_err(|err| NetError::Transport(err.to_string()))?;
        let status = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();
        Ok(HttpReply { status, body: text })
    }
}
