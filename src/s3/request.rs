use anyhow::{Context, Result};
use bytes::Bytes;
use reqwest::{
    Client, Method, Response,
    header::{HeaderMap, HeaderName, HeaderValue},
};
use std::collections::BTreeMap;
use url::Url;

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Send a signed request, `body` must match the payload digest used to sign it
///
/// # Errors
///
/// Will return `Err` if the headers are invalid or can not make the request
pub async fn request(
    url: Url,
    method: Method,
    headers: &BTreeMap<String, String>,
    body: Option<Bytes>,
) -> Result<Response> {
    let headers = headers
        .iter()
        .map(|(k, v)| -> Result<(HeaderName, HeaderValue)> {
            Ok((k.parse()?, v.parse()?))
        })
        .collect::<Result<HeaderMap>>()?;

    let client = Client::builder()
        .user_agent(APP_USER_AGENT)
        .build()
        .context("unable to build HTTP client")?;

    log::debug!("{method} {url}");

    let request = client.request(method, url.clone()).headers(headers);
    let request = match body {
        Some(body) => request.body(body),
        None => request,
    };

    let response = request
        .send()
        .await
        .with_context(|| format!("request to {url} failed"))?;

    log::debug!("response status: {}", response.status());

    Ok(response)
}
