use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, COOKIE, REFERER, USER_AGENT};

use crate::{FailureKind, FetchError, FetchedDocument};

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/143.0.0.0 Safari/537.36";

/// How a request presents itself to the upstream site. The listing
/// endpoint expects XHR-style headers, regular pages expect a
/// navigation profile; sending the wrong one gets empty markup back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    Page,
    Api,
}

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub user_agent: String,
    pub accept_language: String,
    /// Pre-obtained session cookie string, passed through opaquely.
    pub cookie: Option<String>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: "zh-CN,zh;q=0.9".to_string(),
            cookie: None,
        }
    }
}

/// Opaque page retrieval, the pipeline's only I/O seam.
#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(
        &self,
        url: &str,
        referer: &str,
        mode: RequestMode,
    ) -> Result<FetchedDocument, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
    settings: FetchSettings,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { client, settings })
    }

    fn headers(&self, referer: &str, mode: RequestMode) -> Result<HeaderMap, FetchError> {
        let mut headers = HeaderMap::new();
        let mut put = |name: HeaderName, value: &str| -> Result<(), FetchError> {
            let value = HeaderValue::from_str(value)
                .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
            headers.insert(name, value);
            Ok(())
        };

        put(USER_AGENT, &self.settings.user_agent)?;
        put(
            HeaderName::from_static("accept-language"),
            &self.settings.accept_language,
        )?;
        put(REFERER, referer)?;
        if let Some(cookie) = self.settings.cookie.as_deref() {
            put(COOKIE, cookie)?;
        }

        match mode {
            RequestMode::Page => {
                put(
                    ACCEPT,
                    "text/html,application/xhtml+xml,application/xml;q=0.9,\
                     image/avif,image/webp,image/apng,*/*;q=0.8,\
                     application/signed-exchange;v=b3;q=0.7",
                )?;
                put(HeaderName::from_static("sec-fetch-dest"), "document")?;
                put(HeaderName::from_static("sec-fetch-mode"), "navigate")?;
                put(HeaderName::from_static("sec-fetch-site"), "same-origin")?;
                put(HeaderName::from_static("sec-fetch-user"), "?1")?;
                put(HeaderName::from_static("upgrade-insecure-requests"), "1")?;
            }
            RequestMode::Api => {
                put(ACCEPT, "*/*")?;
                put(HeaderName::from_static("priority"), "u=1, i")?;
                put(HeaderName::from_static("sec-fetch-dest"), "empty")?;
                put(HeaderName::from_static("sec-fetch-mode"), "cors")?;
                put(HeaderName::from_static("sec-fetch-site"), "same-origin")?;
                put(
                    HeaderName::from_static("x-requested-with"),
                    "XMLHttpRequest",
                )?;
            }
        }
        Ok(headers)
    }
}

#[async_trait::async_trait]
impl PageFetcher for ReqwestFetcher {
    async fn fetch(
        &self,
        url: &str,
        referer: &str,
        mode: RequestMode,
    ) -> Result<FetchedDocument, FetchError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;

        let response = self
            .client
            .get(parsed)
            .headers(self.headers(referer, mode)?)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let bytes = response.bytes().await.map_err(map_reqwest_error)?;

        Ok(FetchedDocument {
            bytes: bytes.to_vec(),
            content_type,
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
