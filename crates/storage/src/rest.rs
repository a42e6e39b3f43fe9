use gloo_net::http::{Request, Response};
use knight_domain as domain;

use crate::document;

pub const DEFAULT_CATALOG_URL: &str = "api/exercises";

#[allow(async_fn_in_trait)]
pub trait SendRequest {
    async fn send_request(&self, request: Request) -> Result<Response, gloo_net::Error>;
}

#[derive(Clone, Copy, Default)]
pub struct GlooNetSendRequest;

impl SendRequest for GlooNetSendRequest {
    async fn send_request(&self, request: Request) -> Result<Response, gloo_net::Error> {
        request.send().await
    }
}

#[derive(Clone)]
pub struct REST<S: SendRequest> {
    pub sender: S,
    pub catalog_url: String,
}

impl REST<GlooNetSendRequest> {
    #[must_use]
    pub fn new(catalog_url: &str) -> Self {
        Self {
            sender: GlooNetSendRequest,
            catalog_url: catalog_url.to_string(),
        }
    }
}

impl Default for REST<GlooNetSendRequest> {
    fn default() -> Self {
        Self::new(DEFAULT_CATALOG_URL)
    }
}

impl<S: SendRequest> REST<S> {
    /// Built-in exercises provided by the server.
    pub async fn read_catalog(&self) -> Result<Vec<domain::Exercise>, domain::ReadError> {
        let request = Request::get(&self.catalog_url)
            .build()
            .map_err(|err| domain::StorageError::Other(err.into()))?;
        let records = self.fetch::<Vec<serde_json::Value>>(request).await?;
        Ok(document::parse_exercises(records))
    }

    async fn fetch<T>(&self, request: Request) -> Result<T, domain::StorageError>
    where
        T: 'static + for<'de> serde::Deserialize<'de>,
    {
        match self.sender.send_request(request).await {
            Ok(response) => {
                if response.ok() {
                    match response.json::<T>().await {
                        Ok(data) => Ok(data),
                        Err(err) => Err(domain::StorageError::Other(
                            format!("deserialization failed: {err}").into(),
                        )),
                    }
                } else if response.status() == 404 {
                    Err(domain::StorageError::NotFound)
                } else {
                    Err(domain::StorageError::Other(
                        format!("{} {}", response.status(), response.status_text()).into(),
                    ))
                }
            }
            Err(_) => Err(domain::StorageError::NoConnection),
        }
    }
}
