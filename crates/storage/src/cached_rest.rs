//! Cached REST
//!
//! The `REST` server provides the built-in exercises, while the local storage of the browser
//! keeps a copy of the catalog for offline use. Custom exercises and the program only exist in
//! the local storage.

use knight_domain as domain;
use log::{debug, error};

use super::local_storage::LocalStorage;
use super::rest::{GlooNetSendRequest, REST, SendRequest};

#[derive(Clone)]
pub struct CachedREST<S: SendRequest> {
    pub rest: REST<S>,
}

impl CachedREST<GlooNetSendRequest> {
    #[must_use]
    pub fn new(catalog_url: &str) -> Self {
        Self {
            rest: REST::new(catalog_url),
        }
    }
}

impl Default for CachedREST<GlooNetSendRequest> {
    fn default() -> Self {
        Self {
            rest: REST::default(),
        }
    }
}

impl<S: SendRequest> domain::ExerciseRepository for CachedREST<S> {
    async fn read_catalog(&self) -> Result<Vec<domain::Exercise>, domain::ReadError> {
        match self.rest.read_catalog().await {
            Ok(exercises) => {
                if let Err(err) = LocalStorage.write_catalog(&exercises) {
                    error!("failed to write catalog into local storage: {err}");
                }
                Ok(exercises)
            }
            Err(domain::ReadError::Storage(domain::StorageError::NoConnection)) => {
                let cached = LocalStorage.read_catalog()?;
                if cached.is_empty() {
                    return Err(domain::StorageError::NoConnection.into());
                }
                debug!("using cached catalog");
                Ok(cached)
            }
            Err(err) => Err(err),
        }
    }

    async fn read_custom_exercises(&self) -> Result<Vec<domain::Exercise>, domain::ReadError> {
        Ok(LocalStorage.read_custom_exercises()?)
    }

    async fn write_custom_exercises(
        &self,
        exercises: &[domain::Exercise],
    ) -> Result<(), domain::WriteError> {
        Ok(LocalStorage.write_custom_exercises(exercises)?)
    }
}

impl<S: SendRequest> domain::ProgramRepository for CachedREST<S> {
    async fn read_program(
        &self,
        catalog: &domain::Catalog,
    ) -> Result<Option<domain::Program>, domain::ReadError> {
        Ok(LocalStorage.read_program(catalog)?)
    }

    async fn write_program(
        &self,
        program: &domain::Program,
        catalog: &domain::Catalog,
    ) -> Result<(), domain::WriteError> {
        Ok(LocalStorage.write_program(program, catalog)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    mod wasm {
        use std::cell::RefCell;

        use chrono::Weekday;
        use gloo_net::http::{Request, Response};
        use knight_domain::{ExerciseRepository, ProgramRepository};
        use pretty_assertions::assert_eq;
        use serde_json::json;
        use wasm_bindgen_test::wasm_bindgen_test;

        use crate::rest::DEFAULT_CATALOG_URL;
        use crate::tests::data::{self, BACK_SQUAT, BENCH_PRESS, SLED_PUSH, exercise_json};

        use super::*;

        #[wasm_bindgen_test]
        async fn test_read_catalog() {
            LocalStorage.clear();

            assert!(matches!(
                cached_rest_with_response(None).read_catalog().await,
                Err(domain::ReadError::Storage(
                    domain::StorageError::NoConnection
                ))
            ));

            assert_eq!(
                cached_rest_with_response(Some(
                    Response::builder()
                        .status(200)
                        .json(&json!([exercise_json(1), exercise_json(2)])),
                ))
                .read_catalog()
                .await
                .unwrap(),
                vec![BENCH_PRESS.clone(), BACK_SQUAT.clone()]
            );

            assert_eq!(
                cached_rest_with_response(None)
                    .read_catalog()
                    .await
                    .unwrap(),
                vec![BENCH_PRESS.clone(), BACK_SQUAT.clone()]
            );
        }

        #[wasm_bindgen_test]
        async fn test_read_catalog_server_error() {
            LocalStorage.clear();
            LocalStorage.write_catalog(&[BENCH_PRESS.clone()]).unwrap();

            assert!(matches!(
                cached_rest_with_response(Some(
                    Response::builder()
                        .status(500)
                        .body::<Option<&str>>(None),
                ))
                .read_catalog()
                .await,
                Err(domain::ReadError::Storage(domain::StorageError::Other(_)))
            ));
        }

        #[wasm_bindgen_test]
        async fn test_custom_exercises() {
            LocalStorage.clear();
            let cached_rest = cached_rest_with_response(None);

            assert!(cached_rest.read_custom_exercises().await.unwrap().is_empty());

            cached_rest
                .write_custom_exercises(&[SLED_PUSH.clone()])
                .await
                .unwrap();

            assert_eq!(
                cached_rest.read_custom_exercises().await.unwrap(),
                vec![SLED_PUSH.clone()]
            );
        }

        #[wasm_bindgen_test]
        async fn test_program() {
            LocalStorage.clear();
            let cached_rest = cached_rest_with_response(None);
            let catalog = data::catalog();

            assert_eq!(cached_rest.read_program(&catalog).await.unwrap(), None);

            let program = data::program(&catalog);
            cached_rest.write_program(&program, &catalog).await.unwrap();

            let read = cached_rest.read_program(&catalog).await.unwrap().unwrap();
            assert_eq!(read, program);
            assert_eq!(read.day(Weekday::Mon).len(), 1);
        }

        fn cached_rest_with_response(
            response: Option<Result<Response, gloo_net::Error>>,
        ) -> CachedREST<MockSendRequest> {
            let sender = MockSendRequest {
                request: RefCell::new(None),
                response: RefCell::new(response),
            };
            CachedREST {
                rest: REST {
                    sender,
                    catalog_url: DEFAULT_CATALOG_URL.to_string(),
                },
            }
        }

        struct MockSendRequest {
            request: RefCell<Option<Request>>,
            response: RefCell<Option<Result<Response, gloo_net::Error>>>,
        }

        impl SendRequest for MockSendRequest {
            async fn send_request(&self, request: Request) -> Result<Response, gloo_net::Error> {
                *self.request.borrow_mut() = Some(request);
                (*self.response.borrow_mut())
                    .take()
                    .unwrap_or(Err(gloo_net::Error::GlooError("no response".to_string())))
            }
        }
    }
}
