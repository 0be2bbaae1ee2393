// src/handlers/extract.rs
//
// Versões de `Json` e `Path` que respondem no formato de erro da API
// (ApiError) em vez do texto puro padrão do axum.

use axum::{
    extract::{FromRequest, FromRequestParts, OriginalUri, Path, Request},
    http::{header, request::Parts, Extensions, HeaderMap, Uri},
    Json,
};
use serde::de::DeserializeOwned;

use crate::{
    common::error::{ApiError, AppError},
    middleware::i18n::Locale,
};

fn locale_from(headers: &HeaderMap) -> Locale {
    Locale::from_header(
        headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok()),
    )
}

// Dentro de rotas aninhadas (`nest`) a URI da requisição vem sem o prefixo.
fn original_path(extensions: &Extensions, uri: &Uri) -> String {
    extensions
        .get::<OriginalUri>()
        .map(|original| original.0.path().to_string())
        .unwrap_or_else(|| uri.path().to_string())
}

pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let locale = locale_from(req.headers());
        let path = original_path(req.extensions(), req.uri());

        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => {
                Err(AppError::InvalidRequest(rejection.body_text()).to_api_error(&locale, &path))
            }
        }
    }
}

pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(ApiPath(value)),
            Err(rejection) => Err(AppError::InvalidRequest(rejection.body_text())
                .to_api_error(
                    &locale_from(&parts.headers),
                    &original_path(&parts.extensions, &parts.uri),
                )),
        }
    }
}
