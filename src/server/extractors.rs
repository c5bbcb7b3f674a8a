use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::Deserialize;
use std::convert::Infallible;

use super::deserializers::{deserialize_page, first_page};

#[derive(Debug, Deserialize)]
struct PageQuery {
    #[serde(default = "first_page", deserialize_with = "deserialize_page")]
    page: i64,
}

/// The 1-based `?page=` number.
///
/// Never rejects: a query string that doesn't parse (e.g. `page` given twice)
/// falls back to the first page, same as a non-numeric page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page(pub i64);

impl<S> FromRequestParts<S> for Page
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<PageQuery>::from_request_parts(parts, state).await {
            Ok(Query(query)) => Ok(Page(query.page)),
            Err(rejection) => {
                tracing::debug!("Ignoring malformed query string: {rejection}");
                Ok(Page(first_page()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;

    use super::*;

    async fn page(uri: &str) -> i64 {
        let (mut parts, _) = Request::get(uri).body(Body::empty()).unwrap().into_parts();
        Page::from_request_parts(&mut parts, &()).await.unwrap().0
    }

    #[tokio::test]
    async fn reads_page_number() {
        assert_eq!(page("/questions").await, 1);
        assert_eq!(page("/questions?page=2").await, 2);
        assert_eq!(page("/questions?page=0").await, 0);
        assert_eq!(page("/questions?page=x").await, 1);
    }

    #[tokio::test]
    async fn duplicate_page_falls_back_to_first() {
        assert_eq!(page("/questions?page=1&page=2").await, 1);
    }
}
