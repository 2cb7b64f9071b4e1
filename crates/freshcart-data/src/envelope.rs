//! Response envelope normalization.
//!
//! The API answers in one of three shapes: the bare payload, `{ "data": .. }`,
//! or a paginated `{ "data", "total", "page", "limit", "totalPages" }`.
//! [`normalize`] is the only place that tells them apart.

use crate::FetchError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Pagination fields of a paginated list response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub total_pages: u32,
}

impl PageMeta {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// A payload together with the envelope it arrived in.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiEnvelope<T> {
    Bare(T),
    Wrapped(T),
    Paginated { data: T, meta: PageMeta },
}

impl<T> ApiEnvelope<T> {
    pub fn data(&self) -> &T {
        match self {
            ApiEnvelope::Bare(data) | ApiEnvelope::Wrapped(data) => data,
            ApiEnvelope::Paginated { data, .. } => data,
        }
    }

    pub fn into_data(self) -> T {
        match self {
            ApiEnvelope::Bare(data) | ApiEnvelope::Wrapped(data) => data,
            ApiEnvelope::Paginated { data, .. } => data,
        }
    }

    /// Pagination, for paginated responses.
    pub fn meta(&self) -> Option<&PageMeta> {
        match self {
            ApiEnvelope::Paginated { meta, .. } => Some(meta),
            _ => None,
        }
    }
}

/// Classify a response body and decode its payload.
///
/// An object with a `data` key is an envelope; it is paginated when it also
/// carries `total` or `totalPages`. If the `data` field does not decode as
/// `T`, the whole body is tried as a bare payload.
pub fn normalize<T: DeserializeOwned>(body: Value) -> Result<ApiEnvelope<T>, FetchError> {
    let inner = match &body {
        Value::Object(map) => map.get("data").cloned().map(|data| {
            let paginated = map.contains_key("total") || map.contains_key("totalPages");
            (data, paginated)
        }),
        _ => None,
    };

    if let Some((data, paginated)) = inner {
        if let Ok(data) = serde_json::from_value::<T>(data) {
            if paginated {
                let meta = serde_json::from_value(body).unwrap_or_default();
                return Ok(ApiEnvelope::Paginated { data, meta });
            }
            return Ok(ApiEnvelope::Wrapped(data));
        }
    }

    serde_json::from_value(body)
        .map(ApiEnvelope::Bare)
        .map_err(|e| FetchError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: String,
    }

    #[test]
    fn test_bare_array() {
        let env: ApiEnvelope<Vec<Item>> = normalize(json!([{"id": "1"}])).unwrap();
        assert!(matches!(env, ApiEnvelope::Bare(_)));
        assert_eq!(env.into_data().len(), 1);
    }

    #[test]
    fn test_wrapped_array() {
        let env: ApiEnvelope<Vec<Item>> =
            normalize(json!({"data": [{"id": "1"}, {"id": "2"}]})).unwrap();
        assert!(matches!(env, ApiEnvelope::Wrapped(_)));
        assert_eq!(env.data()[1].id, "2");
    }

    #[test]
    fn test_paginated_list() {
        let env: ApiEnvelope<Vec<Item>> = normalize(json!({
            "data": [{"id": "1"}],
            "total": 25,
            "page": 1,
            "limit": 12,
            "totalPages": 3
        }))
        .unwrap();

        let meta = *env.meta().unwrap();
        assert_eq!(meta.total, 25);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next());
        assert_eq!(env.into_data()[0].id, "1");
    }

    #[test]
    fn test_bare_object() {
        let env: ApiEnvelope<Item> = normalize(json!({"id": "7"})).unwrap();
        assert_eq!(env, ApiEnvelope::Bare(Item { id: "7".into() }));
    }

    #[test]
    fn test_object_with_unrelated_data_field_is_bare() {
        let body = json!({"data": "not a map", "count": 1});
        let env: ApiEnvelope<serde_json::Map<String, Value>> = normalize(body).unwrap();
        assert!(matches!(env, ApiEnvelope::Bare(_)));
        assert_eq!(env.data().len(), 2);
    }

    #[test]
    fn test_mismatched_shape_is_parse_error() {
        let result: Result<ApiEnvelope<Vec<Item>>, _> = normalize(json!({"data": 5}));
        assert!(matches!(result, Err(FetchError::ParseError(_))));
    }
}
