// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

/// The part of an inbound request the engine reads: headers. Bodies and
/// routing belong to the hosting server, not this core.
pub trait RequestHead {
    fn get_header(&self, key: &str) -> Option<String>;
}

/// Case-insensitive header map.
#[derive(Debug, Clone, Default)]
pub struct Headers {
    inner: Vec<(String, String)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vec(vec: Vec<(String, String)>) -> Self {
        let mut headers = Self::new();
        for (key, value) in vec {
            headers.insert(key, value);
        }
        headers
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.inner
            .iter()
            .find(|(k, _)| k == &key.to_lowercase())
            .map(|(_, v)| v.clone())
    }

    pub fn insert(&mut self, key: String, value: String) {
        self.inner.push((key.to_lowercase(), value));
    }
}

impl RequestHead for Headers {
    fn get_header(&self, key: &str) -> Option<String> {
        self.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_is_case_insensitive() {
        let headers = Headers::from_vec(vec![("Authorization".into(), "Bearer x".into())]);
        assert_eq!(headers.get("authorization"), Some("Bearer x".into()));
        assert_eq!(headers.get("AUTHORIZATION"), Some("Bearer x".into()));
        assert_eq!(headers.get("accept"), None);
    }
}
