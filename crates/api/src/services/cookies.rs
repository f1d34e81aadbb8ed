//! Cookie helper for httpOnly session cookies.
//!
//! The auth callback is a browser redirect, so the session has to travel
//! in Set-Cookie headers rather than a JSON body.

use axum::http::{header::SET_COOKIE, HeaderMap, HeaderValue};

use crate::config::CookieConfig;

/// Helper for building and reading httpOnly auth cookies.
#[derive(Debug, Clone)]
pub struct CookieHelper {
    config: CookieConfig,
    access_token_expiry_secs: i64,
    refresh_token_expiry_secs: i64,
}

impl CookieHelper {
    /// Create a new cookie helper with configuration.
    pub fn new(
        config: CookieConfig,
        access_token_expiry_secs: i64,
        refresh_token_expiry_secs: i64,
    ) -> Self {
        Self {
            config,
            access_token_expiry_secs,
            refresh_token_expiry_secs,
        }
    }

    /// Check if cookie authentication is enabled.
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Add access and refresh token cookies to a HeaderMap.
    pub fn add_token_cookies(
        &self,
        headers: &mut HeaderMap,
        access_token: &str,
        refresh_token: &str,
    ) {
        if !self.config.enabled {
            return;
        }

        let access_cookie = self.build_cookie(
            &self.config.access_token_name,
            access_token,
            &self.config.access_token_path,
            self.access_token_expiry_secs,
        );
        let refresh_cookie = self.build_cookie(
            &self.config.refresh_token_name,
            refresh_token,
            &self.config.refresh_token_path,
            self.refresh_token_expiry_secs,
        );

        if let Ok(value) = HeaderValue::from_str(&access_cookie) {
            headers.append(SET_COOKIE, value);
        }
        if let Ok(value) = HeaderValue::from_str(&refresh_cookie) {
            headers.append(SET_COOKIE, value);
        }
    }

    /// Extract the access token from request headers, if present.
    pub fn extract_access_token<'a>(&self, headers: &'a HeaderMap) -> Option<&'a str> {
        self.extract_cookie(headers, &self.config.access_token_name)
    }

    /// Extract the refresh token from request headers, if present.
    pub fn extract_refresh_token<'a>(&self, headers: &'a HeaderMap) -> Option<&'a str> {
        self.extract_cookie(headers, &self.config.refresh_token_name)
    }

    fn extract_cookie<'a>(&self, headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
        headers
            .get(axum::http::header::COOKIE)
            .and_then(|h| h.to_str().ok())
            .and_then(|cookie_header| {
                cookie_header
                    .split(';')
                    .map(|s| s.trim())
                    .find_map(|cookie| {
                        let (cookie_name, cookie_value) = cookie.split_once('=')?;
                        if cookie_name == name {
                            Some(cookie_value)
                        } else {
                            None
                        }
                    })
            })
    }

    fn build_cookie(&self, name: &str, value: &str, path: &str, max_age: i64) -> String {
        let mut cookie = format!("{}={}; Path={}; Max-Age={}", name, value, path, max_age);

        cookie.push_str("; HttpOnly");

        if self.config.secure {
            cookie.push_str("; Secure");
        }

        cookie.push_str(&format!("; SameSite={}", self.config.same_site));

        if !self.config.domain.is_empty() {
            cookie.push_str(&format!("; Domain={}", self.config.domain));
        }

        cookie
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> CookieConfig {
        CookieConfig {
            enabled: true,
            secure: true,
            same_site: "Lax".to_string(),
            domain: String::new(),
            access_token_name: "nexus_access_token".to_string(),
            refresh_token_name: "nexus_refresh_token".to_string(),
            access_token_path: "/".to_string(),
            refresh_token_path: "/api/v1/auth".to_string(),
        }
    }

    #[test]
    fn test_add_token_cookies() {
        let helper = CookieHelper::new(test_config(), 3600, 2592000);
        let mut headers = HeaderMap::new();
        helper.add_token_cookies(&mut headers, "access_value", "refresh_value");

        let cookies: Vec<_> = headers
            .get_all(SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect();
        assert_eq!(cookies.len(), 2);
        assert!(cookies[0].contains("nexus_access_token=access_value"));
        assert!(cookies[0].contains("Max-Age=3600"));
        assert!(cookies[0].contains("HttpOnly"));
        assert!(cookies[0].contains("Secure"));
        assert!(cookies[0].contains("SameSite=Lax"));
        assert!(cookies[1].contains("nexus_refresh_token=refresh_value"));
        assert!(cookies[1].contains("Path=/api/v1/auth"));
    }

    #[test]
    fn test_extract_tokens_from_cookie_header() {
        let helper = CookieHelper::new(test_config(), 3600, 2592000);
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::COOKIE,
            HeaderValue::from_static(
                "other=value; nexus_access_token=abc123; nexus_refresh_token=xyz789",
            ),
        );

        assert_eq!(helper.extract_access_token(&headers), Some("abc123"));
        assert_eq!(helper.extract_refresh_token(&headers), Some("xyz789"));
    }

    #[test]
    fn test_extract_access_token_absent() {
        let helper = CookieHelper::new(test_config(), 3600, 2592000);
        assert_eq!(helper.extract_access_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_disabled_helper_sets_nothing() {
        let mut config = test_config();
        config.enabled = false;

        let helper = CookieHelper::new(config, 3600, 2592000);
        assert!(!helper.is_enabled());

        let mut headers = HeaderMap::new();
        helper.add_token_cookies(&mut headers, "access", "refresh");
        assert!(headers.get(SET_COOKIE).is_none());
    }

    #[test]
    fn test_cookie_without_secure() {
        let mut config = test_config();
        config.secure = false;

        let helper = CookieHelper::new(config, 3600, 2592000);
        let mut headers = HeaderMap::new();
        helper.add_token_cookies(&mut headers, "a", "r");

        let cookie = headers.get(SET_COOKIE).unwrap().to_str().unwrap();
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn test_cookie_with_domain() {
        let mut config = test_config();
        config.domain = "nexus.example.com".to_string();

        let helper = CookieHelper::new(config, 3600, 2592000);
        let mut headers = HeaderMap::new();
        helper.add_token_cookies(&mut headers, "a", "r");

        let cookie = headers.get(SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.contains("Domain=nexus.example.com"));
    }
}
