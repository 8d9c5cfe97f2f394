//! Garmin SSO page scraping
//!
//! The sign-in flow is HTML based: the sign-in form carries a CSRF token, and a
//! successful POST answers with a page embedding the service ticket that is
//! later exchanged for session cookies.

use crate::domain::{GarminError, Result};
use regex::Regex;

/// Query parameters shared by the GET and POST to `/sso/signin`
pub fn signin_params(sso_base: &str, connect_base: &str) -> Vec<(&'static str, String)> {
    let sso = sso_base.trim_end_matches('/');
    let connect = connect_base.trim_end_matches('/');
    vec![
        ("service", format!("{connect}/modern/")),
        ("webhost", format!("{connect}/modern/")),
        ("source", format!("{connect}/signin/")),
        ("redirectAfterAccountLoginUrl", format!("{connect}/modern/")),
        ("redirectAfterAccountCreationUrl", format!("{connect}/modern/")),
        ("gauthHost", format!("{sso}/sso")),
        ("locale", "en_US".to_string()),
        ("id", "gauth-widget".to_string()),
        ("clientId", "GarminConnect".to_string()),
        ("embedWidget", "false".to_string()),
        ("generateExtraServiceTicket", "true".to_string()),
    ]
}

fn capture(pattern: &str, html: &str) -> Result<Option<String>> {
    let re = Regex::new(pattern)
        .map_err(|e| GarminError::InvalidResponse(format!("Invalid pattern: {e}")))?;
    Ok(re
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string()))
}

/// Extracts the `_csrf` hidden input of the sign-in form
///
/// # Errors
///
/// Returns [`GarminError::AuthenticationFailed`] if the page has no token.
pub fn extract_csrf_token(html: &str) -> Result<String> {
    capture(r#"name="_csrf"\s+value="([^"]+)""#, html)?.ok_or_else(|| {
        GarminError::AuthenticationFailed("sign-in page has no CSRF token".to_string()).into()
    })
}

/// Extracts the service ticket from the sign-in response
///
/// # Errors
///
/// Returns [`GarminError::AuthenticationFailed`] if the response carries no
/// ticket, which is how Garmin answers wrong credentials.
pub fn extract_ticket(html: &str) -> Result<String> {
    capture(r#"ticket=([^"&]+)""#, html)?.ok_or_else(|| {
        let reason = capture(r"<title>([^<]*)</title>", html)
            .ok()
            .flatten()
            .unwrap_or_else(|| "no service ticket in response".to_string());
        GarminError::AuthenticationFailed(format!("sign-in rejected: {reason}")).into()
    })
}
