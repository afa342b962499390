use axum::http::HeaderMap;
use axum_extra::headers::{Cookie, HeaderMapExt};

/// Value of the session cookie, if the request carries one
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let cookies = headers.typed_get::<Cookie>()?;
    cookies
        .get(cookie_name)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// `Set-Cookie` value binding the session token to the whole site
pub fn session_cookie(cookie_name: &str, token: &str) -> String {
    format!("{}={}; HttpOnly; Path=/; SameSite=Lax", cookie_name, token)
}
