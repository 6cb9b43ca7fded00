//! Cookie builders for access and refresh tokens.
//!
//! Both cookies are session cookies scoped to `/`, `HttpOnly` and `Secure`.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

/// Cookie name for the access token.
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";

/// Cookie name for the refresh token.
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

fn token_cookie(name: &'static str, value: String, same_site: Option<SameSite>) -> Cookie<'static> {
    let mut builder = Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .secure(true);
    if let Some(same_site) = same_site {
        builder = builder.same_site(same_site);
    }
    builder.build()
}

/// Set both token cookies on the jar.
///
/// Login passes `Some(SameSite::None)` so the cookies survive cross-site
/// requests from the frontend; refresh leaves the attribute unset.
///
/// ```
/// use axum_extra::extract::cookie::{CookieJar, SameSite};
/// use mentpat_auth_types::cookie::{set_token_cookies, ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};
///
/// let jar = set_token_cookies(CookieJar::new(), "a".into(), "r".into(), Some(SameSite::None));
/// let access = jar.get(ACCESS_TOKEN_COOKIE).unwrap();
/// assert_eq!(access.value(), "a");
/// assert_eq!(access.path(), Some("/"));
/// assert_eq!(access.same_site(), Some(SameSite::None));
/// assert!(access.http_only().unwrap_or(false));
/// assert!(access.secure().unwrap_or(false));
/// let refresh = jar.get(REFRESH_TOKEN_COOKIE).unwrap();
/// assert_eq!(refresh.value(), "r");
/// assert_eq!(refresh.max_age(), None);
/// ```
pub fn set_token_cookies(
    jar: CookieJar,
    access_token: String,
    refresh_token: String,
    same_site: Option<SameSite>,
) -> CookieJar {
    jar.add(token_cookie(ACCESS_TOKEN_COOKIE, access_token, same_site))
        .add(token_cookie(REFRESH_TOKEN_COOKIE, refresh_token, same_site))
}

/// Clear both token cookies by setting Max-Age to 0.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use mentpat_auth_types::cookie::{
///     clear_token_cookies, set_token_cookies, ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE,
/// };
///
/// let jar = set_token_cookies(CookieJar::new(), "a".into(), "r".into(), None);
/// let jar = clear_token_cookies(jar);
/// assert_eq!(jar.get(ACCESS_TOKEN_COOKIE).unwrap().max_age(), Some(time::Duration::ZERO));
/// assert_eq!(jar.get(REFRESH_TOKEN_COOKIE).unwrap().max_age(), Some(time::Duration::ZERO));
/// ```
pub fn clear_token_cookies(jar: CookieJar) -> CookieJar {
    let expired = |name: &'static str| {
        Cookie::build((name, ""))
            .path("/")
            .max_age(Duration::ZERO)
            .http_only(true)
            .secure(true)
            .build()
    };
    jar.add(expired(ACCESS_TOKEN_COOKIE))
        .add(expired(REFRESH_TOKEN_COOKIE))
}
