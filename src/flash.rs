use axum::response::Redirect;
use serde::{Deserialize, Serialize};
use tower_cookies::{Cookie, Cookies};
use tracing::warn;

const FLASH_COOKIE_NAME: &str = "_flash";

/// A one-shot notice carried to the next rendered page.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Flash {
    pub kind: String,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: "success".to_owned(),
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: "info".to_owned(),
            message: message.into(),
        }
    }
}

/// Reads the pending flash message, removing the cookie so it shows once.
pub fn take_flash(cookies: &Cookies) -> Option<Flash> {
    let flash_cookie = cookies.get(FLASH_COOKIE_NAME)?;
    let flash = serde_json::from_str(flash_cookie.value()).ok();

    let mut removal = Cookie::from(FLASH_COOKIE_NAME);
    removal.set_path("/");
    cookies.remove(removal);

    flash
}

pub type PostResponse = Redirect;

/// Stores `flash` for the next page and answers `303 See Other` to `location`.
///
/// The value is percent-encoded so names with `;` or non-ASCII text survive;
/// incoming cookies are decoded by the cookie layer.
pub fn post_response(cookies: &Cookies, location: &str, flash: Flash) -> PostResponse {
    match encoded_cookie(&flash) {
        Ok(cookie) => cookies.add(cookie),
        Err(err) => warn!("dropping flash message: {}", err),
    }

    Redirect::to(location)
}

fn encoded_cookie(flash: &Flash) -> Result<Cookie<'static>, String> {
    let value = serde_json::to_string(flash).map_err(|err| err.to_string())?;
    let raw = Cookie::new(FLASH_COOKIE_NAME, value);

    let mut cookie =
        Cookie::parse(raw.encoded().stripped().to_string()).map_err(|err| err.to_string())?;
    cookie.set_path("/");
    Ok(cookie)
}
