// src/utils.rs
use web_sys::window;

/// Directory part of a page path, without the trailing slash.
/// `/home` lives at the root, `/mall/kiosk/` under `/mall/kiosk`.
pub fn base_from_pathname(pathname: &str) -> &str {
    match pathname.rfind('/') {
        Some(idx) => &pathname[..idx],
        None => "",
    }
}

/// Base path the kiosk page is served under.
pub fn get_base_url() -> String {
    window()
        .and_then(|w| w.location().pathname().ok())
        .map(|path| base_from_pathname(&path).to_string())
        .unwrap_or_default()
}

/// Build a URL for a static resource relative to the kiosk page.
pub fn resource_url(path: &str) -> String {
    join_base(&get_base_url(), path)
}

fn join_base(base: &str, path: &str) -> String {
    let clean_path = path.trim_start_matches('/');
    if base.is_empty() {
        format!("/{}", clean_path)
    } else {
        format!("{}/{}", base, clean_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_from_pathname() {
        assert_eq!(base_from_pathname("/home"), "");
        assert_eq!(base_from_pathname("/"), "");
        assert_eq!(base_from_pathname("/mall/kiosk/"), "/mall/kiosk");
        assert_eq!(base_from_pathname("/mall/kiosk/index.html"), "/mall/kiosk");
        assert_eq!(base_from_pathname(""), "");
    }

    #[test]
    fn test_join_base() {
        assert_eq!(join_base("", "public/kiosk/config.json"), "/public/kiosk/config.json");
        assert_eq!(join_base("", "/public/kiosk/config.json"), "/public/kiosk/config.json");
        assert_eq!(join_base("/mall", "public/kiosk/config.json"), "/mall/public/kiosk/config.json");
    }
}
