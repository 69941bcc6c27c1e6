// src/error.rs

/// Failures the kiosk can run into. None of them is fatal: the component that
/// triggered the work logs or surfaces the error and keeps its previous state.
#[derive(Debug, thiserror::Error)]
pub enum KioskError {
    #[error("request to {url} failed: {reason}")]
    Network { url: String, reason: String },
    #[error("unexpected response from {url}: {reason}")]
    Decode { url: String, reason: String },
    #[error("{0}")]
    Backend(String),
    #[error("unknown location: {0}")]
    UnknownLocation(String),
    #[error("start and goal must both be selected")]
    MissingSelection,
    #[error("dom error: {0}")]
    Dom(String),
    #[error("floor image failed to load: {0}")]
    ImageLoad(String),
}

impl KioskError {
    pub fn network(url: &str, err: impl std::fmt::Debug) -> Self {
        Self::Network {
            url: url.to_string(),
            reason: format!("{:?}", err),
        }
    }

    pub fn decode(url: &str, err: impl std::fmt::Debug) -> Self {
        Self::Decode {
            url: url.to_string(),
            reason: format!("{:?}", err),
        }
    }

    /// Message shown in a blocking notice. Only validation and backend errors
    /// reach the user; transport problems stay in the console.
    pub fn user_notice(&self) -> Option<String> {
        match self {
            KioskError::Backend(msg) => Some(msg.clone()),
            KioskError::MissingSelection => {
                Some("Harap pilih Lokasi Awal dan Tujuan terlebih dahulu.".to_string())
            }
            KioskError::UnknownLocation(_) => {
                Some("Data lokasi tidak ditemukan di sistem.".to_string())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_user_facing_errors_have_notices() {
        assert!(KioskError::Backend("no path".into()).user_notice().is_some());
        assert!(KioskError::MissingSelection.user_notice().is_some());
        assert!(KioskError::UnknownLocation("Zara".into())
            .user_notice()
            .is_some());
        assert!(KioskError::network("/route", "offline").user_notice().is_none());
        assert!(KioskError::Dom("no canvas".into()).user_notice().is_none());
    }

    #[test]
    fn test_network_message_names_url() {
        let err = KioskError::network("/search", "timeout");
        assert!(err.to_string().contains("/search"));
    }
}
