use thiserror::Error;

/// Coarse handling class for anything that goes wrong outside the pure core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No location / network information; continue with "unknown".
    InputUnavailable,
    /// A request timed out; the caller may retry (refresh).
    Transient,
    /// No 2-D drawing context; only the map is affected.
    SurfaceUnavailable,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("permission denied")]
    PermissionDenied,
    #[error("position unavailable")]
    Unavailable,
    #[error("timed out")]
    Timeout,
    #[error("geolocation not supported")]
    Unsupported,
}

impl LocationError {
    /// Maps a `GeolocationPositionError.code`.
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => LocationError::PermissionDenied,
            3 => LocationError::Timeout,
            _ => LocationError::Unavailable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    #[error("offline")]
    Offline,
    #[error("network information not available")]
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    #[error("location: {0}")]
    Location(#[from] LocationError),
    #[error("network: {0}")]
    Network(#[from] NetworkError),
    #[error("drawing surface unavailable")]
    SurfaceUnavailable,
}

impl DashboardError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DashboardError::Location(LocationError::Timeout) => ErrorKind::Transient,
            DashboardError::Location(_) | DashboardError::Network(_) => {
                ErrorKind::InputUnavailable
            }
            DashboardError::SurfaceUnavailable => ErrorKind::SurfaceUnavailable,
        }
    }

    /// Toast text, shown once per failure.
    pub fn notice(&self) -> &'static str {
        match self {
            DashboardError::Location(LocationError::Unsupported) => {
                "Geolocation not supported by your browser"
            }
            DashboardError::Location(_) => "Failed to get location",
            DashboardError::Network(NetworkError::Offline) => "Network check failed",
            DashboardError::Network(NetworkError::Unsupported) => {
                "Network information not available"
            }
            DashboardError::SurfaceUnavailable => "Canvas not supported",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert_eq!(
            DashboardError::from(LocationError::Timeout).kind(),
            ErrorKind::Transient
        );
        assert_eq!(
            DashboardError::from(LocationError::PermissionDenied).kind(),
            ErrorKind::InputUnavailable
        );
        assert_eq!(
            DashboardError::from(NetworkError::Offline).kind(),
            ErrorKind::InputUnavailable
        );
        assert_eq!(
            DashboardError::SurfaceUnavailable.kind(),
            ErrorKind::SurfaceUnavailable
        );
    }

    #[test]
    fn position_error_codes() {
        assert_eq!(LocationError::from_code(1), LocationError::PermissionDenied);
        assert_eq!(LocationError::from_code(2), LocationError::Unavailable);
        assert_eq!(LocationError::from_code(3), LocationError::Timeout);
        assert_eq!(
            DashboardError::from(LocationError::Timeout).to_string(),
            "location: timed out"
        );
    }
}
