use std::fmt;

/// The fixed vocabulary of configuration slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// Transport used to perform the request.
    Transport,
    /// Target URL.
    Url,
    /// Options handed to the transport (method, headers, body, ...).
    RequestOptions,
    /// Fallback response handler.
    OnResponse,
    /// Handler for responses with `ok == true`.
    OnSuccess,
    /// Handler for responses with `ok == false`.
    OnError,
    /// Handler for transport failures.
    OnConnectionError,
    /// Hook applied to the configuration right before dispatch.
    OnBeforeRun,
    /// Per-status response handlers.
    OnStatusCallbacks,
}

/// How a setter combines a new value with the existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// The new value replaces the old one.
    Scalar,
    /// The new entries are shallow-merged into the old mapping.
    Merge,
}

impl Key {
    pub const ALL: [Key; 9] = [
        Key::Transport,
        Key::Url,
        Key::RequestOptions,
        Key::OnResponse,
        Key::OnSuccess,
        Key::OnError,
        Key::OnConnectionError,
        Key::OnBeforeRun,
        Key::OnStatusCallbacks,
    ];

    pub const fn kind(self) -> KeyKind {
        match self {
            Key::RequestOptions | Key::OnStatusCallbacks => KeyKind::Merge,
            _ => KeyKind::Scalar,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Key::Transport => "transport",
            Key::Url => "url",
            Key::RequestOptions => "request_options",
            Key::OnResponse => "on_response",
            Key::OnSuccess => "on_success",
            Key::OnError => "on_error",
            Key::OnConnectionError => "on_connection_error",
            Key::OnBeforeRun => "on_before_run",
            Key::OnStatusCallbacks => "on_status_callbacks",
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyKind::Scalar => write!(f, "scalar"),
            KeyKind::Merge => write!(f, "merge"),
        }
    }
}
