/// Returns `true` if the HTTP status code is in the `2xx` range.
///
/// This is the default for [`Response::ok`](crate::Response::ok); transports
/// may override it per response.
///
/// # Examples
///
/// ```
/// use chainfetch::transform::is_success;
///
/// assert!(is_success(200));
/// assert!(is_success(299));
/// assert!(!is_success(304));
/// assert!(!is_success(404));
/// ```
pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_success_codes() {
        assert!(is_success(200)); // OK
        assert!(is_success(201)); // Created
        assert!(is_success(204)); // No Content
        assert!(is_success(206)); // Partial Content
    }

    #[test]
    fn test_is_success_boundaries() {
        assert!(!is_success(199));
        assert!(is_success(200));
        assert!(is_success(299));
        assert!(!is_success(300));
    }

    #[test]
    fn test_is_success_error_codes() {
        for code in [301, 302, 400, 401, 404, 429, 500, 502, 503] {
            assert!(!is_success(code), "Code {} should NOT be a success", code);
        }
    }
}
