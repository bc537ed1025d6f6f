use crate::HttpStatusCode;

/// **VALUE**: Verifies which statuses the decoder is allowed to retry.
///
/// **WHY THIS MATTERS**: The decoder retries only transient failures. Retrying a
/// 400 wastes a round trip and hides a real client bug.
///
/// **BUG THIS CATCHES**: Would catch if 4xx statuses (other than 429) become
/// retryable or gateway errors stop being retried.
#[test]
fn given_status_codes_when_checking_retryable_then_only_transient_codes_match() {
    for code in [429, 502, 503, 504] {
        assert!(HttpStatusCode(code).is_retryable(), "{code} should retry");
    }

    for code in [200, 400, 404, 413, 500] {
        assert!(!HttpStatusCode(code).is_retryable(), "{code} should not retry");
    }
}

#[test]
fn given_status_codes_when_checking_success_then_only_2xx_match() {
    assert!(HttpStatusCode::from(200).is_success());
    assert!(HttpStatusCode::from(204).is_success());
    assert!(!HttpStatusCode::from(301).is_success());
    assert!(!HttpStatusCode::from(503).is_success());
}

#[test]
fn given_status_code_when_displayed_then_shows_bare_number() {
    assert_eq!(HttpStatusCode(503).to_string(), "503");
}
