use bk_auth::TokenPair;

/// Frontend URL carrying a freshly issued token pair
pub fn login_redirect_url(base: &str, pair: &TokenPair) -> String {
    with_query(
        base,
        &[
            ("token", pair.token.as_str()),
            ("refreshToken", pair.refresh_token.as_str()),
        ],
    )
}

/// Frontend URL carrying the error code of a failed social login
pub fn failure_redirect_url(base: &str, code: &str) -> String {
    with_query(base, &[("error", code)])
}

fn with_query(base: &str, params: &[(&str, &str)]) -> String {
    let mut url = base.to_string();
    let mut separator = if base.contains('?') { '&' } else { '?' };

    for (key, value) in params {
        url.push(separator);
        url.push_str(key);
        url.push('=');
        url.push_str(&urlencoding::encode(value));
        separator = '&';
    }

    url
}
