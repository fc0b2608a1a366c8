//! Pure string transforms over `key=value&key=value` encoded parameter
//! strings, used to rewrite `f`, `limit` and `offset` when building
//! pagination and alternate-format links.
//!
//! Values are assumed to contain no literal `&` or `=`.

/// Replace the value of the first occurrence of `key`; if the key is not
/// present, append `key=value` (prefixed with `&` only when the string is
/// non-empty). An empty input produces exactly `key=value`.
pub fn upsert_param(params: &str, key: &str, value: &str) -> String {
    let mut replaced = false;
    let parts: Vec<String> = params
        .split('&')
        .map(|pair| {
            let name = pair.split('=').next().unwrap_or(pair);
            if !replaced && name == key {
                replaced = true;
                format!("{}={}", key, value)
            } else {
                pair.to_string()
            }
        })
        .collect();

    let mut out = parts.join("&");
    if !replaced {
        if !out.is_empty() {
            out.push('&');
        }
        out.push_str(key);
        out.push('=');
        out.push_str(value);
    }
    out
}

/// Replace the value of the first occurrence of `key`; no-op when absent.
pub fn replace_param(params: &str, key: &str, value: &str) -> String {
    let mut replaced = false;
    let parts: Vec<String> = params
        .split('&')
        .map(|pair| {
            let name = pair.split('=').next().unwrap_or(pair);
            if !replaced && name == key {
                replaced = true;
                format!("{}={}", key, value)
            } else {
                pair.to_string()
            }
        })
        .collect();
    parts.join("&")
}
