//! Post-sign-in return path handling.

/// Turn a user-supplied `return` value into a same-site path.
///
/// Only relative targets are honoured. Anything carrying a scheme, a host,
/// a backslash, or a control character yields `landing`. Dot segments are
/// collapsed onto the root, so the result always starts with exactly one
/// `/`. The query string of the target is kept; a fragment is dropped.
pub fn sanitize_return_path(raw: Option<&str>, landing: &str) -> String {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return landing.to_string();
    };

    if raw.starts_with("//") || raw.chars().any(|c| c == '\\' || c.is_control()) {
        return landing.to_string();
    }

    let raw = raw.split_once('#').map_or(raw, |(before, _)| before);
    let (path, query) = match raw.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (raw, None),
    };

    if path.split('/').next().is_some_and(|first| first.contains(':')) {
        return landing.to_string();
    }

    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    let mut target = format!("/{}", segments.join("/"));
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        target.push('?');
        target.push_str(query);
    }
    target
}
