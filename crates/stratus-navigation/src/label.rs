//! Human-readable labels for history entries

use url::Url;

struct SearchEngine {
    name: &'static str,
    host_suffix: &'static str,
    path: &'static str,
    /// Result pages share the path with the engine's front page
    requires_query: bool,
}

const SEARCH_ENGINES: &[SearchEngine] = &[
    SearchEngine {
        name: "Google",
        host_suffix: "google.com",
        path: "/search",
        requires_query: false,
    },
    SearchEngine {
        name: "Bing",
        host_suffix: "bing.com",
        path: "/search",
        requires_query: false,
    },
    SearchEngine {
        name: "DuckDuckGo",
        host_suffix: "duckduckgo.com",
        path: "/",
        requires_query: true,
    },
];

/// Derive the label shown for a visited page.
///
/// Rules are evaluated in order and the first match wins:
/// 1. search-engine result page → `Searched for: {q}` (or `{Engine} Search`)
/// 2. video watch page → `Watched: {title}`
/// 3. page without its own title → `Visited {domain}`
/// 4. the title itself
pub fn display_label(url: &str, title: &str) -> String {
    let parsed = Url::parse(url).ok();

    if let Some(parsed) = parsed.as_ref() {
        if let Some(engine) = search_engine_for(parsed) {
            return match query_param(parsed, "q") {
                Some(q) => format!("Searched for: {}", q),
                None => format!("{} Search", engine.name),
            };
        }

        if is_video_watch(parsed) {
            return format!("Watched: {}", title);
        }
    }

    if title.is_empty() || title == url {
        let domain = parsed
            .as_ref()
            .and_then(|u| u.host_str())
            .unwrap_or(url);
        return format!("Visited {}", domain.strip_prefix("www.").unwrap_or(domain));
    }

    title.to_string()
}

fn host_matches(host: &str, suffix: &str) -> bool {
    host == suffix || host.ends_with(&format!(".{}", suffix))
}

fn search_engine_for(url: &Url) -> Option<&'static SearchEngine> {
    let host = url.host_str()?;
    SEARCH_ENGINES.iter().find(|engine| {
        host_matches(host, engine.host_suffix)
            && url.path() == engine.path
            && (!engine.requires_query || query_param(url, "q").is_some())
    })
}

fn is_video_watch(url: &Url) -> bool {
    match url.host_str() {
        Some(host) if host_matches(host, "youtube.com") => url.path() == "/watch",
        Some("youtu.be") => url.path().len() > 1,
        _ => false,
    }
}

fn query_param(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.trim().is_empty())
}
