use url::Url;

/// The pages fetched for every evaluation, in prompt order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SitePage {
    Homepage,
    About,
    Careers,
}

impl SitePage {
    pub const ALL: [SitePage; 3] = [SitePage::Homepage, SitePage::About, SitePage::Careers];

    /// Path appended to the company URL; empty for the homepage.
    pub fn path(self) -> &'static str {
        match self {
            SitePage::Homepage => "",
            SitePage::About => "/about",
            SitePage::Careers => "/careers",
        }
    }

    pub fn section_header(self) -> &'static str {
        match self {
            SitePage::Homepage => "=== HOMEPAGE ===",
            SitePage::About => "=== ABOUT PAGE ===",
            SitePage::Careers => "=== CAREERS PAGE ===",
        }
    }
}

/// A normalized company URL and its display domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyTarget {
    pub url: String,
    pub domain: String,
}

impl CompanyTarget {
    pub fn from_input(input: &str) -> Self {
        let url = normalize_url(input);
        let domain = extract_domain(&url);
        Self { url, domain }
    }

    /// The homepage is the normalized URL itself; other pages are joined onto it
    /// without doubling a trailing slash.
    pub fn page_url(&self, page: SitePage) -> String {
        match page {
            SitePage::Homepage => self.url.clone(),
            _ => format!("{}{}", self.url.trim_end_matches('/'), page.path()),
        }
    }
}

/// Trim and prepend `https://` unless an http(s) scheme is already present.
pub fn normalize_url(input: &str) -> String {
    let url = input.trim();
    if has_http_scheme(url) {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

fn has_http_scheme(url: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        url.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// Host of `url` without a leading `www.`.
pub fn extract_domain(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) => strip_www(host).to_string(),
            None => extract_domain_textually(url),
        },
        Err(_) => extract_domain_textually(url),
    }
}

fn extract_domain_textually(url: &str) -> String {
    let without_scheme = ["https://", "http://"]
        .iter()
        .find_map(|scheme| {
            url.get(..scheme.len())
                .filter(|prefix| prefix.eq_ignore_ascii_case(scheme))
                .map(|_| &url[scheme.len()..])
        })
        .unwrap_or(url);
    let host_and_path = strip_www(without_scheme);
    host_and_path
        .split('/')
        .next()
        .unwrap_or(host_and_path)
        .to_string()
}

fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}
