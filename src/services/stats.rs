use crate::cache::Coordinator;
use crate::config::Config;
use crate::domain::{MatchupRecord, PageKind, PlayerReport, SuggestionPage};
use crate::error::{Result, StatsError};
use crate::extract::{self, Selectors, SuggestionRules};
use reqwest::{Client, Url};
use scraper::Html;
use std::time::Duration;
use tracing::info;

/// Extraction orchestrator: resolves the cache key, and on a miss runs
/// fetch -> parse -> extract -> store. Fetch failures abort the request;
/// gaps inside a page degrade to partial results instead.
pub struct StatsService {
    client: Client,
    base_url: String,
    cache: Coordinator,
    selectors: Selectors,
    suggestion_rules: SuggestionRules,
    player_ttl: Duration,
    search_ttl: Duration,
}

impl StatsService {
    pub fn new(config: &Config, cache: Coordinator) -> Result<Self> {
        let service = Self {
            client: config.http_client.clone(),
            base_url: config.args.base_url.trim_end_matches('/').to_string(),
            cache,
            selectors: Selectors::new()?,
            suggestion_rules: SuggestionRules::new(config.args.suggestion_id_len)?,
            player_ttl: config.player_ttl(),
            search_ttl: config.search_ttl(),
        };
        info!("Created stats service for {}", service.base_url);
        Ok(service)
    }

    pub async fn player_report(&self, player_id: &str) -> Result<PlayerReport> {
        let subject = validate_subject(player_id)?;
        let kind = PageKind::MatchHistory;
        self.cache
            .get_or_compute(&kind.cache_key(&subject), self.player_ttl, || async {
                let body = self.fetch_page(page_url(&self.base_url, kind, &subject)?).await?;
                let document = Html::parse_document(&body);
                let (profile, matches) = extract::match_history::extract(&document, &self.selectors);
                Ok(PlayerReport { profile, matches })
            })
            .await
    }

    pub async fn matchups(&self, player_id: &str) -> Result<Vec<MatchupRecord>> {
        let subject = validate_subject(player_id)?;
        let kind = PageKind::Matchups;
        self.cache
            .get_or_compute(&kind.cache_key(&subject), self.player_ttl, || async {
                let body = self.fetch_page(page_url(&self.base_url, kind, &subject)?).await?;
                let document = Html::parse_document(&body);
                Ok(extract::matchups::extract(&document, &self.selectors))
            })
            .await
    }

    pub async fn highest_rating(&self, player_id: &str) -> Result<String> {
        let subject = validate_subject(player_id)?;
        let kind = PageKind::HighestRating;
        self.cache
            .get_or_compute(&kind.cache_key(&subject), self.player_ttl, || async {
                let body = self.fetch_page(page_url(&self.base_url, kind, &subject)?).await?;
                let document = Html::parse_document(&body);
                Ok(extract::highest_rating::extract(&document, &self.selectors))
            })
            .await
    }

    pub async fn search(&self, query: &str) -> Result<SuggestionPage> {
        let term = normalize_query(query)?;
        let kind = PageKind::PlayerSearch;
        self.cache
            .get_or_compute(&kind.cache_key(&term), self.search_ttl, || async {
                let body = self.fetch_page(page_url(&self.base_url, kind, &term)?).await?;
                let document = Html::parse_document(&body);
                Ok(extract::suggestions::extract(
                    &document,
                    &self.selectors,
                    &self.suggestion_rules,
                ))
            })
            .await
    }

    async fn fetch_page(&self, url: Url) -> Result<String> {
        info!("Fetching {url}");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StatsError::UpstreamStatus(status));
        }
        Ok(response.text().await?)
    }
}

/// Full upstream URL for a page. Search terms travel as an encoded query
/// parameter rather than raw path text, so characters like `&` or `#` in a
/// query reach the site intact.
fn page_url(base_url: &str, kind: PageKind, subject: &str) -> Result<Url> {
    let mut url = Url::parse(base_url)
        .map_err(|e| StatsError::BadInput(format!("invalid base url: {e}")))?;
    url.set_path(&kind.url_path(subject));
    if kind == PageKind::PlayerSearch {
        url.query_pairs_mut().append_pair("q", subject);
    }
    Ok(url)
}

/// Rejects empty subject ids before any fetch happens.
fn validate_subject(raw: &str) -> Result<String> {
    let subject = raw.trim();
    if subject.is_empty() {
        return Err(StatsError::BadInput("empty player id".into()));
    }
    Ok(subject.to_string())
}

/// Search terms are trimmed and lowercased so identical logical queries
/// share a cache slot.
fn normalize_query(raw: &str) -> Result<String> {
    let term = raw.trim().to_lowercase();
    if term.is_empty() {
        return Err(StatsError::BadInput("empty search query".into()));
    }
    Ok(term)
}
