//! Daily news digest: one search per keyword, one webhook post for the lot.

use anyhow::{Context, Result};
use serde::Deserialize;

pub const SORT_BY_SIMILARITY: &str = "sim";
pub const NO_RESULTS: &str = "검색 결과 없음";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub link: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<NewsItem>,
}

/// Results for one keyword. `None` means the search itself failed.
#[derive(Debug, Clone)]
pub struct DigestSection {
    pub keyword: String,
    pub items: Option<Vec<NewsItem>>,
}

pub struct NewsClient {
    client: reqwest::Client,
    api_url: String,
    client_id: String,
    client_secret: String,
}

impl NewsClient {
    pub fn new(
        api_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    pub async fn search(&self, keyword: &str, display: u32) -> Result<Vec<NewsItem>> {
        let url = format!(
            "{}?query={}&display={}&sort={}",
            self.api_url,
            urlencoding::encode(keyword),
            display,
            SORT_BY_SIMILARITY
        );

        let response: SearchResponse = self
            .client
            .get(&url)
            .header("X-Naver-Client-Id", &self.client_id)
            .header("X-Naver-Client-Secret", &self.client_secret)
            .send()
            .await
            .context("news search request failed")?
            .error_for_status()
            .context("news search returned an error status")?
            .json()
            .await
            .context("news search response is not valid JSON")?;

        Ok(response
            .items
            .into_iter()
            .map(|item| NewsItem {
                title: strip_html(&item.title),
                link: item.link,
            })
            .collect())
    }
}

/// Drops `<...>` tags and decodes the handful of entities the search API emits.
pub fn strip_html(raw: &str) -> String {
    let mut text = String::with_capacity(raw.len());
    let mut in_tag = false;
    for ch in raw.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }

    text.replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&apos;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}

pub fn format_digest(date: &str, sections: &[DigestSection]) -> String {
    let mut digest = format!("📰 *오늘의 뉴스 브리핑* ({date})");
    for section in sections {
        digest.push_str(&format!("\n\n*[{}]*", section.keyword));
        match section.items.as_deref() {
            Some(items) if !items.is_empty() => {
                for item in items {
                    digest.push_str(&format!("\n• <{}|{}>", item.link, item.title));
                }
            }
            _ => digest.push_str(&format!("\n• {NO_RESULTS}")),
        }
    }
    digest
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    #[test]
    fn strips_tags_and_entities() {
        assert_eq!(
            strip_html("<b>제주공항</b> 강풍에 &quot;무더기&quot; 결항 &amp; 지연"),
            "제주공항 강풍에 \"무더기\" 결항 & 지연"
        );
        assert_eq!(strip_html("no tags"), "no tags");
        assert_eq!(strip_html("&amp;lt;"), "&lt;");
    }

    #[test]
    fn formats_sections_in_order() {
        let sections = vec![
            DigestSection {
                keyword: "제주공항".to_string(),
                items: Some(vec![NewsItem {
                    title: "제주공항 강풍 특보".to_string(),
                    link: "https://news.example/1".to_string(),
                }]),
            },
            DigestSection {
                keyword: "제주항공".to_string(),
                items: Some(Vec::new()),
            },
            DigestSection {
                keyword: "항공기 지연".to_string(),
                items: None,
            },
        ];

        assert_eq!(
            format_digest("2026-02-10", &sections),
            "📰 *오늘의 뉴스 브리핑* (2026-02-10)\n\n\
             *[제주공항]*\n• <https://news.example/1|제주공항 강풍 특보>\n\n\
             *[제주항공]*\n• 검색 결과 없음\n\n\
             *[항공기 지연]*\n• 검색 결과 없음"
        );
    }

    #[tokio::test]
    async fn searches_with_credentials_and_encoded_query() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/news.json")
            .match_header("X-Naver-Client-Id", "id")
            .match_header("X-Naver-Client-Secret", "secret")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("query".into(), "항공기 지연".into()),
                Matcher::UrlEncoded("display".into(), "3".into()),
                Matcher::UrlEncoded("sort".into(), "sim".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"total":1,"items":[{"title":"<b>항공기</b> 지연 속출","link":"https://news.example/2","description":"..."}]}"#,
            )
            .create_async()
            .await;

        let client = NewsClient::new(format!("{}/news.json", server.url()), "id", "secret");
        let items = client.search("항공기 지연", 3).await.unwrap();

        assert_eq!(
            items,
            vec![NewsItem {
                title: "항공기 지연 속출".to_string(),
                link: "https://news.example/2".to_string(),
            }]
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn unauthorized_search_is_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/news.json")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{"errorMessage":"Authentication failed"}"#)
            .create_async()
            .await;

        let client = NewsClient::new(format!("{}/news.json", server.url()), "id", "bad");
        assert!(client.search("제주", 5).await.is_err());
    }
}
