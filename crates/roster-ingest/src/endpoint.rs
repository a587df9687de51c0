//! Endpoint templates and payload acceptance per source kind.

use roster_model::{FetchOptions, Organization, SourceKind};

use crate::error::{FetchError, Result};

/// Which organization identifier an endpoint is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKey {
    Slug,
    InternalId,
}

/// One URL template, relative to the source's base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub name: &'static str,
    pub key: EndpointKey,
    path: &'static str,
}

const PRIMARY_ENDPOINTS: &[Endpoint] = &[
    Endpoint {
        name: "depth_chart",
        key: EndpointKey::Slug,
        path: "depth/_/name/{key}",
    },
    Endpoint {
        name: "roster_page",
        key: EndpointKey::Slug,
        path: "roster/_/name/{key}",
    },
];

const SECONDARY_ENDPOINTS: &[Endpoint] = &[
    Endpoint {
        name: "roster_api_by_id",
        key: EndpointKey::InternalId,
        path: "{key}/roster",
    },
    Endpoint {
        name: "roster_api_by_slug",
        key: EndpointKey::Slug,
        path: "{key}/roster",
    },
];

/// Endpoints tried in order for `kind`.
pub fn endpoints(kind: SourceKind) -> &'static [Endpoint] {
    match kind {
        SourceKind::Primary => PRIMARY_ENDPOINTS,
        SourceKind::Secondary => SECONDARY_ENDPOINTS,
    }
}

impl Endpoint {
    pub fn url(
        &self,
        kind: SourceKind,
        organization: &Organization,
        options: &FetchOptions,
    ) -> String {
        let base = match kind {
            SourceKind::Primary => options.primary_base_url.as_str(),
            SourceKind::Secondary => options.secondary_base_url.as_str(),
        };
        let key = match self.key {
            EndpointKey::Slug => organization.slug,
            EndpointKey::InternalId => organization.internal_id,
        };
        format!(
            "{}/{}",
            base.trim_end_matches('/'),
            self.path.replace("{key}", key)
        )
    }
}

/// Check that a successful response carries a document of the expected kind.
pub fn accept(kind: SourceKind, url: &str, body: &str) -> Result<()> {
    if body.trim().is_empty() {
        return Err(FetchError::EmptyBody {
            url: url.to_string(),
        });
    }
    match kind {
        SourceKind::Primary => {
            if body.to_ascii_lowercase().contains("<table") {
                Ok(())
            } else {
                Err(FetchError::Malformed {
                    url: url.to_string(),
                    reason: "no <table> element".to_string(),
                })
            }
        }
        SourceKind::Secondary => serde_json::from_str::<serde_json::Value>(body)
            .map(|_| ())
            .map_err(|err| FetchError::Malformed {
                url: url.to_string(),
                reason: format!("invalid JSON: {err}"),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_model::Catalog;

    #[test]
    fn urls_follow_templates() {
        let options = FetchOptions::default();
        let org = Catalog::standard().get("WSH").copied().unwrap();
        let primary: Vec<String> = endpoints(SourceKind::Primary)
            .iter()
            .map(|endpoint| endpoint.url(SourceKind::Primary, &org, &options))
            .collect();
        assert_eq!(
            primary,
            vec![
                "https://www.espn.com/nfl/team/depth/_/name/was",
                "https://www.espn.com/nfl/team/roster/_/name/was",
            ]
        );
        let secondary =
            endpoints(SourceKind::Secondary)[0].url(SourceKind::Secondary, &org, &options);
        assert_eq!(
            secondary,
            "https://site.api.espn.com/apis/site/v2/sports/football/nfl/teams/28/roster"
        );
    }

    #[test]
    fn acceptance_depends_on_source() {
        assert!(accept(SourceKind::Primary, "u", "<html><TABLE></TABLE></html>").is_ok());
        assert!(matches!(
            accept(SourceKind::Primary, "u", "<html></html>"),
            Err(FetchError::Malformed { .. })
        ));
        assert!(accept(SourceKind::Secondary, "u", r#"{"athletes":[]}"#).is_ok());
        assert!(matches!(
            accept(SourceKind::Secondary, "u", "<html>"),
            Err(FetchError::Malformed { .. })
        ));
        assert!(matches!(
            accept(SourceKind::Secondary, "u", "  "),
            Err(FetchError::EmptyBody { .. })
        ));
    }
}
