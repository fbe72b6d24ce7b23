//! World-store client over the hosted PostgREST API.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::infrastructure::config::{ConfigError, CredentialTier, StoreConfig};
use crate::infrastructure::ports::{
    CompareOp, Filter, Ordering, RepoError, SortDirection, TablePatch, TableQuery, TableStore,
};

/// Accept header that makes the store reject anything but exactly one row.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Authenticated handle to the world store.
///
/// Holds nothing beyond the endpoint and the credential baked into its
/// default headers. Build one per process or per script run and pass it
/// where it is needed.
#[derive(Clone)]
pub struct RestStore {
    client: Client,
    base_url: Url,
    tier: CredentialTier,
}

impl RestStore {
    /// Client factory. Fails before any request if the credential cannot be
    /// used as a header or the HTTP client cannot be built.
    pub fn new(config: StoreConfig) -> Result<Self, ConfigError> {
        let key_var = config.tier.key_var();
        let invalid_key = |message: String| ConfigError::Invalid {
            var: key_var,
            message,
        };

        let mut apikey =
            HeaderValue::from_str(&config.key).map_err(|e| invalid_key(e.to_string()))?;
        apikey.set_sensitive(true);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", config.key))
            .map_err(|e| invalid_key(e.to_string()))?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("apikey", apikey);
        headers.insert(AUTHORIZATION, bearer);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ConfigError::Invalid {
                var: "http client",
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url,
            tier: config.tier,
        })
    }

    /// Build from environment variables for the given tier.
    pub fn from_env(tier: CredentialTier) -> Result<Self, ConfigError> {
        Self::new(StoreConfig::from_env(tier)?)
    }

    pub fn tier(&self) -> CredentialTier {
        self.tier
    }

    fn table_url(&self, table: &str) -> Result<Url, RepoError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RepoError::database("table_url", "store URL cannot be a base"))?
            .pop_if_empty()
            .extend(["rest", "v1", table]);
        Ok(url)
    }
}

#[async_trait]
impl TableStore for RestStore {
    async fn select(&self, query: &TableQuery) -> Result<Vec<Value>, RepoError> {
        let url = self.table_url(&query.table)?;
        tracing::debug!(
            table = %query.table,
            filters = query.filters.len(),
            limit = ?query.limit,
            single = query.expect_single,
            tier = %self.tier,
            "Selecting rows"
        );

        let mut request = self.client.get(url).query(&select_params(query));
        if query.expect_single {
            request = request.header(ACCEPT, SINGLE_OBJECT);
        }

        let response = request
            .send()
            .await
            .map_err(|e| RepoError::database("select", e))?;

        if !response.status().is_success() {
            return Err(store_error(&query.table, response).await);
        }

        if query.expect_single {
            let row: Value = response
                .json()
                .await
                .map_err(RepoError::serialization)?;
            Ok(vec![row])
        } else {
            response
                .json::<Vec<Value>>()
                .await
                .map_err(RepoError::serialization)
        }
    }

    async fn update(&self, patch: &TablePatch) -> Result<Vec<Value>, RepoError> {
        if !patch.is_targeted() {
            return Err(RepoError::constraint(format!(
                "refusing to update {} without an equality filter",
                patch.table
            )));
        }

        let url = self.table_url(&patch.table)?;
        tracing::debug!(
            table = %patch.table,
            columns = ?patch.values.keys().collect::<Vec<_>>(),
            tier = %self.tier,
            "Updating rows"
        );

        let params: Vec<(String, String)> = patch.filters.iter().map(filter_param).collect();
        let response = self
            .client
            .patch(url)
            .query(&params)
            .header("Prefer", "return=representation")
            .json(&patch.values)
            .send()
            .await
            .map_err(|e| RepoError::database("update", e))?;

        if !response.status().is_success() {
            return Err(store_error(&patch.table, response).await);
        }

        response
            .json::<Vec<Value>>()
            .await
            .map_err(RepoError::serialization)
    }
}

// =============================================================================
// Query encoding
// =============================================================================

/// Query-string pairs for a read.
pub(crate) fn select_params(query: &TableQuery) -> Vec<(String, String)> {
    let mut params = Vec::with_capacity(query.filters.len() + 3);

    let select = if query.columns.is_empty() {
        "*".to_string()
    } else {
        query.columns.join(",")
    };
    params.push(("select".to_string(), select));
    params.extend(query.filters.iter().map(filter_param));

    if !query.order.is_empty() {
        let order = query
            .order
            .iter()
            .map(order_term)
            .collect::<Vec<_>>()
            .join(",");
        params.push(("order".to_string(), order));
    }

    if let Some(limit) = query.limit {
        params.push(("limit".to_string(), limit.to_string()));
    }

    params
}

pub(crate) fn filter_param(filter: &Filter) -> (String, String) {
    let value = match filter {
        Filter::Compare { op, value, .. } => format!("{}.{}", compare_op(*op), value),
        Filter::Pattern {
            pattern,
            case_insensitive,
            ..
        } => {
            let op = if *case_insensitive { "ilike" } else { "like" };
            format!("{op}.{pattern}")
        }
        Filter::In { values, .. } => {
            let items = values
                .iter()
                .map(|v| quote_list_item(v.as_str()))
                .collect::<Vec<_>>()
                .join(",");
            format!("in.({items})")
        }
        Filter::IsNull { .. } => "is.null".to_string(),
    };
    (filter.column().to_string(), value)
}

fn compare_op(op: CompareOp) -> &'static str {
    match op {
        CompareOp::Eq => "eq",
        CompareOp::Neq => "neq",
        CompareOp::Gt => "gt",
        CompareOp::Gte => "gte",
        CompareOp::Lt => "lt",
        CompareOp::Lte => "lte",
    }
}

fn order_term(order: &Ordering) -> String {
    let direction = match order.direction {
        SortDirection::Ascending => "asc",
        SortDirection::Descending => "desc",
    };
    if order.nulls_last {
        format!("{}.{}.nullslast", order.column, direction)
    } else {
        format!("{}.{}", order.column, direction)
    }
}

/// Items of an `in.(...)` list that contain reserved characters must be
/// double-quoted, with `"` and `\` escaped.
fn quote_list_item(value: &str) -> String {
    let reserved = value.is_empty()
        || value
            .chars()
            .any(|c| matches!(c, ',' | '(' | ')' | '"' | '\\' | ':' | '.') || c.is_whitespace());
    if !reserved {
        return value.to_string();
    }
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

// =============================================================================
// Error decoding
// =============================================================================

#[derive(Debug, Deserialize)]
struct StoreErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<String>,
    #[serde(default)]
    hint: Option<String>,
}

async fn store_error(table: &str, response: Response) -> RepoError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    let body = serde_json::from_str::<StoreErrorBody>(&text).ok();
    let (code, message, details, hint) = match body {
        Some(body) => (body.code, body.message, body.details, body.hint),
        None => (None, None, None, None),
    };

    let message = message
        .or_else(|| (!text.trim().is_empty()).then(|| text.trim().to_string()))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());

    tracing::warn!(
        table,
        status = status.as_u16(),
        code = ?code,
        message = %message,
        "Store rejected request"
    );

    RepoError::Query {
        table: table.to_string(),
        status: status.as_u16(),
        code,
        message,
        details,
        hint,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn store_for(server: &MockServer, tier: CredentialTier) -> RestStore {
        let config = StoreConfig::new(Some(&server.uri()), Some("test-key"), tier).unwrap();
        RestStore::new(config).unwrap()
    }

    #[test]
    fn encodes_select_with_filters_order_and_limit() {
        let query = TableQuery::on("locations")
            .columns(["id", "slug", "name"])
            .eq("type", "town")
            .ilike("name", "*river*")
            .within("slug", ["old_mill", "north gate"])
            .filter(Filter::IsNull {
                column: "map_x".into(),
            })
            .order_by("name", SortDirection::Ascending)
            .limit(10);

        let params = select_params(&query);
        assert_eq!(
            params,
            vec![
                ("select".to_string(), "id,slug,name".to_string()),
                ("type".to_string(), "eq.town".to_string()),
                ("name".to_string(), "ilike.*river*".to_string()),
                ("slug".to_string(), "in.(old_mill,\"north gate\")".to_string()),
                ("map_x".to_string(), "is.null".to_string()),
                ("order".to_string(), "name.asc".to_string()),
                ("limit".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn encodes_nulls_last_ordering() {
        let query = TableQuery::on("locations")
            .order_by("map_x", SortDirection::Descending)
            .nulls_last()
            .order_by("name", SortDirection::Ascending);
        let params = select_params(&query);
        assert_eq!(
            params[1],
            ("order".to_string(), "map_x.desc.nullslast,name.asc".to_string())
        );
    }

    #[test]
    fn selects_all_columns_by_default() {
        let params = select_params(&TableQuery::on("nations"));
        assert_eq!(params, vec![("select".to_string(), "*".to_string())]);
    }

    #[test]
    fn quotes_reserved_list_items() {
        assert_eq!(quote_list_item("plain"), "plain");
        assert_eq!(quote_list_item("a,b"), "\"a,b\"");
        assert_eq!(quote_list_item("say \"hi\""), "\"say \\\"hi\\\"\"");
    }

    #[tokio::test]
    async fn select_sends_credentials_and_returns_rows() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/world_history"))
            .and(header("apikey", "test-key"))
            .and(header("authorization", "Bearer test-key"))
            .and(query_param("select", "*"))
            .and(query_param("order", "occured_at.desc"))
            .and(query_param("limit", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 2, "occured_at": "2025-01-02T00:00:00+00:00"},
                {"id": 1, "occured_at": "2025-01-01T00:00:00+00:00"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let store = store_for(&server, CredentialTier::Service);
        let rows = store
            .select(
                &TableQuery::on("world_history")
                    .order_by("occured_at", SortDirection::Descending)
                    .limit(2),
            )
            .await
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["id"], json!(2));
    }

    #[tokio::test]
    async fn empty_result_is_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/items"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let store = store_for(&server, CredentialTier::Anon);
        let rows = store.select(&TableQuery::on("items")).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn single_row_mismatch_surfaces_store_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/npcs"))
            .and(header("accept", SINGLE_OBJECT))
            .and(query_param("slug", "eq.ghost"))
            .respond_with(ResponseTemplate::new(406).set_body_json(json!({
                "code": "PGRST116",
                "message": "JSON object requested, multiple (or no) rows returned",
                "details": "The result contains 0 rows",
                "hint": null
            })))
            .mount(&server)
            .await;

        let store = store_for(&server, CredentialTier::Service);
        let err = store
            .select(&TableQuery::on("npcs").eq("slug", "ghost").single())
            .await
            .unwrap_err();

        match err {
            RepoError::Query {
                status,
                code,
                details,
                ..
            } => {
                assert_eq!(status, 406);
                assert_eq!(code.as_deref(), Some("PGRST116"));
                assert_eq!(details.as_deref(), Some("The result contains 0 rows"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn single_row_is_wrapped_in_vec() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/npcs"))
            .and(header("accept", SINGLE_OBJECT))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "slug": "merchant", "name": "Merchant", "image": null
            })))
            .mount(&server)
            .await;

        let store = store_for(&server, CredentialTier::Service);
        let rows = store
            .select(&TableQuery::on("npcs").eq("slug", "merchant").single())
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["slug"], json!("merchant"));
    }

    #[tokio::test]
    async fn non_json_error_body_is_kept_as_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let store = store_for(&server, CredentialTier::Service);
        let err = store.select(&TableQuery::on("nations")).await.unwrap_err();
        match err {
            RepoError::Query {
                status, message, ..
            } => {
                assert_eq!(status, 502);
                assert_eq!(message, "upstream down");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn update_patches_matching_rows_and_returns_them() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/rest/v1/npcs"))
            .and(query_param("slug", "eq.merchant"))
            .and(header("prefer", "return=representation"))
            .and(body_json(json!({"image": "/images/npcs/merchant.png"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"slug": "merchant", "name": "Merchant", "image": "/images/npcs/merchant.png"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let store = store_for(&server, CredentialTier::Service);
        let patch = TablePatch::new("npcs")
            .set("image", "/images/npcs/merchant.png")
            .eq("slug", "merchant");
        let rows = store.update(&patch).await.unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn untargeted_update_never_reaches_the_store() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&server)
            .await;

        let store = store_for(&server, CredentialTier::Service);
        let patch = TablePatch::new("npcs").set("image", "/x.png");
        let err = store.update(&patch).await.unwrap_err();
        assert!(matches!(err, RepoError::ConstraintViolation(_)));
    }

    #[test]
    fn key_with_newline_is_rejected_at_construction() {
        let config = StoreConfig::new(
            Some("https://db.example.co"),
            Some("bad\nkey"),
            CredentialTier::Anon,
        )
        .unwrap();
        let err = RestStore::new(config).err().unwrap();
        assert!(matches!(err, ConfigError::Invalid { var: "SUPABASE_ANON_KEY", .. }));
    }
}
