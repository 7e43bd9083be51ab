use std::sync::Arc;

use async_graphql::{Context, EmptyMutation, EmptySubscription, Object, Schema, SimpleObject};
use card::{BuildOptions, ContactOption, SlugResolver, Theme, View, render};
use entity::{Directory, Language};
use serde::Serialize;
use tracing::instrument;

pub type SchemaType = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

#[derive(Clone)]
pub struct GraphqlData {
    pub directory: Arc<Directory>,
    pub theme: Arc<Theme>,
    pub build_options: BuildOptions,
}

pub fn build_schema(data: GraphqlData) -> SchemaType {
    Schema::build(QueryRoot, EmptyMutation, EmptySubscription)
        .data(data)
        .finish()
}

#[derive(Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    #[instrument(name = "graphql.health", skip_all)]
    async fn health(&self) -> HealthPayload {
        HealthPayload { ok: true }
    }

    #[instrument(name = "graphql.version", skip_all)]
    async fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    /// Slugs of every profile in the directory.
    #[instrument(name = "graphql.employees", skip_all)]
    async fn employees(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<String>> {
        let data = ctx.data::<GraphqlData>()?;
        Ok(data.directory.slugs().map(str::to_string).collect())
    }

    /// Localized card data; `null` for unknown slugs. Unsupported languages fall back to `es`.
    #[instrument(name = "graphql.card", skip(self, ctx))]
    async fn card(
        &self,
        ctx: &Context<'_>,
        slug: String,
        language: Option<String>,
    ) -> async_graphql::Result<Option<CardPayload>> {
        let data = ctx.data::<GraphqlData>()?;
        let language = Language::from_code_or_default(language.as_deref());
        let employee = SlugResolver::new(&data.directory).resolve(Some(&slug));
        let view = render(employee, language, &data.theme, &data.build_options);
        Ok(match view {
            View::Card(card) => Some(CardPayload {
                slug: card.slug,
                name: card.name,
                page_title: card.page_title,
                language: card.language.code().to_string(),
                title: card.title,
                company: card.company,
                photo: card.photo,
                initials: card.initials,
                options: card.options.iter().map(OptionPayload::from).collect(),
                vcard_url: card.save_contact.href,
                schedule_url: card.schedule.map(|link| link.href),
            }),
            View::NotFound(_) => None,
        })
    }
}

#[derive(Clone, Debug, SimpleObject, Serialize)]
pub struct HealthPayload {
    pub ok: bool,
}

#[derive(Clone, Debug, SimpleObject)]
pub struct CardPayload {
    pub slug: String,
    pub name: String,
    pub page_title: String,
    pub language: String,
    pub title: String,
    pub company: String,
    pub photo: Option<String>,
    pub initials: String,
    pub options: Vec<OptionPayload>,
    pub vcard_url: String,
    pub schedule_url: Option<String>,
}

#[derive(Clone, Debug, SimpleObject)]
pub struct OptionPayload {
    pub action: String,
    pub analytics_action: String,
    pub href: String,
    pub label: String,
    pub aria_label: String,
    pub target: Option<String>,
    pub rel: Option<String>,
}

impl From<&ContactOption> for OptionPayload {
    fn from(option: &ContactOption) -> Self {
        Self {
            action: option.action.as_str().to_string(),
            analytics_action: option.action_id().to_string(),
            href: option.href.clone(),
            label: option.label.to_string(),
            aria_label: option.aria_label.clone(),
            target: option.hints.map(|hints| hints.target.to_string()),
            rel: option.hints.map(|hints| hints.rel.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_graphql::Request;
    use serde_json::json;

    fn schema() -> SchemaType {
        build_schema(GraphqlData {
            directory: Arc::new(Directory::builtin().clone()),
            theme: Arc::new(Theme::default()),
            build_options: BuildOptions::default(),
        })
    }

    #[tokio::test]
    async fn health_query_returns_ok() {
        let response = schema().execute(Request::new("{ health { ok } }")).await;
        assert!(response.errors.is_empty());
        let body = response.data.into_json().unwrap();
        assert_eq!(body, json!({"health": {"ok": true}}));
    }

    #[tokio::test]
    async fn card_query_returns_localized_options() {
        let query = r#"{ card(slug: "eugenio-andreone", language: "en") {
            name pageTitle title options { action href target } scheduleUrl vcardUrl
        } }"#;
        let response = schema().execute(Request::new(query)).await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);
        let body = response.data.into_json().unwrap();
        let card = &body["card"];
        assert_eq!(card["name"], "Eugenio Andreone");
        assert_eq!(card["pageTitle"], "Eugenio Andreone - SolwareID");
        assert_eq!(card["title"], "Production Engineer");
        assert_eq!(card["vcardUrl"], "/vcf/eugenio-andreone.vcf");
        let actions: Vec<_> = card["options"]
            .as_array()
            .unwrap()
            .iter()
            .map(|option| option["action"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(actions, vec!["email", "whatsapp", "linkedin", "website"]);
        assert_eq!(card["options"][0]["target"], json!(null));
        assert_eq!(card["options"][1]["target"], "_blank");
    }

    #[tokio::test]
    async fn unknown_slug_is_null() {
        let response = schema()
            .execute(Request::new(r#"{ card(slug: "nobody") { name } }"#))
            .await;
        assert!(response.errors.is_empty());
        assert_eq!(response.data.into_json().unwrap(), json!({"card": null}));
    }

    #[tokio::test]
    async fn employees_lists_slugs() {
        let response = schema().execute(Request::new("{ employees }")).await;
        let body = response.data.into_json().unwrap();
        assert_eq!(body, json!({"employees": ["eugenio-andreone"]}));
    }
}
