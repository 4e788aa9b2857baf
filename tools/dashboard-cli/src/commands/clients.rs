//! Client list with search, status filter and sort.

use std::sync::Arc;

use anyhow::{bail, Context as _, Result};
use dashboard_data::{SafeFetch, SubscribeOptions, SubscriptionId};
use dashboard_domain::prelude::*;

use super::ClientsArgs;
use crate::context::Context;
use crate::listing::Listing;
use crate::scenario::{scenario_producer, Scenario};

/// Run the clients command.
pub async fn run(args: ClientsArgs, ctx: &Context) -> Result<()> {
    let query = build_query(&args)?;
    ctx.config
        .fetch
        .validate()
        .context("Invalid [fetch] configuration")?;

    let store = Arc::new(MockStore::seeded()?);
    let options = SubscribeOptions::new(ctx.config.fetch.clone())
        .with_id(SubscriptionId::from_string("clients"));
    let fetch = SafeFetch::subscribe_with(
        scenario_producer(Scenario::Ok, move || store.clients()),
        (),
        options,
    );

    let state = fetch
        .watch()
        .wait_for(|state| state.is_settled())
        .await
        .context("Client subscription closed before loading")?
        .clone();
    fetch.unsubscribe();

    if let Some(error) = state.error {
        bail!("Failed to load clients: {}", error);
    }

    let clients = query.apply(&state.data_or_default());

    if ctx.output.is_json() {
        ctx.output.json(&clients);
        return Ok(());
    }

    ctx.output.header("Clients");
    if clients.is_empty() {
        ctx.output.info("No clients match.");
        return Ok(());
    }
    ctx.output.table(<Vec<Client>>::headers(), &clients.rows());
    ctx.output.info("");
    ctx.output.info(&format!("Total: {} client(s)", clients.count()));

    Ok(())
}

fn build_query(args: &ClientsArgs) -> Result<ClientQuery> {
    let mut query = ClientQuery::new();
    if let Some(ref text) = args.search {
        query = query.text(text.as_str());
    }
    if let Some(ref status) = args.status {
        query = query.status(ClientStatus::parse(status)?);
    }
    let direction = if args.desc {
        SortDirection::Desc
    } else {
        SortDirection::Asc
    };
    Ok(query.sort(ClientSort::parse(&args.sort)?, direction))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(search: Option<&str>, status: Option<&str>, sort: &str, desc: bool) -> ClientsArgs {
        ClientsArgs {
            search: search.map(str::to_string),
            status: status.map(str::to_string),
            sort: sort.to_string(),
            desc,
        }
    }

    #[test]
    fn test_query_by_spend_descending() {
        let query = build_query(&args(None, None, "spent", true)).unwrap();
        let clients = query.apply(&MockStore::seeded().unwrap().clients());
        assert_eq!(clients[0].id.as_str(), "cli-1");
        assert_eq!(clients.last().unwrap().id.as_str(), "cli-4");
    }

    #[test]
    fn test_query_search_and_status() {
        let query = build_query(&args(Some("deli"), Some("inactive"), "name", false)).unwrap();
        let clients = query.apply(&MockStore::seeded().unwrap().clients());
        assert_eq!(clients.len(), 1);
        assert_eq!(clients[0].name, "Lucas Meyer");
    }

    #[test]
    fn test_unknown_sort_is_rejected() {
        let err = build_query(&args(None, None, "shoe-size", false)).unwrap_err();
        assert!(err.to_string().contains("shoe-size"));
    }
}
