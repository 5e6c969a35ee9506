pub mod config;
pub mod local;
pub mod search;
pub mod translate;
pub mod vision;

use colored::*;
use serde::Serialize;

use crate::api::{Endpoint, KakaoClient, PageIterator, Query};
use crate::cli::args::PagingArgs;
use crate::cli::OutputFormat;
use crate::config::Config;
use crate::error::{KakaoError, Result};
use crate::output::{self, Formatter, SaveFormat, Tabular};

/// Build a client from the config file and the `--api-key` override
pub(crate) fn client(api_key: Option<&str>) -> Result<KakaoClient> {
    let config = Config::load()?;
    let client = KakaoClient::new(config.to_client_config(api_key))?;
    if !client.is_configured() {
        return Err(KakaoError::NoApiKey);
    }
    Ok(client)
}

impl PagingArgs {
    /// Apply the options and fail on the first rejected value
    pub(crate) fn apply<E: Endpoint>(&self, mut query: Query<E>) -> Result<Query<E>> {
        if let Some(sort) = &self.sort {
            query = query.sort(sort);
        }
        if let Some(page) = self.page {
            query = query.page(page);
        }
        if let Some(size) = self.size {
            query = query.size(size);
        }
        match query.take_error() {
            Some(err) => Err(err),
            None => Ok(query),
        }
    }
}

/// Fetch one page, or every remaining page with `--all`, then print and save
pub(crate) async fn run_query<E>(query: Query<E>, paging: &PagingArgs, format: OutputFormat) -> Result<()>
where
    E: Endpoint,
    E::Document: Tabular + Serialize,
{
    let save_format = paging
        .output
        .as_deref()
        .map(SaveFormat::from_path)
        .transpose()?;

    let mut query = paging.apply(query)?;
    let pages = if paging.all {
        let pages = query.collect_all().await?;
        if pages.is_empty() {
            eprintln!("{} no page could be fetched", "Warning:".yellow());
        }
        pages
    } else {
        vec![query.next_page().await?]
    };

    if let (Some(path), Some(save_format)) = (&paging.output, save_format) {
        output::save(path, &pages, save_format)?;
        eprintln!("{} {}", "Saved to".green(), path.display());
    }

    println!("{}", Formatter::new(format).format_pages(&pages)?);
    Ok(())
}

/// Print a single-shot result; table and CSV show its rows, JSON and XML the whole value
pub(crate) fn print_lookup<T, D>(format: OutputFormat, value: &T, rows: &[D]) -> Result<()>
where
    T: Serialize,
    D: Tabular + Serialize,
{
    let formatter = Formatter::new(format);
    let out = match format {
        OutputFormat::Table | OutputFormat::Csv => formatter.format_rows(rows)?,
        OutputFormat::Json | OutputFormat::Xml => formatter.format_value(value)?,
    };
    println!("{}", out);
    Ok(())
}
