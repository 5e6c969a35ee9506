use super::{client, run_query};
use crate::cli::args::{SearchArgs, SearchCommand};
use crate::cli::OutputFormat;
use crate::error::Result;

/// Execute search command
pub async fn execute(args: SearchArgs, api_key: Option<&str>, format: OutputFormat) -> Result<()> {
    let client = client(api_key)?;

    match args.command {
        SearchCommand::Web { query, paging } => {
            run_query(client.web_search(&query), &paging, format).await
        }
        SearchCommand::Video { query, paging } => {
            run_query(client.video_search(&query), &paging, format).await
        }
        SearchCommand::Image { query, paging } => {
            run_query(client.image_search(&query), &paging, format).await
        }
        SearchCommand::Blog { query, paging } => {
            run_query(client.blog_search(&query), &paging, format).await
        }
        SearchCommand::Cafe { query, paging } => {
            run_query(client.cafe_search(&query), &paging, format).await
        }
        SearchCommand::Book {
            query,
            target,
            paging,
        } => {
            let mut search = client.book_search(&query);
            if let Some(target) = target {
                search = search.target(&target);
            }
            if let Some(err) = search.take_error() {
                return Err(err);
            }
            run_query(search, &paging, format).await
        }
    }
}
