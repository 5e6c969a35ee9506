use colored::*;

use super::{client, print_lookup, run_query};
use crate::api::local::PlaceFilter;
use crate::api::types::CategoryGroup;
use crate::api::Query;
use crate::cli::args::{AreaArgs, LocalArgs, LocalCommand};
use crate::cli::OutputFormat;
use crate::error::Result;

/// Execute local command
pub async fn execute(args: LocalArgs, api_key: Option<&str>, format: OutputFormat) -> Result<()> {
    if let LocalCommand::Categories = args.command {
        for group in CategoryGroup::ALL {
            println!("{}  {}", group.as_str().cyan(), group.display_name());
        }
        return Ok(());
    }

    let client = client(api_key)?;

    match args.command {
        LocalCommand::Address {
            query,
            analyze_type,
            paging,
        } => {
            let mut search = client.address_search(&query);
            if let Some(analyze_type) = analyze_type {
                search = search.analyze_type(&analyze_type);
            }
            run_query(search, &paging, format).await
        }
        LocalCommand::Keyword {
            query,
            category,
            area,
            paging,
        } => {
            let mut search = client.keyword_search(&query);
            if let Some(category) = category {
                search = search.category(&category);
            }
            run_query(with_area(search, &area), &paging, format).await
        }
        LocalCommand::Category { code, area, paging } => {
            run_query(with_area(client.category_search(&code), &area), &paging, format).await
        }
        LocalCommand::Categories => Ok(()),
        LocalCommand::Region {
            x,
            y,
            input_coord,
            output_coord,
        } => {
            let mut request = client.coord_to_region(x, y);
            if let Some(system) = input_coord {
                request = request.input_coord(&system);
            }
            if let Some(system) = output_coord {
                request = request.output_coord(&system);
            }
            let result = request.send().await?;
            print_lookup(format, &result, &result.documents)
        }
        LocalCommand::AddressOf { x, y, input_coord } => {
            let mut request = client.coord_to_address(x, y);
            if let Some(system) = input_coord {
                request = request.input_coord(&system);
            }
            let result = request.send().await?;
            print_lookup(format, &result, &result.documents)
        }
        LocalCommand::Transcoord { x, y, to, from } => {
            let mut request = client.transform_coord(x, y, &to);
            if let Some(system) = from {
                request = request.input_coord(&system);
            }
            let result = request.send().await?;
            print_lookup(format, &result, &result.documents)
        }
    }
}

/// Apply center, radius and rect; rejected values surface when the query runs
fn with_area<E: PlaceFilter>(mut query: Query<E>, area: &AreaArgs) -> Query<E> {
    if let (Some(x), Some(y)) = (area.x, area.y) {
        query = query.center(x, y);
    }
    if let Some(radius) = area.radius {
        query = query.radius(radius);
    }
    if let Some([min_x, min_y, max_x, max_y]) = area.rect.as_deref() {
        query = query.rect(*min_x, *min_y, *max_x, *max_y);
    }
    query
}
