//! Exercise the catalog client against the live TMDB API and print results.
//! Usage:
//!   cargo run --bin catalog_probe -- popular [page]
//!   cargo run --bin catalog_probe -- search <query> [page]
//!   cargo run --bin catalog_probe -- details <tmdb_id>
//!   cargo run --bin catalog_probe -- credits <tmdb_id>
//!   cargo run --bin catalog_probe -- recommend <tmdb_id>
//! Requires TMDB_API_KEY in the environment (.env supported).

use anyhow::{bail, Context, Result};
use cinescope::models::MovieSummary;
use cinescope::tmdb::{image_url, CatalogApi, TmdbClient};
use dotenvy::dotenv;
use std::env;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenv();
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(command) = args.first() else {
        bail!("usage: catalog_probe <popular|search|details|credits|recommend> ...");
    };

    let client = TmdbClient::from_env()?;
    match command.as_str() {
        "popular" => {
            let page = parse_page(args.get(1))?;
            print_summaries(&client.popular_movies(page).await);
        }
        "search" => {
            let query = args.get(1).context("search needs a query")?;
            let page = parse_page(args.get(2))?;
            print_summaries(&client.search_movies(query, page).await);
        }
        "details" => {
            let id = args.get(1).context("details needs a TMDB id")?;
            let details = client.movie_details(id).await?;
            println!("{details:#?}");
            if let Some(poster) = details.poster_path.as_deref() {
                println!("poster: {}", image_url(poster));
            }
        }
        "credits" => {
            let id = args.get(1).context("credits needs a TMDB id")?;
            let credits = client.movie_credits(id).await?;
            println!("{credits:#?}");
        }
        "recommend" => {
            let id = args.get(1).context("recommend needs a TMDB id")?;
            print_summaries(&client.recommendations(id).await.results);
        }
        other => bail!("unknown command '{other}'"),
    }
    Ok(())
}

fn parse_page(arg: Option<&String>) -> Result<u32> {
    match arg {
        Some(p) => p.parse().context("page must be a positive integer"),
        None => Ok(1),
    }
}

fn print_summaries(movies: &[MovieSummary]) {
    if movies.is_empty() {
        println!("(no results)");
        return;
    }
    for movie in movies {
        let rating = movie
            .vote_average
            .map(|r| format!("{r:.1}"))
            .unwrap_or_else(|| "-".to_string());
        let released = movie.release_date.as_deref().unwrap_or("-");
        println!("{:>9}  {rating:>4}  {released:>10}  {}", movie.id, movie.title);
    }
}
