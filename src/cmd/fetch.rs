use crate::{
    client::BookmarkQuery,
    errors::LinkdownError,
    render::{Helpers, RenderContext, Renderer},
    utils, Bookmark, Client, Config, Fetch,
};
use chrono::Utc;
use log::{debug, info, trace, warn};
use std::{
    io::{self, Write},
    path::Path,
};

/// Fetch bookmarks from linkding and render them as markdown.
pub async fn fetch(config: &Config) -> Result<(), anyhow::Error> {
    debug!("{config:?}");

    // Compile the template first so a broken template fails before any request.
    let helpers = Helpers::default();
    let renderer = match &config.template {
        Some(template) => Renderer::from_file(template, &helpers)?,
        None => Renderer::with_default_template(&helpers)?,
    };

    let client = Client::new(&config.client)?;
    info!("Fetching bookmarks from {}", client.endpoint());
    log_window(&config.query);

    let bookmarks = fetch_bookmarks(&client, &config.query).await?;

    let context = RenderContext::new(bookmarks, config.render_options.clone(), Utc::now())?;
    write_bookmarks(&renderer, &context, config.output.as_deref())?;

    Ok(())
}

/// Fetch all bookmarks matching `query`.
pub async fn fetch_bookmarks(
    client: &impl Fetch,
    query: &BookmarkQuery,
) -> Result<Vec<Bookmark>, LinkdownError> {
    let bookmarks = client.fetch_all(query).await?;

    if bookmarks.is_empty() {
        warn!("No bookmarks found");
    } else {
        info!("Fetched {} bookmarks", bookmarks.len());
    }

    trace!("Fetched bookmarks: {bookmarks:#?}");

    Ok(bookmarks)
}

/// Render the bookmarks to `output`, or to stdout if no output is given.
pub fn write_bookmarks(
    renderer: &Renderer,
    context: &RenderContext,
    output: Option<&Path>,
) -> Result<(), LinkdownError> {
    match output {
        Some(output) => {
            utils::write_atomically(output, |writer| renderer.render(context, writer))?;
            info!("Wrote {} bookmarks to {}", context.bookmarks().len(), output.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            renderer.render(context, &mut stdout)?;
            stdout.flush().map_err(LinkdownError::Output)?;
        }
    }

    Ok(())
}

fn log_window(query: &BookmarkQuery) {
    match query.added_since {
        Some(added_since) => info!("Added since {}", added_since.format("%Y-%m-%d %H:%M UTC")),
        None => info!("Added since the beginning"),
    }

    if let Some(modified_since) = query.modified_since {
        info!("Modified since {}", modified_since.format("%Y-%m-%d"));
    }

    if !query.query.is_empty() {
        info!("Query: {}", query.query);
    }
}
