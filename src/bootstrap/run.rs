//! Headless runner: print the first page of a list.

use std::time::Duration;

use fd_app::list_page::pages;
use fd_app::{App, ListPageConfig, ListPageState, QueryError};
use fd_core::crm::{Customer, Engagement, EngagementLetter, Partner, Proposal};
use fd_core::{AppConfig, Entity, Record};
use tracing::{info, warn};

use super::wiring::wire_dependencies;

/// What to list and how to narrow it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListRequest {
    /// Resource path, e.g. `customers` or `engagement-letters`.
    pub resource: String,
    pub search: Option<String>,
    pub page: usize,
}

impl ListRequest {
    /// `firmdesk [resource] [search] [page]`
    ///
    /// An empty search means none. A missing, malformed or zero page is page 1.
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Self {
        let mut args = args.into_iter();
        let resource = args.next().unwrap_or_else(|| "customers".to_string());
        let search = args.next().filter(|term| !term.trim().is_empty());
        let page = args
            .next()
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|page| *page >= 1)
            .unwrap_or(1);
        Self {
            resource,
            search,
            page,
        }
    }
}

pub async fn run(config: AppConfig, request: ListRequest) -> anyhow::Result<()> {
    let wired = wire_dependencies(&config)?;
    let app = App::new(wired.deps);

    let cache = wired.cache.clone();
    let gc_every = Duration::from_secs(config.cache.gc_time_secs.max(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(gc_every);
        loop {
            ticker.tick().await;
            cache.collect_garbage();
        }
    });

    let page_size = config.list.default_page_size;
    match request.resource.as_str() {
        "customers" => print_page::<Customer>(&app, pages::customers(page_size), &request).await,
        "partners" => print_page::<Partner>(&app, pages::partners(page_size), &request).await,
        "proposals" => print_page::<Proposal>(&app, pages::proposals(page_size), &request).await,
        "engagement-letters" => {
            print_page::<EngagementLetter>(&app, pages::engagement_letters(page_size), &request)
                .await
        }
        "engagements" => {
            print_page::<Engagement>(&app, pages::engagements(page_size), &request).await
        }
        other => anyhow::bail!("unknown resource: {other}"),
    }
}

async fn print_page<E: Entity>(
    app: &App,
    config: ListPageConfig,
    request: &ListRequest,
) -> anyhow::Result<()>
where
    fd_app::AppDeps: fd_app::deps::ApiFor<E>,
{
    let result = app.queries::<E>().ensure_collection().await;
    if let Some(error) = &result.error {
        warn!(error = %error, "Showing cached data after a failed fetch");
        if result.data.is_none() {
            anyhow::bail!("{}", error.user_message());
        }
    }
    let items = result.data.unwrap_or_default();

    let mut page: ListPageState<E> = app.list_page(config);
    if let Some(term) = &request.search {
        page.set_search(term.clone());
    }
    page.set_page(request.page);
    let view = page.view(&items);
    info!(
        resource = %E::RESOURCE,
        total = view.total_records,
        page = view.page,
        pages = view.page_count,
        "Rendering list"
    );

    if let Some(banner) = error_banner(result.error.as_ref()) {
        println!("{banner}");
    }
    let columns = page.visible_columns();
    println!("{}", render_header(&columns, page.columns()));
    for row in &view.rows {
        println!("{}", render_row(row, &columns));
    }
    println!(
        "-- page {}/{} ({} records)",
        view.page,
        view.page_count.max(1),
        view.total_records
    );
    Ok(())
}

/// Inline notice shown above a table that holds cached rows after a failed
/// refresh.
fn error_banner(error: Option<&QueryError>) -> Option<String> {
    error.map(|error| format!("!! {} (showing cached data)", error.user_message()))
}

fn render_header(columns: &[String], layout: &fd_core::list::ColumnLayout) -> String {
    columns
        .iter()
        .map(|accessor| {
            layout
                .definition(accessor)
                .map(|d| d.title.clone())
                .unwrap_or_else(|| accessor.clone())
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

fn render_row<R: Record>(row: &R, columns: &[String]) -> String {
    columns
        .iter()
        .map(|accessor| row.field(accessor).display_text())
        .collect::<Vec<_>>()
        .join(" | ")
}
