use anyhow::{anyhow, bail, Context};
use clap::Parser;
use nt_content::{html_to_text, init_logging, ContentClient, HttpImageSource};
use nt_core::{ArticleSource, ContentConfig, ImageSource, LoadingState};
use nt_feed::{ArticleDetail, ArticleList};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about = "Browse the newest articles from the content API", long_about = None)]
pub struct Cli {
    /// JSON file with base_url, api_key and page_size
    #[arg(long, env = "NT_CONFIG", global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    base_url: Option<String>,
    #[arg(long, global = true)]
    api_key: Option<String>,
    #[arg(long, global = true)]
    page_size: Option<u32>,
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// List the newest articles
    List {
        /// Number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Show one article from the list
    Show {
        /// Position in the list, starting at 0
        index: usize,
        /// Load at most this many pages while looking for the article
        #[arg(long, default_value_t = 5)]
        pages: u32,
        /// Write the article image to this file
        #[arg(long)]
        image_out: Option<PathBuf>,
    },
}

impl Cli {
    /// File, then environment, then flags.
    fn content_config(&self) -> anyhow::Result<ContentConfig> {
        self.content_config_with(|key| std::env::var(key).ok())
    }

    fn content_config_with<F>(&self, lookup: F) -> anyhow::Result<ContentConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match &self.config {
            Some(path) => ContentConfig::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => ContentConfig::default(),
        };
        config = config.merge_vars(lookup)?;

        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(api_key) = &self.api_key {
            config.api_key = api_key.clone();
        }
        if let Some(page_size) = self.page_size {
            config.page_size = page_size;
        }
        config.validate()?;
        Ok(config)
    }
}

fn ensure_loaded(list: &ArticleList) -> anyhow::Result<()> {
    if let LoadingState::Error(message) = list.loading_state() {
        bail!("Failed to load articles: {}", message);
    }
    Ok(())
}

async fn load_pages(list: &ArticleList, pages: u32) -> anyhow::Result<()> {
    list.fetch_first_page().await;
    ensure_loaded(list)?;
    while list.current_page() < pages && list.load_more().await {
        ensure_loaded(list)?;
    }
    Ok(())
}

async fn list_articles(list: &ArticleList, pages: u32) -> anyhow::Result<()> {
    load_pages(list, pages).await?;

    let snapshot = list.snapshot();
    for (index, article) in snapshot.articles.iter().enumerate() {
        println!(
            "{:>4}  {:<28}  [{}]  {}",
            index,
            list.formatted_date(article),
            article.section_name,
            article.title()
        );
    }
    if snapshot.has_more_pages {
        info!(page = snapshot.current_page, "More articles are available, use --pages to load them");
    }
    Ok(())
}

async fn show_article(
    list: &ArticleList,
    index: usize,
    max_pages: u32,
    image_out: Option<PathBuf>,
) -> anyhow::Result<()> {
    list.fetch_first_page().await;
    ensure_loaded(list)?;
    while list.article_count() <= index && list.current_page() < max_pages && list.load_more().await {
        ensure_loaded(list)?;
    }

    let article = list
        .article(index)
        .ok_or_else(|| anyhow!("No article at index {} ({} loaded)", index, list.article_count()))?;
    debug!(id = %article.id, "Opening article");

    let images: Arc<dyn ImageSource> = Arc::new(HttpImageSource::new());
    let mut detail = ArticleDetail::open(article, images);

    println!("{}", detail.title());
    println!("{}", detail.formatted_date());
    println!("{}", detail.article().web_url);
    println!();
    println!("{}", detail.body_text(html_to_text));

    if let Some(path) = image_out {
        match detail.wait_for_image().await {
            Some(bytes) => {
                std::fs::write(&path, &bytes)
                    .with_context(|| format!("Failed to write image to {}", path.display()))?;
                info!(path = %path.display(), bytes = bytes.len(), "Saved article image");
            }
            None => warn!("Article has no image to save"),
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.content_config()?;
    let client = ContentClient::new(&config)?;
    let list = ArticleList::with_page_size(Arc::new(client) as Arc<dyn ArticleSource>, config.page_size);

    match cli.command {
        Commands::List { pages } => list_articles(&list, pages).await,
        Commands::Show {
            index,
            pages,
            image_out,
        } => show_article(&list, index, pages, image_out).await,
    }
}
