//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat, WishlistAction};
use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::listing::ListingRecord;
use crate::pagination::{LoadOutcome, PaginatedListLoader};
use crate::provider::{build_provider, ListingProvider};
use crate::wishlist::{Wishlist, WishlistEntry};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Browse {
                category,
                pages,
                page_size,
            } => self.browse(category, *pages, *page_size).await,
            Commands::Show { id } => self.show(*id).await,
            Commands::Wishlist { file, action } => self.wishlist(file, action).await,
            Commands::Config => self.print_config(),
        }
    }

    /// Effective configuration: file, then command-line overrides
    fn load_config(&self) -> Result<AppConfig> {
        let mut config = match &self.cli.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };

        if let Some(base_url) = &self.cli.base_url {
            config.override_base_url(base_url);
        }
        if let Some(fixture) = &self.cli.fixture {
            config.override_fixture(fixture);
        }

        config.validate()?;
        Ok(config)
    }

    fn provider(&self, config: &AppConfig) -> Result<Arc<dyn ListingProvider>> {
        let provider = build_provider(&config.provider)?;
        info!("Using {} listing provider", provider.name());
        Ok(provider)
    }

    /// Page through a category until it is exhausted or `max_pages` pages are shown
    async fn browse(
        &self,
        category: &str,
        max_pages: Option<u32>,
        page_size: Option<u32>,
    ) -> Result<()> {
        let mut config = self.load_config()?;
        if let Some(size) = page_size {
            config.loader.page_size = size;
            config.validate()?;
        }

        let loader = PaginatedListLoader::new(self.provider(&config)?, config.loader.clone());
        let start = Instant::now();
        let mut emitted = 0;
        let mut pages = 0;

        let mut outcome = loader.reset(category).await?;
        loop {
            match outcome {
                LoadOutcome::Loaded { exhausted, .. } => {
                    pages += 1;
                    let items = loader.current_items();
                    for record in &items[emitted..] {
                        self.print_record(record)?;
                    }
                    emitted = items.len();

                    if exhausted || max_pages.is_some_and(|max| pages >= max) {
                        break;
                    }
                }
                LoadOutcome::Failed { page } => {
                    let cause = loader.snapshot().last_error.unwrap_or_default();
                    return Err(Error::Other(format!("Failed to load page {page}: {cause}")));
                }
                LoadOutcome::Skipped(_) | LoadOutcome::Stale => break,
            }
            outcome = loader.load_next().await?;
        }

        let snapshot = loader.snapshot();
        info!(
            "Loaded {} listings in {} pages for {} in {:?}{}",
            snapshot.item_count,
            snapshot.last_page,
            category,
            start.elapsed(),
            if snapshot.exhausted { "" } else { " (more available)" }
        );
        if self.cli.format == OutputFormat::Pretty {
            println!("{} Homes", snapshot.item_count);
        }
        Ok(())
    }

    async fn show(&self, id: u64) -> Result<()> {
        let config = self.load_config()?;
        let provider = self.provider(&config)?;
        let record = fetch_existing(provider.as_ref(), id).await?;

        match self.cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
            OutputFormat::Pretty => print_detail(&record),
        }
        Ok(())
    }

    async fn wishlist(&self, file: &Path, action: &WishlistAction) -> Result<()> {
        let mut wishlist = Wishlist::load(file)?;

        match action {
            WishlistAction::Add { id } => {
                let config = self.load_config()?;
                let provider = self.provider(&config)?;
                let record = fetch_existing(provider.as_ref(), *id).await?;
                if wishlist.add(&record) {
                    info!("Saved listing {} to {}", id, file.display());
                } else {
                    info!("Listing {} is already saved", id);
                }
                wishlist.save(file)?;
            }
            WishlistAction::Remove { id } => {
                if wishlist.remove_id(*id) == 0 {
                    return Err(Error::Other(format!("Listing {id} is not in the wishlist")));
                }
                wishlist.save(file)?;
                info!("Removed listing {} from {}", id, file.display());
            }
            WishlistAction::List => match self.cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&wishlist)?),
                OutputFormat::Pretty => {
                    for (category, entries) in wishlist.by_category() {
                        println!("{category}");
                        for entry in entries {
                            println!("  {}", format_entry(entry));
                        }
                    }
                }
            },
        }
        Ok(())
    }

    fn print_config(&self) -> Result<()> {
        let config = self.load_config()?;
        match self.cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
            OutputFormat::Pretty => print!("{}", serde_yaml::to_string(&config)?),
        }
        Ok(())
    }

    fn print_record(&self, record: &ListingRecord) -> Result<()> {
        match self.cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string(record)?),
            OutputFormat::Pretty => println!("{}", format_summary(record)),
        }
        Ok(())
    }
}

async fn fetch_existing(provider: &dyn ListingProvider, id: u64) -> Result<ListingRecord> {
    provider
        .fetch_listing(id)
        .await?
        .ok_or_else(|| Error::Other(format!("Listing {id} not found")))
}

/// One-line summary used by `browse`
fn format_summary(record: &ListingRecord) -> String {
    let price = record.price.as_deref().unwrap_or("-");
    let rating = record
        .review_scores_rating
        .map_or_else(|| "new".to_string(), |r| format!("{r:.2}"));
    format!(
        "{:>12}  {:<40}  {:>10}  ★ {} ({})  {}",
        record.id,
        truncate(&record.name, 40),
        price,
        rating,
        record.number_of_reviews,
        record.room_type.as_deref().unwrap_or("")
    )
}

fn format_entry(entry: &WishlistEntry) -> String {
    let price = entry.price.map_or_else(|| "-".to_string(), |p| format!("${p:.0}"));
    let rating = entry.rating.map_or_else(|| "-".to_string(), |r| format!("★ {r:.1}"));
    format!("{:>12}  {}  {}  {}", entry.key.id, entry.title, price, rating)
}

fn print_detail(record: &ListingRecord) {
    println!("{}", record.name);
    if let (Some(room), Some(location)) = (&record.room_type, &record.host_location) {
        println!("{room} in {location}");
    }

    let count = |n: Option<u32>| n.map_or_else(|| "?".to_string(), |n| n.to_string());
    println!(
        "{} bedrooms | {} beds | {}",
        count(record.bedrooms),
        count(record.beds),
        record.bathrooms_text.as_deref().unwrap_or("? baths")
    );

    if let Some(rating) = record.review_scores_rating {
        println!("★ {rating:.2} · {} reviews", record.number_of_reviews);
    }
    if let Some(host) = &record.host_name {
        println!("Hosted by {host}");
    }
    if let Some(since) = &record.host_since {
        println!("Host since {since}");
    }
    if let Some(price) = &record.price {
        println!("{price} night");
    }
    if let Some(description) = &record.description {
        println!();
        println!("{description}");
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;
    use std::io::Write;

    fn fixture_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"id": 1, "host_id": 5, "name": "Farm one", "property_type": "FarmHouses"}},
                {{"id": 2, "host_id": 5, "name": "DJ set", "property_type": "DJ"}},
                {{"id": 3, "host_id": 6, "name": "Farm two", "property_type": "FarmHouses"}}
            ]"#
        )
        .unwrap();
        file
    }

    fn runner(args: &[&str]) -> Runner {
        Runner::new(Cli::parse_from(args))
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }

    #[test]
    fn test_format_summary() {
        let mut record = ListingRecord::new(7, 1, "Olive grove").with_price("$210.00");
        record.review_scores_rating = Some(4.333);
        record.number_of_reviews = 12;
        let line = format_summary(&record);
        assert!(line.contains("Olive grove"));
        assert!(line.contains("$210.00"));
        assert!(line.contains("★ 4.33 (12)"));
    }

    #[test]
    fn test_load_config_applies_overrides() {
        let runner = runner(&["ajar-listings", "--fixture", "listings.json", "config"]);
        let config = runner.load_config().unwrap();
        assert!(matches!(
            config.provider,
            crate::config::ProviderConfig::Fixture { .. }
        ));
    }

    #[tokio::test]
    async fn test_browse_fixture() {
        let file = fixture_file();
        let path = file.path().to_str().unwrap();
        let runner = runner(&[
            "ajar-listings",
            "--fixture",
            path,
            "browse",
            "--category",
            "FarmHouses",
            "--page-size",
            "1",
        ]);

        runner.run().await.unwrap();
    }

    #[tokio::test]
    async fn test_browse_rejects_zero_page_size() {
        let file = fixture_file();
        let path = file.path().to_str().unwrap();
        let runner = runner(&["ajar-listings", "--fixture", path, "browse", "--page-size", "0"]);

        assert!(matches!(
            runner.run().await,
            Err(Error::InvalidConfigValue { .. })
        ));
    }

    #[tokio::test]
    async fn test_show_missing_listing() {
        let file = fixture_file();
        let path = file.path().to_str().unwrap();
        let runner = runner(&["ajar-listings", "--fixture", path, "show", "99"]);

        let err = runner.run().await.unwrap_err();
        assert_eq!(err.to_string(), "Listing 99 not found");
    }

    #[tokio::test]
    async fn test_wishlist_add_list_remove() {
        let file = fixture_file();
        let fixture = file.path().to_str().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let wishlist_path = dir.path().join("wishlist.json");
        let wishlist = wishlist_path.to_str().unwrap();

        runner(&["ajar-listings", "--fixture", fixture, "wishlist", "--file", wishlist, "add", "3"])
            .run()
            .await
            .unwrap();
        assert_eq!(Wishlist::load(&wishlist_path).unwrap().len(), 1);

        runner(&["ajar-listings", "-f", "pretty", "wishlist", "--file", wishlist, "list"])
            .run()
            .await
            .unwrap();

        runner(&["ajar-listings", "wishlist", "--file", wishlist, "remove", "3"])
            .run()
            .await
            .unwrap();
        assert!(Wishlist::load(&wishlist_path).unwrap().is_empty());

        let err = runner(&["ajar-listings", "wishlist", "--file", wishlist, "remove", "3"])
            .run()
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not in the wishlist"));
    }
}
