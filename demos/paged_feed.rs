//! Paged Feed
//!
//! This demo drives a list screen through a refresh, two page loads, a
//! network failure with content visible, and a retry.
//!
//! Key concepts:
//! - Builder-injected merge, pagination and classification steps
//! - A view that renders display states and footer status
//! - The async loader settling fetches one at a time
//!
//! Run with: RUST_LOG=listload=debug cargo run --example paged_feed

use futures::FutureExt;
use listload::builder::ListLoadBuilder;
use listload::controller::{ListLoadController, ListView};
use listload::core::LoadState;
use listload::effects::ListLoader;
use listload::error::FetchError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const PAGE_SIZE: usize = 4;

struct ConsoleView;

impl ListView for ConsoleView {
    fn on_status_changed(&mut self, state: &LoadState) {
        let footer = if state.is_loading() {
            "loading..."
        } else if state.is_error() {
            "tap to retry"
        } else if state.has_more() {
            "more below"
        } else {
            "end of feed"
        };
        println!("  [footer] {}", footer);
    }

    fn show_progress(&mut self) {
        println!("  [screen] progress");
    }

    fn show_content(&mut self) {
        println!("  [screen] content");
    }

    fn show_empty(&mut self) {
        println!("  [screen] empty");
    }

    fn show_network_error(&mut self) {
        println!("  [screen] network error");
    }

    fn on_error(&mut self, message: &str) {
        println!("  [toast] {}", message);
    }
}

/// Fake backend: ten posts, the third request drops the connection.
fn backend() -> impl Fn(bool) -> futures::future::BoxFuture<'static, Result<Vec<String>, FetchError>>
       + Send
       + Sync
       + 'static {
    let requests = Arc::new(AtomicUsize::new(0));
    let offset = Arc::new(AtomicUsize::new(0));
    move |refresh| {
        let request = requests.fetch_add(1, Ordering::SeqCst);
        if refresh {
            offset.store(0, Ordering::SeqCst);
        }
        let offset = Arc::clone(&offset);
        async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            if request == 2 {
                return Err(FetchError::Network("connection reset".to_string()));
            }
            let start = offset.fetch_add(PAGE_SIZE, Ordering::SeqCst).min(10);
            let end = (start + PAGE_SIZE).min(10);
            Ok((start..end).map(|i| format!("post #{}", i + 1)).collect())
        }
        .boxed()
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Paged Feed Demo ===\n");

    let controller: ListLoadController<Vec<String>, Vec<String>, FetchError, ConsoleView> =
        ListLoadBuilder::new()
            .view(ConsoleView)
            .merge(|items: &mut Vec<String>, page: Vec<String>, _| items.extend(page))
            .has_more(|page: &Vec<String>| page.len() == PAGE_SIZE)
            .classify_by_trait()
            .build()?;

    let mut loader = ListLoader::new(controller, backend())?;

    println!("Refresh:");
    loader.refresh();
    println!("  second refresh while loading: {:?}", loader.refresh());
    loader.settle().await?;

    println!("\nLoad more:");
    if loader.load_more_if_ready().is_some() {
        loader.settle().await?;
    }

    println!("\nLoad more (backend fails):");
    if loader.load_more_if_ready().is_some() {
        loader.settle().await?;
    }
    println!(
        "  scroll trigger allowed after failure: {}",
        loader.controller().can_load_more()
    );

    println!("\nRetry:");
    loader.retry();
    loader.settle().await?;

    println!("\nFeed now holds {} posts:", loader.controller().items().len());
    for post in loader.controller().items() {
        println!("  - {}", post);
    }

    let path: Vec<_> = loader
        .controller()
        .history()
        .get_path()
        .into_iter()
        .map(|d| format!("{:?}", d))
        .collect();
    println!("\nDisplay path: {}", path.join(" -> "));

    println!("\n=== Demo Complete ===");
    Ok(())
}
