//! Minimal embedding example for ropero-core
//!
//! Wires the in-memory backends, the JPEG pipeline, the repository, and the
//! observable collection together the way a UI host would: the collection
//! runs only while the auth signal reports an active session, and every
//! write is confirmed by the next remote snapshot.

use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use ropero_core::config::SyncConfig;
use ropero_core::{ClothingCollection, ClothingRepository};
use ropero_image::JpegPipeline;
use ropero_store_memory::{MemoryAuthSignal, MemoryItemStore, MemoryMediaStore};

/// Render a stand-in camera capture (the UI would hand us real bytes)
fn sample_photo() -> anyhow::Result<Vec<u8>> {
    let img = image::RgbImage::from_fn(1200, 900, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 96])
    });
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(img).write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
    Ok(bytes)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Embedded ropero-core Example ===\n");

    // Explicit dependency wiring; no global store handles.
    let config = SyncConfig::default();
    config.validate()?;

    let items = Arc::new(MemoryItemStore::new(config.collection.clone()));
    let media = Arc::new(MemoryMediaStore::new(&config.media));
    let pipeline = Arc::new(JpegPipeline::new(config.image));
    let repository = Arc::new(ClothingRepository::new(items, media.clone(), pipeline));
    let collection = Arc::new(ClothingCollection::new(repository.clone()));
    let auth = Arc::new(MemoryAuthSignal::new());

    // The collection mirrors the store only while a session is active.
    let gated = collection.clone();
    let signal: Arc<dyn ropero_core::AuthSignal> = auth.clone();
    let driver = tokio::spawn(async move { gated.run_gated(signal).await });

    println!("1. Signing in...");
    tokio::time::sleep(Duration::from_millis(50)).await;
    auth.sign_in();
    tokio::time::sleep(Duration::from_millis(50)).await;

    let mut items_rx = collection.items();

    println!("2. Adding an item with a photo...");
    let id = repository
        .create_with_photo("Chompa verde", "Chompa", sample_photo()?)
        .await?;
    println!("   created item {id}");

    items_rx.changed().await?;
    let snapshot = items_rx.borrow_and_update().clone();
    println!("3. Snapshot after create: {} item(s)", snapshot.len());
    let blob = media.fetch(&snapshot[0].image_url).expect("photo retrievable");
    println!("   normalized photo is {} bytes at {}", blob.len(), snapshot[0].image_url);

    println!("4. Wearing it twice, then washing it...");
    repository.record_use(&id).await?;
    repository.record_use(&id).await?;
    items_rx.changed().await?;
    println!(
        "   wear count now {}",
        items_rx.borrow_and_update()[0].wear_count
    );
    repository.send_to_wash(&id).await?;
    items_rx.changed().await?;
    println!(
        "   wear count after wash {}",
        items_rx.borrow_and_update()[0].wear_count
    );

    println!("5. Signing out (subscription stops)...");
    auth.sign_out();
    tokio::time::sleep(Duration::from_millis(50)).await;
    println!("   collection active: {}", collection.is_active());

    driver.abort();

    println!("\n=== Embedding Successful ===");
    println!("Key Points:");
    println!("- Store handles are injected, no global state");
    println!("- Writes are confirmed by the next remote snapshot");
    println!("- The live subscription is gated by the auth signal");

    Ok(())
}
