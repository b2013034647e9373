use anyhow::{Context, Result};
use image::DynamicImage;

pub async fn download_thumbnail(client: &reqwest::Client, url: &str) -> Result<DynamicImage> {
    let bytes = client.get(url).send().await?.bytes().await?;
    let img = image::load_from_memory(&bytes).context("Failed to decode thumbnail")?;
    Ok(img)
}
